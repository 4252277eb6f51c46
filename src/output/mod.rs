pub mod console;
pub mod json;

use serde::{Deserialize, Serialize};

use crate::config::SourceSettings;
use crate::description::SourceDescription;
use crate::error::Result;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Some(Self::Console),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Render validated settings into the specified format.
pub fn render_settings(settings: &SourceSettings, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render_settings(settings)),
        OutputFormat::Json => json::render(settings),
    }
}

/// Render a source description into the specified format.
pub fn render_description(description: &SourceDescription, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render_description(description)),
        OutputFormat::Json => json::render(description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_format_names() {
        assert_eq!(OutputFormat::from_str_lenient("TEXT"), Some(OutputFormat::Console));
        assert_eq!(OutputFormat::from_str_lenient("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str_lenient("sarif"), None);
    }
}
