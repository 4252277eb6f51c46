use serde::Serialize;

use crate::error::Result;

/// Render any serializable value as pretty JSON.
pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string_pretty(value)?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceSettings;

    #[test]
    fn settings_use_kebab_case_keys() {
        let settings = SourceSettings {
            base_path: Some("/scan".into()),
            ..Default::default()
        };
        let rendered = render(&settings).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["base-path"], "/scan");
        assert_eq!(value["image"]["default-pull-source"], "");
    }
}
