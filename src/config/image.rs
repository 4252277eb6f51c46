use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bytesize::resolve_max_layer_size;
use crate::error::{Result, SourceError};

/// Where container images should be obtained from by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PullSource {
    /// No preference; the pipeline tries its own order.
    #[default]
    #[serde(rename = "")]
    Unspecified,
    #[serde(rename = "registry")]
    Registry,
    #[serde(rename = "docker")]
    Docker,
    #[serde(rename = "podman")]
    Podman,
}

impl PullSource {
    /// Accepted wire values, in the order they are reported to users.
    pub const VALID_VALUES: [&'static str; 4] = ["registry", "docker", "podman", ""];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::Registry => "registry",
            Self::Docker => "docker",
            Self::Podman => "podman",
        }
    }

    pub fn is_specified(&self) -> bool {
        !matches!(self, Self::Unspecified)
    }

    fn valid_values_display() -> String {
        Self::VALID_VALUES
            .iter()
            .map(|&v| if v.is_empty() { "''" } else { v })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for PullSource {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Ok(Self::Unspecified),
            "registry" => Ok(Self::Registry),
            "docker" => Ok(Self::Docker),
            "podman" => Ok(Self::Podman),
            other => Err(SourceError::InvalidDefaultPullSource {
                value: other.to_string(),
                valid: Self::valid_values_display(),
            }),
        }
    }
}

impl std::fmt::Display for PullSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check a raw default pull source against the allow-list.
pub fn validate_default_pull_source(value: &str) -> Result<()> {
    value.parse::<PullSource>().map(|_| ())
}

/// `[image]` section as written by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImageSourceConfig {
    #[serde(default)]
    pub default_pull_source: String,
    /// Human-readable size such as `500MB`. Empty keeps the reader default.
    #[serde(default)]
    pub max_layer_size: String,
}

/// Validated image settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImageSettings {
    pub default_pull_source: PullSource,
    /// Per-layer read cap in bytes; `None` keeps the reader default.
    pub max_layer_size: Option<u64>,
}

impl ImageSourceConfig {
    /// Resolve the layer size, then validate the pull source.
    pub fn post_load(&self) -> Result<ImageSettings> {
        let max_layer_size = resolve_max_layer_size(&self.max_layer_size)?;
        if let Some(bytes) = max_layer_size {
            tracing::debug!(bytes, "resolved max layer size");
        }

        let default_pull_source: PullSource = self.default_pull_source.parse()?;
        tracing::debug!(pull_source = %default_pull_source, "validated default pull source");

        Ok(ImageSettings {
            default_pull_source,
            max_layer_size,
        })
    }
}
