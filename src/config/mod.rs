pub mod bytesize;
pub mod digest;
pub mod image;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::description::{parse_authors, Author};
use crate::error::Result;
use crate::limits::ReadLimits;

pub use digest::FileSourceConfig;
pub use image::{ImageSettings, ImageSourceConfig, PullSource};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".sbom-source.toml";

/// Source configuration as loaded from `.sbom-source.toml`.
///
/// Every field is optional; anything left out falls back to the pipeline
/// default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    /// Raw `Type:Name[:Email]` strings.
    #[serde(default)]
    pub authors: Vec<String>,
    /// Explicit source type selector (e.g. `dir`, `docker`).
    #[serde(default)]
    pub source: Option<String>,
    /// Prefix applied to every reported file path.
    #[serde(default)]
    pub base_path: Option<PathBuf>,
    #[serde(default)]
    pub file: FileSourceConfig,
    #[serde(default)]
    pub image: ImageSourceConfig,
}

/// Values supplied on the command line or through the environment.
/// Present values replace the loaded ones; lists replace, never append.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub name: Option<String>,
    pub version: Option<String>,
    pub supplier: Option<String>,
    pub authors: Option<Vec<String>>,
    pub source: Option<String>,
    pub base_path: Option<PathBuf>,
    pub digests: Option<Vec<String>>,
    pub default_pull_source: Option<String>,
    pub max_layer_size: Option<String>,
}

/// Validated, normalized configuration handed to the scanning pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceSettings {
    pub name: Option<String>,
    pub version: Option<String>,
    pub supplier: Option<String>,
    pub authors: Vec<Author>,
    pub source: Option<String>,
    pub base_path: Option<PathBuf>,
    pub digests: Vec<String>,
    pub image: ImageSettings,
}

impl SourceSettings {
    pub fn read_limits(&self) -> ReadLimits {
        ReadLimits::new(self.image.max_layer_size)
    }
}

impl SourceConfig {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: SourceConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(name) = &overrides.name {
            self.name = Some(name.clone());
        }
        if let Some(version) = &overrides.version {
            self.version = Some(version.clone());
        }
        if let Some(supplier) = &overrides.supplier {
            self.supplier = Some(supplier.clone());
        }
        if let Some(authors) = &overrides.authors {
            self.authors = authors.clone();
        }
        if let Some(source) = &overrides.source {
            self.source = Some(source.clone());
        }
        if let Some(base_path) = &overrides.base_path {
            self.base_path = Some(base_path.clone());
        }
        if let Some(digests) = &overrides.digests {
            self.file.digests = digests.clone();
        }
        if let Some(pull_source) = &overrides.default_pull_source {
            self.image.default_pull_source = pull_source.clone();
        }
        if let Some(size) = &overrides.max_layer_size {
            self.image.max_layer_size = size.clone();
        }
    }

    /// Run every post-load step. The first failure aborts.
    pub fn post_load(mut self) -> Result<SourceSettings> {
        let authors = parse_authors(&self.authors)?;
        self.file.post_load();
        let image = self.image.post_load()?;

        Ok(SourceSettings {
            name: non_empty(self.name),
            version: non_empty(self.version),
            supplier: non_empty(self.supplier),
            authors,
            source: non_empty(self.source),
            base_path: self.base_path.filter(|p| !p.as_os_str().is_empty()),
            digests: self.file.digests,
            image,
        })
    }

    /// Help text for fields whose accepted values are not obvious.
    pub fn describe_fields() -> Vec<(&'static str, String)> {
        vec![
            (
                "file.digests",
                format!(
                    "the file digest algorithms to use on the scanned file (options: {})",
                    digest::KNOWN_DIGEST_ALGORITHMS
                        .iter()
                        .map(|a| format!("\"{a}\""))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            ),
            (
                "image.default-pull-source",
                "allows users to specify which image source should be used to generate the sbom\n\
                 valid values are: registry, docker, podman"
                    .to_string(),
            ),
        ]
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# sbom-source configuration

# Descriptive metadata recorded in the SBOM (not part of the source identity).
# name = "my-app"
# version = "1.0.0"
# supplier = "Acme Corp"

# Authors as "Type:Name" or "Type:Name:Email", Type is Person, Organization or Tool.
# authors = ["Person:Jane Doe:jane@example.com", "Tool:sbom-source"]

# Explicit source type (e.g. dir, file, registry, docker, podman).
# source = "dir"

# Prefix applied to every reported file path.
# base-path = "/"

[file]
# The file digest algorithms to use on the scanned file
# (options: "md5", "sha1", "sha224", "sha256", "sha384", "sha512").
digests = ["sha256"]

[image]
# Which image source should be used: registry, docker, podman, or "" for any.
default-pull-source = ""

# Max bytes read from a single image layer (e.g. "500MB"). Empty keeps the default.
max-layer-size = ""
"#
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::AuthorType;
    use crate::error::SourceError;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_sections_use_defaults() {
        let config: SourceConfig = toml::from_str("name = \"app\"").unwrap();
        assert_eq!(config.file.digests, vec!["sha256".to_string()]);
        assert_eq!(config.image, ImageSourceConfig::default());
    }

    #[test]
    fn file_section_without_digests_uses_defaults() {
        let config: SourceConfig = toml::from_str("[file]\n").unwrap();
        assert_eq!(config.file.digests, vec!["sha256".to_string()]);
    }

    #[test]
    fn explicit_empty_digests_are_kept() {
        let config: SourceConfig = toml::from_str("[file]\ndigests = []\n").unwrap();
        let settings = config.post_load().unwrap();
        assert!(settings.digests.is_empty());
    }

    #[test]
    fn kebab_case_keys() {
        let config: SourceConfig = toml::from_str(
            r#"
base-path = "/scan"

[image]
default-pull-source = "docker"
max-layer-size = "500MB"
"#,
        )
        .unwrap();
        assert_eq!(config.base_path, Some(PathBuf::from("/scan")));
        assert_eq!(config.image.default_pull_source, "docker");
        assert_eq!(config.image.max_layer_size, "500MB");
    }

    #[test]
    fn post_load_builds_settings() {
        let config: SourceConfig = toml::from_str(
            r#"
name = "app"
version = ""
authors = ["Organization:Acme", "Tool:sbom-source"]

[file]
digests = ["sha512", "sha1", "sha512"]

[image]
default-pull-source = "registry"
max-layer-size = "1GiB"
"#,
        )
        .unwrap();
        let settings = config.post_load().unwrap();
        assert_eq!(settings.name.as_deref(), Some("app"));
        assert_eq!(settings.version, None);
        assert_eq!(settings.authors.len(), 2);
        assert_eq!(settings.authors[0].author_type, AuthorType::Organization);
        assert_eq!(settings.digests, vec!["sha1".to_string(), "sha512".to_string()]);
        assert_eq!(settings.image.default_pull_source, PullSource::Registry);
        assert_eq!(settings.read_limits().per_file, Some(1 << 30));
    }

    #[test]
    fn bad_author_halts_post_load() {
        let config = SourceConfig {
            authors: vec!["Robot:bad".into()],
            image: ImageSourceConfig {
                default_pull_source: "nope".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.post_load().unwrap_err();
        assert!(matches!(err, SourceError::InvalidAuthorType(_)));
    }

    #[test]
    fn invalid_pull_source_fails() {
        let config: SourceConfig =
            toml::from_str("[image]\ndefault-pull-source = \"foo\"\n").unwrap();
        let err = config.post_load().unwrap_err();
        assert!(matches!(err, SourceError::InvalidDefaultPullSource { .. }));
    }

    #[test]
    fn overrides_replace_loaded_values() {
        let mut config = SourceConfig {
            name: Some("from-file".into()),
            authors: vec!["Tool:a".into()],
            ..Default::default()
        };
        config.apply(&ConfigOverrides {
            name: Some("from-flag".into()),
            authors: Some(vec!["Person:b".into()]),
            digests: Some(vec!["md5".into()]),
            max_layer_size: Some("1KB".into()),
            ..Default::default()
        });
        assert_eq!(config.name.as_deref(), Some("from-flag"));
        assert_eq!(config.authors, vec!["Person:b".to_string()]);
        assert_eq!(config.file.digests, vec!["md5".to_string()]);
        assert_eq!(config.image.max_layer_size, "1KB");
        assert_eq!(config.image.default_pull_source, "");
    }

    #[test]
    fn starter_toml_is_valid() {
        let config: SourceConfig = toml::from_str(SourceConfig::starter_toml()).unwrap();
        let settings = config.post_load().unwrap();
        assert_eq!(settings.digests, vec!["sha256".to_string()]);
        assert_eq!(settings.image, ImageSettings::default());
    }

    #[test]
    fn field_descriptions_list_options() {
        let fields = SourceConfig::describe_fields();
        let (key, text) = &fields[0];
        assert_eq!(*key, "file.digests");
        assert!(text.contains("\"sha384\""));
        assert!(fields[1].1.contains("registry, docker, podman"));
    }

    #[test]
    fn load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = SourceConfig::load(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(config, SourceConfig::default());
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "authors = \"not-a-list\"").unwrap();
        let err = SourceConfig::load(&path).unwrap_err();
        assert!(matches!(err, SourceError::Toml(_)));
    }
}
