//! sbom-source — source configuration and descriptive metadata for SBOM
//! generation.
//!
//! Loads the user's source configuration, normalizes and validates it
//! (digest set, default pull source, layer size limit, authors) and builds
//! the `SourceDescription` that SBOM encoders consume.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use sbomsource::{describe, load_settings, config::ConfigOverrides};
//!
//! let settings = load_settings(Path::new(".sbom-source.toml"), &ConfigOverrides::default()).unwrap();
//! let description = describe(&settings, "./my-project").unwrap();
//! println!("{} ({})", description.id(), description.metadata.kind());
//! ```

pub mod config;
pub mod description;
pub mod error;
pub mod limits;
pub mod output;

use std::path::{Path, PathBuf};

use config::{ConfigOverrides, PullSource, SourceConfig, SourceSettings};
use description::{SourceDescription, SourceMetadata};
use error::{Result, SourceError};

/// Source selectors that refer to container images.
const IMAGE_SOURCES: &[&str] = &[
    "registry",
    "docker",
    "podman",
    "docker-archive",
    "oci-archive",
    "oci-dir",
    "singularity",
];

/// Load, override and validate the source configuration.
pub fn load_settings(config_path: &Path, overrides: &ConfigOverrides) -> Result<SourceSettings> {
    let mut config = SourceConfig::load(config_path)?;
    config.apply(overrides);
    let settings = config.post_load()?;
    tracing::debug!(
        authors = settings.authors.len(),
        digests = ?settings.digests,
        "source configuration loaded"
    );
    Ok(settings)
}

/// Work out what kind of source `target` is and collect its metadata.
///
/// An explicit `source` selector wins. Otherwise existing directories and
/// files are filesystem sources and anything else is treated as an image
/// reference.
pub fn resolve_metadata(settings: &SourceSettings, target: &str) -> Result<SourceMetadata> {
    let path = Path::new(target);
    let selector = settings.source.as_deref().map(str::to_lowercase);

    match selector.as_deref() {
        Some("dir") => {
            if !path.is_dir() {
                return Err(SourceError::Config(format!("'{target}' is not a directory")));
            }
            Ok(directory_metadata(settings, path))
        }
        Some("file") => {
            if !path.is_file() {
                return Err(SourceError::Config(format!("'{target}' is not a file")));
            }
            Ok(file_metadata(settings, path))
        }
        Some(kind) if IMAGE_SOURCES.contains(&kind) => {
            let pull_source = kind
                .parse::<PullSource>()
                .unwrap_or(settings.image.default_pull_source);
            Ok(image_metadata(target, pull_source))
        }
        Some(kind) => Err(SourceError::Config(format!(
            "unknown source type '{kind}'; expected dir, file, or one of: {}",
            IMAGE_SOURCES.join(", ")
        ))),
        None if path.is_dir() => Ok(directory_metadata(settings, path)),
        None if path.is_file() => Ok(file_metadata(settings, path)),
        None => Ok(image_metadata(target, settings.image.default_pull_source)),
    }
}

/// Build the description for `target` from validated settings.
pub fn describe(settings: &SourceSettings, target: &str) -> Result<SourceDescription> {
    let metadata = resolve_metadata(settings, target)?;
    let description = SourceDescription::new(settings, metadata)?;
    tracing::debug!(
        id = %description.id(),
        kind = description.metadata.kind(),
        "source described"
    );
    Ok(description)
}

fn directory_metadata(settings: &SourceSettings, path: &Path) -> SourceMetadata {
    SourceMetadata::Directory {
        path: PathBuf::from(path),
        base: settings.base_path.clone(),
    }
}

fn file_metadata(settings: &SourceSettings, path: &Path) -> SourceMetadata {
    SourceMetadata::File {
        path: PathBuf::from(path),
        digests: settings.digests.clone(),
    }
}

fn image_metadata(target: &str, pull_source: PullSource) -> SourceMetadata {
    SourceMetadata::Image {
        user_input: target.to_string(),
        pull_source,
    }
}
