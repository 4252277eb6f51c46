//! Descriptive source metadata handed to every SBOM encoder.
//!
//! A `SourceDescription` is built once, when a source is resolved, and is
//! never mutated afterwards. Only `metadata` contributes to the source
//! identity; name, version, supplier and authors are provenance.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::image::PullSource;
use crate::config::SourceSettings;
use crate::error::{Result, SourceError};

/// Kind of SBOM author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorType {
    Person,
    Organization,
    Tool,
}

impl AuthorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Organization => "Organization",
            Self::Tool => "Tool",
        }
    }
}

impl FromStr for AuthorType {
    type Err = SourceError;

    /// Exact, case-sensitive match on the wire name.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Person" => Ok(Self::Person),
            "Organization" => Ok(Self::Organization),
            "Tool" => Ok(Self::Tool),
            other => Err(SourceError::InvalidAuthorType(other.to_string())),
        }
    }
}

impl std::fmt::Display for AuthorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An author of the SBOM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    /// Empty when the author string had no email segment.
    pub email: String,
    #[serde(rename = "type")]
    pub author_type: AuthorType,
}

impl Author {
    /// Parse a single `Type:Name[:Email]` string.
    ///
    /// Only the first two colons are significant. Anything after a third
    /// colon is dropped.
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split(':').collect();
        if parts.len() < 2 {
            return Err(SourceError::MalformedAuthorFormat(raw.to_string()));
        }

        let author_type: AuthorType = parts[0].parse()?;

        let name = parts[1];
        if name.is_empty() {
            return Err(SourceError::EmptyAuthorName(raw.to_string()));
        }

        let email = parts.get(2).copied().unwrap_or_default();

        if parts.len() > 3 {
            tracing::warn!(
                author = %raw,
                dropped = %parts[3..].join(":"),
                "ignoring extra author segments after email"
            );
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            author_type,
        })
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.email.is_empty() {
            write!(f, "{}:{}", self.author_type, self.name)
        } else {
            write!(f, "{}:{}:{}", self.author_type, self.name, self.email)
        }
    }
}

/// Parse raw author strings in input order. The first bad entry fails the
/// whole batch.
pub fn parse_authors<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Author>> {
    raw.iter().map(|s| Author::parse(s.as_ref())).collect()
}

/// Source-kind specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceMetadata {
    Directory {
        path: PathBuf,
        base: Option<PathBuf>,
    },
    File {
        path: PathBuf,
        digests: Vec<String>,
    },
    Image {
        user_input: String,
        pull_source: PullSource,
    },
}

impl SourceMetadata {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Directory { .. } => "directory",
            Self::File { .. } => "file",
            Self::Image { .. } => "image",
        }
    }
}

/// Static description of "what" was cataloged.
///
/// Deserializing recomputes `id` from `metadata`; any incoming id is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DescriptionFields")]
pub struct SourceDescription {
    id: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub supplier: Option<String>,
    pub authors: Vec<Author>,
    pub metadata: SourceMetadata,
}

impl SourceDescription {
    /// Build the description for a resolved source. The id is derived from
    /// `metadata` alone.
    pub fn new(settings: &SourceSettings, metadata: SourceMetadata) -> Result<Self> {
        let id = content_digest(&metadata)?;
        Ok(Self {
            id,
            name: settings.name.clone(),
            version: settings.version.clone(),
            supplier: settings.supplier.clone(),
            authors: settings.authors.clone(),
            metadata,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Identity hash over the content-bearing fields only.
    pub fn content_digest(&self) -> Result<String> {
        content_digest(&self.metadata)
    }
}

/// Wire form of a description without its identity.
#[derive(Deserialize)]
struct DescriptionFields {
    name: Option<String>,
    version: Option<String>,
    supplier: Option<String>,
    #[serde(default)]
    authors: Vec<Author>,
    metadata: SourceMetadata,
}

impl TryFrom<DescriptionFields> for SourceDescription {
    type Error = SourceError;

    fn try_from(fields: DescriptionFields) -> Result<Self> {
        Ok(Self {
            id: content_digest(&fields.metadata)?,
            name: fields.name,
            version: fields.version,
            supplier: fields.supplier,
            authors: fields.authors,
            metadata: fields.metadata,
        })
    }
}

fn content_digest(metadata: &SourceMetadata) -> Result<String> {
    let canonical = serde_json::to_vec(metadata)?;
    Ok(hex::encode(Sha256::digest(&canonical)))
}
