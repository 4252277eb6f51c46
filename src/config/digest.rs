use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Digest algorithms the pipeline applies to files when none are configured.
pub const DEFAULT_DIGEST_ALGORITHMS: &[&str] = &["sha256"];

/// Algorithm names the hashing layer understands. Used for help text only.
pub const KNOWN_DIGEST_ALGORITHMS: &[&str] = &["md5", "sha1", "sha224", "sha256", "sha384", "sha512"];

pub fn default_digests() -> Vec<String> {
    DEFAULT_DIGEST_ALGORITHMS
        .iter()
        .map(|alg| alg.to_string())
        .collect()
}

/// Deduplicate and sort digest names.
///
/// Names are compared as exact strings: `SHA1` and `sha1` are distinct.
pub fn normalize_digests<S: AsRef<str>>(digests: &[S]) -> Vec<String> {
    digests
        .iter()
        .map(|d| d.as_ref().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// `[file]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSourceConfig {
    #[serde(default = "default_digests")]
    pub digests: Vec<String>,
}

impl Default for FileSourceConfig {
    fn default() -> Self {
        Self {
            digests: default_digests(),
        }
    }
}

impl FileSourceConfig {
    pub fn post_load(&mut self) {
        self.digests = normalize_digests(&self.digests);
        tracing::debug!(digests = ?self.digests, "normalized file digests");
    }
}
