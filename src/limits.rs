//! Read limits passed to file and layer readers.
//!
//! The limit is resolved once from configuration and handed to readers as a
//! plain value, so nothing reads it from global state.

use std::io::Read;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadLimits {
    /// Max bytes read from any single file or image layer.
    pub per_file: Option<u64>,
}

impl ReadLimits {
    /// Applied when no limit is configured (2 GiB).
    pub const DEFAULT_PER_FILE: u64 = 2 * 1024 * 1024 * 1024;

    pub fn new(per_file: Option<u64>) -> Self {
        Self { per_file }
    }

    pub fn effective_per_file(&self) -> u64 {
        self.per_file.unwrap_or(Self::DEFAULT_PER_FILE)
    }

    /// Whether a file of `size` bytes can be read in full.
    pub fn allows(&self, size: u64) -> bool {
        size <= self.effective_per_file()
    }

    /// Cap a reader at the effective per-file limit.
    pub fn limit_reader<R: Read>(&self, reader: R) -> std::io::Take<R> {
        reader.take(self.effective_per_file())
    }
}
