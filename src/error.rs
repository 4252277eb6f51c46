use thiserror::Error;

pub type Result<T> = std::result::Result<T, SourceError>;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("invalid author format '{0}', expected 'type:name' or 'type:name:email'")]
    MalformedAuthorFormat(String),

    #[error("invalid author type '{0}', must be Person, Organization, or Tool")]
    InvalidAuthorType(String),

    /// Carries the raw author string that had an empty name segment.
    #[error("author name cannot be empty")]
    EmptyAuthorName(String),

    #[error("{value} is not a valid default source; please use one of the following: {valid}")]
    InvalidDefaultPullSource { value: String, valid: String },

    #[error("invalid byte size '{input}': {reason}")]
    InvalidByteSizeFormat { input: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SourceError {
    pub fn exit_code(&self) -> i32 {
        2
    }
}
