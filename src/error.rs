use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("unknown candidate: {0}")]
    UnknownCandidate(String),

    #[error("candidate listed more than once: {0}")]
    DuplicateCandidate(String),

    #[error("comparison needs at least one candidate")]
    EmptyComparison,

    #[error("session file not found: {0}")]
    SessionNotFound(String),

    #[error("cannot parse session {path}: {reason}")]
    SessionParse { path: String, reason: String },

    #[error("invalid session: {0}")]
    SessionInvalid(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid answer '{0}': expected question=option")]
    InvalidAnswer(String),

    #[error("invalid context '{0}': expected key=value")]
    InvalidContext(String),

    #[error("logging setup failed: {0}")]
    Telemetry(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SelectorError>;
