use thiserror::Error;

/// Application-level failures outside the agent call itself.
///
/// Classified API errors stay as [`AgentError`](crate::bedrock::AgentError):
/// they are printed as diagnostics, never propagated. These are the local
/// faults that do bubble up and end the process with a non-zero exit.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
