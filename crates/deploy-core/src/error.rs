use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("invalid account id '{0}': must be 2-64 lowercase alphanumeric characters separated by '-', '_' or '.'")]
    InvalidAccountId(String),

    #[error("command is empty")]
    EmptyCommand,

    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, DeployError>;
