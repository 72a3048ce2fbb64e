use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
