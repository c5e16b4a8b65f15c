//! Error types for Showtrack

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No {entity} with this id exists")]
    NotFound { entity: &'static str, id: u64 },

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    UnsupportedMediaType(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
