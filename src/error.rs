//! Error type for everything outside the pure rendering core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// SDL initialisation, window or canvas creation failed
    #[error("display error: {0}")]
    Display(String),

    /// Streaming texture creation or upload failed
    #[error("texture error: {0}")]
    Texture(String),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
