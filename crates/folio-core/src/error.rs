use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Pager is not attached to an adapter")]
    NotAttached,

    #[error("Pager is already attached to an adapter")]
    AlreadyAttached,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
