use thiserror::Error;

/// Errors produced by the session layer
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("session storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, FlowError>;
