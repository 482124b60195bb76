use thiserror::Error;

pub type Result<T> = std::result::Result<T, PressError>;

#[derive(Debug, Error)]
pub enum PressError {
    #[error("validation error: {0}")]
    Validation(String),
}
