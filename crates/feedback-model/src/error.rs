use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown feedback source '{0}'")]
    UnknownSource(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
