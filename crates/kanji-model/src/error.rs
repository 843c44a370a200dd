use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("malformed kanji id: {0:?}")]
    MalformedId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
