use thiserror::Error;

use crate::generate::GenerateError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write DOCX package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("invalid settings: {0}")]
    Config(String),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid intake: {0}")]
    Intake(String),

    #[error("asset error: {0}")]
    Asset(String),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}
