pub type Result<T> = std::result::Result<T, Error>;

/// Errors from decoding diagram descriptions.
///
/// Serialization and validation are total and never produce these.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid diagram description: {message}")]
    InvalidDescription { message: String },

    #[error("Invalid YAML diagram description: {message}")]
    InvalidYamlDescription { message: String },
}
