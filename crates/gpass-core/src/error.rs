use thiserror::Error;

pub type GpassResult<T> = Result<T, GpassError>;

#[derive(Debug, Error)]
pub enum GpassError {
    /// Decrypted data did not start with the expected magic string.
    #[error("wrong password or unsupported file version")]
    Password,

    #[error("format error: {0}")]
    Format(String),

    #[error("config error: {0}")]
    Config(String),
}

impl GpassError {
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub fn is_password(&self) -> bool {
        matches!(self, Self::Password)
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }
}
