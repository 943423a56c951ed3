use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpexError {
    /// Rejected before any store call: bad or missing input fields.
    #[error("validation: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A store adapter failure, surfaced unchanged. The core adds no
    /// retry and no rollback; the burden of retry is on the caller.
    #[error("storage: {0}")]
    Storage(#[from] anyhow::Error),
}

impl OpexError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Unauthorized(_) => 403,
            Self::Storage(_) => 500,
        }
    }
}
