use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server rejected the request ({status}): {body}")]
    InvalidRequest { status: u16, body: String },

    #[error("server failed to process the request ({status}): {body}")]
    ServerFailure { status: u16, body: String },

    #[error("proof failed to reconstruct the claimed snapshot digest")]
    VerificationFailure,
}

pub type Result<T> = std::result::Result<T, ClientError>;
