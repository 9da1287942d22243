//! Errors produced while talking to the autos API.
//!
//! # Design
//! Two families: the exchange itself failed (`Transport`, plus the two serde
//! variants for bodies that could not be produced or understood), or the
//! server answered with a non-2xx status. `NotFound` is split out of the
//! latter because the API answers unknown ids with 404 and a `{msg}` body.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// 404 from the server. `msg` is the server's explanation when it sent one.
    #[error("record not found: {msg}")]
    NotFound { msg: String },

    /// Any other non-2xx status.
    #[error("HTTP {status}: {msg}")]
    Http { status: u16, msg: String },

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// True for failures where no usable answer came back from the server.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Transport(_) | ApiError::Deserialization(_)
        )
    }

    /// Status code for application-level failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
