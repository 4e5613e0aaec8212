use std::time::Duration;
use thiserror::Error;

/// Why a single probe produced no usable reply.
///
/// These never abort a run; the loop reports them and moves on.
#[derive(Error, Debug)]
pub enum ProbeFailure {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("response body is not JSON: {0}")]
    MalformedBody(String),

    #[error("response JSON is not an object")]
    NotAnObject,
}

impl ProbeFailure {
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ProbeFailure::Timeout(timeout)
        } else if err.is_connect() {
            ProbeFailure::Connect(err.to_string())
        } else {
            ProbeFailure::Transport(err.to_string())
        }
    }
}
