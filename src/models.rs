use serde_json::Value;
use std::fmt;

/// Substring the oracle puts in `message` when the account is unknown.
pub const INVALID_MARKER: &str = "Email does not exist";

/// Status token that accompanies the "unknown account" message.
pub const ERROR_STATUS: &str = "error";

/// Parsed reply from the login endpoint.
///
/// Only the two fields the oracle leaks through are kept. Both stay as raw
/// JSON values so that a reply with unexpected shapes still classifies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeResponse {
    pub status: Option<Value>,
    pub message: Option<Value>,
}

impl ProbeResponse {
    pub fn new(status: impl Into<Value>, message: impl Into<Value>) -> Self {
        ProbeResponse {
            status: Some(status.into()),
            message: Some(message.into()),
        }
    }

    /// Build from a decoded JSON document. Returns `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(mut map) => Some(ProbeResponse {
                status: map.remove("status"),
                message: map.remove("message"),
            }),
            _ => None,
        }
    }

    pub fn status_str(&self) -> Option<&str> {
        self.status.as_ref().and_then(Value::as_str)
    }

    pub fn message_str(&self) -> Option<&str> {
        self.message.as_ref().and_then(Value::as_str)
    }

    pub fn classify(&self) -> Classification {
        classify(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Valid,
    Invalid,
    /// Only produced when the probe itself failed.
    Inconclusive,
}

impl Classification {
    pub fn tag(&self) -> &'static str {
        match self {
            Classification::Valid => "VALID",
            Classification::Invalid => "INVALID",
            Classification::Inconclusive => "INCONCLUSIVE",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Classification::Valid)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Binary oracle decision.
///
/// A reply is `Invalid` only when it carries the canonical "does not exist"
/// error; anything else counts as an existing account. Never returns
/// `Inconclusive`.
pub fn classify(response: &ProbeResponse) -> Classification {
    let is_error = response.status_str() == Some(ERROR_STATUS);
    let says_unknown = response
        .message_str()
        .map(|m| m.contains(INVALID_MARKER))
        .unwrap_or(false);

    if is_error && says_unknown {
        Classification::Invalid
    } else {
        Classification::Valid
    }
}
