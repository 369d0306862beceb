//! Error types for the REST client.
//!
//! # Design
//! Every failure is carried as a value inside an `ApiResult`, so the enum is
//! `Clone` and stores library errors as their rendered messages. Variants fall
//! into three groups: local failures that stop a call before any I/O
//! (`InvalidUrl`, `Serialization`, `InvalidQuery`), transport failures
//! (`Transport`), and protocol failures reported after a response arrived
//! (`Status`, `UnknownField`, `Decode`).

use thiserror::Error;

/// Errors produced while building, sending, or reading a REST call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The joined base URL and path could not be parsed.
    #[error("invalid url {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// The payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A GET/DELETE payload did not serialize to a JSON object.
    #[error("query payload must serialize to a JSON object, got {0}")]
    InvalidQuery(String),

    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a status other than 200.
    #[error("status code({status_line}) {body}")]
    Status { status_line: String, body: String },

    /// The requested field is not a top-level member of the envelope.
    #[error("unknown return value {key}\n{body}")]
    UnknownField { key: String, body: String },

    /// The field exists but does not fit the requested type.
    #[error("unmarshal result({key}) err {message}\n{fragment}")]
    Decode {
        key: String,
        message: String,
        fragment: String,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
