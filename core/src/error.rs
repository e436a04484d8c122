//! Error types for the lookup client and the view controller.
//!
//! # Design
//! `ApiError` keeps enough detail for logs: the raw status and body of a
//! failed response, or the messages a GraphQL server returned. None of it
//! reaches the user. `LookupError` is what the view shows, and its
//! `Display` output is the exact banner text.

use thiserror::Error;

/// Errors returned by `EnsClient` and by the host's transport.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The endpoint answered with a non-200 status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The endpoint answered 200 but the GraphQL envelope carried errors.
    #[error("graphql errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// Neither `data` nor `errors` was present in the envelope.
    #[error("response carried no data")]
    MissingData,

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The host could not complete the round trip (DNS, TLS, timeout, ...).
    #[error("transport failed: {0}")]
    Transport(String),
}

/// User-facing failure of a single search attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Submitted with nothing but whitespace in the input.
    #[error("Please enter a valid ENS name.")]
    InvalidName,

    /// The query succeeded but matched no record.
    #[error("No data found for the provided ENS name.")]
    NotFound,

    /// Anything that went wrong between dispatch and a parsed result.
    #[error("An error occurred while fetching data.")]
    FetchFailed,
}
