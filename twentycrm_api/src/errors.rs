//! Error types for the API client.

/// Errors that can occur when talking to a Twenty CRM instance.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable response).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// A user-supplied filter was not valid JSON. Raised before any request
    /// is sent.
    #[error("Invalid filter JSON")]
    MalformedFilter(#[source] serde_json::Error),
    /// A user-supplied fields payload was not a valid JSON object.
    #[error("Invalid JSON in fields: {0}")]
    MalformedFields(String),
    /// A custom resource name was empty or not usable as a path segment.
    #[error("Invalid resource name {0:?}")]
    InvalidResource(String),
    /// A list envelope carried more than one collection under `data`, so
    /// there is no single collection to unwrap.
    #[error("Ambiguous list envelope: expected one collection key, found {0}")]
    AmbiguousEnvelope(usize),
}
