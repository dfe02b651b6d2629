//! Error types for fetching pet listings.
//!
//! Formatting a [`PetRecord`](crate::PetRecord) never fails. Everything in this module
//! comes from the fetch side: configuration, the HTTP round trip, and decoding the
//! Petfinder envelope into a record.

use http::{HeaderMap, StatusCode};

/// The main error type for this crate.
///
/// Errors that carry a response keep the raw body so a bad payload can be
/// inspected after the fact.
///
/// # Examples
///
/// ```no_run
/// use cuties::{Error, PetfinderClient};
///
/// # async fn example() -> Result<(), Error> {
/// let client = PetfinderClient::builder().api_key("secret").build()?;
///
/// match client.random().await {
///     Ok(pet) => println!("{}", pet.message()),
///     Err(Error::DeserializationFailed { raw_response, serde_error, .. }) => {
///         eprintln!("Unexpected payload: {}", raw_response);
///         eprintln!("Serde error: {}", serde_error);
///     }
///     Err(Error::HttpError { status, .. }) => eprintln!("Petfinder returned {}", status),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level error occurred (connection refused, DNS lookup failed, etc.).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request took longer than the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The response body was not a Petfinder envelope.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// Petfinder answered with a non-2xx status code.
    #[error("HTTP error {status}: {raw_response}")]
    HttpError {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
        /// The response headers
        headers: HeaderMap,
    },

    /// Invalid configuration was provided, such as a missing API key or a bad header value.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A listing decoded fine but cannot be turned into a usable record,
    /// e.g. it lists no breeds at all.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` if repeating the same request could plausibly succeed.
    ///
    /// Network errors, timeouts, 5xx and 429 responses are retryable. Everything
    /// else points at the request or the payload and will fail the same way again.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuties::Error;
    /// use http::StatusCode;
    ///
    /// let err = Error::HttpError {
    ///     status: StatusCode::BAD_GATEWAY,
    ///     raw_response: "upstream down".to_string(),
    ///     headers: http::HeaderMap::new(),
    /// };
    /// assert!(err.is_retryable());
    ///
    /// let err = Error::InvalidRecord("no breeds".to_string());
    /// assert!(!err.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network(_) => true,
            Error::Timeout => true,
            Error::HttpError { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Error::DeserializationFailed { .. } => false,
            Error::ConfigurationError(_) => false,
            Error::InvalidRecord(_) => false,
            Error::InvalidUrl(_) => false,
        }
    }

    /// Returns the HTTP status code if this error has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpError { status, .. } => Some(*status),
            Error::DeserializationFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::HttpError { raw_response, .. } => Some(raw_response),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
