//! Petfinder HTTP client.
//!
//! The [`PetfinderClient`] type asks Petfinder for a random pet from one shelter.
//! Use [`PetfinderClientBuilder`] to configure and create clients.

use crate::{petfinder::Envelope, Error, Fetched, PetRecord, Result};
use http::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Where the Petfinder v1 API lives.
pub const DEFAULT_BASE_URL: &str = "http://api.petfinder.com";

/// MSPCA in Jamaica Plain.
pub const DEFAULT_SHELTER_ID: &str = "MA38";

const RANDOM_PET_PATH: &str = "/pet.getRandom";

/// A client for Petfinder's random-pet endpoint.
///
/// The client is cheap to clone and is meant to be reused; it keeps a
/// connection pool across requests.
///
/// # Examples
///
/// ```no_run
/// use cuties::PetfinderClient;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), cuties::Error> {
/// let client = PetfinderClient::builder()
///     .api_key("secret")
///     .shelter_id("MA38")
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let pet = client.random().await?;
/// println!("{}", pet.message());
/// if let Some(photo) = pet.photo() {
///     println!("Photo: {}", photo);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PetfinderClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: Url,
    api_key: String,
    shelter_id: String,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl PetfinderClient {
    /// Creates a new `PetfinderClientBuilder` for configuring a client.
    pub fn builder() -> PetfinderClientBuilder {
        PetfinderClientBuilder::new()
    }

    /// The shelter this client draws pets from.
    pub fn shelter_id(&self) -> &str {
        &self.inner.shelter_id
    }

    /// Fetches random pets until one is usable.
    ///
    /// A response without a pet, or with a record flagged by
    /// [`PetRecord::is_error`], is thrown away and the request is repeated
    /// straight away, with no delay and no limit. Transport, HTTP and decoding
    /// errors end the loop and are returned.
    pub async fn random(&self) -> Result<Fetched<PetRecord>> {
        let start_time = Instant::now();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let fetched = self.fetch_attempt(attempt).await?;
            match fetched.data {
                Some(pet) if !pet.is_error() => {
                    tracing::info!(
                        id = pet.id().unwrap_or_default(),
                        attempts = attempt,
                        latency_ms = start_time.elapsed().as_millis(),
                        "Fetched random pet"
                    );
                    return Ok(Fetched::new(
                        pet,
                        fetched.raw_body,
                        fetched.status,
                        start_time.elapsed(),
                        attempt,
                    ));
                }
                Some(pet) => {
                    tracing::warn!(
                        id = pet.id().unwrap_or_default(),
                        attempt = attempt,
                        "Pet record flagged as an error, fetching another"
                    );
                }
                None => {
                    tracing::warn!(attempt = attempt, "No pet in response, fetching another");
                }
            }
        }
    }

    /// Makes a single `pet.getRandom` request.
    ///
    /// Returns `Ok(None)` when Petfinder answered without a pet.
    pub async fn fetch_pet(&self) -> Result<Option<PetRecord>> {
        Ok(self.fetch_attempt(1).await?.data)
    }

    async fn fetch_attempt(&self, attempt: usize) -> Result<Fetched<Option<PetRecord>>> {
        let start_time = Instant::now();
        let response = self.execute_request(attempt).await?;
        self.parse_response(response, start_time.elapsed(), attempt).await
    }

    /// Sends one request.
    async fn execute_request(&self, attempt: usize) -> Result<reqwest::Response> {
        let mut url = self.inner.base_url.clone();
        url.set_path(RANDOM_PET_PATH);
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("key", &self.inner.api_key)
            .append_pair("shelterid", &self.inner.shelter_id)
            .append_pair("output", "full");

        // The URL carries the API key, so only the path is logged.
        tracing::debug!(
            path = RANDOM_PET_PATH,
            shelter_id = %self.inner.shelter_id,
            attempt = attempt,
            "Executing HTTP request"
        );

        let mut request = self.inner.http_client.get(url);

        for (name, value) in &self.inner.default_headers {
            request = request.header(name, value);
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout
            } else {
                Error::Network(e)
            }
        })
    }

    /// Checks the status, decodes the envelope, and normalizes the pet.
    async fn parse_response(
        &self,
        response: reqwest::Response,
        latency: Duration,
        attempt: usize,
    ) -> Result<Fetched<Option<PetRecord>>> {
        let status = response.status();
        let headers = response.headers().clone();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            attempt = attempt,
            "Received HTTP response"
        );

        if !status.is_success() {
            let raw_response = response.text().await.unwrap_or_default();

            if status.is_client_error() {
                tracing::error!(
                    status = status.as_u16(),
                    response = %raw_response,
                    "Client error (4xx)"
                );
            } else if status.is_server_error() {
                tracing::warn!(
                    status = status.as_u16(),
                    response = %raw_response,
                    "Server error (5xx)"
                );
            }

            return Err(Error::HttpError {
                status,
                raw_response,
                headers,
            });
        }

        let raw_body = response.text().await?;

        let envelope = match serde_json::from_str::<Envelope>(&raw_body) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    raw_response = %raw_body,
                    "Failed to deserialize response"
                );

                return Err(Error::DeserializationFailed {
                    raw_response: raw_body,
                    serde_error: e.to_string(),
                    status,
                });
            }
        };

        let body = envelope.petfinder;
        let pet = match body.pet {
            Some(raw) => Some(raw.into_record()?),
            None => {
                let (code, message) = body
                    .header
                    .as_ref()
                    .map(|h| h.status())
                    .unwrap_or_default();
                tracing::warn!(
                    code = code.unwrap_or_default(),
                    message = message.unwrap_or_default(),
                    "Petfinder returned no pet"
                );
                None
            }
        };

        Ok(Fetched::new(pet, raw_body, status, latency, attempt))
    }
}

/// Builder for configuring and creating a [`PetfinderClient`].
///
/// # Examples
///
/// ```no_run
/// use cuties::PetfinderClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), cuties::Error> {
/// let client = PetfinderClientBuilder::new()
///     .base_url("http://api.petfinder.com")?
///     .api_key("secret")
///     .timeout(Duration::from_secs(15))
///     .default_header("User-Agent", "cuties/0.1")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct PetfinderClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    shelter_id: String,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl PetfinderClientBuilder {
    /// Creates a new builder pointing at the public API and the default shelter.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            shelter_id: DEFAULT_SHELTER_ID.to_string(),
            default_headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Overrides the API base URL. Defaults to [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Sets the Petfinder API key. Required.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the shelter to draw pets from. Defaults to [`DEFAULT_SHELTER_ID`].
    pub fn shelter_id(mut self, shelter_id: impl Into<String>) -> Self {
        self.shelter_id = shelter_id.into();
        self
    }

    /// Adds a header that will be sent with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `PetfinderClient`.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key was provided or the shelter id is empty.
    pub fn build(self) -> Result<PetfinderClient> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::ConfigurationError("API key is required".to_string()))?;

        if self.shelter_id.trim().is_empty() {
            return Err(Error::ConfigurationError(
                "Shelter id must not be empty".to_string(),
            ));
        }

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let http_client = reqwest::Client::builder().build().map_err(|e| {
            Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(PetfinderClient {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                api_key,
                shelter_id: self.shelter_id,
                default_headers: self.default_headers,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for PetfinderClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PetfinderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PetfinderClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("shelter_id", &self.inner.shelter_id)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_api_key() {
        let err = PetfinderClient::builder().build().unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(_)));

        let err = PetfinderClient::builder().api_key("  ").build().unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(_)));
    }

    #[test]
    fn test_build_defaults() {
        let client = PetfinderClient::builder().api_key("secret").build().unwrap();
        assert_eq!(client.shelter_id(), DEFAULT_SHELTER_ID);
        assert_eq!(client.inner.base_url.as_str(), "http://api.petfinder.com/");
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let result = PetfinderClient::builder().default_header("bad header", "value");
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = PetfinderClient::builder().api_key("hunter2").build().unwrap();
        assert!(!format!("{:?}", client).contains("hunter2"));
    }
}
