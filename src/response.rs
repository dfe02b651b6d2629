//! Wrapper that keeps an accepted fetch result together with its HTTP details.
//!
//! [`Fetched`] derefs to the wrapped value, so a `Fetched<PetRecord>` can be used
//! directly wherever a record is expected.

use http::StatusCode;
use std::time::Duration;

/// A fetch result that passed every check, plus how it was obtained.
///
/// # Examples
///
/// ```no_run
/// use cuties::PetfinderClient;
///
/// # async fn example() -> Result<(), cuties::Error> {
/// let client = PetfinderClient::builder().api_key("secret").build()?;
/// let pet = client.random().await?;
///
/// println!("{}", pet.message());
/// println!("Took {:?} over {} attempt(s)", pet.latency, pet.attempts);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    /// The accepted value.
    pub data: T,

    /// Raw body of the response the value was decoded from.
    pub raw_body: String,

    /// HTTP status of that response.
    pub status: StatusCode,

    /// Time from the first request until the value was accepted,
    /// including every rejected attempt.
    pub latency: Duration,

    /// Number of requests made. `1` when the first answer was usable.
    pub attempts: usize,
}

impl<T> Fetched<T> {
    pub fn new(
        data: T,
        raw_body: String,
        status: StatusCode,
        latency: Duration,
        attempts: usize,
    ) -> Self {
        Self {
            data,
            raw_body,
            status,
            latency,
            attempts,
        }
    }

    /// Maps the wrapped value, keeping the fetch details.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cuties::Fetched;
    /// # use http::StatusCode;
    /// # use std::time::Duration;
    /// let fetched = Fetched::new(42, "42".to_string(), StatusCode::OK, Duration::ZERO, 1);
    ///
    /// let text = fetched.map(|n| n.to_string());
    /// assert_eq!(text.data, "42");
    /// ```
    pub fn map<U, F>(self, f: F) -> Fetched<U>
    where
        F: FnOnce(T) -> U,
    {
        Fetched {
            data: f(self.data),
            raw_body: self.raw_body,
            status: self.status,
            latency: self.latency,
            attempts: self.attempts,
        }
    }

    /// Returns `true` if earlier answers were rejected before this one.
    pub fn was_retried(&self) -> bool {
        self.attempts > 1
    }

    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T> AsRef<T> for Fetched<T> {
    fn as_ref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::Deref for Fetched<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
