use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::DoctorRecord;

/// Listing served when no other endpoint is configured.
pub const DEFAULT_DIRECTORY_URL: &str =
    "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

/// Timeout and retry settings for one listing load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Total tries including the first one. Zero is treated as one.
    pub max_attempts: u32,
    /// Wait before retry `n` is `backoff * n`.
    pub backoff: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_attempts: 3,
            backoff: Duration::from_millis(500),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryFetchError {
    #[error("Request timed out")]
    Timeout,
    #[error("NetworkError: {0}")]
    Network(String),
    #[error("Unexpected status: {0}")]
    Status(u16),
    #[error("ParsingError: {0}")]
    Parsing(String),
    #[error("Invalid listing URL: {0}")]
    InvalidUrl(String),
}

impl DirectoryFetchError {
    /// Whether another attempt could succeed. Client errors and bad payloads
    /// will not change on retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            DirectoryFetchError::Timeout | DirectoryFetchError::Network(_) => true,
            DirectoryFetchError::Status(status) => *status >= 500,
            DirectoryFetchError::Parsing(_) | DirectoryFetchError::InvalidUrl(_) => false,
        }
    }

    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            DirectoryFetchError::Timeout
        } else if e.is_decode() {
            DirectoryFetchError::Parsing(format!("Failed to parse listing as JSON: {}", e))
        } else if let Some(status) = e.status() {
            DirectoryFetchError::Status(status.as_u16())
        } else {
            DirectoryFetchError::Network(e.to_string())
        }
    }
}

/// A load that gave up, with the error from the last attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{error} (after {attempts} attempt(s))")]
pub struct FetchFailure {
    pub error: DirectoryFetchError,
    pub attempts: u32,
}

/// Fetches the doctor listing, a JSON array of doctor records.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: reqwest::Client,
    url: reqwest::Url,
    policy: FetchPolicy,
}

impl DirectoryClient {
    pub fn new(url: &str, policy: FetchPolicy) -> Result<Self, DirectoryFetchError> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| DirectoryFetchError::InvalidUrl(format!("{url}: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(policy.timeout)
            .build()
            .map_err(|e| DirectoryFetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url,
            policy,
        })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn policy(&self) -> FetchPolicy {
        self.policy
    }

    /// Load the listing, retrying transient failures per the policy.
    pub async fn fetch_doctors(&self) -> Result<Vec<DoctorRecord>, FetchFailure> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.fetch_once().await {
                Ok(doctors) => {
                    info!(
                        url = %self.url,
                        attempt,
                        count = doctors.len(),
                        "fetched doctor listing"
                    );
                    return Ok(doctors);
                }
                Err(error) if error.is_retryable() && attempt < max_attempts => {
                    let delay = self.policy.backoff * attempt;
                    warn!(
                        url = %self.url,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "doctor listing fetch failed, retrying: {}",
                        error
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => {
                    return Err(FetchFailure {
                        error,
                        attempts: attempt,
                    })
                }
            }
        }
    }

    async fn fetch_once(&self) -> Result<Vec<DoctorRecord>, DirectoryFetchError> {
        debug!(url = %self.url, "requesting doctor listing");

        let resp = self
            .client
            .get(self.url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(DirectoryFetchError::from_reqwest)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DirectoryFetchError::Status(status.as_u16()));
        }

        resp.json::<Vec<DoctorRecord>>()
            .await
            .map_err(DirectoryFetchError::from_reqwest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const LISTING: &str = r#"[
        {"id": "1", "name": "Dr. Anita Sharma", "specialities": [{"name": "Dentist"}],
         "fees": "₹ 500", "experience": "8 Years of experience",
         "video_consult": true, "in_clinic": false, "photo": "null"},
        {"id": 2, "name": "Dr. Vikram Rao", "specialities": [{"name": "Cardiologist"}],
         "fees": "₹ 300", "experience": "20 Years of experience",
         "video_consult": false, "in_clinic": true}
    ]"#;

    /// Serves the queued `(status, body)` responses in order, one per
    /// connection, and counts the requests it received.
    async fn serve(responses: Vec<(u16, &'static str)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let queue = Arc::new(Mutex::new(VecDeque::from(responses)));
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                let next = queue.lock().unwrap().pop_front();

                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;

                let Some((status, body)) = next else {
                    continue;
                };
                let response = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}/listing.json", addr), hits)
    }

    fn quick_policy(max_attempts: u32) -> FetchPolicy {
        FetchPolicy {
            timeout: Duration::from_secs(5),
            max_attempts,
            backoff: Duration::from_millis(1),
        }
    }

    #[test]
    fn retryable_errors() {
        assert!(DirectoryFetchError::Timeout.is_retryable());
        assert!(DirectoryFetchError::Network("reset".to_string()).is_retryable());
        assert!(DirectoryFetchError::Status(503).is_retryable());
        assert!(!DirectoryFetchError::Status(404).is_retryable());
        assert!(!DirectoryFetchError::Parsing("eof".to_string()).is_retryable());
        assert!(!DirectoryFetchError::InvalidUrl("x".to_string()).is_retryable());
    }

    #[test]
    fn invalid_url_is_rejected() {
        let result = DirectoryClient::new("not a url", FetchPolicy::default());
        assert!(matches!(result, Err(DirectoryFetchError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn fetches_listing() {
        let (url, hits) = serve(vec![(200, LISTING)]).await;
        let client = DirectoryClient::new(&url, quick_policy(3)).unwrap();

        let doctors = client.fetch_doctors().await.unwrap();

        assert_eq!(doctors.len(), 2);
        assert_eq!(doctors[0].name, "Dr. Anita Sharma");
        assert_eq!(doctors[0].photo_url(), None);
        assert_eq!(doctors[1].id, "2");
        assert!(doctors[1].in_clinic);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_server_errors() {
        let (url, hits) = serve(vec![(503, "busy"), (500, "oops"), (200, LISTING)]).await;
        let client = DirectoryClient::new(&url, quick_policy(3)).unwrap();

        let doctors = client.fetch_doctors().await.unwrap();

        assert_eq!(doctors.len(), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let (url, hits) = serve(vec![(500, "a"), (500, "b"), (500, "c"), (200, LISTING)]).await;
        let client = DirectoryClient::new(&url, quick_policy(3)).unwrap();

        let failure = client.fetch_doctors().await.unwrap_err();

        assert_eq!(
            failure,
            FetchFailure {
                error: DirectoryFetchError::Status(500),
                attempts: 3
            }
        );
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let (url, hits) = serve(vec![(404, "missing"), (200, LISTING)]).await;
        let client = DirectoryClient::new(&url, quick_policy(3)).unwrap();

        let failure = client.fetch_doctors().await.unwrap_err();

        assert_eq!(failure.error, DirectoryFetchError::Status(404));
        assert_eq!(failure.attempts, 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn malformed_json_is_not_retried() {
        let (url, hits) = serve(vec![(200, "{\"doctors\": "), (200, LISTING)]).await;
        let client = DirectoryClient::new(&url, quick_policy(3)).unwrap();

        let failure = client.fetch_doctors().await.unwrap_err();

        match &failure.error {
            DirectoryFetchError::Parsing(message) => {
                assert!(message.starts_with("Failed to parse listing as JSON"))
            }
            other => panic!("expected a parsing error, got {:?}", other),
        }
        assert_eq!(failure.attempts, 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let policy = FetchPolicy {
            timeout: Duration::from_millis(100),
            max_attempts: 2,
            backoff: Duration::from_millis(1),
        };
        let client = DirectoryClient::new(&format!("http://{}/", addr), policy).unwrap();

        let failure = client.fetch_doctors().await.unwrap_err();

        assert_eq!(failure.error, DirectoryFetchError::Timeout);
        assert_eq!(failure.attempts, 2);
    }
}
