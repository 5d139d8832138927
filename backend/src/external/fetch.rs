//! Resilient JSON fetching with timeout and linear backoff
//!
//! Every outbound provider call goes through here. A call is attempted up to
//! `retries` times; after failed attempt `n` we wait `n × base_delay` before
//! the next one. The timeout drops the in-flight request future, which aborts
//! the underlying connection.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Outbound request failure, returned once the retry budget is spent
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {status}")]
    Status { status: StatusCode },

    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to parse response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Provider returned no usable content")]
    EmptyResponse,

    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

/// Timeout and retry settings for one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Total number of attempts
    pub retries: u32,
    /// Backoff unit; the wait after attempt `n` is `n × base_delay`
    pub base_delay: Duration,
}

impl FetchPolicy {
    pub fn new(timeout_secs: u64, retries: u32, backoff_ms: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
            retries,
            base_delay: Duration::from_millis(backoff_ms),
        }
    }

    /// Wait after the given 1-based failed attempt
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }

    /// At least one attempt is always made
    fn attempts(&self) -> u32 {
        self.retries.max(1)
    }
}

/// GET `url` and parse the body as JSON
pub async fn fetch_json<T>(
    client: &Client,
    label: &str,
    url: &str,
    policy: &FetchPolicy,
) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    send_with_retry(|| client.get(url), label, policy).await
}

/// POST a JSON body to `url` with extra headers and parse the response as JSON
///
/// Credentials belong in `headers`, never in `url`.
pub async fn post_json<B, T>(
    client: &Client,
    label: &str,
    url: &str,
    headers: &[(&str, &str)],
    body: &B,
    policy: &FetchPolicy,
) -> Result<T, FetchError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let build = || {
        headers
            .iter()
            .fold(client.post(url), |request, (name, value)| {
                request.header(*name, *value)
            })
            .json(body)
    };
    send_with_retry(build, label, policy).await
}

async fn send_with_retry<T, F>(
    build: F,
    label: &str,
    policy: &FetchPolicy,
) -> Result<T, FetchError>
where
    T: DeserializeOwned,
    F: Fn() -> RequestBuilder,
{
    let attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        match attempt_once(build(), policy.timeout).await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!("{} succeeded on attempt {}", label, attempt);
                }
                return Ok(value);
            }
            Err(e) if attempt >= attempts => {
                tracing::error!("{} failed after {} attempts: {}", label, attempts, e);
                return Err(e);
            }
            Err(e) => {
                let delay = policy.backoff_for_attempt(attempt);
                tracing::warn!(
                    "{} attempt {} of {} failed: {}; retrying in {:?}",
                    label,
                    attempt,
                    attempts,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

async fn attempt_once<T>(request: RequestBuilder, timeout: Duration) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    let exchange = async {
        // reqwest errors render the full URL, query string included
        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Decode(e.without_url()))
    };

    tokio::time::timeout(timeout, exchange)
        .await
        .map_err(|_| FetchError::Timeout(timeout))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_policy(retries: u32) -> FetchPolicy {
        FetchPolicy {
            timeout: Duration::from_secs(5),
            retries,
            base_delay: Duration::from_millis(20),
        }
    }

    #[test]
    fn test_backoff_is_linear() {
        let policy = FetchPolicy::new(10, 3, 1000);
        assert_eq!(policy.backoff_for_attempt(1), Duration::from_millis(1000));
        assert_eq!(policy.backoff_for_attempt(2), Duration::from_millis(2000));
        assert_eq!(policy.backoff_for_attempt(3), Duration::from_millis(3000));
    }

    #[test]
    fn test_zero_retries_still_attempts_once() {
        assert_eq!(fast_policy(0).attempts(), 1);
    }

    #[tokio::test]
    async fn test_success_short_circuits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new();
        let url = format!("{}/data", server.uri());
        let value: serde_json::Value = fetch_json(&client, "test", &url, &fast_policy(3))
            .await
            .unwrap();

        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn test_exhausts_retry_budget_then_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(503))
            .expect(4)
            .mount(&server)
            .await;

        let policy = FetchPolicy {
            timeout: Duration::from_secs(5),
            retries: 4,
            base_delay: Duration::from_millis(100),
        };
        let client = Client::new();
        let url = format!("{}/down", server.uri());
        let started = Instant::now();
        let result: Result<serde_json::Value, _> = fetch_json(&client, "test", &url, &policy).await;
        let elapsed = started.elapsed();

        match result {
            Err(FetchError::Status { status }) => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE)
            }
            other => panic!("expected status error, got {:?}", other),
        }
        // 100 + 200 + 300ms between four attempts; doubling would wait 700ms
        assert!(elapsed >= Duration::from_millis(600), "waited {:?}", elapsed);
        assert!(elapsed < Duration::from_millis(690), "waited {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1, 2, 3])))
            .mount(&server)
            .await;

        let client = Client::new();
        let url = format!("{}/flaky", server.uri());
        let value: Vec<u32> = fetch_json(&client, "test", &url, &fast_policy(2))
            .await
            .unwrap();

        assert_eq!(value, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_timeout_aborts_slow_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let policy = FetchPolicy {
            timeout: Duration::from_millis(50),
            retries: 1,
            base_delay: Duration::from_millis(1),
        };
        let client = Client::new();
        let url = format!("{}/slow", server.uri());
        let started = Instant::now();
        let result: Result<serde_json::Value, _> = fetch_json(&client, "test", &url, &policy).await;

        assert!(matches!(result, Err(FetchError::Timeout(_))));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_transport_error_hides_query_string() {
        // nothing listens on the discard port
        let url = "http://127.0.0.1:9/data?key=hunter2";
        let result: Result<serde_json::Value, _> =
            fetch_json(&Client::new(), "test", url, &fast_policy(1)).await;

        let err = result.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert!(!err.to_string().contains("hunter2"));
        assert!(!format!("{:?}", err).contains("hunter2"));
    }

    #[tokio::test]
    async fn test_post_sends_extra_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .and(header("x-api-key", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/echo", server.uri());
        let value: serde_json::Value = post_json(
            &Client::new(),
            "test",
            &url,
            &[("x-api-key", "abc")],
            &serde_json::json!({}),
            &fast_policy(1),
        )
        .await
        .unwrap();

        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = Client::new();
        let result: Result<serde_json::Value, _> =
            fetch_json(&client, "test", &server.uri(), &fast_policy(1)).await;

        assert!(matches!(result, Err(FetchError::Decode(_))));
    }
}
