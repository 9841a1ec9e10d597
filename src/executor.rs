//! Blocking HTTP request executor with bounded retry and outcome classification.
//!
//! Every provider call goes through [`RequestExecutor::execute`], which issues
//! a GET with a timeout and classifies the result into one of three shapes:
//! a parsed JSON body, a provider "no such place" sentinel ([`Outcome::Empty`]),
//! or a typed [`ApiError`]. Only timeouts and 5xx responses are retried, and
//! only while attempts remain in the [`RetryPolicy`]; the thread sleeps for
//! the configured delay between attempts.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;

/// A completed request that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    /// Valid response meaning "no data for this query" — e.g. an unknown
    /// station or an unrecognized location. Distinct from a failure so
    /// callers can render "not found" rather than "service degraded".
    Empty,
}

/// Provider-specific verdict over a parsed response body.
pub enum Screening {
    /// Body is a usable payload.
    Accept,
    /// Body carries the provider's "resource not found" sentinel.
    Empty,
    /// Body carries a provider error that maps to a typed failure.
    Reject(ApiError),
}

/// Retry budget for one endpoint: attempts run `0..=max_retries` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    /// Fail-fast policy: a single attempt, no sleep.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            retry_delay: Duration::ZERO,
        }
    }
}

/// Result of a single attempt. The retry loop's exit value is always one of
/// the terminal variants; no failure is carried in a side channel.
enum Attempt {
    Done(Outcome<Value>),
    Retryable(ApiError),
    Terminal(ApiError),
}

/// Issues blocking GETs on behalf of one provider client.
pub struct RequestExecutor {
    client: Client,
    service: &'static str,
}

impl RequestExecutor {
    pub fn new(service: &'static str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("breatheasy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ApiError::unknown(service, format!("failed to build HTTP client: {e}"), None)
            })?;
        Ok(Self { client, service })
    }

    /// Execute a GET against `url` with `params` as the query string.
    ///
    /// `screen` inspects every successfully parsed body and decides whether it
    /// is a payload, a "not found" sentinel, or a provider-level error. It is
    /// also consulted for non-2xx statuses the taxonomy cannot classify on its
    /// own, since some providers put a structured "no matching location"
    /// payload behind a 4xx.
    pub fn execute<S>(
        &self,
        url: &str,
        params: &[(&str, String)],
        policy: RetryPolicy,
        screen: S,
    ) -> Result<Outcome<Value>, ApiError>
    where
        S: Fn(&Value) -> Screening,
    {
        let mut attempt = 0u32;
        loop {
            debug!(
                service = self.service,
                attempt = attempt + 1,
                total = policy.max_retries + 1,
                url,
                "issuing request"
            );
            match self.attempt_once(url, params, &screen) {
                Attempt::Done(outcome) => return Ok(outcome),
                Attempt::Terminal(err) => return Err(err),
                Attempt::Retryable(err) if attempt < policy.max_retries => {
                    warn!(
                        service = self.service,
                        attempt = attempt + 1,
                        delay_secs = policy.retry_delay.as_secs_f64(),
                        %err,
                        "retryable failure, backing off"
                    );
                    thread::sleep(policy.retry_delay);
                    attempt += 1;
                }
                Attempt::Retryable(err) => return Err(err),
            }
        }
    }

    fn attempt_once<S>(&self, url: &str, params: &[(&str, String)], screen: &S) -> Attempt
    where
        S: Fn(&Value) -> Screening,
    {
        let response = match self.client.get(url).query(params).send() {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Attempt::Retryable(ApiError::timeout(
                    self.service,
                    format!("request timed out: {e}"),
                ));
            }
            Err(e) => {
                return Attempt::Terminal(ApiError::unknown(
                    self.service,
                    format!("network error: {e}"),
                    None,
                ));
            }
        };

        let status = response.status();
        if status.is_success() {
            let body: Value = match response.json() {
                Ok(body) => body,
                Err(e) => {
                    // A garbled body will not improve on retry.
                    return Attempt::Terminal(ApiError::malformed(
                        self.service,
                        format!("invalid JSON body: {e}"),
                    ));
                }
            };
            return match screen(&body) {
                Screening::Accept => Attempt::Done(Outcome::Success(body)),
                Screening::Empty => Attempt::Done(Outcome::Empty),
                Screening::Reject(err) => Attempt::Terminal(err),
            };
        }

        let code = status.as_u16();
        match code {
            401 => Attempt::Terminal(ApiError::auth_failure(
                self.service,
                "authorization failed (401); check the configured credential",
            )),
            404 => Attempt::Terminal(ApiError::not_found(
                self.service,
                "endpoint or resource not found (404)",
            )),
            429 => Attempt::Terminal(ApiError::rate_limited(
                self.service,
                "rate limit exceeded (429)",
            )),
            500..=599 => Attempt::Retryable(ApiError::server_error(
                self.service,
                format!("server error {code}"),
                code,
            )),
            _ => {
                if let Ok(body) = response.json::<Value>() {
                    match screen(&body) {
                        Screening::Empty => return Attempt::Done(Outcome::Empty),
                        Screening::Reject(err) => return Attempt::Terminal(err),
                        Screening::Accept => {}
                    }
                }
                Attempt::Terminal(ApiError::unknown(
                    self.service,
                    format!("unexpected HTTP status {code}"),
                    Some(code),
                ))
            }
        }
    }
}
