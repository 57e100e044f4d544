//! Single HTTP request with linear-backoff retry on transient failures.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;

use crate::errors::{AmaraError, Result};
use crate::logger::{Diagnostics, LogLevel};

pub(crate) const DEFAULT_MAX_RETRIES: u32 = 10;
pub(crate) const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(30);

/// Supported HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl FromStr for Method {
    type Err = AmaraError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            _ => Err(AmaraError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many times to retry and how long to wait between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// The wait before retry `n` is `backoff_step * n`.
    pub backoff_step: Duration,
}

impl RetryPolicy {
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.backoff_step.saturating_mul(retry)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_step: DEFAULT_RETRY_BACKOFF,
        }
    }
}

/// Status and body of a response that was not retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

/// 429 (quota exceeded) and 504 (gateway timeout) are retried.
pub(crate) fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::GATEWAY_TIMEOUT
}

#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    policy: RetryPolicy,
}

impl Transport {
    pub(crate) fn new(http: reqwest::Client, policy: RetryPolicy) -> Self {
        Self { http, policy }
    }

    pub(crate) fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Send one logical request, retrying transient failures from scratch.
    ///
    /// Any status outside the retry set is returned untouched.
    pub(crate) async fn send(
        &self,
        method: Method,
        headers: &HeaderMap,
        url: &str,
        body: Option<&str>,
        diag: &Diagnostics,
    ) -> Result<RawResponse> {
        let mut retry = 0;

        loop {
            let attempt = retry + 1;
            diag.emit(LogLevel::Debug, &format!("{method} {url} (attempt {attempt})"));

            let mut req = self
                .http
                .request(method.to_reqwest(), url)
                .headers(headers.clone());
            if let Some(b) = body {
                req = req.body(b.to_owned());
            }

            let failure = match req.send().await {
                Ok(resp) if is_retryable_status(resp.status()) => {
                    format!("HTTP {}", resp.status().as_u16())
                }
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    match resp.text().await {
                        Ok(body) => return Ok(RawResponse { status, body }),
                        Err(e) => format!("reading body failed: {e}"),
                    }
                }
                Err(e) => format!("network error: {e}"),
            };

            if retry >= self.policy.max_retries {
                diag.emit(
                    LogLevel::Error,
                    &format!("{method} {url} failed after {attempt} attempts: {failure}"),
                );
                return Err(AmaraError::RetriesExhausted {
                    attempts: attempt,
                    url: url.to_string(),
                });
            }

            retry += 1;
            let wait = self.policy.delay_for(retry);
            diag.emit(
                LogLevel::Warning,
                &format!(
                    "{method} {url} attempt {attempt}/{} failed ({failure}), retrying in {wait:?}",
                    self.policy.max_retries + 1
                ),
            );
            tokio::time::sleep(wait).await;
        }
    }
}
