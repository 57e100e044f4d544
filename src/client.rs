use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, COOKIE};
use serde_json::Value;

use crate::credentials::{is_valid_api_version, Credentials};
use crate::errors::{AmaraError, Result};
use crate::logger::{Diagnostics, LogLevel, Logger};
use crate::models::Payload;
use crate::pagination::{is_envelope, Page, DEFAULT_PAGE_SIZE};
use crate::query::Query;
use crate::routes::{ContentType, Resource};
use crate::transport::{Method, RetryPolicy, Transport};

const DEFAULT_HOST: &str = "https://amara.org/api/";
const DEFAULT_API_VERSION: &str = "20190619";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const USERNAME_HEADER: &str = "x-api-username";
const API_KEY_HEADER: &str = "x-api-key";
const API_VERSION_HEADER: &str = "x-api-future";

/// A per-page hook used while walking a paginated list.
///
/// It receives each page before its records are kept and returns the page to
/// keep. Clearing `meta.next` (see [`Page::finish`]) ends the walk.
pub type PageFilter<'a> = dyn FnMut(Page) -> Page + Send + 'a;

/// Builder for constructing a [`Client`] with custom configuration.
///
/// # Example
///
/// ```no_run
/// use amara::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> amara::Result<()> {
/// let client = ClientBuilder::new()
///     .username("alice")
///     .api_key("0123456789abcdef0123456789abcdef01234567")
///     .max_retries(3)
///     .page_size(50)
///     .timeout(Duration::from_secs(120))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    host: Option<String>,
    username: Option<String>,
    api_key: Option<String>,
    api_version: String,
    cookies: Vec<String>,
    retry: RetryPolicy,
    page_size: u64,
    timeout: Duration,
    accept_invalid_certs: bool,
    logger: Option<Arc<dyn Logger>>,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            host: None,
            username: None,
            api_key: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            cookies: Vec::new(),
            retry: RetryPolicy::default(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
            logger: None,
        }
    }

    /// Override the API root (defaults to `https://amara.org/api/`).
    pub fn host(mut self, url: impl Into<String>) -> Self {
        self.host = Some(url.into());
        self
    }

    pub fn username(mut self, name: impl Into<String>) -> Self {
        self.username = Some(name.into());
        self
    }

    /// Set the 40-character hex API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the API version tag sent with every request.
    pub fn api_version(mut self, tag: impl Into<String>) -> Self {
        self.api_version = tag.into();
        self
    }

    /// Add a session cookie (`name=value`). All cookies are joined into one
    /// `Cookie` header.
    pub fn cookie(mut self, value: impl Into<String>) -> Self {
        self.cookies.push(value.into());
        self
    }

    /// Retries after the first attempt for transient failures (defaults to 10).
    pub fn max_retries(mut self, n: u32) -> Self {
        self.retry.max_retries = n;
        self
    }

    /// Backoff step; retry `n` waits `n * step` (defaults to 30 seconds).
    pub fn retry_backoff(mut self, step: Duration) -> Self {
        self.retry.backoff_step = step;
        self
    }

    /// Records requested per page when walking lists (defaults to 100).
    pub fn page_size(mut self, n: u64) -> Self {
        self.page_size = n.max(1);
        self
    }

    /// Per-attempt HTTP timeout (defaults to 60 seconds).
    pub fn timeout(mut self, d: Duration) -> Self {
        self.timeout = d;
        self
    }

    /// Skip TLS certificate verification. Off by default.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Receive diagnostic events in addition to `tracing`.
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Build the [`Client`].
    ///
    /// Unset values fall back to `AMARA_HOST`, `AMARA_USERNAME` and
    /// `AMARA_API_KEY`. Every credential is validated here, before any
    /// network use.
    pub fn build(self) -> Result<Client> {
        let host = self
            .host
            .or_else(|| std::env::var("AMARA_HOST").ok())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let username = self
            .username
            .or_else(|| std::env::var("AMARA_USERNAME").ok())
            .ok_or_else(|| AmaraError::MissingCredentials {
                message: "username is required. Pass it to ClientBuilder::username() \
                          or set the AMARA_USERNAME environment variable."
                    .into(),
            })?;
        let api_key = self
            .api_key
            .or_else(|| std::env::var("AMARA_API_KEY").ok())
            .ok_or_else(|| AmaraError::MissingCredentials {
                message: "API key is required. Pass it to ClientBuilder::api_key() \
                          or set the AMARA_API_KEY environment variable."
                    .into(),
            })?;

        let credentials = Credentials::new(host, username, api_key)?;

        if !is_valid_api_version(&self.api_version) {
            return Err(AmaraError::InvalidApiVersion(self.api_version));
        }
        // One `Cookie` header carrying every pair.
        let cookie = if self.cookies.is_empty() {
            None
        } else {
            let joined = self.cookies.join("; ");
            Some(HeaderValue::from_str(&joined).map_err(|_| AmaraError::InvalidHeader("cookie"))?)
        };

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()?;

        let diag = Diagnostics::new(self.logger);
        if self.accept_invalid_certs {
            diag.emit(LogLevel::Warning, "TLS certificate verification is disabled");
        }

        let headers = auth_headers(&credentials, &self.api_version, cookie.as_ref())?;

        Ok(Client {
            credentials,
            api_version: self.api_version,
            cookie,
            headers,
            transport: Transport::new(http, self.retry),
            page_size: self.page_size,
            diag,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The Amara API client.
///
/// # Example
///
/// ```no_run
/// use amara::{Client, Method, Query, Resource, ResourceKind};
///
/// # async fn example() -> amara::Result<()> {
/// let client = Client::new("alice", "0123456789abcdef0123456789abcdef01234567")?;
///
/// let tasks = client
///     .fetch(
///         Method::Get,
///         &Resource::new(ResourceKind::Tasks).team("acme"),
///         Some(&Query::new().param("type", "Translate")),
///         None,
///         None,
///     )
///     .await?;
/// println!("{} open tasks", tasks.into_records().len());
/// # Ok(())
/// # }
/// ```
pub struct Client {
    credentials: Credentials,
    api_version: String,
    cookie: Option<HeaderValue>,
    headers: HeaderMap,
    transport: Transport,
    page_size: u64,
    diag: Diagnostics,
}

impl Client {
    /// Create a client for `username` on the default host.
    ///
    /// For customization, use [`ClientBuilder`] instead.
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new()
            .host(DEFAULT_HOST)
            .username(username)
            .api_key(api_key)
            .build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.transport.policy()
    }

    /// Move the client to another account.
    ///
    /// Keeping the key while changing only the host or only the username is
    /// rejected; the client is left unchanged on error.
    pub fn switch_account(
        &mut self,
        host: impl Into<String>,
        username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<()> {
        let next = Credentials::new(host, username, api_key)?;
        self.credentials.check_switch(&next)?;

        self.headers = auth_headers(&next, &self.api_version, self.cookie.as_ref())?;
        self.diag.emit(
            LogLevel::Notice,
            &format!("switched account to {} on {}", next.username(), next.host()),
        );
        self.credentials = next;
        Ok(())
    }

    /// Resolve `resource`, send the request, and walk pagination for lists.
    ///
    /// - Non-JSON bodies come back as [`Payload::Text`].
    /// - Non-GET requests, and JSON without an `objects` field, return the
    ///   parsed JSON as-is.
    /// - Raw resources always come back as [`Payload::Text`], even when the
    ///   body happens to parse as JSON.
    /// - Every GET carries `limit` and `offset`, taken from `query` when
    ///   present and otherwise the page size and 0.
    /// - List envelopes are walked page by page and the records are
    ///   returned as one JSON array. `filter` sees each page first.
    ///
    /// # Errors
    ///
    /// - [`AmaraError::MissingParameter`] if a path field is absent.
    /// - [`AmaraError::RetriesExhausted`] if transient failures persisted.
    /// - [`AmaraError::MalformedPage`] if a page's `objects` is not an array.
    /// - [`AmaraError::NotFound`] and friends for non-2xx responses.
    pub async fn fetch(
        &self,
        method: Method,
        resource: &Resource,
        query: Option<&Query>,
        body: Option<&Value>,
        mut filter: Option<&mut PageFilter<'_>>,
    ) -> Result<Payload> {
        let url = resource.url(self.credentials.host())?;
        let headers = self.request_headers(resource.content());
        let body = body
            .map(|b| encode_body(b, resource.content()))
            .transpose()?;

        let mut query = query.cloned().unwrap_or_default();
        let (limit, mut offset) = if method == Method::Get {
            let limit = query.get_u64("limit").filter(|l| *l > 0).unwrap_or(self.page_size);
            let offset = query.get_u64("offset").unwrap_or(0);
            query.set("limit".into(), Some(limit.to_string()));
            query.set("offset".into(), Some(offset.to_string()));
            (limit, offset)
        } else {
            (self.page_size, 0)
        };

        let first = self
            .round_trip(method, resource.content(), &headers, &url, &query, body.as_deref())
            .await?;
        let mut envelope = match first {
            Payload::Json(v) if method == Method::Get && is_envelope(&v) => v,
            other => return Ok(other),
        };

        let mut records = Vec::new();
        loop {
            let mut page = Page::from_envelope(envelope)?;
            if let Some(f) = filter.as_deref_mut() {
                page = f(page);
            }

            self.diag.emit(
                LogLevel::Debug,
                &format!(
                    "{url}: {} records at offset {offset} (total {:?})",
                    page.objects.len(),
                    page.meta.total_count
                ),
            );

            let exhausted = page
                .meta
                .total_count
                .is_some_and(|total| offset.saturating_add(limit) >= total);
            let done = !page.has_more() || exhausted;
            records.extend(page.objects);
            if done {
                break;
            }

            let Some(next_offset) = offset.checked_add(limit) else {
                break;
            };
            offset = next_offset;
            query.set("offset".into(), Some(offset.to_string()));

            envelope = match self
                .round_trip(method, resource.content(), &headers, &url, &query, body.as_deref())
                .await?
            {
                Payload::Json(v) => v,
                Payload::Text(_) => {
                    return Err(AmaraError::MalformedPage(format!(
                        "page at offset {offset} is not JSON"
                    )))
                }
            };
        }

        Ok(Payload::Json(Value::Array(records)))
    }

    /// One request through the transport. Maps the status and decodes JSON
    /// bodies for JSON resources; raw resources keep the text as served.
    async fn round_trip(
        &self,
        method: Method,
        content: ContentType,
        headers: &HeaderMap,
        url: &str,
        query: &Query,
        body: Option<&str>,
    ) -> Result<Payload> {
        let full_url = with_query(url, query);
        let raw = self
            .transport
            .send(method, headers, &full_url, body, &self.diag)
            .await?;

        let parsed: Option<Value> = serde_json::from_str(&raw.body).ok();

        if !(200..300).contains(&raw.status) {
            return Err(status_error(raw.status, &raw.body, parsed));
        }

        Ok(match (content, parsed) {
            (ContentType::Json, Some(v)) => Payload::Json(v),
            _ => Payload::Text(raw.body),
        })
    }

    fn request_headers(&self, content: ContentType) -> HeaderMap {
        let mut headers = self.headers.clone();
        if content == ContentType::Json {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }
        headers
    }
}

fn auth_headers(
    credentials: &Credentials,
    api_version: &str,
    cookie: Option<&HeaderValue>,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USERNAME_HEADER,
        HeaderValue::from_str(credentials.username())
            .map_err(|_| AmaraError::InvalidHeader("username"))?,
    );
    headers.insert(
        API_KEY_HEADER,
        HeaderValue::from_str(credentials.api_key()).map_err(|_| AmaraError::InvalidApiKey)?,
    );
    headers.insert(
        API_VERSION_HEADER,
        HeaderValue::from_str(api_version).map_err(|_| AmaraError::InvalidHeader("api version"))?,
    );
    if let Some(c) = cookie {
        headers.insert(COOKIE, c.clone());
    }
    Ok(headers)
}

fn encode_body(body: &Value, content: ContentType) -> Result<String> {
    match (content, body) {
        (ContentType::Json, b) => Ok(serde_json::to_string(b)?),
        (ContentType::Raw, Value::String(s)) => Ok(s.clone()),
        (ContentType::Raw, b) => Ok(b.to_string()),
    }
}

fn with_query(url: &str, query: &Query) -> String {
    let pairs = query.pairs();
    if pairs.is_empty() {
        return url.to_string();
    }
    let encoded: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();
    format!("{url}?{}", encoded.join("&"))
}

fn status_error(status_code: u16, text: &str, parsed: Option<Value>) -> AmaraError {
    let message = parsed
        .as_ref()
        .and_then(|b| b.get("detail").or_else(|| b.get("error")))
        .and_then(Value::as_str)
        .unwrap_or(text)
        .to_string();

    match status_code {
        401 => AmaraError::Authentication { message },
        403 => AmaraError::PermissionDenied { message },
        404 => AmaraError::NotFound { message },
        _ => AmaraError::Api {
            status_code,
            message,
            body: parsed,
        },
    }
}
