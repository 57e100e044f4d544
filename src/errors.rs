use thiserror::Error;

/// All errors that can occur when using the Amara client.
#[derive(Error, Debug)]
pub enum AmaraError {
    /// The API key is not a 40-character lowercase hex string.
    #[error("invalid API key: expected 40 lowercase hex characters")]
    InvalidApiKey,

    /// The API version tag contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid API version tag {0:?}")]
    InvalidApiVersion(String),

    /// An account switch kept the same key while changing only the host or only the username.
    #[error("refusing to reuse API key: {message}")]
    CredentialReuse { message: String },

    /// Username or API key was neither configured nor found in the environment.
    #[error("missing credentials: {message}")]
    MissingCredentials { message: String },

    /// A username, version tag or cookie cannot be sent as an HTTP header value.
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),

    /// No resource with this identifier exists in the routing table.
    #[error("no such resource: {0}")]
    UnknownResource(String),

    /// A URL template needs a path parameter that was not supplied.
    #[error("resource `{resource}` requires `{param}`")]
    MissingParameter {
        resource: &'static str,
        param: &'static str,
    },

    /// Only GET, POST, PUT and DELETE are supported.
    #[error("unsupported HTTP method {0:?}")]
    UnsupportedMethod(String),

    /// Every attempt failed with a transient error.
    ///
    /// The outcome is unknown: a POST or PUT may have taken effect server-side.
    /// Treat this as "retry later", never as confirmed absence.
    #[error("gave up on {url} after {attempts} attempts")]
    RetriesExhausted { attempts: u32, url: String },

    /// A list page carried an `objects` field that is not an array.
    #[error("malformed page: {0}")]
    MalformedPage(String),

    /// The API key or username was rejected (HTTP 401).
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// The account lacks access to the requested resource (HTTP 403).
    #[error("permission denied: {message}")]
    PermissionDenied { message: String },

    /// The requested resource was not found (HTTP 404).
    #[error("not found: {message}")]
    NotFound { message: String },

    /// A non-specific API error with the HTTP status code and response body.
    #[error("API error {status_code}: {message}")]
    Api {
        status_code: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    /// Building the underlying HTTP client failed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// A payload could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error, typically from reading a local subtitle file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AmaraError {
    /// `true` when the server-side effect of the request is unknown.
    pub fn is_unknown_outcome(&self) -> bool {
        matches!(self, AmaraError::RetriesExhausted { .. })
    }
}

/// A convenience alias for `Result<T, AmaraError>`.
pub type Result<T> = std::result::Result<T, AmaraError>;
