use thiserror::Error;

/// Top-level error type for the `omada-api` crate.
///
/// Transport failures, malformed bodies, authentication problems, usage
/// errors, and in-band controller errors are all distinct variants so the
/// caller can decide what to show and whether to retry.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// The HTTP exchange itself failed (connection refused, DNS, TLS, timeout).
    #[error("Could not reach the controller at {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup error (unreadable or invalid CA certificate).
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// The response body was not a valid envelope, with the raw body for debugging.
    #[error("Could not parse controller response: {message}")]
    Parse { message: String, body: String },

    // ── Session ─────────────────────────────────────────────────────
    /// Controller info or login step failed (missing id, bad credentials, missing token).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// A site operation was attempted before a successful `connect()`.
    #[error("Not connected to the controller")]
    NotConnected,

    // ── Controller ──────────────────────────────────────────────────
    /// The envelope reported a nonzero `errorCode`.
    #[error("Controller error {code}: {message}")]
    Api { code: i64, message: String },
}

impl Error {
    /// Returns `true` if the controller could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns `true` for the "used before connect" contract violation.
    pub fn is_not_connected(&self) -> bool {
        matches!(self, Self::NotConnected)
    }

    /// Returns `true` if calling `connect()` again might succeed.
    ///
    /// Nothing is retried automatically; this only informs the caller.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { source, .. } => source.is_timeout() || source.is_connect(),
            _ => false,
        }
    }

    /// The controller-supplied error code, if this came from an envelope.
    pub fn api_error_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
