//! CLI error types with miette diagnostics.
//!
//! Maps `omada_api::Error` and `omada_config::ConfigError` into user-facing
//! errors with actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use omada_api::Error as ApiError;
use omada_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const API: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the controller at {url}")]
    #[diagnostic(
        code(omada::connection_failed),
        help(
            "Check that the controller is running and reachable.\n\
             URL: {url}\n\
             Omada controllers usually listen on port 8043 (software) or 443 (OC200/OC300)."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request to {url} timed out")]
    #[diagnostic(
        code(omada::timeout),
        help("Increase the timeout with --timeout or check controller responsiveness.")
    )]
    Timeout { url: String },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(omada::tls_error),
        help(
            "Check the file passed to --ca-cert, or drop the flag to accept \
             the controller's self-signed certificate."
        )
    )]
    TlsError { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(omada::auth_failed),
        help(
            "Verify the controller URL, username and password.\n\
             Run: omada-wlan config init"
        )
    )]
    AuthFailed { message: String },

    #[error("Not connected to the controller")]
    #[diagnostic(code(omada::not_connected))]
    NotConnected,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(omada::not_found),
        help("Run: omada-wlan {list_command} to see available entries")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Controller error ({code}): {message}")]
    #[diagnostic(code(omada::api_error))]
    Api { code: i64, message: String },

    #[error("Unexpected controller response: {message}")]
    #[diagnostic(
        code(omada::invalid_response),
        help("Run with -vv to log the raw response body.")
    )]
    InvalidResponse { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Incomplete configuration: missing {missing}")]
    #[diagnostic(
        code(omada::incomplete_config),
        help(
            "Configure the connection with: omada-wlan config init\n\
             Or pass --url, --username and --password (OMADA_URL, OMADA_USERNAME, OMADA_PASSWORD)."
        )
    )]
    IncompleteConfig { missing: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(omada::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(omada::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Api { .. } | Self::InvalidResponse { .. } => exit_code::API,
            Self::IncompleteConfig { .. } | Self::Validation { .. } => exit_code::USAGE,
            Self::NotConnected | Self::Config(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── ApiError → CliError mapping ──────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport { url, source } if source.is_timeout() => Self::Timeout { url },
            ApiError::Transport { url, source } => Self::ConnectionFailed {
                url,
                source: Box::new(source),
            },
            ApiError::InvalidUrl(e) => Self::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },
            ApiError::Tls(message) => Self::TlsError { message },
            ApiError::Authentication { message } => Self::AuthFailed { message },
            ApiError::NotConnected => Self::NotConnected,
            ApiError::Api { code, message } => Self::Api { code, message },
            ApiError::Parse { message, body } => {
                tracing::debug!(%body, "unparseable controller response");
                Self::InvalidResponse { message }
            }
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Incomplete { missing } => Self::IncompleteConfig { missing },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}
