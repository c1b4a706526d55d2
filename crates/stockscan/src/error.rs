//! Error types for stockscan operations

use thiserror::Error;

/// Errors raised while talking to a provider.
///
/// The scan loop converts these into a terminal [`ScanOutcome`] instead of
/// propagating them, so callers of [`scan`] never see this type directly.
/// The single-record [`lookup`] path returns it as-is.
///
/// [`ScanOutcome`]: crate::ScanOutcome
/// [`scan`]: crate::scan
/// [`lookup`]: crate::lookup
#[derive(Error, Debug)]
pub enum ScanError {
    /// Credentials were missing, rejected at login, or lack a permission
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// Network-level failure: DNS, connect, timeout, broken transfer
    #[error("Transport failure: {message}")]
    Transport { message: String },

    /// Non-success response with no recognized end-of-data meaning
    #[error("Remote error (HTTP {status}): {message}")]
    Remote { status: u16, message: String },

    /// Success status but the body was not the JSON shape expected
    #[error("Unreadable response: {message}")]
    InvalidResponse { message: String },

    /// Caller-supplied base URL did not parse or is not HTTP(S)
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Endpoint descriptor does not fit this provider's request model
    #[error("Endpoint '{endpoint}' is not usable here: {message}")]
    BadEndpoint { endpoint: String, message: String },

    /// Failed to construct the HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// Provider has no single-record lookup call
    #[error("Provider '{provider}' does not support code lookup")]
    LookupUnsupported { provider: &'static str },

    /// Lookup ran cleanly but the code matched nothing
    #[error("No record found for code '{code}'")]
    NotFound { code: String },
}

impl ScanError {
    /// Classify a reqwest error into the transport bucket with a usable message.
    ///
    /// Timeouts and connection refusals are the two cases operators actually
    /// chase, so they get called out; everything else keeps reqwest's text.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            err.to_string()
        };
        ScanError::Transport { message }
    }
}

/// Errors from the local credential store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store file could not be read or written
    #[error("Credential store I/O failed for '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Store file exists but does not parse as the expected JSON
    #[error("Credential store '{path}' is corrupt")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Externally supplied credentials are read-only
    #[error("Credentials were supplied externally and cannot be persisted")]
    ReadOnlySource,

    /// Nothing saved under this provider name
    #[error("No stored credentials for provider '{provider}'")]
    NoEntry { provider: String },

    /// No home directory to anchor the default store path
    #[error("Could not determine a home directory for the credential store")]
    NoHome,
}
