//! RailData client error types.

/// Errors produced by the RailData client.
///
/// `InvalidToken` is produced by the low-level [`crate::api::Executor`].
/// [`crate::Client`] answers it with a token refresh and one retry, so callers
/// only see it when the server rejects a token it has just issued.
#[derive(Debug, thiserror::Error)]
pub enum RailDataError {
    /// Token absent/empty with no credentials to renew it, or the server
    /// silently rejected the token (empty body on a success status).
    #[error("missing or malformed credentials in request")]
    MissingCredentials,

    /// The token-issuance endpoint rejected the username or password.
    #[error("invalid username or password in request")]
    BadCredentials,

    /// The server reported `Invalid token.`
    #[error("invalid token in request")]
    InvalidToken,

    /// Any other message reported by the API, verbatim.
    #[error("{message}")]
    Api { message: String },

    /// Error status whose body was not a recognizable error envelope.
    #[error("received error status code for {method}: {status}")]
    Status { method: &'static str, status: String },

    /// Network failure while talking to the API.
    #[error("error issuing request for method '{method}': {source}")]
    Http {
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("could not unmarshal response for {method}: {message}")]
    Decode {
        method: &'static str,
        message: String,
    },

    /// The request object could not be turned into form fields.
    #[error("could not convert a request object for method '{method}': {message}")]
    Encode {
        method: &'static str,
        message: String,
    },

    /// The token file could not be written.
    #[error("token file error: {message}")]
    TokenFile { message: String },

    /// The caller cancelled the operation.
    #[error("request for method '{method}' was cancelled")]
    Cancelled { method: &'static str },

    /// The caller's deadline elapsed before the operation finished.
    #[error("deadline exceeded for method '{method}'")]
    DeadlineExceeded { method: &'static str },

    /// The client could not be built from its configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl RailDataError {
    /// True when the operation stopped because the caller cancelled it or
    /// its deadline elapsed.
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            RailDataError::Cancelled { .. } | RailDataError::DeadlineExceeded { .. }
        )
    }

    /// True for the errors that mean the caller must supply a token or
    /// credentials before retrying.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            RailDataError::MissingCredentials
                | RailDataError::BadCredentials
                | RailDataError::InvalidToken
        )
    }
}

pub type Result<T> = std::result::Result<T, RailDataError>;
