use serde::Deserialize;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, NylasError>;

/// All failures an API call can surface.
///
/// `Validation` is always raised before any network I/O. `Api` carries the
/// status code and decoded error body of a non-2xx response. Nothing in this
/// crate retries or recovers; every variant propagates straight to the caller.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NylasError {
    /// Caller-supplied parameters failed validation. No request was made.
    #[error("invalid params: {0}")]
    Validation(String),

    /// The API answered with a non-2xx status.
    #[error("api error ({status}): {message}")]
    Api {
        status: u16,
        /// The error `type` reported by the API, when the body was decodable.
        kind: Option<String>,
        /// Request id reported by grant-administration endpoints.
        request_id: Option<String>,
        message: String,
    },

    /// The underlying HTTP client failed (connect, TLS, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response body could not be decoded as JSON.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response carried a content type the endpoint did not expect.
    #[error("unexpected response content type: {0}")]
    UnexpectedContentType(String),

    /// A raw message body was not parseable as an RFC-2822 message.
    #[error("unable to parse raw MIME message")]
    MimeParse,

    /// A configured or composed URL was invalid.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Error body shape of the grant-administration endpoints.
#[derive(Deserialize)]
struct NestedErrorBody {
    request_id: Option<String>,
    error: Option<ErrorDetail>,
}

/// Error body shape of the data-plane endpoints, also the nested `error` leaf.
#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    kind: Option<String>,
    message: Option<String>,
}

/// Build an [`NylasError::Api`] from a non-2xx response body.
///
/// Both error body generations are accepted: the flat `{type, message}` shape
/// and the nested `{request_id, error: {type, message}}` shape. Anything else
/// falls back to the raw body text.
pub(crate) fn api_error(status: u16, body: &[u8]) -> NylasError {
    if let Ok(nested) = serde_json::from_slice::<NestedErrorBody>(body) {
        if let Some(detail) = nested.error {
            return NylasError::Api {
                status,
                kind: detail.kind,
                request_id: nested.request_id,
                message: detail.message.unwrap_or_else(|| "unknown error".into()),
            };
        }
    }

    if let Ok(flat) = serde_json::from_slice::<ErrorDetail>(body) {
        if flat.kind.is_some() || flat.message.is_some() {
            return NylasError::Api {
                status,
                kind: flat.kind,
                request_id: None,
                message: flat.message.unwrap_or_else(|| "unknown error".into()),
            };
        }
    }

    NylasError::Api {
        status,
        kind: None,
        request_id: None,
        message: String::from_utf8_lossy(body).into_owned(),
    }
}
