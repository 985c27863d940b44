//! Request composition and dispatch.
//!
//! One composition path feeds both transports: endpoints build a
//! [`RequestDescriptor`] through [`RequestBuilder`], then hand it to either
//! the async or the blocking transport. Response decoding is shared too, so
//! the two flavors cannot drift apart.

mod async_impl;
mod blocking;
mod builder;

pub(crate) use async_impl::AsyncTransport;
pub(crate) use blocking::SyncTransport;
pub(crate) use builder::{Body, RequestBuilder, RequestDescriptor};

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{self, NylasError, Result};
use crate::options::Options;

/// Decoded response body, classified by content type.
#[derive(Debug, Clone)]
pub(crate) enum Payload {
    /// A 2xx response with a JSON body.
    Json(Value),
    /// A 2xx response with any other body, e.g. `message/rfc822`.
    Bytes { content_type: String, body: Vec<u8> },
    /// A 2xx response with no body at all.
    Empty,
}

impl Payload {
    /// The payload as decoded JSON; an empty body decodes to `null`.
    pub(crate) fn into_json(self) -> Result<Value> {
        match self {
            Payload::Json(value) => Ok(value),
            Payload::Empty => Ok(Value::Null),
            Payload::Bytes { content_type, .. } => {
                Err(NylasError::UnexpectedContentType(content_type))
            }
        }
    }

    /// The payload as raw bytes, for endpoints returning non-JSON content.
    pub(crate) fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Payload::Bytes { body, .. } => Ok(body),
            Payload::Json(value) => Ok(serde_json::to_vec(&value)?),
            Payload::Empty => Ok(Vec::new()),
        }
    }
}

/// Classify one finished HTTP exchange into a [`Payload`] or an error.
///
/// Non-2xx statuses become [`NylasError::Api`] with the decoded error body.
pub(crate) fn decode_response(
    status: StatusCode,
    content_type: &str,
    body: Vec<u8>,
) -> Result<Payload> {
    if !status.is_success() {
        return Err(error::api_error(status.as_u16(), &body));
    }

    if body.is_empty() {
        return Ok(Payload::Empty);
    }

    if content_type.starts_with("application/json") || content_type.contains("+json") {
        return Ok(Payload::Json(serde_json::from_slice(&body)?));
    }

    Ok(Payload::Bytes {
        content_type: content_type.to_string(),
        body,
    })
}

/// Serialize a parameters struct into the JSON mapping the validator runs on.
pub(crate) fn to_map<T: Serialize>(params: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(params)? {
        Value::Object(map) => Ok(map),
        _ => Err(NylasError::Validation(
            "parameters must serialize to an object".into(),
        )),
    }
}

/// Merge the stored access token into `params` unless the caller supplied one.
pub(crate) fn merge_access_token(params: &mut Map<String, Value>, options: &Options) {
    let absent = matches!(params.get("access_token"), None | Some(Value::Null));
    if absent {
        if let Some(token) = options.access_token() {
            params.insert("access_token".into(), Value::String(token.to_string()));
        }
    }
}

/// Remove a string value from `params`, e.g. to move auth material into a
/// header after validation.
pub(crate) fn take_string(params: &mut Map<String, Value>, key: &str) -> Option<String> {
    match params.remove(key) {
        Some(Value::String(value)) => Some(value),
        _ => None,
    }
}

/// Strip the validated access token out of `params` for the auth header.
pub(crate) fn take_token(params: &mut Map<String, Value>) -> Result<String> {
    take_string(params, "access_token").ok_or_else(|| {
        NylasError::Validation("missing required key `access_token`".into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_2xx_decodes_to_api_error() {
        let err = decode_response(
            StatusCode::UNAUTHORIZED,
            "application/json",
            br#"{"type":"auth_error","message":"bad token"}"#.to_vec(),
        )
        .unwrap_err();
        match err {
            NylasError::Api { status, message, .. } => {
                assert_eq!(status, 401);
                assert_eq!(message, "bad token");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn json_content_type_decodes_to_value() {
        let payload = decode_response(
            StatusCode::OK,
            "application/json; charset=utf-8",
            br#"{"id":"m1"}"#.to_vec(),
        )
        .unwrap();
        assert_eq!(payload.into_json().unwrap(), json!({ "id": "m1" }));
    }

    #[test]
    fn other_content_types_stay_raw() {
        let payload = decode_response(
            StatusCode::OK,
            "message/rfc822",
            b"Subject: hi\r\n\r\nbody".to_vec(),
        )
        .unwrap();
        let bytes = payload.into_bytes().unwrap();
        assert!(bytes.starts_with(b"Subject: hi"));
    }

    #[test]
    fn raw_payload_is_not_json() {
        let payload = Payload::Bytes {
            content_type: "message/rfc822".into(),
            body: Vec::new(),
        };
        assert!(matches!(
            payload.into_json(),
            Err(NylasError::UnexpectedContentType(_))
        ));
    }

    #[test]
    fn empty_body_decodes_to_null() {
        let payload = decode_response(StatusCode::OK, "application/json", Vec::new()).unwrap();
        assert_eq!(payload.into_json().unwrap(), Value::Null);
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let result = decode_response(StatusCode::OK, "application/json", b"not json".to_vec());
        assert!(matches!(result, Err(NylasError::Decode(_))));
    }
}
