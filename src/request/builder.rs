//! Per-call request accumulation.

use reqwest::Method;
use serde_json::{Map, Value};
use url::Url;

use crate::error::{NylasError, Result};

/// Body of an outbound request. Exactly one kind per call.
#[derive(Debug, Clone)]
pub(crate) enum Body {
    Empty,
    /// `application/x-www-form-urlencoded` key/value pairs.
    Form(Vec<(String, String)>),
    /// A JSON document.
    Json(Value),
}

/// A fully composed request, frozen by one of the builder's verb terminals.
/// Immutable once built; transports consume it whole.
#[derive(Debug, Clone)]
pub(crate) struct RequestDescriptor {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Body,
}

impl RequestDescriptor {
    /// The absolute URL of this request against `server`.
    pub(crate) fn url(&self, server: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{server}{}", self.path))?)
    }
}

/// Accumulates path, query, headers, and body for one outbound call.
#[derive(Debug, Clone)]
pub(crate) struct RequestBuilder {
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Body,
}

impl RequestBuilder {
    /// Start from a path template without placeholders.
    pub(crate) fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    /// Start from a path template, resolving `{placeholder}` segments
    /// positionally from `segments`.
    pub(crate) fn path(template: &str, segments: &[&str]) -> Result<Self> {
        Ok(Self::new(&resolve(template, segments)?))
    }

    /// Append every entry of a parameter mapping as a query pair.
    pub(crate) fn query_map(mut self, params: &Map<String, Value>) -> Self {
        for (key, value) in params {
            self.query.push((key.clone(), scalar(value)));
        }
        self
    }

    /// Append one query pair.
    pub(crate) fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Set the `Authorization: Bearer <token>` header.
    pub(crate) fn bearer(mut self, token: &str) -> Self {
        self.headers
            .push(("Authorization".to_string(), format!("Bearer {token}")));
        self
    }

    /// Append an arbitrary header.
    pub(crate) fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Set a form-encoded body from a parameter mapping.
    pub(crate) fn form(mut self, params: &Map<String, Value>) -> Self {
        let fields = params
            .iter()
            .map(|(key, value)| (key.clone(), scalar(value)))
            .collect();
        self.body = Body::Form(fields);
        self
    }

    /// Set a JSON body from a parameter mapping.
    pub(crate) fn json(mut self, params: Map<String, Value>) -> Self {
        self.body = Body::Json(Value::Object(params));
        self
    }

    pub(crate) fn get(self) -> RequestDescriptor {
        self.finish(Method::GET)
    }

    pub(crate) fn post(self) -> RequestDescriptor {
        self.finish(Method::POST)
    }

    pub(crate) fn put(self) -> RequestDescriptor {
        self.finish(Method::PUT)
    }

    pub(crate) fn delete(self) -> RequestDescriptor {
        self.finish(Method::DELETE)
    }

    fn finish(self, method: Method) -> RequestDescriptor {
        RequestDescriptor {
            method,
            path: self.path,
            query: self.query,
            headers: self.headers,
            body: self.body,
        }
    }
}

/// Fill `{placeholder}` segments positionally. Counts must match exactly.
fn resolve(template: &str, segments: &[&str]) -> Result<String> {
    let mut resolved = String::with_capacity(template.len());
    let mut rest = template;
    let mut used = 0;

    while let Some(start) = rest.find('{') {
        let Some(length) = rest[start..].find('}') else {
            return Err(NylasError::Validation(format!(
                "malformed path template `{template}`"
            )));
        };

        resolved.push_str(&rest[..start]);
        let segment = segments.get(used).ok_or_else(|| {
            NylasError::Validation(format!("missing path segment for `{template}`"))
        })?;
        resolved.push_str(segment);
        used += 1;
        rest = &rest[start + length + 1..];
    }

    if used != segments.len() {
        return Err(NylasError::Validation(format!(
            "too many path segments for `{template}`"
        )));
    }

    resolved.push_str(rest);
    Ok(resolved)
}

/// Render a scalar JSON value the way it appears on the wire in a query or
/// form pair.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn placeholders_resolve_positionally() {
        assert_eq!(
            resolve("/messages/{id}", &["m-123"]).unwrap(),
            "/messages/m-123"
        );
        assert_eq!(resolve("/send", &[]).unwrap(), "/send");
        assert_eq!(
            resolve("/a/{x}/b/{y}", &["1", "2"]).unwrap(),
            "/a/1/b/2"
        );
    }

    #[test]
    fn segment_count_mismatch_is_rejected() {
        assert!(resolve("/messages/{id}", &[]).is_err());
        assert!(resolve("/messages", &["m-123"]).is_err());
    }

    #[test]
    fn query_map_renders_scalars() {
        let params = match json!({ "unread": true, "limit": 5, "subject": "hi" }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let request = RequestBuilder::new("/messages").query_map(&params).get();
        assert!(request
            .query
            .contains(&("unread".to_string(), "true".to_string())));
        assert!(request
            .query
            .contains(&("limit".to_string(), "5".to_string())));
        assert!(request
            .query
            .contains(&("subject".to_string(), "hi".to_string())));
    }

    #[test]
    fn bearer_sets_authorization_header() {
        let request = RequestBuilder::new("/messages").bearer("tok").get();
        assert_eq!(
            request.headers,
            vec![("Authorization".to_string(), "Bearer tok".to_string())]
        );
    }

    #[test]
    fn verb_terminals_set_the_method() {
        assert_eq!(RequestBuilder::new("/x").get().method, Method::GET);
        assert_eq!(RequestBuilder::new("/x").post().method, Method::POST);
        assert_eq!(RequestBuilder::new("/x").put().method, Method::PUT);
        assert_eq!(RequestBuilder::new("/x").delete().method, Method::DELETE);
    }

    #[test]
    fn descriptor_url_joins_server_and_path() {
        let request = RequestBuilder::new("/messages").get();
        let url = request.url("https://api.us.nylas.com").unwrap();
        assert_eq!(url.as_str(), "https://api.us.nylas.com/messages");
    }
}
