//! Blocking transport.
//!
//! Same contract as the async flavor, but the calling thread is held for the
//! duration of one HTTP round trip. Composition and decoding are shared.

use reqwest::header;

use crate::error::Result;
use crate::options::LogSink;
use crate::request::{decode_response, Body, Payload, RequestDescriptor};

/// Blocking twin of [`super::AsyncTransport`].
#[derive(Debug, Clone)]
pub(crate) struct SyncTransport {
    server: String,
    http: reqwest::blocking::Client,
    log: LogSink,
}

impl SyncTransport {
    pub(crate) fn new(server: String, log: LogSink) -> Self {
        Self {
            server,
            http: reqwest::blocking::Client::new(),
            log,
        }
    }

    pub(crate) fn execute(&self, request: RequestDescriptor) -> Result<Payload> {
        let url = request.url(&self.server)?;

        let mut builder = self.http.request(request.method.clone(), url.clone());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match &request.body {
            Body::Empty => builder,
            Body::Form(fields) => builder.form(fields),
            Body::Json(value) => builder.json(value),
        };

        self.log.line(&format!("> {} {url}", request.method));

        let response = builder.send()?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.bytes()?.to_vec();

        self.log.line(&format!(
            "< {} {url} ({} bytes)",
            status.as_u16(),
            body.len()
        ));

        decode_response(status, &content_type, body)
    }
}
