//! Future-returning transport.

use reqwest::header;

use crate::error::Result;
use crate::options::LogSink;
use crate::request::{decode_response, Body, Payload, RequestDescriptor};

/// Executes one composed request per call against a base server URL and
/// resolves to the decoded payload. No batching, no concurrency limiting;
/// every call is independent of all others.
#[derive(Debug, Clone)]
pub(crate) struct AsyncTransport {
    server: String,
    http: reqwest::Client,
    log: LogSink,
}

impl AsyncTransport {
    pub(crate) fn new(server: String, http: reqwest::Client, log: LogSink) -> Self {
        Self { server, http, log }
    }

    pub(crate) async fn execute(&self, request: RequestDescriptor) -> Result<Payload> {
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

        let response = builder.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.bytes().await?.to_vec();

        self.log.line(&format!(
            "< {} {url} ({} bytes)",
            status.as_u16(),
            body.len()
        ));

        decode_response(status, &content_type, body)
    }
}
