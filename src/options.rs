//! Per-client configuration.
//!
//! [`Config`] is the caller-supplied mapping; [`Options`] is the validated,
//! live form of it that every endpoint reads. Construction validates
//! everything up front and returns a `Result`, so a partially-valid `Options`
//! never exists.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::api;
use crate::error::{NylasError, Result};
use crate::request::{AsyncTransport, SyncTransport};

/// Geographic API region. Selects which host a client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Us,
    Eu,
}

impl Region {
    /// The base server URL for this region.
    pub fn server(self) -> &'static str {
        match self {
            Region::Us => api::SERVER_US,
            Region::Eu => api::SERVER_EU,
        }
    }
}

/// Construction-time configuration for a client.
///
/// Only `api_key` is required. `api_uri` overrides the region-selected host,
/// which is also how tests point a client at a local mock server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: String,
    pub region: Region,
    /// Base URL override. Takes precedence over `region` when set.
    pub api_uri: Option<String>,
    pub debug: bool,
    /// When set, one line per request/response is appended to this file.
    pub log_file: Option<PathBuf>,
    pub account_id: Option<String>,
    pub grant_id: Option<String>,
    pub access_token: Option<String>,
}

/// Validated per-client state, read by every endpoint call.
///
/// The access token, account id, and grant id have setters so a client can be
/// re-pointed after re-authentication; mutation requires `&mut`, so it cannot
/// race in-flight calls.
#[derive(Debug, Clone)]
pub struct Options {
    api_key: String,
    region: Region,
    server: String,
    debug: bool,
    log_file: Option<PathBuf>,
    account_id: Option<String>,
    grant_id: Option<String>,
    access_token: Option<String>,
    http: reqwest::Client,
}

impl Options {
    /// Validate `config` and build the live options.
    pub fn new(config: Config) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(NylasError::Validation(
                "key `api_key` must be a non-empty string".into(),
            ));
        }

        for (key, value) in [
            ("account_id", &config.account_id),
            ("grant_id", &config.grant_id),
            ("access_token", &config.access_token),
        ] {
            if matches!(value.as_deref(), Some("")) {
                return Err(NylasError::Validation(format!(
                    "key `{key}` must be a non-empty string"
                )));
            }
        }

        if matches!(&config.log_file, Some(path) if path.as_os_str().is_empty()) {
            return Err(NylasError::Validation(
                "key `log_file` must be a non-empty path".into(),
            ));
        }

        let server = match &config.api_uri {
            Some(uri) => {
                // Reject unparseable overrides here rather than on first call.
                Url::parse(uri)?;
                uri.trim_end_matches('/').to_string()
            }
            None => config.region.server().to_string(),
        };

        Ok(Self {
            api_key: config.api_key,
            region: config.region,
            server,
            debug: config.debug,
            log_file: config.log_file,
            account_id: config.account_id,
            grant_id: config.grant_id,
            access_token: config.access_token,
            http: reqwest::Client::new(),
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// The base server URL every request is composed against.
    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token;
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    pub fn set_account_id(&mut self, id: Option<String>) {
        self.account_id = id;
    }

    pub fn grant_id(&self) -> Option<&str> {
        self.grant_id.as_deref()
    }

    pub fn set_grant_id(&mut self, id: Option<String>) {
        self.grant_id = id;
    }

    /// Build an async transport against this client's server.
    pub(crate) fn transport(&self) -> AsyncTransport {
        AsyncTransport::new(self.server.clone(), self.http.clone(), self.logger())
    }

    /// Build a blocking transport against this client's server.
    pub(crate) fn sync(&self) -> SyncTransport {
        SyncTransport::new(self.server.clone(), self.logger())
    }

    /// Pick the log sink: a configured file wins over the debug flag.
    pub(crate) fn logger(&self) -> LogSink {
        match &self.log_file {
            Some(path) => LogSink::File(path.clone()),
            None if self.debug => LogSink::Debug,
            None => LogSink::Off,
        }
    }
}

/// Where transports write their per-request lines.
#[derive(Debug, Clone)]
pub(crate) enum LogSink {
    Off,
    Debug,
    File(PathBuf),
}

impl LogSink {
    pub(crate) fn line(&self, line: &str) {
        match self {
            LogSink::Off => {}
            LogSink::Debug => tracing::debug!(target: "nylas", "{line}"),
            LogSink::File(path) => {
                let appended = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .and_then(|mut file| writeln!(file, "{line}"));
                if let Err(err) = appended {
                    tracing::warn!(target: "nylas", "failed to write log line: {err}");
                }
            }
        }
    }
}
