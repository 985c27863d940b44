//! Client SDK for the Nylas email, calendar, and contacts REST API.
//!
//! The crate does one job: validate caller-supplied parameters, compose an
//! authenticated HTTP request, dispatch it, and hand back the decoded
//! response. There are no retries, no caching, and no state beyond the
//! per-client [`Options`]. Responses are returned as decoded JSON
//! ([`serde_json::Value`]), except raw messages, which come back as a parsed
//! [`messages::RawMessage`].
//!
//! Data-plane endpoints (messages, drafts, calendars) authenticate with a
//! per-user access token: the one stored in [`Config`], or one passed per
//! call, which wins. Grant administration authenticates with the API key.
//!
//! # Example
//!
//! ```no_run
//! use nylas::messages::MessageListParams;
//! use nylas::{Config, Nylas};
//!
//! #[tokio::main]
//! async fn main() -> nylas::Result<()> {
//!     let client = Nylas::new(Config {
//!         api_key: "NYLAS_API_KEY".into(),
//!         access_token: Some("user-access-token".into()),
//!         ..Config::default()
//!     })?;
//!
//!     let unread = client
//!         .messages()
//!         .list(&MessageListParams {
//!             unread: Some(true),
//!             limit: Some(10),
//!             ..MessageListParams::default()
//!         })
//!         .await?;
//!     println!("{unread}");
//!
//!     Ok(())
//! }
//! ```
//!
//! A blocking flavor with the same surface lives in [`blocking`].

pub mod administration;
mod api;
pub mod blocking;
pub mod calendars;
mod client;
pub mod drafts;
mod error;
pub mod messages;
mod options;
mod request;
mod validator;

pub use client::Nylas;
pub use error::{NylasError, Result};
pub use options::{Config, Options, Region};
