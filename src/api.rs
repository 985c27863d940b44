//! Server hosts and endpoint path templates.
//!
//! Paths are templates with `{placeholder}` segments resolved positionally by
//! the request builder. Grant administration lives under the versioned `/v3`
//! prefix and authenticates with the API key; everything else authenticates
//! with an access token.

/// Base host for clients in the `us` region.
pub(crate) const SERVER_US: &str = "https://api.us.nylas.com";

/// Base host for clients in the `eu` region.
pub(crate) const SERVER_EU: &str = "https://api.eu.nylas.com";

pub(crate) const MESSAGES: &str = "/messages";
pub(crate) const ONE_MESSAGE: &str = "/messages/{id}";

pub(crate) const SENDING: &str = "/send";

pub(crate) const CALENDARS: &str = "/calendars";
pub(crate) const ONE_CALENDAR: &str = "/calendars/{id}";

pub(crate) const GRANTS: &str = "/v3/grants";
pub(crate) const ONE_GRANT: &str = "/v3/grants/{grant_id}";
