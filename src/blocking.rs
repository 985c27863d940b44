//! Blocking client facade.
//!
//! Same resources and semantics as the async [`crate::Nylas`], but every call
//! holds the thread for one HTTP round trip. Both facades drive the same
//! request-planning functions; only the executing transport differs. Do not
//! use this flavor inside an async runtime.

use serde_json::Value;

use crate::administration::{GrantListParams, GrantUpdate};
use crate::calendars::CalendarListParams;
use crate::error::Result;
use crate::messages::{MessageListParams, MessageUpdate, RawMessage};
use crate::options::{Config, Options};
use crate::request::SyncTransport;

/// Blocking API client.
#[derive(Debug, Clone)]
pub struct Nylas {
    options: Options,
    transport: SyncTransport,
}

impl Nylas {
    /// Validate `config` and build a client around it.
    pub fn new(config: Config) -> Result<Self> {
        let options = Options::new(config)?;
        let transport = options.sync();
        Ok(Self { options, transport })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the stored access token, e.g. after re-authentication.
    pub fn set_access_token(&mut self, token: Option<String>) {
        self.options.set_access_token(token);
    }

    pub fn set_account_id(&mut self, id: Option<String>) {
        self.options.set_account_id(id);
    }

    pub fn set_grant_id(&mut self, id: Option<String>) {
        self.options.set_grant_id(id);
    }

    pub fn messages(&self) -> Messages<'_> {
        Messages {
            options: &self.options,
            transport: &self.transport,
        }
    }

    pub fn sending(&self) -> Sending<'_> {
        Sending {
            options: &self.options,
            transport: &self.transport,
        }
    }

    pub fn calendars(&self) -> Calendars<'_> {
        Calendars {
            options: &self.options,
            transport: &self.transport,
        }
    }

    pub fn grants(&self) -> Grants<'_> {
        Grants {
            options: &self.options,
            transport: &self.transport,
        }
    }
}

/// Blocking message operations.
#[derive(Debug, Clone, Copy)]
pub struct Messages<'a> {
    options: &'a Options,
    transport: &'a SyncTransport,
}

impl Messages<'_> {
    pub fn list(&self, params: &MessageListParams) -> Result<Value> {
        let request = crate::messages::list_request(self.options, params)?;
        self.transport.execute(request)?.into_json()
    }

    pub fn find(&self, id: &str, access_token: Option<&str>) -> Result<Value> {
        let request = crate::messages::find_request(self.options, id, access_token)?;
        self.transport.execute(request)?.into_json()
    }

    pub fn find_raw(&self, id: &str, access_token: Option<&str>) -> Result<RawMessage> {
        let request = crate::messages::find_raw_request(self.options, id, access_token)?;
        let bytes = self.transport.execute(request)?.into_bytes()?;
        RawMessage::parse(bytes)
    }

    pub fn update(
        &self,
        id: &str,
        changes: &MessageUpdate,
        access_token: Option<&str>,
    ) -> Result<Value> {
        let request = crate::messages::update_request(self.options, id, changes, access_token)?;
        self.transport.execute(request)?.into_json()
    }
}

/// Blocking draft sending.
#[derive(Debug, Clone, Copy)]
pub struct Sending<'a> {
    options: &'a Options,
    transport: &'a SyncTransport,
}

impl Sending<'_> {
    pub fn send(&self, draft_id: &str, version: u64, access_token: Option<&str>) -> Result<Value> {
        let request = crate::drafts::send_request(self.options, draft_id, version, access_token)?;
        self.transport.execute(request)?.into_json()
    }
}

/// Blocking calendar operations.
#[derive(Debug, Clone, Copy)]
pub struct Calendars<'a> {
    options: &'a Options,
    transport: &'a SyncTransport,
}

impl Calendars<'_> {
    pub fn list(&self, params: &CalendarListParams) -> Result<Value> {
        let request = crate::calendars::list_request(self.options, params)?;
        self.transport.execute(request)?.into_json()
    }

    pub fn find(&self, id: &str, access_token: Option<&str>) -> Result<Value> {
        let request = crate::calendars::find_request(self.options, id, access_token)?;
        self.transport.execute(request)?.into_json()
    }
}

/// Blocking grant administration.
#[derive(Debug, Clone, Copy)]
pub struct Grants<'a> {
    options: &'a Options,
    transport: &'a SyncTransport,
}

impl Grants<'_> {
    pub fn find(&self, grant_id: &str) -> Result<Value> {
        let request = crate::administration::find_request(self.options, grant_id)?;
        self.transport.execute(request)?.into_json()
    }

    pub fn list(&self, params: &GrantListParams) -> Result<Value> {
        let request = crate::administration::list_request(self.options, params)?;
        self.transport.execute(request)?.into_json()
    }

    pub fn update(&self, grant_id: &str, changes: &GrantUpdate) -> Result<Value> {
        let request = crate::administration::update_request(self.options, grant_id, changes)?;
        self.transport.execute(request)?.into_json()
    }

    pub fn delete(&self, grant_id: &str) -> Result<Value> {
        let request = crate::administration::delete_request(self.options, grant_id)?;
        self.transport.execute(request)?.into_json()
    }
}
