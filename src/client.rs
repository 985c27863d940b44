use crate::administration::Grants;
use crate::calendars::Calendars;
use crate::drafts::Sending;
use crate::error::Result;
use crate::messages::Messages;
use crate::options::{Config, Options};

/// Asynchronous API client.
///
/// Holds the validated [`Options`] and hands out thin per-resource accessors.
/// For synchronous use, see [`crate::blocking::Nylas`].
#[derive(Debug, Clone)]
pub struct Nylas {
    options: Options,
}

impl Nylas {
    /// Validate `config` and build a client around it.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            options: Options::new(config)?,
        })
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
        Messages::new(&self.options)
    }

    pub fn sending(&self) -> Sending<'_> {
        Sending::new(&self.options)
    }

    pub fn calendars(&self) -> Calendars<'_> {
        Calendars::new(&self.options)
    }

    pub fn grants(&self) -> Grants<'_> {
        Grants::new(&self.options)
    }
}
