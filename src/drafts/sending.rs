//! Draft sending.

use serde_json::{Map, Value};

use crate::api;
use crate::error::Result;
use crate::options::Options;
use crate::request::{merge_access_token, take_token, RequestBuilder, RequestDescriptor};
use crate::validator::{Constraint, RuleSet};

/// Sends previously saved drafts.
#[derive(Debug, Clone, Copy)]
pub struct Sending<'a> {
    options: &'a Options,
}

impl<'a> Sending<'a> {
    pub(crate) fn new(options: &'a Options) -> Self {
        Self { options }
    }

    /// Send the draft with the given id at the given version.
    ///
    /// The version guards against sending a stale draft: the API rejects the
    /// call when the draft has been edited since.
    pub async fn send(
        &self,
        draft_id: &str,
        version: u64,
        access_token: Option<&str>,
    ) -> Result<Value> {
        let request = send_request(self.options, draft_id, version, access_token)?;
        self.options.transport().execute(request).await?.into_json()
    }
}

fn send_rules() -> RuleSet {
    RuleSet::new()
        .required("draft", Constraint::NonEmptyString)
        .required("version", Constraint::IntMin(0))
        .required("access_token", Constraint::NonEmptyString)
}

pub(crate) fn send_request(
    options: &Options,
    draft_id: &str,
    version: u64,
    access_token: Option<&str>,
) -> Result<RequestDescriptor> {
    let mut params = Map::new();
    params.insert("draft".into(), Value::String(draft_id.to_string()));
    params.insert("version".into(), Value::from(version));
    if let Some(token) = access_token {
        params.insert("access_token".into(), Value::String(token.to_string()));
    }
    merge_access_token(&mut params, options);
    send_rules().validate(&params)?;

    let token = take_token(&mut params)?;

    Ok(RequestBuilder::new(api::SENDING)
        .bearer(&token)
        .form(&params)
        .post())
}
