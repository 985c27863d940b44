//! Message endpoints: list, find, raw retrieval, and flag updates.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::api;
use crate::error::Result;
use crate::messages::RawMessage;
use crate::options::Options;
use crate::request::{
    merge_access_token, take_token, RequestBuilder, RequestDescriptor, to_map,
};
use crate::validator::{Constraint, RuleSet};

/// Filters for [`Messages::list`]. Every field is optional; omitted `limit`
/// and `offset` default to 100 and 0 on the wire.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageListParams {
    /// Folder or label to search in.
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub in_folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    /// Unix timestamp, seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_after: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_before: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_attachment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// One of `ids`, `count`, `expanded`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starred: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Per-call token; overrides the client-stored one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Status and flag changes for [`Messages::update`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starred: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,
}

/// Message operations for one client.
#[derive(Debug, Clone, Copy)]
pub struct Messages<'a> {
    options: &'a Options,
}

impl<'a> Messages<'a> {
    pub(crate) fn new(options: &'a Options) -> Self {
        Self { options }
    }

    /// List messages matching `params`. Returns the decoded JSON response.
    pub async fn list(&self, params: &MessageListParams) -> Result<Value> {
        let request = list_request(self.options, params)?;
        self.options.transport().execute(request).await?.into_json()
    }

    /// Fetch one message by id.
    pub async fn find(&self, id: &str, access_token: Option<&str>) -> Result<Value> {
        let request = find_request(self.options, id, access_token)?;
        self.options.transport().execute(request).await?.into_json()
    }

    /// Fetch one message as raw RFC-2822 bytes and parse it.
    pub async fn find_raw(&self, id: &str, access_token: Option<&str>) -> Result<RawMessage> {
        let request = find_raw_request(self.options, id, access_token)?;
        let bytes = self
            .options
            .transport()
            .execute(request)
            .await?
            .into_bytes()?;
        RawMessage::parse(bytes)
    }

    /// Update status and flags of one message.
    pub async fn update(
        &self,
        id: &str,
        changes: &MessageUpdate,
        access_token: Option<&str>,
    ) -> Result<Value> {
        let request = update_request(self.options, id, changes, access_token)?;
        self.options.transport().execute(request).await?.into_json()
    }
}

fn list_rules() -> RuleSet {
    RuleSet::new()
        .optional("in", Constraint::NonEmptyString)
        .optional("to", Constraint::Email)
        .optional("from", Constraint::Email)
        .optional("cc", Constraint::Email)
        .optional("bcc", Constraint::Email)
        .optional("subject", Constraint::NonEmptyString)
        .optional("any_email", Constraint::NonEmptyString)
        .optional("thread_id", Constraint::NonEmptyString)
        .optional("received_after", Constraint::Timestamp)
        .optional("received_before", Constraint::Timestamp)
        .optional("has_attachment", Constraint::Bool)
        .optional("limit", Constraint::IntMin(1))
        .optional("offset", Constraint::IntMin(0))
        .optional("view", Constraint::OneOf(&["ids", "count", "expanded"]))
        .optional("unread", Constraint::Bool)
        .optional("starred", Constraint::Bool)
        .optional("filename", Constraint::NonEmptyString)
        .required("access_token", Constraint::NonEmptyString)
}

fn find_rules() -> RuleSet {
    RuleSet::new()
        .required("id", Constraint::NonEmptyString)
        .required("access_token", Constraint::NonEmptyString)
}

fn update_rules() -> RuleSet {
    RuleSet::new()
        .required("id", Constraint::NonEmptyString)
        .required("access_token", Constraint::NonEmptyString)
        .optional("unread", Constraint::Bool)
        .optional("starred", Constraint::Bool)
        .optional("folder_id", Constraint::NonEmptyString)
        .optional("label_ids", Constraint::StringArray)
}

pub(crate) fn list_request(
    options: &Options,
    params: &MessageListParams,
) -> Result<RequestDescriptor> {
    let mut params = to_map(params)?;
    merge_access_token(&mut params, options);
    list_rules().validate(&params)?;

    let token = take_token(&mut params)?;
    let limit = params
        .remove("limit")
        .and_then(|value| value.as_u64())
        .unwrap_or(100);
    let offset = params
        .remove("offset")
        .and_then(|value| value.as_u64())
        .unwrap_or(0);

    Ok(RequestBuilder::new(api::MESSAGES)
        .bearer(&token)
        .query_map(&params)
        .query("limit", limit)
        .query("offset", offset)
        .get())
}

pub(crate) fn find_request(
    options: &Options,
    id: &str,
    access_token: Option<&str>,
) -> Result<RequestDescriptor> {
    let mut params = id_params(id, access_token, options);
    find_rules().validate(&params)?;
    let token = take_token(&mut params)?;

    Ok(RequestBuilder::path(api::ONE_MESSAGE, &[id])?
        .bearer(&token)
        .get())
}

pub(crate) fn find_raw_request(
    options: &Options,
    id: &str,
    access_token: Option<&str>,
) -> Result<RequestDescriptor> {
    let mut params = id_params(id, access_token, options);
    find_rules().validate(&params)?;
    let token = take_token(&mut params)?;

    Ok(RequestBuilder::path(api::ONE_MESSAGE, &[id])?
        .bearer(&token)
        .header("Accept", "message/rfc822")
        .get())
}

pub(crate) fn update_request(
    options: &Options,
    id: &str,
    changes: &MessageUpdate,
    access_token: Option<&str>,
) -> Result<RequestDescriptor> {
    let mut params = to_map(changes)?;
    params.insert("id".into(), Value::String(id.to_string()));
    if let Some(token) = access_token {
        params.insert("access_token".into(), Value::String(token.to_string()));
    }
    merge_access_token(&mut params, options);
    update_rules().validate(&params)?;

    let token = take_token(&mut params)?;
    params.remove("id");

    Ok(RequestBuilder::path(api::ONE_MESSAGE, &[id])?
        .bearer(&token)
        .json(params)
        .put())
}

/// The `{id, access_token}` mapping shared by the single-message calls.
fn id_params(id: &str, access_token: Option<&str>, options: &Options) -> Map<String, Value> {
    let mut params = Map::new();
    params.insert("id".into(), Value::String(id.to_string()));
    if let Some(token) = access_token {
        params.insert("access_token".into(), Value::String(token.to_string()));
    }
    merge_access_token(&mut params, options);
    params
}
