//! Grant administration.
//!
//! Grants are the v3 generation of the API: they live under `/v3/grants` and
//! authenticate with the client's API key, never with an access token.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::api;
use crate::error::{NylasError, Result};
use crate::options::Options;
use crate::request::{to_map, RequestBuilder, RequestDescriptor};
use crate::validator::{Constraint, RuleSet};

/// Filters for [`Grants::list`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct GrantListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

/// Changes for [`Grants::update`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct GrantUpdate {
    /// Provider-specific settings object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Vec<String>>,
}

/// Grant operations for one client.
#[derive(Debug, Clone, Copy)]
pub struct Grants<'a> {
    options: &'a Options,
}

impl<'a> Grants<'a> {
    pub(crate) fn new(options: &'a Options) -> Self {
        Self { options }
    }

    /// Fetch one grant by id.
    pub async fn find(&self, grant_id: &str) -> Result<Value> {
        let request = find_request(self.options, grant_id)?;
        self.options.transport().execute(request).await?.into_json()
    }

    /// List grants for this application.
    pub async fn list(&self, params: &GrantListParams) -> Result<Value> {
        let request = list_request(self.options, params)?;
        self.options.transport().execute(request).await?.into_json()
    }

    /// Update one grant.
    pub async fn update(&self, grant_id: &str, changes: &GrantUpdate) -> Result<Value> {
        let request = update_request(self.options, grant_id, changes)?;
        self.options.transport().execute(request).await?.into_json()
    }

    /// Revoke and delete one grant.
    pub async fn delete(&self, grant_id: &str) -> Result<Value> {
        let request = delete_request(self.options, grant_id)?;
        self.options.transport().execute(request).await?.into_json()
    }
}

fn list_rules() -> RuleSet {
    RuleSet::new()
        .optional("limit", Constraint::IntMin(1))
        .optional("offset", Constraint::IntMin(0))
}

fn update_rules() -> RuleSet {
    RuleSet::new()
        .optional("settings", Constraint::Object)
        .optional("scope", Constraint::StringArray)
}

/// Grants authenticate with the API key; reject blank ids before composing.
fn require_grant_id(grant_id: &str) -> Result<()> {
    if grant_id.is_empty() {
        return Err(NylasError::Validation(
            "key `grant_id` must be a non-empty string".into(),
        ));
    }
    Ok(())
}

pub(crate) fn find_request(options: &Options, grant_id: &str) -> Result<RequestDescriptor> {
    require_grant_id(grant_id)?;

    Ok(RequestBuilder::path(api::ONE_GRANT, &[grant_id])?
        .bearer(options.api_key())
        .get())
}

pub(crate) fn list_request(
    options: &Options,
    params: &GrantListParams,
) -> Result<RequestDescriptor> {
    let mut params = to_map(params)?;
    list_rules().validate(&params)?;

    let limit = params
        .remove("limit")
        .and_then(|value| value.as_u64())
        .unwrap_or(100);
    let offset = params
        .remove("offset")
        .and_then(|value| value.as_u64())
        .unwrap_or(0);

    Ok(RequestBuilder::new(api::GRANTS)
        .bearer(options.api_key())
        .query("limit", limit)
        .query("offset", offset)
        .get())
}

pub(crate) fn update_request(
    options: &Options,
    grant_id: &str,
    changes: &GrantUpdate,
) -> Result<RequestDescriptor> {
    require_grant_id(grant_id)?;

    let params: Map<String, Value> = to_map(changes)?;
    update_rules().validate(&params)?;

    Ok(RequestBuilder::path(api::ONE_GRANT, &[grant_id])?
        .bearer(options.api_key())
        .json(params)
        .put())
}

pub(crate) fn delete_request(options: &Options, grant_id: &str) -> Result<RequestDescriptor> {
    require_grant_id(grant_id)?;

    Ok(RequestBuilder::path(api::ONE_GRANT, &[grant_id])?
        .bearer(options.api_key())
        .delete())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Config;

    fn options() -> Options {
        Options::new(Config {
            api_key: "app-key".into(),
            access_token: Some("stored-token".into()),
            ..Config::default()
        })
        .unwrap()
    }

    #[test]
    fn grant_calls_authenticate_with_the_api_key() {
        let request = find_request(&options(), "grant-1").unwrap();
        assert_eq!(request.path, "/v3/grants/grant-1");
        assert!(request
            .headers
            .contains(&("Authorization".to_string(), "Bearer app-key".to_string())));
    }

    #[test]
    fn blank_grant_id_is_rejected() {
        assert!(find_request(&options(), "").is_err());
        assert!(delete_request(&options(), "").is_err());
    }

    #[test]
    fn list_applies_default_limit_and_offset() {
        let request = list_request(&options(), &GrantListParams::default()).unwrap();
        assert!(request
            .query
            .contains(&("limit".to_string(), "100".to_string())));
        assert!(request
            .query
            .contains(&("offset".to_string(), "0".to_string())));
    }

    #[test]
    fn update_sends_a_json_body() {
        let changes = GrantUpdate {
            scope: Some(vec!["email.read_only".into()]),
            ..GrantUpdate::default()
        };
        let request = update_request(&options(), "grant-1", &changes).unwrap();
        match &request.body {
            crate::request::Body::Json(body) => {
                assert_eq!(body["scope"], serde_json::json!(["email.read_only"]));
            }
            other => panic!("expected JSON body, got {other:?}"),
        }
    }

    #[test]
    fn settings_must_be_an_object() {
        let changes = GrantUpdate {
            settings: Some(Value::String("nope".into())),
            ..GrantUpdate::default()
        };
        assert!(update_request(&options(), "grant-1", &changes).is_err());
    }
}
