//! Calendar endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::api;
use crate::error::Result;
use crate::options::Options;
use crate::request::{
    merge_access_token, take_token, to_map, RequestBuilder, RequestDescriptor,
};
use crate::validator::{Constraint, RuleSet};

/// Filters for [`Calendars::list`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CalendarListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// One of `ids`, `count`, `expanded`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    /// Per-call token; overrides the client-stored one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Calendar operations for one client.
#[derive(Debug, Clone, Copy)]
pub struct Calendars<'a> {
    options: &'a Options,
}

impl<'a> Calendars<'a> {
    pub(crate) fn new(options: &'a Options) -> Self {
        Self { options }
    }

    /// List calendars. Returns the decoded JSON response.
    pub async fn list(&self, params: &CalendarListParams) -> Result<Value> {
        let request = list_request(self.options, params)?;
        self.options.transport().execute(request).await?.into_json()
    }

    /// Fetch one calendar by id.
    pub async fn find(&self, id: &str, access_token: Option<&str>) -> Result<Value> {
        let request = find_request(self.options, id, access_token)?;
        self.options.transport().execute(request).await?.into_json()
    }
}

fn list_rules() -> RuleSet {
    RuleSet::new()
        .optional("limit", Constraint::IntMin(1))
        .optional("offset", Constraint::IntMin(0))
        .optional("view", Constraint::OneOf(&["ids", "count", "expanded"]))
        .required("access_token", Constraint::NonEmptyString)
}

fn find_rules() -> RuleSet {
    RuleSet::new()
        .required("id", Constraint::NonEmptyString)
        .required("access_token", Constraint::NonEmptyString)
}

pub(crate) fn list_request(
    options: &Options,
    params: &CalendarListParams,
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

    Ok(RequestBuilder::new(api::CALENDARS)
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
    let mut params = serde_json::Map::new();
    params.insert("id".into(), Value::String(id.to_string()));
    if let Some(token) = access_token {
        params.insert("access_token".into(), Value::String(token.to_string()));
    }
    merge_access_token(&mut params, options);
    find_rules().validate(&params)?;

    let token = take_token(&mut params)?;

    Ok(RequestBuilder::path(api::ONE_CALENDAR, &[id])?
        .bearer(&token)
        .get())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Config;

    fn options() -> Options {
        Options::new(Config {
            api_key: "key".into(),
            access_token: Some("stored-token".into()),
            ..Config::default()
        })
        .unwrap()
    }

    #[test]
    fn list_applies_default_limit_and_offset() {
        let request = list_request(&options(), &CalendarListParams::default()).unwrap();
        let query: Vec<_> = request
            .query
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        assert!(query.contains(&("limit", "100")));
        assert!(query.contains(&("offset", "0")));
    }

    #[test]
    fn count_view_passes_through() {
        let params = CalendarListParams {
            view: Some("count".into()),
            ..CalendarListParams::default()
        };
        let request = list_request(&options(), &params).unwrap();
        assert!(request
            .query
            .contains(&("view".to_string(), "count".to_string())));
    }

    #[test]
    fn unknown_view_is_rejected() {
        let params = CalendarListParams {
            view: Some("everything".into()),
            ..CalendarListParams::default()
        };
        assert!(list_request(&options(), &params).is_err());
    }

    #[test]
    fn find_resolves_the_id_into_the_path() {
        let request = find_request(&options(), "cal-9", None).unwrap();
        assert_eq!(request.path, "/calendars/cal-9");
    }
}
