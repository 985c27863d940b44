//! Declarative parameter validation.
//!
//! Every endpoint owns a [`RuleSet`] describing the keys it accepts. The rule
//! set is applied to the caller's parameter mapping before any request is
//! composed; a failure means no network I/O happens at all. Rules are pure
//! and carry no defaults. Endpoints inject the `limit`/`offset` defaults
//! themselves when building the query.

use serde_json::{Map, Value};

use crate::error::{NylasError, Result};

/// A single per-key constraint.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Constraint {
    /// A string with at least one character.
    NonEmptyString,
    /// A JSON boolean.
    Bool,
    /// An integer greater than or equal to the bound.
    IntMin(i64),
    /// A positive unix timestamp in seconds.
    Timestamp,
    /// A plausible email address.
    Email,
    /// A string drawn from a fixed set.
    OneOf(&'static [&'static str]),
    /// An array whose elements are all non-empty strings.
    StringArray,
    /// A JSON object.
    Object,
}

/// An ordered set of key rules with key-set semantics: required keys must be
/// present, optional keys are checked when present, unknown keys are
/// rejected.
#[derive(Debug, Clone, Default)]
pub(crate) struct RuleSet {
    rules: Vec<(&'static str, Constraint, bool)>,
}

impl RuleSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a key that must be present and satisfy `constraint`.
    pub(crate) fn required(mut self, key: &'static str, constraint: Constraint) -> Self {
        self.rules.push((key, constraint, true));
        self
    }

    /// Add a key that is checked only when present.
    pub(crate) fn optional(mut self, key: &'static str, constraint: Constraint) -> Self {
        self.rules.push((key, constraint, false));
        self
    }

    /// Apply every rule to `params`, rejecting unknown keys.
    pub(crate) fn validate(&self, params: &Map<String, Value>) -> Result<()> {
        for (key, constraint, required) in &self.rules {
            let value = match params.get(*key) {
                // A null value is treated the same as an absent key.
                None | Some(Value::Null) => {
                    if *required {
                        return Err(NylasError::Validation(format!(
                            "missing required key `{key}`"
                        )));
                    }
                    continue;
                }
                Some(value) => value,
            };

            check(key, *constraint, value)?;
        }

        for key in params.keys() {
            if !self.rules.iter().any(|(name, _, _)| name == key) {
                return Err(NylasError::Validation(format!("unknown key `{key}`")));
            }
        }

        Ok(())
    }
}

/// Check one value against one constraint, naming the key on failure.
fn check(key: &str, constraint: Constraint, value: &Value) -> Result<()> {
    let ok = match constraint {
        Constraint::NonEmptyString => value.as_str().is_some_and(|s| !s.is_empty()),
        Constraint::Bool => value.is_boolean(),
        Constraint::IntMin(min) => value.as_i64().is_some_and(|n| n >= min),
        Constraint::Timestamp => value.as_i64().is_some_and(|n| n > 0),
        Constraint::Email => value.as_str().is_some_and(is_email),
        Constraint::OneOf(allowed) => value.as_str().is_some_and(|s| allowed.contains(&s)),
        Constraint::StringArray => value.as_array().is_some_and(|items| {
            items
                .iter()
                .all(|item| item.as_str().is_some_and(|s| !s.is_empty()))
        }),
        Constraint::Object => value.is_object(),
    };

    if ok {
        return Ok(());
    }

    Err(NylasError::Validation(format!(
        "key `{key}` {}",
        describe(constraint)
    )))
}

fn describe(constraint: Constraint) -> String {
    match constraint {
        Constraint::NonEmptyString => "must be a non-empty string".into(),
        Constraint::Bool => "must be a boolean".into(),
        Constraint::IntMin(min) => format!("must be an integer >= {min}"),
        Constraint::Timestamp => "must be a positive unix timestamp".into(),
        Constraint::Email => "must be an email address".into(),
        Constraint::OneOf(allowed) => format!("must be one of {allowed:?}"),
        Constraint::StringArray => "must be an array of non-empty strings".into(),
        Constraint::Object => "must be an object".into(),
    }
}

/// Minimal structural check: one `@`, non-empty local part, dotted domain.
fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}
