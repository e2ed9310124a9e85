//! Untyped intent documents.
//!
//! JSON or TOML sources are deserialized into [`IntentDocument`] and checked
//! once here. Anything that gets past [`IntentDocument::into_intent`] is a
//! well-formed [`Intent`].
//!
//! ```json
//! {
//!   "model": "users",
//!   "action": "findOne",
//!   "criteria": { "name": "test" },
//!   "sort": [["age", -1]],
//!   "offset": 10
//! }
//! ```

use serde::Deserialize;

use crate::ast::{Action, Direction, Fields, Intent, SortKey};
use crate::error::{TranslateError, TranslateResult};

/// Serde shape of an intent document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntentDocument {
    pub model: String,
    pub action: String,
    #[serde(default)]
    pub values: Option<Fields>,
    #[serde(default)]
    pub criteria: Option<Fields>,
    #[serde(default)]
    pub sort: Option<Vec<(String, Direction)>>,
    /// Row counts are unsigned; a negative limit or offset is rejected.
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
}

impl IntentDocument {
    /// Deserialize from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> TranslateResult<Self> {
        if !value.is_object() {
            return Err(TranslateError::invalid(format!(
                "expected an intent object, got {}",
                json_kind(&value)
            )));
        }
        serde_json::from_value(value).map_err(|e| TranslateError::invalid(e.to_string()))
    }

    pub fn from_json(source: &str) -> TranslateResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(source).map_err(|e| TranslateError::invalid(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_toml(source: &str) -> TranslateResult<Self> {
        toml::from_str(source).map_err(|e| TranslateError::invalid(e.to_string()))
    }

    /// Check the document and turn it into an [`Intent`].
    pub fn into_intent(self) -> TranslateResult<Intent> {
        let action: Action = self.action.parse()?;

        if self.model.is_empty() {
            return Err(TranslateError::invalid("model must not be empty"));
        }
        if action.writes_values() && self.values.is_none() {
            return Err(TranslateError::invalid(format!(
                "action '{}' requires values",
                action
            )));
        }

        tracing::trace!(model = %self.model, %action, "accepted intent document");

        Ok(Intent {
            model: self.model,
            action,
            values: if action.writes_values() { self.values } else { None },
            criteria: self.criteria,
            sort: self.sort.map(|keys| {
                keys.into_iter()
                    .map(|(field, direction)| SortKey::new(field, direction))
                    .collect()
            }),
            limit: self.limit,
            offset: self.offset,
        })
    }
}

impl TryFrom<serde_json::Value> for Intent {
    type Error = TranslateError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        IntentDocument::from_value(value)?.into_intent()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
