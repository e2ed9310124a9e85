use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ast::Fields;
use crate::error::TranslateError;

/// The kind of database operation an intent requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// INSERT
    Create,
    /// SELECT
    Find,
    /// SELECT, limited to a single row
    FindOne,
    /// UPDATE
    Update,
    /// DELETE
    Destroy,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::Find,
        Action::FindOne,
        Action::Update,
        Action::Destroy,
    ];

    /// Canonical tag, as accepted by documents and the intent syntax.
    pub fn tag(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Find => "find",
            Action::FindOne => "findOne",
            Action::Update => "update",
            Action::Destroy => "destroy",
        }
    }

    /// Whether the action carries a `values` payload.
    pub fn writes_values(self) -> bool {
        matches!(self, Action::Create | Action::Update)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Action {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "create" => Ok(Action::Create),
            "find" => Ok(Action::Find),
            "findone" | "find_one" => Ok(Action::FindOne),
            "update" => Ok(Action::Update),
            "destroy" => Ok(Action::Destroy),
            _ => Err(TranslateError::UnsupportedAction(s.to_string())),
        }
    }
}

/// Sort direction. Documents encode it as `1` / `-1`.
///
/// Any other integer is kept as [`Direction::Other`] and renders without a
/// direction keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Direction {
    Asc,
    Desc,
    Other(i64),
}

impl Direction {
    /// SQL keyword for this direction, if any.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Direction::Asc => Some("ASC"),
            Direction::Desc => Some("DESC"),
            Direction::Other(_) => None,
        }
    }
}

impl From<i64> for Direction {
    fn from(n: i64) -> Self {
        match n {
            1 => Direction::Asc,
            -1 => Direction::Desc,
            n => Direction::Other(n),
        }
    }
}

impl From<i32> for Direction {
    fn from(n: i32) -> Self {
        Direction::from(n as i64)
    }
}

impl From<Direction> for i64 {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Asc => 1,
            Direction::Desc => -1,
            Direction::Other(n) => n,
        }
    }
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub direction: Direction,
}

impl SortKey {
    pub fn new(field: impl Into<String>, direction: impl Into<Direction>) -> Self {
        Self {
            field: field.into(),
            direction: direction.into(),
        }
    }
}

/// A structured, pre-validated description of a query.
///
/// Intents are produced by [`Query`](crate::builder::Query), by
/// [`IntentDocument`](crate::document::IntentDocument) or by the intent
/// syntax parser. There is no public constructor, so holding an `Intent`
/// means it came from one of those producers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intent {
    pub(crate) model: String,
    pub(crate) action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) values: Option<Fields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) criteria: Option<Fields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sort: Option<Vec<SortKey>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) offset: Option<u64>,
}

impl Intent {
    pub(crate) fn new(model: impl Into<String>, action: Action) -> Self {
        Self {
            model: model.into(),
            action,
            values: None,
            criteria: None,
            sort: None,
            limit: None,
            offset: None,
        }
    }

    /// Target table identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Payload for Create/Update.
    pub fn values(&self) -> Option<&Fields> {
        self.values.as_ref()
    }

    /// Equality filters, in clause order.
    pub fn criteria(&self) -> Option<&Fields> {
        self.criteria.as_ref()
    }

    pub fn sort(&self) -> Option<&[SortKey]> {
        self.sort.as_deref()
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }
}
