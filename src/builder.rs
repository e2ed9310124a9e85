//! Fluent query builder.
//!
//! [`Query`] is the live object callers assemble; [`ToIntent`] snapshots it
//! into the [`Intent`] the translator consumes.
//!
//! # Example
//!
//! ```
//! use intent_sql::prelude::*;
//!
//! let query = Query::new("users")
//!     .find(fields! { "active" => true })
//!     .sort("created_at", -1)
//!     .limit(10);
//!
//! let translator = Translator::from_query(&query);
//! assert_eq!(
//!     translator.statement(),
//!     "SELECT * FROM ?? WHERE ? ORDER BY ?? DESC LIMIT 0, ?"
//! );
//! ```

use crate::ast::{Action, Direction, Fields, Intent, SortKey, Value};

/// Conversion into an intent snapshot.
pub trait ToIntent {
    /// Snapshot this object as an [`Intent`].
    fn to_intent(&self) -> Intent;
}

impl ToIntent for Intent {
    fn to_intent(&self) -> Intent {
        self.clone()
    }
}

/// A query under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    model: String,
    action: Option<Action>,
    values: Option<Fields>,
    criteria: Option<Fields>,
    sort: Vec<SortKey>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Query {
    /// Start a query against the given table.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            action: None,
            values: None,
            criteria: None,
            sort: vec![],
            limit: None,
            offset: None,
        }
    }

    /// Find every row matching `criteria`.
    pub fn find(mut self, criteria: Fields) -> Self {
        self.action = Some(Action::Find);
        self.criteria = Some(criteria);
        self
    }

    /// Find every row.
    pub fn find_all(mut self) -> Self {
        self.action = Some(Action::Find);
        self
    }

    /// Find the first row matching `criteria`.
    pub fn find_one(mut self, criteria: Fields) -> Self {
        self.action = Some(Action::FindOne);
        self.criteria = Some(criteria);
        self
    }

    /// Insert a row.
    pub fn create(mut self, values: Fields) -> Self {
        self.action = Some(Action::Create);
        self.values = Some(values);
        self
    }

    /// Update rows matching `criteria` with `values`.
    pub fn update(mut self, criteria: Fields, values: Fields) -> Self {
        self.action = Some(Action::Update);
        self.criteria = Some(criteria);
        self.values = Some(values);
        self
    }

    /// Delete rows matching `criteria`.
    pub fn destroy(mut self, criteria: Fields) -> Self {
        self.action = Some(Action::Destroy);
        self.criteria = Some(criteria);
        self
    }

    /// Add one equality criterion after the existing ones.
    ///
    /// # Example
    /// ```
    /// use intent_sql::builder::Query;
    /// let query = Query::new("users").find_all().where_eq("id", 42);
    /// ```
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.criteria
            .get_or_insert_with(Fields::new)
            .insert(field.into(), value.into());
        self
    }

    /// Add an ORDER BY term. Accepts `1`, `-1` or a [`Direction`].
    pub fn sort(mut self, field: impl Into<String>, direction: impl Into<Direction>) -> Self {
        self.sort.push(SortKey::new(field, direction));
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }
}

impl ToIntent for Query {
    fn to_intent(&self) -> Intent {
        let action = self.action.unwrap_or(Action::Find);

        let values = if action.writes_values() {
            Some(self.values.clone().unwrap_or_default())
        } else {
            None
        };

        Intent {
            model: self.model.clone(),
            action,
            values,
            criteria: self.criteria.clone(),
            sort: (!self.sort.is_empty()).then(|| self.sort.clone()),
            limit: self.limit,
            offset: self.offset,
        }
    }
}
