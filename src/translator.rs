//! Intent → SQL translator.
//!
//! Produces MySQL `format`-style statements: `??` placeholders take an
//! identifier, `?` placeholders take a value. Parameters are returned in
//! placeholder order and are never inlined into the text.

use serde::Serialize;
use std::sync::OnceLock;

use crate::ast::*;
use crate::builder::ToIntent;
use crate::document::IntentDocument;
use crate::error::TranslateResult;

/// Kind of substitution a placeholder expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `??`
    Identifier,
    /// `?`
    Value,
}

impl Placeholder {
    pub fn as_str(self) -> &'static str {
        match self {
            Placeholder::Identifier => "??",
            Placeholder::Value => "?",
        }
    }
}

/// A generated statement and its bound parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    #[serde(rename = "statement")]
    sql: String,
    #[serde(rename = "parameters")]
    params: Vec<Value>,
}

impl Statement {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    /// Placeholders of the statement text, left to right.
    ///
    /// Identifiers and values are always bound, never inlined, so every `?`
    /// in the text belongs to a placeholder.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let mut found = Vec::with_capacity(self.params.len());
        let mut chars = self.sql.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '?' {
                if chars.next_if_eq(&'?').is_some() {
                    found.push(Placeholder::Identifier);
                } else {
                    found.push(Placeholder::Value);
                }
            }
        }
        found
    }

    /// Append an identifier placeholder bound to `ident`.
    fn push_ident(&mut self, prefix: &str, ident: &str) {
        self.sql.push_str(prefix);
        self.sql.push_str("??");
        self.params.push(Value::String(ident.to_string()));
    }

    /// Append a value placeholder bound to `value`.
    fn push_value(&mut self, prefix: &str, value: Value) {
        self.sql.push_str(prefix);
        self.sql.push('?');
        self.params.push(value);
    }
}

/// Translates one [`Intent`] into a [`Statement`].
///
/// Generation is deferred until [`statement`](Self::statement) or
/// [`bound_parameters`](Self::bound_parameters) is first called, runs once,
/// and is cached for the lifetime of the translator.
#[derive(Debug)]
pub struct Translator {
    intent: Intent,
    output: OnceLock<Statement>,
}

impl Translator {
    pub fn new(intent: Intent) -> Self {
        Self {
            intent,
            output: OnceLock::new(),
        }
    }

    /// Snapshot a live query and translate it.
    pub fn from_query(query: &impl ToIntent) -> Self {
        Self::new(query.to_intent())
    }

    /// Accept an untyped intent document.
    ///
    /// Fails with `InvalidArgument` for `null`, non-objects, or missing
    /// `model`/`action`, and with `UnsupportedAction` for unknown actions.
    pub fn from_document(document: serde_json::Value) -> TranslateResult<Self> {
        Ok(Self::new(Intent::try_from(document)?))
    }

    pub fn from_json(source: &str) -> TranslateResult<Self> {
        Ok(Self::new(IntentDocument::from_json(source)?.into_intent()?))
    }

    pub fn from_toml(source: &str) -> TranslateResult<Self> {
        Ok(Self::new(IntentDocument::from_toml(source)?.into_intent()?))
    }

    /// Parse the one-line intent syntax and translate it.
    pub fn from_syntax(input: &str) -> TranslateResult<Self> {
        Ok(Self::new(crate::parser::parse(input)?))
    }

    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    /// The SQL text with `??`/`?` placeholders.
    pub fn statement(&self) -> &str {
        self.generated().sql()
    }

    /// Values for each placeholder of [`statement`](Self::statement), in order.
    pub fn bound_parameters(&self) -> &[Value] {
        self.generated().params()
    }

    /// Consume the translator, generating first if needed.
    pub fn into_statement(self) -> Statement {
        let Self { intent, output } = self;
        output.into_inner().unwrap_or_else(|| generate(&intent))
    }

    fn generated(&self) -> &Statement {
        self.output.get_or_init(|| generate(&self.intent))
    }
}

impl From<Intent> for Translator {
    fn from(intent: Intent) -> Self {
        Self::new(intent)
    }
}

/// Limit actually applied: FindOne always reads a single row.
fn effective_limit(intent: &Intent) -> Option<u64> {
    match intent.action {
        Action::FindOne => Some(1),
        Action::Create => None,
        Action::Find | Action::Update | Action::Destroy => intent.limit,
    }
}

fn generate(intent: &Intent) -> Statement {
    let mut stmt = Statement {
        sql: String::new(),
        params: Vec::new(),
    };

    match intent.action {
        Action::Create => {
            stmt.push_ident("INSERT INTO ", &intent.model);
            stmt.push_value(" SET ", values_param(intent));
        }
        Action::Find | Action::FindOne => {
            stmt.push_ident("SELECT * FROM ", &intent.model);
        }
        Action::Update => {
            stmt.push_ident("UPDATE ", &intent.model);
            stmt.push_value(" SET ", values_param(intent));
        }
        Action::Destroy => {
            stmt.push_ident("DELETE FROM ", &intent.model);
        }
    }

    // Inserts never filter
    if intent.action != Action::Create {
        if let Some(criteria) = &intent.criteria {
            for (i, (field, value)) in criteria.iter().enumerate() {
                let prefix = if i == 0 { " WHERE " } else { " AND " };
                stmt.push_value(prefix, Value::entry(field.clone(), value.clone()));
            }
        }
    }

    if let Some(sort) = &intent.sort {
        for (i, key) in sort.iter().enumerate() {
            let prefix = if i == 0 { " ORDER BY " } else { ", " };
            stmt.push_ident(prefix, &key.field);
            if let Some(keyword) = key.direction.keyword() {
                stmt.sql.push(' ');
                stmt.sql.push_str(keyword);
            }
        }
    }

    if let Some(limit) = effective_limit(intent) {
        match intent.offset {
            Some(offset) => {
                stmt.push_value(" LIMIT ", Value::from(offset));
                stmt.push_value(", ", Value::from(limit));
            }
            None => stmt.push_value(" LIMIT 0, ", Value::from(limit)),
        }
    }

    tracing::debug!(
        model = %intent.model,
        action = %intent.action,
        params = stmt.params.len(),
        sql = %stmt.sql,
        "generated statement"
    );

    stmt
}

fn values_param(intent: &Intent) -> Value {
    Value::Map(intent.values.clone().unwrap_or_default())
}
