//! # intent-sql
//!
//! Translates query intents into parameterized MySQL statements.
//!
//! An [`Intent`](ast::Intent) names a table, an action and optional criteria,
//! sort, limit and offset. The [`Translator`](translator::Translator) turns it
//! into statement text with `??` (identifier) and `?` (value) placeholders plus
//! the parameters that fill them, in order. Nothing is executed.
//!
//! ## Quick Example
//!
//! ```
//! use intent_sql::prelude::*;
//!
//! let query = Query::new("users")
//!     .find(fields! { "name" => "test" })
//!     .limit(2)
//!     .offset(10);
//!
//! let translator = Translator::from_query(&query);
//! assert_eq!(translator.statement(), "SELECT * FROM ?? WHERE ? LIMIT ?, ?");
//! assert_eq!(
//!     translator.bound_parameters(),
//!     [
//!         Value::from("users"),
//!         Value::entry("name", "test"),
//!         Value::Int(10),
//!         Value::Int(2),
//!     ]
//! );
//! ```
//!
//! ## Placeholders
//!
//! | Clause   | Text                    | Parameters           |
//! |----------|-------------------------|----------------------|
//! | table    | `??`                    | model name           |
//! | values   | `SET ?`                 | field map            |
//! | criteria | `WHERE ? AND ?`         | one `{field: value}` map each |
//! | sort     | `ORDER BY ?? ASC, ??`   | field name each      |
//! | limit    | `LIMIT ?, ?` / `LIMIT 0, ?` | offset, limit    |

pub mod ast;
pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod parser;
pub mod translator;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::builder::{Query, ToIntent};
    pub use crate::document::IntentDocument;
    pub use crate::error::*;
    pub use crate::fields;
    pub use crate::translator::{Placeholder, Statement, Translator};
}

/// Parse the one-line intent syntax.
///
/// # Example
///
/// ```
/// use intent_sql::parse;
///
/// let intent = parse("find::users[active=true][lim=10]").unwrap();
/// assert_eq!(intent.model(), "users");
/// ```
pub fn parse(input: &str) -> Result<ast::Intent, error::TranslateError> {
    parser::parse(input)
}

/// Translate anything that snapshots into an intent.
pub fn translate(query: &impl builder::ToIntent) -> translator::Statement {
    translator::Translator::from_query(query).into_statement()
}
