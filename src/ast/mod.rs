//! Intent data model.

pub mod intent;
pub mod values;

pub use intent::{Action, Direction, Intent, SortKey};
pub use values::{Fields, Value};
