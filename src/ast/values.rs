use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field-to-value pairs, kept in insertion order.
pub type Fields = IndexMap<String, Value>;

/// A value carried by an intent or bound to a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// NULL value
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Unsigned integer above `i64::MAX`
    UInt(u64),
    /// Float
    Float(f64),
    /// String (also used for identifiers bound to `??`)
    String(String),
    /// Array of values
    List(Vec<Value>),
    /// Ordered field map, rendered as `field = value` pairs by the binding layer
    Map(Fields),
}

impl Value {
    /// A map holding exactly one `field: value` entry.
    pub fn entry(field: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut fields = Fields::with_capacity(1);
        fields.insert(field.into(), value.into());
        Value::Map(fields)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Fields> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::UInt(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "'{}'", s),
            Value::List(arr) => {
                write!(f, "[")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::Map(fields) => {
                write!(f, "{{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Value::Int(n),
            Err(_) => Value::UInt(n),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Fields> for Value {
    fn from(fields: Fields) -> Self {
        Value::Map(fields)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

/// Build an ordered [`Fields`] map from `key => value` pairs.
///
/// ```
/// use intent_sql::fields;
///
/// let f = fields! { "lastname" => "john", "age" => 42 };
/// assert_eq!(f.keys().collect::<Vec<_>>(), ["lastname", "age"]);
/// ```
#[macro_export]
macro_rules! fields {
    () => { $crate::ast::Fields::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::ast::Fields::new();
        $( fields.insert(::std::string::String::from($key), $crate::ast::Value::from($value)); )+
        fields
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_is_single_field_map() {
        let v = Value::entry("name", "x");
        let map = v.as_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["name"], Value::String("x".to_string()));
    }

    #[test]
    fn test_display() {
        let v = Value::Map(crate::fields! { "name" => "x", "age" => 42 });
        assert_eq!(v.to_string(), "{name: 'x', age: 42}");
        assert_eq!(Value::from(vec![1, 2]).to_string(), "[1, 2]");
        assert_eq!(Value::from(None::<i64>).to_string(), "NULL");
    }

    #[test]
    fn test_serializes_as_plain_json() {
        let v = Value::Map(crate::fields! { "b" => 1, "a" => "s" });
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"{"b":1,"a":"s"}"#);
    }

    #[test]
    fn test_deserialize_keeps_key_order() {
        let v: Value = serde_json::from_str(r#"{"z": 1, "a": 2.5, "m": null}"#).unwrap();
        let keys: Vec<&str> = v.as_map().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
        assert_eq!(v.as_map().unwrap()["a"], Value::Float(2.5));
        assert_eq!(v.as_map().unwrap()["m"], Value::Null);
    }

    #[test]
    fn test_large_unsigned_stays_integer() {
        assert_eq!(Value::from(7u64), Value::Int(7));
        assert_eq!(Value::from(u64::MAX), Value::UInt(u64::MAX));
        assert_eq!(Value::from(u64::MAX).to_string(), "18446744073709551615");

        let v: Value = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(v, Value::UInt(u64::MAX));
        let v: Value = serde_json::from_str("-3").unwrap();
        assert_eq!(v, Value::Int(-3));
    }
}
