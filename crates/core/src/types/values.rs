//! Runtime values produced by coercion.

use std::fmt;

/// A coerced parameter value.
///
/// `List` elements are always scalars of one kind; `Pair` holds a string key
/// and a scalar value. Floats rule out `Eq`, so comparisons are `PartialEq`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f32),
    Double(f64),
    Text(String),
    List(Vec<Value>),
    Pair(String, Box<Value>),
}

impl Value {
    /// Render as JSON. Non-finite floats, which coercion never produces but
    /// typed defaults may carry, become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::json!(i),
            Value::Float(x) => float_to_json(f64::from(*x)),
            Value::Double(x) => float_to_json(*x),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Pair(key, value) => serde_json::json!([key, value.to_json()]),
        }
    }
}

fn float_to_json(x: f64) -> serde_json::Value {
    serde_json::Number::from_f64(x)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// Formats the value as source text that coerces back to an equal value for
/// the same parameter type.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Double(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::Pair(key, value) => write!(f, "{}:{}", key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_scalars() {
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int(-8589934593).to_string(), "-8589934593");
        assert_eq!(Value::Float(1.25).to_string(), "1.25");
        assert_eq!(Value::Double(2.75).to_string(), "2.75");
        assert_eq!(Value::Text("AAA".into()).to_string(), "AAA");
    }

    #[test]
    fn display_compound() {
        let list = Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(list.to_string(), "1,2,3");
        let pair = Value::Pair("key".into(), Box::new(Value::Bool(false)));
        assert_eq!(pair.to_string(), "key:false");
    }

    #[test]
    fn json_rendering() {
        let pair = Value::Pair("key".into(), Box::new(Value::Double(2.75)));
        assert_eq!(pair.to_json(), serde_json::json!(["key", 2.75]));
        let list = Value::List(vec![Value::Bool(true), Value::Bool(false)]);
        assert_eq!(list.to_json(), serde_json::json!([true, false]));
        assert_eq!(
            Value::Double(f64::INFINITY).to_json(),
            serde_json::Value::Null
        );
    }
}
