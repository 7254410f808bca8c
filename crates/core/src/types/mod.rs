//! Parameter type descriptors and the runtime value model.
//!
//! A [`ParamType`] is what a `define` call binds to a name; a [`Value`] is
//! what coercion produces from raw text. The [`Param`] trait connects the two
//! to ordinary Rust types so call sites can stay statically typed.

pub mod param;
pub mod values;

use std::fmt;
use std::str::FromStr;

pub use param::{Param, ScalarParam};
pub use values::Value;

// ──────────────────────────────────────────────
// Type descriptors
// ──────────────────────────────────────────────

/// The scalar kinds a parameter (or a vector/pair element) can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    Text,
}

impl ScalarKind {
    /// Canonical name as used in schema files and error messages.
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int64",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
            ScalarKind::Text => "string",
        }
    }

    fn from_name(s: &str) -> Option<ScalarKind> {
        match s {
            "bool" => Some(ScalarKind::Bool),
            "int64" | "int" | "long" => Some(ScalarKind::Int),
            "float" | "float32" => Some(ScalarKind::Float),
            "double" | "float64" => Some(ScalarKind::Double),
            "string" | "str" => Some(ScalarKind::Text),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Scalar(ScalarKind),
    /// Homogeneous, comma-separated list of scalars.
    Vector(ScalarKind),
    /// `key:value` with a string key and a scalar value.
    Pair(ScalarKind),
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Scalar(k) => write!(f, "{}", k),
            ParamType::Vector(k) => write!(f, "vector<{}>", k),
            ParamType::Pair(k) => write!(f, "pair<string,{}>", k),
        }
    }
}

/// Error returned when a type name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown parameter type '{0}'")]
pub struct UnknownType(pub String);

impl FromStr for ParamType {
    type Err = UnknownType;

    /// Parse a canonical type name such as `int64`, `vector<double>` or
    /// `pair<string,bool>`. Whitespace inside the angle brackets is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let unknown = || UnknownType(s.to_string());

        if let Some(inner) = compact
            .strip_prefix("vector<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return ScalarKind::from_name(inner)
                .map(ParamType::Vector)
                .ok_or_else(unknown);
        }
        if let Some(inner) = compact
            .strip_prefix("pair<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            let value = inner
                .strip_prefix("string,")
                .or_else(|| inner.strip_prefix("str,"))
                .ok_or_else(unknown)?;
            return ScalarKind::from_name(value)
                .map(ParamType::Pair)
                .ok_or_else(unknown);
        }
        ScalarKind::from_name(&compact)
            .map(ParamType::Scalar)
            .ok_or_else(unknown)
    }
}

impl serde::Serialize for ParamType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for ParamType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_canonical_names() {
        assert_eq!(ParamType::Scalar(ScalarKind::Int).to_string(), "int64");
        assert_eq!(
            ParamType::Vector(ScalarKind::Double).to_string(),
            "vector<double>"
        );
        assert_eq!(
            ParamType::Pair(ScalarKind::Bool).to_string(),
            "pair<string,bool>"
        );
    }

    #[test]
    fn parse_names_and_aliases() {
        assert_eq!(
            "long".parse::<ParamType>(),
            Ok(ParamType::Scalar(ScalarKind::Int))
        );
        assert_eq!(
            "vector< float64 >".parse::<ParamType>(),
            Ok(ParamType::Vector(ScalarKind::Double))
        );
        assert_eq!(
            "pair<string, int>".parse::<ParamType>(),
            Ok(ParamType::Pair(ScalarKind::Int))
        );
    }

    #[test]
    fn parse_every_display_name() {
        let kinds = [
            ScalarKind::Bool,
            ScalarKind::Int,
            ScalarKind::Float,
            ScalarKind::Double,
            ScalarKind::Text,
        ];
        for k in kinds {
            for t in [ParamType::Scalar(k), ParamType::Vector(k), ParamType::Pair(k)] {
                assert_eq!(t.to_string().parse::<ParamType>(), Ok(t));
            }
        }
    }

    #[test]
    fn reject_unknown_and_nested() {
        assert!("complex".parse::<ParamType>().is_err());
        assert!("vector<vector<int>>".parse::<ParamType>().is_err());
        assert!("pair<int,int>".parse::<ParamType>().is_err());
        assert!("vector<int".parse::<ParamType>().is_err());
    }

    #[test]
    fn serde_as_string() {
        let t: ParamType = serde_json::from_str("\"vector<bool>\"").unwrap();
        assert_eq!(t, ParamType::Vector(ScalarKind::Bool));
        assert_eq!(
            serde_json::to_string(&ParamType::Pair(ScalarKind::Text)).unwrap(),
            "\"pair<string,string>\""
        );
    }
}
