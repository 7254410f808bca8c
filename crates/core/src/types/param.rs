//! Binding between Rust types and parameter types.

use super::{ParamType, ScalarKind, Value};
use crate::error::ParamError;

/// A Rust type that can be defined as, and read back from, a parameter.
///
/// `param_type` is what `define::<T>` records for the name; `from_value`
/// narrows a coerced [`Value`] of that type to `T`. Several Rust types may
/// share one parameter type (`i32` and `i64` are both `int64`), in which case
/// `from_value` performs a checked conversion.
pub trait Param: Sized {
    fn param_type() -> ParamType;

    fn from_value(value: Value) -> Result<Self, ParamError>;

    fn into_value(self) -> Value;
}

/// A [`Param`] that may appear as a vector element or as a pair value.
pub trait ScalarParam: Param {
    fn scalar_kind() -> ScalarKind;
}

fn mismatch<T: Param>(value: &Value) -> ParamError {
    ParamError::Type {
        text: value.to_string(),
        target: T::param_type().to_string(),
    }
}

macro_rules! scalar_param {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl Param for $ty {
            fn param_type() -> ParamType {
                ParamType::Scalar(ScalarKind::$kind)
            }

            fn from_value(value: Value) -> Result<Self, ParamError> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(mismatch::<Self>(&other)),
                }
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }

        impl ScalarParam for $ty {
            fn scalar_kind() -> ScalarKind {
                ScalarKind::$kind
            }
        }
    };
}

scalar_param!(bool, Bool, Bool);
scalar_param!(i64, Int, Int);
scalar_param!(f32, Float, Float);
scalar_param!(f64, Double, Double);
scalar_param!(String, Text, Text);

/// `i32` is stored as `int64`; reading narrows with a range check.
impl Param for i32 {
    fn param_type() -> ParamType {
        ParamType::Scalar(ScalarKind::Int)
    }

    fn from_value(value: Value) -> Result<Self, ParamError> {
        match value {
            Value::Int(v) => i32::try_from(v).map_err(|_| ParamError::Overflow {
                text: v.to_string(),
                target: "int32".to_string(),
            }),
            other => Err(mismatch::<Self>(&other)),
        }
    }

    fn into_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ScalarParam for i32 {
    fn scalar_kind() -> ScalarKind {
        ScalarKind::Int
    }
}

impl<T: ScalarParam> Param for Vec<T> {
    fn param_type() -> ParamType {
        ParamType::Vector(T::scalar_kind())
    }

    fn from_value(value: Value) -> Result<Self, ParamError> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(mismatch::<Self>(&other)),
        }
    }

    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(T::into_value).collect())
    }
}

impl<T: ScalarParam> Param for (String, T) {
    fn param_type() -> ParamType {
        ParamType::Pair(T::scalar_kind())
    }

    fn from_value(value: Value) -> Result<Self, ParamError> {
        match value {
            Value::Pair(key, inner) => Ok((key, T::from_value(*inner)?)),
            other => Err(mismatch::<Self>(&other)),
        }
    }

    fn into_value(self) -> Value {
        Value::Pair(self.0, Box::new(self.1.into_value()))
    }
}
