//! Conversion of raw text into typed values.
//!
//! Rules:
//! - `bool` accepts exactly `true` and `false`.
//! - `int64` accepts an optional sign followed by ASCII digits. Syntax is
//!   checked before range, so out-of-range digits give `Overflow` and any
//!   stray character gives `Type`.
//! - `float`/`double` accept decimal or scientific notation. Narrowing to
//!   32 bits rounds silently; a finite literal that does not fit the target
//!   width is an `Overflow`. `inf`, `nan` and hex forms are rejected.
//! - `string` is returned unchanged.
//!
//! Vectors and pairs go through [`crate::token`] first and fail as a whole
//! if any element fails.

use crate::error::ParamError;
use crate::token::{split_pair, split_vector};
use crate::types::{ParamType, ScalarKind, Value};

/// Coerce a raw value to the given parameter type.
pub fn coerce(raw: &str, param_type: ParamType) -> Result<Value, ParamError> {
    tracing::trace!(raw, %param_type, "coercing");
    match param_type {
        ParamType::Scalar(kind) => coerce_scalar(raw, kind),
        ParamType::Vector(kind) => {
            let items = split_vector(raw)?
                .into_iter()
                .map(|token| coerce_scalar(token, kind))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::List(items))
        }
        ParamType::Pair(kind) => {
            let (key, value) = split_pair(raw)?;
            Ok(Value::Pair(
                key.to_string(),
                Box::new(coerce_scalar(value, kind)?),
            ))
        }
    }
}

/// Coerce a single token to a scalar kind.
pub fn coerce_scalar(text: &str, kind: ScalarKind) -> Result<Value, ParamError> {
    match kind {
        ScalarKind::Bool => parse_bool(text).map(Value::Bool),
        ScalarKind::Int => parse_int(text).map(Value::Int),
        ScalarKind::Float => parse_float(text).map(Value::Float),
        ScalarKind::Double => parse_double(text).map(Value::Double),
        ScalarKind::Text => Ok(Value::Text(text.to_string())),
    }
}

fn type_error(text: &str, kind: ScalarKind) -> ParamError {
    ParamError::Type {
        text: text.to_string(),
        target: kind.name().to_string(),
    }
}

fn overflow(text: &str, kind: ScalarKind) -> ParamError {
    ParamError::Overflow {
        text: text.to_string(),
        target: kind.name().to_string(),
    }
}

pub fn parse_bool(text: &str) -> Result<bool, ParamError> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(type_error(text, ScalarKind::Bool)),
    }
}

pub fn parse_int(text: &str) -> Result<i64, ParamError> {
    let digits = text
        .strip_prefix('+')
        .or_else(|| text.strip_prefix('-'))
        .unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(type_error(text, ScalarKind::Int));
    }
    // Only a range failure is possible once the syntax is known to be valid.
    text.parse::<i64>()
        .map_err(|_| overflow(text, ScalarKind::Int))
}

pub fn parse_float(text: &str) -> Result<f32, ParamError> {
    if !is_decimal_literal(text) {
        return Err(type_error(text, ScalarKind::Float));
    }
    let value = text
        .parse::<f32>()
        .map_err(|_| type_error(text, ScalarKind::Float))?;
    if value.is_infinite() {
        return Err(overflow(text, ScalarKind::Float));
    }
    Ok(value)
}

pub fn parse_double(text: &str) -> Result<f64, ParamError> {
    if !is_decimal_literal(text) {
        return Err(type_error(text, ScalarKind::Double));
    }
    let value = text
        .parse::<f64>()
        .map_err(|_| type_error(text, ScalarKind::Double))?;
    if value.is_infinite() {
        return Err(overflow(text, ScalarKind::Double));
    }
    Ok(value)
}

/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
fn is_decimal_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut pos = 0usize;

    let skip_sign = |pos: &mut usize| {
        if *pos < bytes.len() && (bytes[*pos] == b'+' || bytes[*pos] == b'-') {
            *pos += 1;
        }
    };
    let count_digits = |pos: &mut usize| {
        let start = *pos;
        while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
            *pos += 1;
        }
        *pos - start
    };

    skip_sign(&mut pos);
    let mut mantissa_digits = count_digits(&mut pos);
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        mantissa_digits += count_digits(&mut pos);
    }
    if mantissa_digits == 0 {
        return false;
    }
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        pos += 1;
        skip_sign(&mut pos);
        if count_digits(&mut pos) == 0 {
            return false;
        }
    }
    pos == bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kind_of(result: Result<Value, ParamError>) -> ErrorKind {
        result.unwrap_err().kind()
    }

    #[test]
    fn bool_literals_are_exact() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("false"), Ok(false));
        for bad in ["True", "FALSE", "1", "0", "yes", "", " true"] {
            assert!(parse_bool(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn int_beyond_32_bits() {
        assert_eq!(parse_int("8589934593"), Ok(8589934593));
        assert_eq!(parse_int("-8589934593"), Ok(-8589934593));
        assert_eq!(parse_int("+42"), Ok(42));
        assert_eq!(parse_int("9223372036854775807"), Ok(i64::MAX));
        assert_eq!(parse_int("-9223372036854775808"), Ok(i64::MIN));
    }

    #[test]
    fn int_syntax_errors_are_type_errors() {
        for bad in ["", "+", "-", "abc", "1.5", "1e3", "+-1", "--1", "1_000", " 1", "0x10"] {
            assert_eq!(
                kind_of(coerce_scalar(bad, ScalarKind::Int)),
                ErrorKind::Type,
                "input {:?}",
                bad
            );
        }
    }

    #[test]
    fn int_range_errors_are_overflow() {
        assert_eq!(
            kind_of(coerce_scalar("9223372036854775808", ScalarKind::Int)),
            ErrorKind::Overflow
        );
        assert_eq!(
            kind_of(coerce_scalar("-9223372036854775809", ScalarKind::Int)),
            ErrorKind::Overflow
        );
        // Syntax is checked first.
        assert_eq!(
            kind_of(coerce_scalar("99999999999999999999x", ScalarKind::Int)),
            ErrorKind::Type
        );
    }

    #[test]
    fn floats_accept_decimal_and_scientific() {
        assert_eq!(parse_float("1.25"), Ok(1.25f32));
        assert_eq!(parse_double("2.75"), Ok(2.75));
        assert_eq!(parse_double("-.5"), Ok(-0.5));
        assert_eq!(parse_double("3."), Ok(3.0));
        assert_eq!(parse_double("1e-3"), Ok(0.001));
        assert_eq!(parse_double("+6.02E23"), Ok(6.02e23));
        assert_eq!(parse_double("10"), Ok(10.0));
    }

    #[test]
    fn float_narrowing_rounds_silently() {
        assert_eq!(parse_float("0.1"), Ok(0.1f32));
        assert_eq!(parse_float("1e-50"), Ok(0.0));
    }

    #[test]
    fn float_rejects_non_numeric_forms() {
        for bad in ["", ".", "e5", "1e", "1e+", "inf", "NaN", "infinity", "0x1p3", "1.2.3", "1,5"] {
            assert_eq!(
                kind_of(coerce_scalar(bad, ScalarKind::Double)),
                ErrorKind::Type,
                "input {:?}",
                bad
            );
        }
    }

    #[test]
    fn float_out_of_range_is_overflow() {
        assert_eq!(
            kind_of(coerce_scalar("1e39", ScalarKind::Float)),
            ErrorKind::Overflow
        );
        assert_eq!(parse_double("1e39"), Ok(1e39));
        assert_eq!(
            kind_of(coerce_scalar("1e400", ScalarKind::Double)),
            ErrorKind::Overflow
        );
    }

    #[test]
    fn string_is_unmodified() {
        assert_eq!(
            coerce_scalar(" a b ", ScalarKind::Text),
            Ok(Value::Text(" a b ".to_string()))
        );
    }

    #[test]
    fn vector_matches_elementwise_coercion() {
        let parts = ["1.25", "2.75", "3.25"];
        let joined = parts.join(",");
        let expected: Vec<Value> = parts
            .iter()
            .map(|p| coerce_scalar(p, ScalarKind::Double).unwrap())
            .collect();
        assert_eq!(
            coerce(&joined, ParamType::Vector(ScalarKind::Double)),
            Ok(Value::List(expected))
        );
    }

    #[test]
    fn lone_value_is_one_element_vector() {
        assert_eq!(
            coerce("10", ParamType::Vector(ScalarKind::Int)),
            Ok(Value::List(vec![Value::Int(10)]))
        );
    }

    #[test]
    fn vector_fails_as_a_whole() {
        assert_eq!(
            kind_of(coerce("1,two,3", ParamType::Vector(ScalarKind::Int))),
            ErrorKind::Type
        );
        assert_eq!(
            kind_of(coerce("1,,3", ParamType::Vector(ScalarKind::Int))),
            ErrorKind::Format
        );
    }

    #[test]
    fn pair_coerces_value_part() {
        assert_eq!(
            coerce("key:true", ParamType::Pair(ScalarKind::Bool)),
            Ok(Value::Pair("key".into(), Box::new(Value::Bool(true))))
        );
        assert_eq!(
            coerce("key:8589934593", ParamType::Pair(ScalarKind::Int)),
            Ok(Value::Pair("key".into(), Box::new(Value::Int(8589934593))))
        );
        assert_eq!(
            coerce("t:12:30", ParamType::Pair(ScalarKind::Text)),
            Ok(Value::Pair("t".into(), Box::new(Value::Text("12:30".into()))))
        );
        assert_eq!(
            kind_of(coerce("key", ParamType::Pair(ScalarKind::Bool))),
            ErrorKind::Format
        );
        assert_eq!(
            kind_of(coerce("key:yes", ParamType::Pair(ScalarKind::Bool))),
            ErrorKind::Type
        );
    }

    #[test]
    fn display_round_trips() {
        let cases = [
            ("true", ParamType::Scalar(ScalarKind::Bool)),
            ("-17", ParamType::Scalar(ScalarKind::Int)),
            ("1.25", ParamType::Scalar(ScalarKind::Float)),
            ("0.1", ParamType::Scalar(ScalarKind::Double)),
            ("AAA,BBB,CC", ParamType::Vector(ScalarKind::Text)),
            ("1,2,8589934593", ParamType::Vector(ScalarKind::Int)),
            ("key:2.75", ParamType::Pair(ScalarKind::Double)),
        ];
        for (raw, t) in cases {
            let value = coerce(raw, t).unwrap();
            assert_eq!(value.to_string(), raw);
            assert_eq!(coerce(&value.to_string(), t), Ok(value));
        }
    }

    #[test]
    fn coercion_is_deterministic() {
        let t = ParamType::Vector(ScalarKind::Int);
        assert_eq!(coerce("1,x", t), coerce("1,x", t));
        assert_eq!(coerce("1,2", t), coerce("1,2", t));
    }
}
