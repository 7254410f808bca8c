//! Splitting raw values into tokens for vector and pair parameters.
//!
//! There is no escaping: a comma always separates vector elements and the
//! first colon always separates a pair's key from its value.

use crate::error::ParamError;

/// Separator between vector elements.
pub const VECTOR_SEPARATOR: char = ',';
/// Separator between a pair's key and value.
pub const PAIR_SEPARATOR: char = ':';

/// Split a vector value on commas, trimming each element.
///
/// A value without commas is a single element. Every element must be
/// non-empty after trimming, so `""`, `"1,"`, `",1"` and `"1,,2"` all fail.
pub fn split_vector(raw: &str) -> Result<Vec<&str>, ParamError> {
    let mut tokens = Vec::new();
    for (index, piece) in raw.split(VECTOR_SEPARATOR).enumerate() {
        let token = piece.trim();
        if token.is_empty() {
            return Err(ParamError::EmptyToken {
                text: raw.to_string(),
                index,
            });
        }
        tokens.push(token);
    }
    Ok(tokens)
}

/// Split a pair value at its first colon. Neither side is trimmed; any
/// further colons belong to the value.
pub fn split_pair(raw: &str) -> Result<(&str, &str), ParamError> {
    raw.split_once(PAIR_SEPARATOR)
        .ok_or_else(|| ParamError::MissingSeparator {
            text: raw.to_string(),
            separator: PAIR_SEPARATOR,
        })
}
