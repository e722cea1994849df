//! Allowed-value checks with nearest-match suggestions.
use crate::error::{FieldPath, Result, ValidationError};
use crate::rules::AllowedValues;

/// Accept `value` if the allowed set admits it; otherwise fail with the
/// closest candidate (by edit distance) appended to the message.
pub fn validate_values(value: &str, allowed: &AllowedValues, key: &str, path: &FieldPath) -> Result<()> {
    let candidates: &[String] = match allowed {
        AllowedValues::One(only) => {
            if value.to_lowercase() == only.to_lowercase() {
                return Ok(());
            }
            &[]
        }
        AllowedValues::AnyOf(list) => {
            if list.iter().any(|c| c == value) {
                return Ok(());
            }
            list
        }
    };
    let suggestion = closest_match(value, candidates);
    tracing::trace!(%path, value, ?suggestion, "value outside allowed set");
    Err(ValidationError::invalid_value(value, key, suggestion, path.clone()))
}

/// Candidate with the smallest Levenshtein distance; ties go to the one
/// declared first.
pub fn closest_match<'a>(needle: &str, candidates: &'a [String]) -> Option<&'a str> {
    let mut ranked: Vec<(usize, &String)> = candidates
        .iter()
        .map(|c| (strsim::levenshtein(needle, c), c))
        .collect();
    // stable: equal distances keep declaration order
    ranked.sort_by_key(|(distance, _)| *distance);
    ranked.first().map(|(_, c)| c.as_str())
}
