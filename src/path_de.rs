use serde::de::DeserializeOwned;

use crate::error::RuleError;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, RuleError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(describe)
}

pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, RuleError> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize::<_, T>(de).map_err(describe)
}

/// Same as [`from_str_with_path`] for an already-decoded tree.
pub fn from_value_with_path<T: DeserializeOwned>(value: &serde_json::Value) -> Result<T, RuleError> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(describe)
}

fn describe(err: serde_path_to_error::Error<serde_json::Error>) -> RuleError {
    let path = err.path().to_string();
    RuleError::Deserialize(format!("at JSON path {path} → {}", err.into_inner()))
}
