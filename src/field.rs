//! Single-field checks: strict type, allowed values, pattern.
use serde_json::Value;

use crate::error::{FieldPath, Result, ValidationError};
use crate::node::{is_null_like, render};
use crate::rules::{Pattern, Rule, RuleKind};

/// Check one scalar against its rule.
///
/// Null and the literal string `"null"` pass unconditionally. Nesting kinds
/// (`array`, `group`) carry no scalar type check of their own.
pub fn validate_field(value: &Value, rule: &Rule, key: &str, path: &FieldPath) -> Result<()> {
    if is_null_like(value) {
        return Ok(());
    }
    tracing::trace!(%path, kind = ?rule.kind, "checking field");

    if let Some(kind) = &rule.kind {
        check_type(value, kind, key, path)?;
    }

    let text = render(value);
    if let Some(allowed) = &rule.values {
        crate::suggest::validate_values(&text, allowed, key, path)?;
    }
    if let Some(pattern) = &rule.pattern {
        check_pattern(&text, pattern, key, path)?;
    }
    Ok(())
}

fn check_type(value: &Value, kind: &RuleKind, key: &str, path: &FieldPath) -> Result<()> {
    let ok = match kind {
        RuleKind::Integer => value.is_i64() || value.is_u64(),
        RuleKind::Decimal => value.is_f64(),
        RuleKind::String => value.is_string(),
        RuleKind::Boolean => value.is_boolean(),
        RuleKind::Array | RuleKind::Group => true,
        RuleKind::Unknown(token) => {
            return Err(ValidationError::unknown_type(token, key, path.clone()));
        }
    };
    if ok {
        Ok(())
    } else {
        Err(ValidationError::invalid_type(kind.token(), &render(value), key, path.clone()))
    }
}

fn check_pattern(text: &str, pattern: &Pattern, key: &str, path: &FieldPath) -> Result<()> {
    if pattern.matches(text) {
        return Ok(());
    }
    Err(match pattern {
        Pattern::Regex { source, .. } => ValidationError::pattern_mismatch(source, text, key, path.clone()),
        named => {
            let label = named.format_label().unwrap_or_default();
            ValidationError::format_mismatch(label, text, key, path.clone())
        }
    })
}
