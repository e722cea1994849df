//! Conditional requiredness.
//!
//! Runs over the whole rule set (not the data keys) so that fields missing
//! from the data entirely are still caught. A field that is present is never
//! checked; a missing or null-like one is required when its condition holds.
use crate::error::{FieldPath, Result, ValidationError};
use crate::node::{loose_eq, Mapping, Presence};
use crate::rules::{Condition, Expected, RequiredSpec, RuleTree};

pub fn check_required(data: &Mapping, rules: &RuleTree, path: &FieldPath) -> Result<()> {
    for (key, rule) in rules.iter() {
        let Some(requirement) = &rule.required else { continue };
        if !Presence::of(data, key).is_missing() {
            continue;
        }
        if is_required(data, requirement) {
            tracing::debug!(%path, key, "required field missing");
            return Err(ValidationError::missing_required(key, path.key(key)));
        }
    }
    Ok(())
}

/// Evaluate a requirement against the sibling fields in `data`.
pub fn is_required(data: &Mapping, requirement: &RequiredSpec) -> bool {
    match requirement {
        RequiredSpec::Always => true,
        RequiredSpec::EqualsNull(other) => Presence::of(data, other).is_missing(),
        RequiredSpec::AnyOf(conditions) => conditions.iter().any(|c| condition_holds(data, c)),
    }
}

fn condition_holds(data: &Mapping, condition: &Condition) -> bool {
    condition.pairs.iter().all(|(field, expected)| {
        let presence = Presence::of(data, field);
        match expected {
            Expected::Null => presence.is_missing(),
            Expected::Value(want) => match presence {
                Presence::Present(have) => loose_eq(have, want),
                Presence::Absent | Presence::NullLike => false,
            },
        }
    })
}
