//! Recursive validation of a data tree against a rule tree.
use serde_json::Value;

use crate::error::{Error, FieldPath, Result, StructuralTarget, ValidationError};
use crate::field;
use crate::node::is_container;
use crate::required::check_required;
use crate::rules::{Rule, RuleKind, RuleTree};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy)]
pub struct ValidatorConfig {
    /// Deepest path (keys plus list indices) the walk will enter.
    pub max_depth: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self { Self { max_depth: 256 } }
}

/// Stateless apart from its config; one instance can serve any number of
/// concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Validator {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(config: ValidatorConfig) -> Self { Self { config } }

    pub fn config(&self) -> &ValidatorConfig { &self.config }

    /// Validate `data` (must be a mapping) against `rules`, stopping at the
    /// first violation.
    ///
    /// Recursion only follows `fields` declared in `rules`, so the rule tree
    /// bounds the walk; `max_depth` caps it further.
    pub fn validate(&self, data: &Value, rules: &RuleTree) -> Result<()> {
        tracing::debug!(rules = rules.len(), "validating document");
        let outcome = self.validate_record(data, rules, &FieldPath::root());
        match &outcome {
            Ok(()) => tracing::debug!("document valid"),
            Err(e) => tracing::debug!(kind = %e.kind, path = %e.path, "document invalid"),
        }
        outcome
    }

    /// Validate one detached field with the same semantics `validate` uses
    /// for the value under `key`.
    pub fn validate_field(&self, value: &Value, rule: &Rule, key: &str) -> Result<()> {
        self.validate_entry(value, rule, key, &FieldPath::root().key(key))
    }

    fn validate_record(&self, data: &Value, rules: &RuleTree, path: &FieldPath) -> Result<()> {
        if path.depth() > self.config.max_depth {
            return Err(ValidationError::depth_limit(self.config.max_depth, path.clone()));
        }
        let Value::Object(map) = data else {
            return Err(ValidationError::structural(StructuralTarget::Data, path.clone()));
        };

        check_required(map, rules, path)?;

        for (key, value) in map {
            let here = path.key(key);
            let rule = rules
                .get(key)
                .ok_or_else(|| ValidationError::unexpected_key(key, here.clone()))?;
            self.validate_entry(value, rule, key, &here)?;
        }
        Ok(())
    }

    /// Scalars go to the field checks; containers recurse or are rejected.
    fn validate_entry(&self, value: &Value, rule: &Rule, key: &str, path: &FieldPath) -> Result<()> {
        if !is_container(value) {
            return field::validate_field(value, rule, key, path);
        }
        match rule.nested() {
            Some((RuleKind::Group, fields)) => self.validate_group(value, fields, path),
            Some((_, fields)) => self.validate_record(value, fields, path),
            None => Err(ValidationError::unexpected_nested_value(key, path.clone())),
        }
    }

    /// A group is a list of records, or one bare record.
    fn validate_group(&self, value: &Value, fields: &RuleTree, path: &FieldPath) -> Result<()> {
        match value {
            Value::Array(records) => {
                for (i, record) in records.iter().enumerate() {
                    self.validate_record(record, fields, &path.index(i))?;
                }
                Ok(())
            }
            record => self.validate_record(record, fields, path),
        }
    }
}

// ------------------------------- Front API -------------------------------- //

pub fn validate(data: &Value, rules: &RuleTree) -> Result<()> {
    Validator::default().validate(data, rules)
}

pub fn validate_field(value: &Value, rule: &Rule, key: &str) -> Result<()> {
    Validator::default().validate_field(value, rule, key)
}

/// One-shot form taking an undecoded rule tree. The mapping preconditions
/// are checked data-first, then the rules are built.
pub fn validate_value(data: &Value, rules: &Value) -> Result<(), Error> {
    if !data.is_object() {
        return Err(ValidationError::structural(StructuralTarget::Data, FieldPath::root()).into());
    }
    if !rules.is_object() {
        return Err(ValidationError::structural(StructuralTarget::Rules, FieldPath::root()).into());
    }
    let rules = RuleTree::from_value(rules)?;
    validate(data, &rules)?;
    Ok(())
}
