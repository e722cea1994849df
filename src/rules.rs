//! Typed rule tree.
//!
//! Rule files are decoded into a loose raw form first (serde), then converted
//! once into the typed shapes below. Validation never re-reads raw JSON: the
//! `required` mini-language, the allowed-values set and the pattern are all
//! resolved here, and raw regexes are compiled here.
use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::RuleError;
use crate::node::is_null_like;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Mapping from field name to rule, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct RuleTree {
    rules: IndexMap<String, Rule>,
}

#[derive(Debug, Clone, Default)]
pub struct Rule {
    pub kind: Option<RuleKind>,
    pub fields: Option<RuleTree>,
    pub required: Option<RequiredSpec>,
    pub values: Option<AllowedValues>,
    pub pattern: Option<Pattern>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    Integer,
    Decimal,
    String,
    Boolean,
    /// One nested record (`array`, also spelled `object`).
    Array,
    /// A list of records, or a single bare record.
    Group,
    /// Unrecognized token, kept so validation can report it.
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequiredSpec {
    Always,
    /// Required when the named field is absent or null-like.
    EqualsNull(String),
    /// Required when any condition holds.
    AnyOf(Vec<Condition>),
}

/// AND-group of `(field, expected)` pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Condition {
    pub pairs: Vec<(String, Expected)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    /// Holds when the named field is absent or null-like.
    Null,
    /// Holds when the named field is present and loosely equal.
    Value(Value),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedValues {
    /// Case-insensitive single value.
    One(String),
    /// Exact match against any entry; order is kept for suggestions.
    AnyOf(Vec<String>),
}

#[derive(Debug, Clone)]
pub enum Pattern {
    Iso8601,
    Url,
    Email,
    Ip,
    Mac,
    Regex { source: String, compiled: Regex },
}

// ————————————————————————————————————————————————————————————————————————————
// RAW FORM
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Deserialize)]
struct RawRule {
    #[serde(rename = "type")]
    kind: Option<String>,
    fields: Option<IndexMap<String, RawRule>>,
    required: Option<Value>,
    values: Option<Value>,
    pattern: Option<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl RuleTree {
    pub fn new() -> Self { Self::default() }

    pub fn from_value(value: &Value) -> Result<Self, RuleError> {
        if !value.is_object() {
            return Err(RuleError::NotAMapping);
        }
        let raw: IndexMap<String, RawRule> = crate::path_de::from_value_with_path(value)?;
        Self::from_raw(raw, "")
    }

    pub fn from_json_str(src: &str) -> Result<Self, RuleError> {
        let raw: IndexMap<String, RawRule> = crate::path_de::from_str_with_path(src)?;
        Self::from_raw(raw, "")
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, RuleError> {
        let raw: IndexMap<String, RawRule> = crate::path_de::from_slice_with_path(bytes)?;
        Self::from_raw(raw, "")
    }

    fn from_raw(raw: IndexMap<String, RawRule>, prefix: &str) -> Result<Self, RuleError> {
        let mut rules = IndexMap::with_capacity(raw.len());
        for (key, raw_rule) in raw {
            let path = if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
            let rule = Rule::from_raw(raw_rule, &path)?;
            rules.insert(key, rule);
        }
        Ok(Self { rules })
    }

    /// Add or replace a rule.
    pub fn insert(&mut self, key: impl Into<String>, rule: Rule) -> Option<Rule> {
        self.rules.insert(key.into(), rule)
    }

    pub fn get(&self, key: &str) -> Option<&Rule> { self.rules.get(key) }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn len(&self) -> usize { self.rules.len() }

    pub fn is_empty(&self) -> bool { self.rules.is_empty() }
}

impl Rule {
    fn from_raw(raw: RawRule, path: &str) -> Result<Self, RuleError> {
        let fields = match raw.fields {
            Some(f) => Some(RuleTree::from_raw(f, &format!("{path}.fields"))?),
            None => None,
        };
        let required = match raw.required {
            Some(r) => RequiredSpec::parse(&r, path)?,
            None => None,
        };
        let values = match raw.values {
            Some(v) => Some(AllowedValues::parse(&v, path)?),
            None => None,
        };
        let pattern = match raw.pattern {
            Some(p) => Some(Pattern::parse(&p, path)?),
            None => None,
        };
        Ok(Rule {
            kind: raw.kind.as_deref().map(RuleKind::parse),
            fields,
            required,
            values,
            pattern,
        })
    }

    /// Nested schema for `array`/`group` rules, if both are declared.
    pub fn nested(&self) -> Option<(&RuleKind, &RuleTree)> {
        match (&self.kind, &self.fields) {
            (Some(kind), Some(fields)) if kind.is_nesting() => Some((kind, fields)),
            _ => None,
        }
    }
}

impl RuleKind {
    pub fn parse(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "integer" => Self::Integer,
            "decimal" => Self::Decimal,
            "string" => Self::String,
            "boolean" => Self::Boolean,
            "array" | "object" => Self::Array,
            "group" => Self::Group,
            _ => Self::Unknown(token.to_string()),
        }
    }

    pub fn is_nesting(&self) -> bool { matches!(self, Self::Array | Self::Group) }

    pub fn token(&self) -> &str {
        match self {
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Group => "group",
            Self::Unknown(t) => t,
        }
    }
}

impl RequiredSpec {
    /// `None` means the rule carries no requirement at all.
    pub fn parse(raw: &Value, path: &str) -> Result<Option<Self>, RuleError> {
        match raw {
            Value::Null | Value::Bool(false) => Ok(None),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(None),
            Value::Object(map) => {
                if map.len() == 1 {
                    if let Some((field, expected)) = map.iter().next() {
                        if is_null_like(expected) {
                            return Ok(Some(Self::EqualsNull(field.clone())));
                        }
                    }
                }
                // Top-level pairs are alternatives, one condition each.
                let conditions = map
                    .iter()
                    .map(|(field, expected)| {
                        let expected = Expected::parse(expected, path)?;
                        Ok::<_, RuleError>(Condition { pairs: vec![(field.clone(), expected)] })
                    })
                    .collect::<Result<Vec<_>, RuleError>>()?;
                Ok(Some(Self::AnyOf(conditions)))
            }
            Value::Array(items) => {
                let conditions = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| Condition::parse(item, &format!("{path}.required[{i}]")))
                    .collect::<Result<Vec<_>, RuleError>>()?;
                Ok(Some(Self::AnyOf(conditions)))
            }
            // `true`, "true" and any other scalar: unconditional.
            _ => Ok(Some(Self::Always)),
        }
    }
}

impl Condition {
    fn parse(raw: &Value, path: &str) -> Result<Self, RuleError> {
        let map = raw.as_object().ok_or_else(|| RuleError::InvalidRequired {
            path: path.to_string(),
            reason: "each condition must be a mapping of field names to expected values".to_string(),
        })?;
        let pairs = map
            .iter()
            .map(|(field, expected)| Ok::<_, RuleError>((field.clone(), Expected::parse(expected, path)?)))
            .collect::<Result<Vec<_>, RuleError>>()?;
        Ok(Condition { pairs })
    }
}

impl Expected {
    fn parse(raw: &Value, path: &str) -> Result<Self, RuleError> {
        if is_null_like(raw) {
            return Ok(Self::Null);
        }
        if raw.is_array() || raw.is_object() {
            return Err(RuleError::InvalidRequired {
                path: path.to_string(),
                reason: format!("expected value must be a scalar or null, found {raw}"),
            });
        }
        Ok(Self::Value(raw.clone()))
    }
}

impl AllowedValues {
    fn parse(raw: &Value, path: &str) -> Result<Self, RuleError> {
        match raw {
            Value::Array(items) => items
                .iter()
                .map(|item| scalar_text(item, path))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::AnyOf),
            other => scalar_text(other, path).map(Self::One),
        }
    }
}

fn scalar_text(v: &Value, path: &str) -> Result<String, RuleError> {
    match v {
        Value::Array(_) | Value::Object(_) => Err(RuleError::InvalidValues {
            path: path.to_string(),
            reason: format!("allowed values must be scalars, found {v}"),
        }),
        other => Ok(crate::node::render(other)),
    }
}

impl Pattern {
    pub fn parse(raw: &str, path: &str) -> Result<Self, RuleError> {
        let pattern = match raw.to_uppercase().as_str() {
            "ISO8601" | "ISO 8601" => Self::Iso8601,
            "URL" => Self::Url,
            "EMAIL" => Self::Email,
            "IP" => Self::Ip,
            "MAC" => Self::Mac,
            _ => {
                let compiled = Regex::new(&format!("^(?:{raw})$")).map_err(|source| {
                    RuleError::InvalidPattern { path: path.to_string(), source }
                })?;
                Self::Regex { source: raw.to_string(), compiled }
            }
        };
        Ok(pattern)
    }
}
