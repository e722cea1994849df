//! Error types for rule construction and validation.
//!
//! Validation is fail-fast: a call yields at most one [`ValidationError`].
//! `Display` prints only the human-readable message; callers branch on
//! [`ValidationError::kind`] instead of matching strings.
use std::fmt;

pub type Result<T, E = ValidationError> = std::result::Result<T, E>;

// ————————————————————————————————————————————————————————————————————————————
// PATHS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a field from the document root, e.g. `order.items[2].sku`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn root() -> Self { Self::default() }

    pub fn key(&self, key: &str) -> Self {
        let mut out = self.clone();
        out.0.push(PathSegment::Key(key.to_string()));
        out
    }

    pub fn index(&self, index: usize) -> Self {
        let mut out = self.clone();
        out.0.push(PathSegment::Index(index));
        out
    }

    pub fn segments(&self) -> &[PathSegment] { &self.0 }

    pub fn is_root(&self) -> bool { self.0.is_empty() }

    /// Number of nested records between the root and this location.
    pub fn depth(&self) -> usize { self.0.len() }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("$");
        }
        for (i, seg) in self.0.iter().enumerate() {
            match seg {
                PathSegment::Key(k) if i == 0 => write!(f, "{k}")?,
                PathSegment::Key(k) => write!(f, ".{k}")?,
                PathSegment::Index(n) => write!(f, "[{n}]")?,
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// VALIDATION ERRORS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// Top-level `data` or `rules` is not a mapping.
    Structural,
    UnexpectedKey,
    UnexpectedNestedValue,
    MissingRequired,
    InvalidType,
    InvalidValue,
    PatternMismatch,
    /// Nesting deeper than [`crate::ValidatorConfig::max_depth`].
    DepthLimitExceeded,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::UnexpectedKey => "unexpected_key",
            Self::UnexpectedNestedValue => "unexpected_nested_value",
            Self::MissingRequired => "missing_required",
            Self::InvalidType => "invalid_type",
            Self::InvalidValue => "invalid_value",
            Self::PatternMismatch => "pattern_mismatch",
            Self::DepthLimitExceeded => "depth_limit_exceeded",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Which top-level argument failed the mapping precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralTarget {
    Data,
    Rules,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub path: FieldPath,
    pub message: String,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, path: FieldPath, message: String) -> Self {
        Self { kind, path, message }
    }

    pub fn structural(target: StructuralTarget, path: FieldPath) -> Self {
        let message = match target {
            StructuralTarget::Data => "Validation array not found.",
            StructuralTarget::Rules => "Validation rules array not found.",
        };
        Self::new(ValidationErrorKind::Structural, path, message.to_string())
    }

    pub fn unexpected_key(key: &str, path: FieldPath) -> Self {
        Self::new(
            ValidationErrorKind::UnexpectedKey,
            path,
            format!("Unexpected key \"{key}\" found in array."),
        )
    }

    pub fn unexpected_nested_value(key: &str, path: FieldPath) -> Self {
        Self::new(
            ValidationErrorKind::UnexpectedNestedValue,
            path,
            format!("Unexpected array found for key: {key}."),
        )
    }

    pub fn missing_required(key: &str, path: FieldPath) -> Self {
        Self::new(
            ValidationErrorKind::MissingRequired,
            path,
            format!("Required value not found for key: {key}."),
        )
    }

    /// `expected` is the type token (`integer`, `decimal`, ...).
    pub fn invalid_type(expected: &str, value: &str, key: &str, path: FieldPath) -> Self {
        Self::new(
            ValidationErrorKind::InvalidType,
            path,
            format!("Invalid {expected} \"{value}\" for key: {key}."),
        )
    }

    pub fn unknown_type(token: &str, key: &str, path: FieldPath) -> Self {
        Self::new(
            ValidationErrorKind::InvalidType,
            path,
            format!("Invalid type \"{token}\" for key: {key}."),
        )
    }

    pub fn invalid_value(value: &str, key: &str, suggestion: Option<&str>, path: FieldPath) -> Self {
        let mut message = format!("Invalid value \"{value}\" for key: {key}.");
        if let Some(s) = suggestion {
            message.push_str(&format!(" Did you mean \"{s}\"?"));
        }
        Self::new(ValidationErrorKind::InvalidValue, path, message)
    }

    /// Failure against a built-in format; `label` reads e.g. `ISO 8601` or `MAC address`.
    pub fn format_mismatch(label: &str, value: &str, key: &str, path: FieldPath) -> Self {
        Self::new(
            ValidationErrorKind::PatternMismatch,
            path,
            format!("Invalid value \"{value}\" does not match {label} pattern for key: {key}."),
        )
    }

    pub fn pattern_mismatch(pattern: &str, value: &str, key: &str, path: FieldPath) -> Self {
        Self::new(
            ValidationErrorKind::PatternMismatch,
            path,
            format!("Invalid value \"{value}\" does not match pattern \"{pattern}\" for key: {key}."),
        )
    }

    pub fn depth_limit(max_depth: usize, path: FieldPath) -> Self {
        Self::new(
            ValidationErrorKind::DepthLimitExceeded,
            path.clone(),
            format!("Maximum nesting depth of {max_depth} exceeded at {path}."),
        )
    }
}

// ————————————————————————————————————————————————————————————————————————————
// RULE CONSTRUCTION ERRORS
// ————————————————————————————————————————————————————————————————————————————

/// A rule tree that cannot be turned into typed rules. Raised once, when the
/// tree is built, never while validating.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("rules must be a mapping of field names to rules")]
    NotAMapping,
    #[error("invalid required condition at {path}: {reason}")]
    InvalidRequired { path: String, reason: String },
    #[error("invalid allowed values at {path}: {reason}")]
    InvalidValues { path: String, reason: String },
    #[error("invalid pattern at {path}: {source}")]
    InvalidPattern {
        path: String,
        #[source]
        source: regex::Error,
    },
    #[error("{0}")]
    Deserialize(String),
}

/// Either failure a one-shot call on undecoded rules can produce.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
