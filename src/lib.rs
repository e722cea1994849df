//! Recursive structural validation of decoded key-value trees.
//!
//! A rule tree maps field names to rules (`type`, `fields`, `required`,
//! `values`, `pattern`). [`validate`] walks a data mapping against it:
//! requiredness is decided for every rule first, then every data key is
//! matched to a rule (unknown keys are rejected) and either recursed into or
//! checked as a scalar. The first violation ends the call.
//!
//! ```
//! use array_validation::{validate, RuleTree, ValidationErrorKind};
//! use serde_json::json;
//!
//! let rules = RuleTree::from_value(&json!({
//!     "kind": {"type": "string", "values": ["cat", "dog"], "required": true},
//!     "born": {"type": "string", "pattern": "ISO8601"},
//! })).unwrap();
//!
//! assert!(validate(&json!({"kind": "cat"}), &rules).is_ok());
//! let err = validate(&json!({"kind": "kat"}), &rules).unwrap_err();
//! assert_eq!(err.kind, ValidationErrorKind::InvalidValue);
//! assert!(err.to_string().ends_with("Did you mean \"cat\"?"));
//! ```
pub mod error;
pub mod field;
pub mod format;
pub mod jq_exec;
pub mod node;
pub mod path_de;
pub mod required;
pub mod rules;
pub mod suggest;
pub mod validator;

pub use error::{Error, FieldPath, PathSegment, Result, RuleError, ValidationError, ValidationErrorKind};
pub use node::{Node, Presence};
pub use rules::{AllowedValues, Condition, Expected, Pattern, RequiredSpec, Rule, RuleKind, RuleTree};
pub use validator::{validate, validate_field, validate_value, Validator, ValidatorConfig};
