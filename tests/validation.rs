use array_validation::{validate, validate_value, Error, RuleTree, ValidationErrorKind};
use serde_json::{json, Value};

fn rules(v: Value) -> RuleTree { RuleTree::from_value(&v).expect("rules parse") }

fn message(data: Value, r: &RuleTree) -> String { validate(&data, r).unwrap_err().message }

#[test]
fn empty_validation() {
    assert!(validate(&json!({}), &rules(json!({}))).is_ok());
}

#[test]
fn failed_preconditions() {
    for (data, r, expected) in [
        (json!(""), json!(""), "Validation array not found."),
        (json!({}), json!(""), "Validation rules array not found."),
        (json!(""), json!({}), "Validation array not found."),
    ] {
        match validate_value(&data, &r) {
            Err(Error::Validation(e)) => {
                assert_eq!(e.kind, ValidationErrorKind::Structural);
                assert_eq!(e.message, expected);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}

#[test]
fn required_true() {
    let mut raw = json!({
        "a": {"type": "string", "required": true},
        "b": {"type": "string"},
    });
    let r = rules(raw.clone());
    assert!(validate(&json!({"a": "Hello", "b": "World"}), &r).is_ok());
    assert_eq!(message(json!({"b": "Goodbye"}), &r), "Required value not found for key: a.");

    raw["a"]["required"] = json!("true");
    let r = rules(raw);
    assert_eq!(message(json!({"b": "Goodbye"}), &r), "Required value not found for key: a.");
}

#[test]
fn required_zero_is_present() {
    let r = rules(json!({"a": {"type": "decimal", "required": true}}));
    let err = validate(&json!({"a": 0}), &r).unwrap_err();
    // present, so requiredness passes and the strict type check is what fails
    assert_eq!(err.kind, ValidationErrorKind::InvalidType);
    assert!(validate(&json!({"a": 0.0}), &r).is_ok());
}

#[test]
fn values() {
    let r = rules(json!({"a": {"type": "string", "values": ["a", "b", "c"]}}));
    assert!(validate(&json!({"a": "b"}), &r).is_ok());

    let r = rules(json!({"a": {"type": "string", "values": ["cat", "dog"]}}));
    assert_eq!(message(json!({"a": "kat"}), &r), "Invalid value \"kat\" for key: a. Did you mean \"cat\"?");

    let r = rules(json!({"a": {"type": "string", "values": "b"}}));
    assert!(validate(&json!({"a": "b"}), &r).is_ok());
    assert!(validate(&json!({"a": "B"}), &r).is_ok());
}

#[test]
fn scalar_types() {
    let r = rules(json!({"a": {"type": "integer"}, "b": {"type": "integer"}}));
    assert!(validate(&json!({"a": 1, "b": 2}), &r).is_ok());
    assert_eq!(message(json!({"a": 1, "b": "one"}), &r), "Invalid integer \"one\" for key: b.");

    let r = rules(json!({"a": {"type": "decimal"}, "b": {"type": "decimal"}}));
    assert!(validate(&json!({"a": 1.0, "b": 2.1}), &r).is_ok());
    assert_eq!(message(json!({"a": 1.0, "b": "one point 2"}), &r), "Invalid decimal \"one point 2\" for key: b.");

    let r = rules(json!({"a": {"type": "string"}, "b": {"type": "string"}}));
    assert!(validate(&json!({"a": "Yes this is obviously", "b": "a string"}), &r).is_ok());
    assert_eq!(message(json!({"a": 1, "b": "one point 2"}), &r), "Invalid string \"1\" for key: a.");

    let r = rules(json!({"a": {"type": "boolean"}, "b": {"type": "boolean"}}));
    assert!(validate(&json!({"a": true, "b": false}), &r).is_ok());
    assert_eq!(message(json!({"a": 1, "b": "false"}), &r), "Invalid boolean \"1\" for key: a.");
}

#[test]
fn patterns() {
    let r = rules(json!({
        "a": {"type": "string", "pattern": "[A-Z]{2}"},
        "b": {"type": "string", "pattern": "ISO 8601"},
    }));
    assert!(validate(&json!({"a": "CA", "b": "2014-01-22T14:30:51-06:00"}), &r).is_ok());
    assert_eq!(
        message(json!({"a": "CAT"}), &r),
        "Invalid value \"CAT\" does not match pattern \"[A-Z]{2}\" for key: a."
    );
    assert_eq!(
        message(json!({"b": "2014-01-22"}), &r),
        "Invalid value \"2014-01-22\" does not match ISO 8601 pattern for key: b."
    );
    let err = validate(&json!({"b": "2015-02-29T00:00:00Z"}), &r).unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::PatternMismatch);
}

#[test]
fn unknown_type_is_rejected() {
    let r = rules(json!({"b": {"type": "datetime", "pattern": "ISO 8601"}}));
    let err = validate(&json!({"b": "2014-01-22T14:30:51-06:00"}), &r).unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::InvalidType);
    assert_eq!(err.message, "Invalid type \"datetime\" for key: b.");
}

#[test]
fn field_not_in_rules() {
    let r = rules(json!({"a": {"type": "string"}}));
    let err = validate(&json!({"a": "string", "b": "unexpected"}), &r).unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::UnexpectedKey);
    assert_eq!(err.message, "Unexpected key \"b\" found in array.");
}

#[test]
fn multidimensional() {
    let r = rules(json!({
        "a": {"type": "object", "fields": {"a": {"type": "string"}, "b": {"type": "string"}}},
        "b": {"type": "string"},
    }));
    assert!(validate(&json!({"a": {"a": "string", "b": "test"}, "b": "b"}), &r).is_ok());
    assert_eq!(message(json!({"b": {"a": "string", "b": "test"}}), &r), "Unexpected array found for key: b.");
}

#[test]
fn groups() {
    let r = rules(json!({"a": {"type": "group", "fields": {"b": {"type": "string"}}}}));
    assert!(validate(&json!({"a": [{"b": "Hello"}]}), &r).is_ok());
    assert!(validate(&json!({"a": [{"b": "Hello"}, {"b": "World"}]}), &r).is_ok());
    assert!(validate(&json!({"a": {"b": "Hello"}}), &r).is_ok());
}

#[test]
fn required_complex() {
    let r = rules(json!({
        "a": {"type": "string", "required": true},
        "b": {"type": "string", "required": {"a": "banana"}},
        "c": {"type": "string", "required": [
            {"a": "banana", "b": "orange"},
            {"a": "banana", "b": "carrot"},
            {"a": "pickle"},
            {"b": "banana"},
        ]},
    }));
    assert!(validate(&json!({"a": "apple"}), &r).is_ok());
    assert!(validate(&json!({"a": "banana", "b": "orange", "c": "other"}), &r).is_ok());
    assert_eq!(message(json!({"a": "banana", "c": "orange"}), &r), "Required value not found for key: b.");
    assert_eq!(message(json!({"a": "banana", "b": "carrot"}), &r), "Required value not found for key: c.");
    assert_eq!(message(json!({"b": "banana"}), &r), "Required value not found for key: a.");
    assert_eq!(message(json!({"a": "carrot", "b": "banana"}), &r), "Required value not found for key: c.");
}

#[test]
fn required_null() {
    for marker in [json!("null"), Value::Null] {
        let r = rules(json!({
            "a": {"type": "string", "required": {"b": marker}},
            "b": {"type": "string"},
            "c": {"type": "string"},
        }));
        assert!(validate(&json!({"b": "not a null value", "c": "no one cares about c"}), &r).is_ok());
        assert_eq!(message(json!({"c": "c is lonely"}), &r), "Required value not found for key: a.");
        assert_eq!(message(json!({}), &r), "Required value not found for key: a.");
    }
}

#[test]
fn null_values_bypass() {
    let r = rules(json!({"a": {"type": "string"}}));
    assert!(validate(&json!({"a": null}), &r).is_ok());
    assert!(validate(&json!({"a": "null"}), &r).is_ok());
}

#[test]
fn unrecognized_required_scalar_is_unconditional() {
    let r = rules(json!({"a": {"type": "string", "required": "banana"}}));
    assert_eq!(message(json!({"a": null}), &r), "Required value not found for key: a.");
}

#[test]
fn rule_trees_are_shared_across_threads() {
    let r = std::sync::Arc::new(rules(json!({"n": {"type": "integer", "required": true}})));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let r = r.clone();
            std::thread::spawn(move || {
                let data = if i % 2 == 0 { json!({"n": i}) } else { json!({}) };
                validate(&data, &r).is_ok()
            })
        })
        .collect();
    let verdicts: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(verdicts, vec![true, false, true, false, true, false, true, false]);
}
