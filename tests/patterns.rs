use array_validation::{validate, RuleTree, ValidationErrorKind};
use serde_json::{json, Value};

fn check(pattern: &str, value: &str) -> Result<(), String> {
    let rules = RuleTree::from_value(&json!({"a": {"type": "string", "pattern": pattern}})).unwrap();
    validate(&json!({ "a": value }), &rules).map_err(|e| {
        assert_eq!(e.kind, ValidationErrorKind::PatternMismatch);
        e.message
    })
}

#[test]
fn url() {
    assert!(check("URL", "http://www.google.com/").is_ok());
    let bad = "<a href=\"http://www.google.com/\">Google</a>";
    assert_eq!(
        check("URL", bad).unwrap_err(),
        format!("Invalid value \"{bad}\" does not match URL pattern for key: a.")
    );
}

#[test]
fn email() {
    assert!(check("EMAIL", "noreply@domain.com").is_ok());
    assert_eq!(
        check("email", "noreply AT domain.com").unwrap_err(),
        "Invalid value \"noreply AT domain.com\" does not match email pattern for key: a."
    );
}

#[test]
fn mac() {
    assert!(check("MAC", "AB:CD:EF:12:34:56").is_ok());
    assert!(check("MAC", "AB-CD-EF-12-34-56").is_ok());
    assert_eq!(
        check("MAC", "127.0.0.1").unwrap_err(),
        "Invalid value \"127.0.0.1\" does not match MAC address pattern for key: a."
    );
}

#[test]
fn ip() {
    for ok in ["127.0.0.1", "255.255.255.255", "0.0.0.0", "2001:0db8:85a3:0000:0000:8a2e:0370:7334"] {
        assert!(check("IP", ok).is_ok(), "{ok}");
    }
    assert_eq!(
        check("IP", "127/0/0/1").unwrap_err(),
        "Invalid value \"127/0/0/1\" does not match IP address pattern for key: a."
    );
}

#[test]
fn iso8601() {
    assert!(check("ISO8601", "2014-01-22T14:30:51-06:00").is_ok());
    assert!(check("iso8601", "2016-02-29T12:00:00Z").is_ok());
    assert!(check("ISO8601", "2014-01-22").is_err());
    assert!(check("ISO8601", "2015-02-29T00:00:00Z").is_err());
}

#[test]
fn raw_regex_is_fully_anchored() {
    assert!(check("[a-z]+|[0-9]+", "abc").is_ok());
    assert!(check("[a-z]+|[0-9]+", "abc123").is_err());
    assert!(check("b", "abc").is_err());
}

#[test]
fn null_bypasses_patterns() {
    let rules = RuleTree::from_value(&json!({"a": {"pattern": "MAC"}})).unwrap();
    for v in [Value::Null, json!("null")] {
        assert!(validate(&json!({ "a": v }), &rules).is_ok());
    }
}
