//! Built-in named formats and raw pattern matching.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::Pattern;

// ------------------------------- Formats --------------------------------- //

/// Calendar-aware ISO 8601 date-time with a mandatory `Z` or `±HH:MM` offset.
/// Day ranges are per month; Feb 29 only in leap years (incl. the /400 rule).
static ISO8601: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:",
        r"[1-9][0-9]{3}-(?:(?:0[1-9]|1[0-2])-(?:0[1-9]|1[0-9]|2[0-8])|(?:0[13-9]|1[0-2])-(?:29|30)|(?:0[13578]|1[02])-31)",
        r"|(?:[1-9][0-9](?:0[48]|[2468][048]|[13579][26])|(?:[2468][048]|[13579][26])00)-02-29",
        r")T(?:[01][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9](?:Z|[+-][01][0-9]:[0-5][0-9])$",
    ))
    .expect("static ISO 8601 regex")
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
    ))
    .expect("static email regex")
});

/// `AA:BB:CC:DD:EE:FF`, `AA-BB-CC-DD-EE-FF` or Cisco `AABB.CCDD.EEFF`.
static MAC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:(?:[0-9A-Fa-f]{2}:){5}[0-9A-Fa-f]{2}",
        r"|(?:[0-9A-Fa-f]{2}-){5}[0-9A-Fa-f]{2}",
        r"|(?:[0-9A-Fa-f]{4}\.){2}[0-9A-Fa-f]{4})$",
    ))
    .expect("static MAC regex")
});

pub fn is_iso8601(s: &str) -> bool { ISO8601.is_match(s) }

pub fn is_email(s: &str) -> bool { s.len() <= 254 && EMAIL.is_match(s) }

pub fn is_mac(s: &str) -> bool { MAC.is_match(s) }

/// IPv4 or IPv6 address.
pub fn is_ip(s: &str) -> bool { s.parse::<std::net::IpAddr>().is_ok() }

/// Absolute URL with a scheme; hierarchical schemes also need a host.
pub fn is_url(s: &str) -> bool {
    let unsafe_char = |c: char| {
        !c.is_ascii_graphic() || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '\\' | '^' | '`')
    };
    if s.is_empty() || s.chars().any(unsafe_char) {
        return false;
    }
    match url::Url::parse(s) {
        Ok(u) => u.cannot_be_a_base() || u.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

// ------------------------------- Dispatch -------------------------------- //

impl Pattern {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Pattern::Iso8601 => is_iso8601(value),
            Pattern::Url => is_url(value),
            Pattern::Email => is_email(value),
            Pattern::Ip => is_ip(value),
            Pattern::Mac => is_mac(value),
            Pattern::Regex { compiled, .. } => compiled.is_match(value),
        }
    }

    /// Human label of a named format; `None` for raw regexes.
    pub fn format_label(&self) -> Option<&'static str> {
        match self {
            Pattern::Iso8601 => Some("ISO 8601"),
            Pattern::Url => Some("URL"),
            Pattern::Email => Some("email"),
            Pattern::Ip => Some("IP address"),
            Pattern::Mac => Some("MAC address"),
            Pattern::Regex { .. } => None,
        }
    }
}
