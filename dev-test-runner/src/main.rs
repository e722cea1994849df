//! Fixture runner: every `*.json` file under the fixture directory holds a
//! list of cases `{ name, rules, data, expect }`; each case is validated and
//! its verdict compared to `expect`.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use array_validation::{validate_value, Error};
use colored::Colorize;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    rules: Value,
    data: Value,
    expect: Expect,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Expect {
    ok: bool,
    kind: Option<String>,
    message: Option<String>,
}

fn load_cases(path: &Path) -> Result<Vec<Case>> {
    let src = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let de = &mut serde_json::Deserializer::from_str(&src);
    serde_path_to_error::deserialize(de).map_err(|err| {
        let at = err.path().to_string();
        anyhow::anyhow!("{} at JSON path {at} → {}", path.display(), err.into_inner())
    })
}

/// `None` when the verdict matches, otherwise a description of the mismatch.
fn run_case(case: &Case) -> Option<String> {
    let outcome = validate_value(&case.data, &case.rules);
    match (&outcome, case.expect.ok) {
        (Ok(()), true) => None,
        (Ok(()), false) => Some("expected a failure, validation passed".to_string()),
        (Err(Error::Rule(e)), _) => Some(format!("rules did not build: {e}")),
        (Err(Error::Validation(e)), true) => Some(format!("expected success, got: {e}")),
        (Err(Error::Validation(e)), false) => {
            if let Some(kind) = &case.expect.kind {
                if e.kind.as_str() != kind {
                    return Some(format!("expected kind {kind}, got {}", e.kind));
                }
            }
            match &case.expect.message {
                Some(m) if *m != e.message => Some(format!("expected message {m:?}, got {:?}", e.message)),
                _ => None,
            }
        }
    }
}

fn fixture_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join("*.json");
    let pattern = pattern.to_string_lossy();
    let mut files = glob::glob(&pattern)
        .with_context(|| format!("bad fixture pattern {pattern}"))?
        .collect::<Result<Vec<PathBuf>, _>>()
        .with_context(|| format!("reading fixture directory {}", dir.display()))?;
    files.sort();
    Ok(files)
}

fn run(dir: &Path) -> Result<usize> {
    let mut failures = 0;
    for file in fixture_files(dir)? {
        eprintln!("—— {} ——", file.display());
        for case in load_cases(&file)? {
            match run_case(&case) {
                None => eprintln!("{} {}", "✅".green(), case.name),
                Some(why) => {
                    failures += 1;
                    eprintln!("{} {}: {why}", "❌".red(), case.name);
                }
            }
        }
    }
    Ok(failures)
}

fn main() -> ExitCode {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures")));
    match run(&dir) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(n) => {
            eprintln!("{n} case(s) failed");
            ExitCode::from(1)
        }
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::from(2)
        }
    }
}
