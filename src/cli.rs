//! Minimal CLI: validate JSON/NDJSON documents against a rule file.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use array_validation::{RuleTree, Validator, ValidatorConfig};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// validate decoded JSON payloads against a declarative rule tree
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// raise log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// validate every input document and report the first violation of each
    Check(CheckOut),
    /// parse a rule file and print the normalized rule tree
    Rules(RulesOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// rule tree (.json)
    #[arg(long, short)]
    rules: PathBuf,

    /// deepest nesting the validator will walk
    #[arg(long, default_value_t = ValidatorConfig::default().max_depth)]
    max_depth: usize,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

#[derive(clap::Parser, Debug)]
struct RulesOut {
    /// rule tree (.json)
    #[arg(long, short)]
    rules: PathBuf,
}

/// One input document, labelled by where it came from.
struct Document {
    source: String,
    value: Value,
}

#[derive(Debug, Serialize)]
struct Report {
    source: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_documents(&self) -> Result<Vec<Document>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .map_err(|e| anyhow::anyhow!("failed to resolve input file paths: {e}"))?;
        let mut out = Vec::new();
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file ({source_path_str})"))?;

            let mut parsed = Vec::new();
            if self.ndjson {
                for (line_no, line) in source.lines().enumerate() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let value = serde_json::from_str::<Value>(line).with_context(|| {
                        format!("failed to parse JSON ({source_path_str}:{})", line_no + 1)
                    })?;
                    parsed.push((format!("{source_path_str}:{}", line_no + 1), value));
                }
            } else {
                let value = serde_json::from_str::<Value>(&source)
                    .with_context(|| format!("failed to parse JSON source file ({source_path_str})"))?;
                parsed.push((source_path_str.clone(), value));
            }

            for (label, value) in parsed {
                out.extend(self.preprocess(label, value)?);
            }
        }
        Ok(out)
    }

    fn preprocess(&self, source: String, value: Value) -> Result<Vec<Document>> {
        let value = match self.json_pointer.as_deref() {
            None => value,
            Some(pointer) => match value.pointer(pointer) {
                Some(x) => x.clone(),
                None => bail!("JSON pointer {pointer} selects nothing in {source}"),
            },
        };
        let Some(jq_expr) = self.jq_expr.as_deref() else {
            return Ok(vec![Document { source, value }]);
        };
        let results = array_validation::jq_exec::select_with_jq(jq_expr, &value)
            .with_context(|| format!("failed to apply jq expression to {source}"))?;
        let many = results.len() > 1;
        Ok(results
            .into_iter()
            .enumerate()
            .map(|(i, value)| Document {
                source: if many { format!("{source}#{i}") } else { source.clone() },
                value,
            })
            .collect())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn verbosity(&self) -> u8 { self.verbose }

    pub fn run(&self) -> Result<ExitCode> {
        match &self.cmd {
            Command::Check(target) => {
                let rules = load_rules(&target.rules)?;
                let documents = target.input_settings.load_documents()?;
                tracing::info!(documents = documents.len(), rules = rules.len(), "validating");

                let validator = Validator::with_config(ValidatorConfig { max_depth: target.max_depth });
                let reports: Vec<Report> = documents
                    .par_iter()
                    .map(|doc| match validator.validate(&doc.value, &rules) {
                        Ok(()) => Report { source: doc.source.clone(), ok: true, kind: None, path: None, message: None },
                        Err(e) => Report {
                            source: doc.source.clone(),
                            ok: false,
                            kind: Some(e.kind.to_string()),
                            path: Some(e.path.to_string()),
                            message: Some(e.message),
                        },
                    })
                    .collect();

                print_reports(&reports, target.format)?;
                let failed = reports.iter().filter(|r| !r.ok).count();
                tracing::info!(passed = reports.len() - failed, failed, "done");
                Ok(if failed == 0 { ExitCode::SUCCESS } else { ExitCode::from(1) })
            }
            Command::Rules(target) => {
                let rules = load_rules(&target.rules)?;
                println!("{rules:#?}");
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn load_rules(path: &Path) -> Result<RuleTree> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read rules ({})", path.display()))?;
    RuleTree::from_json_slice(&bytes).with_context(|| format!("invalid rules ({})", path.display()))
}

fn print_reports(reports: &[Report], format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(reports)?),
        ReportFormat::Text => {
            for r in reports {
                match &r.message {
                    None => println!("{} {}", "✓".green(), r.source),
                    Some(message) => {
                        let path = r.path.as_deref().unwrap_or("$");
                        println!("{} {} [{path}] {}", "✗".red(), r.source, message.bold());
                    }
                }
            }
        }
    }
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, Box<dyn std::error::Error + Send + Sync>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                return Err(format!("glob pattern matched no files: {pattern}").into());
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
