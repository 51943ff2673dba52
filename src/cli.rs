//! Minimal CLI: spec document + JSON inputs → pass/fail per document
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::{debug, info};

use crate::{Scheme, Spec, Value};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// validate JSON/NDJSON documents against a declarative spec document
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// colorize output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    color: ColorChoice,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// validate each input document and report pass/fail
    Check(CheckOut),
    /// print the validator tree built from a spec document
    Explain(ExplainOut),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Args, Debug, Clone)]
struct SpecSettings {
    /// JSON spec document
    #[arg(long, short)]
    spec: PathBuf,

    /// skip keys the root mapping has no rule for
    #[arg(long, default_value_t = false)]
    ignore_unknown: bool,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    #[command(flatten)]
    spec_settings: SpecSettings,

    #[command(flatten)]
    input_settings: InputSettings,

    /// print each validated (default-filled) document as JSON on stdout
    #[arg(long)]
    emit: bool,
}

#[derive(clap::Parser, Debug)]
struct ExplainOut {
    #[command(flatten)]
    spec_settings: SpecSettings,
}

/// One document pulled from an input, labelled for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub label: String,
    pub value: serde_json::Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl SpecSettings {
    fn load(&self) -> Result<Scheme> {
        let source = std::fs::read_to_string(&self.spec)
            .with_context(|| format!("failed to read spec document {}", self.spec.display()))?;
        let mut spec: Spec = crate::document::from_str(&source)
            .with_context(|| format!("invalid spec document {}", self.spec.display()))?;
        if self.ignore_unknown {
            spec = spec.ignore_unknown();
        }
        let scheme = Scheme::new(spec)
            .with_context(|| format!("failed to build scheme from {}", self.spec.display()))?;
        Ok(scheme)
    }
}

impl InputSettings {
    fn load_documents(&self) -> Result<Vec<Document>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let mut documents = Vec::new();
        for source_path in source_paths {
            for (label, json_value) in read_source(&source_path, self.ndjson)? {
                let json_value = match self.json_pointer.as_deref() {
                    None => json_value,
                    Some(pointer) => json_value
                        .pointer(pointer)
                        .cloned()
                        .with_context(|| format!("{label}: no value at JSON pointer {pointer}"))?,
                };
                match self.jq_expr.as_deref() {
                    None => documents.push(Document { label, value: json_value }),
                    Some(jq_expr) => {
                        let outputs = crate::jq_exec::run_filter(jq_expr, &json_value)
                            .with_context(|| format!("failed to apply jq expression to {label}"))?;
                        let many = outputs.len() > 1;
                        for (i, value) in outputs.into_iter().enumerate() {
                            let label = if many { format!("{label}#{i}") } else { label.clone() };
                            documents.push(Document { label, value });
                        }
                    }
                }
            }
        }
        debug!(count = documents.len(), "loaded documents");
        Ok(documents)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<ExitCode> {
        match self.color {
            ColorChoice::Auto => {}
            ColorChoice::Always => colored::control::set_override(true),
            ColorChoice::Never => colored::control::set_override(false),
        }
        match &self.cmd {
            Command::Explain(target) => {
                let scheme = target.spec_settings.load()?;
                println!("{}", scheme.validator());
                Ok(ExitCode::SUCCESS)
            }
            Command::Check(target) => {
                let scheme = target.spec_settings.load()?;
                let documents = target.input_settings.load_documents()?;
                let (labels, values): (Vec<_>, Vec<_>) = documents
                    .into_iter()
                    .map(|doc| (doc.label, Value::from(doc.value)))
                    .unzip();
                let results = scheme.validate_many(values);

                let mut failed = 0usize;
                for (label, result) in labels.iter().zip(results) {
                    match result {
                        Ok(validated) => {
                            eprintln!("{} {label}", "ok  ".green());
                            if target.emit {
                                println!("{}", serde_json::to_string(&validated.to_json())?);
                            }
                        }
                        Err(error) => {
                            failed += 1;
                            eprintln!("{} {label}: [{}] {error}", "FAIL".red().bold(), error.kind());
                        }
                    }
                }
                info!(total = labels.len(), failed, "check finished");
                if failed == 0 {
                    Ok(ExitCode::SUCCESS)
                } else {
                    eprintln!("{failed} of {} documents failed", labels.len());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Parse one file as a single JSON document, or one document per non-blank
/// line for NDJSON. Labels are the path, plus `:<line>` for NDJSON.
fn read_source(path: &Path, ndjson: bool) -> Result<Vec<(String, serde_json::Value)>> {
    let path_str = path.to_string_lossy().to_string();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read source file {path_str}"))?;
    if !ndjson {
        let value = serde_json::from_str(&source)
            .with_context(|| format!("failed to parse JSON source file {path_str}"))?;
        return Ok(vec![(path_str, value)]);
    }
    let mut out = Vec::new();
    for (i, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let label = format!("{path_str}:{}", i + 1);
        let value = serde_json::from_str(line)
            .with_context(|| format!("failed to parse NDJSON line {label}"))?;
        out.push((label, value));
    }
    Ok(out)
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("invalid glob pattern {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
