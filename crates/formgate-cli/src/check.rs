//! # Check Subcommand
//!
//! Validates a JSON or YAML document against a JSON Schema composed with
//! not-blank refinement rules.
//!
//! ```bash
//! formgate check --schema login.schema.json --document login.yaml --not-blank username
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use formgate_schema::{
    blank_message, compose, load_document, JsonSchemaShape, Locale, RefinementRule,
};

/// Arguments for the `formgate check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON Schema file (`.json`, `.yaml` or `.yml`) describing an object.
    #[arg(long)]
    pub schema: PathBuf,

    /// Document to validate (`.json`, `.yaml` or `.yml`).
    #[arg(long)]
    pub document: PathBuf,

    /// Field that must not be whitespace only. Repeatable.
    #[arg(long = "not-blank", value_name = "FIELD")]
    pub not_blank: Vec<String>,

    /// Language of validation messages.
    #[arg(long, default_value = "en")]
    pub locale: Locale,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 if the document is valid, 1 if it is not,
/// 2 on operational error.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    check(args, &mut std::io::stdout().lock())
}

/// Validate and report to `out`.
pub fn check(args: &CheckArgs, out: &mut impl Write) -> Result<u8> {
    let shape = JsonSchemaShape::from_file(&args.schema)
        .with_context(|| format!("failed to load schema {}", args.schema.display()))?
        .with_locale(args.locale);

    let rules: Vec<RefinementRule> = args
        .not_blank
        .iter()
        .map(|field| RefinementRule::not_blank(field.as_str(), blank_message(args.locale)))
        .collect();

    let validator = compose(shape, rules).context("invalid --not-blank field")?;
    let document = load_document(&args.document)
        .with_context(|| format!("failed to load document {}", args.document.display()))?;

    match validator.validate(&document) {
        Ok(_) => {
            writeln!(out, "OK: {}", args.document.display())?;
            Ok(0)
        }
        Err(errors) => {
            tracing::debug!(count = errors.len(), "document failed validation");
            for error in &errors {
                writeln!(out, "FAIL: {error}")?;
            }
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const SCHEMA: &str = r#"{
        "type": "object",
        "properties": {
            "username": {"type": "string", "minLength": 3, "maxLength": 32},
            "age": {"type": "integer", "minimum": 0}
        },
        "required": ["username"]
    }"#;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn run(dir: &Path, document: &str, not_blank: &[&str]) -> Result<(u8, String)> {
        let args = CheckArgs {
            schema: write(dir, "login.schema.json", SCHEMA),
            document: write(dir, "login.yaml", document),
            not_blank: not_blank.iter().map(|s| s.to_string()).collect(),
            locale: Locale::En,
        };
        let mut out = Vec::new();
        let code = check(&args, &mut out)?;
        Ok((code, String::from_utf8(out).unwrap()))
    }

    #[test]
    fn valid_document_prints_ok() {
        let dir = tempfile::tempdir().unwrap();
        let (code, out) = run(dir.path(), "username: alex\n", &["username"]).unwrap();
        assert_eq!(code, 0);
        assert!(out.starts_with("OK: "));
    }

    #[test]
    fn blank_field_fails_refinement() {
        let dir = tempfile::tempdir().unwrap();
        let (code, out) = run(dir.path(), "username: \"    \"\n", &["username"]).unwrap();
        assert_eq!(code, 1);
        assert_eq!(out, "FAIL: username: cannot be blank\n");
    }

    #[test]
    fn missing_required_field_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let (code, out) = run(dir.path(), "age: 3\n", &[]).unwrap();
        assert_eq!(code, 1);
        assert_eq!(out, "FAIL: username: required\n");
    }

    #[test]
    fn unknown_not_blank_field_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(dir.path(), "username: alex\n", &["email"]).unwrap_err();
        assert!(format!("{err:#}").contains("email"));
    }
}
