//! # Configuration
//!
//! Options for a single injection run. Every option defaults to the values the
//! email-verification migration was first run with, so an empty config file
//! reproduces that run.

use crate::encoding::Encoding;
use crate::error::{AppError, AppResult};
use crate::inject::pattern::replacement_fields;
use crate::line_endings::LineEnding;
use crate::schema::models::{email_verification_fields, NewField};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Source schema of the first migration run.
pub const DEFAULT_SOURCE_PATH: &str =
    "C:/Users/WEB STUDIO LINK/Documents/backups/domacin-final_2025-11-27_15-28-14/prisma/schema.prisma";

/// Destination of the first migration run, relative to the working directory.
pub const DEFAULT_DESTINATION_PATH: &str = "prisma/schema.prisma";

/// Regex used by the pattern strategy.
pub const DEFAULT_PATTERN: &str = r#"(language\s+String\s+@default\("sr"\)\s*\n)(\s+createdAt)"#;

/// Replacement used by the pattern strategy.
pub const DEFAULT_REPLACEMENT: &str = "${1}  emailVerified         Boolean  @default(false)\n  verificationToken     String?  @unique\n  verificationTokenExpiry DateTime?\n${2}";

/// Confirmation printed after a successful insertion.
pub const DEFAULT_MESSAGE: &str = "✓ Schema updated with email verification fields";

/// How the insertion point is located.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Parse the schema and insert after a named field.
    #[default]
    Structural,
    /// Regex substitution over the whole text.
    Pattern,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Structural => write!(f, "structural"),
            StrategyKind::Pattern => write!(f, "pattern"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "structural" => Ok(StrategyKind::Structural),
            "pattern" | "regex" => Ok(StrategyKind::Pattern),
            other => Err(format!(
                "unknown strategy `{}` (expected structural or pattern)",
                other
            )),
        }
    }
}

/// Options for one injection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InjectConfig {
    /// Schema to read.
    pub source_path: PathBuf,
    /// File to create or overwrite.
    pub destination_path: PathBuf,
    /// Encoding for both reading and writing.
    pub encoding: Encoding,
    /// Line terminator style of the written file.
    pub line_ending: LineEnding,
    /// Insertion strategy.
    ///
    /// `structural` pads new fields to the anchor line's columns, so its
    /// output can differ in spacing from `replacement`. Only `pattern`
    /// writes `replacement` verbatim.
    pub strategy: StrategyKind,
    /// Model that must contain the anchor. `None` searches every model.
    pub model: Option<String>,
    /// Field after which the new fields go.
    pub anchor_field: String,
    /// Field that must directly follow the anchor, if any.
    pub next_field: Option<String>,
    /// Fields to insert, in order. Structural strategy only.
    pub fields: Vec<NewField>,
    /// Regex for the pattern strategy.
    pub pattern: String,
    /// Replacement for the pattern strategy (`${1}` style group references).
    pub replacement: String,
    /// Confirmation printed on success.
    pub message: String,
    /// Compute the result without writing the destination.
    pub dry_run: bool,
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            destination_path: PathBuf::from(DEFAULT_DESTINATION_PATH),
            encoding: Encoding::default(),
            line_ending: LineEnding::default(),
            strategy: StrategyKind::default(),
            model: Some("User".to_string()),
            anchor_field: "language".to_string(),
            next_field: Some("createdAt".to_string()),
            fields: email_verification_fields(),
            pattern: DEFAULT_PATTERN.to_string(),
            replacement: DEFAULT_REPLACEMENT.to_string(),
            message: DEFAULT_MESSAGE.to_string(),
            dry_run: false,
        }
    }
}

impl InjectConfig {
    /// Loads a config file. The format follows the extension:
    /// `.json` or `.yaml`/`.yml`.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|error| AppError::Read {
            path: path.to_path_buf(),
            error,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => serde_json::from_str(&content).map_err(|e| {
                AppError::Config(format!("{}: invalid JSON: {}", path.display(), e))
            }),
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
                AppError::Config(format!("{}: invalid YAML: {}", path.display(), e))
            }),
            _ => Err(AppError::Config(format!(
                "{}: unsupported config format (use .json, .yaml or .yml)",
                path.display()
            ))),
        }
    }

    /// Checks option combinations before any file is touched.
    pub fn validate(&self) -> AppResult<()> {
        if self.anchor_field.trim().is_empty() {
            return Err(AppError::Config("anchor_field must not be empty".into()));
        }
        if self.fields.is_empty() {
            return Err(AppError::Config("no fields to insert".into()));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !is_identifier(&field.name) {
                return Err(AppError::Config(format!(
                    "invalid field name `{}`",
                    field.name
                )));
            }
            if field.ty.trim().is_empty()
                || field.ty.starts_with('@')
                || field.ty.chars().any(char::is_whitespace)
            {
                return Err(AppError::Config(format!(
                    "invalid type `{}` for field `{}`",
                    field.ty, field.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(AppError::Config(format!(
                    "field `{}` listed more than once",
                    field.name
                )));
            }
        }

        if self.strategy == StrategyKind::Pattern {
            if self.fields != email_verification_fields() {
                return Err(AppError::Config(
                    "`fields` does not apply to the pattern strategy; put the declarations in `replacement`"
                        .into(),
                ));
            }
            self.compile_pattern()?;
            if replacement_fields(&self.replacement)?.is_empty() {
                return Err(AppError::Config(
                    "replacement declares no fields".into(),
                ));
            }
        }
        Ok(())
    }

    /// Compiles `pattern`.
    pub fn compile_pattern(&self) -> AppResult<Regex> {
        Regex::new(&self.pattern)
            .map_err(|e| AppError::Config(format!("invalid pattern: {}", e)))
    }

    /// Names of the fields to insert.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
