#![deny(missing_docs)]

//! # Inject Command
//!
//! Resolves the run configuration (defaults < config file < environment <
//! flags), runs the injection and reports the result on stdout.

use crate::error::CliResult;
use prisma_patch_core::{
    inject, Encoding, InjectConfig, InjectReport, LineEnding, NewField, Outcome, StrategyKind,
};
use std::path::PathBuf;

/// Arguments for the inject command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct InjectArgs {
    /// JSON or YAML config file. Flags override its values.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Schema file to read.
    #[clap(long, env = "PRISMA_PATCH_SOURCE")]
    pub source: Option<PathBuf>,

    /// Schema file to create or overwrite.
    #[clap(long, env = "PRISMA_PATCH_DESTINATION")]
    pub destination: Option<PathBuf>,

    /// Text encoding (`utf-8` or `utf-8-sig`).
    #[clap(long)]
    pub encoding: Option<Encoding>,

    /// Line endings of the written file (`lf` or `crlf`).
    #[clap(long)]
    pub line_ending: Option<LineEnding>,

    /// How to locate the insertion point (`structural` or `pattern`).
    #[clap(long)]
    pub strategy: Option<StrategyKind>,

    /// Model that must contain the anchor field.
    #[clap(long, conflicts_with = "any_model")]
    pub model: Option<String>,

    /// Search every model for the anchor field.
    #[clap(long)]
    pub any_model: bool,

    /// Field after which the new fields are inserted.
    #[clap(long)]
    pub anchor: Option<String>,

    /// Field that must directly follow the anchor.
    #[clap(long, conflicts_with = "no_next")]
    pub next: Option<String>,

    /// Do not require a particular field after the anchor.
    #[clap(long)]
    pub no_next: bool,

    /// Field to insert, as `name:Type[:attributes]`. Repeatable; replaces
    /// the configured field list.
    /// Example: `"--field emailVerified:Boolean:@default(false)"`
    #[clap(long = "field", value_parser = parse_field)]
    pub fields: Vec<NewField>,

    /// Report what would change without writing the destination.
    #[clap(long)]
    pub dry_run: bool,
}

/// Helper to parse "name:Type[:attributes]" arguments.
fn parse_field(s: &str) -> Result<NewField, String> {
    let mut parts = s.splitn(3, ':');
    let name = parts.next().unwrap_or_default().trim();
    let ty = parts
        .next()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| format!("invalid field `{}`: expected name:Type[:attributes]", s))?;
    if name.is_empty() {
        return Err(format!("invalid field `{}`: missing name", s));
    }
    let attributes = parts.next().map(str::trim).filter(|a| !a.is_empty());
    Ok(NewField::new(name, ty, attributes))
}

impl InjectArgs {
    /// Builds the effective configuration.
    pub fn resolve(&self) -> CliResult<InjectConfig> {
        let mut cfg = match &self.config {
            Some(path) => InjectConfig::from_file(path)?,
            None => InjectConfig::default(),
        };

        if let Some(p) = &self.source {
            cfg.source_path = p.clone();
        }
        if let Some(p) = &self.destination {
            cfg.destination_path = p.clone();
        }
        if let Some(e) = self.encoding {
            cfg.encoding = e;
        }
        if let Some(l) = self.line_ending {
            cfg.line_ending = l;
        }
        if let Some(s) = self.strategy {
            cfg.strategy = s;
        }
        if self.any_model {
            cfg.model = None;
        } else if let Some(m) = &self.model {
            cfg.model = Some(m.clone());
        }
        if let Some(a) = &self.anchor {
            cfg.anchor_field = a.clone();
        }
        if self.no_next {
            cfg.next_field = None;
        } else if let Some(n) = &self.next {
            cfg.next_field = Some(n.clone());
        }
        if !self.fields.is_empty() {
            cfg.fields = self.fields.clone();
        }
        if self.dry_run {
            cfg.dry_run = true;
        }

        Ok(cfg)
    }
}

/// Executes the injection and returns the line to print on stdout.
pub fn execute(args: &InjectArgs) -> CliResult<String> {
    let cfg = args.resolve()?;
    let report = inject(&cfg)?;
    Ok(summary(&cfg, &report))
}

fn summary(cfg: &InjectConfig, report: &InjectReport) -> String {
    match (report.outcome, report.written) {
        (Outcome::Inserted { .. }, true) => cfg.message.clone(),
        (Outcome::Inserted { line }, false) => format!(
            "Dry run: {} field(s) would be inserted at line {} of {}",
            report.inserted_fields,
            line + 1,
            report.destination.display()
        ),
        (Outcome::AlreadyApplied, true) => format!(
            "✓ Schema already contains the requested fields; {} written unchanged",
            report.destination.display()
        ),
        (Outcome::AlreadyApplied, false) => {
            "Dry run: schema already contains the requested fields".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use prisma_patch_core::AppError;
    use std::fs;
    use tempfile::tempdir;

    const SCHEMA: &str = "model User {\n  id        String   @id\n  language  String   @default(\"sr\")\n  createdAt DateTime @default(now())\n}\n";

    fn args_in(dir: &std::path::Path) -> InjectArgs {
        InjectArgs {
            source: Some(dir.join("in.prisma")),
            destination: Some(dir.join("out.prisma")),
            ..InjectArgs::default()
        }
    }

    #[test]
    fn test_execute_prints_configured_message() {
        let dir = tempdir().unwrap();
        let args = args_in(dir.path());
        fs::write(dir.path().join("in.prisma"), SCHEMA).unwrap();

        let msg = execute(&args).unwrap();
        assert_eq!(msg, "✓ Schema updated with email verification fields");
        let out = fs::read_to_string(dir.path().join("out.prisma")).unwrap();
        assert!(out.contains("verificationTokenExpiry DateTime?"));
    }

    #[test]
    fn test_execute_reports_already_applied() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("in.prisma"), SCHEMA).unwrap();
        execute(&args_in(dir.path())).unwrap();

        let again = InjectArgs {
            source: Some(dir.path().join("out.prisma")),
            destination: Some(dir.path().join("again.prisma")),
            ..InjectArgs::default()
        };
        let msg = execute(&again).unwrap();
        assert!(msg.contains("already contains"));
    }

    #[test]
    fn test_execute_no_match_is_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("in.prisma"), SCHEMA.replace("language", "lang")).unwrap();
        let res = execute(&args_in(dir.path()));
        assert!(matches!(res, Err(CliError::Core(AppError::NoMatch(_)))));
        assert!(!dir.path().join("out.prisma").exists());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("patch.yaml");
        fs::write(
            &cfg_path,
            "source_path: from-file.prisma\nanchor_field: email\nline_ending: crlf\n",
        )
        .unwrap();

        let args = InjectArgs {
            config: Some(cfg_path),
            source: Some(PathBuf::from("from-flag.prisma")),
            any_model: true,
            no_next: true,
            fields: vec![NewField::new("locale", "String", None)],
            ..InjectArgs::default()
        };
        let cfg = args.resolve().unwrap();
        assert_eq!(cfg.source_path, PathBuf::from("from-flag.prisma"));
        assert_eq!(cfg.anchor_field, "email");
        assert_eq!(cfg.line_ending, LineEnding::CrLf);
        assert_eq!(cfg.model, None);
        assert_eq!(cfg.next_field, None);
        assert_eq!(cfg.fields, vec![NewField::new("locale", "String", None)]);
    }

    #[test]
    fn test_dry_run_summary() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("in.prisma"), SCHEMA).unwrap();
        let args = InjectArgs {
            dry_run: true,
            ..args_in(dir.path())
        };
        let msg = execute(&args).unwrap();
        assert!(msg.starts_with("Dry run: 3 field(s) would be inserted at line 4"));
        assert!(!dir.path().join("out.prisma").exists());
    }

    #[test]
    fn test_field_flags_rejected_for_pattern_strategy() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("in.prisma"), SCHEMA).unwrap();
        let args = InjectArgs {
            strategy: Some(StrategyKind::Pattern),
            fields: vec![NewField::new("locale", "String", None)],
            ..args_in(dir.path())
        };
        let res = execute(&args);
        assert!(matches!(res, Err(CliError::Core(AppError::Config(_)))));
        assert!(!dir.path().join("out.prisma").exists());
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("emailVerified:Boolean:@default(false)").unwrap(),
            NewField::new("emailVerified", "Boolean", Some("@default(false)"))
        );
        assert_eq!(
            parse_field("note:String?:@default(\"a:b\")").unwrap(),
            NewField::new("note", "String?", Some("@default(\"a:b\")"))
        );
        assert_eq!(
            parse_field("expiry:DateTime?").unwrap(),
            NewField::new("expiry", "DateTime?", None)
        );
        assert!(parse_field("nameonly").is_err());
        assert!(parse_field(":String").is_err());
    }
}
