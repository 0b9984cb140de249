use crate::config::InjectConfig;
use crate::error::{AppError, AppResult};
use crate::inject::Outcome;
use crate::line_endings::LineEnding;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectReport {
    /// Schema that was read.
    pub source: PathBuf,
    /// Schema that was (or would have been) written.
    pub destination: PathBuf,
    /// What the strategy did.
    pub outcome: Outcome,
    /// Number of declarations added.
    pub inserted_fields: usize,
    /// Whether the destination was written (false on dry runs).
    pub written: bool,
}

/// Reads the source schema, injects the configured fields and writes the
/// destination.
///
/// The source is fully read and transformed before the destination is
/// opened, so a missing source or a failed match never touches the
/// destination.
pub fn inject(config: &InjectConfig) -> AppResult<InjectReport> {
    config.validate()?;
    let strategy = config.strategy.build();

    info!(
        source = %config.source_path.display(),
        strategy = strategy.name(),
        "schema.reading"
    );
    let raw = fs::read(&config.source_path).map_err(|error| AppError::Read {
        path: config.source_path.clone(),
        error,
    })?;
    let text = config.encoding.decode(raw)?;
    debug!(
        bytes = text.len(),
        line_endings = ?LineEnding::detect(&text),
        "schema.decoded"
    );

    let text = LineEnding::Lf.normalize(&text);
    let injection = strategy.apply(&text, config)?;

    let inserted_fields = injection.inserted;
    match injection.outcome {
        Outcome::Inserted { line } => {
            info!(line = line + 1, fields = inserted_fields, "schema.fields_inserted")
        }
        Outcome::AlreadyApplied => info!("schema.already_applied"),
    }

    let output = config.line_ending.normalize(&injection.content);
    let bytes = config.encoding.encode(&output);

    let written = if config.dry_run {
        info!(destination = %config.destination_path.display(), "schema.dry_run");
        false
    } else {
        fs::write(&config.destination_path, bytes).map_err(|error| AppError::Write {
            path: config.destination_path.clone(),
            error,
        })?;
        info!(
            destination = %config.destination_path.display(),
            line_ending = %config.line_ending,
            encoding = %config.encoding,
            "schema.written"
        );
        true
    };

    Ok(InjectReport {
        source: config.source_path.clone(),
        destination: config.destination_path.clone(),
        outcome: injection.outcome,
        inserted_fields,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Encoding;
    use tempfile::tempdir;

    #[test]
    fn test_invalid_config_fails_before_io() {
        let dir = tempdir().unwrap();
        let cfg = InjectConfig {
            source_path: dir.path().join("missing.prisma"),
            destination_path: dir.path().join("out.prisma"),
            fields: vec![],
            ..InjectConfig::default()
        };
        assert!(matches!(inject(&cfg), Err(AppError::Config(_))));
    }

    #[test]
    fn test_bad_encoding_does_not_write() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("schema.prisma");
        let dst = dir.path().join("out.prisma");
        fs::write(&src, [0xFFu8, 0xFE, 0x00]).unwrap();
        let cfg = InjectConfig {
            source_path: src,
            destination_path: dst.clone(),
            encoding: Encoding::Utf8,
            ..InjectConfig::default()
        };
        assert!(matches!(inject(&cfg), Err(AppError::Encoding(_))));
        assert!(!dst.exists());
    }
}
