//! # Schema Parser
//!
//! Splits schema text into lines and recognises top-level blocks and the
//! field declarations inside them. Unrecognised lines are kept verbatim.

use crate::error::{AppError, AppResult};
use crate::line_endings::split_lines;
use crate::schema::models::{Block, BlockKind, FieldDecl};
use regex::Regex;
use std::sync::OnceLock;

fn block_open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s+([A-Za-z_][A-Za-z0-9_]*)\s*\{\s*(//.*)?$")
            .expect("Invalid regex")
    })
}

fn block_close_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\}\s*(//.*)?$").expect("Invalid regex"))
}

fn field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\s*)([A-Za-z_][A-Za-z0-9_]*)(\s+)(\S+)(\s*)(.*)$").expect("Invalid regex")
    })
}

/// Parses a single field declaration line.
///
/// Returns `None` for lines that declare nothing (blank, comments, `@@` block
/// attributes).
pub fn parse_field_line(line: &str, index: usize) -> AppResult<Option<FieldDecl>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with("@@") {
        return Ok(None);
    }

    let caps = field_re().captures(line).ok_or_else(|| AppError::Parse {
        line: index + 1,
        message: format!("expected a field declaration, found `{}`", trimmed),
    })?;

    // `name @attr` with no type
    let ty = &caps[4];
    if ty.starts_with('@') {
        return Err(AppError::Parse {
            line: index + 1,
            message: format!("field `{}` has no type", &caps[2]),
        });
    }

    Ok(Some(FieldDecl {
        name: caps[2].to_string(),
        ty: ty.to_string(),
        attributes: caps[6].trim_end().to_string(),
        indent: caps[1].to_string(),
        name_width: caps[2].len() + caps[3].len(),
        type_width: ty.len() + caps[5].len(),
        line: index,
    }))
}

/// Parses schema text into its lines and blocks.
pub fn parse_schema(text: &str) -> AppResult<(Vec<String>, Vec<Block>)> {
    let lines: Vec<String> = split_lines(text).into_iter().map(str::to_string).collect();
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for (index, raw) in lines.iter().enumerate() {
        let line = if index == 0 {
            raw.trim_start_matches('\u{feff}')
        } else {
            raw.as_str()
        };
        let trimmed = line.trim_start();
        if trimmed.starts_with("//") {
            continue;
        }

        match current.as_mut() {
            None => {
                if let Some(caps) = block_open_re().captures(line) {
                    current = Some(Block {
                        kind: BlockKind::from_keyword(&caps[1]),
                        name: caps[2].to_string(),
                        fields: Vec::new(),
                        open_line: index,
                        close_line: index,
                    });
                } else if block_close_re().is_match(line) {
                    return Err(AppError::Parse {
                        line: index + 1,
                        message: "unexpected `}` outside of a block".into(),
                    });
                }
            }
            Some(block) => {
                if block_close_re().is_match(line) {
                    block.close_line = index;
                    if let Some(done) = current.take() {
                        blocks.push(done);
                    }
                } else if block_open_re().is_match(line) {
                    return Err(AppError::Parse {
                        line: index + 1,
                        message: format!("block opened inside `{}`", block.name),
                    });
                } else if block.kind.has_fields() {
                    if let Some(field) = parse_field_line(line, index)? {
                        block.fields.push(field);
                    }
                }
            }
        }
    }

    if let Some(block) = current {
        return Err(AppError::Parse {
            line: block.open_line + 1,
            message: format!("block `{}` is never closed", block.name),
        });
    }

    Ok((lines, blocks))
}
