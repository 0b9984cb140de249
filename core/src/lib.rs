#![deny(missing_docs)]

//! # prisma-patch core
//!
//! Inserts field declarations into Prisma schema files, either structurally
//! (parse, insert after a named field, re-render) or by a single regex
//! substitution. Both paths verify that exactly one insertion point exists.

/// Run configuration.
pub mod config;

/// Source/destination text encodings.
pub mod encoding;

/// Shared error types.
pub mod error;

/// Injection strategies and the file runner.
pub mod inject;

/// Line-ending detection and normalisation.
pub mod line_endings;

/// Schema model and parser.
pub mod schema;

pub use config::{InjectConfig, StrategyKind};
pub use encoding::Encoding;
pub use error::{AppError, AppResult};
pub use inject::{inject, InjectReport, Injection, InjectionStrategy, Outcome};
pub use line_endings::LineEnding;
pub use schema::{FieldDecl, NewField, SchemaDocument};
