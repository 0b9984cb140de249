#![deny(missing_docs)]

//! # Schema
//!
//! Structural view of a Prisma schema file.
//!
//! - **models**: Blocks, field declarations and fields to insert.
//! - **parser**: Line-preserving parser.
//! - **document**: The parsed document and structural edits on it.

/// Schema document and structural edits.
pub mod document;

/// Data structures for blocks and fields.
pub mod models;

/// Line-preserving schema parser.
pub mod parser;

pub use document::SchemaDocument;
pub use models::{email_verification_fields, Block, BlockKind, FieldDecl, NewField};
pub use parser::{parse_field_line, parse_schema};
