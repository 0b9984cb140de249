#![deny(missing_docs)]

//! # Field Injection
//!
//! Strategies that splice new field declarations into schema text, and the
//! runner that reads the source and writes the destination around them.
//!
//! - **structural**: Parses the schema and inserts after a named field.
//! - **pattern**: Regex substitution with match counting.
//! - **runner**: File IO, encoding and line-ending handling.

use crate::config::{InjectConfig, StrategyKind};
use crate::error::AppResult;

/// Regex substitution strategy.
pub mod pattern;

/// Read, inject, write.
pub mod runner;

/// Structural insert-after-field strategy.
pub mod structural;

pub use pattern::PatternStrategy;
pub use runner::{inject, InjectReport};
pub use structural::StructuralStrategy;

/// What an injection did to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Fields were inserted starting at this 0-based line.
    Inserted {
        /// First inserted line.
        line: usize,
    },
    /// Every field was already present; text is unchanged.
    AlreadyApplied,
}

/// Result of applying a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    /// Text after injection, LF terminated.
    pub content: String,
    /// What happened.
    pub outcome: Outcome,
    /// Number of field declarations added.
    pub inserted: usize,
}

/// Locates the insertion point in LF-normalised schema text and splices the
/// configured fields in.
pub trait InjectionStrategy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Applies the injection to `source`.
    fn apply(&self, source: &str, config: &InjectConfig) -> AppResult<Injection>;
}

impl StrategyKind {
    /// Instantiates the strategy.
    pub fn build(self) -> Box<dyn InjectionStrategy> {
        match self {
            StrategyKind::Structural => Box::new(StructuralStrategy),
            StrategyKind::Pattern => Box::new(PatternStrategy),
        }
    }
}
