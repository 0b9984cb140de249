use crate::config::InjectConfig;
use crate::error::{AppError, AppResult};
use crate::inject::{Injection, InjectionStrategy, Outcome};
use crate::line_endings::LineEnding;
use crate::schema::{Block, SchemaDocument};
use tracing::debug;

/// Parses the schema into blocks and inserts after the anchor field.
///
/// Re-running on its own output is a no-op: when every configured field is
/// already declared in the block holding the anchor, the text is returned
/// unchanged with `Outcome::AlreadyApplied`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralStrategy;

impl InjectionStrategy for StructuralStrategy {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn apply(&self, source: &str, config: &InjectConfig) -> AppResult<Injection> {
        let mut doc = SchemaDocument::parse(source)?;
        let model = config.model.as_deref();
        let names = config.field_names();

        let targets: Vec<&Block> = doc
            .blocks_with_field(&config.anchor_field)
            .into_iter()
            .filter(|b| b.kind.has_fields() && model.map_or(true, |m| m == b.name))
            .collect();
        debug!(
            anchor = %config.anchor_field,
            blocks = targets.len(),
            "structural.targets"
        );

        if !targets.is_empty() {
            let mut complete = 0;
            for block in &targets {
                let present: Vec<&str> = names
                    .iter()
                    .copied()
                    .filter(|n| block.has_field(n))
                    .collect();
                if present.len() == names.len() {
                    complete += 1;
                } else if !present.is_empty() {
                    return Err(AppError::General(format!(
                        "model `{}` already declares {} of the fields to insert ({}); refusing to add the rest",
                        block.name,
                        present.len(),
                        present.join(", ")
                    )));
                }
            }
            if complete == targets.len() {
                return Ok(Injection {
                    content: source.to_string(),
                    outcome: Outcome::AlreadyApplied,
                    inserted: 0,
                });
            }
        }

        let line = doc.insert_fields_after(
            model,
            &config.anchor_field,
            config.next_field.as_deref(),
            &config.fields,
        )?;

        Ok(Injection {
            content: doc.render(LineEnding::Lf),
            outcome: Outcome::Inserted { line },
            inserted: config.fields.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCHEMA: &str = r#"model User {
  id        String   @id @default(cuid())
  email     String   @unique
  language  String   @default("sr")
  createdAt DateTime @default(now())
}
"#;

    #[test]
    fn test_inserts_between_anchor_and_next() {
        let cfg = InjectConfig::default();
        let res = StructuralStrategy.apply(SCHEMA, &cfg).unwrap();
        assert_eq!(res.outcome, Outcome::Inserted { line: 4 });
        let expected = r#"model User {
  id        String   @id @default(cuid())
  email     String   @unique
  language  String   @default("sr")
  emailVerified Boolean  @default(false)
  verificationToken String?  @unique
  verificationTokenExpiry DateTime?
  createdAt DateTime @default(now())
}
"#;
        assert_eq!(res.content, expected);
    }

    #[test]
    fn test_second_run_is_noop() {
        let cfg = InjectConfig::default();
        let first = StructuralStrategy.apply(SCHEMA, &cfg).unwrap();
        let second = StructuralStrategy.apply(&first.content, &cfg).unwrap();
        assert_eq!(second.outcome, Outcome::AlreadyApplied);
        assert_eq!(second.content, first.content);
    }

    #[test]
    fn test_partial_presence_is_error() {
        let schema = SCHEMA.replace(
            "  createdAt",
            "  emailVerified Boolean @default(false)\n  createdAt",
        );
        let cfg = InjectConfig {
            next_field: None,
            ..InjectConfig::default()
        };
        let res = StructuralStrategy.apply(&schema, &cfg);
        match res {
            Err(AppError::General(msg)) => assert!(msg.contains("emailVerified")),
            other => panic!("expected refusal, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_anchor_is_error() {
        let schema = SCHEMA.replace("language", "locale");
        let res = StructuralStrategy.apply(&schema, &InjectConfig::default());
        assert!(matches!(res, Err(AppError::NoMatch(_))));
    }

    #[test]
    fn test_any_model_when_unscoped() {
        let schema = "model Account {\n  language String\n  createdAt DateTime\n}\n";
        let cfg = InjectConfig {
            model: None,
            ..InjectConfig::default()
        };
        let res = StructuralStrategy.apply(schema, &cfg).unwrap();
        assert_eq!(res.outcome, Outcome::Inserted { line: 2 });
        assert!(res.content.contains("  verificationTokenExpiry DateTime?\n  createdAt"));
    }
}
