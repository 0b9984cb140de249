use crate::config::InjectConfig;
use crate::error::{AppError, AppResult};
use crate::inject::{Injection, InjectionStrategy, Outcome};
use crate::schema::{parse_field_line, FieldDecl};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

fn group_ref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$(\{[^}]*\}|[0-9A-Za-z_]+)").expect("Invalid regex"))
}

/// Field declarations a replacement string adds, with group references
/// (`$1`, `${name}`) removed.
pub fn replacement_fields(replacement: &str) -> AppResult<Vec<FieldDecl>> {
    let literal = group_ref_re().replace_all(replacement, "");
    let mut fields = Vec::new();
    for (index, line) in literal.lines().enumerate() {
        if let Some(decl) = parse_field_line(line, index)? {
            fields.push(decl);
        }
    }
    Ok(fields)
}

/// Single regex substitution over the whole text.
///
/// The match count is checked before replacing: zero matches fail unless the
/// fields declared in the replacement already exist, more than one match
/// fails as ambiguous.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternStrategy;

impl InjectionStrategy for PatternStrategy {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn apply(&self, source: &str, config: &InjectConfig) -> AppResult<Injection> {
        let re = config.compile_pattern()?;
        let added = replacement_fields(&config.replacement)?;
        let names: Vec<&str> = added.iter().map(|f| f.name.as_str()).collect();
        let count = re.find_iter(source).count();
        debug!(pattern = %config.pattern, matches = count, "pattern.matched");

        match count {
            0 => {
                if fields_declared(source, &names)? {
                    Ok(Injection {
                        content: source.to_string(),
                        outcome: Outcome::AlreadyApplied,
                        inserted: 0,
                    })
                } else {
                    Err(AppError::NoMatch(format!(
                        "pattern `{}` matched nothing",
                        config.pattern
                    )))
                }
            }
            1 => {
                let caps = re
                    .captures(source)
                    .ok_or_else(|| AppError::General("pattern match vanished".into()))?;
                let whole = caps
                    .get(0)
                    .ok_or_else(|| AppError::General("pattern match vanished".into()))?;
                let offset = caps.get(1).map_or(whole.start(), |g| g.end());
                let line = source[..offset].matches('\n').count();

                let content = re
                    .replacen(source, 1, config.replacement.as_str())
                    .into_owned();
                Ok(Injection {
                    content,
                    outcome: Outcome::Inserted { line },
                    inserted: added.len(),
                })
            }
            n => Err(AppError::AmbiguousMatch {
                count: n,
                message: format!("pattern `{}`", config.pattern),
            }),
        }
    }
}

/// True when every name appears as an indented declaration somewhere in `text`.
fn fields_declared(text: &str, names: &[&str]) -> AppResult<bool> {
    for name in names {
        let re = Regex::new(&format!(r"(?m)^[ \t]+{}[ \t]", regex::escape(name)))
            .map_err(|e| AppError::General(format!("field lookup regex: {}", e)))?;
        if !re.is_match(text) {
            return Ok(false);
        }
    }
    Ok(true)
}
