use crate::error::{AppError, AppResult};
use crate::line_endings::LineEnding;
use crate::schema::models::{Block, NewField};
use crate::schema::parser::{parse_field_line, parse_schema};

/// A parsed schema that renders back to its original text until edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDocument {
    lines: Vec<String>,
    blocks: Vec<Block>,
}

impl SchemaDocument {
    /// Parses schema text.
    pub fn parse(text: &str) -> AppResult<Self> {
        let (lines, blocks) = parse_schema(text)?;
        Ok(Self { lines, blocks })
    }

    /// All top-level blocks in source order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Raw lines without terminators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Finds a block that carries fields (model, type or view) by name.
    pub fn model(&self, name: &str) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|b| b.kind.has_fields() && b.name == name)
    }

    /// Blocks declaring a field with the given name.
    pub fn blocks_with_field(&self, field: &str) -> Vec<&Block> {
        self.blocks.iter().filter(|b| b.has_field(field)).collect()
    }

    /// Joins the lines with a single terminator style.
    pub fn render(&self, ending: LineEnding) -> String {
        self.lines.join(ending.as_str())
    }

    /// Inserts `fields` directly after the `anchor` field declaration.
    ///
    /// When `model` is given only that block is searched. When `next` is given
    /// the anchor must be immediately followed by a field of that name.
    /// Exactly one location must qualify. Returns the 0-based line index of
    /// the first inserted line.
    pub fn insert_fields_after(
        &mut self,
        model: Option<&str>,
        anchor: &str,
        next: Option<&str>,
        fields: &[NewField],
    ) -> AppResult<usize> {
        let description = describe_anchor(model, anchor, next);

        if let Some(name) = model {
            if self.model(name).is_none() {
                return Err(AppError::NoMatch(format!("model `{}` not found", name)));
            }
        }

        let mut candidates = Vec::new();
        for (bi, block) in self.blocks.iter().enumerate() {
            if !block.kind.has_fields() || model.is_some_and(|m| m != block.name) {
                continue;
            }
            for (fi, field) in block.fields.iter().enumerate() {
                if field.name != anchor {
                    continue;
                }
                let follows = match next {
                    Some(n) => block.fields.get(fi + 1).is_some_and(|f| f.name == n),
                    None => true,
                };
                if follows {
                    candidates.push((bi, fi));
                }
            }
        }

        let (bi, fi) = match candidates.as_slice() {
            [] => return Err(AppError::NoMatch(description)),
            [one] => *one,
            many => {
                return Err(AppError::AmbiguousMatch {
                    count: many.len(),
                    message: description,
                })
            }
        };

        let layout = self.blocks[bi].fields[fi].clone();
        let at = layout.line + 1;
        let rendered: Vec<String> = fields.iter().map(|f| f.render(&layout)).collect();
        let count = rendered.len();

        let mut parsed = Vec::with_capacity(count);
        for (offset, line) in rendered.iter().enumerate() {
            match parse_field_line(line, at + offset)? {
                Some(decl) => parsed.push(decl),
                None => {
                    return Err(AppError::Parse {
                        line: at + offset + 1,
                        message: format!("rendered line `{}` declares no field", line.trim()),
                    })
                }
            }
        }

        for block in &mut self.blocks {
            if block.open_line >= at {
                block.open_line += count;
            }
            if block.close_line >= at {
                block.close_line += count;
            }
            for field in &mut block.fields {
                if field.line >= at {
                    field.line += count;
                }
            }
        }

        let block = &mut self.blocks[bi];
        block.fields.splice(fi + 1..fi + 1, parsed);
        self.lines.splice(at..at, rendered);

        Ok(at)
    }
}

fn describe_anchor(model: Option<&str>, anchor: &str, next: Option<&str>) -> String {
    let mut out = format!("field `{}`", anchor);
    if let Some(n) = next {
        out.push_str(&format!(" followed by `{}`", n));
    }
    if let Some(m) = model {
        out.push_str(&format!(" in model `{}`", m));
    }
    out
}
