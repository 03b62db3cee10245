//! HCL syntax tree to text.

use std::io;

use hcl::expr::TemplateExpr;
use hcl::format;
use hcl::{Attribute, Block, Body, Expression, ObjectKey, Structure};

use crate::error::WriteError;

const INDENT: &str = "  ";

/// Render `body` as HCL into `sink`.
///
/// Nested maps are printed as blocks, scalars as `key = value` and lists as
/// `key = [...]`. The sink is written to but not flushed or closed.
///
/// # Errors
///
/// Returns a [`WriteError`] if formatting fails or the sink rejects a write.
pub fn print<W>(body: &Body, mut sink: W) -> Result<(), WriteError>
where
    W: io::Write,
{
    let text = render(body)?;
    sink.write_all(text.as_bytes()).map_err(hcl::Error::from)?;
    Ok(())
}

/// Render `body` as an HCL string.
///
/// # Errors
///
/// Returns a [`WriteError`] if formatting fails.
pub fn render(body: &Body) -> Result<String, WriteError> {
    let mut printer = Printer::default();
    printer.body(body)?;
    Ok(printer.text)
}

/// Lays out bodies, blocks and collections. Leaves (scalars, templates,
/// keys and labels) are formatted by `hcl::format`.
///
/// Collections are not left to `hcl::format` because hcl-rs 0.18 drops the
/// comma after an empty `{}` or `[]` element of a list.
#[derive(Default)]
struct Printer {
    text: String,
    depth: usize,
}

impl Printer {
    fn body(&mut self, body: &Body) -> hcl::Result<()> {
        let mut previous_was_block = None;
        for structure in body {
            let is_block = matches!(structure, Structure::Block(_));
            // Blocks are set apart from their neighbours by a blank line.
            if previous_was_block.is_some_and(|was_block| was_block || is_block) {
                self.text.push('\n');
            }
            previous_was_block = Some(is_block);
            match structure {
                Structure::Attribute(attribute) => self.attribute(attribute)?,
                Structure::Block(block) => self.block(block)?,
            }
        }
        Ok(())
    }

    fn attribute(&mut self, attribute: &Attribute) -> hcl::Result<()> {
        self.indent();
        self.text.push_str(&attribute.key);
        self.text.push_str(" = ");
        self.expression(&attribute.expr)?;
        self.text.push('\n');
        Ok(())
    }

    fn block(&mut self, block: &Block) -> hcl::Result<()> {
        self.indent();
        self.text.push_str(&block.identifier);
        for label in &block.labels {
            self.text.push(' ');
            self.text.push_str(&format::to_string(label)?);
        }
        if block.body.0.is_empty() {
            self.text.push_str(" {}\n");
            return Ok(());
        }
        self.text.push_str(" {\n");
        self.nested(|printer| printer.body(&block.body))?;
        self.indent();
        self.text.push_str("}\n");
        Ok(())
    }

    fn expression(&mut self, expr: &Expression) -> hcl::Result<()> {
        match expr {
            Expression::Array(items) if !items.is_empty() => {
                self.text.push('[');
                self.nested(|printer| {
                    let mut previous_was_heredoc = false;
                    for (position, item) in items.iter().enumerate() {
                        if position > 0 {
                            // A heredoc's closing delimiter must end its line.
                            if previous_was_heredoc {
                                printer.text.push('\n');
                                printer.indent();
                            }
                            printer.text.push(',');
                        }
                        printer.text.push('\n');
                        printer.indent();
                        printer.expression(item)?;
                        previous_was_heredoc = is_heredoc(item);
                    }
                    Ok(())
                })?;
                self.text.push('\n');
                self.indent();
                self.text.push(']');
            }
            Expression::Object(entries) if !entries.is_empty() => {
                self.text.push('{');
                self.nested(|printer| {
                    for (key, value) in entries {
                        printer.text.push('\n');
                        printer.indent();
                        printer.object_key(key)?;
                        printer.text.push_str(" = ");
                        printer.expression(value)?;
                    }
                    Ok(())
                })?;
                self.text.push('\n');
                self.indent();
                self.text.push('}');
            }
            leaf => self.text.push_str(&format::to_string(leaf)?),
        }
        Ok(())
    }

    /// Keys are always quoted so `true`, `false` and `null` read back as keys.
    fn object_key(&mut self, key: &ObjectKey) -> hcl::Result<()> {
        let quoted = match key {
            ObjectKey::Identifier(identifier) => format::to_string(&identifier.to_string())?,
            other => format::to_string(other)?,
        };
        self.text.push_str(&quoted);
        Ok(())
    }

    fn nested<F>(&mut self, layout: F) -> hcl::Result<()>
    where
        F: FnOnce(&mut Self) -> hcl::Result<()>,
    {
        self.depth += 1;
        let outcome = layout(self);
        self.depth -= 1;
        outcome
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.text.push_str(INDENT);
        }
    }
}

fn is_heredoc(expr: &Expression) -> bool {
    matches!(expr, Expression::TemplateExpr(template) if matches!(**template, TemplateExpr::Heredoc(_)))
}
