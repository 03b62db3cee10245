//! JSON bytes to an HCL syntax tree.

use hcl::expr::{Heredoc, TemplateExpr};
use hcl::structure::{BlockBuilder, BodyBuilder};
use hcl::{Attribute, Block, Body, Expression, Identifier, Object, ObjectKey};
use serde_json::{Map, Value};

use crate::error::ParseError;

/// Decode JSON produced by [`super::encode`] into an HCL body.
///
/// A nested object becomes a block when every one of its keys is a valid HCL
/// identifier. Otherwise it becomes an attribute holding an object
/// expression with quoted keys, which decodes back to the same map. Objects
/// inside arrays are always object expressions.
///
/// Strings containing `${` or `%{` are written as templates, so references,
/// function calls and directives read from the source text come back as they
/// were written. A literal escaped as `$${` in the source therefore comes back
/// as an interpolation.
///
/// # Errors
///
/// Returns a [`ParseError`] if the bytes are not valid JSON, the root is not
/// an object, or a body-level key is not a valid HCL identifier.
pub fn decode(label: &str, bytes: &[u8]) -> Result<Body, ParseError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|source| ParseError::Json {
        document: label.to_owned(),
        line: source.line(),
        column: source.column(),
        source,
    })?;
    match value {
        Value::Object(entries) => Ok(fill(Body::builder(), label, entries)?.build()),
        other => Err(ParseError::RootNotObject {
            document: label.to_owned(),
            found: json_kind(&other),
        }),
    }
}

/// The two HCL builders share the operations needed to lay out a body.
trait StructureSink: Sized {
    fn attribute(self, attribute: Attribute) -> Self;
    fn block(self, block: Block) -> Self;
}

impl StructureSink for BodyBuilder {
    fn attribute(self, attribute: Attribute) -> Self {
        self.add_attribute(attribute)
    }

    fn block(self, block: Block) -> Self {
        self.add_block(block)
    }
}

impl StructureSink for BlockBuilder {
    fn attribute(self, attribute: Attribute) -> Self {
        self.add_attribute(attribute)
    }

    fn block(self, block: Block) -> Self {
        self.add_block(block)
    }
}

fn fill<S>(mut sink: S, label: &str, entries: Map<String, Value>) -> Result<S, ParseError>
where
    S: StructureSink,
{
    for (key, value) in entries {
        let Some(name) = identifier(&key) else {
            return Err(ParseError::InvalidIdentifier {
                document: label.to_owned(),
                key,
            });
        };
        sink = match value {
            Value::Object(nested) if nested.keys().all(|nested_key| is_identifier(nested_key)) => {
                let block = fill(Block::builder(name), label, nested)?.build();
                sink.block(block)
            }
            other => sink.attribute(Attribute::new(name, expression(other))),
        };
    }
    Ok(sink)
}

fn expression(value: Value) -> Expression {
    match value {
        Value::Null => Expression::Null,
        Value::Bool(flag) => Expression::Bool(flag),
        Value::Number(number) => number_expression(&number),
        Value::String(text) => string_expression(text),
        Value::Array(items) => Expression::Array(items.into_iter().map(expression).collect()),
        Value::Object(entries) => Expression::Object(
            entries
                .into_iter()
                .map(|(key, entry)| {
                    (ObjectKey::Expression(Expression::String(key)), expression(entry))
                })
                .collect::<Object<ObjectKey, Expression>>(),
        ),
    }
}

fn number_expression(number: &serde_json::Number) -> Expression {
    if let Some(integer) = number.as_i64() {
        Expression::from(integer)
    } else if let Some(unsigned) = number.as_u64() {
        Expression::from(unsigned)
    } else {
        number.as_f64().map_or(Expression::Null, Expression::from)
    }
}

fn string_expression(text: String) -> Expression {
    if !is_template(&text) {
        return Expression::String(text);
    }
    if text.ends_with('\n') {
        let delimiter = heredoc_delimiter(&text);
        Expression::from(Heredoc::new(Identifier::from(delimiter), text))
    } else {
        Expression::from(TemplateExpr::QuotedString(text.replace('\n', "\\n")))
    }
}

fn is_template(text: &str) -> bool {
    text.contains("${") || text.contains("%{")
}

/// `EOT`, lengthened until no line of the template closes the heredoc early.
fn heredoc_delimiter(text: &str) -> String {
    let mut delimiter = String::from("EOT");
    while text.lines().any(|line| line.trim() == delimiter) {
        delimiter.push('_');
    }
    delimiter
}

fn identifier(key: &str) -> Option<Identifier> {
    Identifier::new(key).ok()
}

fn is_identifier(key: &str) -> bool {
    identifier(key).is_some()
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}
