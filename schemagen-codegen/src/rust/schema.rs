//! Schema source generation.
//!
//! Renders a [`SchemaMap`] as a `schema_map!` expression. Keys are sorted and
//! only attributes that differ from their default are written.

use crate::emit::{Fragment, RenderOptions};
use crate::error::CodegenError;
use schemagen_schema::{AttrValue, Elem, Schema, SchemaMap};
use std::io::Write;

/// Renders schema mappings as Rust source.
#[derive(Debug, Clone, Default)]
pub struct SchemaPrinter {
    options: RenderOptions,
}

impl SchemaPrinter {
    /// Creates a printer with the given options.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Returns the render options.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Builds the emission tree of a top-level mapping.
    ///
    /// # Errors
    /// Returns `CodegenError::Unrenderable` if a default value has no source
    /// form.
    pub fn fragment(&self, schema: &SchemaMap) -> Result<Fragment, CodegenError> {
        map_fragment(schema, "schema_map! {", "}")
    }

    /// Renders a top-level mapping to a string.
    ///
    /// # Errors
    /// See [`SchemaPrinter::fragment`].
    pub fn render(&self, schema: &SchemaMap) -> Result<String, CodegenError> {
        let fragment = self.fragment(schema)?;
        self.options.render(&fragment)
    }

    /// Writes a top-level mapping.
    ///
    /// Nothing is written if the mapping cannot be rendered.
    ///
    /// # Errors
    /// See [`SchemaPrinter::fragment`]; also returns IO errors from `out`.
    pub fn print(&self, schema: &SchemaMap, out: &mut dyn Write) -> Result<(), CodegenError> {
        let text = self.render(schema)?;
        out.write_all(text.as_bytes())?;
        Ok(())
    }
}

/// Writes a schema mapping with the default options.
///
/// # Errors
/// See [`SchemaPrinter::print`].
pub fn serialize(schema: &SchemaMap, out: &mut impl Write) -> Result<(), CodegenError> {
    SchemaPrinter::default().print(schema, out)
}

fn map_fragment(schema: &SchemaMap, open: &str, close: &str) -> Result<Fragment, CodegenError> {
    let mut keys: Vec<&String> = schema.keys().collect();
    keys.sort_unstable();

    let mut body = Vec::with_capacity(keys.len());
    for key in keys {
        body.push(entry_fragment(key, &schema[key])?);
    }
    Ok(Fragment::block(open, body, close))
}

fn entry_fragment(key: &str, schema: &Schema) -> Result<Fragment, CodegenError> {
    let mut body = Vec::new();

    if let Some(kind) = schema.kind {
        body.push(Fragment::line(format!("kind: Some(ValueKind::{kind}),")));
    }
    if schema.optional {
        body.push(Fragment::line("optional: true,"));
    }
    if schema.required {
        body.push(Fragment::line("required: true,"));
    }
    if let Some(value) = &schema.default {
        let value = attr_value("default", value)?;
        body.push(Fragment::line(format!("default: Some({value}),")));
    }
    push_string(&mut body, "description", &schema.description);
    push_string(&mut body, "input_default", &schema.input_default);
    if schema.computed {
        body.push(Fragment::line("computed: true,"));
    }
    if schema.force_new {
        body.push(Fragment::line("force_new: true,"));
    }
    match &schema.elem {
        Some(Elem::Schema(elem)) => {
            let inner = match elem.kind {
                Some(kind) => {
                    format!("Schema {{ kind: Some(ValueKind::{kind}), ..Default::default() }}")
                }
                None => "Schema::default()".to_string(),
            };
            body.push(Fragment::line(format!(
                "elem: Some(Elem::Schema(Box::new({inner}))),"
            )));
        }
        Some(Elem::Resource(resource)) => {
            let nested = map_fragment(&resource.schema, "schema: schema_map! {", "},")?;
            body.push(Fragment::block(
                "elem: Some(Elem::Resource(Resource {",
                vec![nested],
                "})),",
            ));
        }
        None => {}
    }
    if schema.max_items != 0 {
        body.push(Fragment::line(format!("max_items: {},", schema.max_items)));
    }
    if schema.min_items != 0 {
        body.push(Fragment::line(format!("min_items: {},", schema.min_items)));
    }
    if !schema.conflicts_with.is_empty() {
        let keys: Vec<String> = schema
            .conflicts_with
            .iter()
            .map(|k| format!("{k:?}.into()"))
            .collect();
        body.push(Fragment::line(format!(
            "conflicts_with: vec![{}],",
            keys.join(", ")
        )));
    }
    push_string(&mut body, "deprecated", &schema.deprecated);
    push_string(&mut body, "removed", &schema.removed);
    if schema.sensitive {
        body.push(Fragment::line("sensitive: true,"));
    }
    body.push(Fragment::line("..Default::default()"));

    Ok(Fragment::block(format!("{key:?} => Schema {{"), body, "},"))
}

fn push_string(body: &mut Vec<Fragment>, attribute: &str, value: &str) {
    if !value.is_empty() {
        body.push(Fragment::line(format!("{attribute}: {value:?}.into(),")));
    }
}

/// Returns the source form of an attribute value.
fn attr_value(attribute: &str, value: &AttrValue) -> Result<String, CodegenError> {
    match value {
        AttrValue::Bool(b) => Ok(format!("AttrValue::Bool({b})")),
        AttrValue::Int(i) => Ok(format!("AttrValue::Int({i})")),
        AttrValue::Float(f) if f.is_finite() => Ok(format!("AttrValue::Float({f:?})")),
        AttrValue::String(s) => Ok(format!("AttrValue::String({s:?}.into())")),
        AttrValue::Float(_) | AttrValue::List(_) => {
            Err(CodegenError::unrenderable(attribute, value))
        }
    }
}
