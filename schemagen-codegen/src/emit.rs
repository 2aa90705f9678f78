//! Structured emission tree.
//!
//! Generators build [`Fragment`] trees instead of writing text with embedded
//! delimiters. Indentation is computed from tree depth, so the output does
//! not depend on what the lines contain.

use crate::error::CodegenError;
use crate::indent::{DEFAULT_INDENT, IndentWriter};
use std::io::Write;

/// A piece of generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// A single line, without indentation or newline.
    Line(String),
    /// An opening line, an indented body and a closing line.
    Block {
        /// Opening line.
        open: String,
        /// Body, one level deeper.
        body: Vec<Fragment>,
        /// Closing line.
        close: String,
    },
}

impl Fragment {
    /// Creates a line.
    pub fn line(text: impl Into<String>) -> Self {
        Self::Line(text.into())
    }

    /// Creates a block.
    pub fn block(open: impl Into<String>, body: Vec<Fragment>, close: impl Into<String>) -> Self {
        Self::Block {
            open: open.into(),
            body,
            close: close.into(),
        }
    }

    /// Renders the fragment, indenting by tree depth.
    ///
    /// Every line, including the last, ends with a newline.
    #[must_use]
    pub fn render(&self, indent: &str) -> String {
        let mut out = String::new();
        self.render_into(0, indent, &mut out);
        out
    }

    fn render_into(&self, depth: usize, indent: &str, out: &mut String) {
        match self {
            Self::Line(text) => push_line(depth, indent, text, out),
            Self::Block { open, body, close } => {
                push_line(depth, indent, open, out);
                for fragment in body {
                    fragment.render_into(depth + 1, indent, out);
                }
                push_line(depth, indent, close, out);
            }
        }
    }

    /// Writes the fragment's lines, unindented, in order.
    ///
    /// This is the input the delimiter-balance renderer indents.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_lines(&self, out: &mut dyn Write) -> std::io::Result<()> {
        match self {
            Self::Line(text) => writeln!(out, "{text}"),
            Self::Block { open, body, close } => {
                writeln!(out, "{open}")?;
                for fragment in body {
                    fragment.write_lines(out)?;
                }
                writeln!(out, "{close}")
            }
        }
    }
}

fn push_line(depth: usize, indent: &str, text: &str, out: &mut String) {
    for _ in 0..depth {
        out.push_str(indent);
    }
    out.push_str(text);
    out.push('\n');
}

/// How generated text is indented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentStyle {
    /// Indentation from the emission tree.
    #[default]
    Structured,
    /// Indentation from delimiter counting through [`IndentWriter`].
    DelimiterBalance,
}

/// Options shared by the schema serializer and the expand emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Indent unit.
    pub indent: String,
    /// Indentation strategy.
    pub style: IndentStyle,
    /// Parameter type of top-level expand functions.
    pub resource_data_type: String,
    /// Parameter type of nested expand functions.
    pub value_type: String,
    /// Path of the `serde_json` crate in generated code.
    pub json_crate: String,
    /// `use` declarations written before the generated items.
    pub imports: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            style: IndentStyle::Structured,
            resource_data_type: "ResourceData".to_string(),
            value_type: "Value".to_string(),
            json_crate: "serde_json".to_string(),
            imports: vec![
                "schemagen::schema::{AttrValue, Elem, Resource, ResourceData, Schema, SchemaMap, ValueKind, schema_map}".to_string(),
                "schemagen::schema::serde_json::{self, Value}".to_string(),
            ],
        }
    }
}

impl RenderOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indent unit.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Sets the indentation strategy.
    #[must_use]
    pub fn with_style(mut self, style: IndentStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the parameter type of top-level expand functions.
    #[must_use]
    pub fn with_resource_data_type(mut self, ty: impl Into<String>) -> Self {
        self.resource_data_type = ty.into();
        self
    }

    /// Sets the parameter type of nested expand functions.
    #[must_use]
    pub fn with_value_type(mut self, ty: impl Into<String>) -> Self {
        self.value_type = ty.into();
        self
    }

    /// Sets the path of the `serde_json` crate.
    #[must_use]
    pub fn with_json_crate(mut self, path: impl Into<String>) -> Self {
        self.json_crate = path.into();
        self
    }

    /// Replaces the `use` declarations.
    #[must_use]
    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Renders a fragment with the configured style.
    ///
    /// # Errors
    /// Returns an error if the delimiter-balance writer fails.
    pub fn render(&self, fragment: &Fragment) -> Result<String, CodegenError> {
        match self.style {
            IndentStyle::Structured => Ok(fragment.render(&self.indent)),
            IndentStyle::DelimiterBalance => {
                let mut writer = IndentWriter::new(Vec::new()).with_unit(self.indent.as_str());
                fragment.write_lines(&mut writer)?;
                String::from_utf8(writer.into_inner())
                    .map_err(|e| CodegenError::generation(format!("non UTF-8 output: {e}")))
            }
        }
    }
}
