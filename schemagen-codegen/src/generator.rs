//! Source file generators.

use crate::emit::{Fragment, RenderOptions};
use crate::error::CodegenError;
use crate::rust::{ExpandEmitter, SchemaPrinter};
use schemagen_core::{Reflect, TypeDesc};
use schemagen_schema::{Derivation, Filter, Walker};
use std::fmt;
use std::io::Write;

/// Produces the contents of one generated file.
pub trait Generator {
    /// Returns the file name the output is written to.
    fn filename(&self) -> &str;

    /// Generates the file contents into `out`.
    ///
    /// # Errors
    /// Returns an error if generation or writing fails. Nothing is written
    /// when generation fails.
    fn run(&self, out: &mut dyn Write) -> Result<(), CodegenError>;
}

/// Generator for a schema function and its expand functions.
///
/// # Example
/// ```ignore
/// let generator = SchemaGenerator::of::<DvsCreateSpec>("dvs_schema.rs", "dvs_schema")
///     .with_filter(|state: GenFieldState| -> Result<GenFieldState, FilterError> {
///         Ok(state)
///     });
/// let source = generator.generate()?;
/// ```
pub struct SchemaGenerator {
    subject: TypeDesc,
    file: String,
    function_name: String,
    filter: Option<Box<dyn Filter + Send + Sync>>,
    options: RenderOptions,
}

impl SchemaGenerator {
    /// Creates a generator for a type descriptor.
    #[must_use]
    pub fn new(subject: TypeDesc, file: impl Into<String>, function_name: impl Into<String>) -> Self {
        Self {
            subject,
            file: file.into(),
            function_name: function_name.into(),
            filter: None,
            options: RenderOptions::default(),
        }
    }

    /// Creates a generator for `T`.
    #[must_use]
    pub fn of<T: Reflect + ?Sized>(file: impl Into<String>, function_name: impl Into<String>) -> Self {
        Self::new(T::type_desc(), file, function_name)
    }

    /// Sets the field filter.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Filter + Send + Sync + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Sets the render options.
    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the subject descriptor.
    #[must_use]
    pub fn subject(&self) -> &TypeDesc {
        &self.subject
    }

    /// Returns the name of the generated schema function.
    #[must_use]
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// Derives the schema and metadata of the subject.
    ///
    /// # Errors
    /// Returns `CodegenError::Derive` if derivation fails.
    pub fn derive(&self) -> Result<Derivation, CodegenError> {
        let walker = match &self.filter {
            Some(filter) => Walker::with_filter(filter.as_ref()),
            None => Walker::new(),
        };
        Ok(walker.derive(&self.subject)?)
    }

    /// Generates the full file contents.
    ///
    /// Identical expand functions, produced when a type is reached through
    /// several fields, are written once.
    ///
    /// # Errors
    /// Returns an error if derivation or rendering fails.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let derivation = self.derive()?;

        let mut output = String::new();
        for import in &self.options.imports {
            output.push_str("#[allow(unused_imports)]\n");
            output.push_str(&format!("use {import};\n"));
        }
        if !self.options.imports.is_empty() {
            output.push('\n');
        }

        let map = SchemaPrinter::new(self.options.clone()).fragment(&derivation.schema)?;
        let function = Fragment::block(
            format!("pub fn {}() -> SchemaMap {{", self.function_name),
            vec![map],
            "}",
        );
        output.push_str(&self.options.render(&function)?);

        let expanders = ExpandEmitter::new(self.options.clone()).render(&derivation.meta)?;
        let mut written: Vec<&str> = Vec::with_capacity(expanders.len());
        for expander in &expanders {
            if written.contains(&expander.as_str()) {
                tracing::debug!("skipping duplicate expand function in '{}'", self.file);
                continue;
            }
            output.push('\n');
            output.push_str(expander);
            written.push(expander);
        }

        tracing::debug!(
            "generated '{}': {} schema keys, {} expand functions",
            self.file,
            derivation.schema.len(),
            written.len()
        );
        Ok(output)
    }
}

impl fmt::Debug for SchemaGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaGenerator")
            .field("subject", &self.subject.path)
            .field("file", &self.file)
            .field("function_name", &self.function_name)
            .field("filter", &self.filter.is_some())
            .field("options", &self.options)
            .finish()
    }
}

impl Generator for SchemaGenerator {
    fn filename(&self) -> &str {
        &self.file
    }

    fn run(&self, out: &mut dyn Write) -> Result<(), CodegenError> {
        let output = self.generate()?;
        out.write_all(output.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::IndentStyle;
    use schemagen_derive::Reflect;
    use schemagen_schema::{FilterError, GenFieldState};

    #[derive(Reflect)]
    #[schema(path = "types::Switch")]
    #[allow(dead_code)]
    struct Switch {
        name: String,
        uplink: Uplink,
    }

    #[derive(Reflect)]
    #[schema(path = "types::Uplink")]
    #[allow(dead_code)]
    struct Uplink {
        mtu: u32,
    }

    #[derive(Reflect)]
    #[allow(dead_code)]
    struct Looping {
        next: Vec<Looping>,
    }

    const EXPECTED: &str = "\
#[allow(unused_imports)]
use schemagen::schema::{AttrValue, Elem, Resource, ResourceData, Schema, SchemaMap, ValueKind, schema_map};
#[allow(unused_imports)]
use schemagen::schema::serde_json::{self, Value};

pub fn switch_schema() -> SchemaMap {
    schema_map! {
        \"name\" => Schema {
            kind: Some(ValueKind::String),
            required: true,
            ..Default::default()
        },
        \"uplink\" => Schema {
            kind: Some(ValueKind::List),
            elem: Some(Elem::Resource(Resource {
                schema: schema_map! {
                    \"mtu\" => Schema {
                        kind: Some(ValueKind::Int),
                        ..Default::default()
                    },
                },
            })),
            max_items: 1,
            ..Default::default()
        },
    }
}

pub fn expand_switch(d: &ResourceData) -> types::Switch {
    let mut obj = types::Switch::default();
    obj.name = d.get(\"name\").as_str().unwrap_or_default().to_owned();
    obj.uplink = expand_uplink(&d.get(\"uplink\")[0]);
    obj
}

pub fn expand_uplink(d: &Value) -> types::Uplink {
    let mut obj = types::Uplink::default();
    obj.mtu = u32::try_from(d[\"mtu\"].as_u64().unwrap_or_default()).unwrap_or_default();
    obj
}
";

    fn switch_generator() -> SchemaGenerator {
        SchemaGenerator::of::<Switch>("switch.rs", "switch_schema").with_filter(
            |state: GenFieldState| -> Result<GenFieldState, FilterError> {
                if state.name() == "name" {
                    Ok(state.with_schema(|s| s.required = true))
                } else {
                    Ok(state)
                }
            },
        )
    }

    #[test]
    fn test_generate_full_file() {
        let generator = switch_generator();
        assert_eq!(generator.filename(), "switch.rs");
        assert_eq!(generator.function_name(), "switch_schema");
        assert_eq!(generator.generate().unwrap(), EXPECTED);
    }

    #[test]
    fn test_run_writes_output() {
        let generator = switch_generator().with_options(
            RenderOptions::new().with_style(IndentStyle::DelimiterBalance),
        );
        let mut out = Vec::new();
        generator.run(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), EXPECTED);
    }

    #[test]
    fn test_custom_imports() {
        let generator = SchemaGenerator::of::<Uplink>("uplink.rs", "uplink_schema")
            .with_options(RenderOptions::new().with_imports(["crate::schema::*"]));
        let output = generator.generate().unwrap();
        assert!(output.starts_with(
            "#[allow(unused_imports)]\nuse crate::schema::*;\n\npub fn uplink_schema() -> SchemaMap {\n"
        ));

        let bare = SchemaGenerator::of::<Uplink>("uplink.rs", "uplink_schema")
            .with_options(RenderOptions::new().with_imports(Vec::<String>::new()));
        assert!(bare.generate().unwrap().starts_with("pub fn uplink_schema()"));
    }

    #[test]
    fn test_run_writes_nothing_on_error() {
        let generator = SchemaGenerator::of::<Looping>("looping.rs", "looping_schema");
        let mut out = Vec::new();
        let err = generator.run(&mut out).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::Derive(schemagen_schema::DeriveError::RecursiveType { .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_debug_omits_filter_body() {
        let text = format!("{:?}", switch_generator());
        assert!(text.contains("types::Switch"));
        assert!(text.contains("filter: true"));
    }
}
