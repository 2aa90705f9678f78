//! Expand function generation.
//!
//! For every struct level of a metadata tree an `expand_*` function is
//! generated that builds the typed value from its generic representation.
//! The top level reads from the resource data accessor, nested levels read
//! from the JSON value of one block.

use crate::emit::{Fragment, RenderOptions};
use crate::error::CodegenError;
use schemagen_core::{PointerKind, PrimitiveType, Shape, TypeDesc};
use schemagen_schema::{MetaResource, MetaSchema};
use std::collections::HashMap;

/// Generates expand functions from metadata trees.
#[derive(Debug, Clone, Default)]
pub struct ExpandEmitter {
    options: RenderOptions,
}

impl ExpandEmitter {
    /// Creates an emitter with the given options.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Builds one function per struct level, parent before nested levels.
    ///
    /// Nested levels follow in key order, each directly followed by its own
    /// nested levels. A type reached twice gets two functions.
    #[must_use]
    pub fn fragments(&self, meta: &MetaResource) -> Vec<Fragment> {
        let mut out = Vec::new();
        self.emit_level(meta, 0, &mut out);
        out
    }

    /// Renders one function per struct level.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if two different types would get
    /// an expand function of the same name.
    pub fn render(&self, meta: &MetaResource) -> Result<Vec<String>, CodegenError> {
        check_names(meta, &mut HashMap::new())?;
        self.fragments(meta)
            .iter()
            .map(|fragment| self.options.render(fragment))
            .collect()
    }

    fn emit_level(&self, meta: &MetaResource, depth: usize, out: &mut Vec<Fragment>) {
        let index = out.len();
        out.push(Fragment::line(""));

        let param = if depth == 0 {
            &self.options.resource_data_type
        } else {
            &self.options.value_type
        };
        let path = &meta.ty.path;

        let mut body = vec![Fragment::line(format!("let mut obj = {path}::default();"))];
        for key in meta.sorted_keys() {
            let entry = &meta.schema[key];
            let source = if depth == 0 {
                format!("d.get({key:?})")
            } else {
                format!("d[{key:?}]")
            };
            body.extend(self.assign(entry, &source));
            if let Some(elem) = &entry.elem {
                self.emit_level(elem, depth + 1, out);
            }
        }
        body.push(Fragment::line("obj"));

        tracing::trace!("emitted {} for '{}'", meta.expand_fn_name(), path);
        out[index] = Fragment::block(
            format!("pub fn {}(d: &{param}) -> {path} {{", meta.expand_fn_name()),
            body,
            "}",
        );
    }

    /// Builds the statements that assign one field.
    fn assign(&self, entry: &MetaSchema, source: &str) -> Vec<Fragment> {
        let place = entry.place("obj");
        let declared = entry.field.declared_type();
        let layers = declared.pointer_layers();
        let ty = declared.effective();
        let nested = entry.elem.as_ref();

        match &ty.shape {
            Shape::Primitive(prim) => {
                let value = layered(
                    &layers,
                    scalar(source, *prim),
                    present_scalar(source, *prim),
                );
                vec![Fragment::line(format!("{place} = {value};"))]
            }
            Shape::Struct(_) if nested.is_some() => {
                let value = layered(
                    &layers,
                    nested_call(nested, &format!("&{source}[0]")),
                    format!(
                        "{source}.get(0).filter(|v| !v.is_null()).map(|v| {})",
                        nested_call(nested, "v")
                    ),
                );
                vec![Fragment::line(format!("{place} = {value};"))]
            }
            Shape::Seq(_, elem) => {
                let binding = format!("s_{}", entry.field.binding_name());
                let elem = elem();
                let item = match element(&elem, "v", nested) {
                    Some(value) => format!("let w = {value};"),
                    None => format!(
                        "let w: {} = {};",
                        elem.path,
                        self.from_value("v.clone()")
                    ),
                };
                let collected = format!("{binding}.into_iter().collect()");
                let value = layered(
                    &layers,
                    collected.clone(),
                    format!("{source}.as_array().map(|_| {collected})"),
                );
                vec![
                    Fragment::line(format!("let mut {binding} = Vec::new();")),
                    Fragment::block(
                        format!("for v in {source}.as_array().into_iter().flatten() {{"),
                        vec![
                            Fragment::line(item),
                            Fragment::line(format!("{binding}.push(w);")),
                        ],
                        "}",
                    ),
                    Fragment::line(format!("{place} = {value};")),
                ]
            }
            Shape::Map(_, key, value) if is_string(&key()) => {
                match element(&value(), "v", None) {
                    Some(cast) => {
                        let pairs = format!("map(|(k, v)| (k.clone(), {cast})).collect()");
                        let collected = layered(
                            &layers,
                            format!("{source}.as_object().into_iter().flatten().{pairs}"),
                            format!("{source}.as_object().map(|m| m.iter().{pairs})"),
                        );
                        vec![Fragment::line(format!("{place} = {collected};"))]
                    }
                    None => self.fallback(&place, source),
                }
            }
            _ => self.fallback(&place, source),
        }
    }

    fn fallback(&self, place: &str, source: &str) -> Vec<Fragment> {
        let value = self.from_value(&format!("{source}.clone()"));
        vec![Fragment::line(format!("{place} = {value};"))]
    }

    fn from_value(&self, value: &str) -> String {
        format!(
            "{}::from_value({value}).unwrap_or_default()",
            self.options.json_crate
        )
    }
}

/// Renders the expand functions of a metadata tree with the default options.
///
/// # Errors
/// See [`ExpandEmitter::render`].
pub fn expand(meta: &MetaResource) -> Result<Vec<String>, CodegenError> {
    ExpandEmitter::default().render(meta)
}

/// Fails if two different types map to the same expand function name.
fn check_names<'m>(
    meta: &'m MetaResource,
    seen: &mut HashMap<String, &'m str>,
) -> Result<(), CodegenError> {
    let name = meta.expand_fn_name();
    let path: &str = &meta.ty.path;
    if let Some(previous) = seen.get(&name) {
        if *previous != path {
            return Err(CodegenError::generation(format!(
                "expand function '{name}' would be generated for both '{previous}' and '{path}'"
            )));
        }
    } else {
        seen.insert(name, path);
    }
    for entry in meta.schema.values() {
        if let Some(elem) = &entry.elem {
            check_names(elem, seen)?;
        }
    }
    Ok(())
}

/// Returns the expression converting one element, if it has a direct form.
fn element(ty: &TypeDesc, source: &str, nested: Option<&MetaResource>) -> Option<String> {
    let layers = ty.pointer_layers();
    let ty = ty.effective();
    let value = match &ty.shape {
        Shape::Primitive(prim) => layered(
            &layers,
            scalar(source, *prim),
            present_scalar(source, *prim),
        ),
        Shape::Struct(_) if nested.is_some() => layered(
            &layers,
            nested_call(nested, source),
            format!(
                "Some({source}).filter(|v| !v.is_null()).map(|v| {})",
                nested_call(nested, "v")
            ),
        ),
        _ => return None,
    };
    Some(value)
}

fn nested_call(nested: Option<&MetaResource>, arg: &str) -> String {
    let name = nested.map(MetaResource::expand_fn_name).unwrap_or_default();
    format!("{name}({arg})")
}

fn is_string(ty: &TypeDesc) -> bool {
    ty.as_primitive() == Some(PrimitiveType::String)
}

/// Returns the expression reading a primitive from a JSON value.
///
/// Missing, null, mistyped and out-of-range values read as the default.
fn scalar(source: &str, prim: PrimitiveType) -> String {
    match prim {
        PrimitiveType::Bool => format!("{source}.as_bool().unwrap_or_default()"),
        PrimitiveType::String => format!("{source}.as_str().unwrap_or_default().to_owned()"),
        PrimitiveType::Char => {
            format!("{source}.as_str().and_then(|s| s.chars().next()).unwrap_or_default()")
        }
        PrimitiveType::Int64 => format!("{source}.as_i64().unwrap_or_default()"),
        PrimitiveType::Uint64 => format!("{source}.as_u64().unwrap_or_default()"),
        PrimitiveType::Double => format!("{source}.as_f64().unwrap_or_default()"),
        prim if prim.is_signed() => format!(
            "{}::try_from({source}.as_i64().unwrap_or_default()).unwrap_or_default()",
            prim.rust_type()
        ),
        prim if prim.is_unsigned() => format!(
            "{}::try_from({source}.as_u64().unwrap_or_default()).unwrap_or_default()",
            prim.rust_type()
        ),
        prim => format!("{source}.as_f64().unwrap_or_default() as {}", prim.rust_type()),
    }
}

/// Returns the expression reading a primitive from a JSON value as an
/// `Option`: `None` for missing, null, mistyped and out-of-range values.
fn present_scalar(source: &str, prim: PrimitiveType) -> String {
    match prim {
        PrimitiveType::Bool => format!("{source}.as_bool()"),
        PrimitiveType::String => format!("{source}.as_str().map(str::to_owned)"),
        PrimitiveType::Char => format!("{source}.as_str().and_then(|s| s.chars().next())"),
        PrimitiveType::Int64 => format!("{source}.as_i64()"),
        PrimitiveType::Uint64 => format!("{source}.as_u64()"),
        PrimitiveType::Double => format!("{source}.as_f64()"),
        prim if prim.is_signed() => format!(
            "{source}.as_i64().and_then(|n| {}::try_from(n).ok())",
            prim.rust_type()
        ),
        prim if prim.is_unsigned() => format!(
            "{source}.as_u64().and_then(|n| {}::try_from(n).ok())",
            prim.rust_type()
        ),
        prim => format!("{source}.as_f64().map(|n| n as {})", prim.rust_type()),
    }
}

/// Wraps a conversion in pointer layers, outermost first.
///
/// Below the outermost `Option` layer the value comes from `present`, an
/// expression that is already an `Option`, so absent data stays `None`.
fn layered(layers: &[PointerKind], plain: String, present: String) -> String {
    match layers.iter().position(|layer| *layer == PointerKind::Option) {
        Some(at) => {
            let inner = &layers[at + 1..];
            let value = if inner.is_empty() {
                present
            } else {
                format!("{present}.map(|v| {})", wrap(inner, "v".to_owned()))
            };
            wrap(&layers[..at], value)
        }
        None => wrap(layers, plain),
    }
}

/// Wraps a value in pointer layers, outermost first.
fn wrap(layers: &[PointerKind], value: String) -> String {
    layers
        .iter()
        .rev()
        .fold(value, |value, layer| layer.wrap(&value))
}
