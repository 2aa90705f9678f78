//! Delimiter-balance indentation.
//!
//! [`IndentWriter`] indents text streamed through it by counting opening and
//! closing delimiters. It knows nothing about the structure of what it
//! writes, so it only produces correct output for text whose delimiters are
//! balanced line by line and do not appear inside string literals.

use std::io::{self, Write};

/// Default indent unit.
pub const DEFAULT_INDENT: &str = "    ";

const fn is_opener(b: u8) -> bool {
    matches!(b, b'{' | b'(' | b'[')
}

const fn is_closer(b: u8) -> bool {
    matches!(b, b'}' | b')' | b']')
}

/// Writer that prefixes lines with indentation tracked from delimiters.
///
/// For every write:
/// 1. if the first delimiter in the written text is a closer, the depth
///    drops by one (never below zero);
/// 2. the text is prefixed with `depth` indent units, unless an earlier
///    write left a line unterminated;
/// 3. the text is appended to a line buffer; once the buffer ends with a
///    newline, the depth grows by one if it holds more openers than closers,
///    and the buffer is cleared.
///
/// # Example
/// ```
/// use schemagen_codegen::IndentWriter;
/// use std::io::Write;
///
/// let mut w = IndentWriter::new(Vec::new());
/// write!(w, "fn main() {{\n").unwrap();
/// write!(w, "run();\n").unwrap();
/// write!(w, "}}\n").unwrap();
/// assert_eq!(w.into_inner(), b"fn main() {\n    run();\n}\n");
/// ```
#[derive(Debug)]
pub struct IndentWriter<W> {
    inner: W,
    depth: usize,
    unit: String,
    line: Vec<u8>,
}

impl<W: Write> IndentWriter<W> {
    /// Creates a writer at depth zero.
    pub fn new(inner: W) -> Self {
        Self::with_depth(inner, 0)
    }

    /// Creates a writer starting at the given depth.
    pub fn with_depth(inner: W, depth: usize) -> Self {
        Self {
            inner,
            depth,
            unit: DEFAULT_INDENT.to_string(),
            line: Vec::new(),
        }
    }

    /// Sets the indent unit.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Returns the current depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Consumes the writer, returning the underlying one.
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn outdent(&mut self, buf: &[u8]) {
        for &b in buf {
            if is_opener(b) {
                return;
            }
            if is_closer(b) {
                self.depth = self.depth.saturating_sub(1);
                return;
            }
        }
    }

    fn indent(&mut self, buf: &[u8]) {
        self.line.extend_from_slice(buf);
        if self.line.last() != Some(&b'\n') {
            return;
        }
        let openers = self.line.iter().filter(|&&b| is_opener(b)).count();
        let closers = self.line.iter().filter(|&&b| is_closer(b)).count();
        if openers > closers {
            self.depth += 1;
        }
        self.line.clear();
    }
}

impl<W: Write> Write for IndentWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.outdent(buf);
        if self.line.is_empty() {
            for _ in 0..self.depth {
                self.inner.write_all(self.unit.as_bytes())?;
            }
        }
        self.inner.write_all(buf)?;
        self.indent(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(w: IndentWriter<Vec<u8>>) -> String {
        String::from_utf8(w.into_inner()).expect("utf-8 output")
    }

    #[test]
    fn test_nested_blocks() {
        let mut w = IndentWriter::new(Vec::new());
        for line in ["outer {\n", "inner(\n", "value,\n", "),\n", "}\n"] {
            w.write_all(line.as_bytes()).unwrap();
        }
        assert_eq!(w.depth(), 0);
        assert_eq!(output(w), "outer {\n    inner(\n        value,\n    ),\n}\n");
    }

    #[test]
    fn test_balanced_line_keeps_depth() {
        let mut w = IndentWriter::with_depth(Vec::new(), 1);
        w.write_all(b"kind: Some(ValueKind::Int),\n").unwrap();
        w.write_all(b"conflicts_with: vec![\"a\".into()],\n").unwrap();
        assert_eq!(w.depth(), 1);
        assert_eq!(
            output(w),
            "    kind: Some(ValueKind::Int),\n    conflicts_with: vec![\"a\".into()],\n"
        );
    }

    #[test]
    fn test_fragment_continuation() {
        let mut w = IndentWriter::with_depth(Vec::new(), 1);
        w.write_all(b"schema: ").unwrap();
        w.write_all(b"schema_map! {\n").unwrap();
        assert_eq!(w.depth(), 2);
        w.write_all(b"}").unwrap();
        w.write_all(b",").unwrap();
        w.write_all(b"\n").unwrap();
        assert_eq!(w.depth(), 1);
        assert_eq!(output(w), "    schema: schema_map! {\n    },\n");
    }

    #[test]
    fn test_depth_floors_at_zero() {
        let mut w = IndentWriter::new(Vec::new());
        w.write_all(b"}\n").unwrap();
        w.write_all(b"})\n").unwrap();
        assert_eq!(w.depth(), 0);
        assert_eq!(output(w), "}\n})\n");
    }

    #[test]
    fn test_multiple_openers_indent_once() {
        let mut w = IndentWriter::new(Vec::new()).with_unit("\t");
        w.write_all(b"elem: Some(Elem::Resource(Resource {\n").unwrap();
        assert_eq!(w.depth(), 1);
        w.write_all(b"schema: schema_map! {},\n").unwrap();
        w.write_all(b"})),\n").unwrap();
        assert_eq!(w.depth(), 0);
        assert_eq!(
            output(w),
            "elem: Some(Elem::Resource(Resource {\n\tschema: schema_map! {},\n})),\n"
        );
    }

    #[test]
    fn test_write_reports_caller_bytes() {
        let mut w = IndentWriter::with_depth(Vec::new(), 3);
        assert_eq!(w.write(b"x\n").unwrap(), 2);
        assert_eq!(w.write(b"").unwrap(), 0);
        assert_eq!(w.get_ref().len(), 14);
    }
}
