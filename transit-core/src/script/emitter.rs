// Expression emitter
// Literal encoding rules for the JavaScript expressions the builder produces

use serde_json::Number;
use std::fmt::Write;

pub const NULL: &str = "null";
pub const SEPARATOR: &str = ", ";
pub const KEY_SEPARATOR: &str = ": ";

/// Append-only buffer of expression text
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    buf: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_raw(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    pub fn push_char(&mut self, c: char) {
        self.buf.push(c);
    }

    pub fn null(&mut self) {
        self.buf.push_str(NULL);
    }

    pub fn bool(&mut self, value: bool) {
        self.buf.push_str(if value { "true" } else { "false" });
    }

    /// Integers print exactly; floats use the shortest form that reads back
    /// to the same `f64`, which is also valid JavaScript.
    pub fn number(&mut self, value: &Number) {
        let _ = write!(self.buf, "{}", value);
    }

    pub fn string(&mut self, value: &str) {
        write_quoted(&mut self.buf, value);
    }

    pub fn begin_array(&mut self) {
        self.buf.push('[');
    }

    pub fn end_array(&mut self) {
        self.buf.push(']');
    }

    pub fn begin_object(&mut self) {
        self.buf.push('{');
    }

    pub fn end_object(&mut self) {
        self.buf.push('}');
    }

    pub fn separator(&mut self) {
        self.buf.push_str(SEPARATOR);
    }

    /// Quoted property name followed by `": "`
    pub fn key(&mut self, key: &str) {
        write_quoted(&mut self.buf, key);
        self.buf.push_str(KEY_SEPARATOR);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Take the buffered text, leaving the emitter empty
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }
}

/// Quote `value` as a JavaScript string literal.
///
/// The output is also a valid JSON string. Besides the mandatory escapes it
/// escapes `</` (so the script can sit inside a `<script>` element), C1
/// controls and the U+2028/U+2029 line terminators.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    write_quoted(&mut out, value);
    out
}

pub fn write_quoted(out: &mut String, value: &str) {
    out.reserve(value.len() + 2);
    out.push('"');

    let mut prev = '\0';
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '/' if prev == '<' => out.push_str("\\/"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            c if needs_unicode_escape(c) => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
        prev = c;
    }

    out.push('"');
}

fn needs_unicode_escape(c: char) -> bool {
    c < ' ' || ('\u{7f}'..='\u{9f}').contains(&c) || c == '\u{2028}' || c == '\u{2029}'
}
