//! Writer — a `Value` tree back into JONC text.
//!
//! Two axes, combined in a [`Style`]: whether comments are emitted, and
//! whether the output spreads over indented lines. The marshalling engine's
//! string coercion consumes [`encode_compact`]; configuration files are
//! written with [`encode_pretty`].
//!
//! Number rendering keeps the document model's int/float split intact: floats
//! always carry a decimal point or exponent (`42.0`, never `42`), and
//! non-finite floats render as `null`.

use crate::value::{Object, Primitive, Value};

/// Rendering options.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    /// Emit `/* … */` comments before commented object entries.
    pub comments: bool,
    /// Spread output over tab-indented lines instead of a single line.
    pub newlines: bool,
}

/// Render with the given style.
pub fn encode(value: &Value, style: &Style) -> String {
    let mut out = String::new();
    encode_value(value, style, 0, &mut out);
    out
}

/// Single-line form without comments: `{ "a": 1, "b": [ true, null ] }`.
pub fn encode_compact(value: &Value) -> String {
    encode(
        value,
        &Style {
            comments: false,
            newlines: false,
        },
    )
}

/// Multi-line, tab-indented form with comments.
pub fn encode_pretty(value: &Value) -> String {
    encode(
        value,
        &Style {
            comments: true,
            newlines: true,
        },
    )
}

fn encode_value(value: &Value, style: &Style, depth: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Primitive(p) => encode_primitive(p, out),
        Value::Array(items) => encode_array(items, style, depth, out),
        Value::Object(object) => encode_object(object, style, depth, out),
    }
}

fn encode_primitive(p: &Primitive, out: &mut String) {
    match p {
        Primitive::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Primitive::Int(n) => out.push_str(&n.to_string()),
        Primitive::Float(f) => encode_float(*f, out),
        Primitive::Str(s) => encode_string(s, out),
        Primitive::Char(c) => {
            let mut buffer = [0u8; 4];
            encode_string(c.encode_utf8(&mut buffer), out);
        }
    }
}

fn encode_float(f: f64, out: &mut String) {
    if !f.is_finite() {
        out.push_str("null");
        return;
    }
    // Debug formatting keeps a ".0" on integral values, so the parser reads
    // the result back as a float rather than an integer.
    out.push_str(&format!("{f:?}"));
}

fn encode_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn encode_array(items: &[Value], style: &Style, depth: usize, out: &mut String) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push('[');
    let mut first = true;
    for item in items {
        if !first {
            out.push(',');
        }
        first = false;
        open_entry(style, depth + 1, out);
        encode_value(item, style, depth + 1, out);
    }
    close_container(style, depth, out);
    out.push(']');
}

fn encode_object(object: &Object, style: &Style, depth: usize, out: &mut String) {
    if object.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push('{');
    let mut first = true;
    for (key, value, comment) in object.iter_commented() {
        if !first {
            out.push(',');
        }
        first = false;
        open_entry(style, depth + 1, out);
        if style.comments {
            if let Some(comment) = comment {
                out.push_str("/* ");
                out.push_str(comment);
                out.push_str(" */");
                open_entry(style, depth + 1, out);
            }
        }
        encode_string(key, out);
        out.push_str(": ");
        encode_value(value, style, depth + 1, out);
    }
    close_container(style, depth, out);
    out.push('}');
}

/// Line break plus indentation before an entry, or a single space inline.
fn open_entry(style: &Style, depth: usize, out: &mut String) {
    if style.newlines {
        out.push('\n');
        push_indent(depth, out);
    } else {
        out.push(' ');
    }
}

fn close_container(style: &Style, depth: usize, out: &mut String) {
    if style.newlines {
        out.push('\n');
        push_indent(depth, out);
    } else {
        out.push(' ');
    }
}

fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push('\t');
    }
}
