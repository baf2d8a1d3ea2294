use std::fmt::{self, Display, Write as _};

use chk_core::Value;

/// Free-form context attached to an assertion failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    args: Vec<Value>,
    pretty: bool,
}

impl Comment {
    /// Concatenates the values, separating two operands with a space when
    /// neither of them is a string.
    pub fn plain(args: Vec<Value>) -> Self {
        Self {
            args,
            pretty: false,
        }
    }

    /// Dumps every value with its kind and nested structure.
    pub fn pretty(args: Vec<Value>) -> Self {
        Self { args, pretty: true }
    }

    /// Renders the annotation string.
    pub fn render(&self) -> String {
        if self.pretty {
            self.args.iter().map(dump).collect::<Vec<_>>().join(" ")
        } else {
            concat(&self.args)
        }
    }
}

impl Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn concat(args: &[Value]) -> String {
    let mut out = String::new();
    let mut prev_is_string = true;
    for (idx, arg) in args.iter().enumerate() {
        let is_string = matches!(arg, Value::Str(_));
        if idx > 0 && !is_string && !prev_is_string {
            out.push(' ');
        }
        let _ = write!(out, "{arg}");
        prev_is_string = is_string;
    }
    out
}

/// Structural dump of a value, terminated by a newline.
pub fn dump(value: &Value) -> String {
    let mut out = String::new();
    dump_into(value, 0, &mut out);
    out.push('\n');
    out
}

fn indent(depth: usize, out: &mut String) {
    out.extend(std::iter::repeat(' ').take(depth));
}

fn dump_into(value: &Value, depth: usize, out: &mut String) {
    let kind = value.kind();
    match value {
        Value::Nil => out.push_str("(nil) <nil>"),
        Value::Str(text) => {
            let _ = write!(out, "({kind}) (len={}) {text:?}", text.len());
        }
        Value::Error(err) => {
            let _ = write!(out, "({kind}) {:?}", err.message());
        }
        Value::Seq(seq) => {
            let _ = write!(out, "({kind}) (len={}) {{", seq.len());
            if seq.is_empty() {
                out.push('}');
                return;
            }
            out.push('\n');
            for item in &seq.items {
                indent(depth + 1, out);
                dump_into(item, depth + 1, out);
                out.push_str(",\n");
            }
            indent(depth, out);
            out.push('}');
        }
        Value::Map(map) => {
            let _ = write!(out, "({kind}) (len={}) {{", map.len());
            if map.is_empty() {
                out.push('}');
                return;
            }
            out.push('\n');
            for (key, entry) in map.iter() {
                indent(depth + 1, out);
                dump_into(key, depth + 1, out);
                out.push_str(": ");
                dump_into(entry, depth + 1, out);
                out.push_str(",\n");
            }
            indent(depth, out);
            out.push('}');
        }
        Value::Record(record) => {
            let _ = write!(out, "({kind}) {{");
            if record.fields.is_empty() {
                out.push('}');
                return;
            }
            out.push('\n');
            for (name, field) in &record.fields {
                indent(depth + 1, out);
                let _ = write!(out, "{name}: ");
                dump_into(field, depth + 1, out);
                out.push_str(",\n");
            }
            indent(depth, out);
            out.push('}');
        }
        scalar => {
            let _ = write!(out, "({kind}) {scalar}");
        }
    }
}
