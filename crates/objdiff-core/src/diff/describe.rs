//! Human-readable rendering of change sets.
//!
//! The output is intended for logs and review displays only. It is not a
//! parseable format and may change between versions.

use crate::diff::model::ChangeSet;
use crate::value::Value;

/// Render a change set as a short multi-line summary.
pub fn render_change_set(change_set: &ChangeSet) -> String {
    let mut out = String::new();

    out.push_str(&format!("BaseType: {}\n", change_set.base_type()));

    if change_set.is_empty() {
        out.push_str("Changes: none\n");
        return out;
    }

    out.push_str(&format!("Changes ({}):\n", change_set.len()));
    for (i, change) in change_set.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, change));
    }

    out
}

/// Render a captured value on one line.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Scalar(s) => s.to_string(),
        Value::Struct(s) => {
            let fields: Vec<String> = s
                .fields
                .iter()
                .map(|f| format!("{}: {}", f.name, render_value(&f.value)))
                .collect();
            format!("{} {{{}}}", s.name, fields.join(", "))
        }
        Value::Map(m) => {
            let entries: Vec<String> = m
                .entries
                .iter()
                .map(|(k, v)| format!("{}: {}", k, render_value(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Value::Array(a) => render_items(&a.items),
        Value::Seq(s) => render_items(&s.items),
        Value::Ptr(p) => match &p.target {
            Some(pointee) => format!("&{}", render_value(pointee)),
            None => "nil".to_string(),
        },
        Value::Opaque(o) => format!("<{}>", o.type_name),
    }
}

fn render_items(items: &[Value]) -> String {
    let rendered: Vec<String> = items.iter().map(render_value).collect();
    format!("[{}]", rendered.join(", "))
}
