use objdiff_core::{FieldType, Value, ValueType};
use objdiff_core_types::ScalarKind;

/// Type of the `Meta` record pointed to by `Doc.meta`
#[allow(dead_code)]
pub fn meta_type() -> ValueType {
    ValueType::struct_of(
        "Meta",
        vec![
            FieldType::new("owner", ValueType::string()),
            FieldType::new("score", ValueType::scalar(ScalarKind::F64)),
        ],
    )
}

/// Type of the `Doc` fixture record
#[allow(dead_code)]
pub fn doc_type() -> ValueType {
    ValueType::struct_of(
        "Doc",
        vec![
            FieldType::new("name", ValueType::string()),
            FieldType::new("tags", ValueType::seq_of(ValueType::string())),
            FieldType::new(
                "counts",
                ValueType::map_of(ScalarKind::Str, ValueType::scalar(ScalarKind::I64)),
            ),
            FieldType::new("grid", ValueType::array_of(ValueType::scalar(ScalarKind::U8), 3)),
            FieldType::new("meta", ValueType::ptr_to(meta_type())),
        ],
    )
}

/// Build a sequence of strings
#[allow(dead_code)]
pub fn strings(items: &[&str]) -> Value {
    Value::seq(
        ValueType::string(),
        items.iter().map(|s| Value::from(*s)).collect(),
    )
}

/// Build a string-keyed map of `i64`
#[allow(dead_code)]
pub fn counts(entries: &[(&str, i64)]) -> Value {
    Value::map(
        ScalarKind::Str,
        ValueType::scalar(ScalarKind::I64),
        entries.iter().map(|(k, v)| (*k, Value::from(*v))),
    )
    .expect("string keys")
}

/// Build a `Doc` record whose runtime type is [`doc_type`]
#[allow(dead_code)]
pub fn doc(
    name: &str,
    tags: &[&str],
    entries: &[(&str, i64)],
    grid: [u8; 3],
    meta: Option<(&str, f64)>,
) -> Value {
    let meta = match meta {
        Some((owner, score)) => Value::ptr(Value::record(
            "Meta",
            [("owner", Value::from(owner)), ("score", Value::from(score))],
        )),
        None => Value::null_ptr(meta_type()),
    };

    Value::record(
        "Doc",
        [
            ("name", Value::from(name)),
            ("tags", strings(tags)),
            ("counts", counts(entries)),
            (
                "grid",
                Value::array(
                    ValueType::scalar(ScalarKind::U8),
                    grid.iter().map(|b| Value::from(*b)).collect(),
                ),
            ),
            ("meta", meta),
        ],
    )
}

/// A small, fully populated `Doc`
#[allow(dead_code)]
pub fn sample_doc() -> Value {
    doc(
        "x",
        &["a", "b"],
        &[("k1", 1), ("k2", 2)],
        [1, 2, 3],
        Some(("ops", 0.5)),
    )
}
