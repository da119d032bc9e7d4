//! Path navigation over mutable value graphs.
//!
//! A navigator walks a [`Path`] one step at a time from a root value and then
//! sets or deletes the terminal location. Missing intermediate locations are
//! materialized with zero values when the [`NavigatorConfig`] allows it.

use crate::errors::NavigationError;
use crate::path::{Path, PathStep};
use crate::value::{MapKey, SeqValue, Value, ValueType};
use objdiff_core_types::{ScalarKind, Shape};
use std::collections::btree_map::Entry;

/// Step-wise access to a location inside a value graph.
pub trait Navigator {
    /// Move one step along the path.
    ///
    /// Returns `Ok(false)` once the path is exhausted.
    ///
    /// # Errors
    ///
    /// Returns a [`NavigationError`] when the step cannot be resolved.
    fn advance(&mut self) -> Result<bool, NavigationError>;

    /// Shape of the current location, declared or materialized
    fn current_shape(&self) -> Option<Shape>;

    /// Value at the current location, if it exists
    fn current_value(&self) -> Option<&Value>;

    /// Value one step above the current location
    fn previous_value(&self) -> Option<&Value>;

    /// Store `value` at the terminal location.
    ///
    /// # Errors
    ///
    /// Returns a [`NavigationError`] when the navigator is not at the terminal
    /// location or the value does not fit the declared type there.
    fn set_at_current(&mut self, value: Value) -> Result<(), NavigationError>;

    /// Remove or zero the terminal location.
    ///
    /// A sequence index truncates the sequence to that length, dropping every
    /// element from the index onward, including elements past the ones the
    /// change set recorded when the target is longer than the diff source.
    ///
    /// # Errors
    ///
    /// Returns a [`NavigationError`] when the navigator is not at the terminal
    /// location or the terminal step does not fit the parent.
    fn delete_at_current(&mut self) -> Result<(), NavigationError>;
}

/// Default for [`NavigatorConfig::max_grow`]
pub const DEFAULT_MAX_GROW: usize = 1 << 16;

/// Materialization rules for missing intermediate locations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorConfig {
    /// Insert zero values for missing map keys and absent pointers
    pub auto_create: bool,
    /// Extend sequences with zero values up to a requested index
    pub auto_grow: bool,
    /// Most zero elements a single step may append to a sequence
    pub max_grow: usize,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            auto_create: true,
            auto_grow: true,
            max_grow: DEFAULT_MAX_GROW,
        }
    }
}

impl NavigatorConfig {
    /// Navigation that never materializes anything
    pub fn strict() -> Self {
        Self {
            auto_create: false,
            auto_grow: false,
            max_grow: 0,
        }
    }
}

/// Default navigator over an exclusively borrowed [`Value`].
///
/// Each advance re-resolves the parent from the root, so the navigator only
/// holds the root borrow and a step cursor.
///
/// # Example
///
/// ```
/// use objdiff_core::{Navigator, NavigatorConfig, Path, Value, ValueNavigator, ValueType};
///
/// let mut root = Value::seq(ValueType::string(), vec![]);
/// let path = Path::root().index(1);
/// let mut nav = ValueNavigator::new(&mut root, &path, NavigatorConfig::default());
/// while nav.advance().unwrap() {}
/// nav.set_at_current(Value::from("b")).unwrap();
///
/// assert_eq!(root.items().unwrap().len(), 2);
/// ```
#[derive(Debug)]
pub struct ValueNavigator<'a> {
    root: &'a mut Value,
    steps: &'a [PathStep],
    position: usize,
    config: NavigatorConfig,
}

impl<'a> ValueNavigator<'a> {
    pub fn new(root: &'a mut Value, path: &'a Path, config: NavigatorConfig) -> Self {
        Self {
            root,
            steps: path.steps(),
            position: 0,
            config,
        }
    }

    fn ensure_terminal(&self) -> Result<(), NavigationError> {
        if self.position == self.steps.len() {
            Ok(())
        } else {
            Err(NavigationError::NotAtTerminal {
                position: self.position,
                len: self.steps.len(),
            })
        }
    }

}

impl Navigator for ValueNavigator<'_> {
    fn advance(&mut self) -> Result<bool, NavigationError> {
        let steps = self.steps;
        let Some(step) = steps.get(self.position) else {
            return Ok(false);
        };

        let config = self.config;
        let parent = resolve_mut(&mut *self.root, &steps[..self.position], config)?;
        if self.position + 1 == steps.len() {
            check_terminal(parent, step)?;
        } else {
            descend(parent, step, config)?;
        }

        self.position += 1;
        Ok(true)
    }

    fn current_shape(&self) -> Option<Shape> {
        if let Some(value) = self.current_value() {
            return Some(value.shape());
        }
        let step = self.steps.get(self.position.checked_sub(1)?)?;
        declared_child_type(self.previous_value()?, step).map(|t| t.shape())
    }

    fn current_value(&self) -> Option<&Value> {
        resolve(&*self.root, &self.steps[..self.position])
    }

    fn previous_value(&self) -> Option<&Value> {
        let depth = self.position.checked_sub(1)?;
        resolve(&*self.root, &self.steps[..depth])
    }

    fn set_at_current(&mut self, value: Value) -> Result<(), NavigationError> {
        self.ensure_terminal()?;
        let steps = self.steps;
        let Some((step, init)) = steps.split_last() else {
            expect_type(&self.root.value_type(), &value)?;
            *self.root = value;
            return Ok(());
        };

        let config = self.config;
        let parent = resolve_mut(&mut *self.root, init, config)?;
        let found = parent.shape();
        match (parent, step) {
            (Value::Struct(s), PathStep::Field { index, name }) => {
                let field = field_at(&mut s.fields, *index, name)?;
                expect_type(&field.value.value_type(), &value)?;
                field.value = value;
                Ok(())
            }
            (Value::Map(m), PathStep::Key(key)) => {
                expect_key_kind(key, m.key_kind)?;
                expect_type(&m.value_type, &value)?;
                m.entries.insert(key.clone(), value);
                Ok(())
            }
            (Value::Seq(s), PathStep::Index(i)) => {
                expect_type(&s.elem_type, &value)?;
                *grow_slot(s, *i, step, config)? = value;
                Ok(())
            }
            (Value::Array(a), PathStep::Index(i)) => {
                let len = a.items.len();
                expect_type(&a.elem_type, &value)?;
                let slot = a
                    .items
                    .get_mut(*i)
                    .ok_or(NavigationError::OutOfBounds { index: *i, len })?;
                *slot = value;
                Ok(())
            }
            (Value::Ptr(p), PathStep::Indirection) => {
                expect_type(&p.elem_type, &value)?;
                p.target = Some(Box::new(value));
                Ok(())
            }
            (_, step) => Err(NavigationError::StepMismatch {
                step: step.clone(),
                found,
            }),
        }
    }

    fn delete_at_current(&mut self) -> Result<(), NavigationError> {
        self.ensure_terminal()?;
        let steps = self.steps;
        let Some((step, init)) = steps.split_last() else {
            *self.root = self.root.value_type().zero_value();
            return Ok(());
        };

        let parent = resolve_mut(&mut *self.root, init, self.config)?;
        let found = parent.shape();
        match (parent, step) {
            (Value::Struct(s), PathStep::Field { index, name }) => {
                let field = field_at(&mut s.fields, *index, name)?;
                field.value = field.value.value_type().zero_value();
                Ok(())
            }
            (Value::Map(m), PathStep::Key(key)) => {
                expect_key_kind(key, m.key_kind)?;
                m.entries.remove(key);
                Ok(())
            }
            (Value::Seq(s), PathStep::Index(i)) => {
                // Truncation removes the whole trailing run; repeats are no-ops.
                s.items.truncate(*i);
                Ok(())
            }
            (Value::Array(a), PathStep::Index(i)) => {
                let len = a.items.len();
                let zero = a.elem_type.zero_value();
                let slot = a
                    .items
                    .get_mut(*i)
                    .ok_or(NavigationError::OutOfBounds { index: *i, len })?;
                *slot = zero;
                Ok(())
            }
            (Value::Ptr(p), PathStep::Indirection) => {
                p.target = None;
                Ok(())
            }
            (_, step) => Err(NavigationError::StepMismatch {
                step: step.clone(),
                found,
            }),
        }
    }
}

fn resolve_mut<'v>(
    root: &'v mut Value,
    steps: &[PathStep],
    config: NavigatorConfig,
) -> Result<&'v mut Value, NavigationError> {
    let mut node = root;
    for step in steps {
        node = descend(node, step, config)?;
    }
    Ok(node)
}

fn resolve<'v>(root: &'v Value, steps: &[PathStep]) -> Option<&'v Value> {
    let mut node = root;
    for step in steps {
        node = match (node, step) {
            (Value::Struct(s), PathStep::Field { index, name }) => s
                .fields
                .get(*index)
                .filter(|f| &f.name == name)
                .map(|f| &f.value)?,
            (Value::Map(m), PathStep::Key(key)) => m.entries.get(key)?,
            (Value::Seq(s), PathStep::Index(i)) => s.items.get(*i)?,
            (Value::Array(a), PathStep::Index(i)) => a.items.get(*i)?,
            (Value::Ptr(p), PathStep::Indirection) => p.target.as_deref()?,
            _ => return None,
        };
    }
    Some(node)
}

/// Move into the child at `step`, materializing it when allowed.
fn descend<'v>(
    node: &'v mut Value,
    step: &PathStep,
    config: NavigatorConfig,
) -> Result<&'v mut Value, NavigationError> {
    let found = node.shape();
    let missing = || NavigationError::Missing { step: step.clone() };

    match (node, step) {
        (Value::Struct(s), PathStep::Field { index, name }) => {
            Ok(&mut field_at(&mut s.fields, *index, name)?.value)
        }
        (Value::Map(m), PathStep::Key(key)) => {
            expect_key_kind(key, m.key_kind)?;
            match m.entries.entry(key.clone()) {
                Entry::Occupied(e) => Ok(e.into_mut()),
                Entry::Vacant(e) if config.auto_create => {
                    tracing::trace!(step = %step, "materializing map entry");
                    Ok(e.insert(m.value_type.zero_value()))
                }
                Entry::Vacant(_) => Err(missing()),
            }
        }
        (Value::Seq(s), PathStep::Index(i)) => grow_slot(s, *i, step, config),
        (Value::Array(a), PathStep::Index(i)) => {
            let len = a.items.len();
            a.items
                .get_mut(*i)
                .ok_or(NavigationError::OutOfBounds { index: *i, len })
        }
        (Value::Ptr(p), PathStep::Indirection) => {
            if p.target.is_none() {
                if !config.auto_create {
                    return Err(missing());
                }
                tracing::trace!(step = %step, "materializing pointee");
                p.target = Some(Box::new(p.elem_type.zero_value()));
            }
            p.target.as_deref_mut().ok_or_else(missing)
        }
        (_, step) => Err(NavigationError::StepMismatch {
            step: step.clone(),
            found,
        }),
    }
}

/// Slot `index` of `seq`, appending zero elements up to it when allowed.
///
/// Growth is bounded by `config.max_grow` and by what the allocator grants.
fn grow_slot<'v>(
    seq: &'v mut SeqValue,
    index: usize,
    step: &PathStep,
    config: NavigatorConfig,
) -> Result<&'v mut Value, NavigationError> {
    let len = seq.items.len();
    if index >= len {
        if !config.auto_grow {
            return Err(NavigationError::Missing { step: step.clone() });
        }
        let out_of_bounds = || NavigationError::OutOfBounds { index, len };
        let additional = (index - len).checked_add(1).ok_or_else(out_of_bounds)?;
        if additional > config.max_grow {
            return Err(out_of_bounds());
        }
        seq.items
            .try_reserve(additional)
            .map_err(|_| out_of_bounds())?;
        tracing::trace!(step = %step, from = len, "growing sequence");
        let elem_type = &seq.elem_type;
        seq.items.resize_with(len + additional, || elem_type.zero_value());
    }
    seq.items
        .get_mut(index)
        .ok_or(NavigationError::OutOfBounds { index, len })
}

/// Validate a terminal step against its parent without touching anything.
fn check_terminal(node: &Value, step: &PathStep) -> Result<(), NavigationError> {
    match (node, step) {
        (Value::Struct(s), PathStep::Field { index, name }) => match s.fields.get(*index) {
            Some(f) if &f.name == name => Ok(()),
            _ => Err(NavigationError::UnknownField {
                index: *index,
                name: name.clone(),
            }),
        },
        (Value::Map(m), PathStep::Key(key)) => expect_key_kind(key, m.key_kind),
        (Value::Seq(_), PathStep::Index(_)) | (Value::Ptr(_), PathStep::Indirection) => Ok(()),
        (Value::Array(a), PathStep::Index(i)) => {
            if *i < a.items.len() {
                Ok(())
            } else {
                Err(NavigationError::OutOfBounds {
                    index: *i,
                    len: a.items.len(),
                })
            }
        }
        _ => Err(NavigationError::StepMismatch {
            step: step.clone(),
            found: node.shape(),
        }),
    }
}

fn declared_child_type(parent: &Value, step: &PathStep) -> Option<ValueType> {
    match (parent, step) {
        (Value::Struct(s), PathStep::Field { index, .. }) => {
            s.fields.get(*index).map(|f| f.value.value_type())
        }
        (Value::Map(m), PathStep::Key(_)) => Some(m.value_type.clone()),
        (Value::Seq(s), PathStep::Index(_)) => Some(s.elem_type.clone()),
        (Value::Array(a), PathStep::Index(_)) => Some(a.elem_type.clone()),
        (Value::Ptr(p), PathStep::Indirection) => Some(p.elem_type.clone()),
        _ => None,
    }
}

fn field_at<'v>(
    fields: &'v mut [crate::value::Field],
    index: usize,
    name: &str,
) -> Result<&'v mut crate::value::Field, NavigationError> {
    match fields.get_mut(index) {
        Some(f) if f.name == name => Ok(f),
        _ => Err(NavigationError::UnknownField {
            index,
            name: name.to_string(),
        }),
    }
}

fn expect_key_kind(key: &MapKey, expected: ScalarKind) -> Result<(), NavigationError> {
    let found = key.kind();
    if found == expected {
        Ok(())
    } else {
        Err(NavigationError::KeyKindMismatch {
            key: key.clone(),
            expected,
            found,
        })
    }
}

fn expect_type(expected: &ValueType, value: &Value) -> Result<(), NavigationError> {
    let found = value.value_type();
    if &found == expected {
        Ok(())
    } else {
        Err(NavigationError::ValueTypeMismatch {
            expected: expected.clone(),
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(nav: &mut ValueNavigator<'_>) -> Result<(), NavigationError> {
        while nav.advance()? {}
        Ok(())
    }

    fn counts() -> Value {
        Value::map(
            ScalarKind::Str,
            ValueType::scalar(ScalarKind::I64),
            [("a", Value::from(1i64))],
        )
        .unwrap()
    }

    #[test]
    fn test_set_map_entry_inserts_new_key() {
        let mut root = counts();
        let path = Path::root().key("b");
        let mut nav = ValueNavigator::new(&mut root, &path, NavigatorConfig::default());
        walk(&mut nav).unwrap();
        nav.set_at_current(Value::from(2i64)).unwrap();

        assert_eq!(root.entry(&MapKey::from("b")), Some(&Value::from(2i64)));
    }

    #[test]
    fn test_wrong_key_kind_is_rejected() {
        let mut root = counts();
        let path = Path::root().key(7i64);
        let mut nav = ValueNavigator::new(&mut root, &path, NavigatorConfig::default());
        assert!(matches!(
            nav.advance(),
            Err(NavigationError::KeyKindMismatch { .. })
        ));
    }

    #[test]
    fn test_intermediate_pointer_is_materialized() {
        let mut root = Value::null_ptr(ValueType::seq_of(ValueType::string()));
        let path = Path::root().indirection().index(0);
        let mut nav = ValueNavigator::new(&mut root, &path, NavigatorConfig::default());
        walk(&mut nav).unwrap();
        nav.set_at_current(Value::from("x")).unwrap();

        let items = root.pointee().and_then(Value::items).unwrap();
        assert_eq!(items, &[Value::from("x")]);
    }

    #[test]
    fn test_strict_config_reports_missing() {
        let mut root = Value::null_ptr(ValueType::seq_of(ValueType::string()));
        let path = Path::root().indirection().index(0);
        let mut nav = ValueNavigator::new(&mut root, &path, NavigatorConfig::strict());
        assert_eq!(
            nav.advance(),
            Err(NavigationError::Missing {
                step: PathStep::Indirection
            })
        );
    }

    #[test]
    fn test_seq_delete_truncates_and_repeats_are_noops() {
        let mut root = Value::seq(
            ValueType::string(),
            vec!["a".into(), "b".into(), "c".into()],
        );
        for _ in 0..2 {
            let path = Path::root().index(1);
            let mut nav = ValueNavigator::new(&mut root, &path, NavigatorConfig::default());
            walk(&mut nav).unwrap();
            nav.delete_at_current().unwrap();
        }
        assert_eq!(root.items().unwrap(), &[Value::from("a")]);
    }

    #[test]
    fn test_array_never_grows() {
        let mut root = Value::array(ValueType::scalar(ScalarKind::U8), vec![0u8.into()]);
        let path = Path::root().index(3);
        let mut nav = ValueNavigator::new(&mut root, &path, NavigatorConfig::default());
        assert_eq!(
            nav.advance(),
            Err(NavigationError::OutOfBounds { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_set_rejects_wrong_value_type() {
        let mut root = counts();
        let path = Path::root().key("a");
        let mut nav = ValueNavigator::new(&mut root, &path, NavigatorConfig::default());
        walk(&mut nav).unwrap();
        assert!(matches!(
            nav.set_at_current(Value::from("nope")),
            Err(NavigationError::ValueTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_set_before_terminal_is_rejected() {
        let mut root = counts();
        let path = Path::root().key("a");
        let mut nav = ValueNavigator::new(&mut root, &path, NavigatorConfig::default());
        assert_eq!(
            nav.set_at_current(Value::from(5i64)),
            Err(NavigationError::NotAtTerminal { position: 0, len: 1 })
        );
    }

    #[test]
    fn test_struct_field_delete_resets_to_zero() {
        let mut root = Value::record("Doc", [("name", Value::from("x"))]);
        let path = Path::root().field(0, "name");
        let mut nav = ValueNavigator::new(&mut root, &path, NavigatorConfig::default());
        walk(&mut nav).unwrap();
        assert_eq!(nav.current_value(), Some(&Value::from("x")));
        assert_eq!(nav.current_shape(), Some(Shape::Scalar(ScalarKind::Str)));
        nav.delete_at_current().unwrap();

        assert_eq!(root.field("name"), Some(&Value::from("")));
    }

    #[test]
    fn test_field_name_must_match_position() {
        let mut root = Value::record("Doc", [("name", Value::from("x"))]);
        let path = Path::root().field(0, "title");
        let mut nav = ValueNavigator::new(&mut root, &path, NavigatorConfig::default());
        assert!(matches!(
            nav.advance(),
            Err(NavigationError::UnknownField { index: 0, .. })
        ));
    }

    #[test]
    fn test_shape_of_absent_terminal_comes_from_declaration() {
        let mut root = counts();
        let path = Path::root().key("zzz");
        let mut nav = ValueNavigator::new(&mut root, &path, NavigatorConfig::default());
        walk(&mut nav).unwrap();
        assert_eq!(nav.current_value(), None);
        assert_eq!(nav.current_shape(), Some(Shape::Scalar(ScalarKind::I64)));
        assert_eq!(nav.previous_value().map(Value::shape), Some(Shape::Map));
    }
}
