//! Runtime values for the reference evaluator.
//!
//! Strings, instances, sequences and maps live in [`Heap`] cells created only
//! by the factories on [`Value`]. Cloning a `Value` shares its cell, which is
//! how a shallow copy looks; rebuilding allocates a fresh cell.

mod heap;

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use copygen_model::ClassId;

pub use heap::Heap;

/// An object of a synthesized class.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub class: ClassId,
    /// Populated fields only. An instance built from an absent source has none.
    pub fields: BTreeMap<String, Value>,
}

impl Instance {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Dynamic value. Equality is structural.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Missing or null.
    Absent,
    Bool(bool),
    Number(f64),
    Str(Heap<String>),
    Object(Heap<Instance>),
    Seq(Heap<Vec<Value>>),
    Map(Heap<BTreeMap<String, Value>>),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    pub fn object(class: ClassId, fields: BTreeMap<String, Value>) -> Self {
        Value::Object(Heap::new(Instance { class, fields }))
    }

    /// Convenience factory for an instance with the given field values.
    pub fn instance<K, I>(class: ClassId, fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::object(
            class,
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        )
    }

    pub fn seq(items: Vec<Value>) -> Self {
        Value::Seq(Heap::new(items))
    }

    pub fn map(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(Heap::new(entries))
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Object(_) => "object",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "map",
        }
    }

    pub fn as_object(&self) -> Option<&Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Field of an instance. `None` for non-objects and unpopulated fields.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|instance| instance.get(name))
    }

    /// Reference identity.
    ///
    /// Heap values are identical when they share a cell. Inline values have no
    /// identity and compare by value.
    pub fn same_ref(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Seq(a), Value::Seq(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (Value::Absent, Value::Absent) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            _ => false,
        }
    }

    /// Whether any mutable cell (instance, sequence or map) reachable from
    /// `self` is also reachable from `other`. Strings are immutable and not
    /// counted.
    pub fn shares_heap_with(&self, other: &Value) -> bool {
        let mut mine = FxHashSet::default();
        self.collect_cells(&mut mine);
        let mut theirs = FxHashSet::default();
        other.collect_cells(&mut theirs);
        !mine.is_disjoint(&theirs)
    }

    fn collect_cells(&self, cells: &mut FxHashSet<*const ()>) {
        match self {
            Value::Object(instance) => {
                if cells.insert(instance.addr()) {
                    for value in instance.fields.values() {
                        value.collect_cells(cells);
                    }
                }
            }
            Value::Seq(items) => {
                if cells.insert(items.addr()) {
                    for value in items.iter() {
                        value.collect_cells(cells);
                    }
                }
            }
            Value::Map(entries) => {
                if cells.insert(entries.addr()) {
                    for value in entries.values() {
                        value.collect_cells(cells);
                    }
                }
            }
            Value::Absent | Value::Bool(_) | Value::Number(_) | Value::Str(_) => {}
        }
    }

    /// Short rendering for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Value::Str(s) => s.as_str().to_owned(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => other.type_name().to_owned(),
        }
    }
}
