//! Executes synthesized copy constructors and dispatch factories.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use copygen_model::{ClassId, TypeGraph, UnionId};
use copygen_synth::{Container, CopyConstructor, CopyExpr, CopyFn, DepthArg, SynthOutput};

use crate::{EvalError, Value};

type NativeFn = dyn Fn(&Value) -> Result<Value, EvalError> + Send + Sync;

/// A unary copy function supplied as a dictionary.
#[derive(Clone)]
pub enum Callable {
    /// Host function.
    Native(Arc<NativeFn>),
    /// Absence-guarded call of a synthesized constructor.
    Constructor {
        class: ClassId,
        deep: Option<bool>,
        dictionaries: Arc<[Callable]>,
    },
    /// Synthesized copy function closed over the dictionaries of the frame
    /// that created it.
    Bound {
        func: CopyFn,
        dictionaries: Arc<[Callable]>,
    },
}

impl Callable {
    pub fn native<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        Callable::Native(Arc::new(f))
    }

    /// Returns its argument, sharing it.
    pub fn identity() -> Self {
        Callable::native(|value| Ok(value.clone()))
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Native(_) => f.write_str("Native(..)"),
            Callable::Constructor { class, deep, .. } => f
                .debug_struct("Constructor")
                .field("class", class)
                .field("deep", deep)
                .finish_non_exhaustive(),
            Callable::Bound { func, .. } => f
                .debug_struct("Bound")
                .field("func", func)
                .finish_non_exhaustive(),
        }
    }
}

/// Runs one synthesis output against the graph it was produced from.
pub struct Interpreter<'a> {
    graph: &'a TypeGraph,
    output: &'a SynthOutput,
}

impl<'a> Interpreter<'a> {
    pub fn new(graph: &'a TypeGraph, output: &'a SynthOutput) -> Self {
        Self { graph, output }
    }

    /// Run the copy constructor of `class` on `source`.
    ///
    /// `deep` must be given exactly when the policy takes a depth flag, and
    /// `dictionaries` must hold one function per type parameter. An absent
    /// source yields an instance with no populated fields.
    pub fn construct(
        &self,
        class: ClassId,
        source: &Value,
        deep: Option<bool>,
        dictionaries: Vec<Callable>,
    ) -> Result<Value, EvalError> {
        self.construct_with(class, source, deep, &Arc::from(dictionaries))
    }

    /// Run the dispatch factory of `union` on `value`.
    pub fn dispatch(&self, union: UnionId, value: &Value) -> Result<Value, EvalError> {
        let factory = self
            .output
            .dispatcher(union)
            .ok_or(EvalError::UnknownUnion { union: union.raw() })?;
        if value.is_absent() {
            return Ok(Value::Absent);
        }
        if value.as_object().is_none() {
            return Err(EvalError::TypeMismatch {
                expected: "object",
                found: value.type_name(),
            });
        }

        let literal = value.field(&factory.discriminant_field).and_then(Value::as_str);
        let Some(arm) = literal.and_then(|literal| factory.arm(literal)) else {
            let union_name = self
                .graph
                .get_union(union)
                .map_or_else(String::new, |u| u.name.clone());
            return Err(EvalError::UnknownDiscriminant {
                union: union_name,
                value: value
                    .field(&factory.discriminant_field)
                    .map_or_else(|| "absent".to_owned(), Value::describe),
            });
        };
        tracing::trace!(literal = %arm.literal, "dispatch");
        self.construct_with(arm.call.class, value, flag(arm.call.depth), &no_dictionaries())
    }

    /// A guarded constructor of `class` as a unary callable, for use as a
    /// dictionary.
    pub fn constructor_fn(
        &self,
        class: ClassId,
        deep: Option<bool>,
        dictionaries: Vec<Callable>,
    ) -> Callable {
        Callable::Constructor {
            class,
            deep,
            dictionaries: Arc::from(dictionaries),
        }
    }

    pub fn call(&self, func: &Callable, value: &Value) -> Result<Value, EvalError> {
        match func {
            Callable::Native(f) => f(value),
            Callable::Constructor {
                class,
                deep,
                dictionaries,
            } => {
                if value.is_absent() {
                    return Ok(Value::Absent);
                }
                self.construct_with(*class, value, *deep, dictionaries)
            }
            Callable::Bound { func, dictionaries } => self.apply(func, value, dictionaries),
        }
    }

    fn constructor(&self, class: ClassId) -> Result<(&'a CopyConstructor, &'a str), EvalError> {
        let ctor = self.output.constructor(class);
        let class_ty = self.graph.get_class(class);
        match (ctor, class_ty) {
            (Some(ctor), Some(class_ty)) => Ok((ctor, class_ty.name.as_str())),
            _ => Err(EvalError::UnknownClass { class: class.raw() }),
        }
    }

    fn construct_with(
        &self,
        class: ClassId,
        source: &Value,
        deep: Option<bool>,
        dictionaries: &Arc<[Callable]>,
    ) -> Result<Value, EvalError> {
        let (ctor, name) = self.constructor(class)?;
        let deep = match (ctor.takes_depth_flag(), deep) {
            (true, Some(deep)) => deep,
            (true, None) => {
                return Err(EvalError::MissingDepthFlag {
                    class: name.to_owned(),
                })
            }
            (false, Some(_)) => {
                return Err(EvalError::UnexpectedDepthFlag {
                    class: name.to_owned(),
                })
            }
            (false, None) => true,
        };
        let expected = ctor.dictionary_count();
        if dictionaries.len() != expected {
            return Err(EvalError::DictionaryCount {
                class: name.to_owned(),
                expected,
                found: dictionaries.len(),
            });
        }

        let mut fields = BTreeMap::new();
        if !source.is_absent() {
            if source.as_object().is_none() {
                return Err(EvalError::TypeMismatch {
                    expected: "object",
                    found: source.type_name(),
                });
            }
            self.populate(ctor, source, deep, dictionaries, &mut fields)?;
        }
        Ok(Value::object(class, fields))
    }

    /// Base step first, then the constructor's own fields.
    fn populate(
        &self,
        ctor: &CopyConstructor,
        source: &Value,
        deep: bool,
        dictionaries: &Arc<[Callable]>,
        fields: &mut BTreeMap<String, Value>,
    ) -> Result<(), EvalError> {
        if let Some(step) = ctor.base_step {
            let (base, _) = self.constructor(step.base)?;
            let base_deep = if step.forward_depth { deep } else { true };
            self.populate(base, source, base_deep, &no_dictionaries(), fields)?;
        }
        for copy in &ctor.fields {
            let value = self.eval(&copy.expr, source, deep, dictionaries)?;
            fields.insert(copy.field.clone(), value);
        }
        Ok(())
    }

    fn eval(
        &self,
        expr: &CopyExpr,
        source: &Value,
        deep: bool,
        dictionaries: &Arc<[Callable]>,
    ) -> Result<Value, EvalError> {
        match expr {
            CopyExpr::Read { field } => Ok(source.field(field).cloned().unwrap_or(Value::Absent)),
            CopyExpr::Apply { func, arg } => {
                let value = self.eval(arg, source, deep, dictionaries)?;
                self.apply(func, &value, dictionaries)
            }
            CopyExpr::SelectDepth {
                deep: deep_expr,
                shallow,
            } => {
                let chosen = if deep { deep_expr } else { shallow };
                self.eval(chosen, source, deep, dictionaries)
            }
        }
    }

    fn apply(
        &self,
        func: &CopyFn,
        value: &Value,
        dictionaries: &Arc<[Callable]>,
    ) -> Result<Value, EvalError> {
        match func {
            CopyFn::Identity => Ok(value.clone()),
            CopyFn::Guard(inner) => {
                if value.is_absent() {
                    Ok(Value::Absent)
                } else {
                    self.apply(inner, value, dictionaries)
                }
            }
            CopyFn::Construct(call) => {
                let nested: Arc<[Callable]> = call
                    .dictionaries
                    .iter()
                    .map(|dict| Self::bind(dict, dictionaries))
                    .collect::<Result<_, _>>()?;
                self.construct_with(call.class, value, flag(call.depth), &nested)
            }
            CopyFn::Dispatch(union) => self.dispatch(*union, value),
            CopyFn::Dictionary(index) => {
                let dict = dictionaries
                    .get(*index)
                    .ok_or(EvalError::MissingDictionary { index: *index })?;
                self.call(dict, value)
            }
            CopyFn::Lift { container, element } => {
                self.lift(*container, element, value, dictionaries)
            }
        }
    }

    fn lift(
        &self,
        container: Container,
        element: &CopyFn,
        value: &Value,
        dictionaries: &Arc<[Callable]>,
    ) -> Result<Value, EvalError> {
        let each = |item: &Value| {
            if item.is_absent() {
                Ok(Value::Absent)
            } else {
                self.apply(element, item, dictionaries)
            }
        };
        match (container, value) {
            (_, Value::Absent) => Ok(Value::Absent),
            (Container::Sequence, Value::Seq(items)) => {
                let copied = items.iter().map(each).collect::<Result<Vec<_>, _>>()?;
                Ok(Value::seq(copied))
            }
            (Container::StringMap, Value::Map(entries)) => {
                let copied = entries
                    .iter()
                    .map(|(key, item)| Ok((key.clone(), each(item)?)))
                    .collect::<Result<BTreeMap<_, _>, EvalError>>()?;
                Ok(Value::map(copied))
            }
            (Container::Sequence, other) => Err(EvalError::TypeMismatch {
                expected: "sequence",
                found: other.type_name(),
            }),
            (Container::StringMap, other) => Err(EvalError::TypeMismatch {
                expected: "map",
                found: other.type_name(),
            }),
        }
    }

    /// Turn a copy function into a callable for a nested frame.
    ///
    /// An enclosing dictionary is passed through as is.
    fn bind(func: &CopyFn, dictionaries: &Arc<[Callable]>) -> Result<Callable, EvalError> {
        match func {
            CopyFn::Dictionary(index) => dictionaries
                .get(*index)
                .cloned()
                .ok_or(EvalError::MissingDictionary { index: *index }),
            other => Ok(Callable::Bound {
                func: other.clone(),
                dictionaries: Arc::clone(dictionaries),
            }),
        }
    }
}

fn no_dictionaries() -> Arc<[Callable]> {
    Arc::new([])
}

fn flag(depth: DepthArg) -> Option<bool> {
    match depth {
        DepthArg::Omitted => None,
        DepthArg::Deep => Some(true),
    }
}
