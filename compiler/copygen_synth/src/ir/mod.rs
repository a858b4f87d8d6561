//! Synthesis output: copy-expression trees and their containers.
//!
//! Everything here is data for an external printer. Nothing in this module
//! knows about target-language syntax.
//!
//! # Architecture
//!
//! - **[`CopyFn`]**: a unary copy function, the unit that combinators and
//!   dictionaries pass around
//! - **[`CopyExpr`]**: the value assigned to one field (a read of the source,
//!   possibly transformed)
//! - **[`CopyConstructor`]**: per-class signature plus ordered field copies
//! - **[`DispatchFactory`]**: per-union discriminant switch
//! - **[`CombinatorDef`]**: one helper of the shared combinator library

use copygen_model::{ClassId, TypeVar, UnionId};

use crate::DepthPolicy;

// ── Copy functions ──────────────────────────────────────────────────

/// Depth argument a generated call site passes to a constructor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DepthArg {
    /// The constructor takes no flag (`AlwaysDeep`).
    Omitted,
    /// The flag is passed as a literal `true` (`FlagControlled`, deep path).
    Deep,
}

/// Invocation of a synthesized constructor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConstructCall {
    pub class: ClassId,
    pub depth: DepthArg,
    /// One unary copy function per type parameter of `class`, positional.
    pub dictionaries: Vec<CopyFn>,
}

/// Container kind a combinator maps over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Container {
    Sequence,
    StringMap,
}

/// A unary copy function.
///
/// Only [`CopyFn::Construct`] is unsafe to call on an absent value; every
/// other form maps absent to absent on its own.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CopyFn {
    /// Returns its argument.
    Identity,
    /// Rebuilds an instance through the class's constructor.
    Construct(ConstructCall),
    /// The union's dispatch factory.
    Dispatch(UnionId),
    /// The enclosing constructor's dictionary at this position.
    Dictionary(usize),
    /// Short-circuits absent input, otherwise applies the inner function.
    Guard(Box<CopyFn>),
    /// Maps the element function over a container. Absent in, absent out;
    /// absent elements stay absent.
    Lift {
        container: Container,
        element: Box<CopyFn>,
    },
}

impl CopyFn {
    pub fn construct(call: ConstructCall) -> Self {
        CopyFn::Construct(call)
    }

    pub fn lift(container: Container, element: CopyFn) -> Self {
        CopyFn::Lift {
            container,
            element: Box::new(element),
        }
    }

    /// Whether applying this function to an absent value yields absent
    /// without reaching a constructor.
    ///
    /// Dictionaries count as safe: supplying a guarded function is the
    /// caller's contract.
    pub fn is_absence_safe(&self) -> bool {
        !matches!(self, CopyFn::Construct(_))
    }

    /// Make the function safe to apply to absent values.
    ///
    /// Idempotent; only bare constructor calls get a guard.
    #[must_use]
    pub fn absence_safe(self) -> Self {
        if self.is_absence_safe() {
            self
        } else {
            CopyFn::Guard(Box::new(self))
        }
    }

    /// Lift through an `Optional` wrapper.
    ///
    /// An absent value never reaches the inner function. `Identity` needs no
    /// guard and guards do not stack.
    #[must_use]
    pub fn optional(self) -> Self {
        match self {
            CopyFn::Identity | CopyFn::Guard(_) => self,
            other => CopyFn::Guard(Box::new(other)),
        }
    }

    /// Strip guards down to the function that does the work.
    pub fn unguarded(&self) -> &CopyFn {
        match self {
            CopyFn::Guard(inner) => inner.unguarded(),
            other => other,
        }
    }
}

// ── Field expressions ───────────────────────────────────────────────

/// Value assigned to one field of the new instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CopyExpr {
    /// The source instance's value for `field`, shared by reference.
    Read { field: String },
    /// `func(arg)`.
    Apply { func: CopyFn, arg: Box<CopyExpr> },
    /// Branch on the constructor's depth flag.
    SelectDepth {
        deep: Box<CopyExpr>,
        shallow: Box<CopyExpr>,
    },
}

impl CopyExpr {
    pub fn read(field: impl Into<String>) -> Self {
        CopyExpr::Read {
            field: field.into(),
        }
    }

    /// Apply `func` to `arg`. Applying `Identity` is the argument itself.
    pub fn apply(func: CopyFn, arg: CopyExpr) -> Self {
        match func {
            CopyFn::Identity => arg,
            func => CopyExpr::Apply {
                func,
                arg: Box::new(arg),
            },
        }
    }

    pub fn select_depth(deep: CopyExpr, shallow: CopyExpr) -> Self {
        CopyExpr::SelectDepth {
            deep: Box::new(deep),
            shallow: Box::new(shallow),
        }
    }
}

// ── Constructors ────────────────────────────────────────────────────

/// Atomic copy strategy of a field's base type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Identity,
    RecursiveConstruct,
    DictionaryLookup,
    PolymorphicDispatch,
}

/// Constructor parameter, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CtorParam {
    /// The optional source instance.
    Source,
    /// Boolean depth flag (`FlagControlled` only).
    DepthFlag,
    /// Copy function for the type parameter at `index`.
    Dictionary { index: usize, var: TypeVar },
}

/// Shared-field copy step a union variant runs before its own fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseStep {
    pub base: ClassId,
    /// Pass the caller's depth flag through to the base.
    pub forward_depth: bool,
}

/// Copy of a single field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldCopy {
    pub field: String,
    pub strategy: Strategy,
    pub expr: CopyExpr,
}

/// Synthesized copy constructor of one class.
///
/// An absent source populates nothing; otherwise the base step runs first,
/// then `fields` in order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CopyConstructor {
    pub class: ClassId,
    pub params: Vec<CtorParam>,
    pub base_step: Option<BaseStep>,
    pub fields: Vec<FieldCopy>,
}

impl CopyConstructor {
    pub fn takes_depth_flag(&self) -> bool {
        self.params.contains(&CtorParam::DepthFlag)
    }

    pub fn dictionary_count(&self) -> usize {
        self.params
            .iter()
            .filter(|p| matches!(p, CtorParam::Dictionary { .. }))
            .count()
    }

    pub fn field(&self, name: &str) -> Option<&FieldCopy> {
        self.fields.iter().find(|f| f.field == name)
    }
}

// ── Dispatch ────────────────────────────────────────────────────────

/// One case of a dispatch switch.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DispatchArm {
    pub literal: String,
    pub call: ConstructCall,
}

/// Factory that rebuilds the concrete variant of a union value.
///
/// Absent in, absent out. The switch has no default case.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DispatchFactory {
    pub union: UnionId,
    pub discriminant_field: String,
    pub arms: Vec<DispatchArm>,
}

impl DispatchFactory {
    pub fn arm(&self, literal: &str) -> Option<&DispatchArm> {
        self.arms.iter().find(|arm| arm.literal == literal)
    }
}

// ── Combinator library ──────────────────────────────────────────────

/// Helper combinators, in emission order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CombinatorKind {
    /// `fn -> (seq -> seq)`.
    SequenceFn,
    /// `(seq, fn) -> seq`.
    Sequence,
    /// `fn -> (map -> map)`.
    MapFn,
    /// `(map, fn) -> map`.
    Map,
    /// `x -> x`, passed as a dictionary for scalar type arguments.
    Identity,
}

/// Shape key the library deduplicates on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CombinatorSignature {
    /// `None` for identity.
    pub container: Option<Container>,
    pub curried: bool,
}

impl CombinatorKind {
    pub fn direct(container: Container) -> Self {
        match container {
            Container::Sequence => CombinatorKind::Sequence,
            Container::StringMap => CombinatorKind::Map,
        }
    }

    pub fn curried(container: Container) -> Self {
        match container {
            Container::Sequence => CombinatorKind::SequenceFn,
            Container::StringMap => CombinatorKind::MapFn,
        }
    }

    pub fn signature(self) -> CombinatorSignature {
        let (container, curried) = match self {
            CombinatorKind::SequenceFn => (Some(Container::Sequence), true),
            CombinatorKind::Sequence => (Some(Container::Sequence), false),
            CombinatorKind::MapFn => (Some(Container::StringMap), true),
            CombinatorKind::Map => (Some(Container::StringMap), false),
            CombinatorKind::Identity => (None, false),
        };
        CombinatorSignature { container, curried }
    }

    /// The direct combinator a curried one delegates to.
    pub fn requires(self) -> Option<CombinatorKind> {
        match self {
            CombinatorKind::SequenceFn => Some(CombinatorKind::Sequence),
            CombinatorKind::MapFn => Some(CombinatorKind::Map),
            _ => None,
        }
    }

    /// Stable helper name.
    pub fn helper_name(self) -> &'static str {
        match self {
            CombinatorKind::SequenceFn => "copy_sequence_fn",
            CombinatorKind::Sequence => "copy_sequence",
            CombinatorKind::MapFn => "copy_map_fn",
            CombinatorKind::Map => "copy_map",
            CombinatorKind::Identity => "identity",
        }
    }
}

/// One emitted helper.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CombinatorDef {
    pub kind: CombinatorKind,
    pub signature: CombinatorSignature,
    pub name: &'static str,
}

impl CombinatorDef {
    pub fn of(kind: CombinatorKind) -> Self {
        Self {
            kind,
            signature: kind.signature(),
            name: kind.helper_name(),
        }
    }
}

// ── Run output ──────────────────────────────────────────────────────

/// Every artifact of one synthesis run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynthOutput {
    pub policy: DepthPolicy,
    /// Indexed by [`ClassId`].
    pub constructors: Vec<CopyConstructor>,
    /// Indexed by [`UnionId`].
    pub dispatchers: Vec<DispatchFactory>,
    pub combinators: Vec<CombinatorDef>,
}

impl SynthOutput {
    pub fn constructor(&self, class: ClassId) -> Option<&CopyConstructor> {
        self.constructors.get(class.index())
    }

    pub fn dispatcher(&self, union: UnionId) -> Option<&DispatchFactory> {
        self.dispatchers.get(union.index())
    }
}
