//! Declared field shapes.
//!
//! A [`TypeExpr`] is a base reference wrapped in zero or more container
//! layers. Layers compose in declaration order and that order is never
//! normalized: `Sequence(StringMap(X))` and `StringMap(Sequence(X))` are
//! different shapes and stay different all the way through synthesis.

use std::fmt;

use smallvec::SmallVec;

/// A generic type parameter, scoped to the class that declares it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVar(String);

impl TypeVar {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The innermost reference of a field shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BaseRef {
    /// A class, union, or scalar, looked up by name in the graph.
    ///
    /// `args` are the type arguments of a generic class instantiation
    /// (e.g. `PagedList<Order, Authentication>`); empty otherwise.
    Named { name: String, args: Vec<TypeExpr> },

    /// A type parameter of the enclosing class.
    Var(TypeVar),
}

/// A field's declared type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// Unwrapped base reference.
    Base(BaseRef),
    /// Value that may be absent.
    Optional(Box<TypeExpr>),
    /// Homogeneous sequence.
    Sequence(Box<TypeExpr>),
    /// String-keyed map.
    StringMap(Box<TypeExpr>),
}

/// One container layer of a [`TypeExpr`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Wrapper {
    Optional,
    Sequence,
    StringMap,
}

/// Wrapper layers ordered outermost first.
///
/// Real models rarely nest deeper than three layers, so four inline slots
/// avoid allocating for virtually every field.
pub type WrapperStack = SmallVec<[Wrapper; 4]>;

impl TypeExpr {
    /// A non-generic class, union, or scalar reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Base(BaseRef::Named {
            name: name.into(),
            args: Vec::new(),
        })
    }

    /// A generic class instantiated with `args`.
    pub fn applied(name: impl Into<String>, args: Vec<TypeExpr>) -> Self {
        Self::Base(BaseRef::Named {
            name: name.into(),
            args,
        })
    }

    /// A reference to a type parameter of the enclosing class.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Base(BaseRef::Var(TypeVar::new(name)))
    }

    pub fn optional(inner: TypeExpr) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn sequence(inner: TypeExpr) -> Self {
        Self::Sequence(Box::new(inner))
    }

    pub fn string_map(inner: TypeExpr) -> Self {
        Self::StringMap(Box::new(inner))
    }

    /// The outermost layer, or `None` for a bare base reference.
    pub fn wrapper(&self) -> Option<Wrapper> {
        match self {
            TypeExpr::Base(_) => None,
            TypeExpr::Optional(_) => Some(Wrapper::Optional),
            TypeExpr::Sequence(_) => Some(Wrapper::Sequence),
            TypeExpr::StringMap(_) => Some(Wrapper::StringMap),
        }
    }

    /// Split into the wrapper stack (outermost first) and the base reference.
    pub fn peel(&self) -> (WrapperStack, &BaseRef) {
        let mut wrappers = WrapperStack::new();
        let mut current = self;
        loop {
            match current {
                TypeExpr::Base(base) => return (wrappers, base),
                TypeExpr::Optional(inner) => {
                    wrappers.push(Wrapper::Optional);
                    current = inner;
                }
                TypeExpr::Sequence(inner) => {
                    wrappers.push(Wrapper::Sequence);
                    current = inner;
                }
                TypeExpr::StringMap(inner) => {
                    wrappers.push(Wrapper::StringMap);
                    current = inner;
                }
            }
        }
    }

    /// The base reference beneath all wrappers.
    pub fn base(&self) -> &BaseRef {
        self.peel().1
    }

    /// Every type variable mentioned anywhere in this shape, including inside
    /// type arguments, in left-to-right order.
    pub fn type_vars(&self) -> Vec<&TypeVar> {
        let mut out = Vec::new();
        self.collect_vars(&mut out);
        out
    }

    fn collect_vars<'a>(&'a self, out: &mut Vec<&'a TypeVar>) {
        match self.base() {
            BaseRef::Var(var) => out.push(var),
            BaseRef::Named { args, .. } => {
                for arg in args {
                    arg.collect_vars(out);
                }
            }
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Base(BaseRef::Var(var)) => write!(f, "{var}"),
            TypeExpr::Base(BaseRef::Named { name, args }) => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeExpr::Optional(inner) => write!(f, "Option<{inner}>"),
            TypeExpr::Sequence(inner) => write!(f, "Seq<{inner}>"),
            TypeExpr::StringMap(inner) => write!(f, "Map<{inner}>"),
        }
    }
}
