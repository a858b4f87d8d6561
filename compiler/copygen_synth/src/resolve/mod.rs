//! Copy strategy resolver.
//!
//! Maps a [`FieldShape`] to a unary [`CopyFn`]. The base picks the atomic
//! strategy; wrappers then lift it from the innermost layer outwards, so the
//! outermost wrapper ends up as the outermost combinator.
//!
//! Type arguments at instantiation sites resolve the same way and become the
//! dictionaries of the nested constructor call. Dictionaries are always
//! absence-safe: a bare constructor is guarded before it is passed.

use copygen_model::{TypeExpr, Wrapper};

use crate::analyze::{Analyzer, BaseKind, FieldShape};
use crate::{ConstructCall, Container, CopyFn, DepthArg, SynthError};

/// Resolver for one owning class and one nested-call depth.
pub struct Resolver<'a, 'g> {
    analyzer: &'a Analyzer<'g>,
    depth: DepthArg,
}

impl<'a, 'g> Resolver<'a, 'g> {
    /// `depth` is what every nested constructor call receives.
    pub fn new(analyzer: &'a Analyzer<'g>, depth: DepthArg) -> Self {
        Self { analyzer, depth }
    }

    /// Resolve a type as it appears in `field`.
    pub fn copy_fn(&self, field: &str, ty: &'g TypeExpr) -> Result<CopyFn, SynthError> {
        let shape = self.analyzer.analyze_type(field, ty)?;
        self.lift(field, &shape)
    }

    /// Lift the atomic strategy of `shape.base` through its wrappers.
    pub fn lift(&self, field: &str, shape: &FieldShape<'g>) -> Result<CopyFn, SynthError> {
        let mut func = self.atomic(field, &shape.base)?;
        for wrapper in shape.wrappers.iter().rev() {
            func = match wrapper {
                Wrapper::Optional => func.optional(),
                Wrapper::Sequence => CopyFn::lift(Container::Sequence, func),
                Wrapper::StringMap => CopyFn::lift(Container::StringMap, func),
            };
        }
        Ok(func)
    }

    fn atomic(&self, field: &str, base: &BaseKind<'g>) -> Result<CopyFn, SynthError> {
        Ok(match *base {
            BaseKind::Scalar => CopyFn::Identity,
            BaseKind::TypeVar { index } => CopyFn::Dictionary(index),
            BaseKind::Union(id) => CopyFn::Dispatch(id),
            BaseKind::Class { id, args } => {
                let dictionaries = args
                    .iter()
                    .map(|arg| self.copy_fn(field, arg).map(CopyFn::absence_safe))
                    .collect::<Result<Vec<_>, _>>()?;
                tracing::trace!(
                    class = %self.analyzer.owner().name,
                    field,
                    target = %self.analyzer.graph().class(id).name,
                    dictionaries = dictionaries.len(),
                    "nested construct"
                );
                CopyFn::construct(ConstructCall {
                    class: id,
                    depth: self.depth,
                    dictionaries,
                })
            }
        })
    }
}
