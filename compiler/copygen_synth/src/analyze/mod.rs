//! Wrapped-type analyzer.
//!
//! Splits a field's declared type into an ordered wrapper stack and the kind
//! of the base it bottoms out in. Pure function of the graph.

use copygen_model::{
    BaseRef, ClassId, ClassType, Field, Resolved, TypeExpr, TypeGraph, UnionId, Wrapper,
    WrapperStack,
};

use crate::{Strategy, SynthError};

/// What a field's type bottoms out in after all wrappers are peeled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BaseKind<'g> {
    Scalar,
    /// A class, with the type arguments it is instantiated with.
    Class { id: ClassId, args: &'g [TypeExpr] },
    /// A type parameter of the owning class, by declared position.
    TypeVar { index: usize },
    Union(UnionId),
}

impl BaseKind<'_> {
    /// Atomic copy strategy for this base.
    pub fn strategy(&self) -> Strategy {
        match self {
            BaseKind::Scalar => Strategy::Identity,
            BaseKind::Class { .. } => Strategy::RecursiveConstruct,
            BaseKind::TypeVar { .. } => Strategy::DictionaryLookup,
            BaseKind::Union(_) => Strategy::PolymorphicDispatch,
        }
    }
}

/// Wrapper stack (outermost first) plus base kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldShape<'g> {
    pub wrappers: WrapperStack,
    pub base: BaseKind<'g>,
}

impl FieldShape<'_> {
    /// Whether the depth flag decides how this field is copied.
    ///
    /// Containers and object references are relational. Scalars and type
    /// variables are not, even behind `Optional`.
    pub fn is_relational(&self) -> bool {
        let contained = self
            .wrappers
            .iter()
            .any(|w| matches!(w, Wrapper::Sequence | Wrapper::StringMap));
        contained || matches!(self.base, BaseKind::Class { .. } | BaseKind::Union(_))
    }
}

/// Field analyzer scoped to one owning class.
///
/// Type variables resolve against the owner's parameter list; every other
/// name resolves against the graph.
#[derive(Copy, Clone)]
pub struct Analyzer<'g> {
    graph: &'g TypeGraph,
    owner: &'g ClassType,
}

impl<'g> Analyzer<'g> {
    pub fn new(graph: &'g TypeGraph, owner: ClassId) -> Self {
        Self {
            graph,
            owner: graph.class(owner),
        }
    }

    pub fn graph(&self) -> &'g TypeGraph {
        self.graph
    }

    pub fn owner(&self) -> &'g ClassType {
        self.owner
    }

    pub fn analyze(&self, field: &'g Field) -> Result<FieldShape<'g>, SynthError> {
        self.analyze_type(&field.name, &field.ty)
    }

    /// Analyze `ty` as it appears in `field`. Type arguments of the base are
    /// not inspected; see [`Analyzer::check`].
    pub fn analyze_type(&self, field: &str, ty: &'g TypeExpr) -> Result<FieldShape<'g>, SynthError> {
        let (wrappers, base) = ty.peel();
        let base = self.classify(field, base)?;
        Ok(FieldShape { wrappers, base })
    }

    /// Analyze `ty` and, recursively, every type argument below it.
    pub fn check(&self, field: &str, ty: &'g TypeExpr) -> Result<(), SynthError> {
        let shape = self.analyze_type(field, ty)?;
        if let BaseKind::Class { args, .. } = shape.base {
            for arg in args {
                self.check(field, arg)?;
            }
        }
        Ok(())
    }

    fn classify(&self, field: &str, base: &'g BaseRef) -> Result<BaseKind<'g>, SynthError> {
        match base {
            BaseRef::Var(var) => self
                .owner
                .type_param_index(var)
                .map(|index| BaseKind::TypeVar { index })
                .ok_or_else(|| SynthError::UnboundTypeVariable {
                    class: self.owner.name.clone(),
                    field: field.to_owned(),
                    var: var.name().to_owned(),
                }),
            BaseRef::Named { name, args } => {
                let Some(resolved) = self.graph.lookup(name) else {
                    return Err(SynthError::UnresolvedTypeReference {
                        class: self.owner.name.clone(),
                        field: field.to_owned(),
                        name: name.clone(),
                    });
                };
                let expected = match resolved {
                    Resolved::Class(id) => self.graph.class(id).type_params.len(),
                    Resolved::Union(_) | Resolved::Scalar => 0,
                };
                if args.len() != expected {
                    return Err(SynthError::TypeArgumentCount {
                        class: self.owner.name.clone(),
                        field: field.to_owned(),
                        target: name.clone(),
                        expected,
                        found: args.len(),
                    });
                }
                Ok(match resolved {
                    Resolved::Class(id) => BaseKind::Class { id, args },
                    Resolved::Union(id) => BaseKind::Union(id),
                    Resolved::Scalar => BaseKind::Scalar,
                })
            }
        }
    }
}
