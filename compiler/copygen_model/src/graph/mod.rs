//! The frozen type graph.
//!
//! # Design
//!
//! - Arena storage: classes and unions live in `Vec`s indexed by
//!   [`ClassId`]/[`UnionId`], so iteration is always declaration order
//! - Name index: one `FxHashMap` resolves any declared name (class, union, or
//!   scalar) in O(1)
//! - No mutation after [`TypeGraphBuilder::build`](crate::TypeGraphBuilder::build)

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::{ClassId, TypeExpr, TypeVar, UnionId};

/// A named, typed member of a class.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub ty: TypeExpr,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A class declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassType {
    /// The class name.
    pub name: String,

    /// Generic parameters in declaration order. The order fixes the
    /// positional order of the dictionary parameters on the synthesized
    /// constructor.
    pub type_params: Vec<TypeVar>,

    /// Fields in declaration order.
    pub fields: Vec<Field>,

    /// The closed union this class is a variant of.
    pub supertype: Option<UnionId>,

    /// The literal identifying this class inside `supertype`.
    /// Set iff `supertype` is set.
    pub discriminant: Option<String>,
}

impl ClassType {
    /// Position of `var` among the declared type parameters.
    pub fn type_param_index(&self, var: &TypeVar) -> Option<usize> {
        self.type_params.iter().position(|p| p == var)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}

/// A closed polymorphic hierarchy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnionType {
    /// The union name, used by fields that refer to "any variant".
    pub name: String,

    /// The field whose literal value selects the variant.
    pub discriminant_field: String,

    /// Class holding the fields every variant shares, if any.
    pub base: Option<ClassId>,

    /// Variants in declaration order.
    pub variants: Vec<ClassId>,
}

/// What a name in a [`BaseRef::Named`](crate::BaseRef::Named) resolves to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Resolved {
    Class(ClassId),
    Union(UnionId),
    /// An opaque scalar or alias; copied by assignment.
    Scalar,
}

/// The immutable object model for one generation run.
#[derive(Clone, Debug, Default)]
pub struct TypeGraph {
    pub(crate) classes: Vec<ClassType>,
    pub(crate) unions: Vec<UnionType>,
    pub(crate) scalars: BTreeSet<String>,
    pub(crate) names: FxHashMap<String, Resolved>,
}

impl TypeGraph {
    /// Get a class by id.
    ///
    /// Ids are only handed out by the builder of this graph, so indexing
    /// cannot fail for ids obtained from it.
    pub fn class(&self, id: ClassId) -> &ClassType {
        &self.classes[id.index()]
    }

    /// Get a union by id.
    pub fn union(&self, id: UnionId) -> &UnionType {
        &self.unions[id.index()]
    }

    /// Checked class access for ids of unknown provenance.
    pub fn get_class(&self, id: ClassId) -> Option<&ClassType> {
        self.classes.get(id.index())
    }

    /// Checked union access for ids of unknown provenance.
    pub fn get_union(&self, id: UnionId) -> Option<&UnionType> {
        self.unions.get(id.index())
    }

    /// Resolve a declared name.
    pub fn lookup(&self, name: &str) -> Option<Resolved> {
        self.names.get(name).copied()
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        match self.lookup(name)? {
            Resolved::Class(id) => Some(id),
            Resolved::Union(_) | Resolved::Scalar => None,
        }
    }

    pub fn union_id(&self, name: &str) -> Option<UnionId> {
        match self.lookup(name)? {
            Resolved::Union(id) => Some(id),
            Resolved::Class(_) | Resolved::Scalar => None,
        }
    }

    pub fn is_scalar(&self, name: &str) -> bool {
        self.scalars.contains(name)
    }

    /// Classes in declaration order.
    pub fn classes(&self) -> impl ExactSizeIterator<Item = (ClassId, &ClassType)> {
        self.classes.iter().enumerate().map(|(i, class)| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "the builder rejects more than u32::MAX classes"
            )]
            let id = ClassId::from_raw(i as u32);
            (id, class)
        })
    }

    /// Unions in declaration order.
    pub fn unions(&self) -> impl ExactSizeIterator<Item = (UnionId, &UnionType)> {
        self.unions.iter().enumerate().map(|(i, union)| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "the builder rejects more than u32::MAX unions"
            )]
            let id = UnionId::from_raw(i as u32);
            (id, union)
        })
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn union_count(&self) -> usize {
        self.unions.len()
    }
}

#[cfg(test)]
mod tests;
