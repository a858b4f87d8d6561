//! Incremental construction of a [`TypeGraph`].
//!
//! Declaration methods hand out ids immediately so that later declarations
//! can refer to earlier ones. Problems are recorded as they happen and the
//! first one is reported by [`TypeGraphBuilder::build`], so a provider can
//! declare a whole model without threading `Result` through every call.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::{ClassId, ClassType, Field, ModelError, Resolved, TypeGraph, TypeVar, UnionId, UnionType};

/// Builder for [`TypeGraph`].
#[derive(Debug, Default)]
pub struct TypeGraphBuilder {
    classes: Vec<ClassType>,
    unions: Vec<UnionType>,
    scalars: BTreeSet<String>,
    names: FxHashMap<String, Resolved>,
    /// First problem seen; later ones are usually consequences of it.
    problem: Option<ModelError>,
}

impl TypeGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an opaque scalar or alias type (copied by assignment).
    pub fn scalar(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if self.declare(&name, Resolved::Scalar) {
            self.scalars.insert(name);
        }
        self
    }

    /// Declare several scalars at once.
    pub fn scalars<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.scalar(name);
        }
        self
    }

    /// Declare a class with its generic parameters and fields.
    pub fn class(
        &mut self,
        name: impl Into<String>,
        type_params: &[&str],
        fields: Vec<Field>,
    ) -> ClassId {
        let id = ClassId::from_raw(self.next_index(self.classes.len()));
        let name = name.into();
        self.declare(&name, Resolved::Class(id));
        self.classes.push(ClassType {
            name,
            type_params: type_params.iter().map(|p| TypeVar::new(*p)).collect(),
            fields,
            supertype: None,
            discriminant: None,
        });
        id
    }

    /// Declare a closed union selected by `discriminant_field`.
    ///
    /// `base` names the class whose fields all variants share; it must
    /// already be declared.
    pub fn union(
        &mut self,
        name: impl Into<String>,
        discriminant_field: impl Into<String>,
        base: Option<ClassId>,
    ) -> UnionId {
        let id = UnionId::from_raw(self.next_index(self.unions.len()));
        let name = name.into();
        self.declare(&name, Resolved::Union(id));
        if let Some(base) = base.filter(|base| base.index() >= self.classes.len()) {
            self.record(ModelError::UnknownUnionBase {
                union: name.clone(),
                class: base.raw(),
            });
        }
        self.unions.push(UnionType {
            name,
            discriminant_field: discriminant_field.into(),
            base,
            variants: Vec::new(),
        });
        id
    }

    /// Make `class` a variant of `union`, tagged with `literal`.
    ///
    /// Literal uniqueness is deliberately not checked here; synthesis
    /// validates it and reports the offending pair.
    pub fn variant(
        &mut self,
        union: UnionId,
        class: ClassId,
        literal: impl Into<String>,
    ) -> &mut Self {
        if union.index() >= self.unions.len() || class.index() >= self.classes.len() {
            self.record(ModelError::UnknownVariantTarget {
                union: union.raw(),
                class: class.raw(),
            });
            return self;
        }

        let class_ty = &mut self.classes[class.index()];
        class_ty.supertype = Some(union);
        class_ty.discriminant = Some(literal.into());
        self.unions[union.index()].variants.push(class);
        self
    }

    /// Freeze the graph.
    pub fn build(self) -> Result<TypeGraph, ModelError> {
        if let Some(problem) = self.problem {
            return Err(problem);
        }
        Ok(TypeGraph {
            classes: self.classes,
            unions: self.unions,
            scalars: self.scalars,
            names: self.names,
        })
    }

    /// Register a name; returns `false` (and records the problem) on reuse.
    fn declare(&mut self, name: &str, resolved: Resolved) -> bool {
        if self.names.contains_key(name) {
            self.record(ModelError::DuplicateName {
                name: name.to_string(),
            });
            return false;
        }
        self.names.insert(name.to_string(), resolved);
        true
    }

    fn next_index(&mut self, len: usize) -> u32 {
        if let Ok(raw) = u32::try_from(len) {
            raw
        } else {
            self.record(ModelError::TooManyDeclarations);
            u32::MAX
        }
    }

    fn record(&mut self, problem: ModelError) {
        if self.problem.is_none() {
            self.problem = Some(problem);
        }
    }
}
