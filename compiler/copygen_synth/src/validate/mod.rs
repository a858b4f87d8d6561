//! Whole-model checks that run before any synthesis.
//!
//! Unions are checked first, then every field of every class, both in
//! declaration order. The first problem found is reported.

use rustc_hash::{FxHashMap, FxHashSet};

use copygen_model::{ClassId, TypeGraph, UnionId, UnionType};

use crate::analyze::Analyzer;
use crate::SynthError;

/// Check that `graph` can be synthesized.
#[tracing::instrument(level = "debug", skip_all)]
pub fn validate(graph: &TypeGraph) -> Result<(), SynthError> {
    for (id, union) in graph.unions() {
        validate_union(graph, id, union)?;
    }
    for (id, class) in graph.classes() {
        let analyzer = Analyzer::new(graph, id);
        for field in &class.fields {
            analyzer.check(&field.name, &field.ty)?;
        }
    }
    Ok(())
}

fn validate_union(graph: &TypeGraph, id: UnionId, union: &UnionType) -> Result<(), SynthError> {
    if union.variants.is_empty() {
        return Err(SynthError::IncompleteDispatch {
            union: union.name.clone(),
        });
    }

    if let Some(base) = union.base {
        let Some(base_ty) = graph.get_class(base) else {
            return Err(SynthError::UnknownUnionBase {
                union: union.name.clone(),
                class: base.raw(),
            });
        };
        if base_ty.is_generic() {
            return Err(SynthError::GenericUnionMember {
                union: union.name.clone(),
                class: base_ty.name.clone(),
            });
        }
        check_base_chain(graph, union, base)?;
    }

    let mut seen: FxHashMap<&str, ClassId> = FxHashMap::default();
    for &variant in &union.variants {
        let class = graph.class(variant);
        let literal = match (&class.discriminant, class.supertype) {
            (Some(literal), Some(owner)) if owner == id => literal.as_str(),
            _ => {
                return Err(SynthError::MissingDiscriminant {
                    union: union.name.clone(),
                    class: class.name.clone(),
                })
            }
        };
        if class.is_generic() {
            return Err(SynthError::GenericUnionMember {
                union: union.name.clone(),
                class: class.name.clone(),
            });
        }
        if let Some(first) = seen.insert(literal, variant) {
            return Err(SynthError::DuplicateDiscriminant {
                union: union.name.clone(),
                literal: literal.to_owned(),
                first: graph.class(first).name.clone(),
                second: class.name.clone(),
            });
        }
    }
    tracing::trace!(union = %union.name, variants = union.variants.len(), "union ok");
    Ok(())
}

/// Follow base steps from `base` the way constructors run them.
///
/// Each class on the chain that is itself a variant continues with its own
/// union's base, unless that base is the class itself. Reaching a class twice
/// means populating any variant of `union` never terminates.
fn check_base_chain(graph: &TypeGraph, union: &UnionType, base: ClassId) -> Result<(), SynthError> {
    let mut visited: FxHashSet<ClassId> = FxHashSet::default();
    let mut chain = Vec::new();
    let mut owner = union;
    let mut current = base;
    while let Some(class) = graph.get_class(current) {
        chain.push(class.name.clone());
        if !visited.insert(current) {
            return Err(SynthError::CyclicUnionBase {
                union: union.name.clone(),
                chain,
            });
        }
        let Some(next_owner) = class.supertype.and_then(|id| graph.get_union(id)) else {
            return Ok(());
        };
        match next_owner.base {
            Some(next) if next != current => {
                owner = next_owner;
                current = next;
            }
            _ => return Ok(()),
        }
    }
    Err(SynthError::UnknownUnionBase {
        union: owner.name.clone(),
        class: current.raw(),
    })
}
