//! Copy function synthesizer.
//!
//! Builds one [`CopyConstructor`] per class: the signature (source, optional
//! depth flag, one dictionary per type parameter) and an ordered list of
//! field copies.
//!
//! # Depth policies
//!
//! Both policies resolve the same unary copy function for a field and apply
//! it to the source's value. They differ in two places:
//!
//! - Nested constructor calls pass no flag under `AlwaysDeep` and a literal
//!   deep flag under `FlagControlled`.
//! - Under `FlagControlled` a relational field branches on the caller's flag:
//!   the shallow side assigns the source value itself, the deep side applies
//!   the copy function. Scalars and type variables are copied the same way on
//!   both sides, so they get no branch.
//!
//! # Union variants
//!
//! A variant first runs its union base's field population, then copies the
//! discriminant (unless the base already declares it), then its own fields.

use copygen_model::{ClassId, TypeGraph};

use crate::analyze::{Analyzer, FieldShape};
use crate::resolve::Resolver;
use crate::{
    BaseStep, CopyConstructor, CopyExpr, CtorParam, DepthPolicy, FieldCopy, Strategy, SynthError,
};

/// Synthesize the copy constructor of `class`.
///
/// Depends only on the graph, so classes may be processed in any order.
#[tracing::instrument(level = "trace", skip_all, fields(class = %graph.class(class).name))]
pub fn synthesize_constructor(
    graph: &TypeGraph,
    class: ClassId,
    policy: DepthPolicy,
) -> Result<CopyConstructor, SynthError> {
    let class_ty = graph.class(class);
    let analyzer = Analyzer::new(graph, class);
    let resolver = Resolver::new(&analyzer, policy.nested_depth());

    let mut params = Vec::with_capacity(2 + class_ty.type_params.len());
    params.push(CtorParam::Source);
    if policy.takes_flag() {
        params.push(CtorParam::DepthFlag);
    }
    params.extend(
        class_ty
            .type_params
            .iter()
            .enumerate()
            .map(|(index, var)| CtorParam::Dictionary {
                index,
                var: var.clone(),
            }),
    );

    let mut base_step = None;
    let mut discriminant = None;
    let mut fields = Vec::with_capacity(class_ty.fields.len() + 1);

    if let Some(union_id) = class_ty.supertype {
        let union = graph.union(union_id);
        let base = union.base.filter(|&base| base != class);
        base_step = base.map(|base| BaseStep {
            base,
            forward_depth: policy.takes_flag(),
        });

        let base_copies_it =
            base.is_some_and(|base| graph.class(base).has_field(&union.discriminant_field));
        if !base_copies_it {
            fields.push(FieldCopy {
                field: union.discriminant_field.clone(),
                strategy: Strategy::Identity,
                expr: CopyExpr::read(union.discriminant_field.as_str()),
            });
        }
        discriminant = Some(union.discriminant_field.as_str());
    }

    for field in &class_ty.fields {
        if discriminant == Some(field.name.as_str()) {
            continue;
        }
        let shape = analyzer.analyze(field)?;
        let expr = field_expr(&resolver, policy, &field.name, &shape)?;
        fields.push(FieldCopy {
            field: field.name.clone(),
            strategy: shape.base.strategy(),
            expr,
        });
    }

    Ok(CopyConstructor {
        class,
        params,
        base_step,
        fields,
    })
}

fn field_expr<'g>(
    resolver: &Resolver<'_, 'g>,
    policy: DepthPolicy,
    field: &str,
    shape: &FieldShape<'g>,
) -> Result<CopyExpr, SynthError> {
    let read = CopyExpr::read(field);
    let func = resolver.lift(field, shape)?.absence_safe();
    Ok(match policy {
        DepthPolicy::FlagControlled if shape.is_relational() => {
            tracing::trace!(field, "split on depth flag");
            CopyExpr::select_depth(CopyExpr::apply(func, read.clone()), read)
        }
        DepthPolicy::AlwaysDeep | DepthPolicy::FlagControlled => CopyExpr::apply(func, read),
    })
}

#[cfg(test)]
mod tests;
