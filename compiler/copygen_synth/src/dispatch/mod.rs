//! Polymorphic dispatch synthesizer.

use copygen_model::{TypeGraph, UnionId};

use crate::{ConstructCall, DepthPolicy, DispatchArm, DispatchFactory, SynthError};

/// Build the factory that reconstructs the concrete variant of a `union`
/// value from its discriminant.
///
/// Arms follow variant declaration order; which arm runs depends only on the
/// literal. Each arm calls the variant constructor with the policy's nested
/// depth argument.
#[tracing::instrument(level = "trace", skip_all, fields(union = %graph.union(union).name))]
pub fn synthesize_dispatch(
    graph: &TypeGraph,
    union: UnionId,
    policy: DepthPolicy,
) -> Result<DispatchFactory, SynthError> {
    let union_ty = graph.union(union);
    if union_ty.variants.is_empty() {
        return Err(SynthError::IncompleteDispatch {
            union: union_ty.name.clone(),
        });
    }

    let arms = union_ty
        .variants
        .iter()
        .map(|&variant| {
            let class = graph.class(variant);
            let literal =
                class
                    .discriminant
                    .clone()
                    .ok_or_else(|| SynthError::MissingDiscriminant {
                        union: union_ty.name.clone(),
                        class: class.name.clone(),
                    })?;
            Ok(DispatchArm {
                literal,
                call: ConstructCall {
                    class: variant,
                    depth: policy.nested_depth(),
                    dictionaries: Vec::new(),
                },
            })
        })
        .collect::<Result<Vec<_>, SynthError>>()?;

    tracing::debug!(union = %union_ty.name, arms = arms.len(), "dispatch built");

    Ok(DispatchFactory {
        union,
        discriminant_field: union_ty.discriminant_field.clone(),
        arms,
    })
}
