//! Copy-constructor synthesis.
//!
//! Given a frozen [`TypeGraph`], this crate derives copy-construction logic for
//! every class and a discriminant-driven factory for every closed union. The
//! result is a set of expression trees ([`SynthOutput`]) for an external
//! printer to render.
//!
//! # Architecture
//!
//! ```text
//! TypeGraph
//!     ↓
//!  validate        (discriminants, type variables, references; fail fast)
//!     ↓
//!  Analyzer        (field type → wrapper stack + base kind)
//!     ↓
//!  Resolver        (base kind → atomic strategy, lifted through wrappers)
//!     ↓
//!  construct  +  dispatch     (per class / per union, order-independent)
//!     ↓
//!  combinators     (single dedup pass, stable emission order)
//!     ↓
//!  SynthOutput
//! ```
//!
//! # Depth Policies
//!
//! [`DepthPolicy::AlwaysDeep`] and [`DepthPolicy::FlagControlled`] share the
//! whole analysis; only the final field expressions differ. See
//! [`construct`] for how each policy shapes a field copy.
//!
//! # Failure
//!
//! Any [`SynthError`] aborts the run. Constructors reference one another, so a
//! partial artifact set would not be internally consistent.

pub mod analyze;
pub mod combinators;
pub mod construct;
pub mod dispatch;
mod error;
pub mod format;
pub mod ir;
mod options;
pub mod resolve;
pub mod validate;

use std::sync::Once;

use copygen_model::{ClassId, TypeGraph};
use rayon::prelude::*;

pub use error::{ErrorCode, SynthError};
pub use ir::{
    BaseStep, CombinatorDef, CombinatorKind, CombinatorSignature, ConstructCall, Container,
    CopyConstructor, CopyExpr, CopyFn, CtorParam, DepthArg, DispatchArm, DispatchFactory,
    FieldCopy, Strategy, SynthOutput,
};
pub use options::{DepthPolicy, SynthOptions};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=copygen_synth=debug` or `RUST_LOG=copygen_synth=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

/// Derive copy constructors, dispatch factories and the combinator library
/// for every declaration in `graph`.
///
/// Validation runs first and sequentially, so the reported error does not
/// depend on [`SynthOptions::parallel`]. Output order is declaration order
/// either way.
#[tracing::instrument(level = "debug", skip_all, fields(
    classes = graph.class_count(),
    unions = graph.union_count(),
    policy = ?options.policy,
))]
pub fn synthesize(graph: &TypeGraph, options: &SynthOptions) -> Result<SynthOutput, SynthError> {
    validate::validate(graph)?;
    tracing::debug!("model validated");

    let policy = options.policy;
    let class_ids: Vec<ClassId> = graph.classes().map(|(id, _)| id).collect();
    let constructors = if options.parallel {
        class_ids
            .into_par_iter()
            .map(|id| construct::synthesize_constructor(graph, id, policy))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        class_ids
            .into_iter()
            .map(|id| construct::synthesize_constructor(graph, id, policy))
            .collect::<Result<Vec<_>, _>>()?
    };
    tracing::debug!(count = constructors.len(), "constructors synthesized");

    let dispatchers = graph
        .unions()
        .map(|(id, _)| dispatch::synthesize_dispatch(graph, id, policy))
        .collect::<Result<Vec<_>, _>>()?;

    let combinators = combinators::emit(&constructors, &dispatchers);

    Ok(SynthOutput {
        policy,
        constructors,
        dispatchers,
        combinators,
    })
}

#[cfg(test)]
mod tests;
