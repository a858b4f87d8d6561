use pretty_assertions::assert_eq;

use copygen_model::fixtures::user_model;
use copygen_model::{Field, TypeExpr, TypeGraphBuilder};

use super::*;

fn run(graph: &TypeGraph, options: &SynthOptions) -> SynthOutput {
    match synthesize(graph, options) {
        Ok(output) => output,
        Err(err) => panic!("synthesis failed: {err}"),
    }
}

#[test]
fn one_artifact_per_declaration() {
    init_tracing();
    let model = user_model();
    let output = run(&model.graph, &SynthOptions::default());
    assert_eq!(output.policy, DepthPolicy::AlwaysDeep);
    assert_eq!(output.constructors.len(), model.graph.class_count());
    assert_eq!(output.dispatchers.len(), model.graph.union_count());
    for (id, _) in model.graph.classes() {
        assert_eq!(output.constructor(id).map(|c| c.class), Some(id));
    }
    assert_eq!(
        output.dispatcher(model.shape_union).map(|d| d.union),
        Some(model.shape_union)
    );
}

#[test]
fn parallel_run_matches_sequential() {
    let model = user_model();
    for options in [SynthOptions::always_deep(), SynthOptions::flag_controlled()] {
        let sequential = run(&model.graph, &options);
        let parallel = run(&model.graph, &options.clone().with_parallel(true));
        assert_eq!(parallel, sequential);
    }
}

#[test]
fn policies_share_analysis_but_not_bodies() {
    let model = user_model();
    let deep = run(&model.graph, &SynthOptions::always_deep());
    let flagged = run(&model.graph, &SynthOptions::flag_controlled());
    assert_eq!(deep.combinators, flagged.combinators);

    let (Some(deep_user), Some(flag_user)) = (
        deep.constructor(model.user),
        flagged.constructor(model.user),
    ) else {
        panic!("missing user constructor");
    };
    let strategies = |c: &CopyConstructor| c.fields.iter().map(|f| f.strategy).collect::<Vec<_>>();
    assert_eq!(strategies(deep_user), strategies(flag_user));
    assert_ne!(deep_user.fields, flag_user.fields);
}

#[test]
fn any_error_yields_no_output() {
    let mut b = TypeGraphBuilder::new();
    b.scalar("string");
    b.class("Fine", &[], vec![Field::new("id", TypeExpr::named("string"))]);
    b.class("Broken", &[], vec![Field::new("ref", TypeExpr::named("Ghost"))]);
    let graph = match b.build() {
        Ok(g) => g,
        Err(p) => panic!("{p}"),
    };
    for parallel in [false, true] {
        let options = SynthOptions::flag_controlled().with_parallel(parallel);
        assert_eq!(
            synthesize(&graph, &options),
            Err(SynthError::UnresolvedTypeReference {
                class: "Broken".into(),
                field: "ref".into(),
                name: "Ghost".into(),
            })
        );
    }
}

#[test]
fn cyclic_union_bases_stop_the_run() {
    let mut b = TypeGraphBuilder::new();
    b.scalar("string");
    let a = b.class("A", &[], vec![Field::new("id", TypeExpr::named("string"))]);
    let c = b.class("B", &[], vec![Field::new("id", TypeExpr::named("string"))]);
    let left = b.union("Left", "kind", Some(a));
    let right = b.union("Right", "kind", Some(c));
    b.variant(left, c, "b").variant(right, a, "a");
    let graph = match b.build() {
        Ok(g) => g,
        Err(p) => panic!("{p}"),
    };
    for options in [SynthOptions::always_deep(), SynthOptions::flag_controlled()] {
        assert_eq!(
            synthesize(&graph, &options).map_err(|e| e.code()),
            Err(ErrorCode::C0008)
        );
    }
}

#[test]
fn options_builders() {
    assert_eq!(SynthOptions::default(), SynthOptions::always_deep());
    let options = SynthOptions::flag_controlled().with_parallel(true);
    assert_eq!(options.policy, DepthPolicy::FlagControlled);
    assert!(options.parallel);
    assert!(DepthPolicy::FlagControlled.takes_flag());
    assert_eq!(DepthPolicy::AlwaysDeep.nested_depth(), DepthArg::Omitted);
    assert_eq!(DepthPolicy::FlagControlled.nested_depth(), DepthArg::Deep);
}

#[test]
fn init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}
