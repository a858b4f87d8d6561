//! Property-based tests for the depth policies.
//!
//! Generates a random wrapper stack over a class reference, a holder class
//! with one field of that type, and random values of the field's shape
//! (absent entries included at every level), then checks:
//! 1. `AlwaysDeep`: the copy is value-equal and shares no mutable cell
//! 2. `FlagControlled`, shallow: the field is reference-identical
//! 3. `FlagControlled`, deep: value-equal and shares no mutable cell

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    reason = "Proptest macros generate code with these patterns"
)]

use copygen_eval::{Interpreter, Value};
use copygen_model::{ClassId, Field, TypeExpr, TypeGraph, TypeGraphBuilder, Wrapper};
use copygen_synth::{synthesize, SynthOptions};
use proptest::prelude::*;

struct Model {
    graph: TypeGraph,
    leaf: ClassId,
    holder: ClassId,
}

/// `Leaf { id: string, tags: Seq<string> }` and `Holder { value: <stack>(Leaf) }`.
fn model_for(stack: &[Wrapper]) -> Model {
    let mut ty = TypeExpr::named("Leaf");
    for wrapper in stack.iter().rev() {
        ty = match wrapper {
            Wrapper::Optional => TypeExpr::optional(ty),
            Wrapper::Sequence => TypeExpr::sequence(ty),
            Wrapper::StringMap => TypeExpr::string_map(ty),
        };
    }

    let mut b = TypeGraphBuilder::new();
    b.scalar("string");
    let leaf = b.class(
        "Leaf",
        &[],
        vec![
            Field::new("id", TypeExpr::named("string")),
            Field::new("tags", TypeExpr::sequence(TypeExpr::named("string"))),
        ],
    );
    let holder = b.class("Holder", &[], vec![Field::new("value", ty)]);
    Model {
        graph: b.build().expect("generated model is well-formed"),
        leaf,
        holder,
    }
}

// -- Strategies --

fn wrapper_strategy() -> impl Strategy<Value = Wrapper> {
    prop_oneof![
        Just(Wrapper::Optional),
        Just(Wrapper::Sequence),
        Just(Wrapper::StringMap),
    ]
}

fn leaf_strategy(leaf: ClassId) -> BoxedStrategy<Value> {
    (
        "[a-z]{0,6}",
        prop::collection::vec("[a-z]{0,3}", 0..3),
    )
        .prop_map(move |(id, tags)| {
            Value::instance(
                leaf,
                [
                    ("id", Value::string(id)),
                    ("tags", Value::seq(tags.into_iter().map(Value::string).collect())),
                ],
            )
        })
        .boxed()
}

/// A value of shape `stack` over `leaf`; any position may be absent.
fn value_strategy(stack: &[Wrapper], leaf: ClassId) -> BoxedStrategy<Value> {
    let present = match stack.split_first() {
        None => leaf_strategy(leaf),
        Some((Wrapper::Optional, rest)) => value_strategy(rest, leaf),
        Some((Wrapper::Sequence, rest)) => prop::collection::vec(value_strategy(rest, leaf), 0..4)
            .prop_map(Value::seq)
            .boxed(),
        Some((Wrapper::StringMap, rest)) => {
            prop::collection::btree_map("[a-z]{1,3}", value_strategy(rest, leaf), 0..4)
                .prop_map(Value::map)
                .boxed()
        }
    };
    prop_oneof![1 => Just(Value::Absent), 4 => present].boxed()
}

fn case_strategy() -> impl Strategy<Value = (Vec<Wrapper>, Value)> {
    prop::collection::vec(wrapper_strategy(), 0..4).prop_flat_map(|stack| {
        let leaf = model_for(&stack).leaf;
        let value = value_strategy(&stack, leaf);
        (Just(stack), value)
    })
}

fn holder_value(model: &Model, value: Value) -> Value {
    Value::instance(model.holder, [("value", value)])
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Always-deep copies are equal and fully disjoint.
    #[test]
    fn prop_always_deep_fidelity((stack, value) in case_strategy()) {
        let model = model_for(&stack);
        let out = synthesize(&model.graph, &SynthOptions::always_deep()).unwrap();
        let interp = Interpreter::new(&model.graph, &out);
        let source = holder_value(&model, value);

        let copy = interp.construct(model.holder, &source, None, vec![]).unwrap();
        prop_assert_eq!(&copy, &source);
        prop_assert!(!copy.shares_heap_with(&source));
    }

    /// A shallow copy hands the field over by reference.
    #[test]
    fn prop_flag_false_shares_field((stack, value) in case_strategy()) {
        let model = model_for(&stack);
        let out = synthesize(&model.graph, &SynthOptions::flag_controlled()).unwrap();
        let interp = Interpreter::new(&model.graph, &out);
        let source = holder_value(&model, value);

        let copy = interp.construct(model.holder, &source, Some(false), vec![]).unwrap();
        prop_assert_eq!(&copy, &source);
        prop_assert!(!copy.same_ref(&source));
        let (Some(new), Some(old)) = (copy.field("value"), source.field("value")) else {
            return Err(TestCaseError::fail("value field missing"));
        };
        prop_assert!(new.same_ref(old));
    }

    /// A deep copy is equal and disjoint all the way down.
    #[test]
    fn prop_flag_true_rebuilds_field((stack, value) in case_strategy()) {
        let model = model_for(&stack);
        let out = synthesize(&model.graph, &SynthOptions::flag_controlled()).unwrap();
        let interp = Interpreter::new(&model.graph, &out);
        let source = holder_value(&model, value);

        let copy = interp.construct(model.holder, &source, Some(true), vec![]).unwrap();
        prop_assert_eq!(&copy, &source);
        prop_assert!(!copy.shares_heap_with(&source));
    }

    /// Parallel synthesis produces the same artifacts.
    #[test]
    fn prop_parallel_synthesis_is_deterministic(stack in prop::collection::vec(wrapper_strategy(), 0..4)) {
        let model = model_for(&stack);
        for options in [SynthOptions::always_deep(), SynthOptions::flag_controlled()] {
            let sequential = synthesize(&model.graph, &options).unwrap();
            let parallel = synthesize(&model.graph, &options.clone().with_parallel(true)).unwrap();
            prop_assert_eq!(parallel, sequential);
        }
    }
}
