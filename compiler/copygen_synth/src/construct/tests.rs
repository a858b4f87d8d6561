use pretty_assertions::assert_eq;

use copygen_model::fixtures::user_model;
use copygen_model::{Field, TypeExpr, TypeGraphBuilder, TypeVar};

use super::*;
use crate::{ConstructCall, Container, CopyFn, DepthArg};

fn ctor(graph: &TypeGraph, class: ClassId, policy: DepthPolicy) -> CopyConstructor {
    match synthesize_constructor(graph, class, policy) {
        Ok(ctor) => ctor,
        Err(err) => panic!("synthesis failed: {err}"),
    }
}

fn expr<'c>(ctor: &'c CopyConstructor, field: &str) -> &'c CopyExpr {
    match ctor.field(field) {
        Some(copy) => &copy.expr,
        None => panic!("no copy for {field}"),
    }
}

fn call(class: ClassId, depth: DepthArg) -> CopyFn {
    CopyFn::construct(ConstructCall {
        class,
        depth,
        dictionaries: vec![],
    })
}

// ── Signatures ──────────────────────────────────────────────────────

#[test]
fn always_deep_signature_has_no_flag() {
    let model = user_model();
    let user = ctor(&model.graph, model.user, DepthPolicy::AlwaysDeep);
    assert_eq!(user.params, vec![CtorParam::Source]);
    assert!(!user.takes_depth_flag());
}

#[test]
fn generic_signature_lists_dictionaries_in_order() {
    let model = user_model();
    let paged = ctor(&model.graph, model.paged_list, DepthPolicy::FlagControlled);
    assert_eq!(
        paged.params,
        vec![
            CtorParam::Source,
            CtorParam::DepthFlag,
            CtorParam::Dictionary {
                index: 0,
                var: TypeVar::new("T"),
            },
            CtorParam::Dictionary {
                index: 1,
                var: TypeVar::new("A"),
            },
        ]
    );
    assert_eq!(paged.dictionary_count(), 2);
}

// ── AlwaysDeep bodies ───────────────────────────────────────────────

#[test]
fn always_deep_user_fields() {
    let model = user_model();
    let user = ctor(&model.graph, model.user, DepthPolicy::AlwaysDeep);

    let names: Vec<_> = user.fields.iter().map(|f| f.field.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "name",
            "authentication",
            "childAccount",
            "age",
            "address",
            "addresses",
            "taggedAddresses",
            "groupedAddresses",
            "listOfTaggedAddresses",
            "orders",
            "allOrders",
            "shape",
            "shapes",
        ]
    );

    assert_eq!(expr(&user, "name"), &CopyExpr::read("name"));
    assert_eq!(
        expr(&user, "address"),
        &CopyExpr::apply(
            call(model.address, DepthArg::Omitted).absence_safe(),
            CopyExpr::read("address")
        )
    );
    assert_eq!(
        expr(&user, "taggedAddresses"),
        &CopyExpr::apply(
            CopyFn::lift(Container::StringMap, call(model.address, DepthArg::Omitted)),
            CopyExpr::read("taggedAddresses")
        )
    );
    assert_eq!(
        expr(&user, "shapes"),
        &CopyExpr::apply(
            CopyFn::lift(Container::Sequence, CopyFn::Dispatch(model.shape_union)),
            CopyExpr::read("shapes")
        )
    );
    assert_eq!(
        user.field("orders").map(|f| f.strategy),
        Some(Strategy::RecursiveConstruct)
    );
}

#[test]
fn generic_fields_use_dictionaries() {
    let model = user_model();
    let paged = ctor(&model.graph, model.paged_list, DepthPolicy::AlwaysDeep);
    assert_eq!(
        expr(&paged, "items"),
        &CopyExpr::apply(
            CopyFn::lift(Container::Sequence, CopyFn::Dictionary(0)),
            CopyExpr::read("items")
        )
    );
    assert_eq!(
        expr(&paged, "additionalInfo"),
        &CopyExpr::apply(CopyFn::Dictionary(1), CopyExpr::read("additionalInfo"))
    );
}

// ── FlagControlled bodies ───────────────────────────────────────────

#[test]
fn relational_fields_branch_on_the_flag() {
    let model = user_model();
    let user = ctor(&model.graph, model.user, DepthPolicy::FlagControlled);
    assert_eq!(
        expr(&user, "address"),
        &CopyExpr::select_depth(
            CopyExpr::apply(
                call(model.address, DepthArg::Deep).absence_safe(),
                CopyExpr::read("address")
            ),
            CopyExpr::read("address")
        )
    );
    assert_eq!(
        expr(&user, "shape"),
        &CopyExpr::select_depth(
            CopyExpr::apply(CopyFn::Dispatch(model.shape_union), CopyExpr::read("shape")),
            CopyExpr::read("shape")
        )
    );
    // Scalars are never split.
    assert_eq!(expr(&user, "age"), &CopyExpr::read("age"));
}

#[test]
fn deep_branch_fixes_the_flag_below() {
    let model = user_model();
    let user = ctor(&model.graph, model.user, DepthPolicy::FlagControlled);
    let CopyExpr::SelectDepth { deep, .. } = expr(&user, "orders") else {
        panic!("orders should branch on depth");
    };
    assert_eq!(
        **deep,
        CopyExpr::apply(
            CopyFn::construct(ConstructCall {
                class: model.paged_list,
                depth: DepthArg::Deep,
                dictionaries: vec![
                    call(model.order, DepthArg::Deep).absence_safe(),
                    CopyFn::Identity,
                ],
            })
            .absence_safe(),
            CopyExpr::read("orders")
        )
    );
}

#[test]
fn dictionary_fields_ignore_the_flag() {
    let model = user_model();
    let paged = ctor(&model.graph, model.paged_list, DepthPolicy::FlagControlled);
    assert_eq!(
        expr(&paged, "additionalInfo"),
        &CopyExpr::apply(CopyFn::Dictionary(1), CopyExpr::read("additionalInfo"))
    );
    // The sequence itself is relational even though its elements are not.
    assert!(matches!(
        expr(&paged, "items"),
        CopyExpr::SelectDepth { .. }
    ));
}

// ── Union variants ──────────────────────────────────────────────────

#[test]
fn variant_runs_base_step_and_leaves_discriminant_to_base() {
    let model = user_model();
    let square = ctor(&model.graph, model.square, DepthPolicy::FlagControlled);
    assert_eq!(
        square.base_step,
        Some(BaseStep {
            base: model.shape,
            forward_depth: true,
        })
    );
    let names: Vec<_> = square.fields.iter().map(|f| f.field.as_str()).collect();
    assert_eq!(names, vec!["size"]);

    let always = ctor(&model.graph, model.circle, DepthPolicy::AlwaysDeep);
    assert_eq!(
        always.base_step,
        Some(BaseStep {
            base: model.shape,
            forward_depth: false,
        })
    );
}

#[test]
fn union_base_copies_its_own_fields() {
    let model = user_model();
    let shape = ctor(&model.graph, model.shape, DepthPolicy::AlwaysDeep);
    assert_eq!(shape.base_step, None);
    assert_eq!(expr(&shape, "kind"), &CopyExpr::read("kind"));
    assert_eq!(
        expr(&shape, "metadata"),
        &CopyExpr::apply(
            call(model.shape_metadata, DepthArg::Omitted).absence_safe(),
            CopyExpr::read("metadata")
        )
    );
}

#[test]
fn variant_without_base_threads_discriminant_once() {
    let mut b = TypeGraphBuilder::new();
    b.scalars(["string", "number"]);
    let cat = b.class(
        "Cat",
        &[],
        vec![
            Field::new("type", TypeExpr::named("string")),
            Field::new("lives", TypeExpr::named("number")),
        ],
    );
    let dog = b.class("Dog", &[], vec![Field::new("bark", TypeExpr::named("string"))]);
    let pet = b.union("Pet", "type", None);
    b.variant(pet, cat, "cat").variant(pet, dog, "dog");
    let graph = match b.build() {
        Ok(g) => g,
        Err(p) => panic!("{p}"),
    };

    let cat_ctor = ctor(&graph, cat, DepthPolicy::AlwaysDeep);
    assert_eq!(cat_ctor.base_step, None);
    let names: Vec<_> = cat_ctor.fields.iter().map(|f| f.field.as_str()).collect();
    assert_eq!(names, vec!["type", "lives"]);

    let dog_ctor = ctor(&graph, dog, DepthPolicy::AlwaysDeep);
    let names: Vec<_> = dog_ctor.fields.iter().map(|f| f.field.as_str()).collect();
    assert_eq!(names, vec!["type", "bark"]);
    assert_eq!(dog_ctor.fields[0].strategy, Strategy::Identity);
}

// ── Errors ──────────────────────────────────────────────────────────

#[test]
fn field_errors_propagate() {
    let mut b = TypeGraphBuilder::new();
    let holder = b.class("Holder", &[], vec![Field::new("x", TypeExpr::var("T"))]);
    let graph = match b.build() {
        Ok(g) => g,
        Err(p) => panic!("{p}"),
    };
    assert_eq!(
        synthesize_constructor(&graph, holder, DepthPolicy::AlwaysDeep),
        Err(SynthError::UnboundTypeVariable {
            class: "Holder".into(),
            field: "x".into(),
            var: "T".into(),
        })
    );
}
