use pretty_assertions::assert_eq;

use crate::fixtures::user_model;
use crate::{Resolved, TypeVar};

#[test]
fn lookup_resolves_every_declaration_kind() {
    let model = user_model();
    let graph = &model.graph;

    assert_eq!(graph.lookup("Address"), Some(Resolved::Class(model.address)));
    assert_eq!(
        graph.lookup("ShapeUnion"),
        Some(Resolved::Union(model.shape_union))
    );
    assert_eq!(graph.lookup("Authentication"), Some(Resolved::Scalar));
    assert_eq!(graph.lookup("Nope"), None);
}

#[test]
fn typed_lookups_reject_other_kinds() {
    let model = user_model();
    let graph = &model.graph;

    assert_eq!(graph.class_id("Order"), Some(model.order));
    assert_eq!(graph.class_id("ShapeUnion"), None);
    assert_eq!(graph.union_id("Order"), None);
    assert!(graph.is_scalar("string"));
    assert!(!graph.is_scalar("Order"));
}

#[test]
fn classes_iterate_in_declaration_order() {
    let model = user_model();
    let names: Vec<&str> = model
        .graph
        .classes()
        .map(|(_, class)| class.name.as_str())
        .collect();

    assert_eq!(
        names,
        vec![
            "Address",
            "Order",
            "PagedList",
            "ShapeMetadata",
            "Shape",
            "Square",
            "Rectangle",
            "Circle",
            "User",
        ]
    );
    assert_eq!(model.graph.class_count(), 9);
    assert_eq!(model.graph.union_count(), 1);
}

#[test]
fn type_param_positions_follow_declaration() {
    let model = user_model();
    let paged = model.graph.class(model.paged_list);

    assert!(paged.is_generic());
    assert_eq!(paged.type_param_index(&TypeVar::new("T")), Some(0));
    assert_eq!(paged.type_param_index(&TypeVar::new("A")), Some(1));
    assert_eq!(paged.type_param_index(&TypeVar::new("X")), None);
}

#[test]
fn variants_carry_union_and_literal() {
    let model = user_model();
    let graph = &model.graph;
    let union = graph.union(model.shape_union);

    assert_eq!(union.variants, vec![model.square, model.rectangle, model.circle]);
    assert_eq!(union.base, Some(model.shape));
    assert_eq!(union.discriminant_field, "kind");

    let circle = graph.class(model.circle);
    assert_eq!(circle.supertype, Some(model.shape_union));
    assert_eq!(circle.discriminant.as_deref(), Some("circle"));
    assert_eq!(graph.class(model.shape).supertype, None);
}

#[test]
fn checked_access_rejects_foreign_ids() {
    let model = user_model();
    assert!(model.graph.get_class(crate::ClassId::from_raw(999)).is_none());
    assert!(model.graph.get_union(crate::UnionId::from_raw(1)).is_none());
}
