//! Reference object model shared by test suites.
//!
//! Models an account with addresses, paged orders and a closed `Shape`
//! hierarchy. It exercises every base kind and the wrapper nestings that
//! matter: `Seq<Address>`, `Map<Address>`, `Map<Seq<Address>>`,
//! `Seq<Map<Address>>`, generic `PagedList<Order, Authentication>` and
//! union-typed fields.

use crate::{ClassId, Field, TypeExpr, TypeGraph, TypeGraphBuilder, UnionId};

/// The reference graph plus handles to every declaration.
pub struct UserModel {
    pub graph: TypeGraph,
    pub user: ClassId,
    pub address: ClassId,
    pub paged_list: ClassId,
    pub order: ClassId,
    pub shape: ClassId,
    pub shape_metadata: ClassId,
    pub square: ClassId,
    pub rectangle: ClassId,
    pub circle: ClassId,
    pub shape_union: UnionId,
}

/// Build the reference model.
pub fn user_model() -> UserModel {
    let mut b = TypeGraphBuilder::new();
    b.scalars(["string", "number", "boolean", "Authentication"]);

    let address = b.class(
        "Address",
        &[],
        vec![
            Field::new("street", TypeExpr::named("string")),
            Field::new("city", TypeExpr::named("string")),
        ],
    );
    let order = b.class("Order", &[], vec![Field::new("id", TypeExpr::named("string"))]);
    let paged_list = b.class(
        "PagedList",
        &["T", "A"],
        vec![
            Field::new("page", TypeExpr::named("number")),
            Field::new("items", TypeExpr::sequence(TypeExpr::var("T"))),
            Field::new("additionalInfo", TypeExpr::var("A")),
        ],
    );
    let shape_metadata = b.class(
        "ShapeMetadata",
        &[],
        vec![Field::new("group", TypeExpr::named("string"))],
    );
    let shape = b.class(
        "Shape",
        &[],
        vec![
            Field::new("kind", TypeExpr::named("string")),
            Field::new("metadata", TypeExpr::named("ShapeMetadata")),
        ],
    );
    let square = b.class("Square", &[], vec![Field::new("size", TypeExpr::named("number"))]);
    let rectangle = b.class(
        "Rectangle",
        &[],
        vec![
            Field::new("width", TypeExpr::named("number")),
            Field::new("height", TypeExpr::named("number")),
        ],
    );
    let circle = b.class("Circle", &[], vec![Field::new("radius", TypeExpr::named("number"))]);

    let shape_union = b.union("ShapeUnion", "kind", Some(shape));
    b.variant(shape_union, square, "square")
        .variant(shape_union, rectangle, "rectangle")
        .variant(shape_union, circle, "circle");

    let orders = || {
        TypeExpr::applied(
            "PagedList",
            vec![TypeExpr::named("Order"), TypeExpr::named("Authentication")],
        )
    };
    let user = b.class(
        "User",
        &[],
        vec![
            Field::new("name", TypeExpr::named("string")),
            Field::new("authentication", TypeExpr::named("Authentication")),
            Field::new("childAccount", TypeExpr::named("boolean")),
            Field::new("age", TypeExpr::named("number")),
            Field::new("address", TypeExpr::named("Address")),
            Field::new("addresses", TypeExpr::sequence(TypeExpr::named("Address"))),
            Field::new(
                "taggedAddresses",
                TypeExpr::string_map(TypeExpr::named("Address")),
            ),
            Field::new(
                "groupedAddresses",
                TypeExpr::string_map(TypeExpr::sequence(TypeExpr::named("Address"))),
            ),
            Field::new(
                "listOfTaggedAddresses",
                TypeExpr::sequence(TypeExpr::string_map(TypeExpr::named("Address"))),
            ),
            Field::new("orders", orders()),
            Field::new("allOrders", TypeExpr::sequence(orders())),
            Field::new("shape", TypeExpr::named("ShapeUnion")),
            Field::new("shapes", TypeExpr::sequence(TypeExpr::named("ShapeUnion"))),
        ],
    );

    let graph = match b.build() {
        Ok(graph) => graph,
        Err(problem) => panic!("reference model must be well-formed: {problem}"),
    };

    UserModel {
        graph,
        user,
        address,
        paged_list,
        order,
        shape,
        shape_metadata,
        square,
        rectangle,
        circle,
        shape_union,
    }
}
