//! Type graph model for copy-constructor synthesis.
//!
//! The model is an already-resolved description of a statically typed object
//! model:
//!
//! - **Classes** ([`ClassType`]) with ordered generic parameters and fields
//! - **Field shapes** ([`TypeExpr`]) built from a base reference wrapped in any
//!   stack of [`Optional`](TypeExpr::Optional), [`Sequence`](TypeExpr::Sequence)
//!   and [`StringMap`](TypeExpr::StringMap) layers
//! - **Closed unions** ([`UnionType`]) whose variants carry a unique
//!   discriminant literal
//!
//! # Lifecycle
//!
//! A [`TypeGraph`] is assembled once per generation run through
//! [`TypeGraphBuilder`] and is immutable afterwards. Synthesis only ever holds
//! `&TypeGraph`.
//!
//! ```text
//! provider ──► TypeGraphBuilder ──► TypeGraph (frozen) ──► copygen_synth
//! ```

mod builder;
mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
mod graph;
mod ids;
mod type_expr;

pub use builder::TypeGraphBuilder;
pub use error::ModelError;
pub use graph::{ClassType, Field, Resolved, TypeGraph, UnionType};
pub use ids::{ClassId, UnionId};
pub use type_expr::{BaseRef, TypeExpr, TypeVar, Wrapper, WrapperStack};
