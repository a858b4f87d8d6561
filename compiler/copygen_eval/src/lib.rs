//! Reference evaluator for synthesized copy constructors.
//!
//! Runs a [`SynthOutput`](copygen_synth::SynthOutput) over dynamic
//! [`Value`]s the way generated code would run over target-language objects.
//! Heap values live in shared cells, so reference identity is observable:
//! that is what the depth-policy tests measure.
//!
//! The signature contract of generated constructors is enforced at runtime:
//! a depth flag is required exactly when the policy declares one, and the
//! number of dictionaries must match the class's type parameters.

mod error;
mod interpreter;
mod value;

pub use error::EvalError;
pub use interpreter::{Callable, Interpreter};
pub use value::{Heap, Instance, Value};
