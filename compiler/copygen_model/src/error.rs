//! Errors raised while assembling a type graph.

use std::fmt;

/// A model the builder refuses to freeze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelError {
    /// Two declarations (class, union, or scalar) share a name.
    DuplicateName { name: String },

    /// `variant()` was called with a handle this builder never issued.
    UnknownVariantTarget { union: u32, class: u32 },

    /// `union()` was given a base handle this builder never issued.
    UnknownUnionBase { union: String, class: u32 },

    /// More declarations than 32-bit handles can address.
    TooManyDeclarations,
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::DuplicateName { name } => {
                write!(f, "`{name}` is declared more than once")
            }
            ModelError::UnknownVariantTarget { union, class } => write!(
                f,
                "variant registration refers to unknown union #{union} or class #{class}"
            ),
            ModelError::UnknownUnionBase { union, class } => {
                write!(f, "union `{union}` names unknown class #{class} as its base")
            }
            ModelError::TooManyDeclarations => {
                f.write_str("type graph exceeds the addressable number of declarations")
            }
        }
    }
}

impl std::error::Error for ModelError {}
