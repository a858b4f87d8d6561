//! Evaluation errors.

use std::fmt;

/// A fault while running synthesized constructors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalError {
    /// Dispatch saw a discriminant no variant declares.
    UnknownDiscriminant { union: String, value: String },
    MissingDepthFlag { class: String },
    UnexpectedDepthFlag { class: String },
    DictionaryCount {
        class: String,
        expected: usize,
        found: usize,
    },
    /// A copy function referenced a dictionary position the frame lacks.
    MissingDictionary { index: usize },
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// No synthesized constructor for this class handle.
    UnknownClass { class: u32 },
    /// No dispatch factory for this union handle.
    UnknownUnion { union: u32 },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnknownDiscriminant { union, value } => {
                write!(f, "union `{union}` has no variant for discriminant `{value}`")
            }
            EvalError::MissingDepthFlag { class } => {
                write!(f, "`{class}` constructor requires a depth flag")
            }
            EvalError::UnexpectedDepthFlag { class } => {
                write!(f, "`{class}` constructor takes no depth flag")
            }
            EvalError::DictionaryCount {
                class,
                expected,
                found,
            } => write!(
                f,
                "`{class}` constructor takes {expected} copy function(s), got {found}"
            ),
            EvalError::MissingDictionary { index } => {
                write!(f, "no copy function at dictionary position {index}")
            }
            EvalError::TypeMismatch { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            EvalError::UnknownClass { class } => write!(f, "no constructor for class #{class}"),
            EvalError::UnknownUnion { union } => write!(f, "no dispatch factory for union #{union}"),
        }
    }
}

impl std::error::Error for EvalError {}
