//! Synthesis errors.
//!
//! Every variant names the offending declaration. Any one of them aborts the
//! run; no artifacts are produced.

use std::fmt;

/// Stable identifiers for synthesis errors.
///
/// Format: C#### in declaration order of [`SynthError`]. Codes are never
/// reused or renumbered.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Two variants of one union share a discriminant literal
    C0001,
    /// Field references a type variable its class does not declare
    C0002,
    /// Field references a name that is neither class, union nor scalar
    C0003,
    /// Union without variants
    C0004,
    /// Wrong number of type arguments at a reference
    C0005,
    /// Union variant or union base declares type parameters
    C0006,
    /// Union variant without a discriminant literal
    C0007,
    /// Union base steps lead back to a class already on the chain
    C0008,
    /// Union base is not a class of this graph
    C0009,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::C0001 => "C0001",
            ErrorCode::C0002 => "C0002",
            ErrorCode::C0003 => "C0003",
            ErrorCode::C0004 => "C0004",
            ErrorCode::C0005 => "C0005",
            ErrorCode::C0006 => "C0006",
            ErrorCode::C0007 => "C0007",
            ErrorCode::C0008 => "C0008",
            ErrorCode::C0009 => "C0009",
        }
    }

    /// Check if this error concerns a union declaration rather than a field.
    pub fn is_union_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::C0001
                | ErrorCode::C0004
                | ErrorCode::C0006
                | ErrorCode::C0007
                | ErrorCode::C0008
                | ErrorCode::C0009
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fatal synthesis error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SynthError {
    DuplicateDiscriminant {
        union: String,
        literal: String,
        first: String,
        second: String,
    },
    UnboundTypeVariable {
        class: String,
        field: String,
        var: String,
    },
    UnresolvedTypeReference {
        class: String,
        field: String,
        name: String,
    },
    IncompleteDispatch {
        union: String,
    },
    TypeArgumentCount {
        class: String,
        field: String,
        target: String,
        expected: usize,
        found: usize,
    },
    GenericUnionMember {
        union: String,
        class: String,
    },
    MissingDiscriminant {
        union: String,
        class: String,
    },
    /// `chain` starts at the union's base and ends with the repeated class.
    CyclicUnionBase {
        union: String,
        chain: Vec<String>,
    },
    UnknownUnionBase {
        union: String,
        class: u32,
    },
}

impl SynthError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SynthError::DuplicateDiscriminant { .. } => ErrorCode::C0001,
            SynthError::UnboundTypeVariable { .. } => ErrorCode::C0002,
            SynthError::UnresolvedTypeReference { .. } => ErrorCode::C0003,
            SynthError::IncompleteDispatch { .. } => ErrorCode::C0004,
            SynthError::TypeArgumentCount { .. } => ErrorCode::C0005,
            SynthError::GenericUnionMember { .. } => ErrorCode::C0006,
            SynthError::MissingDiscriminant { .. } => ErrorCode::C0007,
            SynthError::CyclicUnionBase { .. } => ErrorCode::C0008,
            SynthError::UnknownUnionBase { .. } => ErrorCode::C0009,
        }
    }

    /// The message without the code prefix.
    pub fn message(&self) -> String {
        match self {
            SynthError::DuplicateDiscriminant {
                union,
                literal,
                first,
                second,
            } => format!(
                "union `{union}` assigns discriminant `{literal}` to both `{first}` and `{second}`"
            ),
            SynthError::UnboundTypeVariable { class, field, var } => format!(
                "field `{class}.{field}` uses type variable `{var}`, which `{class}` does not declare"
            ),
            SynthError::UnresolvedTypeReference { class, field, name } => {
                format!("field `{class}.{field}` references unknown type `{name}`")
            }
            SynthError::IncompleteDispatch { union } => {
                format!("union `{union}` has no variants to dispatch to")
            }
            SynthError::TypeArgumentCount {
                class,
                field,
                target,
                expected,
                found,
            } => format!(
                "field `{class}.{field}` applies `{target}` to {found} type argument(s), expected {expected}"
            ),
            SynthError::GenericUnionMember { union, class } => {
                format!("`{class}` takes type parameters and cannot take part in union `{union}`")
            }
            SynthError::MissingDiscriminant { union, class } => {
                format!("variant `{class}` of union `{union}` has no discriminant literal")
            }
            SynthError::CyclicUnionBase { union, chain } => format!(
                "base classes reached from union `{union}` form a cycle: {}",
                chain.join(" -> ")
            ),
            SynthError::UnknownUnionBase { union, class } => {
                format!("union `{union}` names unknown class #{class} as its base")
            }
        }
    }
}

impl fmt::Display for SynthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code(), self.message())
    }
}

impl std::error::Error for SynthError {}
