//! Index handles into the type graph.
//!
//! Classes and unions are stored in declaration order inside [`TypeGraph`];
//! these handles are their positions. Equality is index equality.
//!
//! [`TypeGraph`]: crate::TypeGraph

use std::fmt;

/// A 32-bit index of a class in its [`TypeGraph`](crate::TypeGraph).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ClassId(u32);

/// A 32-bit index of a union in its [`TypeGraph`](crate::TypeGraph).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct UnionId(u32);

macro_rules! index_handle {
    ($ty:ident, $prefix:literal) => {
        impl $ty {
            /// Create a handle from a raw index.
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            /// Get the raw index.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Get the index as `usize` for slice access.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "({})"), self.0)
            }
        }
    };
}

index_handle!(ClassId, "ClassId");
index_handle!(UnionId, "UnionId");
