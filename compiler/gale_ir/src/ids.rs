//! Index handles into the front end's typed arenas.
//!
//! Each handle is a `u32` newtype. Two handles are the same object exactly
//! when their indices are equal, which is what gives symbols, nodes and
//! packages their identity semantics.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create a handle from a raw index.
            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            /// Get the index into the owning arena.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Get the raw `u32` value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

define_id!(
    /// Handle to an interned [`Symbol`](crate::Symbol).
    SymId,
    "SymId"
);

define_id!(
    /// Handle to a [`Node`](crate::Node) in a [`NodeArena`](crate::NodeArena).
    NodeId,
    "NodeId"
);

define_id!(
    /// Handle to an interned package path.
    PkgId,
    "PkgId"
);
