//! Handle into the type graph.
//!
//! The graph itself lives in `gale_types`. Nodes only need to name a type,
//! so the handle lives here with the other ids.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Index of a type in the type graph.
///
/// The predeclared basic types occupy fixed indices, created in this order by
/// the graph constructor, so the constants below are valid in every graph.
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub const INT8: TypeId = TypeId(0);
    pub const UINT8: TypeId = TypeId(1);
    pub const INT16: TypeId = TypeId(2);
    pub const UINT16: TypeId = TypeId(3);
    pub const INT32: TypeId = TypeId(4);
    pub const UINT32: TypeId = TypeId(5);
    pub const INT64: TypeId = TypeId(6);
    pub const UINT64: TypeId = TypeId(7);
    pub const INT: TypeId = TypeId(8);
    pub const UINT: TypeId = TypeId(9);
    pub const UINTPTR: TypeId = TypeId(10);
    pub const FLOAT32: TypeId = TypeId(11);
    pub const FLOAT64: TypeId = TypeId(12);
    pub const FLOAT80: TypeId = TypeId(13);
    pub const FLOAT: TypeId = TypeId(14);
    pub const BOOL: TypeId = TypeId(15);
    pub const STRING: TypeId = TypeId(16);
    /// Type of the `nil` literal.
    pub const NIL: TypeId = TypeId(17);
    /// Type of untyped numeric constants.
    pub const IDEAL: TypeId = TypeId(18);
    /// Variadic `...` parameter type.
    pub const DDD: TypeId = TypeId(19);
    /// Builtin polymorphic placeholder, substituted per use.
    pub const ANY: TypeId = TypeId(20);

    /// Number of predeclared types; the first dynamically created type
    /// gets this index.
    pub const PREDECLARED_COUNT: u32 = 21;

    /// Create a `TypeId` from a raw index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        TypeId(index)
    }

    /// Get the raw index value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the index into the graph's storage.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is one of the predeclared types.
    #[inline]
    pub const fn is_predeclared(self) -> bool {
        self.0 < Self::PREDECLARED_COUNT
    }
}

impl Hash for TypeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TypeId::INT => write!(f, "TypeId::INT"),
            TypeId::BOOL => write!(f, "TypeId::BOOL"),
            TypeId::STRING => write!(f, "TypeId::STRING"),
            TypeId::NIL => write!(f, "TypeId::NIL"),
            TypeId::IDEAL => write!(f, "TypeId::IDEAL"),
            TypeId::ANY => write!(f, "TypeId::ANY"),
            _ => write!(f, "TypeId({})", self.0),
        }
    }
}
