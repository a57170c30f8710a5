//! Type kind tags.
//!
//! [`Kind`] is the flat discriminant of a type: every basic type has its own
//! kind, composites have one kind each. It is what equality compares first,
//! what the structural hash mixes in, and what detailed dumps print.

use std::fmt;

/// Flat kind discriminant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Kind {
    // === Basic (1-21) ===
    Int8 = 1,
    Uint8 = 2,
    Int16 = 3,
    Uint16 = 4,
    Int32 = 5,
    Uint32 = 6,
    Int64 = 7,
    Uint64 = 8,
    Int = 9,
    Uint = 10,
    Uintptr = 11,
    Float32 = 12,
    Float64 = 13,
    Float80 = 14,
    Float = 15,
    Bool = 16,
    String = 17,
    Nil = 18,
    Ideal = 19,
    Ddd = 20,
    Any = 21,

    // === Composite (32-) ===
    Ptr = 32,
    Array = 33,
    Struct = 34,
    Interface = 35,
    Func = 36,
    Map = 37,
    Chan = 38,
    Field = 39,
    Forward = 40,
}

impl Kind {
    /// Upper-case kind name used by detailed type dumps.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Int8 => "INT8",
            Kind::Uint8 => "UINT8",
            Kind::Int16 => "INT16",
            Kind::Uint16 => "UINT16",
            Kind::Int32 => "INT32",
            Kind::Uint32 => "UINT32",
            Kind::Int64 => "INT64",
            Kind::Uint64 => "UINT64",
            Kind::Int => "INT",
            Kind::Uint => "UINT",
            Kind::Uintptr => "UINTPTR",
            Kind::Float32 => "FLOAT32",
            Kind::Float64 => "FLOAT64",
            Kind::Float80 => "FLOAT80",
            Kind::Float => "FLOAT",
            Kind::Bool => "BOOL",
            Kind::String => "STRING",
            Kind::Nil => "NIL",
            Kind::Ideal => "IDEAL",
            Kind::Ddd => "DDD",
            Kind::Any => "ANY",
            Kind::Ptr => "PTR64",
            Kind::Array => "ARRAY",
            Kind::Struct => "STRUCT",
            Kind::Interface => "INTER",
            Kind::Func => "FUNC",
            Kind::Map => "MAP",
            Kind::Chan => "CHAN",
            Kind::Field => "FIELD",
            Kind::Forward => "FORW",
        }
    }

    /// Source spelling of a basic kind, `None` for composites.
    pub const fn basic_name(self) -> Option<&'static str> {
        Some(match self {
            Kind::Int8 => "int8",
            Kind::Uint8 => "uint8",
            Kind::Int16 => "int16",
            Kind::Uint16 => "uint16",
            Kind::Int32 => "int32",
            Kind::Uint32 => "uint32",
            Kind::Int64 => "int64",
            Kind::Uint64 => "uint64",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Uintptr => "uintptr",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::Float80 => "float80",
            Kind::Float => "float",
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::Nil => "nil",
            Kind::Ideal => "ideal",
            Kind::Ddd => "...",
            Kind::Any => "any",
            _ => return None,
        })
    }

    /// Integer kinds.
    pub const fn is_int(self) -> bool {
        matches!(
            self,
            Kind::Int8
                | Kind::Uint8
                | Kind::Int16
                | Kind::Uint16
                | Kind::Int32
                | Kind::Uint32
                | Kind::Int64
                | Kind::Uint64
                | Kind::Int
                | Kind::Uint
                | Kind::Uintptr
        )
    }

    /// Floating point kinds.
    pub const fn is_float(self) -> bool {
        matches!(
            self,
            Kind::Float32 | Kind::Float64 | Kind::Float80 | Kind::Float
        )
    }

    /// Kinds whose values are plain machine words: numbers and booleans.
    pub const fn is_simple(self) -> bool {
        self.is_int() || self.is_float() || matches!(self, Kind::Bool)
    }

    /// Discriminant mixed into the structural hash.
    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction of a channel type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChanDir {
    #[default]
    Both,
    Recv,
    Send,
}

/// Comparison algorithm class of a type, used for map keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AlgKind {
    /// Compared as raw bytes (numbers, pointers, channels, functions, maps).
    Mem,
    String,
    /// Interface with no methods.
    NilInterface,
    Interface,
    /// Not comparable.
    NoEq,
}
