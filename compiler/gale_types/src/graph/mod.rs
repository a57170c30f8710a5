//! The type graph.
//!
//! Types are stored in a single `Vec` and referred to by [`TypeId`]. The
//! graph may be cyclic: a named type can refer to itself through a pointer,
//! and a type may be used before its definition is known. Such a use refers
//! to a [`TypeKind::Forward`] placeholder that is later *filled in place*
//! with the definition, so every holder of the handle sees the resolved
//! type without any pointer rewriting.
//!
//! # Member lists
//!
//! Struct fields, interface methods and method tables are lists of
//! [`TypeKind::Field`] entries. A function type holds three funarg structs
//! (receiver, results, params), so every walk over arguments is a walk over
//! struct fields.

mod construct;
mod predicates;

use gale_ir::{to_u32, SymId, SymbolTable, TypeId};

use crate::{ChanDir, Kind};

/// Package that owns the names of the predeclared types.
pub const SYS_PACKAGE: &str = "sys";

/// Pointer width in bytes.
pub const PTR_WIDTH: i64 = 8;

/// How a method in an expanded method table is reached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Promotion {
    /// Declared on the type itself.
    Direct,
    /// Promoted through embedded values only; needs a trampoline.
    Embedded,
    /// Promoted through at least one embedded pointer; needs a trampoline
    /// that dereferences.
    ThroughPointer,
}

/// An entry of an expanded method table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodEntry {
    /// The method's field entry (symbol + function type).
    pub field: TypeId,
    pub promotion: Promotion,
}

/// Kind-specific content of a type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Numbers, `bool`, `string`, `nil`, ideal constants and `...`.
    Basic(Kind),
    Ptr {
        elem: TypeId,
    },
    /// Fixed array when `bound` is set, slice otherwise.
    Array {
        elem: TypeId,
        bound: Option<u64>,
    },
    Struct {
        fields: Vec<TypeId>,
    },
    Interface {
        methods: Vec<TypeId>,
    },
    /// Function type; each member is a funarg struct.
    Func {
        recv: TypeId,
        results: TypeId,
        params: TypeId,
    },
    Map {
        key: TypeId,
        value: TypeId,
    },
    Chan {
        elem: TypeId,
        dir: ChanDir,
    },
    /// Member of a struct, interface, funarg list or method table.
    /// The member's name is the type's `sym`.
    Field {
        ty: TypeId,
        embedded: bool,
        note: Option<String>,
    },
    /// Declared but not yet defined. `map_line` is the first line that used
    /// the type as a map key, recorded so the key check can run once the
    /// definition is known.
    Forward {
        map_line: Option<u32>,
    },
    /// Polymorphic placeholder of builtin signatures. Only copies made by a
    /// deep copy (`copy_any`) may be substituted.
    Any {
        copy_any: bool,
    },
}

impl TypeKind {
    /// The flat kind of this content.
    pub const fn kind(&self) -> Kind {
        match self {
            TypeKind::Basic(k) => *k,
            TypeKind::Ptr { .. } => Kind::Ptr,
            TypeKind::Array { .. } => Kind::Array,
            TypeKind::Struct { .. } => Kind::Struct,
            TypeKind::Interface { .. } => Kind::Interface,
            TypeKind::Func { .. } => Kind::Func,
            TypeKind::Map { .. } => Kind::Map,
            TypeKind::Chan { .. } => Kind::Chan,
            TypeKind::Field { .. } => Kind::Field,
            TypeKind::Forward { .. } => Kind::Forward,
            TypeKind::Any { .. } => Kind::Any,
        }
    }
}

/// A node of the type graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Type {
    pub kind: TypeKind,
    /// Declared name; `None` for anonymous types.
    pub sym: Option<SymId>,
    /// Generation number of a locally declared type.
    pub vargen: u32,
    /// Size in bytes, once laid out.
    pub width: Option<i64>,
    /// Methods declared on a named type, as field entries.
    pub methods: Vec<TypeId>,
    /// Declared plus promoted methods; `None` until expanded.
    pub xmethods: Option<Vec<MethodEntry>>,
}

impl Type {
    /// A fresh anonymous type.
    pub fn new(kind: TypeKind) -> Self {
        Type {
            kind,
            sym: None,
            vargen: 0,
            width: None,
            methods: Vec::new(),
            xmethods: None,
        }
    }
}

/// Storage for all types of a compilation unit.
#[derive(Clone, Debug)]
pub struct TypeGraph {
    types: Vec<Type>,
}

/// Predeclared types in `TypeId` order with their widths.
const PREDECLARED: [(Kind, Option<i64>); TypeId::PREDECLARED_COUNT as usize] = [
    (Kind::Int8, Some(1)),
    (Kind::Uint8, Some(1)),
    (Kind::Int16, Some(2)),
    (Kind::Uint16, Some(2)),
    (Kind::Int32, Some(4)),
    (Kind::Uint32, Some(4)),
    (Kind::Int64, Some(8)),
    (Kind::Uint64, Some(8)),
    (Kind::Int, Some(4)),
    (Kind::Uint, Some(4)),
    (Kind::Uintptr, Some(8)),
    (Kind::Float32, Some(4)),
    (Kind::Float64, Some(8)),
    (Kind::Float80, Some(10)),
    (Kind::Float, Some(4)),
    (Kind::Bool, Some(1)),
    (Kind::String, Some(16)),
    (Kind::Nil, None),
    (Kind::Ideal, None),
    (Kind::Ddd, Some(16)),
    (Kind::Any, None),
];

impl TypeGraph {
    /// Create a graph holding the predeclared types.
    ///
    /// The named basic types get symbols in [`SYS_PACKAGE`], so a user type
    /// declared over `int` is nominally distinct from `int` itself.
    pub fn new(symbols: &mut SymbolTable) -> Self {
        let mut types = Vec::with_capacity(256);
        for (kind, width) in PREDECLARED {
            let content = match kind {
                Kind::Any => TypeKind::Any { copy_any: false },
                k => TypeKind::Basic(k),
            };
            let mut ty = Type::new(content);
            ty.width = width;
            if kind.is_simple() || kind == Kind::String {
                if let Some(name) = kind.basic_name() {
                    ty.sym = Some(symbols.lookup_in(name, SYS_PACKAGE));
                }
            }
            types.push(ty);
        }
        TypeGraph { types }
    }

    /// Number of types, predeclared ones included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always false: the predeclared types are present from the start.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Add a type to the graph.
    pub fn alloc(&mut self, ty: Type) -> TypeId {
        let id = TypeId::new(to_u32(self.types.len(), "type count"));
        self.types.push(ty);
        id
    }

    /// The type behind a handle.
    pub fn get(&self, t: TypeId) -> &Type {
        match self.types.get(t.index()) {
            Some(ty) => ty,
            None => gale_diagnostic::ice(format_args!("dangling type {t:?}")),
        }
    }

    /// The type behind a handle, mutably.
    pub fn get_mut(&mut self, t: TypeId) -> &mut Type {
        match self.types.get_mut(t.index()) {
            Some(ty) => ty,
            None => gale_diagnostic::ice(format_args!("dangling type {t:?}")),
        }
    }

    /// Flat kind of a type.
    #[inline]
    pub fn kind(&self, t: TypeId) -> Kind {
        self.get(t).kind.kind()
    }

    /// Declared name of a type.
    #[inline]
    pub fn sym(&self, t: TypeId) -> Option<SymId> {
        self.get(t).sym
    }

    /// The single child most kinds have: pointer, array and channel element,
    /// map value, field type.
    pub fn elem(&self, t: TypeId) -> Option<TypeId> {
        match &self.get(t).kind {
            TypeKind::Ptr { elem } | TypeKind::Array { elem, .. } | TypeKind::Chan { elem, .. } => {
                Some(*elem)
            }
            TypeKind::Map { value, .. } => Some(*value),
            TypeKind::Field { ty, .. } => Some(*ty),
            _ => None,
        }
    }

    /// Member entries of a struct or interface; empty for other kinds.
    pub fn members(&self, t: TypeId) -> &[TypeId] {
        match &self.get(t).kind {
            TypeKind::Struct { fields } => fields,
            TypeKind::Interface { methods } => methods,
            _ => &[],
        }
    }

    /// Type of a field entry.
    pub fn field_type(&self, field: TypeId) -> TypeId {
        match &self.get(field).kind {
            TypeKind::Field { ty, .. } => *ty,
            other => gale_diagnostic::ice(format_args!(
                "field_type: not a field {field:?} ({})",
                other.kind()
            )),
        }
    }

    /// Whether a field entry is embedded.
    pub fn is_embedded(&self, field: TypeId) -> bool {
        matches!(self.get(field).kind, TypeKind::Field { embedded: true, .. })
    }

    fn func_parts(&self, f: TypeId, what: &str) -> (TypeId, TypeId, TypeId) {
        match &self.get(f).kind {
            TypeKind::Func {
                recv,
                results,
                params,
            } => (*recv, *results, *params),
            other => gale_diagnostic::ice(format_args!("{what}: not a func {f:?} ({})", other.kind())),
        }
    }

    /// Receiver funarg struct of a function type.
    pub fn this_struct(&self, f: TypeId) -> TypeId {
        self.func_parts(f, "this_struct").0
    }

    /// Results funarg struct of a function type.
    pub fn out_struct(&self, f: TypeId) -> TypeId {
        self.func_parts(f, "out_struct").1
    }

    /// Parameters funarg struct of a function type.
    pub fn in_struct(&self, f: TypeId) -> TypeId {
        self.func_parts(f, "in_struct").2
    }

    /// Number of receivers (0 or 1).
    pub fn this_tuple(&self, f: TypeId) -> usize {
        self.members(self.this_struct(f)).len()
    }

    /// Number of parameters.
    pub fn in_tuple(&self, f: TypeId) -> usize {
        self.members(self.in_struct(f)).len()
    }

    /// Number of results.
    pub fn out_tuple(&self, f: TypeId) -> usize {
        self.members(self.out_struct(f)).len()
    }

    /// Receiver type of a function type, if it has a receiver.
    pub fn receiver_type(&self, f: TypeId) -> Option<TypeId> {
        let first = *self.members(self.this_struct(f)).first()?;
        Some(self.field_type(first))
    }

    /// Iterate the field entries of a struct (funarg lists included) or interface.
    ///
    /// Aborts on a type without fields or on a member that is not a field
    /// entry: both mean the graph is malformed.
    pub fn struct_fields(&self, t: TypeId) -> StructFields<'_> {
        match self.kind(t) {
            Kind::Struct | Kind::Interface => {}
            other => gale_diagnostic::ice(format_args!("struct_fields: not struct {t:?} ({other})")),
        }
        StructFields {
            graph: self,
            fields: self.members(t),
            pos: 0,
        }
    }

    /// Iterate receiver then parameter fields of a function type.
    pub fn func_args(&self, f: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        let recv = self.struct_fields(self.this_struct(f));
        let params = self.struct_fields(self.in_struct(f));
        recv.chain(params)
    }
}

/// Iterator over field entries; see [`TypeGraph::struct_fields`].
pub struct StructFields<'a> {
    graph: &'a TypeGraph,
    fields: &'a [TypeId],
    pos: usize,
}

impl Iterator for StructFields<'_> {
    type Item = TypeId;

    fn next(&mut self) -> Option<TypeId> {
        let f = *self.fields.get(self.pos)?;
        self.pos += 1;
        if self.graph.kind(f) != Kind::Field {
            gale_diagnostic::ice(format_args!(
                "struct_fields: member {f:?} is not a field ({})",
                self.graph.kind(f)
            ));
        }
        Some(f)
    }
}
