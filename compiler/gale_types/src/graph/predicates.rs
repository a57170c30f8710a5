//! Type predicates.

use gale_ir::TypeId;

use super::{TypeGraph, TypeKind};
use crate::{AlgKind, Kind};

impl TypeGraph {
    /// Pointer type.
    pub fn is_ptr(&self, t: TypeId) -> bool {
        self.kind(t) == Kind::Ptr
    }

    /// Pointer whose element has kind `kind`.
    pub fn is_ptr_to(&self, t: TypeId, kind: Kind) -> bool {
        match self.get(t).kind {
            TypeKind::Ptr { elem } => self.kind(elem) == kind,
            _ => false,
        }
    }

    /// Array with a bound.
    pub fn is_fixed_array(&self, t: TypeId) -> bool {
        matches!(self.get(t).kind, TypeKind::Array { bound: Some(_), .. })
    }

    /// Array without a bound.
    pub fn is_slice(&self, t: TypeId) -> bool {
        matches!(self.get(t).kind, TypeKind::Array { bound: None, .. })
    }

    pub fn is_interface(&self, t: TypeId) -> bool {
        self.kind(t) == Kind::Interface
    }

    /// `interface { }`.
    pub fn is_nil_interface(&self, t: TypeId) -> bool {
        self.is_interface(t) && self.members(t).is_empty()
    }

    /// The variadic `...` type.
    pub fn is_ddd(&self, t: TypeId) -> bool {
        self.kind(t) == Kind::Ddd
    }

    /// Kinds that have composite literals.
    pub fn is_composite(&self, t: TypeId) -> bool {
        matches!(self.kind(t), Kind::Struct | Kind::Array | Kind::Map)
    }

    /// Base type a method receiver of type `t` declares methods on.
    ///
    /// Strips one pointer level. Named pointers and anonymous types cannot
    /// carry methods.
    pub fn method_base_type(&self, t: TypeId) -> Option<TypeId> {
        let mut t = t;
        if let TypeKind::Ptr { elem } = self.get(t).kind {
            if self.sym(t).is_some() {
                return None;
            }
            t = elem;
        }
        self.sym(t)?;
        let kind = self.kind(t);
        let ok = kind.is_simple()
            || matches!(
                kind,
                Kind::Struct | Kind::Array | Kind::Map | Kind::Chan | Kind::String | Kind::Func
            );
        ok.then_some(t)
    }

    /// How values of `t` are compared.
    pub fn alg_kind(&self, t: TypeId) -> AlgKind {
        let kind = self.kind(t);
        if kind.is_simple()
            || matches!(kind, Kind::Ptr | Kind::Chan | Kind::Func | Kind::Map)
        {
            return AlgKind::Mem;
        }
        match kind {
            Kind::String => AlgKind::String,
            Kind::Interface if self.members(t).is_empty() => AlgKind::NilInterface,
            Kind::Interface => AlgKind::Interface,
            _ => AlgKind::NoEq,
        }
    }

    /// Whether `t` may be used as a map key.
    ///
    /// Function values only compare against `nil`, so they are not keys
    /// even though their comparison algorithm is plain memory.
    pub fn is_key_type(&self, t: TypeId) -> bool {
        match self.kind(t) {
            Kind::Any => true,
            Kind::Func => false,
            _ => self.alg_kind(t) != AlgKind::NoEq,
        }
    }

    /// Whether a method's function type belongs to an interface: no
    /// receiver, or an interface receiver.
    pub fn is_iface_method(&self, func: TypeId) -> bool {
        match self.receiver_type(func) {
            None => true,
            Some(recv) => self.is_interface(recv),
        }
    }
}
