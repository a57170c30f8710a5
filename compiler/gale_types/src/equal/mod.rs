//! Structural type equality.
//!
//! Equality walks both graphs in lock step. Named types are nominal when
//! `names` is set; anonymous composites are always compared by shape.
//! Recursion stops at [`EQ_DEPTH_LIMIT`] levels and treats whatever is left
//! as equal, which is what makes the walk terminate on cyclic types.

use gale_ir::TypeId;

use crate::graph::{TypeGraph, TypeKind};
use crate::Kind;

/// Nesting depth past which two types are assumed equal.
pub const EQ_DEPTH_LIMIT: u32 = 10;

impl TypeGraph {
    /// Structural equality, nominal on named types when `names` is set.
    pub fn eq(&self, t1: TypeId, t2: TypeId, names: bool) -> bool {
        self.eq_at(Some(t1), Some(t2), 0, names)
    }

    fn eq_at(&self, t1: Option<TypeId>, t2: Option<TypeId>, d: u32, names: bool) -> bool {
        if d >= EQ_DEPTH_LIMIT {
            return true;
        }
        if t1 == t2 {
            return true;
        }
        let (Some(t1), Some(t2)) = (t1, t2) else {
            return false;
        };
        let (a, b) = (self.get(t1), self.get(t2));
        if a.kind.kind() != b.kind.kind() {
            return false;
        }
        if names && a.kind.kind() != Kind::Field && a.sym.is_some() && b.sym.is_some() {
            return false;
        }

        match (&a.kind, &b.kind) {
            (TypeKind::Struct { fields: m1 }, TypeKind::Struct { fields: m2 })
            | (TypeKind::Interface { methods: m1 }, TypeKind::Interface { methods: m2 }) => {
                m1.len() == m2.len()
                    && m1.iter().zip(m2).all(|(&f1, &f2)| {
                        self.sym(f1) == self.sym(f2) && self.eq_at(Some(f1), Some(f2), d + 1, names)
                    })
            }
            (
                TypeKind::Func {
                    recv: r1,
                    results: o1,
                    params: i1,
                },
                TypeKind::Func {
                    recv: r2,
                    results: o2,
                    params: i2,
                },
            ) => [(*r1, *r2), (*o1, *o2), (*i1, *i2)]
                .into_iter()
                .all(|(s1, s2)| self.funarg_types_eq(s1, s2, d, names)),
            (TypeKind::Array { bound: n1, .. }, TypeKind::Array { bound: n2, .. }) if n1 != n2 => {
                false
            }
            (TypeKind::Chan { dir: c1, .. }, TypeKind::Chan { dir: c2, .. }) if c1 != c2 => false,
            _ => self.eq_at(self.elem(t1), self.elem(t2), d + 1, names),
        }
    }

    /// Field types of two funarg structs, ignoring field names.
    fn funarg_types_eq(&self, s1: TypeId, s2: TypeId, d: u32, names: bool) -> bool {
        if s1 == s2 {
            return true;
        }
        if self.kind(s1) != Kind::Struct || self.kind(s2) != Kind::Struct {
            return false;
        }
        let (f1, f2) = (self.members(s1), self.members(s2));
        f1.len() == f2.len()
            && f1.iter().zip(f2).all(|(&a, &b)| {
                self.kind(a) == Kind::Field
                    && self.kind(b) == Kind::Field
                    && self.eq_at(Some(self.field_type(a)), Some(self.field_type(b)), d + 1, names)
            })
    }

    /// Whether two function types take and return the same types,
    /// ignoring receivers and every name.
    pub fn same_call_signature(&self, f1: TypeId, f2: TypeId) -> bool {
        self.funarg_types_eq(self.in_struct(f1), self.in_struct(f2), 0, false)
            && self.funarg_types_eq(self.out_struct(f1), self.out_struct(f2), 0, false)
    }

    /// Equality for struct types that ignores the structs' own names:
    /// fields are compared pairwise. Other kinds fall back to [`Self::eq`].
    pub fn eq_no_name(&self, t1: TypeId, t2: TypeId) -> bool {
        if self.kind(t1) != Kind::Struct || self.kind(t2) != Kind::Struct {
            return self.eq(t1, t2, true);
        }
        let (f1, f2) = (self.members(t1), self.members(t2));
        f1.len() == f2.len() && f1.iter().zip(f2).all(|(&a, &b)| self.eq(a, b, true))
    }

    /// Whether two function types also agree on every argument name.
    ///
    /// Meant for two signatures already known to be equal, such as a
    /// forward declaration and its definition.
    pub fn same_argument_names(&self, t1: TypeId, t2: TypeId) -> bool {
        for (what, a, b) in [
            ("recv", self.this_struct(t1), self.this_struct(t2)),
            ("results", self.out_struct(t1), self.out_struct(t2)),
            ("params", self.in_struct(t1), self.in_struct(t2)),
        ] {
            if !self.eq(a, b, true) {
                tracing::trace!(what, "argument names differ");
                return false;
            }
        }
        true
    }

    /// Whether a value of type `src` converts to `dst` without changing
    /// bits: equal shapes once names are ignored, or `nil` / an untyped
    /// constant going to a type that accepts it.
    pub fn convertible(&self, dst: TypeId, src: TypeId) -> bool {
        if self.eq(dst, src, false) {
            return true;
        }
        match self.kind(src) {
            Kind::Nil => {
                matches!(
                    self.kind(dst),
                    Kind::Ptr | Kind::Map | Kind::Chan | Kind::Func | Kind::Interface
                ) || self.is_slice(dst)
            }
            Kind::Ideal => {
                let k = self.kind(dst);
                k.is_int() || k.is_float()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests;
