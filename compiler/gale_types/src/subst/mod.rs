//! Shape copies for polymorphic builtin signatures.
//!
//! Builtin declarations in the `sys` package use [`TypeKind::Any`] where a
//! concrete type is plugged in per call site. A use site deep-copies the
//! signature ([`TypeGraph::deep_copy`]), which marks every placeholder of
//! the copy substitutable, then fills the placeholders one at a time
//! ([`TypeGraph::substitute_any`]). The template itself is never touched.

use gale_ir::TypeId;
use rustc_hash::FxHashSet;

use crate::graph::{TypeGraph, TypeKind};
use crate::EQ_DEPTH_LIMIT;

/// Outcome of a placeholder search below one type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Subst {
    NotFound,
    /// This type is the placeholder; the parent must point at the
    /// replacement instead.
    Replace,
    /// Replaced somewhere below.
    Done,
}

impl TypeGraph {
    /// Copy one type node. Children are shared with the original.
    pub fn shallow_copy(&mut self, t: TypeId) -> TypeId {
        let ty = self.get(t).clone();
        self.alloc(ty)
    }

    /// Copy a type expression down to its leaves.
    ///
    /// Pointers, channels, arrays, maps, functions and structs are copied
    /// (struct fields included). Placeholders are copied and marked
    /// substitutable. Everything else, named leaves and types already being
    /// copied further up included, is shared.
    pub fn deep_copy(&mut self, t: TypeId) -> TypeId {
        let mut visiting = FxHashSet::default();
        self.deep_at(t, &mut visiting)
    }

    fn deep_at(&mut self, t: TypeId, visiting: &mut FxHashSet<TypeId>) -> TypeId {
        if !visiting.insert(t) {
            return t;
        }
        let copy = match self.get(t).kind.clone() {
            TypeKind::Any { .. } => {
                let n = self.shallow_copy(t);
                self.get_mut(n).kind = TypeKind::Any { copy_any: true };
                n
            }
            TypeKind::Ptr { elem } => {
                let n = self.shallow_copy(t);
                let elem = self.deep_at(elem, visiting);
                self.get_mut(n).kind = TypeKind::Ptr { elem };
                n
            }
            TypeKind::Chan { elem, dir } => {
                let n = self.shallow_copy(t);
                let elem = self.deep_at(elem, visiting);
                self.get_mut(n).kind = TypeKind::Chan { elem, dir };
                n
            }
            TypeKind::Array { elem, bound } => {
                let n = self.shallow_copy(t);
                let elem = self.deep_at(elem, visiting);
                self.get_mut(n).kind = TypeKind::Array { elem, bound };
                n
            }
            TypeKind::Map { key, value } => {
                let n = self.shallow_copy(t);
                let key = self.deep_at(key, visiting);
                let value = self.deep_at(value, visiting);
                self.get_mut(n).kind = TypeKind::Map { key, value };
                n
            }
            TypeKind::Func {
                recv,
                results,
                params,
            } => {
                let n = self.shallow_copy(t);
                let recv = self.deep_at(recv, visiting);
                let results = self.deep_at(results, visiting);
                let params = self.deep_at(params, visiting);
                self.get_mut(n).kind = TypeKind::Func {
                    recv,
                    results,
                    params,
                };
                n
            }
            TypeKind::Struct { fields } => {
                let n = self.shallow_copy(t);
                let mut copied = Vec::with_capacity(fields.len());
                for f in fields {
                    let nf = self.shallow_copy(f);
                    if let TypeKind::Field { ty, .. } = self.get(f).kind {
                        let ty = self.deep_at(ty, visiting);
                        if let TypeKind::Field { ty: slot, .. } = &mut self.get_mut(nf).kind {
                            *slot = ty;
                        }
                    }
                    copied.push(nf);
                }
                self.get_mut(n).kind = TypeKind::Struct { fields: copied };
                n
            }
            TypeKind::Basic(_)
            | TypeKind::Interface { .. }
            | TypeKind::Field { .. }
            | TypeKind::Forward { .. } => t,
        };
        visiting.remove(&t);
        copy
    }

    /// Replace the first substitutable placeholder reachable from `t` by
    /// `replacement`.
    ///
    /// Returns the (possibly new) root: when `t` itself is the placeholder
    /// the replacement is returned. `None` when there is no placeholder.
    pub fn substitute_any(&mut self, t: TypeId, replacement: TypeId) -> Option<TypeId> {
        match self.subst_at(t, replacement, 0) {
            Subst::NotFound => None,
            Subst::Replace => Some(replacement),
            Subst::Done => Some(t),
        }
    }

    fn subst_at(&mut self, t: TypeId, replacement: TypeId, d: u32) -> Subst {
        let d = d + 1;
        if d >= EQ_DEPTH_LIMIT {
            return Subst::NotFound;
        }
        match self.get(t).kind.clone() {
            TypeKind::Any { copy_any } => {
                if copy_any {
                    Subst::Replace
                } else {
                    Subst::NotFound
                }
            }
            TypeKind::Ptr { elem } | TypeKind::Chan { elem, .. } | TypeKind::Array { elem, .. } => {
                match self.subst_at(elem, replacement, d) {
                    Subst::Replace => {
                        match &mut self.get_mut(t).kind {
                            TypeKind::Ptr { elem }
                            | TypeKind::Chan { elem, .. }
                            | TypeKind::Array { elem, .. } => *elem = replacement,
                            _ => {}
                        }
                        Subst::Done
                    }
                    other => other,
                }
            }
            TypeKind::Map { key, value } => {
                match self.subst_at(key, replacement, d) {
                    Subst::Replace => {
                        if let TypeKind::Map { key, .. } = &mut self.get_mut(t).kind {
                            *key = replacement;
                        }
                        return Subst::Done;
                    }
                    Subst::Done => return Subst::Done,
                    Subst::NotFound => {}
                }
                match self.subst_at(value, replacement, d) {
                    Subst::Replace => {
                        if let TypeKind::Map { value, .. } = &mut self.get_mut(t).kind {
                            *value = replacement;
                        }
                        Subst::Done
                    }
                    other => other,
                }
            }
            TypeKind::Func {
                recv,
                results,
                params,
            } => {
                for s in [recv, params, results] {
                    if self.subst_at(s, replacement, d) != Subst::NotFound {
                        return Subst::Done;
                    }
                }
                Subst::NotFound
            }
            TypeKind::Struct { fields } => {
                for f in fields {
                    let TypeKind::Field { ty, .. } = self.get(f).kind else {
                        continue;
                    };
                    match self.subst_at(ty, replacement, d) {
                        Subst::Replace => {
                            if let TypeKind::Field { ty, .. } = &mut self.get_mut(f).kind {
                                *ty = replacement;
                            }
                            return Subst::Done;
                        }
                        Subst::Done => return Subst::Done,
                        Subst::NotFound => {}
                    }
                }
                Subst::NotFound
            }
            TypeKind::Basic(_)
            | TypeKind::Interface { .. }
            | TypeKind::Field { .. }
            | TypeKind::Forward { .. } => Subst::NotFound,
        }
    }
}
