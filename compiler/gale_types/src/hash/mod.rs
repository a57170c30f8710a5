//! Structural type hashing.
//!
//! The hash mixes the kind, optionally the type's own name, and the hashes
//! of children up to [`HASH_DEPTH_LIMIT`] levels, each kind of child with
//! its own prime multiplier. A method's receiver is left out so the hash of
//! a method only depends on what a caller sees.
//!
//! Types equal under `eq(.., names = false)` hash equal when `include_name`
//! is off. The converse does not hold.

use gale_ir::{string_hash, SymbolTable, TypeId};

use crate::graph::{TypeGraph, TypeKind};

/// Nesting depth past which children contribute a constant.
pub const HASH_DEPTH_LIMIT: u32 = 5;

const PRIME2: u32 = 10007;
const PRIME3: u32 = 10009;
const PRIME4: u32 = 10037;
const PRIME5: u32 = 10039;
const PRIME6: u32 = 10061;
const PRIME7: u32 = 10067;

impl TypeGraph {
    /// Structural hash of `t`.
    pub fn type_hash(&self, symbols: &SymbolTable, t: TypeId, include_name: bool) -> u32 {
        self.hash_at(symbols, Some(t), include_name, 0)
    }

    fn hash_at(&self, symbols: &SymbolTable, t: Option<TypeId>, include_name: bool, d: u32) -> u32 {
        let Some(t) = t else {
            return PRIME2;
        };
        if d >= HASH_DEPTH_LIMIT {
            return PRIME3;
        }
        let ty = self.get(t);
        let mut h = ty.kind.kind().code().wrapping_mul(PRIME4);
        if include_name {
            if let Some(sym) = ty.sym {
                h = h.wrapping_add(string_hash(symbols.name(sym)));
            }
        }

        let child = |c: TypeId| self.hash_at(symbols, Some(c), include_name, d + 1);
        match &ty.kind {
            TypeKind::Interface { methods } => {
                for &m in methods {
                    h = h.wrapping_add(PRIME6.wrapping_mul(child(m)));
                }
            }
            TypeKind::Struct { fields } => {
                for &f in fields {
                    h = h.wrapping_add(PRIME7.wrapping_mul(child(f)));
                }
            }
            TypeKind::Func {
                results, params, ..
            } => {
                h = h.wrapping_add(PRIME7.wrapping_mul(child(*results)));
                h = h.wrapping_add(PRIME7.wrapping_mul(child(*params)));
            }
            _ => {
                let elem = self.hash_at(symbols, self.elem(t), include_name, d + 1);
                h = h.wrapping_add(PRIME5.wrapping_mul(elem));
            }
        }
        h
    }
}
