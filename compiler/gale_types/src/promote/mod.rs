//! Member promotion through embedded fields.
//!
//! A selector `x.s` may name a member of `x`'s type directly (depth 0) or a
//! member of an embedded field's type, recursively (depth 1, 2, ...). The
//! search runs one depth at a time and stops at the shallowest depth that
//! finds anything; more than one path at that depth is an ambiguity.
//!
//! Cycles through embedded types are cut by a visiting set threaded
//! through each search, so nothing is left marked on the graph afterwards.

mod selector;

use gale_ir::{is_exported_name, SymId, SymbolTable, TypeId};
use rustc_hash::FxHashSet;

use crate::graph::{MethodEntry, Promotion, TypeGraph};
use crate::Kind;

/// Deepest embedding level searched.
pub const DOT_DEPTH_LIMIT: usize = 10;

/// A member found by a promotion search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Member {
    /// The member's field entry.
    pub field: TypeId,
    /// Whether the entry is a method rather than a struct field.
    pub is_method: bool,
}

/// Result of a successful promotion search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DotPath {
    /// Number of distinct paths at `depth`; more than one is ambiguous.
    pub count: usize,
    /// Embedding depth of the member; 0 for a direct member.
    pub depth: usize,
    /// Embedded fields leading to the member, outermost first. Only the
    /// first path is kept when the selector is ambiguous.
    pub path: Vec<TypeId>,
    /// The member reached through `path`.
    pub member: Member,
}

impl DotPath {
    pub fn is_ambiguous(&self) -> bool {
        self.count > 1
    }
}

/// Outcome of looking up an interface method on a concrete type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MethodLookup {
    NotFound,
    Ambiguous,
    Found {
        member: Member,
        /// A pointer is dereferenced on the way to the method.
        followptr: bool,
    },
}

struct Search {
    slots: [Option<TypeId>; DOT_DEPTH_LIMIT],
    found: Option<Member>,
    visiting: FxHashSet<TypeId>,
}

impl Search {
    fn new() -> Self {
        Search {
            slots: [None; DOT_DEPTH_LIMIT],
            found: None,
            visiting: FxHashSet::default(),
        }
    }
}

/// Candidate methods gathered by one method-set expansion.
#[derive(Default)]
struct Expansion {
    visiting: FxHashSet<TypeId>,
    /// Method names already collected.
    seen: FxHashSet<SymId>,
    /// Field entries of the candidate methods.
    candidates: Vec<TypeId>,
}

impl TypeGraph {
    /// Strip one pointer level.
    fn deref(&self, t: TypeId) -> TypeId {
        match self.kind(t) {
            Kind::Ptr => self.elem(t).unwrap_or(t),
            _ => t,
        }
    }

    /// Whether any embedded field on a promotion path is a pointer.
    fn path_follows_ptr(&self, path: &[TypeId]) -> bool {
        path.iter().any(|&f| self.is_ptr(self.field_type(f)))
    }

    /// Embedded field entries of a struct or interface, after one pointer
    /// dereference.
    fn embedded_members(&self, t: TypeId) -> Vec<TypeId> {
        let u = self.deref(t);
        if !matches!(self.kind(u), Kind::Struct | Kind::Interface) {
            return Vec::new();
        }
        self.members(u)
            .iter()
            .copied()
            .filter(|&f| self.is_embedded(f) && self.sym(f).is_some())
            .collect()
    }

    /// Fields and methods of `t` itself named `s`.
    fn dot_direct(&self, s: SymId, t: TypeId, found: &mut Option<Member>) -> usize {
        let mut c = 0;
        let u = self.deref(t);
        if matches!(self.kind(u), Kind::Struct | Kind::Interface) {
            let is_method = self.kind(u) == Kind::Interface;
            for &f in self.members(u) {
                if self.sym(f) == Some(s) {
                    *found = Some(Member { field: f, is_method });
                    c += 1;
                }
            }
        }
        if let Some(base) = self.method_base_type(t) {
            for &f in &self.get(base).methods {
                if self.sym(f) == Some(s) && !self.is_embedded(f) {
                    *found = Some(Member {
                        field: f,
                        is_method: true,
                    });
                    c += 1;
                }
            }
        }
        c
    }

    /// Number of paths of exactly `d` embeddings from `t` to a member `s`.
    fn dot_at(&self, s: SymId, t: TypeId, d: usize, search: &mut Search) -> usize {
        if !search.visiting.insert(t) {
            return 0;
        }
        let c = if d == 0 {
            self.dot_direct(s, t, &mut search.found)
        } else {
            let mut c = 0;
            for f in self.embedded_members(t) {
                let a = self.dot_at(s, self.field_type(f), d - 1, search);
                if a != 0 && c == 0 {
                    search.slots[d - 1] = Some(f);
                }
                c += a;
            }
            c
        };
        search.visiting.remove(&t);
        c
    }

    /// Find member `s` of `t` at the shallowest embedding depth.
    ///
    /// `None` when no depth up to [`DOT_DEPTH_LIMIT`] reaches it.
    pub fn dot_search(&self, s: SymId, t: TypeId) -> Option<DotPath> {
        for depth in 0..DOT_DEPTH_LIMIT {
            let mut search = Search::new();
            let count = self.dot_at(s, t, depth, &mut search);
            if count == 0 {
                continue;
            }
            let member = search.found?;
            let path: Vec<TypeId> = search.slots[..depth].iter().rev().flatten().copied().collect();
            tracing::trace!(?t, ?s, depth, count, "promotion path found");
            return Some(DotPath {
                count,
                depth,
                path,
                member,
            });
        }
        None
    }

    /// Look up interface method `s` on `t` for a satisfaction check.
    pub fn lookup_method(&self, s: SymId, t: TypeId) -> MethodLookup {
        match self.dot_search(s, t) {
            None => MethodLookup::NotFound,
            Some(dot) if dot.is_ambiguous() => MethodLookup::Ambiguous,
            Some(dot) => {
                let followptr = self.path_follows_ptr(&dot.path);
                MethodLookup::Found {
                    member: dot.member,
                    followptr,
                }
            }
        }
    }

    /// Compute the externally visible method table of a named type: its
    /// own methods plus every method reachable unambiguously through
    /// embedded fields.
    ///
    /// Does nothing for anonymous types or when the table already exists.
    #[tracing::instrument(level = "debug", skip(self, symbols))]
    pub fn expand_method_set(&mut self, symbols: &SymbolTable, t: TypeId) {
        if self.sym(t).is_none() || self.get(t).xmethods.is_some() {
            return;
        }

        let mut walk = Expansion::default();
        self.collect_methods(symbols, t, DOT_DEPTH_LIMIT - 1, &mut walk);

        let mut xmethods = Vec::new();
        for field in walk.candidates {
            let Some(sym) = self.sym(field) else {
                continue;
            };
            let Some(dot) = self.dot_search(sym, t) else {
                continue;
            };
            if dot.is_ambiguous() || dot.depth == 0 || !dot.member.is_method {
                tracing::trace!(?sym, count = dot.count, depth = dot.depth, "method not promoted");
                continue;
            }
            let promotion = if self.path_follows_ptr(&dot.path) {
                Promotion::ThroughPointer
            } else {
                Promotion::Embedded
            };
            xmethods.push(MethodEntry {
                field: dot.member.field,
                promotion,
            });
        }
        xmethods.extend(self.get(t).methods.iter().map(|&field| MethodEntry {
            field,
            promotion: Promotion::Direct,
        }));
        tracing::debug!(count = xmethods.len(), "method set expanded");
        self.get_mut(t).xmethods = Some(xmethods);
    }

    fn collect_methods(
        &self,
        symbols: &SymbolTable,
        t: TypeId,
        d: usize,
        walk: &mut Expansion,
    ) {
        if d == 0 || walk.visiting.contains(&t) {
            return;
        }
        walk.visiting.insert(t);

        if d != DOT_DEPTH_LIMIT - 1 {
            self.collect_direct_methods(symbols, t, walk);
        }
        for f in self.embedded_members(t) {
            self.collect_methods(symbols, self.field_type(f), d - 1, walk);
        }

        walk.visiting.remove(&t);
    }

    fn collect_direct_methods(&self, symbols: &SymbolTable, t: TypeId, walk: &mut Expansion) {
        let u = self.deref(t);
        let entries: &[TypeId] = if self.kind(u) == Kind::Interface {
            self.members(u)
        } else {
            match self.method_base_type(t) {
                Some(base) => &self.get(base).methods,
                None => &[],
            }
        };
        for &f in entries {
            let Some(sym) = self.sym(f) else {
                continue;
            };
            let hidden = !is_exported_name(symbols.name(sym))
                && symbols.get(sym).package != symbols.current_package();
            if hidden || !walk.seen.insert(sym) {
                continue;
            }
            walk.candidates.push(f);
        }
    }
}
