//! Type system core of the Gale front end.
//!
//! Everything here works over a [`TypeGraph`]: a flat store of type nodes
//! addressed by `TypeId`, built incrementally by the parser and possibly
//! cyclic. On top of it sit:
//! - Structural equality, convertibility and hashing
//! - Type printing for diagnostics and the export form
//! - Shape copies and placeholder substitution for builtin signatures
//! - Promotion of fields and methods through embedded members, method-set
//!   expansion and trampoline generation
//! - The deferred interface satisfaction checks run at the end of a unit
//!
//! # Termination
//!
//! Walks over the graph either carry a depth counter with a fixed cutoff
//! (equality, hashing, printing) or a visiting set threaded through the
//! call (promotion, deep copy). No traversal marks the graph itself.
//!
//! [`TypeCtx`] bundles the graph with the symbol table, the node arena and
//! the diagnostic queue of one compilation unit, and turns the typed errors
//! of graph operations into diagnostics.

mod ctx;
mod dump;
mod equal;
mod error;
mod format;
pub mod graph;
mod hash;
mod icheck;
mod kind;
mod promote;
mod subst;
mod trampoline;

#[cfg(test)]
mod test_support;

pub use ctx::{CtxOptions, TypeCtx};
pub use dump::DUMP_DEPTH_LIMIT;
pub use equal::EQ_DEPTH_LIMIT;
pub use error::{FormatError, TypeError};
pub use format::{FormatOptions, TypeFormatter, FORMAT_DEPTH_LIMIT};
pub use graph::{MethodEntry, Promotion, Type, TypeGraph, TypeKind, PTR_WIDTH, SYS_PACKAGE};
pub use hash::HASH_DEPTH_LIMIT;
pub use icheck::{Conversion, DeferredChecks, Unsatisfied};
pub use kind::{AlgKind, ChanDir, Kind};
pub use promote::{DotPath, Member, MethodLookup, DOT_DEPTH_LIMIT};
