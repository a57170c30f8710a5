//! Gale IR - storage and syntax for the front end core.
//!
//! This crate holds the data the type checker works over:
//! - A bump arena for process-lifetime byte storage (identifiers, literals)
//! - The symbol table interning `(package, name)` pairs
//! - AST nodes, the node factory and the Sethi-Ullman estimator
//! - The `TypeId` handle used by nodes to refer into the type graph
//!
//! # Design Philosophy
//!
//! - **Handles, not pointers**: `SymId`, `NodeId`, `TypeId` and `PkgId` are
//!   `u32` indices into typed arenas. Identity comparison is index equality.
//! - **Never freed**: arenas only grow; everything lives until the
//!   compilation unit is dropped.

mod arena;
mod ids;
pub mod node;
mod stack;
pub mod symbol;
mod type_id;

pub use arena::{to_u32, ArenaConfig, Block, BumpArena};
pub use ids::{NodeId, PkgId, SymId};
pub use node::{
    concat, count, escape_str, LineTracker, Node, NodeArena, Op, StorageClass, Val, UINF,
};
pub use stack::ensure_sufficient_stack;
pub use symbol::{
    is_exported_name, string_hash, Symbol, SymbolDisplay, SymbolError, SymbolTable, NHASH,
};
pub use type_id::TypeId;
