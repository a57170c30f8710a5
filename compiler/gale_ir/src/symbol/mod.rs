//! Symbol table: interning of `(package, name)` pairs.
//!
//! Every identifier the front end sees is interned here. A symbol is created
//! on first lookup and lives as long as the table, and the table never hands
//! out two distinct [`SymId`]s for the same pair, so identity of handles is
//! identity of names.
//!
//! Names are stored in the table's [`BumpArena`]. Buckets are chained through
//! `Symbol::link`, newest first.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{Block, BumpArena, NodeId, PkgId, SymId};

/// Number of hash buckets.
pub const NHASH: usize = 1024;

/// Multiplier of the identifier hash.
const PRIME1: i32 = 3;

/// Order-sensitive polynomial hash of an identifier, never negative.
pub fn string_hash(name: &str) -> u32 {
    let mut h: i32 = 0;
    for &c in name.as_bytes() {
        h = h.wrapping_mul(PRIME1).wrapping_add(i32::from(c));
    }
    if h < 0 {
        h = h.wrapping_neg();
        if h < 0 {
            h = 0;
        }
    }
    h.unsigned_abs()
}

/// Whether `name` follows the exported-identifier convention (upper-case
/// first letter).
pub fn is_exported_name(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Failures of symbol-table operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SymbolError {
    /// Cross-package reference to an unexported name. The symbol is still
    /// interned so analysis can continue.
    #[error("cannot refer to {package}.{name}")]
    Unexported {
        package: String,
        name: String,
        sym: SymId,
    },
    /// An imported name collides with an existing definition.
    #[error("redeclaration of {package}.{name} during import")]
    Redeclared {
        package: String,
        name: String,
        sym: SymId,
    },
}

/// An interned identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    name: Block,
    pub package: PkgId,
    /// Declaration this symbol currently names, if any.
    pub def: Option<NodeId>,
    /// Generation number distinguishing shadowed declarations.
    pub vargen: u32,
    /// Symbol was brought in by an import.
    pub imported: bool,
    /// Symbol is exported from its package.
    pub export: bool,
    /// Next symbol in the same bucket.
    link: Option<SymId>,
}

/// Interning table for symbols and package names.
pub struct SymbolTable {
    arena: BumpArena,
    symbols: Vec<Symbol>,
    buckets: Vec<Option<SymId>>,
    packages: Vec<Block>,
    package_index: FxHashMap<String, PkgId>,
    current: PkgId,
}

impl SymbolTable {
    /// Create a table whose current package is `package`.
    pub fn new(package: &str) -> Self {
        Self::with_arena(package, BumpArena::new())
    }

    /// Create a table storing names in `arena`.
    pub fn with_arena(package: &str, arena: BumpArena) -> Self {
        let mut table = SymbolTable {
            arena,
            symbols: Vec::new(),
            buckets: vec![None; NHASH],
            packages: Vec::new(),
            package_index: FxHashMap::default(),
            current: PkgId::new(0),
        };
        table.current = table.intern_package(package);
        table
    }

    /// The package being compiled.
    #[inline]
    pub fn current_package(&self) -> PkgId {
        self.current
    }

    /// Switch the package being compiled.
    pub fn set_current_package(&mut self, package: &str) -> PkgId {
        self.current = self.intern_package(package);
        self.current
    }

    /// Intern a package path.
    pub fn intern_package(&mut self, package: &str) -> PkgId {
        if let Some(id) = self.find_package(package) {
            return id;
        }
        let block = self.arena.alloc_str(package);
        let id = PkgId::new(crate::to_u32(self.packages.len(), "package count"));
        self.packages.push(block);
        self.package_index.insert(package.to_owned(), id);
        id
    }

    /// Look up a package path without interning it.
    pub fn find_package(&self, package: &str) -> Option<PkgId> {
        self.package_index.get(package).copied()
    }

    /// Path of an interned package.
    pub fn package_name(&self, pkg: PkgId) -> &str {
        match self.packages.get(pkg.index()) {
            Some(&b) => self.arena.str(b),
            None => gale_diagnostic::ice(format_args!("unknown package {pkg:?}")),
        }
    }

    /// Name of a symbol.
    pub fn name(&self, sym: SymId) -> &str {
        self.arena.str(self.get(sym).name)
    }

    /// Package path of a symbol.
    pub fn package_of(&self, sym: SymId) -> &str {
        self.package_name(self.get(sym).package)
    }

    /// The symbol record.
    pub fn get(&self, sym: SymId) -> &Symbol {
        match self.symbols.get(sym.index()) {
            Some(s) => s,
            None => gale_diagnostic::ice(format_args!("unknown symbol {sym:?}")),
        }
    }

    /// The symbol record, mutably.
    pub fn get_mut(&mut self, sym: SymId) -> &mut Symbol {
        match self.symbols.get_mut(sym.index()) {
            Some(s) => s,
            None => gale_diagnostic::ice(format_args!("unknown symbol {sym:?}")),
        }
    }

    /// Number of interned symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether no symbol has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Intern `name` in the current package.
    pub fn lookup(&mut self, name: &str) -> SymId {
        self.lookup_pkg(name, self.current)
    }

    /// Intern `name` in `package`.
    pub fn lookup_in(&mut self, name: &str, package: &str) -> SymId {
        let pkg = self.intern_package(package);
        self.lookup_pkg(name, pkg)
    }

    /// Intern `name` in `package`, rejecting cross-package references to
    /// unexported names.
    pub fn lookup_restricted(&mut self, name: &str, package: &str) -> Result<SymId, SymbolError> {
        let sym = self.lookup_in(name, package);
        if !is_exported_name(name) && self.get(sym).package != self.current {
            return Err(SymbolError::Unexported {
                package: package.to_owned(),
                name: name.to_owned(),
                sym,
            });
        }
        Ok(sym)
    }

    /// Find an already interned symbol.
    pub fn find(&self, name: &str, pkg: PkgId) -> Option<SymId> {
        let bucket = string_hash(name) as usize % NHASH;
        let first = name.as_bytes().first();
        let mut cursor = self.buckets[bucket];
        while let Some(id) = cursor {
            let sym = &self.symbols[id.index()];
            let stored = self.arena.bytes(sym.name);
            if stored.first() == first && stored == name.as_bytes() && sym.package == pkg {
                return Some(id);
            }
            cursor = sym.link;
        }
        None
    }

    /// Intern `name` in an interned package.
    pub fn lookup_pkg(&mut self, name: &str, pkg: PkgId) -> SymId {
        if let Some(id) = self.find(name, pkg) {
            return id;
        }
        let bucket = string_hash(name) as usize % NHASH;
        let block = self.arena.alloc_str(name);
        let id = SymId::new(crate::to_u32(self.symbols.len(), "symbol count"));
        self.symbols.push(Symbol {
            name: block,
            package: pkg,
            def: None,
            vargen: 0,
            imported: false,
            export: is_exported_name(name),
            link: self.buckets[bucket],
        });
        self.buckets[bucket] = Some(id);
        id
    }

    /// Make every exported definition of `package` visible in the current
    /// package.
    ///
    /// Names that already have a definition in the current package are left
    /// alone and reported. Importing the current package is a no-op.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn import_all(&mut self, package: &str) -> Vec<SymbolError> {
        let Some(pkg) = self.find_package(package) else {
            return Vec::new();
        };
        if pkg == self.current {
            return Vec::new();
        }

        let candidates: Vec<(SymId, Option<NodeId>)> = self
            .symbols
            .iter()
            .enumerate()
            .filter(|(_, s)| s.package == pkg && is_exported_name(self.arena.str(s.name)))
            .map(|(i, s)| (SymId::new(crate::to_u32(i, "symbol count")), s.def))
            .collect();

        let mut errors = Vec::new();
        for (src, def) in candidates {
            let name = self.name(src).to_owned();
            let local = self.lookup(&name);
            if self.get(local).def.is_some() {
                let current = self.package_name(self.current).to_owned();
                errors.push(SymbolError::Redeclared {
                    package: current,
                    name,
                    sym: local,
                });
                continue;
            }
            let sym = self.get_mut(local);
            sym.def = def;
            sym.imported = true;
        }
        tracing::debug!(errors = errors.len(), "import finished");
        errors
    }

    /// Render a symbol reference.
    ///
    /// `pkg.name` when the symbol belongs to another package (or `long` is
    /// set), bare `name` otherwise. `short` always gives the bare name.
    pub fn format(&self, sym: Option<SymId>, short: bool, long: bool) -> String {
        let Some(sym) = sym else {
            return "<S>".to_owned();
        };
        let name = self.name(sym);
        let record = self.get(sym);
        if !short && (record.package != self.current || long) {
            return format!("{}.{name}", self.package_name(record.package));
        }
        name.to_owned()
    }

    /// A display adapter for a symbol in its default form.
    pub fn display(&self, sym: SymId) -> SymbolDisplay<'_> {
        SymbolDisplay { table: self, sym }
    }
}

/// Displays a symbol as [`SymbolTable::format`] does by default.
pub struct SymbolDisplay<'a> {
    table: &'a SymbolTable,
    sym: SymId,
}

impl fmt::Display for SymbolDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.table.format(Some(self.sym), false, false))
    }
}
