//! Per-unit type checking context.
//!
//! [`TypeCtx`] owns every table of one compilation unit. Operations that
//! can fail with a user error go through here: the graph-level operation
//! returns a typed error, and the context renders it into a diagnostic at
//! the right line. The only error that escapes is [`FatalError`], once the
//! diagnostic queue hits its limit.

mod builtins;

use gale_diagnostic::{
    Diagnostic, DiagnosticConfig, DiagnosticQueue, ErrorCode, FatalError,
};
use gale_ir::{ArenaConfig, BumpArena, NodeArena, NodeId, SymId, SymbolError, SymbolTable, TypeId};

use crate::format::{FormatOptions, TypeFormatter};
use crate::graph::TypeGraph;
use crate::icheck::DeferredChecks;
use crate::{FormatError, TypeError};

/// Knobs that change what the context produces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CtxOptions {
    /// Source file name, used to qualify local names in export form.
    pub filename: String,
    /// Log every generated trampoline and its body.
    pub trace_trampolines: bool,
}

/// Everything one compilation unit's type checking works on.
pub struct TypeCtx {
    pub symbols: SymbolTable,
    pub nodes: NodeArena,
    pub types: TypeGraph,
    pub checks: DeferredChecks,
    pub diagnostics: DiagnosticQueue,
    /// Function declarations generated by the checker, in creation order.
    pub funcs: Vec<NodeId>,
    pub options: CtxOptions,
}

impl TypeCtx {
    /// A context for `package` with default limits.
    pub fn new(package: &str) -> Self {
        Self::with_config(
            package,
            ArenaConfig::default(),
            DiagnosticConfig::default(),
            CtxOptions::default(),
        )
    }

    pub fn with_config(
        package: &str,
        arena: ArenaConfig,
        diagnostics: DiagnosticConfig,
        options: CtxOptions,
    ) -> Self {
        let mut symbols = SymbolTable::with_arena(package, BumpArena::with_config(arena));
        let types = TypeGraph::new(&mut symbols);
        TypeCtx {
            symbols,
            nodes: NodeArena::with_arena(BumpArena::with_config(arena)),
            types,
            checks: DeferredChecks::default(),
            diagnostics: DiagnosticQueue::with_config(diagnostics),
            funcs: Vec::new(),
            options,
        }
    }

    /// Current source line.
    #[inline]
    pub fn line(&self) -> u32 {
        self.nodes.lines.line
    }

    /// Report a hard error.
    pub fn report(&mut self, diag: Diagnostic) -> Result<(), FatalError> {
        self.diagnostics.emit_error(diag).map(|_| ())
    }

    /// Report an error that does not fail the unit on its own.
    pub fn report_soft(&mut self, diag: Diagnostic) -> Result<(), FatalError> {
        self.diagnostics.emit_soft_error(diag).map(|_| ())
    }

    /// A formatter over this unit's graph.
    pub fn formatter(&self) -> TypeFormatter<'_> {
        TypeFormatter::new(&self.types, &self.symbols).with_filename(&self.options.filename)
    }

    /// Diagnostic rendering of a type.
    pub fn type_string(&self, t: TypeId) -> String {
        self.formatter().format(Some(t), FormatOptions::empty())
    }

    /// Default rendering of a symbol.
    pub fn sym_string(&self, sym: SymId) -> String {
        self.symbols.format(Some(sym), false, false)
    }

    /// Turn a type error into a diagnostic at `line` and report it.
    pub fn report_type_error(&mut self, err: &TypeError, line: u32) -> Result<(), FatalError> {
        let message = match err {
            TypeError::InvalidMapKey { key, .. } => {
                format!("invalid map key type {}", self.type_string(*key))
            }
            TypeError::AmbiguousSelector { ty, sym } => format!(
                "ambiguous DOT reference {}.{}",
                self.type_string(*ty),
                self.sym_string(*sym)
            ),
            TypeError::NonConstantArrayBound | TypeError::NegativeArrayBound { .. } => {
                err.to_string()
            }
        };
        let line = match err {
            TypeError::InvalidMapKey { line, .. } => *line,
            _ => line,
        };
        self.report(
            Diagnostic::error(err.code())
                .with_message(message)
                .at_line(line),
        )
    }

    fn report_symbol_error(&mut self, err: &SymbolError) -> Result<(), FatalError> {
        let code = match err {
            SymbolError::Unexported { .. } => ErrorCode::E2007,
            SymbolError::Redeclared { .. } => ErrorCode::E2005,
        };
        let line = self.line();
        self.report(
            Diagnostic::error(code)
                .with_message(err.to_string())
                .at_line(line),
        )
    }

    /// `map[key]value` at the current line. An invalid key is reported and
    /// the map is built anyway so checking can go on.
    pub fn map_of(&mut self, key: TypeId, value: TypeId) -> Result<TypeId, FatalError> {
        let line = self.line();
        match self.types.map_of(key, value, line) {
            Ok(t) => Ok(t),
            Err(err) => {
                self.report_type_error(&err, line)?;
                Ok(self.types.map_unchecked(key, value))
            }
        }
    }

    /// Array type from a bound expression. An invalid bound is reported and
    /// a slice is built in its place.
    pub fn array_of(&mut self, elem: TypeId, bound: Option<NodeId>) -> Result<TypeId, FatalError> {
        match self.types.array_of(&self.nodes, elem, bound) {
            Ok(t) => Ok(t),
            Err(err) => {
                let line = self.line();
                self.report_type_error(&err, line)?;
                Ok(self.types.slice_of(elem))
            }
        }
    }

    /// Fill a forward placeholder with its definition, reporting a deferred
    /// map key failure at the line that first used the key.
    pub fn resolve_forward(&mut self, fwd: TypeId, def: TypeId) -> Result<(), FatalError> {
        match self.types.resolve_forward(fwd, def) {
            Ok(()) => Ok(()),
            Err(err) => {
                let line = self.line();
                self.report_type_error(&err, line)
            }
        }
    }

    /// Intern `name` in `package`, reporting a reference to an unexported
    /// name of another package. The symbol is returned either way.
    pub fn lookup_restricted(&mut self, name: &str, package: &str) -> Result<SymId, FatalError> {
        match self.symbols.lookup_restricted(name, package) {
            Ok(sym) => Ok(sym),
            Err(err) => {
                self.report_symbol_error(&err)?;
                Ok(self.symbols.lookup_in(name, package))
            }
        }
    }

    /// Import every exported name of `package`, reporting each collision.
    pub fn import_all(&mut self, package: &str) -> Result<(), FatalError> {
        for err in self.symbols.import_all(package) {
            self.report_symbol_error(&err)?;
        }
        Ok(())
    }

    /// Export form of a type. A type still undefined at this point is
    /// reported; the text is returned regardless.
    pub fn export_type(&mut self, t: TypeId) -> Result<String, FatalError> {
        let (text, error) = {
            let mut formatter = self.formatter();
            let text = formatter.format(Some(t), FormatOptions::EXPORT);
            (text, formatter.take_error())
        };
        if let Some(FormatError::UndefinedType { sym }) = error {
            let name = self.symbols.format(sym, false, false);
            let line = self.line();
            self.report(
                Diagnostic::error(ErrorCode::E2008)
                    .with_message(format!("undefined type {name}"))
                    .at_line(line),
            )?;
        }
        Ok(text)
    }

    /// Expand the method table of `t`; see [`TypeGraph::expand_method_set`].
    pub fn expand_method_set(&mut self, t: TypeId) {
        self.types.expand_method_set(&self.symbols, t);
    }
}

#[cfg(test)]
mod tests;
