//! Type rendering.
//!
//! One renderer serves diagnostics and the export writer. Modes are a
//! [`FormatOptions`] value passed down explicitly; nested types inherit
//! only [`FormatOptions::INHERITED`] plus whatever the parent adds for that
//! child. Rendering terminates on cyclic types because each type may appear
//! at most [`FORMAT_DEPTH_LIMIT`] times on the current rendering path, after
//! which it prints as `...`.

use bitflags::bitflags;
use gale_ir::{escape_str, SymId, SymbolTable, TypeId};
use rustc_hash::FxHashMap;

use crate::graph::{TypeGraph, TypeKind};
use crate::{ChanDir, FormatError, Kind};

/// Times a type may be re-entered on one rendering path.
pub const FORMAT_DEPTH_LIMIT: u32 = 5;

bitflags! {
    /// Rendering modes.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FormatOptions: u8 {
        /// Structural form: ignore the type's own name.
        const LONG = 1 << 0;
        /// Package-less names; no `method(..)` prefix on methods.
        const SHORT = 1 << 1;
        /// Canonical export form.
        const EXPORT = 1 << 2;
        /// Parameter and result types without their names.
        const NO_ARG_NAMES = 1 << 3;
        /// Function signatures without the `func` keyword.
        const NO_FUNC_KEYWORD = 1 << 4;
        /// `KIND <sym> ...` debug form.
        const DETAILED = 1 << 5;

        /// Modes that carry over to nested types.
        const INHERITED = Self::EXPORT.bits() | Self::NO_ARG_NAMES.bits() | Self::DETAILED.bits();
    }
}

/// Renders types of one graph.
pub struct TypeFormatter<'a> {
    graph: &'a TypeGraph,
    symbols: &'a SymbolTable,
    /// Source file name used to qualify local names in export form.
    filename: &'a str,
    active: FxHashMap<TypeId, u32>,
    error: Option<FormatError>,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(graph: &'a TypeGraph, symbols: &'a SymbolTable) -> Self {
        TypeFormatter {
            graph,
            symbols,
            filename: "",
            active: FxHashMap::default(),
            error: None,
        }
    }

    #[must_use]
    pub fn with_filename(mut self, filename: &'a str) -> Self {
        self.filename = filename;
        self
    }

    /// Render `t`; `None` renders as `<T>`.
    pub fn format(&mut self, t: Option<TypeId>, opts: FormatOptions) -> String {
        let mut out = String::new();
        self.write_type(&mut out, t, opts);
        out
    }

    /// Render `t`, failing if the rendering hit an undefined type in
    /// export form.
    pub fn try_format(mut self, t: TypeId, opts: FormatOptions) -> Result<String, FormatError> {
        let out = self.format(Some(t), opts);
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(out),
        }
    }

    /// First error recorded since the last call.
    pub fn take_error(&mut self) -> Option<FormatError> {
        self.error.take()
    }

    fn write_type(&mut self, out: &mut String, t: Option<TypeId>, opts: FormatOptions) {
        let Some(t) = t else {
            out.push_str("<T>");
            return;
        };
        let depth = self.active.entry(t).or_insert(0);
        *depth += 1;
        if *depth > FORMAT_DEPTH_LIMIT {
            out.push_str("...");
        } else if opts.contains(FormatOptions::DETAILED) {
            self.write_detailed(out, t, opts);
        } else {
            self.write_pretty(out, t, opts);
        }
        if let Some(depth) = self.active.get_mut(&t) {
            *depth -= 1;
            if *depth == 0 {
                self.active.remove(&t);
            }
        }
    }

    fn sym(&self, sym: Option<SymId>, opts: FormatOptions) -> String {
        self.symbols.format(
            sym,
            opts.contains(FormatOptions::SHORT),
            opts.contains(FormatOptions::LONG),
        )
    }

    fn write_name(&mut self, out: &mut String, t: TypeId, sym: SymId, opts: FormatOptions) {
        if t.is_predeclared() {
            out.push_str(self.symbols.name(sym));
            return;
        }
        if !opts.contains(FormatOptions::EXPORT) {
            out.push_str(&self.sym(Some(sym), FormatOptions::empty()));
            return;
        }

        let short = opts & FormatOptions::SHORT;
        let qualified = if short.is_empty() {
            FormatOptions::LONG
        } else {
            short
        };
        out.push_str(&self.sym(Some(sym), qualified));
        let record = self.symbols.get(sym);
        if record.package != self.symbols.current_package() || record.imported {
            return;
        }
        let vargen = self.graph.get(t).vargen;
        if vargen != 0 || !record.export {
            out.push('·');
            out.push_str(self.filename);
            if vargen != 0 {
                out.push('·');
                out.push_str(&vargen.to_string());
            }
        }
    }

    /// Comma-separated field entries of a funarg struct.
    fn write_fields(&mut self, out: &mut String, s: TypeId, opts: FormatOptions) {
        let fields = self.graph.members(s);
        for (i, &f) in fields.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let child = if opts.contains(FormatOptions::NO_ARG_NAMES)
                && self.graph.kind(f) == Kind::Field
            {
                self.graph.field_type(f)
            } else {
                f
            };
            self.write_type(out, Some(child), opts & FormatOptions::INHERITED);
        }
    }

    fn write_pretty(&mut self, out: &mut String, t: TypeId, opts: FormatOptions) {
        let graph = self.graph;
        let ty = graph.get(t);
        let inherit = opts & FormatOptions::INHERITED;

        if ty.kind.kind() == Kind::Forward
            && opts.contains(FormatOptions::EXPORT)
            && self.error.is_none()
        {
            self.error = Some(FormatError::UndefinedType { sym: ty.sym });
        }
        if ty.kind.kind() != Kind::Field && !opts.contains(FormatOptions::LONG) {
            if let Some(sym) = ty.sym {
                self.write_name(out, t, sym, opts);
                return;
            }
        }
        if let Some(name) = ty.kind.kind().basic_name() {
            out.push_str(name);
            return;
        }

        match &ty.kind {
            TypeKind::Basic(_) | TypeKind::Any { .. } => {}
            TypeKind::Ptr { elem } => {
                out.push('*');
                self.write_type(out, Some(*elem), inherit | (opts & FormatOptions::SHORT));
            }
            TypeKind::Chan { elem, dir } => {
                match dir {
                    ChanDir::Recv => out.push_str("<-chan "),
                    ChanDir::Send if graph.kind(*elem) == Kind::Chan => {
                        out.push_str("chan<- (");
                        self.write_type(out, Some(*elem), inherit);
                        out.push(')');
                        return;
                    }
                    ChanDir::Send => out.push_str("chan<- "),
                    ChanDir::Both => out.push_str("chan "),
                }
                self.write_type(out, Some(*elem), inherit);
            }
            TypeKind::Map { key, value } => {
                out.push_str("map[");
                self.write_type(out, Some(*key), inherit);
                out.push_str("] ");
                self.write_type(out, Some(*value), inherit);
            }
            TypeKind::Func {
                recv,
                results,
                params,
            } => {
                if !graph.members(*recv).is_empty() && !opts.contains(FormatOptions::SHORT) {
                    out.push_str("method(");
                    self.write_fields(out, *recv, opts & !FormatOptions::NO_ARG_NAMES);
                    out.push(')');
                }
                if !opts.contains(FormatOptions::NO_FUNC_KEYWORD) {
                    out.push_str("func");
                }
                out.push('(');
                self.write_fields(out, *params, opts);
                out.push(')');
                let out_fields = graph.members(*results);
                match out_fields {
                    [] => {}
                    [single]
                        if graph.sym(*single).is_none() && !graph.is_embedded(*single) =>
                    {
                        out.push(' ');
                        self.write_type(out, Some(graph.field_type(*single)), inherit);
                    }
                    _ => {
                        out.push_str(" (");
                        self.write_fields(out, *results, opts);
                        out.push(')');
                    }
                }
            }
            TypeKind::Array { elem, bound } => {
                match bound {
                    Some(n) => {
                        out.push('[');
                        out.push_str(&n.to_string());
                        out.push(']');
                    }
                    None => out.push_str("[]"),
                }
                self.write_type(out, Some(*elem), inherit);
            }
            TypeKind::Interface { methods } => {
                out.push_str("interface {");
                for (i, &m) in methods.iter().enumerate() {
                    if i > 0 {
                        out.push(';');
                    }
                    out.push(' ');
                    out.push_str(&self.sym(graph.sym(m), FormatOptions::SHORT));
                    out.push(' ');
                    let sig = graph.elem(m);
                    self.write_type(
                        out,
                        sig,
                        inherit | FormatOptions::SHORT | FormatOptions::NO_FUNC_KEYWORD,
                    );
                }
                out.push_str(" }");
            }
            TypeKind::Struct { fields } => {
                out.push_str("struct {");
                for (i, &f) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push(';');
                    }
                    out.push(' ');
                    self.write_type(out, Some(f), inherit);
                }
                out.push_str(" }");
            }
            TypeKind::Field { ty: field_ty, embedded, note } => {
                match ty.sym {
                    Some(sym) if !embedded => {
                        out.push_str(&self.sym(Some(sym), FormatOptions::SHORT));
                        out.push(' ');
                    }
                    _ => {
                        if opts.contains(FormatOptions::EXPORT) {
                            out.push_str("? ");
                        }
                    }
                }
                self.write_type(out, Some(*field_ty), inherit);
                if let Some(note) = note {
                    out.push_str(" \"");
                    out.push_str(&escape_str(note));
                    out.push('"');
                }
            }
            TypeKind::Forward { .. } => {
                match ty.sym {
                    Some(sym) => {
                        out.push_str("undefined ");
                        out.push_str(&self.sym(Some(sym), FormatOptions::empty()));
                    }
                    None => out.push_str("undefined"),
                }
            }
        }
    }

    fn write_detailed(&mut self, out: &mut String, t: TypeId, opts: FormatOptions) {
        let graph = self.graph;
        let ty = graph.get(t);
        let inherit = opts & FormatOptions::INHERITED;
        let long = inherit | (opts & FormatOptions::LONG);

        out.push_str(ty.kind.kind().name());
        out.push(' ');
        if let Some(sym) = ty.sym {
            out.push('<');
            out.push_str(&self.sym(Some(sym), FormatOptions::empty()));
            out.push('>');
        }

        match &ty.kind {
            TypeKind::Field { ty: field_ty, .. } => self.write_type(out, Some(*field_ty), inherit),
            TypeKind::Ptr { elem } => self.write_type(out, Some(*elem), inherit),
            TypeKind::Func {
                recv,
                results,
                params,
            } => {
                out.push_str(&format!(
                    "{}{}{}(",
                    graph.this_tuple(t),
                    graph.in_tuple(t),
                    graph.out_tuple(t)
                ));
                self.write_type(out, Some(*recv), long);
                out.push(',');
                self.write_type(out, Some(*params), long);
                out.push(')');
                self.write_type(out, Some(*results), long);
            }
            TypeKind::Struct { fields: members } | TypeKind::Interface { methods: members } => {
                out.push('{');
                if opts.contains(FormatOptions::LONG) {
                    for &m in members {
                        self.write_type(out, Some(m), long);
                        out.push(';');
                    }
                }
                out.push('}');
            }
            TypeKind::Map { key, value } => {
                out.push('[');
                self.write_type(out, Some(*key), inherit);
                out.push(']');
                self.write_type(out, Some(*value), inherit);
            }
            TypeKind::Array { elem, bound } => {
                match bound {
                    Some(n) => out.push_str(&format!("[{n}]")),
                    None => out.push_str("[]"),
                }
                self.write_type(out, Some(*elem), inherit);
            }
            TypeKind::Chan { elem, .. } => {
                out.push(' ');
                self.write_type(out, Some(*elem), inherit);
            }
            TypeKind::Basic(_) | TypeKind::Forward { .. } | TypeKind::Any { .. } => {}
        }
    }
}

impl TypeGraph {
    /// Default rendering of a type, as used in diagnostics.
    pub fn type_string(&self, symbols: &SymbolTable, t: TypeId) -> String {
        TypeFormatter::new(self, symbols).format(Some(t), FormatOptions::empty())
    }

    /// Render with explicit modes.
    pub fn format_with(&self, symbols: &SymbolTable, t: TypeId, opts: FormatOptions) -> String {
        TypeFormatter::new(self, symbols).format(Some(t), opts)
    }
}

#[cfg(test)]
mod tests;
