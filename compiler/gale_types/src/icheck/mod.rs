//! Deferred interface satisfaction checks.
//!
//! Whether a type implements an interface cannot always be decided where
//! the conversion appears: either side may still be a forward declaration.
//! Conversion sites are logged instead, and [`TypeCtx::run_all_checks`]
//! validates the whole log once the unit is complete.
//!
//! Methods are matched by name, then by structural hash, and a hash match
//! is confirmed with full equality of the call-visible signature.

use gale_diagnostic::{Diagnostic, ErrorCode, FatalError};
use gale_ir::{SymbolTable, TypeId};

use crate::ctx::TypeCtx;
use crate::format::FormatOptions;
use crate::graph::TypeGraph;
use crate::promote::MethodLookup;

/// One logged conversion site.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Conversion {
    pub dst: TypeId,
    pub src: TypeId,
    pub line: u32,
    /// The program spelled the conversion out (type assertion).
    pub explicit: bool,
}

/// Append-only log of conversions, in recording order.
#[derive(Clone, Debug, Default)]
pub struct DeferredChecks {
    log: Vec<Conversion>,
}

impl DeferredChecks {
    /// Log a conversion of `src` to `dst` at `line`. Nothing is checked here.
    pub fn record(&mut self, dst: TypeId, src: TypeId, line: u32, explicit: bool) {
        self.log.push(Conversion {
            dst,
            src,
            line,
            explicit,
        });
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Conversion> {
        self.log.iter()
    }
}

/// Why a type does not satisfy an interface.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Unsatisfied {
    /// Interface method `method` has no match.
    Missing { method: TypeId },
    /// Looking up `method` on `ty` found several paths of the same depth.
    Ambiguous { ty: TypeId, method: TypeId },
}

impl Unsatisfied {
    /// The interface method that could not be matched.
    pub fn method(self) -> TypeId {
        match self {
            Unsatisfied::Missing { method } | Unsatisfied::Ambiguous { method, .. } => method,
        }
    }
}

impl TypeGraph {
    /// Same name, same hash and same signature.
    fn methods_match(&self, symbols: &SymbolTable, m1: TypeId, m2: TypeId) -> bool {
        self.sym(m1) == self.sym(m2) && self.method_types_match(symbols, m1, m2)
    }

    fn method_types_match(&self, symbols: &SymbolTable, m1: TypeId, m2: TypeId) -> bool {
        if self.type_hash(symbols, m1, false) != self.type_hash(symbols, m2, false) {
            return false;
        }
        let (f1, f2) = (self.field_type(m1), self.field_type(m2));
        self.kind(f1) == crate::Kind::Func
            && self.kind(f2) == crate::Kind::Func
            && self.same_call_signature(f1, f2)
    }

    /// Whether non-interface type `t0` implements `iface`.
    ///
    /// A method declared on a pointer receiver is not in the method set of
    /// the value type, unless a pointer is followed on the way to it.
    pub fn iface_ok_t2i(
        &self,
        symbols: &SymbolTable,
        t0: TypeId,
        iface: TypeId,
    ) -> Result<(), Unsatisfied> {
        let base = self.method_base_type(t0);
        for &im in self.members(iface) {
            let missing = Unsatisfied::Missing { method: im };
            let Some(t) = base else {
                return Err(missing);
            };
            let Some(s) = self.sym(im) else {
                return Err(missing);
            };
            let (member, followptr) = match self.lookup_method(s, t) {
                MethodLookup::NotFound => return Err(missing),
                MethodLookup::Ambiguous => return Err(Unsatisfied::Ambiguous { ty: t, method: im }),
                MethodLookup::Found { member, followptr } => (member, followptr),
            };
            if !member.is_method || !self.method_types_match(symbols, member.field, im) {
                return Err(missing);
            }

            let func = self.field_type(member.field);
            let ptr_recv = self.receiver_type(func).is_some_and(|r| self.is_ptr(r));
            if ptr_recv && !self.is_ptr(t0) && !followptr && !self.is_iface_method(func) {
                tracing::debug!(?t0, method = ?s, "pointer method on value");
                return Err(missing);
            }
        }
        Ok(())
    }

    /// Whether interface `i1` has every method of interface `i2`.
    pub fn iface_ok_i2i(
        &self,
        symbols: &SymbolTable,
        i1: TypeId,
        i2: TypeId,
    ) -> Result<(), Unsatisfied> {
        for &m2 in self.members(i2) {
            let found = self
                .members(i1)
                .iter()
                .any(|&m1| self.methods_match(symbols, m1, m2));
            if !found {
                return Err(Unsatisfied::Missing { method: m2 });
            }
        }
        Ok(())
    }
}

impl TypeCtx {
    /// Log a conversion for the end-of-unit check.
    pub fn record_conversion(&mut self, dst: TypeId, src: TypeId, line: u32, explicit: bool) {
        self.checks.record(dst, src, line, explicit);
    }

    /// Validate every logged conversion, in recording order.
    ///
    /// Interface to interface needs an explicit assertion when the source
    /// lacks a method. Concrete to interface is a hard error when a method
    /// is missing. Interface to concrete needs both. The log is left in
    /// place, so a second run reports the same diagnostics again.
    #[tracing::instrument(level = "debug", skip_all, fields(count = self.checks.len()))]
    pub fn run_all_checks(&mut self) -> Result<(), FatalError> {
        let log: Vec<Conversion> = self.checks.iter().copied().collect();
        for conv in log {
            self.check_conversion(conv)?;
        }
        Ok(())
    }

    fn check_conversion(&mut self, conv: Conversion) -> Result<(), FatalError> {
        let Conversion {
            dst,
            src,
            line,
            explicit,
        } = conv;
        let types = &self.types;
        let both = types.is_interface(dst) && types.is_interface(src);
        let (t, iface, verdict) = if both {
            (src, dst, types.iface_ok_i2i(&self.symbols, src, dst))
        } else if types.is_interface(dst) {
            (src, dst, types.iface_ok_t2i(&self.symbols, src, dst))
        } else {
            (dst, src, types.iface_ok_t2i(&self.symbols, dst, src))
        };
        let wrong = !both && verdict.is_err();
        let needexplicit = if both {
            verdict.is_err()
        } else {
            !types.is_interface(dst)
        };

        if let Err(Unsatisfied::Ambiguous { ty, method }) = verdict {
            let message = format!("{}.{} is ambiguous", self.type_string(ty), self.method_name(method));
            self.report(
                Diagnostic::error(ErrorCode::E2002)
                    .with_message(message)
                    .at_line(line),
            )?;
        }

        let missing = verdict.err().map(|u| self.missing_note(u.method()));
        if wrong {
            let mut diag = Diagnostic::error(ErrorCode::E2003)
                .with_message(format!(
                    "{} is not {}",
                    self.type_string(t),
                    self.type_string(iface)
                ))
                .at_line(line);
            if let Some(note) = missing {
                diag = diag.with_note(note);
            }
            return self.report(diag);
        }
        if !explicit && needexplicit {
            let mut diag = Diagnostic::error(ErrorCode::E2004)
                .with_message(format!(
                    "need type assertion to use {} as {}",
                    self.type_string(src),
                    self.type_string(dst)
                ))
                .at_line(line);
            if let Some(note) = missing {
                diag = diag.with_note(note);
            }
            return self.report_soft(diag);
        }
        Ok(())
    }

    fn method_name(&self, method: TypeId) -> String {
        self.symbols.format(self.types.sym(method), false, false)
    }

    /// `missing M(int) string`
    fn missing_note(&self, method: TypeId) -> String {
        let sig = self.formatter().format(
            self.types.elem(method),
            FormatOptions::SHORT | FormatOptions::NO_FUNC_KEYWORD,
        );
        format!("missing {}{sig}", self.method_name(method))
    }
}
