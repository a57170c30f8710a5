//! Builtin declarations of the `sys` package.

use gale_ir::{NodeId, Op, TypeId};

use super::TypeCtx;
use crate::graph::SYS_PACKAGE;

impl TypeCtx {
    /// Declare builtin `name` with signature `ty` in the `sys` package.
    pub fn declare_builtin(&mut self, name: &str, ty: TypeId) -> NodeId {
        let sym = self.symbols.lookup_in(name, SYS_PACKAGE);
        let n = self.nodes.name(sym);
        self.nodes.get_mut(n).ty = Some(ty);
        self.symbols.get_mut(sym).def = Some(n);
        n
    }

    /// Find the declaration of builtin `name`.
    ///
    /// With `copy`, a fresh name node is returned whose signature is a deep
    /// copy, ready for [`Self::argtype`]. A missing builtin is an internal
    /// error.
    pub fn syslook(&mut self, name: &str, copy: bool) -> NodeId {
        let sym = self.symbols.lookup_in(name, SYS_PACKAGE);
        let Some(def) = self.symbols.get(sym).def else {
            gale_diagnostic::ice(format_args!("can't find {SYS_PACKAGE}.{name}"));
        };
        if !copy {
            return def;
        }
        let mut node = self.nodes.get(def).clone();
        node.ty = node.ty.map(|ty| self.types.deep_copy(ty));
        self.nodes.alloc(node)
    }

    /// Plug `t` into the first placeholder of a copied builtin's signature.
    pub fn argtype(&mut self, n: NodeId, t: TypeId) {
        let node = self.nodes.get(n);
        let substituted = match (node.op, node.ty) {
            (Op::Name, Some(ty)) => self.types.substitute_any(ty, t),
            _ => None,
        };
        match substituted {
            Some(root) => self.nodes.get_mut(n).ty = Some(root),
            None => gale_diagnostic::ice(format_args!(
                "argtype: failed {:?} {}",
                self.nodes.get(n).op,
                self.type_string(t)
            )),
        }
    }
}
