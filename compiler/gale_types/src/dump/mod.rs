//! Debug rendering of AST nodes.
//!
//! [`TypeCtx::node_string`] gives the one-line form of a node,
//! [`TypeCtx::dump`] an indented tree. Both only read the context.

use std::fmt::Write;

use gale_ir::{escape_str, Node, NodeId, Op, Val};

use crate::ctx::TypeCtx;
use crate::format::FormatOptions;

/// Tree depth past which a dump prints `...`.
pub const DUMP_DEPTH_LIMIT: usize = 10;

const INDENT: &str = ".   ";

impl TypeCtx {
    /// The non-zero bookkeeping fields of a node: ` u(..) a(..) l(..)` etc.
    fn node_flags(node: &Node) -> String {
        let mut out = String::new();
        if node.ullman != 0 {
            let _ = write!(out, " u({})", node.ullman);
        }
        if node.addable != 0 {
            let _ = write!(out, " a({})", node.addable);
        }
        if node.vargen != 0 {
            let _ = write!(out, " g({})", node.vargen);
        }
        if node.line != 0 {
            let _ = write!(out, " l({})", node.line);
        }
        if let Some(x) = node.xoffset.filter(|&x| x != 0) {
            let _ = write!(out, " x({x})");
        }
        if node.class.code() != 0 {
            let _ = write!(out, " class({})", node.class.code());
        }
        if node.colas {
            out.push_str(" colas(1)");
        }
        if node.funcdepth != 0 {
            let _ = write!(out, " f({})", node.funcdepth);
        }
        out
    }

    /// One-line form of a node.
    pub fn node_string(&self, n: Option<NodeId>) -> String {
        let Some(n) = n else {
            return "<N>".to_owned();
        };
        let node = self.nodes.get(n);
        let op = node.op;
        let flags = Self::node_flags(node);
        let mut out = String::new();

        let named = matches!(op, Op::Name | Op::NoName) && node.sym.is_some();
        match (op, node.sym) {
            (Op::Name | Op::NoName, Some(sym)) => {
                let vargen = self.symbols.get(sym).vargen;
                let _ = write!(out, "{op}-{} G{vargen}{flags}", self.sym_string(sym));
            }
            (Op::Register, _) => {
                let reg = match node.val {
                    Val::Reg(r) => r,
                    _ => 0,
                };
                let _ = write!(out, "{op}-R{reg}{flags}");
            }
            (Op::Literal, _) => {
                let value = match node.val {
                    Val::Int(v) => format!("I{v}"),
                    Val::Float(v) => format!("F{v}"),
                    Val::Str(b) => format!("S\"{}\"", escape_str(self.nodes.str_val(b))),
                    Val::Bool(b) => format!("B{}", u8::from(b)),
                    Val::Nil => "N".to_owned(),
                    Val::None | Val::Reg(_) => "ctype=0".to_owned(),
                };
                let _ = write!(out, "{op}-{value}{flags}");
            }
            (Op::AsOp, _) => {
                let asop = node.asop.unwrap_or_default();
                let _ = write!(out, "{op}-{asop}{flags}");
            }
            (Op::Type, _) => {
                let _ = write!(out, "{op} {}", self.formatter().format(node.ty, FormatOptions::empty()));
            }
            _ => {
                let _ = write!(out, "{op}{flags}");
            }
        }
        if !named {
            if let Some(sym) = node.sym {
                let vargen = self.symbols.get(sym).vargen;
                let _ = write!(out, " {} G{vargen}", self.sym_string(sym));
            }
        }
        if let Some(ty) = node.ty.filter(|_| op != Op::Type) {
            out.push(' ');
            out.push_str(&self.type_string(ty));
        }
        out
    }

    /// Indented tree dump of `n` under a title line.
    pub fn dump(&self, title: &str, n: Option<NodeId>) -> String {
        let mut out = String::new();
        match n {
            Some(id) => {
                let _ = writeln!(out, "{title} [{id:?}]");
            }
            None => {
                let _ = writeln!(out, "{title} [<N>]");
            }
        }
        self.dump_node(&mut out, n, 1);
        out
    }

    /// Indented dump of a statement list under a title line.
    pub fn dump_list(&self, title: &str, list: &[NodeId]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{title}");
        self.dump_nodes(&mut out, list, 1);
        out
    }

    fn dump_nodes(&self, out: &mut String, list: &[NodeId], dep: usize) {
        for &n in list {
            self.dump_node(out, Some(n), dep);
        }
    }

    fn dump_node(&self, out: &mut String, n: Option<NodeId>, dep: usize) {
        let Some(id) = n else {
            return;
        };
        let indent = INDENT.repeat(dep);
        out.push_str(&indent);
        if dep > DUMP_DEPTH_LIMIT {
            out.push_str("...\n");
            return;
        }

        let node = self.nodes.get(id);
        let op = node.op;
        if !node.ninit.is_empty() {
            let _ = writeln!(out, "{op}-init");
            self.dump_nodes(out, &node.ninit, dep + 1);
            out.push_str(&indent);
        }

        let flags = Self::node_flags(node);
        let section = |out: &mut String, name: &str| {
            let _ = writeln!(out, "{indent}{op}-{name}");
        };
        match op {
            Op::Type => {
                let _ = writeln!(out, "{op} {}", self.formatter().format(node.ty, FormatOptions::empty()));
            }
            Op::If => {
                let _ = writeln!(out, "{op}{flags}");
                self.dump_node(out, node.ntest, dep + 1);
                if !node.nbody.is_empty() {
                    section(out, "then");
                    self.dump_nodes(out, &node.nbody, dep + 1);
                }
                if !node.nelse.is_empty() {
                    section(out, "else");
                    self.dump_nodes(out, &node.nelse, dep + 1);
                }
            }
            Op::Select => {
                let _ = writeln!(out, "{op}{flags}");
                self.dump_nodes(out, &node.nbody, dep + 1);
            }
            Op::Switch | Op::For => {
                let _ = writeln!(out, "{op}{flags}");
                self.dump_node(out, node.ntest, dep + 1);
                if !node.nbody.is_empty() {
                    section(out, "body");
                    self.dump_nodes(out, &node.nbody, dep + 1);
                }
                if node.nincr.is_some() {
                    section(out, "incr");
                    self.dump_node(out, node.nincr, dep + 1);
                }
            }
            Op::Case => {
                let label = node
                    .right
                    .map(|r| self.nodes.get(r))
                    .filter(|r| r.op == Op::Goto)
                    .and_then(|r| r.left)
                    .filter(|&l| self.nodes.get(l).op == Op::Name);
                match label {
                    Some(l) => {
                        let _ = writeln!(out, "{op}{flags} GOTO {}", self.node_string(Some(l)));
                    }
                    None => {
                        let _ = writeln!(out, "{op}{flags}");
                    }
                }
                self.dump_node(out, node.left, dep + 1);
            }
            _ => {
                let _ = writeln!(out, "{}", self.node_string(Some(id)));
                self.dump_node(out, node.left, dep + 1);
                self.dump_node(out, node.right, dep + 1);
            }
        }

        if node.ntype.is_some() {
            section(out, "ntype");
            self.dump_node(out, node.ntype, dep + 1);
        }
        if node.defn.is_some() {
            section(out, "defn");
            self.dump_node(out, node.defn, dep + 1);
        }
        if !node.list.is_empty() {
            section(out, "list");
            self.dump_nodes(out, &node.list, dep + 1);
        }
        if !node.rlist.is_empty() {
            section(out, "rlist");
            self.dump_nodes(out, &node.rlist, dep + 1);
        }
    }
}
