//! AST nodes and the node factory.
//!
//! Nodes live in a [`NodeArena`] and refer to each other by [`NodeId`].
//! Lists (statement bodies, argument lists) are plain `Vec<NodeId>`.
//!
//! The factory stamps every node with a line number from the
//! [`LineTracker`], which the parser keeps up to date. When the parser holds
//! a lookahead token, the current line may already be past the token that
//! started the node, so the previous line is used instead.

mod copy;
mod op;
mod ullman;

pub use op::Op;
pub use ullman::UINF;

use std::fmt::Write;

use crate::{Block, BumpArena, NodeId, SymId, TypeId};

/// Storage class of a named node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StorageClass {
    #[default]
    None,
    Extern,
    Auto,
    Param,
    ParamOut,
    /// Captured parameter reached through a reference.
    ParamRef,
    Func,
}

impl StorageClass {
    /// Numeric code shown in node dumps.
    pub const fn code(self) -> u8 {
        match self {
            StorageClass::None => 0,
            StorageClass::Extern => 1,
            StorageClass::Auto => 2,
            StorageClass::Param => 3,
            StorageClass::ParamOut => 4,
            StorageClass::ParamRef => 5,
            StorageClass::Func => 6,
        }
    }
}

/// Constant value of a literal node.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Val {
    #[default]
    None,
    Int(i64),
    Float(f64),
    /// String literal bytes in the node arena.
    Str(Block),
    Bool(bool),
    Nil,
    /// Machine register of a `REGISTER` pseudo-node.
    Reg(u16),
}

/// An AST node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    pub op: Op,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub list: Vec<NodeId>,
    pub rlist: Vec<NodeId>,
    pub ninit: Vec<NodeId>,
    pub nbody: Vec<NodeId>,
    pub nelse: Vec<NodeId>,
    pub ntest: Option<NodeId>,
    pub nincr: Option<NodeId>,
    pub ntype: Option<NodeId>,
    /// Name node of a declaration.
    pub nname: Option<NodeId>,
    /// Defining statement of a name.
    pub defn: Option<NodeId>,
    pub ty: Option<TypeId>,
    pub sym: Option<SymId>,
    pub val: Val,
    pub line: u32,
    /// Sethi-Ullman number; 0 until computed.
    pub ullman: u32,
    pub addable: u8,
    pub class: StorageClass,
    /// Variable was moved to the heap.
    pub heap: bool,
    /// Literal stands for the current `iota`.
    pub iota: bool,
    /// Operator of an `ASOP` assignment.
    pub asop: Option<Op>,
    pub vargen: u32,
    /// Field offset; `None` until laid out.
    pub xoffset: Option<i64>,
    pub colas: bool,
    pub funcdepth: u32,
}

/// Current source position as reported by the parser.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LineTracker {
    /// Line of the token the lexer is on.
    pub line: u32,
    /// Line of the previous token.
    pub prev_line: u32,
    /// Whether the parser holds a lookahead token.
    pub lookahead: bool,
}

impl LineTracker {
    /// Line a node created now should carry.
    #[inline]
    pub fn node_line(&self) -> u32 {
        if self.lookahead {
            self.prev_line
        } else {
            self.line
        }
    }
}

/// Arena of AST nodes.
pub struct NodeArena {
    nodes: Vec<Node>,
    strings: BumpArena,
    pub lines: LineTracker,
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::with_arena(BumpArena::new())
    }

    /// Create an empty arena storing literal bytes in `strings`.
    pub fn with_arena(strings: BumpArena) -> Self {
        NodeArena {
            nodes: Vec::new(),
            strings,
            lines: LineTracker::default(),
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Store a node.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(crate::to_u32(self.nodes.len(), "node count"));
        self.nodes.push(node);
        id
    }

    /// The node behind a handle.
    pub fn get(&self, id: NodeId) -> &Node {
        match self.nodes.get(id.index()) {
            Some(n) => n,
            None => gale_diagnostic::ice(format_args!("dangling node {id:?}")),
        }
    }

    /// The node behind a handle, mutably.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        match self.nodes.get_mut(id.index()) {
            Some(n) => n,
            None => gale_diagnostic::ice(format_args!("dangling node {id:?}")),
        }
    }

    /// Create a node stamped with the current line.
    pub fn new_node(&mut self, op: Op, left: Option<NodeId>, right: Option<NodeId>) -> NodeId {
        self.alloc(Node {
            op,
            left,
            right,
            line: self.lines.node_line(),
            ..Node::default()
        })
    }

    /// Integer constant of untyped (ideal) type.
    pub fn int_const(&mut self, v: i64) -> NodeId {
        let id = self.new_node(Op::Literal, None, None);
        let n = self.get_mut(id);
        n.addable = 1;
        n.val = Val::Int(v);
        n.ty = Some(TypeId::IDEAL);
        self.ullman_calc(id);
        id
    }

    /// The `nil` literal.
    pub fn nil(&mut self) -> NodeId {
        let id = self.int_const(0);
        let n = self.get_mut(id);
        n.val = Val::Nil;
        n.ty = Some(TypeId::NIL);
        id
    }

    /// A boolean literal.
    pub fn bool_const(&mut self, b: bool) -> NodeId {
        let id = self.int_const(0);
        let n = self.get_mut(id);
        n.val = Val::Bool(b);
        n.ty = Some(TypeId::BOOL);
        id
    }

    /// A string literal.
    pub fn str_const(&mut self, s: &str) -> NodeId {
        let block = self.strings.alloc_str(s);
        let id = self.int_const(0);
        let n = self.get_mut(id);
        n.val = Val::Str(block);
        n.ty = Some(TypeId::STRING);
        id
    }

    /// Text of a string literal value.
    pub fn str_val(&self, block: Block) -> &str {
        self.strings.str(block)
    }

    /// A name reference.
    pub fn name(&mut self, sym: SymId) -> NodeId {
        let id = self.new_node(Op::Name, None, None);
        let n = self.get_mut(id);
        n.sym = Some(sym);
        n.addable = 1;
        n.ullman = 1;
        id
    }

    /// A block statement; it takes the line of its first statement.
    pub fn block(&mut self, list: Vec<NodeId>) -> NodeId {
        let id = self.new_node(Op::Block, None, None);
        if let Some(&first) = list.first() {
            let line = self.get(first).line;
            self.get_mut(id).line = line;
        }
        self.get_mut(id).list = list;
        id
    }

    /// A one-element statement list; a bare block contributes its contents.
    pub fn list1(&self, n: NodeId) -> Vec<NodeId> {
        let node = self.get(n);
        if node.op == Op::Block && node.ninit.is_empty() {
            return node.list.clone();
        }
        vec![n]
    }

    /// Move the current line to `n`'s line, returning the old line.
    ///
    /// Names, types, packages and literals keep the current line, and so
    /// does a node that has no line.
    pub fn set_line_from(&mut self, n: Option<NodeId>) -> u32 {
        let saved = self.lines.line;
        if let Some(n) = n {
            let node = self.get(n);
            if !node.op.keeps_line() {
                if node.line == 0 {
                    tracing::trace!(node = ?n, "set_line_from: line 0");
                } else {
                    self.lines.line = node.line;
                }
            }
        }
        saved
    }
}

/// Append `b` to `a`.
pub fn concat(mut a: Vec<NodeId>, b: Vec<NodeId>) -> Vec<NodeId> {
    a.extend(b);
    a
}

/// Number of nodes in a list.
#[inline]
pub fn count(list: &[NodeId]) -> usize {
    list.len()
}

/// Escape a string literal for diagnostics and dumps.
pub fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\0' => out.push_str("\\x00"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '"' | '\\' => {
                let _ = write!(out, "\\{c}");
            }
            c => out.push(c),
        }
    }
    out
}
