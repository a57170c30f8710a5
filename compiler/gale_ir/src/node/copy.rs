//! Structural tree copy.

use super::Op;
use crate::{ensure_sufficient_stack, NodeArena, NodeId};

impl NodeArena {
    /// Copy an expression tree.
    ///
    /// Names, types and literals are shared, not copied, because later
    /// phases compare them by identity. A literal marked as `iota` becomes a
    /// fresh integer constant holding `iota`.
    pub fn tree_copy(&mut self, n: Option<NodeId>, iota: i64) -> Option<NodeId> {
        let n = n?;
        let node = self.get(n);
        match node.op {
            Op::Literal if node.iota => Some(self.int_const(iota)),
            Op::Literal | Op::NoName | Op::Name | Op::Type => Some(n),
            _ => {
                if node.defn.is_some() {
                    gale_diagnostic::ice(format_args!(
                        "tree_copy of {} node {n:?} with a definition",
                        node.op
                    ));
                }
                let mut copy = node.clone();
                let (left, right, list) = (node.left, node.right, node.list.clone());
                ensure_sufficient_stack(|| {
                    copy.left = self.tree_copy(left, iota);
                    copy.right = self.tree_copy(right, iota);
                    copy.list = self.list_tree_copy(&list, iota);
                });
                Some(self.alloc(copy))
            }
        }
    }

    /// Copy every tree in a list.
    pub fn list_tree_copy(&mut self, list: &[NodeId], iota: i64) -> Vec<NodeId> {
        list.iter()
            .filter_map(|&n| self.tree_copy(Some(n), iota))
            .collect()
    }
}
