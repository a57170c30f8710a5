//! Sethi-Ullman numbers: an estimate of the registers a subtree needs.
//!
//! The code generator evaluates the operand with the larger number first.

use super::{Op, StorageClass};
use crate::{NodeArena, NodeId};

/// "Infinite" complexity of a call; calls clobber every register.
pub const UINF: u32 = 100;

impl NodeArena {
    /// Compute and store the Sethi-Ullman number of `n`.
    ///
    /// Children must already have their numbers.
    pub fn ullman_calc(&mut self, n: NodeId) -> u32 {
        let node = self.get(n);
        let ul = match node.op {
            Op::Register | Op::Literal | Op::Name => {
                if node.class == StorageClass::ParamRef || node.heap {
                    2
                } else {
                    1
                }
            }
            op if op.is_call() => UINF,
            _ => {
                let ul = node.left.map_or(1, |l| self.get(l).ullman);
                let ur = node.right.map_or(1, |r| self.get(r).ullman);
                if ul == ur {
                    ul + 1
                } else {
                    ul.max(ur)
                }
            }
        };
        self.get_mut(n).ullman = ul;
        ul
    }
}
