//! Rewriting selectors through promoted members.

use gale_diagnostic::FatalError;
use gale_ir::{NodeId, Op};

use crate::ctx::TypeCtx;
use crate::TypeError;

impl TypeCtx {
    /// Make the embedded fields of a selector explicit.
    ///
    /// `n` is `DOT(x, s)`. When `s` is found through embedded fields
    /// `f1 ... fk` (outermost first), the result is
    /// `DOT(DOT(...DOT(x, f1)..., fk), s)` with the intermediate selections
    /// typed. A tie at the shallowest depth is reported as ambiguous and
    /// the first path is used. Anything else is returned unchanged.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resolve_selector(&mut self, n: NodeId) -> Result<NodeId, FatalError> {
        let node = self.nodes.get(n);
        let (Some(left), Some(right)) = (node.left, node.right) else {
            return Ok(n);
        };
        let Some(t) = self.nodes.get(left).ty else {
            return Ok(n);
        };
        let rnode = self.nodes.get(right);
        let Some(s) = rnode.sym.filter(|_| rnode.op == Op::Name) else {
            return Ok(n);
        };
        let Some(dot) = self.types.dot_search(s, t) else {
            return Ok(n);
        };

        if dot.is_ambiguous() {
            let line = self.nodes.get(n).line;
            self.report_type_error(&TypeError::AmbiguousSelector { ty: t, sym: s }, line)?;
        }

        let mut n = n;
        for &field in &dot.path {
            let Some(fsym) = self.types.sym(field) else {
                continue;
            };
            let outer = self.nodes.new_node(Op::Dot, Some(n), Some(right));
            let name = self.nodes.name(fsym);
            let inner = self.nodes.get_mut(n);
            inner.right = Some(name);
            inner.ty = Some(self.types.field_type(field));
            n = outer;
        }
        Ok(n)
    }
}
