//! Wrappers that make promoted methods callable on the outer type.
//!
//! For a method `M` reached through embedded fields of `T`, the trampoline
//! is a function with receiver `.this T` and the parameters and results of
//! `M`, whose body is the single call `.this.f1...fk.M(params)`, returned
//! when `M` has results.

use gale_diagnostic::FatalError;
use gale_ir::{NodeId, Op, StorageClass, SymId, TypeId};

use crate::ctx::TypeCtx;
use crate::format::FormatOptions;

impl TypeCtx {
    /// Default wrapper name: `Outer·Method`.
    pub fn trampoline_name(&mut self, outer: TypeId, method_field: TypeId) -> SymId {
        let receiver = self
            .formatter()
            .format(Some(outer), FormatOptions::EXPORT | FormatOptions::SHORT);
        let method = self.symbols.format(self.types.sym(method_field), true, false);
        self.symbols.lookup(&format!("{receiver}·{method}"))
    }

    /// Declaration node of one wrapper argument.
    fn trampoline_arg(&mut self, sym: Option<SymId>, ty: TypeId, class: StorageClass) -> (NodeId, TypeId) {
        let name = sym.map(|sym| {
            let n = self.nodes.name(sym);
            let node = self.nodes.get_mut(n);
            node.ty = Some(ty);
            node.class = class;
            n
        });
        let dcl = self.nodes.new_node(Op::DclField, name, None);
        self.nodes.get_mut(dcl).ty = Some(ty);
        (dcl, self.types.field(sym, ty))
    }

    /// Generate the wrapper `name` that calls promoted method `method_field`
    /// on a receiver of type `outer`, and add it to [`Self::funcs`].
    ///
    /// Unnamed parameters get `.anonN` names so they can be forwarded;
    /// unnamed results stay unnamed. Order and count of both are kept.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn generate_trampoline(
        &mut self,
        outer: TypeId,
        method_field: TypeId,
        name: SymId,
    ) -> Result<NodeId, FatalError> {
        let Some(method_sym) = self.types.sym(method_field) else {
            gale_diagnostic::ice(format_args!("generate_trampoline: unnamed method {method_field:?}"));
        };
        let method = self.types.field_type(method_field);

        let this_sym = self.symbols.lookup(".this");
        let (this_dcl, this_field) = self.trampoline_arg(Some(this_sym), outer, StorageClass::Param);

        let params: Vec<(Option<SymId>, TypeId)> = self
            .types
            .struct_fields(self.types.in_struct(method))
            .map(|f| (self.types.sym(f), self.types.field_type(f)))
            .collect();
        let mut param_dcls = Vec::with_capacity(params.len());
        let mut param_fields = Vec::with_capacity(params.len());
        let mut args = Vec::with_capacity(params.len());
        let mut anon = 0;
        for (sym, ty) in params {
            let sym = match sym {
                Some(sym) => sym,
                None => {
                    let sym = self.symbols.lookup(&format!(".anon{anon}"));
                    anon += 1;
                    sym
                }
            };
            let (dcl, field) = self.trampoline_arg(Some(sym), ty, StorageClass::Param);
            args.extend(self.nodes.get(dcl).left);
            param_dcls.push(dcl);
            param_fields.push(field);
        }

        let results: Vec<(Option<SymId>, TypeId)> = self
            .types
            .struct_fields(self.types.out_struct(method))
            .map(|f| (self.types.sym(f), self.types.field_type(f)))
            .collect();
        let mut result_dcls = Vec::with_capacity(results.len());
        let mut result_fields = Vec::with_capacity(results.len());
        for (sym, ty) in results {
            let (dcl, field) = self.trampoline_arg(sym, ty, StorageClass::ParamOut);
            result_dcls.push(dcl);
            result_fields.push(field);
        }
        let has_results = !result_dcls.is_empty();

        let fn_type = self.types.func_of(Some(this_field), param_fields, result_fields);
        let fn_name = self.nodes.name(name);
        let fn_name_node = self.nodes.get_mut(fn_name);
        fn_name_node.ty = Some(fn_type);
        fn_name_node.class = StorageClass::Func;

        let this_ref = self.nodes.name(this_sym);
        self.nodes.get_mut(this_ref).ty = Some(outer);
        let selector = self.nodes.name(method_sym);
        let dot = self.nodes.new_node(Op::Dot, Some(this_ref), Some(selector));
        let callee = self.resolve_selector(dot)?;
        let call = self.nodes.new_node(Op::Call, Some(callee), None);
        self.nodes.get_mut(call).list = args;
        self.nodes.ullman_calc(call);
        let body = if has_results {
            self.nodes.new_node(Op::Return, Some(call), None)
        } else {
            call
        };

        let decl = self.nodes.new_node(Op::DclFunc, Some(this_dcl), None);
        let node = self.nodes.get_mut(decl);
        node.nname = Some(fn_name);
        node.ty = Some(fn_type);
        node.list = param_dcls;
        node.rlist = result_dcls;
        node.nbody = vec![body];
        self.funcs.push(decl);

        if self.options.trace_trampolines {
            let title = format!("trampoline {}", self.sym_string(name));
            tracing::debug!(dump = %self.dump(&title, Some(decl)), "generated");
            tracing::debug!(body = %self.dump_list("body", &[body]), "generated");
        }
        Ok(decl)
    }
}
