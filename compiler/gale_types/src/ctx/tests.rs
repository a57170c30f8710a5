use gale_diagnostic::{DiagnosticConfig, ErrorCode, FatalError};
use gale_ir::{ArenaConfig, Op, TypeId};
use pretty_assertions::assert_eq;

use super::{CtxOptions, TypeCtx};
use crate::Kind;

fn codes_and_lines(ctx: &TypeCtx) -> Vec<(ErrorCode, u32)> {
    ctx.diagnostics.peek().map(|d| (d.code, d.line)).collect()
}

#[test]
fn invalid_map_key_is_reported_and_map_still_built() {
    let mut ctx = TypeCtx::new("main");
    ctx.nodes.lines.line = 7;
    let key = ctx.types.slice_of(TypeId::INT);
    let m = ctx.map_of(key, TypeId::BOOL);

    assert!(matches!(m, Ok(t) if ctx.types.kind(t) == Kind::Map));
    let diags: Vec<_> = ctx.diagnostics.peek().cloned().collect();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, ErrorCode::E2001);
    assert_eq!(diags[0].line, 7);
    assert_eq!(diags[0].message, "invalid map key type []int");
}

#[test]
fn forward_key_is_checked_at_its_first_use() {
    let mut ctx = TypeCtx::new("main");
    let later = ctx.symbols.lookup("Later");
    let fwd = ctx.types.forward(later);

    ctx.nodes.lines.line = 4;
    assert!(ctx.map_of(fwd, TypeId::INT).is_ok());
    ctx.nodes.lines.line = 6;
    assert!(ctx.map_of(fwd, TypeId::STRING).is_ok());
    assert!(ctx.diagnostics.is_empty());

    ctx.nodes.lines.line = 20;
    let def = ctx.types.struct_of(vec![]);
    assert_eq!(ctx.resolve_forward(fwd, def), Ok(()));
    assert_eq!(codes_and_lines(&ctx), vec![(ErrorCode::E2001, 4)]);
}

#[test]
fn forward_resolved_to_comparable_type_is_fine() {
    let mut ctx = TypeCtx::new("main");
    let id = ctx.symbols.lookup("Id");
    let fwd = ctx.types.forward(id);
    assert!(ctx.map_of(fwd, TypeId::INT).is_ok());
    assert_eq!(ctx.resolve_forward(fwd, TypeId::INT32), Ok(()));
    assert!(ctx.diagnostics.is_empty());
}

#[test]
fn bad_array_bounds_fall_back_to_slices() {
    let mut ctx = TypeCtx::new("main");
    ctx.nodes.lines.line = 3;
    let negative = ctx.nodes.int_const(-1);
    let t = ctx.array_of(TypeId::INT, Some(negative));
    assert!(matches!(t, Ok(t) if ctx.types.is_slice(t)));

    let name = ctx.symbols.lookup("n");
    let variable = ctx.nodes.name(name);
    let t = ctx.array_of(TypeId::INT, Some(variable));
    assert!(matches!(t, Ok(t) if ctx.types.is_slice(t)));

    let three = ctx.nodes.int_const(3);
    let t = ctx.array_of(TypeId::INT, Some(three));
    assert!(matches!(t, Ok(t) if ctx.types.is_fixed_array(t)));

    assert_eq!(
        codes_and_lines(&ctx),
        vec![(ErrorCode::E2006, 3), (ErrorCode::E2006, 3)]
    );
}

#[test]
fn unexported_foreign_name_is_reported() {
    let mut ctx = TypeCtx::new("main");
    ctx.nodes.lines.line = 9;
    let sym = ctx.lookup_restricted("helper", "io");
    assert!(sym.is_ok());
    assert_eq!(sym.ok().map(|s| ctx.symbols.package_of(s).to_owned()), Some("io".to_owned()));

    let exported = ctx.lookup_restricted("Reader", "io");
    assert!(exported.is_ok());
    let local = ctx.lookup_restricted("helper", "main");
    assert!(local.is_ok());

    let diags: Vec<_> = ctx.diagnostics.peek().cloned().collect();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, ErrorCode::E2007);
    assert_eq!(diags[0].line, 9);
    assert_eq!(diags[0].message, "cannot refer to io.helper");
}

#[test]
fn import_collisions_are_reported() {
    let mut ctx = TypeCtx::new("main");
    let node = ctx.nodes.new_node(Op::Empty, None, None);
    for name in ["X", "Y"] {
        let sym = ctx.symbols.lookup_in(name, "io");
        ctx.symbols.get_mut(sym).def = Some(node);
    }
    let local = ctx.symbols.lookup("X");
    ctx.symbols.get_mut(local).def = Some(node);

    assert_eq!(ctx.import_all("io"), Ok(()));
    let messages: Vec<_> = ctx.diagnostics.peek().map(|d| (d.code, d.message.clone())).collect();
    assert_eq!(
        messages,
        vec![(ErrorCode::E2005, "redeclaration of main.X during import".to_owned())]
    );
    let y = ctx.symbols.lookup("Y");
    assert!(ctx.symbols.get(y).imported);
}

#[test]
fn export_of_undefined_type_is_reported() {
    let mut ctx = TypeCtx::with_config(
        "main",
        ArenaConfig::default(),
        DiagnosticConfig::default(),
        CtxOptions {
            filename: "x.go".to_owned(),
            ..CtxOptions::default()
        },
    );
    let sym = ctx.symbols.lookup("Later");
    let fwd = ctx.types.forward(sym);
    let p = ctx.types.pointer_to(fwd);

    let text = ctx.export_type(p);
    assert_eq!(text, Ok("*main.Later".to_owned()));
    let diags: Vec<_> = ctx.diagnostics.peek().cloned().collect();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, ErrorCode::E2008);
    assert_eq!(diags[0].message, "undefined type Later");

    let defined = ctx.types.pointer_to(TypeId::INT);
    assert_eq!(ctx.export_type(defined), Ok("*int".to_owned()));
    assert_eq!(ctx.diagnostics.len(), 1);
}

#[test]
fn error_limit_stops_the_unit() {
    let mut ctx = TypeCtx::with_config(
        "main",
        ArenaConfig::default(),
        DiagnosticConfig {
            error_limit: 2,
            report_all: false,
        },
        CtxOptions::default(),
    );
    let key = ctx.types.slice_of(TypeId::INT);
    assert!(ctx.map_of(key, TypeId::INT).is_ok());
    assert_eq!(
        ctx.map_of(key, TypeId::INT),
        Err(FatalError::TooManyErrors { count: 2 })
    );
}

#[test]
fn report_all_never_stops() {
    let mut ctx = TypeCtx::with_config(
        "main",
        ArenaConfig::default(),
        DiagnosticConfig::unlimited(),
        CtxOptions::default(),
    );
    let key = ctx.types.slice_of(TypeId::INT);
    for _ in 0..25 {
        assert!(ctx.map_of(key, TypeId::INT).is_ok());
    }
    assert_eq!(ctx.diagnostics.error_count(), 25);
}

#[test]
fn builtin_copies_are_instantiated_independently() {
    let mut ctx = TypeCtx::new("main");
    let p1 = ctx.types.field(None, TypeId::ANY);
    let p2 = ctx.types.field(None, TypeId::ANY);
    let r = ctx.types.field(None, TypeId::INT);
    let template = ctx.types.func_of(None, vec![p1, p2], vec![r]);
    let decl = ctx.declare_builtin("newmap", template);

    assert_eq!(ctx.syslook("newmap", false), decl);

    let first = ctx.syslook("newmap", true);
    assert_ne!(first, decl);
    ctx.argtype(first, TypeId::STRING);
    ctx.argtype(first, TypeId::INT);

    let second = ctx.syslook("newmap", true);
    ctx.argtype(second, TypeId::BOOL);
    ctx.argtype(second, TypeId::BOOL);

    let e1 = ctx.types.field(None, TypeId::STRING);
    let e2 = ctx.types.field(None, TypeId::INT);
    let er = ctx.types.field(None, TypeId::INT);
    let expected = ctx.types.func_of(None, vec![e1, e2], vec![er]);

    let first_ty = ctx.nodes.get(first).ty;
    let second_ty = ctx.nodes.get(second).ty;
    assert!(first_ty.is_some_and(|t| ctx.types.eq(t, expected, false)));
    assert!(second_ty.is_some_and(|t| !ctx.types.eq(t, expected, false)));
    assert_eq!(ctx.nodes.get(decl).ty, Some(template));
    let params = ctx.types.in_struct(template);
    let untouched: Vec<_> = ctx
        .types
        .struct_fields(params)
        .map(|f| ctx.types.field_type(f))
        .collect();
    assert_eq!(untouched, vec![TypeId::ANY, TypeId::ANY]);
}

#[test]
#[should_panic(expected = "can't find sys.missing")]
fn missing_builtin_is_internal_error() {
    let mut ctx = TypeCtx::new("main");
    let _ = ctx.syslook("missing", false);
}

#[test]
#[should_panic(expected = "argtype: failed")]
fn argtype_without_placeholder_is_internal_error() {
    let mut ctx = TypeCtx::new("main");
    let p = ctx.types.field(None, TypeId::ANY);
    let f = ctx.types.func_of(None, vec![p], vec![]);
    ctx.declare_builtin("one", f);
    let n = ctx.syslook("one", true);
    ctx.argtype(n, TypeId::INT);
    ctx.argtype(n, TypeId::INT);
}

#[test]
#[should_panic(expected = "argtype: failed")]
fn argtype_on_template_is_internal_error() {
    let mut ctx = TypeCtx::new("main");
    let p = ctx.types.field(None, TypeId::ANY);
    let f = ctx.types.func_of(None, vec![p], vec![]);
    let decl = ctx.declare_builtin("one", f);
    ctx.argtype(decl, TypeId::INT);
}
