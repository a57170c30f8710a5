use gale_ir::{SymbolTable, TypeId};
use pretty_assertions::assert_eq;

use super::*;
use crate::test_support::setup;
use crate::ChanDir;

fn show(graph: &TypeGraph, syms: &SymbolTable, t: TypeId) -> String {
    graph.type_string(syms, t)
}

#[test]
fn basic_and_predeclared_names() {
    let (syms, graph) = setup();
    assert_eq!(show(&graph, &syms, TypeId::INT), "int");
    assert_eq!(show(&graph, &syms, TypeId::STRING), "string");
    assert_eq!(show(&graph, &syms, TypeId::NIL), "nil");
    assert_eq!(show(&graph, &syms, TypeId::DDD), "...");
    assert_eq!(show(&graph, &syms, TypeId::ANY), "any");
    let mut f = TypeFormatter::new(&graph, &syms);
    assert_eq!(f.format(None, FormatOptions::empty()), "<T>");
}

#[test]
fn composite_forms() {
    let (mut syms, mut graph) = setup();
    let p = graph.pointer_to(TypeId::INT);
    assert_eq!(show(&graph, &syms, p), "*int");
    let s = graph.slice_of(p);
    assert_eq!(show(&graph, &syms, s), "[]*int");
    let a = graph.fixed_array_of(TypeId::BOOL, 3);
    assert_eq!(show(&graph, &syms, a), "[3]bool");
    let m = graph.map_unchecked(TypeId::STRING, a);
    assert_eq!(show(&graph, &syms, m), "map[string] [3]bool");

    let x = graph.field(Some(syms.lookup("x")), TypeId::INT);
    let e = graph.embedded_field(syms.lookup("T"), TypeId::STRING);
    let st = graph.struct_of(vec![x, e]);
    assert_eq!(show(&graph, &syms, st), "struct { x int; string }");
    let empty = graph.struct_of(vec![]);
    assert_eq!(show(&graph, &syms, empty), "struct { }");
}

#[test]
fn channel_directions() {
    let (syms, mut graph) = setup();
    let both = graph.chan_of(TypeId::INT, ChanDir::Both);
    let recv = graph.chan_of(TypeId::INT, ChanDir::Recv);
    let send = graph.chan_of(TypeId::INT, ChanDir::Send);
    let send_chan = graph.chan_of(recv, ChanDir::Send);
    assert_eq!(show(&graph, &syms, both), "chan int");
    assert_eq!(show(&graph, &syms, recv), "<-chan int");
    assert_eq!(show(&graph, &syms, send), "chan<- int");
    assert_eq!(show(&graph, &syms, send_chan), "chan<- (<-chan int)");
}

#[test]
fn function_signatures() {
    let (mut syms, mut graph) = setup();
    let a = graph.field(Some(syms.lookup("a")), TypeId::INT);
    let b = graph.field(Some(syms.lookup("b")), TypeId::STRING);
    let r = graph.field(None, TypeId::BOOL);
    let f = graph.func_of(None, vec![a, b], vec![r]);
    assert_eq!(show(&graph, &syms, f), "func(a int, b string) bool");
    assert_eq!(
        graph.format_with(&syms, f, FormatOptions::NO_ARG_NAMES),
        "func(int, string) bool"
    );

    let r1 = graph.field(Some(syms.lookup("n")), TypeId::INT);
    let r2 = graph.field(None, TypeId::BOOL);
    let g = graph.func_of(None, vec![], vec![r1, r2]);
    assert_eq!(show(&graph, &syms, g), "func() (n int, bool)");

    let t = graph.named(syms.lookup("T"), crate::graph::TypeKind::Struct { fields: vec![] });
    let pt = graph.pointer_to(t);
    let recv = graph.field(Some(syms.lookup("t")), pt);
    let m = graph.func_of(Some(recv), vec![], vec![]);
    assert_eq!(show(&graph, &syms, m), "method(t *T)func()");
    assert_eq!(
        graph.format_with(&syms, m, FormatOptions::SHORT | FormatOptions::NO_FUNC_KEYWORD),
        "()"
    );
}

#[test]
fn interfaces_render_method_signatures() {
    let (mut syms, mut graph) = setup();
    let arg = graph.field(None, TypeId::INT);
    let sig = graph.func_of(None, vec![arg], vec![]);
    let m = graph.field(Some(syms.lookup("M")), sig);
    let sig2 = graph.func_of(None, vec![], vec![]);
    let n = graph.field(Some(syms.lookup("N")), sig2);
    let i = graph.interface_of(vec![m, n]);
    assert_eq!(show(&graph, &syms, i), "interface { M (int); N () }");
    let empty = graph.interface_of(vec![]);
    assert_eq!(show(&graph, &syms, empty), "interface { }");
}

#[test]
fn named_types_and_packages() {
    let (mut syms, mut graph) = setup();
    let local = graph.named(syms.lookup("T"), crate::graph::TypeKind::Struct { fields: vec![] });
    let other_sym = syms.lookup_in("Reader", "io");
    let other = graph.named(other_sym, crate::graph::TypeKind::Interface { methods: vec![] });
    assert_eq!(show(&graph, &syms, local), "T");
    assert_eq!(show(&graph, &syms, other), "io.Reader");
    assert_eq!(graph.format_with(&syms, local, FormatOptions::LONG), "struct { }");
}

#[test]
fn export_form_qualifies_local_names() {
    let (mut syms, mut graph) = setup();
    let exported = graph.named(syms.lookup("T"), crate::graph::TypeKind::Struct { fields: vec![] });
    let hidden = graph.named(syms.lookup("t"), crate::graph::TypeKind::Struct { fields: vec![] });
    graph.get_mut(hidden).vargen = 2;
    let other = graph.named(syms.lookup_in("Reader", "io"), crate::graph::TypeKind::Interface {
        methods: vec![],
    });

    let mut f = TypeFormatter::new(&graph, &syms).with_filename("x.go");
    assert_eq!(f.format(Some(exported), FormatOptions::EXPORT), "main.T");
    assert_eq!(f.format(Some(hidden), FormatOptions::EXPORT), "main.t·x.go·2");
    assert_eq!(f.format(Some(other), FormatOptions::EXPORT), "io.Reader");
    assert_eq!(
        f.format(Some(hidden), FormatOptions::EXPORT | FormatOptions::SHORT),
        "t·x.go·2"
    );
    assert_eq!(f.take_error(), None);
}

#[test]
fn export_form_marks_embedded_fields() {
    let (mut syms, mut graph) = setup();
    let e = graph.embedded_field(syms.lookup("int"), TypeId::INT);
    let st = graph.struct_of(vec![e]);
    assert_eq!(graph.format_with(&syms, st, FormatOptions::EXPORT), "struct { ? int }");
}

#[test]
fn field_notes_are_escaped() {
    let (mut syms, mut graph) = setup();
    let f = graph.field(Some(syms.lookup("x")), TypeId::INT);
    graph.set_note(f, "a\"b");
    let st = graph.struct_of(vec![f]);
    assert_eq!(show(&graph, &syms, st), "struct { x int \"a\\\"b\" }");
}

#[test]
fn undefined_forward_types() {
    let (mut syms, mut graph) = setup();
    let fwd = graph.forward(syms.lookup("Later"));
    assert_eq!(show(&graph, &syms, fwd), "Later");
    assert_eq!(graph.format_with(&syms, fwd, FormatOptions::LONG), "undefined Later");
    let anon = graph.make_type(crate::graph::TypeKind::Forward { map_line: None });
    assert_eq!(show(&graph, &syms, anon), "undefined");
    let p = graph.pointer_to(fwd);
    let result = TypeFormatter::new(&graph, &syms).try_format(p, FormatOptions::EXPORT);
    assert_eq!(result, Err(FormatError::UndefinedType { sym: graph.sym(fwd) }));
}

#[test]
fn cyclic_types_are_cut_off() {
    let (mut syms, mut graph) = setup();
    let fwd = graph.make_type(crate::graph::TypeKind::Forward { map_line: None });
    let p = graph.pointer_to(fwd);
    let f = graph.field(Some(syms.lookup("next")), p);
    let def = graph.struct_of(vec![f]);
    assert_eq!(graph.resolve_forward(fwd, def), Ok(()));
    let text = show(&graph, &syms, fwd);
    assert!(text.starts_with("struct { next *struct { next *"));
    assert!(text.contains("..."));
}

#[test]
fn detailed_form() {
    let (mut syms, mut graph) = setup();
    let p = graph.pointer_to(TypeId::INT);
    assert_eq!(graph.format_with(&syms, p, FormatOptions::DETAILED), "PTR64 INT <int>");
    let x = graph.field(Some(syms.lookup("x")), TypeId::BOOL);
    let st = graph.struct_of(vec![x]);
    assert_eq!(graph.format_with(&syms, st, FormatOptions::DETAILED), "STRUCT {}");
    assert_eq!(
        graph.format_with(&syms, st, FormatOptions::DETAILED | FormatOptions::LONG),
        "STRUCT {FIELD <x>BOOL <bool>;}"
    );
    let f = graph.func_of(None, vec![], vec![]);
    assert_eq!(
        graph.format_with(&syms, f, FormatOptions::DETAILED),
        "FUNC 000(STRUCT {},STRUCT {})STRUCT {}"
    );
}
