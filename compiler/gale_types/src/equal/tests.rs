use gale_ir::{SymbolTable, TypeId};
use proptest::prelude::*;

use crate::graph::{TypeGraph, TypeKind};
use crate::test_support::{build, setup, shape};
use crate::ChanDir;

fn point(syms: &mut SymbolTable, graph: &mut TypeGraph) -> TypeId {
    let x = graph.field(Some(syms.lookup("x")), TypeId::INT);
    let y = graph.field(Some(syms.lookup("y")), TypeId::INT);
    graph.struct_of(vec![x, y])
}

#[test]
fn identical_anonymous_structs_are_equal() {
    let (mut syms, mut graph) = setup();
    let a = point(&mut syms, &mut graph);
    let b = point(&mut syms, &mut graph);
    assert_ne!(a, b);
    assert!(graph.eq(a, b, false));
    assert!(graph.eq(a, b, true));
}

#[test]
fn field_names_must_match() {
    let (mut syms, mut graph) = setup();
    let a = point(&mut syms, &mut graph);
    let x = graph.field(Some(syms.lookup("x")), TypeId::INT);
    let z = graph.field(Some(syms.lookup("z")), TypeId::INT);
    let b = graph.struct_of(vec![x, z]);
    assert!(!graph.eq(a, b, false));

    let anon = graph.field(None, TypeId::INT);
    let c = graph.struct_of(vec![x, anon]);
    assert!(!graph.eq(a, c, false));
    assert!(!graph.eq(c, a, false));
}

#[test]
fn named_types_are_nominal_only_with_names() {
    let (mut syms, mut graph) = setup();
    let shape = point(&mut syms, &mut graph);
    let fields = graph.members(shape).to_vec();
    let a = graph.named(syms.lookup("A"), TypeKind::Struct { fields: fields.clone() });
    let b = graph.named(syms.lookup("B"), TypeKind::Struct { fields });
    assert!(!graph.eq(a, b, true));
    assert!(graph.eq(a, b, false));
    assert!(graph.eq(a, shape, true));
    assert!(!graph.eq(TypeId::INT, TypeId::INT32, false));
}

#[test]
fn arrays_compare_bounds() {
    let (_, mut graph) = setup();
    let a3 = graph.fixed_array_of(TypeId::INT, 3);
    let b3 = graph.fixed_array_of(TypeId::INT, 3);
    let a4 = graph.fixed_array_of(TypeId::INT, 4);
    let s1 = graph.slice_of(TypeId::INT);
    let s2 = graph.slice_of(TypeId::INT);
    assert!(graph.eq(a3, b3, true));
    assert!(!graph.eq(a3, a4, true));
    assert!(!graph.eq(a3, s1, true));
    assert!(graph.eq(s1, s2, true));
}

#[test]
fn channels_compare_direction() {
    let (_, mut graph) = setup();
    let both = graph.chan_of(TypeId::INT, ChanDir::Both);
    let both2 = graph.chan_of(TypeId::INT, ChanDir::Both);
    let recv = graph.chan_of(TypeId::INT, ChanDir::Recv);
    assert!(graph.eq(both, both2, true));
    assert!(!graph.eq(both, recv, true));
}

#[test]
fn maps_compare_values() {
    let (_, mut graph) = setup();
    let a = graph.map_unchecked(TypeId::STRING, TypeId::INT);
    let b = graph.map_unchecked(TypeId::STRING, TypeId::INT);
    let c = graph.map_unchecked(TypeId::STRING, TypeId::BOOL);
    assert!(graph.eq(a, b, true));
    assert!(!graph.eq(a, c, true));
}

#[test]
fn func_types_ignore_argument_names() {
    let (mut syms, mut graph) = setup();
    let a = graph.field(Some(syms.lookup("a")), TypeId::INT);
    let b = graph.field(Some(syms.lookup("b")), TypeId::INT);
    let f = graph.func_of(None, vec![a], vec![]);
    let g = graph.func_of(None, vec![b], vec![]);
    assert!(graph.eq(f, g, true));
    assert!(!graph.same_argument_names(f, g));
    let a2 = graph.field(Some(syms.lookup("a")), TypeId::INT);
    let h = graph.func_of(None, vec![a2], vec![]);
    assert!(graph.same_argument_names(f, h));

    let s = graph.field(None, TypeId::STRING);
    let k = graph.func_of(None, vec![s], vec![]);
    assert!(!graph.eq(f, k, true));
}

#[test]
#[should_panic(expected = "internal compiler error")]
fn same_argument_names_requires_funcs() {
    let (_, graph) = setup();
    let _ = graph.same_argument_names(TypeId::INT, TypeId::INT);
}

#[test]
fn self_referential_types_terminate() {
    let (mut syms, mut graph) = setup();
    let make = |syms: &mut SymbolTable, graph: &mut TypeGraph| {
        let node = graph.forward(syms.lookup("Node"));
        let next_ty = graph.pointer_to(node);
        let next = graph.field(Some(syms.lookup("next")), next_ty);
        let def = graph.struct_of(vec![next]);
        assert_eq!(graph.resolve_forward(node, def), Ok(()));
        node
    };
    let a = make(&mut syms, &mut graph);
    let b = make(&mut syms, &mut graph);
    assert!(graph.eq(a, b, false));
}

#[test]
fn convertible_rules() {
    let (mut syms, mut graph) = setup();
    let p = graph.pointer_to(TypeId::INT);
    let s = graph.slice_of(TypeId::INT);
    let a = graph.fixed_array_of(TypeId::INT, 2);
    let shape = point(&mut syms, &mut graph);
    let fields = graph.members(shape).to_vec();
    let named = graph.named(syms.lookup("P"), TypeKind::Struct { fields });

    assert!(graph.convertible(TypeId::INT, TypeId::INT));
    assert!(graph.convertible(named, shape));
    assert!(graph.convertible(p, TypeId::NIL));
    assert!(graph.convertible(s, TypeId::NIL));
    assert!(!graph.convertible(a, TypeId::NIL));
    assert!(!graph.convertible(TypeId::NIL, p));
    assert!(graph.convertible(TypeId::FLOAT64, TypeId::IDEAL));
    assert!(!graph.convertible(TypeId::STRING, TypeId::IDEAL));
}

#[test]
fn eq_no_name_compares_fields() {
    let (mut syms, mut graph) = setup();
    let shape = point(&mut syms, &mut graph);
    let fields = graph.members(shape).to_vec();
    let a = graph.named(syms.lookup("A"), TypeKind::Struct { fields: fields.clone() });
    let b = graph.named(syms.lookup("B"), TypeKind::Struct { fields });
    assert!(graph.eq_no_name(a, b));
    assert!(!graph.eq_no_name(TypeId::INT, TypeId::UINT));
}

proptest! {
    #[test]
    fn eq_is_reflexive(s in shape()) {
        let (mut syms, mut graph) = setup();
        let a = build(&mut syms, &mut graph, &s);
        let b = build(&mut syms, &mut graph, &s);
        prop_assert!(graph.eq(a, a, true));
        prop_assert!(graph.eq(a, b, true));
        prop_assert!(graph.convertible(a, b));
    }

    #[test]
    fn eq_is_symmetric(s1 in shape(), s2 in shape(), names in any::<bool>()) {
        let (mut syms, mut graph) = setup();
        let a = build(&mut syms, &mut graph, &s1);
        let b = build(&mut syms, &mut graph, &s2);
        prop_assert_eq!(graph.eq(a, b, names), graph.eq(b, a, names));
    }
}
