//! Builders shared by the unit tests of several modules.

use gale_ir::{SymbolTable, TypeId};
use proptest::prelude::*;

use crate::graph::TypeGraph;

/// Fresh symbol table in package `main` and a graph over it.
pub(crate) fn setup() -> (SymbolTable, TypeGraph) {
    let mut syms = SymbolTable::new("main");
    let graph = TypeGraph::new(&mut syms);
    (syms, graph)
}

/// Small recipe for a type, built into a graph by [`build`].
#[derive(Clone, Debug)]
pub(crate) enum Shape {
    Basic(u8),
    Ptr(Box<Shape>),
    Slice(Box<Shape>),
    Array(Box<Shape>, u64),
    Map(Box<Shape>, Box<Shape>),
    Struct(Vec<(Option<u8>, Shape)>),
    Func(Vec<Shape>, Vec<Shape>),
}

pub(crate) fn shape() -> impl Strategy<Value = Shape> {
    let leaf = (0u8..4).prop_map(Shape::Basic);
    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|s| Shape::Ptr(Box::new(s))),
            inner.clone().prop_map(|s| Shape::Slice(Box::new(s))),
            (inner.clone(), 0u64..3).prop_map(|(s, n)| Shape::Array(Box::new(s), n)),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| Shape::Map(Box::new(k), Box::new(v))),
            prop::collection::vec((prop::option::of(0u8..3), inner.clone()), 0..3)
                .prop_map(Shape::Struct),
            (
                prop::collection::vec(inner.clone(), 0..3),
                prop::collection::vec(inner, 0..2)
            )
                .prop_map(|(p, r)| Shape::Func(p, r)),
        ]
    })
}

pub(crate) fn build(syms: &mut SymbolTable, graph: &mut TypeGraph, s: &Shape) -> TypeId {
    const BASICS: [TypeId; 4] = [TypeId::INT, TypeId::STRING, TypeId::BOOL, TypeId::FLOAT64];
    const NAMES: [&str; 3] = ["a", "b", "c"];
    match s {
        Shape::Basic(i) => BASICS[usize::from(*i)],
        Shape::Ptr(e) => {
            let e = build(syms, graph, e);
            graph.pointer_to(e)
        }
        Shape::Slice(e) => {
            let e = build(syms, graph, e);
            graph.slice_of(e)
        }
        Shape::Array(e, n) => {
            let e = build(syms, graph, e);
            graph.fixed_array_of(e, *n)
        }
        Shape::Map(k, v) => {
            let k = build(syms, graph, k);
            let v = build(syms, graph, v);
            graph.map_unchecked(k, v)
        }
        Shape::Struct(fields) => {
            let fields = fields
                .iter()
                .map(|(name, s)| {
                    let ty = build(syms, graph, s);
                    let sym = name.map(|n| syms.lookup(NAMES[usize::from(n)]));
                    graph.field(sym, ty)
                })
                .collect();
            graph.struct_of(fields)
        }
        Shape::Func(params, results) => {
            let params = params
                .iter()
                .map(|s| {
                    let ty = build(syms, graph, s);
                    graph.field(None, ty)
                })
                .collect();
            let results = results
                .iter()
                .map(|s| {
                    let ty = build(syms, graph, s);
                    graph.field(None, ty)
                })
                .collect();
            graph.func_of(None, params, results)
        }
    }
}
