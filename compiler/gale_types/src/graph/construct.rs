//! Type construction.

use gale_ir::{NodeArena, NodeId, Op, SymId, TypeId, Val};

use super::{Type, TypeGraph, TypeKind, PTR_WIDTH};
use crate::{ChanDir, TypeError};

impl TypeGraph {
    /// Create an anonymous type of the given content.
    pub fn make_type(&mut self, kind: TypeKind) -> TypeId {
        self.alloc(Type::new(kind))
    }

    /// Create a named type of the given content.
    pub fn named(&mut self, sym: SymId, kind: TypeKind) -> TypeId {
        let mut ty = Type::new(kind);
        ty.sym = Some(sym);
        self.alloc(ty)
    }

    /// `*elem`.
    pub fn pointer_to(&mut self, elem: TypeId) -> TypeId {
        let mut ty = Type::new(TypeKind::Ptr { elem });
        ty.width = Some(PTR_WIDTH);
        self.alloc(ty)
    }

    /// `[]elem`.
    pub fn slice_of(&mut self, elem: TypeId) -> TypeId {
        self.make_type(TypeKind::Array { elem, bound: None })
    }

    /// `[n]elem`.
    pub fn fixed_array_of(&mut self, elem: TypeId, n: u64) -> TypeId {
        self.make_type(TypeKind::Array {
            elem,
            bound: Some(n),
        })
    }

    /// Array type from a parsed bound expression; no bound gives a slice.
    ///
    /// The bound must be a non-negative integer constant.
    pub fn array_of(
        &mut self,
        nodes: &NodeArena,
        elem: TypeId,
        bound: Option<NodeId>,
    ) -> Result<TypeId, TypeError> {
        let Some(bound) = bound else {
            return Ok(self.slice_of(elem));
        };
        let node = nodes.get(bound);
        match (node.op, node.val) {
            (Op::Literal, Val::Int(n)) => match u64::try_from(n) {
                Ok(n) => Ok(self.fixed_array_of(elem, n)),
                Err(_) => Err(TypeError::NegativeArrayBound { bound: n }),
            },
            _ => Err(TypeError::NonConstantArrayBound),
        }
    }

    /// `chan elem` with a direction.
    pub fn chan_of(&mut self, elem: TypeId, dir: ChanDir) -> TypeId {
        let mut ty = Type::new(TypeKind::Chan { elem, dir });
        ty.width = Some(PTR_WIDTH);
        self.alloc(ty)
    }

    /// `map[key]value`, checking that `key` is comparable.
    ///
    /// A forward-declared key cannot be checked yet: the check is recorded
    /// on the placeholder (first use only) and runs when it is resolved.
    pub fn map_of(&mut self, key: TypeId, value: TypeId, line: u32) -> Result<TypeId, TypeError> {
        if !self.is_key_type(key) {
            if let TypeKind::Forward { map_line } = &mut self.get_mut(key).kind {
                if map_line.is_none() {
                    *map_line = Some(line);
                }
            } else {
                return Err(TypeError::InvalidMapKey { key, line });
            }
        }
        Ok(self.map_unchecked(key, value))
    }

    /// `map[key]value` without the key check.
    pub fn map_unchecked(&mut self, key: TypeId, value: TypeId) -> TypeId {
        let mut ty = Type::new(TypeKind::Map { key, value });
        ty.width = Some(PTR_WIDTH);
        self.alloc(ty)
    }

    /// A named (or anonymous, with `None`) field entry.
    pub fn field(&mut self, sym: Option<SymId>, ty: TypeId) -> TypeId {
        let mut field = Type::new(TypeKind::Field {
            ty,
            embedded: false,
            note: None,
        });
        field.sym = sym;
        self.alloc(field)
    }

    /// An embedded field entry; `sym` is the embedded type's name.
    pub fn embedded_field(&mut self, sym: SymId, ty: TypeId) -> TypeId {
        let mut field = Type::new(TypeKind::Field {
            ty,
            embedded: true,
            note: None,
        });
        field.sym = Some(sym);
        self.alloc(field)
    }

    /// Attach a tag string to a field entry.
    pub fn set_note(&mut self, field: TypeId, text: impl Into<String>) {
        match &mut self.get_mut(field).kind {
            TypeKind::Field { note, .. } => *note = Some(text.into()),
            other => gale_diagnostic::ice(format_args!("set_note: not a field ({})", other.kind())),
        }
    }

    /// `struct { fields }`.
    pub fn struct_of(&mut self, fields: Vec<TypeId>) -> TypeId {
        self.make_type(TypeKind::Struct { fields })
    }

    /// `interface { methods }`.
    pub fn interface_of(&mut self, methods: Vec<TypeId>) -> TypeId {
        self.make_type(TypeKind::Interface { methods })
    }

    /// Function type from receiver, parameter and result field entries.
    pub fn func_of(
        &mut self,
        recv: Option<TypeId>,
        params: Vec<TypeId>,
        results: Vec<TypeId>,
    ) -> TypeId {
        let recv = self.struct_of(recv.into_iter().collect());
        let params = self.struct_of(params);
        let results = self.struct_of(results);
        let mut ty = Type::new(TypeKind::Func {
            recv,
            results,
            params,
        });
        ty.width = Some(PTR_WIDTH);
        self.alloc(ty)
    }

    /// Declare a named type whose definition comes later.
    pub fn forward(&mut self, sym: SymId) -> TypeId {
        self.named(sym, TypeKind::Forward { map_line: None })
    }

    /// Fill a forward placeholder with the content of `def`.
    ///
    /// The placeholder keeps its handle, name and methods. If it was used as
    /// a map key before, the deferred key check runs now, once.
    ///
    /// A definition that is itself still a placeholder leaves `fwd`
    /// unresolved; a pending key check is carried over to `def` so it runs
    /// when `def` is defined.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resolve_forward(&mut self, fwd: TypeId, def: TypeId) -> Result<(), TypeError> {
        let TypeKind::Forward { map_line } = self.get(fwd).kind else {
            gale_diagnostic::ice(format_args!(
                "resolve_forward: {fwd:?} is not a forward type ({})",
                self.kind(fwd)
            ));
        };
        if let TypeKind::Forward { map_line: pending } = &mut self.get_mut(def).kind {
            if pending.is_none() {
                *pending = map_line;
            }
            tracing::trace!(?fwd, ?def, "definition still undefined");
            return Ok(());
        }
        let (kind, width) = {
            let d = self.get(def);
            (d.kind.clone(), d.width)
        };
        let ty = self.get_mut(fwd);
        ty.kind = kind;
        ty.width = width;

        if let Some(line) = map_line {
            if !self.is_key_type(fwd) {
                return Err(TypeError::InvalidMapKey { key: fwd, line });
            }
        }
        Ok(())
    }

    /// Declare a method on a named type.
    pub fn add_method(&mut self, on: TypeId, sym: SymId, func: TypeId) -> TypeId {
        let field = self.field(Some(sym), func);
        self.get_mut(on).methods.push(field);
        field
    }
}
