//! Lexical scoping for the resolver (§4.3): a chain of frames ("ribs",
//! following the naming this crate's resolver is grounded on) from the
//! current position outward to the top level.

use faxc_par::StmtId;
use faxc_util::index_vec::{define_idx, IndexVec};
use faxc_util::{FxHashMap, Symbol};

use crate::tables::DeclId;

define_idx!(RibId);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RibKind {
    TopLevel,
    /// Carries the enclosing `Stmt::FuncDecl`'s handle, so a `return`
    /// inside it can record which function it belongs to.
    Function(StmtId),
    /// Carries the enclosing `Stmt::For`'s handle, for `break`/`continue`.
    Loop(StmtId),
    Block,
}

#[derive(Debug)]
pub struct Rib {
    bindings: FxHashMap<Symbol, DeclId>,
    parent: Option<RibId>,
    kind: RibKind,
}

pub struct ScopeTree {
    ribs: IndexVec<RibId, Rib>,
    current: RibId,
}

impl ScopeTree {
    pub fn new() -> Self {
        let mut ribs = IndexVec::new();
        let root = ribs.push(Rib {
            bindings: FxHashMap::default(),
            parent: None,
            kind: RibKind::TopLevel,
        });
        ScopeTree { ribs, current: root }
    }

    pub fn enter_scope(&mut self, kind: RibKind) {
        let rib = self.ribs.push(Rib {
            bindings: FxHashMap::default(),
            parent: Some(self.current),
            kind,
        });
        self.current = rib;
    }

    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.ribs[self.current].parent {
            self.current = parent;
        }
    }

    /// Binds `name` in the current rib. Returns `false` when `name` is
    /// already bound in this same rib (duplicate definition) — a
    /// collision with an outer rib is ordinary, legal shadowing.
    pub fn define(&mut self, name: Symbol, decl: DeclId) -> bool {
        let rib = &mut self.ribs[self.current];
        if rib.bindings.contains_key(&name) {
            return false;
        }
        rib.bindings.insert(name, decl);
        true
    }

    pub fn resolve(&self, name: Symbol) -> Option<DeclId> {
        let mut rib_id = self.current;
        loop {
            let rib = &self.ribs[rib_id];
            if let Some(decl) = rib.bindings.get(&name) {
                return Some(*decl);
            }
            rib_id = rib.parent?;
        }
    }

    /// The innermost enclosing function declaration, for `return`.
    pub fn enclosing_function(&self) -> Option<StmtId> {
        let mut rib_id = self.current;
        loop {
            let rib = &self.ribs[rib_id];
            if let RibKind::Function(id) = rib.kind {
                return Some(id);
            }
            rib_id = rib.parent?;
        }
    }

    /// The innermost enclosing loop, for `break`/`continue`.
    pub fn enclosing_loop(&self) -> Option<StmtId> {
        let mut rib_id = self.current;
        loop {
            let rib = &self.ribs[rib_id];
            if let RibKind::Loop(id) = rib.kind {
                return Some(id);
            }
            rib_id = rib.parent?;
        }
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faxc_util::index_vec::Idx;

    #[test]
    fn resolves_through_nested_scopes() {
        let mut tree = ScopeTree::new();
        let x = Symbol::intern("x");
        let decl = DeclId::Stmt(StmtId::from_usize(0));
        tree.define(x, decl);

        tree.enter_scope(RibKind::Block);
        assert_eq!(tree.resolve(x), Some(decl));
        tree.exit_scope();
    }

    #[test]
    fn shadowing_in_inner_scope_does_not_collide() {
        let mut tree = ScopeTree::new();
        let x = Symbol::intern("x");
        let outer = DeclId::Stmt(StmtId::from_usize(0));
        let inner = DeclId::Stmt(StmtId::from_usize(1));
        tree.define(x, outer);

        tree.enter_scope(RibKind::Block);
        assert!(tree.define(x, inner));
        assert_eq!(tree.resolve(x), Some(inner));
        tree.exit_scope();
        assert_eq!(tree.resolve(x), Some(outer));
    }

    #[test]
    fn duplicate_definition_in_same_rib_is_rejected() {
        let mut tree = ScopeTree::new();
        let x = Symbol::intern("x");
        assert!(tree.define(x, DeclId::Stmt(StmtId::from_usize(0))));
        assert!(!tree.define(x, DeclId::Stmt(StmtId::from_usize(1))));
    }

    #[test]
    fn enclosing_function_and_loop_are_found_through_blocks() {
        let mut tree = ScopeTree::new();
        let func = StmtId::from_usize(0);
        tree.enter_scope(RibKind::Function(func));
        let loop_id = StmtId::from_usize(1);
        tree.enter_scope(RibKind::Loop(loop_id));
        tree.enter_scope(RibKind::Block);

        assert_eq!(tree.enclosing_function(), Some(func));
        assert_eq!(tree.enclosing_loop(), Some(loop_id));
    }

    #[test]
    fn unresolved_name_returns_none() {
        let tree = ScopeTree::new();
        assert_eq!(tree.resolve(Symbol::intern("missing")), None);
    }
}
