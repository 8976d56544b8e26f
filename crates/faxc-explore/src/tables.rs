//! The physical-layout side tables the explorer populates (§4.5): `fns`,
//! `gvars`/`lvars`, `strs`, `garrs`/`larrs`, `branches`. Every table is
//! keyed by arena handle (`StmtId`/`ExprId`) or, for locals that may be
//! parameters rather than `Stmt::VarDecl` nodes, by `faxc_sem::DeclId` —
//! written once here, read-only in `faxc-emit` thereafter.

use faxc_par::{ExprId, StmtId};
use faxc_sem::DeclId;
use faxc_util::FxHashMap;

/// `fns[decl]`: a function declaration's assembly label and its
/// 16-byte-aligned stack frame size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnLayout {
    pub label: String,
    pub frame_size: i64,
}

/// `gvars[decl]`: a top-level variable declaration's global symbol and
/// byte size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalVar {
    pub label: String,
    pub size: i64,
}

/// `lvars[decl]`: a local variable's (or parameter's) positive,
/// `rbp`-relative stack offset and byte size. Invariant 3 (§9):
/// `offset` is a positive multiple of `size` and `offset + size <=
/// fns[enclosing].frame_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalVar {
    pub offset: i64,
    pub size: i64,
}

/// `strs[lit]`: a string literal's always-global label. The decoded
/// byte content lives in the AST node itself (`Expr::Str.value`); this
/// table only adds the label the emitter writes it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrEntry {
    pub label: String,
}

/// `garrs[lit]`: a top-level array literal's global label, element
/// count, and per-element byte size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalArr {
    pub label: String,
    pub len: i64,
    pub elem_size: i64,
}

/// `larrs[lit]`: a local array literal's own contiguous stack region.
/// Every array literal gets one of these (or a `garrs` entry at global
/// scope), unconditionally, even when it is the direct initializer of a
/// `var` declaration — the emitter materializes the literal into this
/// region first, then copies it element-by-element into the owning
/// variable's own `lvars`/`gvars` slot, the same way any other
/// array-valued initializer is copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalArr {
    pub offset: i64,
    pub len: i64,
    pub elem_size: i64,
}

/// `branches[stmt]`: the assembly labels a control-flow statement (or
/// function declaration) reserved for itself, shaped per statement kind
/// so the emitter never has to guess which labels apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Branches {
    If { end: String, else_label: Option<String> },
    For { head: String, tail: String },
    Func { epilogue: String },
}

/// The bundle of every table the explorer produces, handed to
/// `faxc-emit` as a single read-only argument.
#[derive(Debug, Default)]
pub struct Layout {
    pub fns: FxHashMap<StmtId, FnLayout>,
    pub gvars: FxHashMap<StmtId, GlobalVar>,
    pub lvars: FxHashMap<DeclId, LocalVar>,
    pub strs: FxHashMap<ExprId, StrEntry>,
    pub garrs: FxHashMap<ExprId, GlobalArr>,
    pub larrs: FxHashMap<ExprId, LocalArr>,
    pub branches: FxHashMap<StmtId, Branches>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }
}
