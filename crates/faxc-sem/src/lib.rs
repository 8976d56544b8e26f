//! `faxc-sem` — name resolution and type checking (§4.3, §4.4).
//!
//! Two passes over the [`faxc_par::Ast`] the parser produced, each
//! populating one side table: [`resolve::resolve`] builds [`RefTable`]
//! (§3's `refs`), and [`typeck::check`] builds [`TypeTable`] (§3's
//! `types`), consulting `RefTable` to look up what an identifier
//! reference, `return`, or loop-control statement resolved to. Both
//! tables are keyed by arena handle (`ExprId`/`StmtId`) rather than
//! pointer identity, so they stay acyclic and trivially `Send`/`Sync`
//! (Design Notes §10).
//!
//! [`check_program`] runs both passes in order and, if no error was
//! raised, applies the type checker's inferred-type write-backs and
//! hands back `(RefTable, TypeTable)` for the explorer (§4.5) to consume.

pub mod resolve;
pub mod scope;
pub mod tables;
pub mod typeck;
pub mod types;

pub use tables::{Builtin, DeclId, RefTable, TypeTable};
pub use types::Type;

use faxc_par::Ast;
use faxc_util::diagnostic::Handler;

/// Runs the resolver then the type checker over `ast`, mutating it in
/// place to apply inferred variable-declaration types. Returns the two
/// populated side tables regardless of whether errors were raised along
/// the way — callers check `handler.has_errors()` themselves (§8's "no
/// stage produces output once an error is raised" is enforced by the
/// driver, not by this function refusing to return).
pub fn check_program(ast: &mut Ast, handler: &dyn Handler) -> (RefTable, TypeTable) {
    let refs = resolve::resolve(ast, handler);
    let (types, mutations) = typeck::check(ast, &refs, handler);
    typeck::apply_inferred_types(ast, mutations);
    (refs, types)
}
