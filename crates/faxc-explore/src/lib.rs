//! `faxc-explore` — the pre-emission exploration pass (§4.5): walks the
//! fully type-checked syntax tree and fixes every declaration's and
//! literal's physical representation (stack offset, global label, or
//! control-flow label) before `faxc-emit` writes a single instruction.
//!
//! Consumes `faxc_sem::TypeTable` (to size array elements) and produces
//! a [`Layout`] bundling the six physical-layout side tables from §3:
//! `fns`, `gvars`/`lvars`, `strs`, `garrs`/`larrs`, `branches`. Register
//! and alignment vocabulary comes from `faxc-abi`; this crate adds no
//! ISA facts of its own.

pub mod explorer;
pub mod size;
pub mod tables;

pub use explorer::explore;
pub use size::size_of;
pub use tables::{Branches, FnLayout, GlobalArr, GlobalVar, Layout, LocalArr, LocalVar, StrEntry};
