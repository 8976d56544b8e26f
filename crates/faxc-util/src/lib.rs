//! `faxc-util` — shared foundation types for the `faxc` workspace.
//!
//! Every other crate in the pipeline (`faxc-lex` through `faxc-emit`)
//! depends on this crate for source positions (`span`), string
//! interning (`symbol`), diagnostics (`diagnostic`), the typed arena
//! index machinery (`index_vec`), and the ambient per-concern error
//! taxonomy (`error`, §5). None of these carry any language-specific
//! knowledge — they are the vocabulary the rest of the workspace is
//! written in.

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{CollectingHandler, Diagnostic, Handler, Level, TerminatingHandler};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;

// Re-export commonly used hasher-backed collections; the rest of the
// workspace reaches for these instead of the std `HashMap`/`HashSet`.
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
