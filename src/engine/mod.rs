//! Query resolution engine.
//!
//! This module is the *public entry point* for the stream-of-frames
//! resolution procedure. Like the engine this crate grew from, it is split
//! into focused submodules under `src/engine/` rather than one monolithic
//! file.
//!
//! ## How the parts work together
//!
//! Resolving a query is a pipeline:
//!
//! ```text
//! query ── eval::run (dispatch on head) ──┬─ and/or/not/apply connectives
//!                                         │
//!                                         └─ simple query
//!                                              ├─ matcher::match_term   (assertions)
//!                                              └─ rename::rename + unify::unify + recurse (rules)
//!                                                                  │
//!                                                                  v
//!                                                        Vec<Frame> (solutions)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `rename.rs`: hygienic fresh-renaming of a rule's variables before each
//!   application.
//! - `matcher.rs`: one-directional pattern-vs-data matching.
//! - `unify.rs`: two-directional unification with occurs check.
//! - `apply.rs`: the built-in `<`/`>` comparator primitives.
//! - `eval.rs`: the query evaluator itself, dispatching over connectives and
//!   resolving simple queries as a union of assertion hits and rule firings.
//! - `instantiate.rs`: substituting bindings into a term and rendering it as
//!   a parenthesized string.

mod apply;
mod instantiate;
mod matcher;
mod rename;
mod unify;

pub mod eval;

pub use instantiate::instantiate;
