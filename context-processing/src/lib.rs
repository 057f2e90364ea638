//! Builds and maintains a [`json_ld_core::Context`] from `@context` entries
//! (§4.1-§4.4): IRI resolution, term definition, the `apply_context` entry
//! point, and type-/property-scoped context stacking.
//!
//! This crate only knows about *contexts*. It never walks a node object or
//! emits a quad — that is the root crate's job, which depends on this one
//! the same way the teacher's `json-ld-expansion` depends on its
//! `json-ld-context-processing`.

mod define;
mod engine;
mod error;
mod iri;
mod scoping;

pub use define::{define, DefinedTerms};
pub use engine::apply_context;
pub use error::{ContextError, Result};
pub use iri::{expand_compact, expand_term, is_absolute, resolve_reference, ExpansionMode};
pub use scoping::{ScopeGuard, ScopeKind};
