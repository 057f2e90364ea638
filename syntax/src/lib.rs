//! Raw JSON-LD syntax: keywords, containers, and the JSON DOM the
//! transducer is built over.
//!
//! This crate only knows about *shapes*, never about what a term resolves
//! to or whether a document is valid JSON-LD — that is
//! `json-ld-context-processing`'s and the root crate's job. Keeping the
//! keyword/container vocabulary here, separate from the context engine,
//! mirrors how the teacher codebase splits `json-ld-syntax` out from
//! `json-ld-context-processing` and `json-ld-core`.

mod compact_iri;
mod container;
mod direction;
mod json;
mod keyword;
mod lang;
mod nullable;
mod parse;

pub use compact_iri::CompactIri;
pub use container::{Container, ContainerKind};
pub use direction::Direction;
pub use json::{Number, Value};
pub use keyword::{is_keyword_like, Keyword};
pub use lang::LenientLanguageTagBuf;
pub use nullable::Nullable;
pub use parse::{parse, ParseError};

/// The permitted keys of a term definition object (§4.2). Any other
/// `@`-prefixed key in a term definition is an `invalid term definition`
/// error.
pub const TERM_DEFINITION_KEYS: &[&str] = &[
	"@id",
	"@type",
	"@container",
	"@context",
	"@language",
	"@direction",
	"@reverse",
	"@protected",
	"@prefix",
	"@nest",
	"@propagate",
	"@index",
];

/// The context-level keys recognised at the top of an `@context` object,
/// as opposed to term bindings.
pub const CONTEXT_LEVEL_KEYS: &[&str] = &[
	"@base",
	"@vocab",
	"@language",
	"@direction",
	"@version",
	"@propagate",
	"@protected",
	"@import",
];
