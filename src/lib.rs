//! Expands a JSON-LD document straight into RDF quads: one depth-first
//! walk that applies `@context` processing and emits triples/quads as it
//! goes, rather than materialising an intermediate expanded JSON tree
//! first. `json-ld-context-processing` supplies the frame; this crate
//! only adds the node walker, container dispatcher, value encoder, list
//! builder, and JCS canonicaliser layered on top of it.

mod container;
mod element;
mod error;
mod jcs;
mod list;
mod node;
mod options;
mod value;

pub use error::{Error, Result};
pub use options::Options;

use json_ld_core::{BlankIdGenerator, Context, ContextLoader, QuadSink};
use json_ld_syntax::Value;

/// The mutable state threaded through one document's walk: where fresh
/// blank-node labels come from, where quads go, where remote contexts are
/// fetched from, and the caller's configuration. Borrowed, never owned,
/// by every walker/container/value function — exactly one `Walker`
/// exists per call to [`expand_to_rdf`].
pub struct Walker<'a> {
	pub(crate) loader: &'a mut dyn ContextLoader,
	pub(crate) sink: &'a mut dyn QuadSink,
	pub(crate) blank: BlankIdGenerator,
	pub(crate) options: Options,
}

/// Expands `document` and emits every quad it denotes to `sink` (§4.5-§4.9).
///
/// `loader` resolves any `@context` entry that names a remote IRI or an
/// `@import`; pass [`json_ld_core::NoopLoader`] when the document and all
/// its contexts are already fully inline.
pub fn expand_to_rdf(
	document: &Value,
	options: Options,
	loader: &mut dyn ContextLoader,
	sink: &mut dyn QuadSink,
) -> Result<()> {
	let context = Context::new(options.base.clone(), options.processing_mode);
	let mut walker = Walker {
		loader,
		sink,
		blank: BlankIdGenerator::new(),
		options,
	};
	element::expand_document(document, &context, &mut walker)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use json_ld_core::{NoopLoader, OwnedTerm, VecSink};
	use json_ld_syntax::parse;

	fn expand(json: &str) -> Vec<json_ld_core::OwnedQuad> {
		let document = parse(json).expect("valid json");
		let mut sink = VecSink::default();
		let mut loader = NoopLoader;
		expand_to_rdf(&document, Options::default(), &mut loader, &mut sink).expect("expansion succeeds");
		sink.quads
	}

	#[test]
	fn expands_a_plain_property() {
		let quads = expand(r#"{"@id": "http://example.org/a", "http://example.org/name": "Ann"}"#);
		assert_eq!(quads.len(), 1);
		assert_eq!(quads[0].subject, OwnedTerm::Iri("http://example.org/a".to_string()));
		assert_eq!(quads[0].predicate, "http://example.org/name");
		assert_eq!(
			quads[0].object,
			OwnedTerm::Literal {
				lexical: "Ann".to_string(),
				language: None,
				datatype: None,
			}
		);
	}

	#[test]
	fn mints_a_blank_node_when_no_id_given() {
		let quads = expand(r#"{"http://example.org/name": "Ann"}"#);
		assert_eq!(quads.len(), 1);
		assert!(matches!(quads[0].subject, OwnedTerm::Blank(_)));
	}

	#[test]
	fn expands_type_with_context_alias() {
		let quads = expand(
			r#"{
				"@context": {"Person": "http://example.org/Person"},
				"@id": "http://example.org/a",
				"@type": "Person"
			}"#,
		);
		assert_eq!(quads.len(), 1);
		assert_eq!(quads[0].predicate, json_ld_core::RDF_TYPE);
		assert_eq!(quads[0].object, OwnedTerm::Iri("http://example.org/Person".to_string()));
	}
}
