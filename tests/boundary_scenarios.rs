//! Black-box coverage for the documented boundary scenarios: transitive
//! keyword aliasing, protected-term redefinition, non-propagating
//! type-scoped contexts, list-of-lists under JSON-LD 1.0, JCS canonical
//! JSON literals, and RFC 3986 reference resolution.

use json_ld_core::{NoopLoader, OwnedQuad, OwnedTerm, ProcessingMode, VecSink};
use json_ld_syntax::parse;
use json_ld_to_rdf::{expand_to_rdf, Error, Options};

fn expand_with(json: &str, options: Options) -> Result<Vec<OwnedQuad>, Error> {
	let document = parse(json).expect("valid json");
	let mut sink = VecSink::default();
	let mut loader = NoopLoader;
    expand_to_rdf(&document, options, &mut loader, &mut sink)?;
	Ok(sink.quads)
}

fn expand(json: &str) -> Vec<OwnedQuad> {
	expand_with(json, Options::default()).expect("expansion succeeds")
}

#[test]
fn transitive_keyword_aliasing() {
	let quads = expand(
		r#"{
			"@context": {"t": "@type", "kind": "t"},
			"kind": "http://ex/C"
		}"#,
	);
	assert_eq!(quads.len(), 1);
	assert!(matches!(quads[0].subject, OwnedTerm::Blank(_)));
	assert_eq!(quads[0].predicate, json_ld_core::RDF_TYPE);
	assert_eq!(quads[0].object, OwnedTerm::Iri("http://ex/C".to_string()));
	assert!(quads[0].graph.is_none());
}

#[test]
fn protected_redefinition_rejected() {
	let err = expand_with(
		r#"{
			"@context": [
				{"@protected": true, "name": "http://ex/name"},
				{"name": "http://ex/other"}
			],
			"name": "x"
		}"#,
		Options::default(),
	)
	.unwrap_err();
	assert_eq!(err.code(), "protected term redefinition");
}

#[test]
fn protected_identical_redefinition_succeeds() {
	let quads = expand(
		r#"{
			"@context": [
				{"@protected": true, "name": "http://ex/name"},
				{"name": "http://ex/name"}
			],
			"@id": "http://ex/a",
			"name": "Ann"
		}"#,
	);
	assert_eq!(quads.len(), 1);
	assert_eq!(quads[0].predicate, "http://ex/name");
}

#[test]
fn type_scoped_context_does_not_propagate() {
	let quads = expand(
		r#"{
			"@context": {"Foo": {"@id": "http://ex/Foo", "@context": {"p": "http://ex/fp"}}},
			"@type": "Foo",
			"p": {"p": "x"}
		}"#,
	);
	// One rdf:type quad, one outer `p` quad pointing at the nested node; the
	// inner `p` on that nested node is unresolved (no vocab/base in scope
	// once the type-scoped context's non-propagation takes effect) and is
	// silently dropped rather than emitted.
	assert_eq!(quads.len(), 2);
	let type_quads: Vec<_> = quads.iter().filter(|q| q.predicate == json_ld_core::RDF_TYPE).collect();
	assert_eq!(type_quads.len(), 1);
	assert_eq!(type_quads[0].object, OwnedTerm::Iri("http://ex/Foo".to_string()));
	let prop_quads: Vec<_> = quads.iter().filter(|q| q.predicate == "http://ex/fp").collect();
	assert_eq!(prop_quads.len(), 1);
	assert!(matches!(prop_quads[0].object, OwnedTerm::Blank(_)));
}

#[test]
fn list_of_lists_rejected_in_1_0() {
	let options = Options {
		processing_mode: ProcessingMode::JsonLd1_0,
		..Options::default()
	};
	let err = expand_with(
		r#"{
			"@context": {"t": {"@id": "http://ex/t", "@container": "@list"}},
			"t": [[1, 2], [3]]
		}"#,
		options,
	)
	.unwrap_err();
	assert_eq!(err.code(), "list of lists");
}

#[test]
fn list_of_lists_allowed_in_1_1() {
	let quads = expand(
		r#"{
			"@context": {"t": {"@id": "http://ex/t", "@container": "@list"}},
			"t": [[1, 2], [3]]
		}"#,
	);
	// Two rdf:first cells for the outer list (one head node per nested
	// list), plus two rdf:first/rdf:rest pairs per inner list (2 + 1
	// elements) and two rdf:rest cells closing the outer list, plus one
	// triple linking the subject to the outer list's head.
	let first_quads: Vec<_> = quads.iter().filter(|q| q.predicate == json_ld_core::RDF_FIRST).collect();
	assert_eq!(first_quads.len(), 5); // 2 outer cells + 2 + 1 inner cells
	let link_quads: Vec<_> = quads.iter().filter(|q| q.predicate == "http://ex/t").collect();
	assert_eq!(link_quads.len(), 1);
}

#[test]
fn jcs_canonical_json_literal() {
	let quads = expand(
		r#"{
			"@context": {"j": {"@id": "http://ex/j", "@type": "@json"}},
			"j": {"b": 1, "a": 2}
		}"#,
	);
	assert_eq!(quads.len(), 1);
	match &quads[0].object {
		OwnedTerm::Literal { lexical, datatype, .. } => {
			assert_eq!(lexical, r#"{"a":2,"b":1}"#);
			assert_eq!(datatype.as_deref(), Some(json_ld_core::RDF_JSON));
		}
		other => panic!("expected a literal, got {other:?}"),
	}
}

#[test]
fn set_container_is_transparent() {
	let grouped = expand(
		r#"{"@context": {"t": {"@id": "http://ex/t", "@container": "@set"}}, "@id": "http://ex/s", "t": ["a", "b", "c"]}"#,
	);
	let mut separate = Vec::new();
	for v in ["a", "b", "c"] {
		separate.extend(expand(&format!(
			r#"{{"@context": {{"t": "http://ex/t"}}, "@id": "http://ex/s", "t": "{v}"}}"#
		)));
	}
	assert_eq!(grouped.len(), separate.len());
	for q in &grouped {
		assert!(separate.contains(q));
	}
}

#[test]
fn protected_term_state_does_not_leak_across_properties() {
	// A non-propagating type-scoped context applied while processing one
	// node must not leave its terms visible to a sibling-level property
	// processed afterwards against the same base frame.
	let quads = expand(
		r#"{
			"@context": {
				"Foo": {"@id": "http://ex/Foo", "@context": {"p": "http://ex/fp"}},
				"q": "http://ex/q"
			},
			"@id": "http://ex/a",
			"q": {"@type": "Foo", "p": "nested"},
			"p": "top-level"
		}"#,
	);
	// `p` is undefined at the top level (the type-scoped context that
	// defines it never propagated out), so the top-level `p` property is
	// silently dropped; only `q`'s own link and the nested node's `p`-via-
	// `http://ex/fp` survive.
	let top_level_p = quads.iter().any(|q| q.subject == OwnedTerm::Iri("http://ex/a".to_string()) && q.predicate == "http://ex/fp");
	assert!(!top_level_p);
}

#[test]
fn property_scoped_context_applies_and_propagates_by_default() {
	// `p`'s own scoped context defines `q`; by default (no `@propagate`)
	// a property-scoped context keeps applying to node objects nested
	// arbitrarily deep inside the property's value, unlike a type-scoped
	// one.
	let quads = expand(
		r#"{
			"@context": {"p": {"@id": "http://ex/p", "@context": {"q": "http://ex/q"}}},
			"@id": "http://ex/a",
			"p": {"@id": "http://ex/b", "q": "first", "p": {"@id": "http://ex/c", "q": "second"}}
		}"#,
	);
	let q_quads: Vec<_> = quads.iter().filter(|qd| qd.predicate == "http://ex/q").collect();
	assert_eq!(q_quads.len(), 2);
	assert!(q_quads.iter().any(|qd| qd.subject == OwnedTerm::Iri("http://ex/b".to_string())));
	assert!(q_quads.iter().any(|qd| qd.subject == OwnedTerm::Iri("http://ex/c".to_string())));
}

#[test]
fn property_scoped_context_does_not_leak_to_sibling_properties() {
	// `p`'s scoped context defines `q`; a sibling property `r` on the same
	// node must not see it.
	let quads = expand(
		r#"{
			"@context": {
				"p": {"@id": "http://ex/p", "@context": {"q": "http://ex/q"}},
				"r": "http://ex/r"
			},
			"@id": "http://ex/a",
			"p": {"@id": "http://ex/b", "q": "v"},
			"r": {"q": "unresolved"}
		}"#,
	);
	assert!(quads.iter().any(|qd| qd.predicate == "http://ex/q"));
	let leaked = quads
		.iter()
		.any(|qd| qd.predicate == "http://ex/q" && qd.subject != OwnedTerm::Iri("http://ex/b".to_string()));
	assert!(!leaked);
}

#[test]
fn json_typed_null_value_encodes_as_literal_null() {
	let quads = expand(
		r#"{
			"@id": "http://ex/a",
			"http://ex/j": {"@value": null, "@type": "@json"}
		}"#,
	);
	assert_eq!(quads.len(), 1);
	match &quads[0].object {
		OwnedTerm::Literal { lexical, datatype, .. } => {
			assert_eq!(lexical, "null");
			assert_eq!(datatype.as_deref(), Some(json_ld_core::RDF_JSON));
		}
		other => panic!("expected a literal, got {other:?}"),
	}
}

#[test]
fn custom_datatype_coercion_uses_canonical_double_form() {
	let quads = expand(
		r#"{
			"@context": {"t": {"@id": "http://ex/t", "@type": "http://ex/custom"}},
			"@id": "http://ex/a",
			"t": 1.50
		}"#,
	);
	assert_eq!(quads.len(), 1);
	match &quads[0].object {
		OwnedTerm::Literal { lexical, datatype, .. } => {
			assert_eq!(datatype.as_deref(), Some("http://ex/custom"));
			assert_ne!(lexical, "1.50");
			assert!(lexical.to_ascii_uppercase().contains('E'));
		}
		other => panic!("expected a literal, got {other:?}"),
	}
}

#[test]
fn id_alongside_list_is_rejected() {
	let err = expand_with(
		r#"{
			"@id": "http://ex/a",
			"http://ex/t": {"@list": [1, 2], "@id": "http://ex/x"}
		}"#,
		Options::default(),
	)
	.unwrap_err();
	assert_eq!(err.code(), "invalid set or list object");
}

#[test]
fn non_string_type_entry_is_rejected() {
	let err = expand_with(
		r#"{"@id": "http://ex/a", "@type": [42]}"#,
		Options::default(),
	)
	.unwrap_err();
	assert_eq!(err.code(), "invalid type value");
}

#[test]
fn keyword_aliasing_rejected_in_1_0_mode() {
	let options = Options {
		processing_mode: ProcessingMode::JsonLd1_0,
		..Options::default()
	};
	let err = expand_with(
		r#"{"@context": {"t": "@type"}, "t": "http://ex/C"}"#,
		options,
	)
	.unwrap_err();
	assert_eq!(err.code(), "invalid keyword alias");
}

#[test]
fn unknown_keyword_in_term_definition_is_rejected() {
	let err = expand_with(
		r#"{
			"@context": {"name": {"@id": "http://ex/name", "@frobnicate": true}},
			"name": "x"
		}"#,
		Options::default(),
	)
	.unwrap_err();
	assert_eq!(err.code(), "invalid term definition");
}

#[test]
fn rfc3986_relative_reference_resolution() {
	let resolved = json_ld_context_processing::resolve_reference(Some("http://ex/a/b"), "../c?q#f");
	assert_eq!(resolved.as_deref(), Some("http://ex/c?q#f"));
}

#[test]
fn graph_container_with_id_names_graph_by_key() {
	let quads = expand(
		r#"{
			"@context": {"g": {"@id": "http://ex/g", "@container": ["@graph", "@id"]}},
			"@id": "http://ex/s",
			"g": {"http://ex/named": {"http://ex/p": "v"}}
		}"#,
	);
	let link = quads.iter().find(|q| q.predicate == "http://ex/g").expect("graph link emitted");
	assert_eq!(link.object, OwnedTerm::Iri("http://ex/named".to_string()));
	let inner = quads
		.iter()
		.find(|q| q.predicate == "http://ex/p")
		.expect("inner triple emitted into the named graph");
	assert_eq!(inner.graph, Some(OwnedTerm::Iri("http://ex/named".to_string())));
}

#[test]
fn malformed_index_property_drops_index_triple_not_whole_value() {
	// `@index` names an index property with no colon and no `@vocab` in
	// scope, so it can't resolve to a well-formed (scheme-bearing)
	// predicate; the indexed value itself must still expand normally.
	let quads = expand(
		r#"{
			"@context": {"t": {"@id": "http://ex/t", "@container": "@index", "@index": "idxProp"}},
			"@id": "http://ex/s",
			"t": {"k1": "v1"}
		}"#,
	);
	assert_eq!(quads.len(), 1);
	assert_eq!(quads[0].predicate, "http://ex/t");
	assert!(!quads.iter().any(|q| q.predicate.contains("idxProp")));
}

#[test]
fn relative_id_resolves_against_document_base() {
	let quads = expand_with(
		r#"{"@id": "../c", "http://ex/name": "x"}"#,
		Options {
			base: Some("http://ex/a/b".to_string()),
			..Options::default()
		},
	)
	.expect("expansion succeeds");
	assert_eq!(quads.len(), 1);
	assert_eq!(quads[0].subject, OwnedTerm::Iri("http://ex/c".to_string()));
}
