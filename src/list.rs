//! RDF list materialisation (§4.6 `@list`): a JSON array becomes an
//! `rdf:first`/`rdf:rest` chain terminated by `rdf:nil`, one fresh blank
//! node per element.

use crate::node::NodeRef;
use json_ld_core::{BlankIdGenerator, GraphName, Object, QuadSink, RDF_FIRST, RDF_NIL, RDF_REST};

/// One RDF list element: whatever the value encoder or node walker
/// produced for it, ready to be placed as the object of an `rdf:first`
/// triple.
pub enum ListItem<'a> {
	Ref(NodeRef),
	Literal {
		lexical: String,
		language: Option<String>,
		datatype: Option<String>,
	},
	_Marker(std::marker::PhantomData<&'a ()>),
}

/// Emits the `rdf:first`/`rdf:rest` chain for `items` into `graph_name`,
/// returning the list's head (`rdf:nil`'s own IRI when `items` is empty —
/// represented here as `None`, since `rdf:nil` is a constant IRI rather
/// than a freshly minted node and callers already know to fall back to it).
pub fn build_list(
	items: Vec<ListItem<'_>>,
	graph_name: GraphName<'_>,
	blank: &mut BlankIdGenerator,
	sink: &mut dyn QuadSink,
) -> Option<NodeRef> {
	if items.is_empty() {
		return None;
	}

	let nodes: Vec<NodeRef> = (0..items.len())
		.map(|_| match blank.next_id() {
			json_ld_core::Id::Blank(label) => NodeRef::Blank(label),
			json_ld_core::Id::Iri(iri) => NodeRef::Iri(iri),
		})
		.collect();

	for (i, item) in items.into_iter().enumerate() {
		let cell = nodes[i].as_subject();
		let object = match &item {
			ListItem::Ref(r) => r.as_object(),
			ListItem::Literal {
				lexical,
				language,
				datatype,
			} => literal_object(lexical, language.as_deref(), datatype.as_deref()),
			ListItem::_Marker(_) => unreachable!(),
		};
		sink.accept(cell, RDF_FIRST, object, graph_name);

		let rest = match nodes.get(i + 1) {
			Some(next) => next.as_object(),
			None => Object::Iri(RDF_NIL),
		};
		sink.accept(cell, RDF_REST, rest, graph_name);
	}

	Some(nodes.into_iter().next().unwrap())
}

fn literal_object<'a>(lexical: &'a str, language: Option<&'a str>, datatype: Option<&'a str>) -> Object<'a> {
	use json_ld_core::{Literal, LiteralKind};
	let kind = match (language, datatype) {
		(Some(tag), _) => LiteralKind::Language(tag),
		(None, Some(dt)) => LiteralKind::Typed(dt),
		(None, None) => LiteralKind::Plain,
	};
	Object::Literal(Literal { lexical, kind })
}
