//! The container dispatcher (§4.6): routes one property's JSON value
//! through the container semantics recorded on its term definition,
//! emitting `(subject, predicate, object, graph)` quads via the node
//! walker's [`Walker`].

use crate::error::{Error, Result};
use crate::list::{build_list, ListItem};
use crate::node::{expand_element, NodeRef};
use crate::value::{encode_scalar, encode_value_object, Encoded};
use crate::Walker;
use indexmap::IndexMap;
use json_ld_context_processing::{expand_term, ExpansionMode};
use json_ld_core::{Context, GraphName, Object, Override, Term, TermDefinition, TypeCoercion};
use json_ld_syntax::{Container, ContainerKind, Value};

/// Entry point called once per ordinary (forward, non-reverse) property
/// found on a node (§4.5 step 7c).
#[allow(clippy::too_many_arguments)]
pub fn expand_property_value(
	predicate: &str,
	term_def: Option<&TermDefinition>,
	val: &Value,
	frame: &Context,
	child_base_context: &Context,
	subject: &NodeRef,
	graph: GraphName<'_>,
	walker: &mut Walker<'_>,
) -> Result<()> {
	let container = term_def.map(|d| d.container).unwrap_or_default();

	if container.contains(ContainerKind::List) {
		return expand_list_container(predicate, term_def, val, frame, subject, graph, walker);
	}
	if container.contains(ContainerKind::Graph) {
		return expand_graph_container(predicate, term_def, container, val, child_base_context, subject, graph, walker);
	}
	if container.contains(ContainerKind::Language) {
		return expand_language_container(predicate, val, subject, graph, walker);
	}
	if container.contains(ContainerKind::Index) && !container.contains(ContainerKind::Id) && !container.contains(ContainerKind::Type) {
		return expand_index_container(predicate, term_def, val, frame, child_base_context, subject, graph, walker);
	}
	if container.contains(ContainerKind::Id) {
		return expand_id_container(predicate, val, child_base_context, subject, graph, walker);
	}
	if container.contains(ContainerKind::Type) {
		return expand_type_container(predicate, val, child_base_context, subject, graph, walker);
	}

	// `@set` or no container: every element of an implicit or explicit
	// array is an independent value.
	for item in val.as_slice_of_values() {
		expand_plain_item(predicate, term_def, item, frame, child_base_context, subject, graph, walker)?;
	}
	Ok(())
}

fn language_and_direction(term_def: Option<&TermDefinition>, frame: &Context) -> (Option<String>, Option<json_ld_syntax::Direction>) {
	let language = match term_def.map(|d| &d.language) {
		Some(Override::Explicit(tag)) => Some(tag.as_str().to_string()),
		Some(Override::None) => None,
		Some(Override::Inherit) | None => frame.default_language().map(|t| t.as_str().to_string()),
	};
	let direction = match term_def.map(|d| d.direction) {
		Some(Override::Explicit(dir)) => Some(dir),
		Some(Override::None) => None,
		Some(Override::Inherit) | None => frame.default_direction(),
	};
	(language, direction)
}

fn expand_plain_item(
	predicate: &str,
	term_def: Option<&TermDefinition>,
	item: &Value,
	frame: &Context,
	child_base_context: &Context,
	subject: &NodeRef,
	graph: GraphName<'_>,
	walker: &mut Walker<'_>,
) -> Result<()> {
	if let Some(obj) = item.as_object() {
		if obj.contains_key("@value") {
			let Some(encoded) = encode_value_object(obj, frame, graph, walker)? else {
				return Ok(());
			};
			walker.sink.accept(subject.as_subject(), predicate, encoded.as_object(), graph);
			return Ok(());
		}
		if obj.contains_key("@list") {
			if obj.contains_key("@id") {
				return Err(Error::InvalidSetOrListObject);
			}
			let list_val = obj.get("@list").unwrap();
			return expand_list_value(predicate, term_def, list_val, frame, subject, graph, walker);
		}
		let Some(value_node) = expand_element(item, child_base_context, graph, walker)? else {
			return Ok(());
		};
		walker.sink.accept(subject.as_subject(), predicate, value_node.as_object(), graph);
		return Ok(());
	}

	if item.is_null() {
		return Ok(());
	}

	let coercion = term_def.and_then(|d| d.type_coercion.as_ref());
	let (language, direction) = language_and_direction(term_def, frame);
	let Some(encoded) = encode_scalar(item, coercion, language.as_deref(), direction, frame, graph, walker)? else {
		return Ok(());
	};
	walker.sink.accept(subject.as_subject(), predicate, encoded.as_object(), graph);
	Ok(())
}

fn expand_list_container(
	predicate: &str,
	term_def: Option<&TermDefinition>,
	val: &Value,
	frame: &Context,
	subject: &NodeRef,
	graph: GraphName<'_>,
	walker: &mut Walker<'_>,
) -> Result<()> {
	let items: Vec<&Value> = match val {
		Value::Object(obj) if obj.contains_key("@list") => {
			if obj.contains_key("@id") {
				return Err(Error::InvalidSetOrListObject);
			}
			obj.get("@list").unwrap().as_slice_of_values()
		}
		other => other.as_slice_of_values(),
	};
	expand_list_value(predicate, term_def, &Value::Array(items.into_iter().cloned().collect()), frame, subject, graph, walker)
}

fn expand_list_value(
	predicate: &str,
	term_def: Option<&TermDefinition>,
	list_val: &Value,
	frame: &Context,
	subject: &NodeRef,
	graph: GraphName<'_>,
	walker: &mut Walker<'_>,
) -> Result<()> {
	let elements = list_val.as_slice_of_values();
	let coercion = term_def.and_then(|d| d.type_coercion.as_ref());
	let (language, direction) = language_and_direction(term_def, frame);

	let mut items = Vec::with_capacity(elements.len());
	for element in elements {
		if element.is_array() {
			if frame.processing_mode().is_1_0() {
				return Err(Error::ListOfLists);
			}
			let nested = build_nested_list(term_def, element, frame, graph, walker)?;
			if let Some(node) = nested {
				items.push(ListItem::Ref(node));
			}
			continue;
		}
		if let Some(obj) = element.as_object() {
			if obj.contains_key("@list") {
				if frame.processing_mode().is_1_0() {
					return Err(Error::ListOfLists);
				}
				let nested = build_nested_list(term_def, obj.get("@list").unwrap(), frame, graph, walker)?;
				if let Some(node) = nested {
					items.push(ListItem::Ref(node));
				}
				continue;
			}
			if obj.contains_key("@value") {
				match encode_value_object(obj, frame, graph, walker)? {
					Some(Encoded::Literal { lexical, language, datatype }) => {
						items.push(ListItem::Literal { lexical, language, datatype });
					}
					Some(Encoded::Ref(node)) => items.push(ListItem::Ref(node)),
					None => {}
				}
				continue;
			}
			if let Some(node) = expand_element(element, frame, graph, walker)? {
				items.push(ListItem::Ref(node));
			}
			continue;
		}
		if element.is_null() {
			continue;
		}
		match encode_scalar(element, coercion, language.as_deref(), direction, frame, graph, walker)? {
			Some(Encoded::Literal { lexical, language, datatype }) => items.push(ListItem::Literal { lexical, language, datatype }),
			Some(Encoded::Ref(node)) => items.push(ListItem::Ref(node)),
			None => {}
		}
	}

	let head = build_list(items, graph, &mut walker.blank, walker.sink);
	let object = match &head {
		Some(node) => node.as_object(),
		None => Object::Iri(json_ld_core::RDF_NIL),
	};
	walker.sink.accept(subject.as_subject(), predicate, object, graph);
	Ok(())
}

fn build_nested_list(
	term_def: Option<&TermDefinition>,
	inner: &Value,
	frame: &Context,
	graph: GraphName<'_>,
	walker: &mut Walker<'_>,
) -> Result<Option<NodeRef>> {
	let elements = inner.as_slice_of_values();
	let coercion = term_def.and_then(|d| d.type_coercion.as_ref());
	let (language, direction) = language_and_direction(term_def, frame);
	let mut items = Vec::with_capacity(elements.len());
	for element in elements {
		if let Some(obj) = element.as_object() {
			if obj.contains_key("@value") {
				if let Some(Encoded::Literal { lexical, language, datatype }) = encode_value_object(obj, frame, graph, walker)? {
					items.push(ListItem::Literal { lexical, language, datatype });
				}
				continue;
			}
			if let Some(node) = expand_element(element, frame, graph, walker)? {
				items.push(ListItem::Ref(node));
			}
			continue;
		}
		if let Some(Encoded::Literal { lexical, language, datatype }) =
			encode_scalar(element, coercion, language.as_deref(), direction, frame, graph, walker)?
		{
			items.push(ListItem::Literal { lexical, language, datatype });
		}
	}
	Ok(build_list(items, graph, &mut walker.blank, walker.sink))
}

fn expand_language_container(predicate: &str, val: &Value, subject: &NodeRef, graph: GraphName<'_>, walker: &mut Walker<'_>) -> Result<()> {
	let Some(map) = val.as_object() else {
		return Ok(());
	};
	for (tag, values) in map.iter() {
		let language = if tag == "@none" { None } else { Some(tag.clone()) };
		for item in values.as_slice_of_values() {
			let Value::String(lexical) = item else { continue };
			let object = Object::Literal(json_ld_core::Literal {
				lexical: lexical.as_str(),
				kind: match &language {
					Some(tag) => json_ld_core::LiteralKind::Language(tag),
					None => json_ld_core::LiteralKind::Plain,
				},
			});
			walker.sink.accept(subject.as_subject(), predicate, object, graph);
		}
	}
	Ok(())
}

#[allow(clippy::too_many_arguments)]
fn expand_index_container(
	predicate: &str,
	term_def: Option<&TermDefinition>,
	val: &Value,
	frame: &Context,
	child_base_context: &Context,
	subject: &NodeRef,
	graph: GraphName<'_>,
	walker: &mut Walker<'_>,
) -> Result<()> {
	let Some(map) = val.as_object() else {
		return Ok(());
	};
	let index_property = term_def.and_then(|d| d.index_property.as_deref());
	let index_coercion = index_property.and_then(|p| frame.get(p)).and_then(|d| d.type_coercion.as_ref());

	for (key, values) in map.iter() {
		for item in values.as_slice_of_values() {
			// The plain processing of this value is independent of whether
			// it can also carry the extra index triple: a literal value
			// has no subject of its own to attach it to.
			let node_for_item = match item.as_object() {
				Some(obj) if !obj.contains_key("@value") => expand_element(item, child_base_context, graph, walker)?,
				_ => {
					expand_plain_item(predicate, term_def, item, frame, child_base_context, subject, graph, walker)?;
					None
				}
			};
			if let Some(node) = &node_for_item {
				walker.sink.accept(subject.as_subject(), predicate, node.as_object(), graph);
			}

			if key == "@none" {
				continue;
			}
			let (Some(index_property), Some(node)) = (index_property, &node_for_item) else {
				continue;
			};
			let prop_iri = match expand_term(frame, index_property, ExpansionMode::ForPredicate) {
				Term::Iri(iri) if !iri.is_empty() && json_ld_core::is_well_formed_iri(&iri) => iri,
				_ => continue,
			};
			let expanded_key_iri = match index_coercion {
				Some(TypeCoercion::Id) | Some(TypeCoercion::Vocab) => match expand_term(frame, key, ExpansionMode::ForIdKeyword) {
					Term::Iri(iri) if json_ld_core::is_well_formed_iri(&iri) => Some(iri),
					_ => None,
				},
				_ => None,
			};
			let object = match &expanded_key_iri {
				Some(iri) => Object::Iri(iri),
				None => Object::Literal(json_ld_core::Literal::plain(key)),
			};
			walker.sink.accept(node.as_subject(), &prop_iri, object, graph);
		}
	}
	Ok(())
}

fn expand_id_container(predicate: &str, val: &Value, child_base_context: &Context, subject: &NodeRef, graph: GraphName<'_>, walker: &mut Walker<'_>) -> Result<()> {
	let Some(map) = val.as_object() else {
		return Ok(());
	};
	for (key, node_val) in map.iter() {
		let synthetic = inject_id(key, node_val, child_base_context);
		let Some(value_node) = expand_element(&synthetic, child_base_context, graph, walker)? else {
			continue;
		};
		walker.sink.accept(subject.as_subject(), predicate, value_node.as_object(), graph);
	}
	Ok(())
}

fn inject_id(key: &str, node_val: &Value, _frame: &Context) -> Value {
	let mut obj: IndexMap<String, Value> = node_val.as_object().cloned().unwrap_or_default();
	if key != "@none" && !obj.contains_key("@id") {
		obj.insert("@id".to_string(), Value::String(key.to_string()));
	}
	Value::Object(obj)
}

fn expand_type_container(predicate: &str, val: &Value, child_base_context: &Context, subject: &NodeRef, graph: GraphName<'_>, walker: &mut Walker<'_>) -> Result<()> {
	let Some(map) = val.as_object() else {
		return Ok(());
	};
	for (key, entry) in map.iter() {
		if let Some(s) = entry.as_str() {
			match expand_term(child_base_context, s, ExpansionMode::ForIdKeyword) {
				Term::Iri(iri) if json_ld_core::is_well_formed_iri(&iri) => {
					walker.sink.accept(subject.as_subject(), predicate, Object::Iri(&iri), graph);
				}
				Term::Blank(label) => {
					walker.sink.accept(subject.as_subject(), predicate, Object::Blank(&label), graph);
				}
				_ => {}
			}
			continue;
		}
		let synthetic = inject_type(key, entry);
		let Some(value_node) = expand_element(&synthetic, child_base_context, graph, walker)? else {
			continue;
		};
		walker.sink.accept(subject.as_subject(), predicate, value_node.as_object(), graph);
	}
	Ok(())
}

fn inject_type(key: &str, node_val: &Value) -> Value {
	let mut obj: IndexMap<String, Value> = node_val.as_object().cloned().unwrap_or_default();
	if key == "@none" {
		return Value::Object(obj);
	}
	let existing = obj.remove("@type");
	let mut types = match existing {
		Some(Value::Array(items)) => items,
		Some(other) => vec![other],
		None => Vec::new(),
	};
	types.push(Value::String(key.to_string()));
	obj.insert("@type".to_string(), Value::Array(types));
	Value::Object(obj)
}

#[allow(clippy::too_many_arguments)]
fn expand_graph_container(
	predicate: &str,
	term_def: Option<&TermDefinition>,
	container: Container,
	val: &Value,
	child_base_context: &Context,
	subject: &NodeRef,
	graph: GraphName<'_>,
	walker: &mut Walker<'_>,
) -> Result<()> {
	let _ = term_def;
	if container.contains(ContainerKind::Id) {
		let Some(map) = val.as_object() else { return Ok(()) };
		for (key, contents) in map.iter() {
			let graph_name = if key == "@none" {
				Some(NodeRef::from_id(walker.blank.next_id()))
			} else {
				match expand_term(child_base_context, key, ExpansionMode::ForIdKeyword) {
					Term::Iri(iri) if json_ld_core::is_well_formed_iri(&iri) => Some(NodeRef::Iri(iri)),
					Term::Blank(label) => Some(NodeRef::Blank(label)),
					_ => None,
				}
			};
			let Some(graph_name) = graph_name else {
				log::trace!("dropping @graph entry with unresolvable graph name {key:?}");
				continue;
			};
			for item in contents.as_slice_of_values() {
				expand_element(item, child_base_context, graph_name.as_graph_name(), walker)?;
			}
			walker.sink.accept(subject.as_subject(), predicate, graph_name.as_object(), graph);
		}
		return Ok(());
	}

	// Plain `@graph` or `@graph` + `@index`: one fresh blank node per
	// top-level element; the index key (if any) only groups, it never
	// names the graph.
	let elements: Vec<&Value> = match val {
		Value::Object(map) if container.contains(ContainerKind::Index) => {
			map.values().flat_map(|v| v.as_slice_of_values()).collect()
		}
		other => other.as_slice_of_values(),
	};
	for element in elements {
		let graph_name = NodeRef::from_id(walker.blank.next_id());
		expand_element(element, child_base_context, graph_name.as_graph_name(), walker)?;
		walker.sink.accept(subject.as_subject(), predicate, graph_name.as_object(), graph);
	}
	Ok(())
}
