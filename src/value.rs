//! The value encoder (§4.7): turns a JSON scalar or `@value` object into
//! the literal (or, for `@type: @id`/`@vocab` coercion, the node
//! reference) it denotes.
//!
//! Grounded in the teacher's `core/src/rdf/mod.rs` literal-conversion
//! match (`value::Literal::Number`/`Boolean`/`String` arms) and its
//! `pretty_dtoa`-based canonical double formatting, generalised to the
//! coercion and `@direction` rules this format layers on top.

use crate::error::{Error, Result};
use crate::node::NodeRef;
use crate::Walker;
use indexmap::IndexMap;
use json_ld_context_processing::{expand_term, ExpansionMode};
use json_ld_core::{
	Context, GraphName, Id, Literal, LiteralKind, Object, RdfDirectionMode, Term, TypeCoercion, I18N_NS, RDF_DIRECTION,
	RDF_JSON, RDF_LANGUAGE, RDF_VALUE, XSD_BOOLEAN, XSD_DOUBLE, XSD_INTEGER, XSD_STRING,
};
use json_ld_syntax::{Direction, Number, Value};

/// <https://www.w3.org/TR/xmlschema11-2/#f-doubleLexmap>
const XSD_CANONICAL_FLOAT: pretty_dtoa::FmtFloatConfig =
	pretty_dtoa::FmtFloatConfig::default().force_e_notation().capitalize_e(true);

/// Whatever the value encoder produced: a plain/language/typed literal, or
/// (only reachable through `@type: @id`/`@vocab` coercion, or through
/// compound-literal `@direction` encoding) a node to link to instead.
pub enum Encoded {
	Literal {
		lexical: String,
		language: Option<String>,
		datatype: Option<String>,
	},
	Ref(NodeRef),
}

impl Encoded {
	pub fn as_object(&self) -> Object<'_> {
		match self {
			Encoded::Ref(r) => r.as_object(),
			Encoded::Literal { lexical, language, datatype } => {
				let kind = match (language, datatype) {
					(Some(tag), _) => LiteralKind::Language(tag),
					(None, Some(dt)) => LiteralKind::Typed(dt),
					(None, None) => LiteralKind::Plain,
				};
				Object::Literal(Literal { lexical, kind })
			}
		}
	}
}

/// Encodes a bare JSON scalar (string/number/boolean; `null` has nothing to
/// encode) found directly as a property value, honoring the active term's
/// type coercion. `language`/`direction` are the frame's defaults, already
/// narrowed by any `language`/`direction` term override the caller applied.
pub fn encode_scalar(
	value: &Value,
	coercion: Option<&TypeCoercion>,
	language: Option<&str>,
	direction: Option<Direction>,
	frame: &Context,
	graph: GraphName<'_>,
	walker: &mut Walker<'_>,
) -> Result<Option<Encoded>> {
	let encoded = match coercion {
		Some(TypeCoercion::Id) | Some(TypeCoercion::Vocab) => {
			let Some(s) = value.as_str() else {
				return Ok(Some(plain_scalar(value, language)?));
			};
			let mode = if matches!(coercion, Some(TypeCoercion::Vocab)) {
				ExpansionMode::ForIdCoerced
			} else {
				ExpansionMode::ForIdKeyword
			};
			match expand_term(frame, s, mode) {
				Term::Iri(iri) if json_ld_core::is_well_formed_iri(&iri) => Some(Encoded::Ref(NodeRef::Iri(iri))),
				Term::Blank(label) => Some(Encoded::Ref(NodeRef::Blank(label))),
				_ => None,
			}
		}
		Some(TypeCoercion::Datatype(dt)) => Some(Encoded::Literal {
			lexical: scalar_lexical(value)?,
			language: None,
			datatype: Some(dt.clone()),
		}),
		Some(TypeCoercion::Json) => Some(Encoded::Literal {
			lexical: crate::jcs::canonicalize(value),
			language: None,
			datatype: Some(RDF_JSON.to_string()),
		}),
		Some(TypeCoercion::None) | None => Some(plain_scalar(value, language)?),
	};
	Ok(encoded.and_then(|e| apply_direction(e, direction, graph, walker)))
}

fn scalar_lexical(value: &Value) -> Result<String> {
	match value {
		Value::String(s) => Ok(s.clone()),
		Value::Number(n) => Ok(number_lexical(n).0),
		Value::Boolean(b) => Ok(b.to_string()),
		Value::Null | Value::Array(_) | Value::Object(_) => Err(Error::InvalidTypedValue),
	}
}

fn plain_scalar(value: &Value, language: Option<&str>) -> Result<Encoded> {
	match value {
		Value::String(s) => Ok(Encoded::Literal {
			lexical: s.clone(),
			language: language.map(str::to_string),
			datatype: None,
		}),
		Value::Boolean(b) => Ok(Encoded::Literal {
			lexical: b.to_string(),
			language: None,
			datatype: Some(XSD_BOOLEAN.to_string()),
		}),
		Value::Number(n) => Ok(number_literal(n)),
		Value::Null | Value::Array(_) | Value::Object(_) => Err(Error::InvalidValueObjectValue),
	}
}

/// §4.7's integer/double split: a lexically-integer number in the
/// `[-10^21, 10^21)` range stays verbatim (and maps to `xsd:integer` when
/// nothing else coerces it); everything else (fractional, exponent-
/// bearing, or out of range) becomes canonical double form regardless of
/// which datatype it ends up tagged with.
fn number_lexical(n: &Number) -> (String, bool) {
	const RANGE: i128 = 1_000_000_000_000_000_000_000;
	if let Some(i) = n.as_i128() {
		if i > -RANGE && i < RANGE {
			return (i.to_string(), true);
		}
	}
	(pretty_dtoa::dtoa(n.as_f64_lossy(), XSD_CANONICAL_FLOAT), false)
}

fn number_literal(n: &Number) -> Encoded {
	let (lexical, is_integer) = number_lexical(n);
	Encoded::Literal {
		lexical,
		language: None,
		datatype: Some(if is_integer { XSD_INTEGER.to_string() } else { XSD_DOUBLE.to_string() }),
	}
}

/// Processes a `@value` object's entries directly (§4.7), rather than
/// going through [`encode_scalar`] — a value object may carry its own
/// `@type`/`@language`/`@direction` independent of any term coercion.
pub fn encode_value_object(
	obj: &IndexMap<String, Value>,
	frame: &Context,
	graph: GraphName<'_>,
	walker: &mut Walker<'_>,
) -> Result<Option<Encoded>> {
	let raw = obj.get("@value").ok_or(Error::InvalidValueObject)?;
	let type_entry = obj.get("@type");
	let language_entry = obj.get("@language");
	let direction_entry = obj.get("@direction");

	// `@value: null` normally drops the whole value object, except when
	// `@type: @json` is present — `null` is itself valid JSON and encodes
	// to the literal "null" rather than being dropped.
	let is_json_typed = matches!(type_entry, Some(Value::String(s)) if s == "@json");
	if raw.is_null() && !is_json_typed {
		return Ok(None);
	}
	if type_entry.is_some() && (language_entry.is_some() || direction_entry.is_some()) {
		return Err(Error::InvalidValueObject);
	}

	if let Some(type_value) = type_entry {
		let type_str = type_value.as_str().ok_or(Error::InvalidTypedValue)?;
		if type_str == "@json" {
			return Ok(Some(Encoded::Literal {
				lexical: crate::jcs::canonicalize(raw),
				language: None,
				datatype: Some(RDF_JSON.to_string()),
			}));
		}
		let lexical = scalar_lexical(raw)?;
		let datatype = match expand_term(frame, type_str, ExpansionMode::ForDatatype) {
			Term::Iri(iri) if json_ld_core::is_well_formed_iri(&iri) => iri,
			_ => return Err(Error::InvalidTypedValue),
		};
		return Ok(Some(Encoded::Literal {
			lexical,
			language: None,
			datatype: Some(datatype),
		}));
	}

	if language_entry.is_some() || direction_entry.is_some() {
		let Value::String(lexical) = raw else {
			return Err(Error::InvalidLanguageTaggedValue);
		};
		let language = match language_entry {
			Some(Value::String(tag)) => Some(tag.clone()),
			Some(Value::Null) | None => None,
			_ => return Err(Error::InvalidLanguageTaggedString),
		};
		let direction = match direction_entry {
			Some(Value::String(s)) => Some(Direction::try_from(s.as_str()).map_err(|_| Error::InvalidValueObjectValue)?),
			Some(Value::Null) | None => None,
			_ => return Err(Error::InvalidValueObjectValue),
		};
		let encoded = Encoded::Literal {
			lexical: lexical.clone(),
			language,
			datatype: None,
		};
		return Ok(apply_direction(encoded, direction, graph, walker));
	}

	Ok(Some(plain_scalar(raw, None)?))
}

fn apply_direction(encoded: Encoded, direction: Option<Direction>, graph: GraphName<'_>, walker: &mut Walker<'_>) -> Option<Encoded> {
	let Some(dir) = direction else {
		return Some(encoded);
	};
	let Encoded::Literal { lexical, language, datatype } = encoded else {
		return Some(encoded);
	};
	if datatype.is_some() {
		// A typed literal never carries a base direction (§4.7); the
		// direction is simply irrelevant here.
		return Some(Encoded::Literal { lexical, language, datatype });
	}
	match walker.options.rdf_direction_mode() {
		RdfDirectionMode::None => Some(Encoded::Literal { lexical, language, datatype: None }),
		RdfDirectionMode::I18nDatatype => {
			let lang = language.as_deref().unwrap_or("");
			Some(Encoded::Literal {
				lexical,
				language: None,
				datatype: Some(format!("{I18N_NS}{lang}_{}", dir.as_str())),
			})
		}
		RdfDirectionMode::CompoundLiteral => {
			let node_ref = match walker.blank.next_id() {
				Id::Iri(s) => NodeRef::Iri(s),
				Id::Blank(s) => NodeRef::Blank(s),
			};
			let subject = node_ref.as_subject();
			walker.sink.accept(subject, RDF_VALUE, Object::Literal(Literal::plain(&lexical)), graph);
			if let Some(tag) = &language {
				walker.sink.accept(subject, RDF_LANGUAGE, Object::Literal(Literal::plain(tag)), graph);
			}
			walker.sink.accept(subject, RDF_DIRECTION, Object::Literal(Literal::plain(dir.as_str())), graph);
			Some(Encoded::Ref(node_ref))
		}
	}
}

/// `xsd:string` is the implicit default for plain JSON strings with no
/// coercion, language, or direction.
pub fn default_string_datatype() -> &'static str {
	XSD_STRING
}
