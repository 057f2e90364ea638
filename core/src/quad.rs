use std::fmt;

/// `http://www.w3.org/1999/02/22-rdf-syntax-ns#type`
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
/// `http://www.w3.org/1999/02/22-rdf-syntax-ns#first`
pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
/// `http://www.w3.org/1999/02/22-rdf-syntax-ns#rest`
pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
/// `http://www.w3.org/1999/02/22-rdf-syntax-ns#nil`
pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
/// `http://www.w3.org/1999/02/22-rdf-syntax-ns#JSON`
pub const RDF_JSON: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#JSON";
/// `http://www.w3.org/1999/02/22-rdf-syntax-ns#value` (compound-literal mode)
pub const RDF_VALUE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#value";
/// `http://www.w3.org/1999/02/22-rdf-syntax-ns#direction` (compound-literal mode)
pub const RDF_DIRECTION: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#direction";
/// `http://www.w3.org/1999/02/22-rdf-syntax-ns#language` (compound-literal mode)
pub const RDF_LANGUAGE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#language";

pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// `https://www.w3.org/ns/i18n#` prefix for `I18nDatatype` direction encoding
/// (§4.7): the full datatype IRI is `{I18N_NS}{lang}_{dir}`.
pub const I18N_NS: &str = "https://www.w3.org/ns/i18n#";

/// A quad subject (§6): never a literal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Subject<'a> {
	Iri(&'a str),
	Blank(&'a str),
}

impl fmt::Display for Subject<'_> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Iri(iri) => write!(f, "<{iri}>"),
			Self::Blank(label) => write!(f, "_:{label}"),
		}
	}
}

/// A quad's graph component: absent means the default graph.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GraphName<'a> {
	Default,
	Iri(&'a str),
	Blank(&'a str),
}

impl fmt::Display for GraphName<'_> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Default => Ok(()),
			Self::Iri(iri) => write!(f, "<{iri}>"),
			Self::Blank(label) => write!(f, "_:{label}"),
		}
	}
}

/// The literal suffix kind of an RDF literal object.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LiteralKind<'a> {
	/// `xsd:string`, which is simply omitted on display (`"lex"`).
	Plain,
	/// `"lex"@tag` (`rdf:langString`, or a compound-literal language leg).
	Language(&'a str),
	/// `"lex"^^<datatype-iri>`.
	Typed(&'a str),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Literal<'a> {
	pub lexical: &'a str,
	pub kind: LiteralKind<'a>,
}

impl<'a> Literal<'a> {
	pub fn plain(lexical: &'a str) -> Self {
		Self {
			lexical,
			kind: LiteralKind::Plain,
		}
	}

	pub fn language(lexical: &'a str, tag: &'a str) -> Self {
		Self {
			lexical,
			kind: LiteralKind::Language(tag),
		}
	}

	pub fn typed(lexical: &'a str, datatype: &'a str) -> Self {
		Self {
			lexical,
			kind: LiteralKind::Typed(datatype),
		}
	}
}

impl fmt::Display for Literal<'_> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "\"")?;
		for c in self.lexical.chars() {
			match c {
				'"' => write!(f, "\\\"")?,
				'\\' => write!(f, "\\\\")?,
				'\t' => write!(f, "\\t")?,
				'\r' => write!(f, "\\r")?,
				'\n' => write!(f, "\\n")?,
				c => write!(f, "{c}")?,
			}
		}
		write!(f, "\"")?;
		match self.kind {
			LiteralKind::Plain => Ok(()),
			LiteralKind::Language(tag) => write!(f, "@{tag}"),
			LiteralKind::Typed(datatype) => write!(f, "^^<{datatype}>"),
		}
	}
}

/// A quad object (§6): an IRI, a blank node, or a literal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Object<'a> {
	Iri(&'a str),
	Blank(&'a str),
	Literal(Literal<'a>),
}

impl fmt::Display for Object<'_> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Iri(iri) => write!(f, "<{iri}>"),
			Self::Blank(label) => write!(f, "_:{label}"),
			Self::Literal(lit) => lit.fmt(f),
		}
	}
}

/// The sink an expansion pass emits RDF statements to (§6 "QuadSink").
/// Every borrow handed to `accept` is valid only for the duration of the
/// call; a sink that needs to retain a quad must copy out of it.
pub trait QuadSink {
	fn accept(&mut self, subject: Subject<'_>, predicate: &str, object: Object<'_>, graph: GraphName<'_>);
}

/// A sink that collects quads into an owned buffer, for callers without
/// their own streaming consumer (tests, small documents).
#[derive(Clone, Debug, Default)]
pub struct VecSink {
	pub quads: Vec<OwnedQuad>,
}

/// Owned counterpart of the borrowed [`Subject`]/[`Object`]/[`GraphName`]
/// views, used by [`VecSink`] once a quad must outlive the `accept` call.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct OwnedQuad {
	pub subject: OwnedTerm,
	pub predicate: String,
	pub object: OwnedTerm,
	pub graph: Option<OwnedTerm>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum OwnedTerm {
	Iri(String),
	Blank(String),
	Literal {
		lexical: String,
		language: Option<String>,
		datatype: Option<String>,
	},
}

impl From<Subject<'_>> for OwnedTerm {
	fn from(s: Subject<'_>) -> Self {
		match s {
			Subject::Iri(iri) => Self::Iri(iri.to_string()),
			Subject::Blank(label) => Self::Blank(label.to_string()),
		}
	}
}

impl From<Object<'_>> for OwnedTerm {
	fn from(o: Object<'_>) -> Self {
		match o {
			Object::Iri(iri) => Self::Iri(iri.to_string()),
			Object::Blank(label) => Self::Blank(label.to_string()),
			Object::Literal(lit) => match lit.kind {
				LiteralKind::Plain => Self::Literal {
					lexical: lit.lexical.to_string(),
					language: None,
					datatype: None,
				},
				LiteralKind::Language(tag) => Self::Literal {
					lexical: lit.lexical.to_string(),
					language: Some(tag.to_string()),
					datatype: None,
				},
				LiteralKind::Typed(datatype) => Self::Literal {
					lexical: lit.lexical.to_string(),
					language: None,
					datatype: Some(datatype.to_string()),
				},
			},
		}
	}
}

impl QuadSink for VecSink {
	fn accept(&mut self, subject: Subject<'_>, predicate: &str, object: Object<'_>, graph: GraphName<'_>) {
		let graph = match graph {
			GraphName::Default => None,
			GraphName::Iri(iri) => Some(OwnedTerm::Iri(iri.to_string())),
			GraphName::Blank(label) => Some(OwnedTerm::Blank(label.to_string())),
		};
		self.quads.push(OwnedQuad {
			subject: subject.into(),
			predicate: predicate.to_string(),
			object: object.into(),
			graph,
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn literal_display_escapes() {
		let lit = Literal::plain("a\n\"b\"");
		assert_eq!(lit.to_string(), "\"a\\n\\\"b\\\"\"");
	}

	#[test]
	fn typed_literal_display() {
		let lit = Literal::typed("42", XSD_INTEGER);
		assert_eq!(
			lit.to_string(),
			"\"42\"^^<http://www.w3.org/2001/XMLSchema#integer>"
		);
	}

	#[test]
	fn vec_sink_collects_quads() {
		let mut sink = VecSink::default();
		sink.accept(
			Subject::Iri("http://example.org/s"),
			RDF_TYPE,
			Object::Iri("http://example.org/C"),
			GraphName::Default,
		);
		assert_eq!(sink.quads.len(), 1);
		assert_eq!(sink.quads[0].graph, None);
	}
}
