use json_ld_syntax::Keyword;

/// The result of expanding a term or compact IRI against a frame to
/// whatever notion of IRI it denotes in the current term-definition
/// builder — not yet an [`crate::Id`], because a definition step may still
/// reject a `Keyword` or `Blank` result where only an IRI mapping is legal.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Term {
	/// The term or value is explicitly absent (`null` mapping, or the
	/// value being `@none`).
	Null,
	/// Expanded to a keyword (the value was itself a keyword, or aliased
	/// to one).
	Keyword(Keyword),
	/// Expanded to an absolute IRI.
	Iri(String),
	/// Expanded to a blank node identifier.
	Blank(String),
}

impl Term {
	pub fn is_keyword(&self) -> bool {
		matches!(self, Self::Keyword(_))
	}

	/// True for the two mapping target kinds JSON-LD calls "valid" in an
	/// `@id`/`@reverse` IRI-mapping position: an IRI or a blank node.
	pub fn is_valid_mapping_target(&self) -> bool {
		matches!(self, Self::Iri(_) | Self::Blank(_))
	}

	pub fn as_iri(&self) -> Option<&str> {
		match self {
			Self::Iri(s) => Some(s),
			_ => None,
		}
	}

	pub fn into_id(self) -> Option<crate::Id> {
		match self {
			Self::Iri(s) => Some(crate::Id::Iri(s)),
			Self::Blank(s) => Some(crate::Id::Blank(s)),
			_ => None,
		}
	}
}
