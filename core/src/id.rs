use std::fmt;

/// An RDF subject/object identifier: either an absolute IRI or a blank node
/// label. Per §3 "IRI", blank nodes always carry the `_:` prefix and are
/// never wrapped in angle brackets; IRIs are the reverse.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Id {
	Iri(String),
	Blank(String),
}

impl Id {
	pub fn iri(s: impl Into<String>) -> Self {
		Self::Iri(s.into())
	}

	pub fn blank(label: impl Into<String>) -> Self {
		Self::Blank(label.into())
	}

	pub fn as_str(&self) -> &str {
		match self {
			Self::Iri(s) | Self::Blank(s) => s,
		}
	}

	pub fn is_blank(&self) -> bool {
		matches!(self, Self::Blank(_))
	}

	pub fn is_iri(&self) -> bool {
		matches!(self, Self::Iri(_))
	}
}

impl fmt::Display for Id {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Iri(iri) => write!(f, "<{iri}>"),
			Self::Blank(label) => write!(f, "_:{label}"),
		}
	}
}

/// Checks the `scheme ":"` grammar of §3: `ALPHA (ALPHA|DIGIT|"+"|"-"|".")*`
/// followed by a colon. Used both by the IRI resolver (`is_absolute`) and by
/// the quad emitter's well-formedness check.
pub fn has_absolute_scheme(s: &str) -> bool {
	let Some(colon) = s.find(':') else {
		return false;
	};
	let scheme = &s[..colon];
	let mut chars = scheme.chars();
	match chars.next() {
		Some(c) if c.is_ascii_alphabetic() => {}
		_ => return false,
	}
	chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Characters forbidden in a well-formed output IRI by §3's invariant list:
/// no unescaped space, control char, `<`, `>`, `"`, `{`, `}`, `|`, `\`, `^`,
/// `` ` ``, and no `##` sequence.
pub fn is_well_formed_iri(s: &str) -> bool {
	if !has_absolute_scheme(s) {
		return false;
	}
	if s.contains("##") {
		return false;
	}
	s.chars().all(|c| {
		!c.is_control()
			&& !matches!(c, ' ' | '<' | '>' | '"' | '{' | '}' | '|' | '\\' | '^' | '`')
	})
}

/// Generates fresh blank node labels with a dedicated prefix so that
/// internally-minted blank nodes never collide with blank nodes that
/// appeared verbatim in the input document (§3 "Blank-node lifecycle").
#[derive(Clone, Debug)]
pub struct BlankIdGenerator {
	prefix: String,
	count: usize,
}

impl BlankIdGenerator {
	/// The default prefix, chosen because input JSON-LD blank nodes
	/// conventionally use `_:b*` or arbitrary author-chosen labels, rarely
	/// `_:g*`.
	pub const DEFAULT_PREFIX: &'static str = "g";

	pub fn new() -> Self {
		Self::with_prefix(Self::DEFAULT_PREFIX)
	}

	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			count: 0,
		}
	}

	pub fn next_id(&mut self) -> Id {
		let label = format!("{}{}", self.prefix, self.count);
        self.count += 1;
		Id::Blank(label)
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}
}

impl Default for BlankIdGenerator {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn generated_labels_use_dedicated_prefix() {
		let mut gen = BlankIdGenerator::new();
		assert_eq!(gen.next_id(), Id::blank("g0"));
		assert_eq!(gen.next_id(), Id::blank("g1"));
	}

	#[test]
	fn absolute_scheme_detection() {
		assert!(has_absolute_scheme("http://example.org/a"));
		assert!(has_absolute_scheme("tag:example.org,2021:a"));
		assert!(!has_absolute_scheme("//example.org/a"));
		assert!(!has_absolute_scheme("relative/path"));
		assert!(!has_absolute_scheme("1http://bad"));
	}

	#[test]
	fn well_formed_iri_rejects_bad_characters() {
		assert!(!is_well_formed_iri("http://example.org/a b"));
		assert!(!is_well_formed_iri("http://example.org/a#b##c"));
		assert!(is_well_formed_iri("http://example.org/a#b"));
	}
}
