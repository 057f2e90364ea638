/// A parsed `prefix:suffix` compact IRI, as it appears literally in a
/// JSON-LD document (term name, `@id` value, `@type` value, ...).
///
/// Per §4.1, a string only has the *shape* of a compact IRI when it
/// contains a colon not at the first position, the part before the colon
/// is not `_` (that would be a blank node label), and the part after the
/// colon does not start with `//` (that would make it look like an
/// absolute IRI with an authority). Whether the prefix is actually a
/// prefix-usable term is a question for the context, not for this type.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct CompactIri {
	prefix: String,
	suffix: String,
}

impl CompactIri {
	pub fn parse(s: &str) -> Option<Self> {
		let (prefix, suffix) = s.split_once(':')?;
		if prefix.is_empty() || prefix == "_" || suffix.starts_with("//") {
			return None;
		}
		Some(Self {
			prefix: prefix.to_string(),
			suffix: suffix.to_string(),
		})
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	pub fn suffix(&self) -> &str {
		&self.suffix
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_simple_compact_iri() {
		let c = CompactIri::parse("foaf:name").unwrap();
		assert_eq!(c.prefix(), "foaf");
		assert_eq!(c.suffix(), "name");
	}

	#[test]
	fn rejects_blank_node_label() {
		assert!(CompactIri::parse("_:b0").is_none());
	}

	#[test]
	fn rejects_authority_like_suffix() {
		assert!(CompactIri::parse("http://example.org/x").is_none());
	}
}
