use std::fmt;

/// JSON-LD keywords recognised by the context engine and node walker.
///
/// Mirrors the closed keyword set of the JSON-LD 1.1 grammar. Term aliasing
/// (`"kind": "@type"`) maps a plain string to one of these variants; the
/// alias tables in [`json_ld_core::Frame`](../../json_ld_core/struct.Frame.html)
/// key on this enum rather than on raw strings so alias lookups are a cheap
/// tag compare instead of a string compare.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Keyword {
	Base,
	Container,
	Context,
	Direction,
	Graph,
	Id,
	Import,
	Included,
	Index,
	Json,
	Language,
	List,
	Nest,
	None,
	Prefix,
	Propagate,
	Protected,
	Reverse,
	Set,
	Type,
	Value,
	Version,
	Vocab,
}

impl Keyword {
	/// Returns the canonical `@`-prefixed string form.
	pub const fn into_str(self) -> &'static str {
		use Keyword::*;
		match self {
			Base => "@base",
			Container => "@container",
			Context => "@context",
			Direction => "@direction",
			Graph => "@graph",
			Id => "@id",
			Import => "@import",
			Included => "@included",
			Index => "@index",
			Json => "@json",
			Language => "@language",
			List => "@list",
			Nest => "@nest",
			None => "@none",
			Prefix => "@prefix",
			Propagate => "@propagate",
			Protected => "@protected",
			Reverse => "@reverse",
			Set => "@set",
			Type => "@type",
			Value => "@value",
			Version => "@version",
			Vocab => "@vocab",
		}
	}

	/// Parses a keyword from its exact `@`-prefixed string form.
	pub fn try_from_str(s: &str) -> Option<Self> {
		use Keyword::*;
		Some(match s {
			"@base" => Base,
			"@container" => Container,
			"@context" => Context,
			"@direction" => Direction,
			"@graph" => Graph,
			"@id" => Id,
			"@import" => Import,
			"@included" => Included,
			"@index" => Index,
			"@json" => Json,
			"@language" => Language,
			"@list" => List,
			"@nest" => Nest,
			"@none" => None,
			"@prefix" => Prefix,
			"@propagate" => Propagate,
			"@protected" => Protected,
			"@reverse" => Reverse,
			"@set" => Set,
			"@type" => Type,
			"@value" => Value,
			"@version" => Version,
			"@vocab" => Vocab,
			_ => return Option::None,
		})
	}
}

impl fmt::Display for Keyword {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.into_str())
	}
}

/// True if `s` has the lexical shape of a keyword (`@` followed only by
/// ASCII letters) whether or not it is one of the keywords JSON-LD actually
/// defines. Per the JSON-LD 1.1 grammar, such "keyword-like" strings are
/// reserved: a term definition whose `@id` (or string value) looks like a
/// keyword but isn't one is silently ignored rather than treated as an IRI.
pub fn is_keyword_like(s: &str) -> bool {
	let mut chars = s.chars();
	if chars.next() != Some('@') {
		return false;
	}
	chars.next().is_some() && chars.all(|c| c.is_ascii_alphabetic())
}
