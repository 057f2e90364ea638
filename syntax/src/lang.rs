use std::fmt;

/// A language tag that is stored and compared as-is even when it does not
/// conform to BCP47, matching the JSON-LD requirement that malformed
/// `@language` values only trigger a warning, never a hard error.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct LenientLanguageTagBuf(String);

impl LenientLanguageTagBuf {
	/// Builds a tag from a raw string, reporting (via the returned `bool`)
	/// whether `s` is well-formed per `langtag`'s BCP47 grammar. The tag is
	/// kept either way: JSON-LD only asks implementations to *warn*.
	pub fn new(s: impl Into<String>) -> (Self, bool) {
		let s = s.into();
		let well_formed = langtag::LanguageTag::parse(s.as_str()).is_ok();
		(Self(s), well_formed)
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Case-insensitive comparison to `@none`, used when language maps use
	/// the literal key `"@none"` rather than a real tag.
	pub fn is_none_keyword(&self) -> bool {
		self.0 == "@none"
	}
}

impl fmt::Display for LenientLanguageTagBuf {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<String> for LenientLanguageTagBuf {
	fn from(s: String) -> Self {
		Self::new(s).0
	}
}

impl<'a> From<&'a str> for LenientLanguageTagBuf {
	fn from(s: &'a str) -> Self {
		Self::new(s).0
	}
}
