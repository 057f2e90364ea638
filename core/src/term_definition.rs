use json_ld_syntax::{Container, Direction, LenientLanguageTagBuf, Value};

/// Type coercion attached to a term (§3 "Term definition" `type_coercion`).
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TypeCoercion {
	Id,
	Vocab,
	Json,
	None,
	Datatype(String),
}

/// `language_override`/`direction_override`: whether a term's value objects
/// inherit the frame's default, are forced plain (no language/direction at
/// all), or carry an explicit override.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Override<T> {
	Inherit,
	None,
	Explicit(T),
}

// Manual impl: `#[derive(Default)]` would bound `T: Default` on the
// generated impl even though `Inherit` never needs one.
impl<T> Default for Override<T> {
	fn default() -> Self {
		Override::Inherit
	}
}

pub type LanguageOverride = Override<LenientLanguageTagBuf>;
pub type DirectionOverride = Override<Direction>;

/// A fully resolved term definition (§3).
#[derive(Clone, Debug)]
pub struct TermDefinition {
	/// Absent for aliases (`iri_mapping` is implied by `keyword_alias`) and
	/// for terms explicitly mapped to `null`.
	pub iri_mapping: Option<String>,
	/// Set when this term is itself an alias for a keyword (`"t": "@type"`).
	pub keyword_alias: Option<json_ld_syntax::Keyword>,
	pub type_coercion: Option<TypeCoercion>,
	pub container: Container,
	pub language: LanguageOverride,
	pub direction: DirectionOverride,
	/// Mutually exclusive with `iri_mapping` carrying an ordinary `@id`:
	/// when set, the term was declared with `@reverse` rather than `@id`.
	pub reverse_property: bool,
	pub nest_key: Option<String>,
	/// Property-valued `@index` (1.1 only): the *term name* (not yet
	/// expanded) used to emit the extra index triple.
	pub index_property: Option<String>,
	/// Raw `@context` value to apply when this term is used as a type or
	/// property, along with the base URL in effect when it was declared.
	pub scoped_context: Option<Value>,
	pub scoped_context_base: Option<String>,
	pub prefix_usable: bool,
	pub protected: bool,
}

impl Default for TermDefinition {
	fn default() -> Self {
		Self {
			iri_mapping: None,
			keyword_alias: None,
			type_coercion: None,
			container: Container::NONE,
			language: LanguageOverride::default(),
			direction: DirectionOverride::default(),
			reverse_property: false,
			nest_key: None,
			index_property: None,
			scoped_context: None,
			scoped_context_base: None,
			prefix_usable: false,
			protected: false,
		}
	}
}

impl TermDefinition {
	/// True for an "alias" term definition: either a keyword alias, or
	/// declared with a `null` `@id` (retained only to block future
	/// redefinition, §4.2).
	pub fn is_alias(&self) -> bool {
		self.keyword_alias.is_some()
	}

	/// Structural-equality check used for the identical-redefinition rule
	/// of §3/§4.2: compares IRI mapping, keyword-alias status, container
	/// set, and coercion, ignoring `protected` itself.
	pub fn same_definition_as(&self, other: &TermDefinition) -> bool {
		self.iri_mapping == other.iri_mapping
			&& self.keyword_alias == other.keyword_alias
			&& self.type_coercion == other.type_coercion
			&& self.container == other.container
			&& self.language == other.language
			&& self.direction == other.direction
			&& self.reverse_property == other.reverse_property
			&& self.nest_key == other.nest_key
			&& self.index_property == other.index_property
	}
}
