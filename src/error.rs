//! The top-level `Error` enum (§7, §4.11): every contract violation the
//! node walker, container dispatcher, and value encoder can raise, plus
//! every [`json_ld_context_processing::ContextError`] chained through
//! unchanged.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error(transparent)]
	Context(#[from] json_ld_context_processing::ContextError),
	#[error("colliding keywords")]
	CollidingKeywords,
	#[error("invalid @id value")]
	InvalidIdValue,
	#[error("invalid type value")]
	InvalidTypeValue,
	#[error("invalid value object")]
	InvalidValueObject,
	#[error("invalid value object value")]
	InvalidValueObjectValue,
	#[error("invalid language-tagged string")]
	InvalidLanguageTaggedString,
	#[error("invalid language-tagged value")]
	InvalidLanguageTaggedValue,
	#[error("invalid typed value")]
	InvalidTypedValue,
	#[error("invalid set or list object")]
	InvalidSetOrListObject,
	#[error("invalid reverse property value")]
	InvalidReversePropertyValue,
	#[error("invalid reverse property map")]
	InvalidReversePropertyMap,
	#[error("invalid @included value")]
	InvalidIncludedValue,
	#[error("list of lists")]
	ListOfLists,
}

impl Error {
	/// The stable machine-readable code (§7), identical to `Display`.
	pub fn code(&self) -> &'static str {
		match self {
			Self::Context(e) => e.code(),
			Self::CollidingKeywords => "colliding keywords",
			Self::InvalidIdValue => "invalid @id value",
			Self::InvalidTypeValue => "invalid type value",
			Self::InvalidValueObject => "invalid value object",
			Self::InvalidValueObjectValue => "invalid value object value",
			Self::InvalidLanguageTaggedString => "invalid language-tagged string",
			Self::InvalidLanguageTaggedValue => "invalid language-tagged value",
			Self::InvalidTypedValue => "invalid typed value",
			Self::InvalidSetOrListObject => "invalid set or list object",
			Self::InvalidReversePropertyValue => "invalid reverse property value",
			Self::InvalidReversePropertyMap => "invalid reverse property map",
			Self::InvalidIncludedValue => "invalid @included value",
			Self::ListOfLists => "list of lists",
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;
