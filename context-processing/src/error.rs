use json_ld_core::LoadError;
use thiserror::Error;

/// Every contract violation the context engine and term-definition builder
/// can raise (§7). `Display` renders the stable, machine-readable code
/// named in the specification, not a prose description.
#[derive(Debug, Error)]
pub enum ContextError {
	#[error("invalid context nullification")]
	InvalidContextNullification,
	#[error("invalid context entry")]
	InvalidContextEntry,
	#[error("invalid import value")]
	InvalidImportValue,
	#[error("invalid remote context")]
	InvalidRemoteContext,
	#[error("invalid base IRI")]
	InvalidBaseIri,
	#[error("invalid vocab mapping")]
	InvalidVocabMapping,
	#[error("invalid default language")]
	InvalidDefaultLanguage,
	#[error("invalid base direction")]
	InvalidBaseDirection,
	#[error("invalid @version value")]
	InvalidVersionValue,
	#[error("invalid @propagate value")]
	InvalidPropagateValue,
	#[error("invalid @protected value")]
	InvalidProtectedValue,
	#[error("cyclic IRI mapping")]
	CyclicIriMapping,
	#[error("invalid term definition")]
	InvalidTermDefinition,
	#[error("keyword redefinition")]
	KeywordRedefinition,
	#[error("invalid type mapping")]
	InvalidTypeMapping,
	#[error("invalid reverse property")]
	InvalidReverseProperty,
	#[error("invalid IRI mapping")]
	InvalidIriMapping,
	#[error("invalid keyword alias")]
	InvalidKeywordAlias,
	#[error("invalid container mapping")]
	InvalidContainerMapping,
	#[error("invalid @nest value")]
	InvalidNestValue,
	#[error("invalid @prefix value")]
	InvalidPrefixValue,
	#[error("invalid @index value")]
	InvalidIndexValue,
	#[error("invalid scoped context")]
	InvalidScopedContext,
	#[error("protected term redefinition")]
	ProtectedTermRedefinition,
	#[error("recursive context inclusion")]
	RecursiveContextInclusion,
	#[error("context overflow")]
	ContextOverflow,
	#[error("processing mode conflict")]
	ProcessingModeConflict,
	#[error("loading remote context failed")]
	LoadingRemoteContextFailed,
	#[error(transparent)]
	Load(#[from] LoadError),
}

impl ContextError {
	/// The stable machine-readable code (§7), identical to `Display` for
	/// every variant except the wrapped loader error, which collapses to
	/// the generic loading-failure code.
	pub fn code(&self) -> &'static str {
		match self {
			Self::InvalidContextNullification => "invalid context nullification",
			Self::InvalidContextEntry => "invalid context entry",
			Self::InvalidImportValue => "invalid @import value",
			Self::InvalidRemoteContext => "invalid remote context",
			Self::InvalidBaseIri => "invalid base IRI",
			Self::InvalidVocabMapping => "invalid vocab mapping",
			Self::InvalidDefaultLanguage => "invalid default language",
			Self::InvalidBaseDirection => "invalid base direction",
			Self::InvalidVersionValue => "invalid @version value",
			Self::InvalidPropagateValue => "invalid @propagate value",
			Self::InvalidProtectedValue => "invalid @protected value",
			Self::CyclicIriMapping => "cyclic IRI mapping",
			Self::InvalidTermDefinition => "invalid term definition",
			Self::KeywordRedefinition => "keyword redefinition",
			Self::InvalidTypeMapping => "invalid type mapping",
			Self::InvalidReverseProperty => "invalid reverse property",
			Self::InvalidIriMapping => "invalid IRI mapping",
			Self::InvalidKeywordAlias => "invalid keyword alias",
			Self::InvalidContainerMapping => "invalid container mapping",
			Self::InvalidNestValue => "invalid @nest value",
			Self::InvalidPrefixValue => "invalid @prefix value",
			Self::InvalidIndexValue => "invalid @index value",
			Self::InvalidScopedContext => "invalid scoped context",
			Self::ProtectedTermRedefinition => "protected term redefinition",
			Self::RecursiveContextInclusion => "recursive context inclusion",
			Self::ContextOverflow => "context overflow",
			Self::ProcessingModeConflict => "processing mode conflict",
			Self::LoadingRemoteContextFailed | Self::Load(_) => "loading remote context failed",
		}
	}
}

pub type Result<T> = std::result::Result<T, ContextError>;
