use thiserror::Error;

/// Failure to retrieve or parse a remote `@context` document (§5).
#[derive(Debug, Error)]
pub enum LoadError {
	#[error("failed to dereference remote context {iri}: {message}")]
	Dereference { iri: String, message: String },
	#[error("remote context {iri} did not contain a JSON object at its top level")]
	InvalidRemoteContext { iri: String },
	#[error("remote document {iri} is not valid JSON: {message}")]
	InvalidJson { iri: String, message: String },
}

/// Resolves a `@context` IRI to its raw JSON text. The engine exposes a
/// synchronous contract (§5, resolved Open Question in §9): callers that
/// need network I/O are expected to block, batch-prefetch, or otherwise
/// bridge from their own async runtime before invoking the transducer.
pub trait ContextLoader {
	/// `iri` is always absolute; `base` is the context IRI it was found
	/// relative to when the engine still had one to resolve against the
	/// un-dereferenced reference (informational only, for loaders that key
	/// off the referring document rather than the absolute address).
	fn load(&mut self, iri: &str, base: Option<&str>) -> Result<String, LoadError>;
}

/// A loader that rejects every remote reference, for callers who only ever
/// need locally-supplied contexts and want `@import`/remote `@context`
/// entries to fail fast rather than hang.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLoader;

impl ContextLoader for NoopLoader {
	fn load(&mut self, iri: &str, _base: Option<&str>) -> Result<String, LoadError> {
		Err(LoadError::Dereference {
			iri: iri.to_string(),
			message: "remote context loading is disabled".to_string(),
		})
	}
}
