//! Caller-supplied configuration (§4.11, §6 "No CLI, environment
//! variables, or persisted state"): every knob the transducer reads comes
//! through this struct, constructed by the caller at the call site.

use json_ld_core::{ProcessingMode, RdfDirectionMode};

#[derive(Clone, Debug)]
pub struct Options {
	pub processing_mode: ProcessingMode,
	/// `None` drops `@direction`-tagged strings entirely, matching
	/// [`RdfDirectionMode::None`] — kept as a separate `Option` only so a
	/// caller can omit the field in `..Default::default()` updates and
	/// still get that behaviour explicitly rather than by coincidence.
	pub rdf_direction: Option<RdfDirectionMode>,
	pub base: Option<String>,
	/// When `false`, triples whose predicate would itself be a blank node
	/// are dropped instead of emitted (generalized RDF allows blank-node
	/// predicates; plain RDF does not). An unprefixed `@reverse` alias
	/// term is the only way this core could ever produce one, which
	/// well-formed input never does — the switch exists so the emitter's
	/// behaviour at that boundary is a caller decision, not a silent
	/// default baked into the walker.
	pub produce_generalized_rdf: bool,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			processing_mode: ProcessingMode::JsonLd1_1,
			rdf_direction: None,
			base: None,
			produce_generalized_rdf: false,
		}
	}
}

impl Options {
	pub fn rdf_direction_mode(&self) -> RdfDirectionMode {
		self.rdf_direction.unwrap_or_default()
	}
}
