/// Which edition of the JSON-LD grammar a frame enforces. Established once
/// for the whole document (§9 "Resolved Open Question") and never itself
/// upgraded by a context entry encountered mid-stream.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ProcessingMode {
	JsonLd1_0,
	#[default]
	JsonLd1_1,
}

impl ProcessingMode {
	pub fn is_1_0(self) -> bool {
		matches!(self, Self::JsonLd1_0)
	}

	pub fn is_1_1(self) -> bool {
		matches!(self, Self::JsonLd1_1)
	}
}

/// How a [`Direction`](json_ld_syntax::Direction)-tagged string is encoded
/// as RDF (§4.7). `None` here is a distinct, valid configuration (direction
/// information is simply dropped), not the absence of a choice — so it is
/// kept in its own enum rather than collapsed into `Option<RdfDirectionMode>`
/// at call sites that need to match on it exhaustively.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum RdfDirectionMode {
	#[default]
	None,
	I18nDatatype,
	CompoundLiteral,
}
