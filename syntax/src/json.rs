//! The JSON DOM consumed by the transducer (§6 "JSON DOM").
//!
//! The core is deliberately agnostic to how bytes became a tree: callers
//! hand it a [`Value`] built however they like (`serde_json`, a custom
//! parser, ...). The only properties the core relies on are the ones named
//! in the specification: ordered object enumeration, and verbatim-text
//! access to numbers so that [`crate::jcs`]-style canonicalisation and the
//! integer/double split in the value encoder see exactly what was written,
//! not a lossily-reparsed `f64`.
use indexmap::IndexMap;
use std::fmt;

/// A JSON number, keeping its original lexical form alongside a best-effort
/// `f64` view. JSON-LD's numeric coercion rules (§4.7) need to know whether
/// the source text had a fractional part or exponent, which a plain `f64`
/// cannot answer once `1.0` and `1` have both collapsed to the same float.
#[derive(Clone, PartialEq, Debug)]
pub struct Number {
	lexical: String,
}

impl Number {
	pub fn from_lexical(s: impl Into<String>) -> Self {
		Self { lexical: s.into() }
	}

	pub fn from_i64(n: i64) -> Self {
		Self {
			lexical: n.to_string(),
		}
	}

	pub fn from_f64(n: f64) -> Self {
		Self {
			lexical: format!("{n}"),
		}
	}

	pub fn as_str(&self) -> &str {
		&self.lexical
	}

	/// True if the lexical form has neither a `.` nor an `e`/`E` exponent,
	/// i.e. it was written as a plain integer literal.
	pub fn is_integer_lexical(&self) -> bool {
		!self.lexical.contains(['.', 'e', 'E'])
	}

	pub fn as_f64_lossy(&self) -> f64 {
		self.lexical.parse().unwrap_or(f64::NAN)
	}

	/// Parses as `i128` when the lexical form is a plain integer; used to
	/// check the `[-10^21, 10^21)` range of §4.7 without losing precision to
	/// `f64` first.
	pub fn as_i128(&self) -> Option<i128> {
		if self.is_integer_lexical() {
			self.lexical.parse().ok()
		} else {
			None
		}
	}
}

impl fmt::Display for Number {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.lexical)
	}
}

/// A JSON value, with objects preserving the source's key declaration
/// order (container dispatch and list/index maps all iterate in document
/// order per §5 "Ordering guarantees").
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
	Null,
	Boolean(bool),
	Number(Number),
	String(String),
	Array(Vec<Value>),
	Object(IndexMap<String, Value>),
}

impl Value {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Boolean(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_number(&self) -> Option<&Number> {
		match self {
			Self::Number(n) => Some(n),
			_ => None,
		}
	}

	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(a) => Some(a),
			_ => None,
		}
	}

	pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
		match self {
			Self::Object(o) => Some(o),
			_ => None,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	pub fn is_object(&self) -> bool {
		matches!(self, Self::Object(_))
	}

	pub fn is_array(&self) -> bool {
		matches!(self, Self::Array(_))
	}

	/// Views a single value or a one-element array uniformly, the way
	/// JSON-LD treats most entries as implicitly set-valued.
	pub fn as_slice_of_values(&self) -> Vec<&Value> {
		match self {
			Self::Array(a) => a.iter().collect(),
			other => vec![other],
		}
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Self::String(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Self::String(s)
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Self::Boolean(b)
	}
}
