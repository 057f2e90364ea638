/// A JSON value position that distinguishes an explicit JSON `null` from the
/// entry being absent altogether.
///
/// JSON-LD relies on this distinction constantly: `"@base": null` clears the
/// base IRI, while the `@base` entry being absent leaves it untouched.
/// Representing both states as `Option<Option<T>>` is correct but unreadable
/// at every call site, so the teacher's syntax crate spells it out as its own
/// two-variant enum.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Nullable<T> {
	Null,
	Some(T),
}

impl<T> Nullable<T> {
	pub fn as_ref(&self) -> Nullable<&T> {
		match self {
			Self::Null => Nullable::Null,
			Self::Some(t) => Nullable::Some(t),
		}
	}

	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Nullable<U> {
		match self {
			Self::Null => Nullable::Null,
			Self::Some(t) => Nullable::Some(f(t)),
		}
	}

	pub fn option(self) -> Option<T> {
		match self {
			Self::Null => None,
			Self::Some(t) => Some(t),
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}
}
