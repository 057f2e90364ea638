//! Type-scoped and property-scoped context application (§4.4).
//!
//! The teacher keeps every `Context` immutable and has each node/property
//! walker hold onto a `previous_context` it reverts to once a non-
//! propagating scope's nested values are behind it (see
//! `expansion/node.rs`'s `type_scoped_context`/`previous_context` fields in
//! the example pack). Our `Context` is mutated in place by `define`/
//! `apply_context` instead, so the same "go back to what I had before"
//! move is expressed as an explicit snapshot taken before the scoped
//! `@context` is applied and restored by the walker once it leaves the
//! node or property the scope was attached to.

use crate::engine::apply_context;
use crate::error::Result;
use json_ld_core::{Context, ContextLoader};
use json_ld_syntax::Value;

/// Which kind of scope produced a [`ScopeGuard`] — determines the default
/// `@propagate` value when the scoped context doesn't say so itself.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScopeKind {
	/// A type's own `@context` (from the term definition of a value
	/// appearing in `@type`). Defaults to non-propagating: its effect is
	/// confined to the node it was applied for.
	Type,
	/// A property's own `@context` (from the term definition of the
	/// property whose value is being expanded). Defaults to propagating:
	/// its effect continues into nested node objects.
	Property,
}

impl ScopeKind {
	fn default_propagate(self) -> bool {
		match self {
			ScopeKind::Type => false,
			ScopeKind::Property => true,
		}
	}
}

/// A snapshot of a [`Context`] taken before a scoped `@context` was
/// applied, together with whether that scope's effect should be visible
/// to the nested node objects found inside the value it was applied to.
pub struct ScopeGuard {
	before: Context,
	propagate: bool,
}

impl ScopeGuard {
	/// Applies `scoped_context` (the term's `scoped_context`/
	/// `scoped_context_base`) to `context` in place, returning a guard that
	/// can later restore `context` to how it was before this call if
	/// `propagate` ends up `false`.
	///
	/// `protected` carries forward the rule that a type-scoped context
	/// applied for a node that already has protected terms cannot
	/// introduce new protected terms of its own unless it is itself
	/// declaring `@protected` (ordinary `define` semantics handle the
	/// per-term side of this; `override_protected` here just lets a
	/// type-scoped context redefine terms the *same* type previously
	/// protected, matching the "protected terms may be repeated within the
	/// same type-scoped context" carve-out).
	pub fn apply(
		context: &mut Context,
		kind: ScopeKind,
		scoped_context: &Value,
		scoped_context_base: Option<&str>,
		loader: &mut dyn ContextLoader,
		override_protected: bool,
	) -> Result<Self> {
		let before = context.clone();
		let propagate = propagate_of(scoped_context).unwrap_or_else(|| kind.default_propagate());
		apply_context(context, scoped_context, loader, scoped_context_base, override_protected)?;
		Ok(ScopeGuard { before, propagate })
	}

	/// Whether the scope this guard represents should remain active for
	/// node objects nested inside the value it was applied to.
	pub fn propagates(&self) -> bool {
		self.propagate
	}

	/// Restores `context` to its pre-scope state. Call this once the
	/// walker has finished with the nested value the scope was applied
	/// for, when [`propagates`](Self::propagates) is `false` — a
	/// propagating scope is left in place and this is never called for
	/// it.
	pub fn revert(self, context: &mut Context) {
		*context = self.before;
	}
}

/// Reads a context value's own top-level `@propagate`, if it sets one
/// explicitly (a scoped context value is always a null/string/array/
/// object `@context` entry shape; only the object form can carry
/// `@propagate`).
fn propagate_of(value: &Value) -> Option<bool> {
	match value {
		Value::Object(obj) => match obj.get("@propagate") {
			Some(Value::Boolean(b)) => Some(*b),
			_ => None,
		},
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use json_ld_core::{NoopLoader, ProcessingMode};
	use json_ld_syntax::Value;

	fn object(pairs: Vec<(&str, Value)>) -> Value {
		let mut map = indexmap::IndexMap::new();
		for (k, v) in pairs {
			map.insert(k.to_string(), v);
		}
		Value::Object(map)
	}

	#[test]
	fn type_scope_defaults_to_non_propagating() {
		let mut context = Context::new(None, ProcessingMode::JsonLd1_1);
		let mut loader = NoopLoader::default();
		let scoped = object(vec![("name", Value::String("http://example.org/name".to_string()))]);
		let guard =
			ScopeGuard::apply(&mut context, ScopeKind::Type, &scoped, None, &mut loader, false).unwrap();
		assert!(!guard.propagates());
		assert!(context.contains_term("name"));
		guard.revert(&mut context);
		assert!(!context.contains_term("name"));
	}

	#[test]
	fn property_scope_defaults_to_propagating() {
		let mut context = Context::new(None, ProcessingMode::JsonLd1_1);
		let mut loader = NoopLoader::default();
		let scoped = object(vec![("name", Value::String("http://example.org/name".to_string()))]);
		let guard =
			ScopeGuard::apply(&mut context, ScopeKind::Property, &scoped, None, &mut loader, false).unwrap();
		assert!(guard.propagates());
	}

	#[test]
	fn explicit_propagate_overrides_default() {
		let mut context = Context::new(None, ProcessingMode::JsonLd1_1);
		let mut loader = NoopLoader::default();
		let scoped = object(vec![
			("@propagate", Value::Boolean(true)),
			("name", Value::String("http://example.org/name".to_string())),
		]);
		let guard =
			ScopeGuard::apply(&mut context, ScopeKind::Type, &scoped, None, &mut loader, false).unwrap();
		assert!(guard.propagates());
	}
}
