//! Context engine entry point (§4.3): `apply_context`.

use crate::define::{define, DefinedTerms};
use crate::error::{ContextError, Result};
use crate::iri::resolve_reference;
use indexmap::IndexMap;
use json_ld_core::{Context, ContextLoader, ProcessingMode};
use json_ld_syntax::{Keyword, Value, CONTEXT_LEVEL_KEYS, TERM_DEFINITION_KEYS};

/// Applies `value` (a `@context` entry: null, string, array, or object) to
/// `context`, mutating it in place. `base_url` is the IRI the context value
/// itself was found relative to (the enclosing document for an inline
/// context, or the remote document's own IRI once loaded).
pub fn apply_context(
	context: &mut Context,
	value: &Value,
	loader: &mut dyn ContextLoader,
	base_url: Option<&str>,
	override_protected: bool,
) -> Result<()> {
	match value {
		Value::Null => {
			if context.has_protected_terms() {
				return Err(ContextError::InvalidContextNullification);
			}
			context.clear_terms();
			context.reset_base_iri_to_document();
			Ok(())
		}
		Value::String(s) => apply_remote(context, s, loader, base_url, override_protected),
		Value::Array(items) => {
			for item in items {
				apply_context(context, item, loader, base_url, override_protected)?;
			}
			Ok(())
		}
		Value::Object(obj) => apply_object(context, obj, loader, base_url, override_protected),
		_ => Err(ContextError::InvalidContextEntry),
	}
}

fn apply_remote(
	context: &mut Context,
	reference: &str,
	loader: &mut dyn ContextLoader,
	base_url: Option<&str>,
	override_protected: bool,
) -> Result<()> {
	let resolved = resolve_reference(base_url.or_else(|| context.base_iri()), reference)
		.ok_or(ContextError::InvalidRemoteContext)?;

	if context.is_loading(&resolved) && context.processing_mode().is_1_0() {
		return Err(ContextError::RecursiveContextInclusion);
	}

	context
		.begin_loading(&resolved)
		.map_err(|_| ContextError::RecursiveContextInclusion)?;

	let result = (|| {
		let text = loader.load(&resolved, base_url)?;
		let parsed: Value = json_ld_syntax::parse(&text).map_err(|_| ContextError::InvalidRemoteContext)?;
		let Value::Object(obj) = &parsed else {
			return Err(ContextError::InvalidRemoteContext);
		};
		let inner = obj.get("@context").ok_or(ContextError::InvalidRemoteContext)?;
		apply_context(context, inner, loader, Some(&resolved), override_protected)
	})();

	context.end_loading(&resolved);
	result
}

fn apply_object(
	context: &mut Context,
	obj: &IndexMap<String, Value>,
	loader: &mut dyn ContextLoader,
	base_url: Option<&str>,
	override_protected: bool,
) -> Result<()> {
	for key in obj.keys() {
		if key.starts_with('@') && !CONTEXT_LEVEL_KEYS.contains(&key.as_str()) && !TERM_DEFINITION_KEYS.contains(&key.as_str())
		{
			return Err(ContextError::InvalidContextEntry);
		}
	}

	if let Some(version) = obj.get("@version") {
		let is_1_1 = matches!(version, Value::Number(n) if n.as_str() == "1.1");
		if !is_1_1 {
			return Err(ContextError::InvalidVersionValue);
		}
		if context.processing_mode().is_1_0() {
			return Err(ContextError::ProcessingModeConflict);
		}
		context.set_processing_mode(ProcessingMode::JsonLd1_1);
	}

	let context_level_protected = match obj.get("@protected") {
		Some(Value::Boolean(b)) => *b,
		Some(_) => return Err(ContextError::InvalidProtectedValue),
		None => false,
	};

	if let Some(import_value) = obj.get("@import") {
		if context.processing_mode().is_1_0() {
			return Err(ContextError::InvalidImportValue);
		}
		apply_import(context, import_value, loader, base_url)?;
	}

	if let Some(base_value) = obj.get("@base") {
		apply_base(context, base_value)?;
	}

	if let Some(vocab_value) = obj.get("@vocab") {
		apply_vocab(context, vocab_value)?;
	}

	if let Some(language_value) = obj.get("@language") {
		match language_value {
			Value::Null => context.set_default_language(None),
			Value::String(s) => {
				let (tag, well_formed) = json_ld_syntax::LenientLanguageTagBuf::new(s.clone());
				if !well_formed {
					log::warn!("malformed default language tag {s:?} retained verbatim");
				}
				context.set_default_language(Some(tag));
			}
			_ => return Err(ContextError::InvalidDefaultLanguage),
		}
	}

	if let Some(direction_value) = obj.get("@direction") {
		match direction_value {
			Value::Null => context.set_default_direction(None),
			Value::String(s) => {
				let dir = json_ld_syntax::Direction::try_from(s.as_str())
					.map_err(|_| ContextError::InvalidBaseDirection)?;
				context.set_default_direction(Some(dir));
			}
			_ => return Err(ContextError::InvalidBaseDirection),
		}
	}

	if let Some(propagate) = obj.get("@propagate") {
		if context.processing_mode().is_1_0() {
			return Err(ContextError::InvalidPropagateValue);
		}
		if !matches!(propagate, Value::Boolean(_)) {
			return Err(ContextError::InvalidPropagateValue);
		}
	}

	let mut defined = DefinedTerms::new();
	let terms: IndexMap<String, Value> = obj
		.iter()
		.filter(|(k, _)| Keyword::try_from_str(k).is_none() || k.as_str() == "@type")
		.map(|(k, v)| (k.clone(), v.clone()))
		.collect();

	for term in terms.keys() {
		define(
			context,
			&terms,
			term,
			&mut defined,
			loader,
			base_url,
			context_level_protected,
			override_protected,
		)?;
		// `define` already resolved the term's final `protected` flag,
		// folding in the context-level default and any explicit per-term
		// `@protected` override; mirror it into the protected-terms index
		// that context nullification and redefinition checks consult.
		match context.get(term) {
			Some(def) if def.protected => context.protect_term(term),
			_ => context.unprotect_term(term),
		}
	}

	Ok(())
}

fn apply_import(
	context: &mut Context,
	value: &Value,
	loader: &mut dyn ContextLoader,
	base_url: Option<&str>,
) -> Result<()> {
	let iri_str = value.as_str().ok_or(ContextError::InvalidImportValue)?;
	let resolved =
		resolve_reference(base_url.or_else(|| context.base_iri()), iri_str).ok_or(ContextError::InvalidImportValue)?;

	context.enter_import().map_err(|_| ContextError::ContextOverflow)?;
	let result = (|| {
		let text = loader.load(&resolved, base_url)?;
		let parsed: Value = json_ld_syntax::parse(&text).map_err(|_| ContextError::InvalidRemoteContext)?;
		let Value::Object(obj) = &parsed else {
			return Err(ContextError::InvalidImportValue);
		};
		if obj.contains_key("@import") {
			return Err(ContextError::InvalidContextEntry);
		}
		apply_context(context, &Value::Object(obj.clone()), loader, Some(&resolved), true)
	})();
	context.leave_import();
	result
}

fn apply_base(context: &mut Context, value: &Value) -> Result<()> {
	match value {
		Value::Null => {
			context.set_base_iri(None);
			Ok(())
		}
		Value::String(s) if s.is_empty() => Ok(()),
		Value::String(s) => {
			let resolved = resolve_reference(context.base_iri(), s).ok_or(ContextError::InvalidBaseIri)?;
			context.set_base_iri(Some(resolved));
			Ok(())
		}
		_ => Err(ContextError::InvalidBaseIri),
	}
}

fn apply_vocab(context: &mut Context, value: &Value) -> Result<()> {
	match value {
		Value::Null => {
			context.set_vocab_iri(None);
			Ok(())
		}
		Value::String(s) if s.is_empty() => {
			if context.processing_mode().is_1_0() {
				return Err(ContextError::InvalidVocabMapping);
			}
			context.set_vocab_iri(context.base_iri().map(str::to_string));
			Ok(())
		}
		Value::String(s) => {
			if crate::iri::is_absolute(s) || s.starts_with("_:") {
				context.set_vocab_iri(Some(s.clone()));
				return Ok(());
			}
			if let Some(compact) = json_ld_syntax::CompactIri::parse(s) {
				if let Some(expanded) = crate::iri::expand_compact(context, &compact) {
					context.set_vocab_iri(Some(expanded));
					return Ok(());
				}
			}
			if context.processing_mode().is_1_0() {
				return Err(ContextError::InvalidVocabMapping);
			}
			let expanded = match context.vocab_iri() {
				Some(current) => format!("{current}{s}"),
				None => resolve_reference(context.base_iri(), s).ok_or(ContextError::InvalidVocabMapping)?,
			};
			context.set_vocab_iri(Some(expanded));
			Ok(())
		}
		_ => Err(ContextError::InvalidVocabMapping),
	}
}
