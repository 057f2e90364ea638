//! Term-definition builder (§4.2), ported from the teacher's
//! `create term definition` algorithm into a synchronous, non-generic form.

use crate::error::{ContextError, Result};
use crate::iri::{expand_term, ExpansionMode};
use indexmap::IndexMap;
use json_ld_core::{Context, ContextLoader, ProcessingMode, Term, TermDefinition, TypeCoercion};
use json_ld_syntax::{CompactIri, Container, ContainerKind, Keyword, Value};

/// Guards against a term definition that (directly or through `@id`/prefix
/// lookups) depends on its own completion — `cyclic IRI mapping` (§4.2).
#[derive(Default)]
pub struct DefinedTerms {
	state: IndexMap<String, bool>,
}

impl DefinedTerms {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `Ok(true)` when the caller should proceed to build the
	/// definition, `Ok(false)` when `term` is already fully defined in this
	/// pass (nothing to do).
	fn begin(&mut self, term: &str) -> Result<bool> {
		match self.state.get(term) {
			Some(true) => Err(ContextError::CyclicIriMapping),
			Some(false) => Ok(false),
			None => {
				self.state.insert(term.to_string(), true);
				Ok(true)
			}
		}
	}

	fn end(&mut self, term: &str) {
		self.state.insert(term.to_string(), false);
	}
}

fn is_gen_delim(c: char) -> bool {
	matches!(c, ':' | '/' | '?' | '#' | '[' | ']' | '@')
}

fn ends_with_gen_delim_or_is_blank(term: &Term) -> bool {
	match term {
		Term::Blank(_) => true,
		Term::Iri(iri) => iri.chars().last().is_some_and(is_gen_delim),
		_ => false,
	}
}

fn contains_between_boundaries(s: &str, c: char) -> bool {
	match (s.find(c), s.rfind(c)) {
		(Some(i), Some(j)) => i > 0 && j < s.len() - 1,
		_ => false,
	}
}

/// Builds (or rebuilds) the term definition for `term`, following the local
/// context object `local_context`. `base_url` is the base the defining
/// context was loaded relative to (used only for `@context`-valued scoped
/// contexts, §4.2's `@context` entry).
pub fn define(
	active_context: &mut Context,
	local_context: &IndexMap<String, Value>,
	term: &str,
	defined: &mut DefinedTerms,
	loader: &mut dyn ContextLoader,
	base_url: Option<&str>,
	protected: bool,
	override_protected: bool,
) -> Result<()> {
	if !defined.begin(term)? {
		return Ok(());
	}

	if term.is_empty() {
		return Err(ContextError::InvalidTermDefinition);
	}

	let Some(raw_value) = local_context.get(term) else {
		defined.end(term);
		return Ok(());
	};

	if term == "@type" {
		if active_context.processing_mode().is_1_0() {
			return Err(ContextError::KeywordRedefinition);
		}
		// Only `{"@container": "@set"}` and/or `{"@protected": ...}` are
		// legal here; anything else was already rejected by the syntax
		// layer's permitted-key check before reaching this point.
		defined.end(term);
		return Ok(());
	}

	if Keyword::try_from_str(term).is_some() {
		return Err(ContextError::KeywordRedefinition);
	}

	let previous_definition = active_context.set(term.to_string(), None);

	let mut definition = TermDefinition {
		protected,
		..Default::default()
	};

	let Value::Object(obj) = raw_value else {
		return build_simple_term_definition(
			active_context,
			local_context,
			term,
			raw_value,
			defined,
			loader,
			base_url,
			definition,
			previous_definition,
			override_protected,
		);
	};

	for key in obj.keys() {
		if key.starts_with('@') && !json_ld_syntax::TERM_DEFINITION_KEYS.contains(&key.as_str()) {
			return Err(ContextError::InvalidTermDefinition);
		}
	}

	if let Some(Value::Boolean(p)) = obj.get("@protected") {
		if active_context.processing_mode().is_1_0() {
			return Err(ContextError::InvalidTermDefinition);
		}
		definition.protected = *p;
	}

	if let Some(type_value) = obj.get("@type") {
		let type_str = type_value
			.as_str()
			.ok_or(ContextError::InvalidTypeMapping)?;
		let expanded = resolve_type_like(
			active_context,
			local_context,
			type_str,
			defined,
			loader,
			base_url,
		)?;
		match &expanded {
			Term::Keyword(Keyword::Json) | Term::Keyword(Keyword::None)
				if active_context.processing_mode().is_1_0() =>
			{
				return Err(ContextError::InvalidTypeMapping);
			}
			Term::Keyword(Keyword::Json) => definition.type_coercion = Some(TypeCoercion::Json),
			Term::Keyword(Keyword::None) => definition.type_coercion = Some(TypeCoercion::None),
			Term::Keyword(Keyword::Id) => definition.type_coercion = Some(TypeCoercion::Id),
			Term::Keyword(Keyword::Vocab) => definition.type_coercion = Some(TypeCoercion::Vocab),
			Term::Iri(iri) => definition.type_coercion = Some(TypeCoercion::Datatype(iri.clone())),
			_ => return Err(ContextError::InvalidTypeMapping),
		}
	}

	if let Some(reverse_value) = obj.get("@reverse") {
		if obj.contains_key("@id") || obj.contains_key("@nest") {
			return Err(ContextError::InvalidReverseProperty);
		}
		let reverse_str = reverse_value
			.as_str()
			.ok_or(ContextError::InvalidReverseProperty)?;
		if json_ld_syntax::is_keyword_like(reverse_str) && Keyword::try_from_str(reverse_str).is_none() {
			defined.end(term);
			return Ok(());
		}
		let expanded = resolve_id_like(
			active_context,
			local_context,
			reverse_str,
			defined,
			loader,
			base_url,
		)?;
		match expanded {
			Term::Iri(iri) => definition.iri_mapping = Some(iri),
			Term::Blank(label) => definition.iri_mapping = Some(format!("_:{label}")),
			_ => return Err(ContextError::InvalidIriMapping),
		}

		if let Some(container_value) = obj.get("@container") {
			definition.container = parse_reverse_container(container_value)?;
		}
		definition.reverse_property = true;
		finish_definition(active_context, term, definition, previous_definition, override_protected)?;
		defined.end(term);
		return Ok(());
	}

	match obj.get("@id") {
		Some(Value::Null) => {
			// Retained with no IRI mapping, to block future redefinition.
		}
		Some(id_value) if id_value.as_str() != Some(term) => {
			let id_str = id_value.as_str().ok_or(ContextError::InvalidIriMapping)?;
			if json_ld_syntax::is_keyword_like(id_str) && Keyword::try_from_str(id_str).is_none() {
				defined.end(term);
				return Ok(());
			}
			let expanded = resolve_id_like(active_context, local_context, id_str, defined, loader, base_url)?;
			match &expanded {
				Term::Keyword(Keyword::Context) => return Err(ContextError::InvalidKeywordAlias),
				Term::Keyword(kw) => {
					if active_context.processing_mode().is_1_0() {
						return Err(ContextError::InvalidKeywordAlias);
					}
					definition.keyword_alias = Some(*kw);
				}
				Term::Iri(iri) => definition.iri_mapping = Some(iri.clone()),
				Term::Blank(label) => definition.iri_mapping = Some(format!("_:{label}")),
				Term::Null => return Err(ContextError::InvalidIriMapping),
			}

			if contains_between_boundaries(term, ':') || term.contains('/') {
				defined.end(term);
				let re_expanded =
					resolve_id_like(active_context, local_context, term, defined, loader, base_url)?;
				if expanded != re_expanded {
					return Err(ContextError::InvalidIriMapping);
				}
			}

			let simple_term = !term.contains(':') && !term.contains('/');
			if simple_term && ends_with_gen_delim_or_is_blank(&expanded) {
				definition.prefix_usable = true;
			}
		}
		Some(_) => {
			// `@id` equals `term` itself: fall through to vocab-relative
			// resolution below, as if no `@id` entry had been given.
			resolve_vocab_relative(active_context, term, &mut definition)?;
		}
		None => {
			resolve_vocab_relative(active_context, term, &mut definition)?;
		}
	}

	if let Some(container_value) = obj.get("@container") {
		definition.container = parse_container(container_value, active_context.processing_mode())?;
		if definition.container.contains(ContainerKind::Type) {
			match &definition.type_coercion {
				Some(TypeCoercion::Id) | Some(TypeCoercion::Vocab) => {}
				None => definition.type_coercion = Some(TypeCoercion::Id),
				_ => return Err(ContextError::InvalidTypeMapping),
			}
		}
	}

	if let Some(index_value) = obj.get("@index") {
		if active_context.processing_mode().is_1_0() || !definition.container.contains(ContainerKind::Index) {
			return Err(ContextError::InvalidTermDefinition);
		}
		let index_str = index_value.as_str().ok_or(ContextError::InvalidIndexValue)?;
		if Keyword::try_from_str(index_str).is_some() {
			return Err(ContextError::InvalidIndexValue);
		}
		match expand_term(active_context, index_str, ExpansionMode::ForPredicate) {
			Term::Iri(_) => {}
			_ => return Err(ContextError::InvalidIndexValue),
		}
		definition.index_property = Some(index_str.to_string());
	}

	if let Some(scoped) = obj.get("@context") {
		if active_context.processing_mode().is_1_0() {
			return Err(ContextError::InvalidTermDefinition);
		}
		crate::engine::apply_context(
			&mut active_context.clone(),
			scoped,
			loader,
			base_url,
			true,
		)
		.map_err(|_| ContextError::InvalidScopedContext)?;
		definition.scoped_context = Some(scoped.clone());
		definition.scoped_context_base = base_url.map(str::to_string);
	}

	if !obj.contains_key("@type") {
		if let Some(lang_value) = obj.get("@language") {
			definition.language = parse_language_override(lang_value)?;
		}
		if let Some(dir_value) = obj.get("@direction") {
			definition.direction = parse_direction_override(dir_value)?;
		}
	}

	if let Some(nest_value) = obj.get("@nest") {
		if active_context.processing_mode().is_1_0() {
			return Err(ContextError::InvalidTermDefinition);
		}
		let nest_str = nest_value.as_str().ok_or(ContextError::InvalidNestValue)?;
		if Keyword::try_from_str(nest_str).is_some() && nest_str != "@nest" {
			return Err(ContextError::InvalidNestValue);
		}
		definition.nest_key = Some(nest_str.to_string());
	}

	if let Some(Value::Boolean(prefix_value)) = obj.get("@prefix") {
		if term.contains(':') || term.contains('/') || active_context.processing_mode().is_1_0() {
			return Err(ContextError::InvalidTermDefinition);
		}
		definition.prefix_usable = *prefix_value;
		if definition.prefix_usable && definition.keyword_alias.is_some() {
			return Err(ContextError::InvalidTermDefinition);
		}
	}

	finish_definition(active_context, term, definition, previous_definition, override_protected)?;
	defined.end(term);
	Ok(())
}

fn resolve_vocab_relative(active_context: &Context, term: &str, definition: &mut TermDefinition) -> Result<()> {
	if let Some(compact) = CompactIri::parse(term) {
		if let Some(prefix_def) = active_context.get(compact.prefix()) {
			if let Some(mapping) = &prefix_def.iri_mapping {
				definition.iri_mapping = Some(format!("{mapping}{}", compact.suffix()));
				return Ok(());
			}
		}
		definition.iri_mapping = Some(term.to_string());
		return Ok(());
	}
	if let Some(label) = term.strip_prefix("_:") {
		definition.iri_mapping = Some(format!("_:{label}"));
		return Ok(());
	}
	if let Some(vocab) = active_context.vocab_iri() {
		definition.iri_mapping = Some(format!("{vocab}{term}"));
		Ok(())
	} else {
		Err(ContextError::InvalidIriMapping)
	}
}

#[allow(clippy::too_many_arguments)]
fn build_simple_term_definition(
	active_context: &mut Context,
	local_context: &IndexMap<String, Value>,
	term: &str,
	raw_value: &Value,
	defined: &mut DefinedTerms,
	loader: &mut dyn ContextLoader,
	base_url: Option<&str>,
	mut definition: TermDefinition,
	previous_definition: Option<TermDefinition>,
	override_protected: bool,
) -> Result<()> {
	match raw_value {
		Value::Null => {}
		Value::String(s) => {
			if json_ld_syntax::is_keyword_like(s) && Keyword::try_from_str(s).is_none() {
				defined.end(term);
				return Ok(());
			}
			let expanded = resolve_id_like(active_context, local_context, s, defined, loader, base_url)?;
			match expanded {
				Term::Keyword(Keyword::Context) => return Err(ContextError::InvalidKeywordAlias),
				Term::Keyword(kw) => {
					if active_context.processing_mode().is_1_0() {
						return Err(ContextError::InvalidKeywordAlias);
					}
					definition.keyword_alias = Some(kw);
				}
				Term::Iri(iri) => {
					definition.iri_mapping = Some(iri);
					let simple_term = !term.contains(':') && !term.contains('/');
					if simple_term {
						let mapping = definition.iri_mapping.as_ref().unwrap();
						if mapping.ends_with(is_gen_delim) {
							definition.prefix_usable = true;
						}
					}
				}
				Term::Blank(label) => definition.iri_mapping = Some(format!("_:{label}")),
				Term::Null => return Err(ContextError::InvalidIriMapping),
			}
		}
		_ => return Err(ContextError::InvalidTermDefinition),
	}
	finish_definition(active_context, term, definition, previous_definition, override_protected)?;
	defined.end(term);
	Ok(())
}

fn finish_definition(
	active_context: &mut Context,
	term: &str,
	mut definition: TermDefinition,
	previous_definition: Option<TermDefinition>,
	override_protected: bool,
) -> Result<()> {
	if !override_protected {
		if let Some(previous) = &previous_definition {
			if previous.protected {
				if !definition.same_definition_as(previous) {
					return Err(ContextError::ProtectedTermRedefinition);
				}
				definition.protected = true;
			}
		}
	}
	active_context.set(term.to_string(), Some(definition));
	Ok(())
}

/// IRI-expands a term-definition value (`@id`, `@reverse`, compact IRI
/// prefix, ...) against the local context being processed, defining any
/// dependency term first (§4.2's recursive `define` calls).
fn resolve_id_like(
	active_context: &mut Context,
	local_context: &IndexMap<String, Value>,
	value: &str,
	defined: &mut DefinedTerms,
	loader: &mut dyn ContextLoader,
	base_url: Option<&str>,
) -> Result<Term> {
	if let Some(kw) = Keyword::try_from_str(value) {
		return Ok(Term::Keyword(kw));
	}
	if local_context.contains_key(value) {
		define(active_context, local_context, value, defined, loader, base_url, false, false)?;
	}
	if let Some(def) = active_context.get(value) {
		if let Some(kw) = def.keyword_alias {
			return Ok(Term::Keyword(kw));
		}
		return Ok(match &def.iri_mapping {
			Some(iri) => Term::Iri(iri.clone()),
			None => Term::Null,
		});
	}
	if let Some(label) = value.strip_prefix("_:") {
		return Ok(Term::Blank(label.to_string()));
	}
	if let Some(compact) = CompactIri::parse(value) {
		if local_context.contains_key(compact.prefix()) {
			define(
				active_context,
				local_context,
				compact.prefix(),
				defined,
				loader,
				base_url,
				false,
				false,
			)?;
		}
		if let Some(prefix_def) = active_context.get(compact.prefix()) {
			if prefix_def.prefix_usable {
				if let Some(mapping) = &prefix_def.iri_mapping {
					return Ok(Term::Iri(format!("{mapping}{}", compact.suffix())));
				}
			}
		}
	}
	Ok(expand_term(active_context, value, ExpansionMode::ForIdKeyword))
}

fn resolve_type_like(
	active_context: &mut Context,
	local_context: &IndexMap<String, Value>,
	value: &str,
	defined: &mut DefinedTerms,
	loader: &mut dyn ContextLoader,
	base_url: Option<&str>,
) -> Result<Term> {
	resolve_id_like(active_context, local_context, value, defined, loader, base_url)
}

fn parse_container(value: &Value, mode: ProcessingMode) -> Result<Container> {
	let kinds: Vec<ContainerKind> = match value {
		Value::String(s) => vec![ContainerKind::try_from_str(s).ok_or(ContextError::InvalidContainerMapping)?],
		Value::Array(items) => items
			.iter()
			.map(|v| {
				v.as_str()
					.and_then(ContainerKind::try_from_str)
					.ok_or(ContextError::InvalidContainerMapping)
			})
			.collect::<Result<_>>()?,
		Value::Null => Vec::new(),
		_ => return Err(ContextError::InvalidContainerMapping),
	};
	if mode.is_1_0() && kinds.iter().any(|k| k.is_1_1_only()) {
		return Err(ContextError::InvalidContainerMapping);
	}
	Ok(Container::from_kinds(kinds))
}

fn parse_reverse_container(value: &Value) -> Result<Container> {
	match value {
		Value::Null => Ok(Container::NONE),
		Value::String(s) => match ContainerKind::try_from_str(s) {
			Some(k @ (ContainerKind::Set | ContainerKind::Index)) => Ok(Container::single(k)),
			_ => Err(ContextError::InvalidReverseProperty),
		},
		_ => Err(ContextError::InvalidReverseProperty),
	}
}

fn parse_language_override(value: &Value) -> Result<json_ld_core::LanguageOverride> {
	use json_ld_core::Override;
	match value {
		Value::Null => Ok(Override::None),
		Value::String(s) => {
			let (tag, well_formed) = json_ld_syntax::LenientLanguageTagBuf::new(s.clone());
			if !well_formed {
				log::warn!("malformed language tag {s:?} retained verbatim");
			}
			Ok(Override::Explicit(tag))
		}
		_ => Err(ContextError::InvalidDefaultLanguage),
	}
}

fn parse_direction_override(value: &Value) -> Result<json_ld_core::DirectionOverride> {
	use json_ld_core::Override;
	match value {
		Value::Null => Ok(Override::None),
		Value::String(s) => json_ld_syntax::Direction::try_from(s.as_str())
			.map(Override::Explicit)
			.map_err(|_| ContextError::InvalidBaseDirection),
		_ => Err(ContextError::InvalidBaseDirection),
	}
}
