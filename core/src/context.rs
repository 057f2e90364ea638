use crate::{ProcessingMode, RdfDirectionMode, TermDefinition};
use json_ld_syntax::{Direction, Keyword, LenientLanguageTagBuf};
use std::collections::{BTreeSet, HashMap, HashSet};

/// The default number of `@import`/remote-context hops a single context
/// application may take before aborting with `context overflow` (§3, §6).
pub const MAX_IMPORT_DEPTH: usize = 10;

/// A frame: the active set of term definitions plus the base/vocab/
/// language/direction/mode state described in §3 "Frame".
///
/// `Context` (teacher naming) and "frame" (spec naming) refer to the same
/// thing; this type keeps the teacher's type name since `Frame` is already
/// used here as the spec's vocabulary word for what a `Context` value *is*
/// at any instant.
#[derive(Clone, Debug)]
pub struct Context {
	terms: HashMap<String, TermDefinition>,
	/// For each keyword, every term currently aliased to it (transitive:
	/// if `t` aliases `@type` and `k` aliases `t`, `k` is in this set too).
	alias_sets: HashMap<Keyword, BTreeSet<String>>,
	/// Terms explicitly mapped to `null`: retained so future context
	/// applications can still detect a redefinition attempt, but not
	/// usable for expansion.
	null_terms: HashSet<String>,
	document_base: Option<String>,
	base_iri: Option<String>,
	vocab_iri: Option<String>,
	default_language: Option<LenientLanguageTagBuf>,
	default_direction: Option<Direction>,
	processing_mode: ProcessingMode,
	rdf_direction_mode: RdfDirectionMode,
	protected_terms: HashSet<String>,
	loaded_contexts: Vec<String>,
	import_depth: usize,
}

impl Context {
	pub fn new(document_base: Option<String>, processing_mode: ProcessingMode) -> Self {
		Self {
			terms: HashMap::new(),
			alias_sets: HashMap::new(),
			null_terms: HashSet::new(),
			base_iri: document_base.clone(),
			document_base,
			vocab_iri: None,
			default_language: None,
			default_direction: None,
			processing_mode,
			rdf_direction_mode: RdfDirectionMode::None,
			protected_terms: HashSet::new(),
			loaded_contexts: Vec::new(),
			import_depth: 0,
		}
	}

	pub fn processing_mode(&self) -> ProcessingMode {
		self.processing_mode
	}

	pub fn set_processing_mode(&mut self, mode: ProcessingMode) {
		self.processing_mode = mode;
	}

	pub fn rdf_direction_mode(&self) -> RdfDirectionMode {
		self.rdf_direction_mode
	}

	pub fn set_rdf_direction_mode(&mut self, mode: RdfDirectionMode) {
		self.rdf_direction_mode = mode;
	}

	pub fn base_iri(&self) -> Option<&str> {
		self.base_iri.as_deref()
	}

	pub fn set_base_iri(&mut self, iri: Option<String>) {
		self.base_iri = iri;
	}

	/// Resets `base_iri` back to the document base, distinct from
	/// `@base: null` which clears it entirely (§4.3 "Null").
	pub fn reset_base_iri_to_document(&mut self) {
		self.base_iri = self.document_base.clone();
	}

	pub fn vocab_iri(&self) -> Option<&str> {
		self.vocab_iri.as_deref()
	}

	pub fn set_vocab_iri(&mut self, iri: Option<String>) {
		self.vocab_iri = iri;
	}

	pub fn default_language(&self) -> Option<&LenientLanguageTagBuf> {
		self.default_language.as_ref()
	}

	pub fn set_default_language(&mut self, lang: Option<LenientLanguageTagBuf>) {
		self.default_language = lang;
	}

	pub fn default_direction(&self) -> Option<Direction> {
		self.default_direction
	}

	pub fn set_default_direction(&mut self, dir: Option<Direction>) {
		self.default_direction = dir;
	}

	pub fn get(&self, term: &str) -> Option<&TermDefinition> {
		self.terms.get(term)
	}

	pub fn contains_term(&self, term: &str) -> bool {
		self.terms.contains_key(term) || self.null_terms.contains(term)
	}

	pub fn is_null_term(&self, term: &str) -> bool {
		self.null_terms.contains(term)
	}

	/// Sets (or removes, with `None`) the definition of `term`, keeping the
	/// keyword alias index consistent.
	pub fn set(&mut self, term: String, definition: Option<TermDefinition>) -> Option<TermDefinition> {
		if let Some(previous) = self.terms.get(&term) {
			if let Some(kw) = previous.keyword_alias {
				if let Some(set) = self.alias_sets.get_mut(&kw) {
					set.remove(&term);
				}
			}
		}
		self.null_terms.remove(&term);

		match definition {
			Some(def) => {
				if let Some(kw) = def.keyword_alias {
					self.alias_sets.entry(kw).or_default().insert(term.clone());
					// Transitive closure: anything already aliased to `term`
					// (as a non-keyword alias chain is impossible by
					// construction, but an alias-of-an-alias such as
					// `{"t": "@type", "kind": "t"}` is resolved by the
					// caller before `set` is invoked) is handled by the
					// caller re-registering through `alias_of`.
				}
				self.terms.insert(term, def)
			}
			None => {
				self.null_terms.insert(term.clone());
				self.terms.remove(&term)
			}
		}
	}

	/// All terms that currently (transitively) alias `keyword`, including
	/// the keyword's own canonical spelling is NOT included (callers that
	/// need to match "@type or any alias" should check the keyword string
	/// separately).
	pub fn aliases_of(&self, keyword: Keyword) -> impl Iterator<Item = &str> {
		self.alias_sets
			.get(&keyword)
			.into_iter()
			.flat_map(|set| set.iter().map(String::as_str))
	}

	pub fn is_alias_of(&self, term: &str, keyword: Keyword) -> bool {
		self.alias_sets
			.get(&keyword)
			.is_some_and(|set| set.contains(term))
	}

	pub fn protect_term(&mut self, term: &str) {
		self.protected_terms.insert(term.to_string());
	}

	pub fn unprotect_term(&mut self, term: &str) {
		self.protected_terms.remove(term);
	}

	pub fn is_protected(&self, term: &str) -> bool {
		self.protected_terms.contains(term)
	}

	pub fn has_protected_terms(&self) -> bool {
		!self.protected_terms.is_empty()
	}

	pub fn protected_terms(&self) -> impl Iterator<Item = &str> {
		self.protected_terms.iter().map(String::as_str)
	}

	/// Clears all term-related state (the `Null` case of §4.3), but leaves
	/// `base_iri` to the caller (it resets to the document base, not to
	/// `None`, which is a different operation from `@base: null`).
	pub fn clear_terms(&mut self) {
		self.terms.clear();
		self.alias_sets.clear();
		self.null_terms.clear();
		self.vocab_iri = None;
		self.default_language = None;
		self.default_direction = None;
		self.protected_terms.clear();
	}

	pub fn begin_loading(&mut self, iri: &str) -> Result<(), ()> {
		if self.loaded_contexts.iter().any(|l| l == iri) {
			return Err(());
		}
		self.loaded_contexts.push(iri.to_string());
		Ok(())
	}

	pub fn end_loading(&mut self, iri: &str) {
		if let Some(pos) = self.loaded_contexts.iter().rposition(|l| l == iri) {
			self.loaded_contexts.remove(pos);
		}
	}

	pub fn is_loading(&self, iri: &str) -> bool {
		self.loaded_contexts.iter().any(|l| l == iri)
	}

	pub fn import_depth(&self) -> usize {
		self.import_depth
	}

	pub fn enter_import(&mut self) -> Result<(), ()> {
		if self.import_depth >= MAX_IMPORT_DEPTH {
			return Err(());
		}
		self.import_depth += 1;
		Ok(())
	}

	pub fn leave_import(&mut self) {
		self.import_depth = self.import_depth.saturating_sub(1);
	}

	pub fn terms(&self) -> impl Iterator<Item = (&str, &TermDefinition)> {
		self.terms.iter().map(|(k, v)| (k.as_str(), v))
	}
}
