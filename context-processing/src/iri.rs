//! IRI resolution (§4.1): absolute detection, compact-IRI expansion, term
//! lookup against a [`Context`], and RFC 3986 §5 reference resolution.

use json_ld_core::{has_absolute_scheme, Context, Term};
use json_ld_syntax::{CompactIri, Keyword};

pub fn is_absolute(s: &str) -> bool {
	has_absolute_scheme(s)
}

/// The five lookup strategies of §4.1's `expand_term`, each walking term
/// lookup / compact-IRI expansion / `@vocab` / `@base` in a different order
/// (or skipping a step entirely).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExpansionMode {
	/// `@id`-keyword position: compact-IRI try, then absolute check, then
	/// `@base` resolution. Never consults terms or `@vocab`.
	ForIdKeyword,
	/// A property name being expanded to a predicate IRI.
	ForPredicate,
	/// A term used as an explicit `@type` coercion target.
	ForDatatype,
	/// A string value coerced via `@type: @id`.
	ForIdCoerced,
	/// A node's `@type` entry value.
	ForType,
}

/// `expand_compact(prefix:local)` (§4.1): only succeeds when `prefix` names
/// a term with an IRI mapping and `prefix_usable` set.
pub fn expand_compact(context: &Context, compact: &CompactIri) -> Option<String> {
	if compact.prefix() == "_" {
		return None;
	}
	let def = context.get(compact.prefix())?;
	if !def.prefix_usable {
		return None;
	}
	let mapping = def.iri_mapping.as_deref()?;
	Some(format!("{mapping}{}", compact.suffix()))
}

/// Resolves `value` to a [`Term`] according to `mode`. Total: returns
/// `Term::Null` only when the input truly denotes absence; an unresolved
/// string otherwise comes back borrowed/owned unchanged so the caller can
/// apply its own drop-the-triple policy (§4.1 "Failure modes").
pub fn expand_term(context: &Context, value: &str, mode: ExpansionMode) -> Term {
	if value.is_empty() {
		return Term::Iri(String::new());
	}

	if let Some(kw) = Keyword::try_from_str(value) {
		return Term::Keyword(kw);
	}

	match mode {
		ExpansionMode::ForIdKeyword => expand_for_id_keyword(context, value),
		ExpansionMode::ForPredicate | ExpansionMode::ForDatatype | ExpansionMode::ForIdCoerced => {
			expand_via_vocab(context, value)
		}
		ExpansionMode::ForType => expand_for_type(context, value),
	}
}

fn term_mapping(context: &Context, value: &str) -> Option<Term> {
	let def = context.get(value)?;
	if let Some(kw) = def.keyword_alias {
		return Some(Term::Keyword(kw));
	}
	match &def.iri_mapping {
		Some(iri) => Some(Term::Iri(iri.clone())),
		None => Some(Term::Null),
	}
}

fn compact_or_absolute(context: &Context, value: &str) -> Option<Term> {
	if let Some(compact) = CompactIri::parse(value) {
		if let Some(expanded) = expand_compact(context, &compact) {
			return Some(Term::Iri(expanded));
		}
	}
	if is_absolute(value) {
		return Some(Term::Iri(value.to_string()));
	}
	if let Some(label) = value.strip_prefix("_:") {
		return Some(Term::Blank(label.to_string()));
	}
	None
}

fn expand_for_id_keyword(context: &Context, value: &str) -> Term {
	if let Some(term) = compact_or_absolute(context, value) {
		return term;
	}
	match resolve_reference(context.base_iri(), value) {
		Some(resolved) => Term::Iri(resolved),
		None => Term::Iri(value.to_string()),
	}
}

fn expand_via_vocab(context: &Context, value: &str) -> Term {
	if let Some(term) = term_mapping(context, value) {
		return term;
	}
	if let Some(term) = compact_or_absolute(context, value) {
		return term;
	}
	if !value.contains(':') {
		if let Some(vocab) = context.vocab_iri() {
			return Term::Iri(format!("{vocab}{value}"));
		}
	}
	Term::Iri(value.to_string())
}

fn expand_for_type(context: &Context, value: &str) -> Term {
	if let Some(term) = term_mapping(context, value) {
		return term;
	}
	if let Some(term) = compact_or_absolute(context, value) {
		return term;
	}
	if !value.contains(':') {
		if let Some(vocab) = context.vocab_iri() {
			return Term::Iri(format!("{vocab}{value}"));
		}
	}
	match resolve_reference(context.base_iri(), value) {
		Some(resolved) => Term::Iri(resolved),
		None => Term::Iri(value.to_string()),
	}
}

/// RFC 3986 §5.2/§5.3: resolves `reference` against `base`, removing dot
/// segments. Returns `None` only when there is no base and `reference` is
/// itself not absolute (nothing to resolve against).
pub fn resolve_reference(base: Option<&str>, reference: &str) -> Option<String> {
	if is_absolute(reference) {
		return Some(remove_dot_segments_from_iri(reference));
	}

	let base = base?;
	let (scheme, rest) = split_scheme(base)?;
	let base_parts = UriParts::parse(rest);
	// `reference` was already ruled out as absolute above, so it carries no
	// scheme of its own here.
	let ref_parts = RefParts::parse(reference);

	let (authority, path, query) = if ref_parts.authority.is_some() {
		(
			ref_parts.authority.map(str::to_string),
			remove_dot_segments(ref_parts.path),
			ref_parts.query.map(str::to_string),
		)
	} else if ref_parts.path.is_empty() {
		(
			base_parts.authority.map(str::to_string),
			base_parts.path.to_string(),
			ref_parts
				.query
				.map(str::to_string)
				.or_else(|| base_parts.query.map(str::to_string)),
		)
	} else if ref_parts.path.starts_with('/') {
		(
			base_parts.authority.map(str::to_string),
			remove_dot_segments(ref_parts.path),
			ref_parts.query.map(str::to_string),
		)
	} else {
		(
			base_parts.authority.map(str::to_string),
			remove_dot_segments(&merge_paths(&base_parts, ref_parts.path)),
			ref_parts.query.map(str::to_string),
		)
	};

	let mut out = String::new();
	out.push_str(scheme);
	out.push(':');
	if let Some(auth) = &authority {
		out.push_str("//");
		out.push_str(auth);
	}
	out.push_str(&path);
	if let Some(q) = &query {
		out.push('?');
		out.push_str(q);
	}
	if let Some(frag) = ref_parts.fragment {
		out.push('#');
		out.push_str(frag);
	}
	Some(out)
}

fn split_scheme(s: &str) -> Option<(&str, &str)> {
	if !has_absolute_scheme(s) {
		return None;
	}
	let colon = s.find(':')?;
	Some((&s[..colon], &s[colon + 1..]))
}

struct UriParts<'a> {
	authority: Option<&'a str>,
	path: &'a str,
	query: Option<&'a str>,
}

impl<'a> UriParts<'a> {
	fn parse(rest: &'a str) -> Self {
		let (rest, _fragment) = match rest.find('#') {
			Some(i) => (&rest[..i], Some(&rest[i + 1..])),
			None => (rest, None),
		};
		let (rest, query) = match rest.find('?') {
			Some(i) => (&rest[..i], Some(&rest[i + 1..])),
			None => (rest, None),
		};
		if let Some(after) = rest.strip_prefix("//") {
			let path_start = after.find('/').unwrap_or(after.len());
			Self {
				authority: Some(&after[..path_start]),
				path: &after[path_start..],
				query,
			}
		} else {
			Self {
				authority: None,
				path: rest,
				query,
			}
		}
	}
}

struct RefParts<'a> {
	authority: Option<&'a str>,
	path: &'a str,
	query: Option<&'a str>,
	fragment: Option<&'a str>,
}

impl<'a> RefParts<'a> {
	fn parse(s: &'a str) -> Self {
		let (s, fragment) = match s.find('#') {
			Some(i) => (&s[..i], Some(&s[i + 1..])),
			None => (s, None),
		};
		let (s, query) = match s.find('?') {
			Some(i) => (&s[..i], Some(&s[i + 1..])),
			None => (s, None),
		};
		if let Some(after) = s.strip_prefix("//") {
			let path_start = after.find('/').unwrap_or(after.len());
			Self {
				authority: Some(&after[..path_start]),
				path: &after[path_start..],
				query,
				fragment,
			}
		} else {
			Self {
				authority: None,
				path: s,
				query,
				fragment,
			}
		}
	}
}

fn merge_paths(base: &UriParts, ref_path: &str) -> String {
	if base.authority.is_some() && base.path.is_empty() {
		format!("/{ref_path}")
	} else if let Some(slash) = base.path.rfind('/') {
		format!("{}{}", &base.path[..=slash], ref_path)
	} else {
		ref_path.to_string()
	}
}

/// RFC 3986 §5.2.4, operating on `/`-separated segments directly rather
/// than the RFC's character-buffer formulation.
fn remove_dot_segments(path: &str) -> String {
	let mut output: Vec<&str> = Vec::new();
	let ends_with_slash = path.ends_with('/') || path.ends_with("/.") || path.ends_with("/..");

	for segment in path.split('/') {
		match segment {
			"." => {}
			".." => {
				output.pop();
			}
			_ => output.push(segment),
		}
	}

	let mut result = output.join("/");
	if ends_with_slash && !result.ends_with('/') {
		result.push('/');
	}
	result
}

fn remove_dot_segments_from_iri(iri: &str) -> String {
	match iri.find(|c| c == '?' || c == '#') {
		Some(i) => {
			let (path_part, rest) = iri.split_at(i);
			let scheme_end = path_part.find(':').map(|p| p + 1).unwrap_or(0);
			let (prefix, path) = path_part.split_at(scheme_end);
			format!("{prefix}{}{rest}", remove_dot_segments(path))
		}
		None => {
			let scheme_end = iri.find(':').map(|p| p + 1).unwrap_or(0);
			let (prefix, path) = iri.split_at(scheme_end);
			format!("{prefix}{}", remove_dot_segments(path))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolves_relative_path() {
		let resolved = resolve_reference(Some("http://example.org/a/b"), "c").unwrap();
		assert_eq!(resolved, "http://example.org/a/c");
	}

	#[test]
	fn resolves_absolute_path() {
		let resolved = resolve_reference(Some("http://example.org/a/b"), "/c").unwrap();
		assert_eq!(resolved, "http://example.org/c");
	}

	#[test]
	fn resolves_dot_dot_segments() {
		let resolved = resolve_reference(Some("http://example.org/a/b/c"), "../d").unwrap();
		assert_eq!(resolved, "http://example.org/a/d");
	}

	#[test]
	fn preserves_opaque_base_like_tag() {
		let resolved = resolve_reference(Some("tag:example.org,2021:a/b"), "c").unwrap();
		assert_eq!(resolved, "tag:example.org,2021:a/c");
	}

	#[test]
	fn absolute_reference_is_returned_verbatim() {
		let resolved = resolve_reference(Some("http://example.org/"), "http://other.org/x").unwrap();
		assert_eq!(resolved, "http://other.org/x");
	}

	#[test]
	fn no_base_and_relative_reference_fails() {
		assert!(resolve_reference(None, "relative").is_none());
	}
}
