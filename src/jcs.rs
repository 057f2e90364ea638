//! JSON Canonicalization Scheme (§4.8, RFC 8785), used only to produce the
//! lexical form of `rdf:JSON` literals (§4.7's `@type: @json` coercion).
//!
//! Grounded in the same escaping table the core's [`crate::Literal`] quad
//! display uses (`core/src/quad.rs`), generalised to every control
//! character RFC 8785 requires, plus RFC 8785's own sorted-keys/shortest-
//! number rules layered on top.

use indexmap::IndexMap;
use json_ld_syntax::{Number, Value};

pub fn canonicalize(value: &Value) -> String {
	let mut out = String::new();
	write_value(value, &mut out);
	out
}

fn write_value(value: &Value, out: &mut String) {
	match value {
		Value::Null => out.push_str("null"),
		Value::Boolean(true) => out.push_str("true"),
		Value::Boolean(false) => out.push_str("false"),
		Value::Number(n) => out.push_str(&canonical_number(n)),
		Value::String(s) => write_string(s, out),
		Value::Array(items) => {
			out.push('[');
			for (i, item) in items.iter().enumerate() {
				if i > 0 {
					out.push(',');
				}
				write_value(item, out);
			}
			out.push(']');
		}
		Value::Object(obj) => write_object(obj, out),
	}
}

fn write_object(obj: &IndexMap<String, Value>, out: &mut String) {
	let mut keys: Vec<&String> = obj.keys().collect();
	// RFC 8785 §3.2.3: sort by UTF-16 code-unit order. Rust `str` ordering
	// is by scalar value, which coincides with UTF-16 code-unit order for
	// every code point outside the surrogate range — JSON text cannot
	// itself contain an unpaired surrogate once parsed into a `char`, so
	// the two orders agree here.
	keys.sort();
	out.push('{');
	for (i, key) in keys.iter().enumerate() {
		if i > 0 {
			out.push(',');
		}
		write_string(key, out);
		out.push(':');
		write_value(&obj[*key], out);
	}
	out.push('}');
}

fn write_string(s: &str, out: &mut String) {
	out.push('"');
	for c in s.chars() {
		match c {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\u{8}' => out.push_str("\\b"),
			'\u{c}' => out.push_str("\\f"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
			c => out.push(c),
		}
	}
	out.push('"');
}

/// RFC 8785 §3.2.2.3's number serialization reduces to ECMAScript's
/// `Number::toString`: shortest round-tripping decimal digits, lowercase
/// `e`, no redundant leading zero in the exponent, and plain-integer form
/// whenever no fraction or exponent is needed. Rust's own `f64` `Display`
/// already produces shortest-round-trip digits; this only has to reshape
/// its output into ECMAScript's specific exponent notation thresholds.
fn canonical_number(n: &Number) -> String {
	if n.is_integer_lexical() {
		if let Some(i) = n.as_i128() {
			return i.to_string();
		}
	}
	let f = n.as_f64_lossy();
	if f == 0.0 {
		return if f.is_sign_negative() { "0".to_string() } else { "0".to_string() };
	}
	if !f.is_finite() {
		// RFC 8785 numbers are always finite per JSON's own grammar; a
		// non-finite lexical form could only arrive from already-invalid
		// upstream JSON, so keep the lexical text verbatim rather than
		// emit JSON that doesn't parse back.
		return n.as_str().to_string();
	}

	let shortest = format!("{f}");
	if let Some((mantissa, exp)) = shortest.split_once('e') {
		format!("{mantissa}e{}", normalize_exponent(exp))
	} else {
		shortest
	}
}

fn normalize_exponent(exp: &str) -> String {
	let (sign, digits) = match exp.strip_prefix('-') {
		Some(rest) => ("-", rest),
		None => ("+", exp.strip_prefix('+').unwrap_or(exp)),
	};
	format!("{sign}{digits}")
}

#[cfg(test)]
mod tests {
	use super::*;
	use indexmap::IndexMap;

	fn obj(pairs: Vec<(&str, Value)>) -> Value {
		let mut map = IndexMap::new();
		for (k, v) in pairs {
			map.insert(k.to_string(), v);
		}
		Value::Object(map)
	}

	#[test]
	fn sorts_object_keys() {
		let value = obj(vec![("b", Value::Number(Number::from_i64(1))), ("a", Value::Number(Number::from_i64(2)))]);
		assert_eq!(canonicalize(&value), r#"{"a":2,"b":1}"#);
	}

	#[test]
	fn escapes_control_characters() {
		let value = Value::String("a\nb\u{1}c".to_string());
		assert_eq!(canonicalize(&value), "\"a\\nb\\u0001c\"");
	}

	#[test]
	fn keeps_plain_integer_form() {
		let value = Value::Number(Number::from_lexical("42"));
		assert_eq!(canonicalize(&value), "42");
	}
}
