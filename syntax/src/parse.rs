//! A small recursive-descent JSON parser producing [`Value`].
//!
//! Remote and imported `@context` documents arrive from a
//! [`ContextLoader`](../json_ld_core/trait.ContextLoader.html) as raw text,
//! not as a pre-built DOM (only the *top-level* document the caller drives
//! the transducer over is handed in already parsed). This parser exists
//! only to turn that text back into the same [`Value`] shape, keeping
//! verbatim numeric lexical forms and object key order exactly like the
//! externally-supplied DOM does.

use crate::json::{Number, Value};
use indexmap::IndexMap;
use std::fmt;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParseError {
	pub message: String,
	pub offset: usize,
}

impl fmt::Display for ParseError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{} (at byte {})", self.message, self.offset)
	}
}

impl std::error::Error for ParseError {}

pub fn parse(input: &str) -> Result<Value, ParseError> {
	let mut parser = Parser {
		bytes: input.as_bytes(),
		pos: 0,
	};
	parser.skip_whitespace();
	let value = parser.parse_value()?;
	parser.skip_whitespace();
	if parser.pos != parser.bytes.len() {
		return Err(parser.error("trailing data after top-level value"));
	}
	Ok(value)
}

struct Parser<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Parser<'a> {
	fn error(&self, message: impl Into<String>) -> ParseError {
		ParseError {
			message: message.into(),
			offset: self.pos,
		}
	}

	fn peek(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	fn skip_whitespace(&mut self) {
		while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
			self.pos += 1;
		}
	}

	fn expect(&mut self, byte: u8) -> Result<(), ParseError> {
		if self.peek() == Some(byte) {
			self.pos += 1;
			Ok(())
		} else {
			Err(self.error(format!("expected '{}'", byte as char)))
		}
	}

	fn literal(&mut self, text: &str) -> Result<(), ParseError> {
		let bytes = text.as_bytes();
		if self.bytes[self.pos..].starts_with(bytes) {
			self.pos += bytes.len();
			Ok(())
		} else {
			Err(self.error(format!("expected `{text}`")))
		}
	}

	fn parse_value(&mut self) -> Result<Value, ParseError> {
		self.skip_whitespace();
		match self.peek() {
			Some(b'{') => self.parse_object(),
			Some(b'[') => self.parse_array(),
			Some(b'"') => self.parse_string().map(Value::String),
			Some(b't') => self.literal("true").map(|_| Value::Boolean(true)),
			Some(b'f') => self.literal("false").map(|_| Value::Boolean(false)),
			Some(b'n') => self.literal("null").map(|_| Value::Null),
			Some(c) if c == b'-' || c.is_ascii_digit() => self.parse_number().map(Value::Number),
			_ => Err(self.error("unexpected character")),
		}
	}

	fn parse_object(&mut self) -> Result<Value, ParseError> {
		self.expect(b'{')?;
		let mut map = IndexMap::new();
		self.skip_whitespace();
		if self.peek() == Some(b'}') {
			self.pos += 1;
			return Ok(Value::Object(map));
		}
		loop {
			self.skip_whitespace();
			let key = self.parse_string()?;
			self.skip_whitespace();
			self.expect(b':')?;
			let value = self.parse_value()?;
			map.insert(key, value);
			self.skip_whitespace();
			match self.peek() {
				Some(b',') => {
					self.pos += 1;
				}
				Some(b'}') => {
					self.pos += 1;
					break;
				}
				_ => return Err(self.error("expected ',' or '}' in object")),
			}
		}
		Ok(Value::Object(map))
	}

	fn parse_array(&mut self) -> Result<Value, ParseError> {
		self.expect(b'[')?;
		let mut items = Vec::new();
		self.skip_whitespace();
		if self.peek() == Some(b']') {
			self.pos += 1;
			return Ok(Value::Array(items));
		}
		loop {
			let value = self.parse_value()?;
			items.push(value);
			self.skip_whitespace();
			match self.peek() {
				Some(b',') => {
					self.pos += 1;
				}
				Some(b']') => {
					self.pos += 1;
					break;
				}
				_ => return Err(self.error("expected ',' or ']' in array")),
			}
		}
		Ok(Value::Array(items))
	}

	fn parse_string(&mut self) -> Result<String, ParseError> {
		self.expect(b'"')?;
		let mut out = String::new();
		loop {
			match self.peek() {
				None => return Err(self.error("unterminated string")),
				Some(b'"') => {
					self.pos += 1;
					break;
				}
				Some(b'\\') => {
					self.pos += 1;
					match self.peek() {
						Some(b'"') => {
							out.push('"');
							self.pos += 1;
						}
						Some(b'\\') => {
							out.push('\\');
							self.pos += 1;
						}
						Some(b'/') => {
							out.push('/');
							self.pos += 1;
						}
						Some(b'b') => {
							out.push('\u{8}');
							self.pos += 1;
						}
						Some(b'f') => {
							out.push('\u{c}');
							self.pos += 1;
						}
						Some(b'n') => {
							out.push('\n');
							self.pos += 1;
						}
						Some(b'r') => {
							out.push('\r');
							self.pos += 1;
						}
						Some(b't') => {
							out.push('\t');
							self.pos += 1;
						}
						Some(b'u') => {
							self.pos += 1;
							let code = self.parse_hex4()?;
							out.push(self.decode_utf16_unit(code)?);
						}
						_ => return Err(self.error("invalid escape sequence")),
					}
				}
				Some(_) => {
					let start = self.pos;
					let remaining = std::str::from_utf8(&self.bytes[start..])
						.map_err(|_| self.error("invalid utf-8"))?;
					let ch = remaining.chars().next().unwrap();
					out.push(ch);
					self.pos += ch.len_utf8();
				}
			}
		}
		Ok(out)
	}

	fn parse_hex4(&mut self) -> Result<u16, ParseError> {
		if self.pos + 4 > self.bytes.len() {
			return Err(self.error("truncated unicode escape"));
		}
		let hex = std::str::from_utf8(&self.bytes[self.pos..self.pos + 4])
			.map_err(|_| self.error("invalid unicode escape"))?;
		let code = u16::from_str_radix(hex, 16).map_err(|_| self.error("invalid unicode escape"))?;
		self.pos += 4;
		Ok(code)
	}

	fn decode_utf16_unit(&mut self, high: u16) -> Result<char, ParseError> {
		if (0xD800..=0xDBFF).contains(&high) {
			self.literal("\\u")?;
			let low = self.parse_hex4()?;
			let c = 0x10000
				+ ((high as u32 - 0xD800) << 10)
				+ (low as u32 - 0xDC00);
			char::from_u32(c).ok_or_else(|| self.error("invalid surrogate pair"))
		} else {
			char::from_u32(high as u32).ok_or_else(|| self.error("invalid unicode escape"))
		}
	}

	fn parse_number(&mut self) -> Result<Number, ParseError> {
		let start = self.pos;
		if self.peek() == Some(b'-') {
			self.pos += 1;
		}
		while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
			self.pos += 1;
		}
		if self.peek() == Some(b'.') {
			self.pos += 1;
			while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
				self.pos += 1;
			}
		}
		if matches!(self.peek(), Some(b'e' | b'E')) {
			self.pos += 1;
			if matches!(self.peek(), Some(b'+' | b'-')) {
				self.pos += 1;
			}
			while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
				self.pos += 1;
			}
		}
		let lexical = std::str::from_utf8(&self.bytes[start..self.pos]).unwrap();
		if lexical.is_empty() || lexical == "-" {
			return Err(self.error("invalid number"));
		}
		Ok(Number::from_lexical(lexical))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_flat_object_preserving_order() {
		let value = parse(r#"{"b": 1, "a": 2}"#).unwrap();
		let obj = value.as_object().unwrap();
		let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
		assert_eq!(keys, ["b", "a"]);
	}

	#[test]
	fn parses_escapes_and_surrogate_pairs() {
		let value = parse(r#""a\nb😀""#).unwrap();
		assert_eq!(value, Value::String("a\nb\u{1F600}".to_string()));
	}

	#[test]
	fn keeps_verbatim_number_lexical_form() {
		let value = parse("1.50").unwrap();
		assert_eq!(value.as_number().unwrap().as_str(), "1.50");
	}

	#[test]
	fn rejects_trailing_garbage() {
		assert!(parse("{} extra").is_err());
	}
}
