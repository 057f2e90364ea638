use std::fmt;

/// Base direction of a directional language-tagged string (`@direction`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
	Ltr,
	Rtl,
}

impl Direction {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Ltr => "ltr",
			Self::Rtl => "rtl",
		}
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl<'a> TryFrom<&'a str> for Direction {
	type Error = &'a str;

	fn try_from(s: &'a str) -> Result<Self, &'a str> {
		match s {
			"ltr" => Ok(Self::Ltr),
			"rtl" => Ok(Self::Rtl),
			_ => Err(s),
		}
	}
}
