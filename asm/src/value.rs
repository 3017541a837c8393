use crate::error::{ErrorKind, Result};
use crate::label::Labels;
use crate::source::Pos;
use crate::tokenizer::is_label_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Literal(u32),
    Label(String),
}

/// `<` keeps the low byte, `>` the high byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trunc {
    None,
    Low,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Byte,
    Word,
}

impl Width {
    pub fn len(&self) -> u32 {
        match self {
            Width::Byte => 1,
            Width::Word => 2,
        }
    }
}

/// A number, character or label reference, resolved lazily so that labels
/// may be used before they are defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub term: Term,
    pub trunc: Trunc,
    pub width: Width,
    pub pos: Pos,
}

fn parse_char(content: &str) -> Option<u32> {
    let quote = content.chars().next()?;
    let inner = content[1..].strip_suffix(quote)?;
    let mut chars = inner.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c as u32),
        _ => None,
    }
}

/// Digits only: `from_str_radix` alone would take a leading sign.
fn parse_radix(digits: &str, radix: u32) -> Option<u32> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}

impl Value {
    /// Parses `[<|>] [$|%] ['|"]content['|"]`.
    ///
    /// Without a forced `width` the value takes one byte when it is truncated
    /// or a literal below 256, two bytes otherwise.
    pub fn parse(text: &str, width: Option<Width>, pos: &Pos) -> Result<Value> {
        let bad = || ErrorKind::BadValue(text.to_string()).at(pos);
        let s = text.trim();

        let (trunc, s) = match s.chars().next() {
            Some('<') => (Trunc::Low, &s[1..]),
            Some('>') => (Trunc::High, &s[1..]),
            _ => (Trunc::None, s),
        };

        let term = if let Some(hex) = s.strip_prefix('$') {
            Term::Literal(parse_radix(hex, 16).ok_or_else(bad)?)
        } else if let Some(bin) = s.strip_prefix('%') {
            Term::Literal(parse_radix(bin, 2).ok_or_else(bad)?)
        } else if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
            Term::Literal(s.parse::<u32>().map_err(|_| bad())?)
        } else if s.starts_with(|c| c == '\'' || c == '"') {
            Term::Literal(parse_char(s).ok_or_else(bad)?)
        } else if is_label_name(s) {
            Term::Label(s.to_string())
        } else {
            return Err(bad());
        };

        let width = width.unwrap_or(match (&term, trunc) {
            (_, Trunc::Low | Trunc::High) => Width::Byte,
            (Term::Literal(v), Trunc::None) if *v < 0x100 => Width::Byte,
            _ => Width::Word,
        });

        Ok(Value {
            term,
            trunc,
            width,
            pos: pos.clone(),
        })
    }

    pub fn literal(value: u32, width: Width, pos: &Pos) -> Value {
        Value {
            term: Term::Literal(value),
            trunc: Trunc::None,
            width,
            pos: pos.clone(),
        }
    }

    fn truncate(&self, value: u32) -> u32 {
        match self.trunc {
            Trunc::None => value,
            Trunc::Low => value & 0xFF,
            Trunc::High => value >> 8,
        }
    }

    /// The value if it is known without the label table.
    pub fn constant(&self) -> Option<u32> {
        match &self.term {
            Term::Literal(v) => Some(self.truncate(*v)),
            Term::Label(_) => None,
        }
    }

    /// Like [`Value::constant`], but a label reference is an error.
    pub fn require_constant(&self) -> Result<u32> {
        match &self.term {
            Term::Literal(v) => Ok(self.truncate(*v)),
            Term::Label(name) => Err(ErrorKind::NonConstant(name.clone()).at(&self.pos)),
        }
    }

    /// Looks up the label (if any) and applies truncation.
    /// Only meaningful once every label is defined.
    pub fn resolve(&self, labels: &Labels) -> Result<u32> {
        let value = match &self.term {
            Term::Literal(v) => *v,
            Term::Label(name) => labels
                .get_val(name)
                .ok_or_else(|| ErrorKind::UndefinedLabel(name.clone()).at(&self.pos))?,
        };
        Ok(self.truncate(value))
    }

    /// Little-endian bytes of the resolved value.
    pub fn bytes(&self, labels: &Labels) -> Result<Vec<u8>> {
        let value = self.resolve(labels)?;
        let raw = match self.width {
            Width::Byte => vec![value],
            Width::Word => vec![value & 0xFF, value >> 8],
        };
        raw.into_iter()
            .map(|b| u8::try_from(b).map_err(|_| ErrorKind::ByteRange(b).at(&self.pos)))
            .collect()
    }
}
