use arch6502::Mode;
use strum::EnumString;

use crate::error::{ErrorKind, Result};
use crate::source::Pos;
use crate::value::{Value, Width};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lead {
    Hash,
    Paren,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
enum Index {
    X,
    Y,
}

/// Syntactic shape of an operand: `[#|(] value [)] [,X|Y] [)]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Shape {
    lead: Option<Lead>,
    close: bool,
    index: Option<Index>,
    close_outer: bool,
    width: Width,
}

impl Shape {
    fn mode(&self) -> Option<Mode> {
        use Index::*;
        use Lead::*;
        use Width::*;
        let Shape {
            lead,
            close,
            index,
            close_outer,
            width,
        } = *self;
        match (lead, close, index, close_outer, width) {
            (Some(Hash), false, None, false, _) => Some(Mode::Immediate),
            (None, false, None, false, Byte) => Some(Mode::ZeroPage),
            (None, false, Some(X), false, Byte) => Some(Mode::ZeroPageX),
            (None, false, Some(Y), false, Byte) => Some(Mode::ZeroPageY),
            (None, false, None, false, Word) => Some(Mode::Absolute),
            (None, false, Some(X), false, Word) => Some(Mode::AbsoluteX),
            (None, false, Some(Y), false, Word) => Some(Mode::AbsoluteY),
            (Some(Paren), true, None, false, _) => Some(Mode::Indirect),
            (Some(Paren), false, Some(X), true, Byte) => Some(Mode::IndirectX),
            (Some(Paren), true, Some(Y), false, Byte) => Some(Mode::IndirectY),
            _ => None,
        }
    }
}

/// Addressing mode plus the value it carries (none for implied).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub mode: Mode,
    pub value: Option<Value>,
}

impl Operand {
    pub fn implied() -> Self {
        Operand {
            mode: Mode::Implied,
            value: None,
        }
    }

    /// Classifies operand text into an addressing mode.
    ///
    /// Branch operands skip classification: they are always a single target.
    pub fn parse(text: Option<&str>, branch: bool, pos: &Pos) -> Result<Operand> {
        let text = match text.map(str::trim) {
            None | Some("") => return Ok(Operand::implied()),
            Some(t) if t.eq_ignore_ascii_case("a") && !branch => {
                return Ok(Operand::implied())
            }
            Some(t) => t,
        };

        if branch {
            let value = Value::parse(text, Some(Width::Byte), pos)?;
            return Ok(Operand {
                mode: Mode::Relative,
                value: Some(value),
            });
        }

        let invalid = || ErrorKind::InvalidAddressingMode(format!("`{text}`")).at(pos);
        let unparsable = || ErrorKind::Parse(format!("unable to parse operand `{text}`")).at(pos);

        let (lead, rest) = match text.chars().next() {
            Some('#') => (Some(Lead::Hash), &text[1..]),
            Some('(') => (Some(Lead::Paren), &text[1..]),
            _ => (None, text),
        };

        let value_end = rest.find(&[',', '(', ')'][..]).unwrap_or(rest.len());
        let (value_text, rest) = rest.split_at(value_end);
        if value_text.trim().is_empty() {
            return Err(unparsable());
        }

        let (close, rest) = match rest.strip_prefix(')') {
            Some(r) => (true, r.trim_start()),
            None => (false, rest),
        };

        let (index, rest) = match rest.strip_prefix(',') {
            Some(r) => {
                let end = r.find(&['(', ')'][..]).unwrap_or(r.len());
                let reg = r[..end].trim();
                let index = reg.parse::<Index>().map_err(|_| invalid())?;
                (Some(index), &r[end..])
            }
            None => (None, rest),
        };

        let (close_outer, rest) = match rest.strip_prefix(')') {
            Some(r) => (true, r),
            None => (false, rest),
        };

        if !rest.trim().is_empty() {
            return Err(unparsable());
        }

        let mut value = Value::parse(value_text, None, pos)?;
        let shape = Shape {
            lead,
            close,
            index,
            close_outer,
            width: value.width,
        };
        let mode = shape.mode().ok_or_else(invalid)?;

        match mode {
            Mode::Immediate => value.width = Width::Byte,
            Mode::Indirect => value.width = Width::Word,
            _ => {}
        }

        Ok(Operand {
            mode,
            value: Some(value),
        })
    }

    /// Bytes following the opcode.
    pub(crate) fn len(&self) -> u32 {
        self.mode.operand_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Term, Trunc};

    fn pos() -> Pos {
        Pos::new("test.asm", 1)
    }

    fn mode_of(text: &str) -> Mode {
        Operand::parse(Some(text), false, &pos()).unwrap().mode
    }

    macro_rules! test_mode {
        ($($name:ident: $text:expr => $mode:ident,)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(mode_of($text), Mode::$mode);
                }
            )*
        }
    }

    test_mode! {
        immediate: "#$10" => Immediate,
        immediate_label: "#<table" => Immediate,
        immediate_char: "#'A'" => Immediate,
        zero_page: "$10" => ZeroPage,
        zero_page_x: "$10,X" => ZeroPageX,
        zero_page_y: "$10, y" => ZeroPageY,
        absolute: "$1234" => Absolute,
        absolute_label: "screen" => Absolute,
        absolute_x: "$1234,x" => AbsoluteX,
        absolute_y: "screen,Y" => AbsoluteY,
        forced_zero_page: "<screen,X" => ZeroPageX,
        indirect: "($1234)" => Indirect,
        indirect_zp_value: "($12)" => Indirect,
        indirect_x: "($20,X)" => IndirectX,
        indirect_x_spaced: "($20, X)" => IndirectX,
        indirect_y: "($20),Y" => IndirectY,
        indirect_y_spaced: "($20), y" => IndirectY,
        accumulator: "A" => Implied,
    }

    #[test]
    fn implied() {
        let op = Operand::parse(None, false, &pos()).unwrap();
        assert_eq!(op, Operand::implied());
        assert_eq!(op.len(), 0);
        assert_eq!(Operand::parse(Some("  "), false, &pos()).unwrap().mode, Mode::Implied);
    }

    #[test]
    fn immediate_and_indirect_force_width() {
        let op = Operand::parse(Some("#label"), false, &pos()).unwrap();
        assert_eq!(op.value.as_ref().unwrap().width, Width::Byte);
        assert_eq!(op.len(), 1);

        let op = Operand::parse(Some("($12)"), false, &pos()).unwrap();
        assert_eq!(op.value.as_ref().unwrap().width, Width::Word);
        assert_eq!(op.len(), 2);
    }

    #[test]
    fn branch_ignores_shape() {
        let op = Operand::parse(Some("loop"), true, &pos()).unwrap();
        assert_eq!(op.mode, Mode::Relative);
        assert_eq!(op.len(), 1);
        let value = op.value.unwrap();
        assert_eq!(value.term, Term::Label("loop".to_string()));
        assert_eq!(value.trunc, Trunc::None);
    }

    #[test]
    fn invalid_shapes() {
        for text in ["($1234,X)", "($1234),Y", "($20),X", "($20,Y)", "#$10,X", "$10,Z", "($10))"] {
            let err = Operand::parse(Some(text), false, &pos()).unwrap_err();
            assert!(
                matches!(err.kind, ErrorKind::InvalidAddressingMode(_) | ErrorKind::BadValue(_)),
                "{text}: {err}"
            );
        }
    }

    #[test]
    fn unparsable_operands() {
        for text in ["#", "()", "#($10)", "$10)X", "($10) junk"] {
            let err = Operand::parse(Some(text), false, &pos()).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::Parse(_)), "{text}: {err}");
        }
    }
}
