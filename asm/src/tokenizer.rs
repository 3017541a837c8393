use crate::error::{ErrorKind, Result};
use crate::source::Pos;

/// One source line split into its parts:
/// `[label:] [mnemonic [params]] [; comment]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line<'a> {
    pub label: Option<&'a str>,
    pub op: Option<&'a str>,
    pub param: Option<&'a str>,
    pub comment: Option<&'a str>,
}

fn is_label_head(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '+')
}

/// `[A-Za-z_][A-Za-z0-9_.+-]*`
pub fn is_label_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(head) if is_label_head(head) => chars.all(is_label_char),
        _ => false,
    }
}

/// Byte index of the `;` starting the comment, skipping quoted text.
fn comment_start(s: &str, pos: &Pos) -> Result<Option<usize>> {
    let mut quote: Option<char> = None;
    for (idx, c) in s.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == ';' => return Ok(Some(idx)),
            None => {}
        }
    }
    match quote {
        Some(q) => Err(ErrorKind::Parse(format!("unterminated {q} quote")).at(pos)),
        None => Ok(None),
    }
}

impl<'a> Line<'a> {
    pub fn parse(raw: &'a str, pos: &Pos) -> Result<Line<'a>> {
        let mut line = Line::default();
        let mut rest = raw.trim();

        // Comment
        if let Some(idx) = comment_start(rest, pos)? {
            line.comment = Some(&rest[idx..]);
            rest = rest[..idx].trim_end();
        }

        // Label
        let word_end = rest.find(|c: char| !is_label_char(c)).unwrap_or(rest.len());
        if rest[word_end..].starts_with(':') {
            let name = &rest[..word_end];
            if !is_label_name(name) {
                return Err(ErrorKind::Parse(format!("invalid label name `{name}`")).at(pos));
            }
            line.label = Some(name);
            rest = rest[word_end + 1..].trim_start();
        }

        // Mnemonic and params
        if !rest.is_empty() {
            let op_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            line.op = Some(&rest[..op_end]);
            let param = rest[op_end..].trim();
            if !param.is_empty() {
                line.param = Some(param);
            }
        }

        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> Pos {
        Pos::new("test.asm", 1)
    }

    fn case(raw: &str, expect: (Option<&str>, Option<&str>, Option<&str>, Option<&str>)) {
        let line = Line::parse(raw, &pos()).unwrap();
        println!("{raw:?} => {line:?}");
        assert_eq!((line.label, line.op, line.param, line.comment), expect);
    }

    #[test]
    fn full_line() {
        case(
            "loop:  LDA #$10 ; load",
            (Some("loop"), Some("LDA"), Some("#$10"), Some("; load")),
        );
    }

    #[test]
    fn partial_lines() {
        case("", (None, None, None, None));
        case("   ", (None, None, None, None));
        case("; only a comment", (None, None, None, Some("; only a comment")));
        case("start:", (Some("start"), None, None, None));
        case("  RTS", (None, Some("RTS"), None, None));
        case("end: ; done", (Some("end"), None, None, Some("; done")));
        case("next:INX", (Some("next"), Some("INX"), None, None));
    }

    #[test]
    fn label_characters() {
        case("_a.b-c+1: NOP", (Some("_a.b-c+1"), Some("NOP"), None, None));
    }

    #[test]
    fn params_keep_inner_spaces() {
        case(
            "  .DB $01, $02 $03   ;x",
            (None, Some(".DB"), Some("$01, $02 $03"), Some(";x")),
        );
        case(
            "STA ($20), Y",
            (None, Some("STA"), Some("($20), Y"), None),
        );
    }

    #[test]
    fn semicolon_inside_quotes() {
        case("LDA #';'  ; semi", (None, Some("LDA"), Some("#';'"), Some("; semi")));
        case(
            ".INCLUDE \"a;b.asm\"",
            (None, Some(".INCLUDE"), Some("\"a;b.asm\""), None),
        );
    }

    #[test]
    fn malformed_lines() {
        for raw in ["1abc: NOP", "LDA #'A", ".INCLUDE \"main.asm"] {
            let err = Line::parse(raw, &pos()).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::Parse(_)), "{raw}");
        }
    }

    #[test]
    fn label_names() {
        assert!(is_label_name("main"));
        assert!(is_label_name("_tmp.1"));
        assert!(!is_label_name("1st"));
        assert!(!is_label_name(""));
        assert!(!is_label_name("a b"));
    }
}
