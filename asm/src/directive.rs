use strum::{Display, EnumIter, EnumString};

use crate::assembler::{check_address, include_sites, Assembler};
use crate::error::{ErrorKind, Result};
use crate::node::{DataBlock, Node};
use crate::source::Pos;
use crate::tokenizer::is_label_name;
use crate::value::{Value, Width};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, Display)]
#[strum(ascii_case_insensitive)]
pub enum Directive {
    /// Set the program counter.
    #[strum(serialize = ".ORG")]
    Org,
    /// Fill with zeros up to an address.
    #[strum(serialize = ".PAD")]
    Pad,
    /// Emit bytes.
    #[strum(serialize = ".DB")]
    Db,
    /// Emit little-endian words.
    #[strum(serialize = ".DW")]
    Dw,
    /// Define a named constant.
    #[strum(serialize = ".DEF")]
    Def,
    /// Skip bytes without emitting anything.
    #[strum(serialize = ".RS")]
    Rs,
    /// Assemble another source file in place.
    #[strum(serialize = ".INCLUDE")]
    Include,
    /// Emit the raw bytes of a file.
    #[strum(serialize = ".INCBIN")]
    Incbin,
}

/// Splits a parameter list on commas and whitespace.
/// An empty item between two commas is kept so it fails as a bad value.
fn split_params(param: &str) -> Vec<&str> {
    param
        .split(',')
        .flat_map(|piece| {
            let words: Vec<&str> = piece.split_whitespace().collect();
            if words.is_empty() {
                vec![""]
            } else {
                words
            }
        })
        .collect()
}

fn unquote(s: &str) -> &str {
    s.trim_matches(|c| c == '\'' || c == '"')
}

impl Assembler {
    pub(crate) fn directive(
        &mut self,
        directive: Directive,
        param: Option<&str>,
        pos: &Pos,
        stack: &mut Vec<Pos>,
    ) -> Result<()> {
        let param = param.ok_or_else(|| {
            ErrorKind::Parse(format!("{directive} requires a parameter")).at(pos)
        })?;

        match directive {
            Directive::Org => {
                let addr = Value::parse(param, None, pos)?.require_constant()?;
                self.set_pc(addr, pos)?;
            }
            Directive::Pad => {
                let target = Value::parse(param, None, pos)?.require_constant()?;
                check_address(target, pos)?;
                let values = (self.pc..target)
                    .map(|_| Value::literal(0, Width::Byte, pos))
                    .collect();
                self.emit(values, pos, stack)?;
            }
            Directive::Db | Directive::Dw => {
                let width = match directive {
                    Directive::Db => Width::Byte,
                    _ => Width::Word,
                };
                let values = split_params(param)
                    .into_iter()
                    .map(|p| Value::parse(p, Some(width), pos))
                    .collect::<Result<Vec<_>>>()?;
                self.emit(values, pos, stack)?;
            }
            Directive::Def => {
                let (name, expr) = match split_params(param)[..] {
                    [name, expr] => (name, expr),
                    _ => {
                        return Err(ErrorKind::Parse(format!(
                            "{directive} expects a name and a value"
                        ))
                        .at(pos))
                    }
                };
                if !is_label_name(name) {
                    return Err(ErrorKind::Parse(format!("invalid constant name `{name}`")).at(pos));
                }
                if self.labels.contains(name) {
                    return Err(ErrorKind::DuplicateLabel(name.to_string()).at(pos));
                }
                let value = Value::parse(expr, None, pos)?.require_constant()?;
                self.labels.define(name, pos, value)?;
            }
            Directive::Rs => {
                let count = Value::parse(param, None, pos)?.require_constant()?;
                self.advance(count, pos)?;
            }
            Directive::Include => {
                let path = unquote(param);
                let lines = self.open(path, pos, stack)?;
                self.read_lines(path, &lines, stack).map_err(|mut err| {
                    err.includes.push(pos.clone());
                    err
                })?;
            }
            Directive::Incbin => {
                let path = unquote(param);
                let bytes = self
                    .sources
                    .load_binary(path)
                    .map_err(|err| ErrorKind::FileNotFound(path.to_string(), err).at(pos))?;
                let values = bytes
                    .iter()
                    .map(|b| Value::literal(*b as u32, Width::Byte, pos))
                    .collect();
                self.emit(values, pos, stack)?;
            }
        }
        Ok(())
    }

    /// Appends a data block and advances the program counter past it.
    fn emit(&mut self, values: Vec<Value>, pos: &Pos, stack: &[Pos]) -> Result<()> {
        let block = DataBlock {
            values,
            pos: pos.clone(),
            includes: include_sites(stack),
        };
        self.advance(block.len(), pos)?;
        self.nodes.push(Node::Data(block));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn names() {
        assert_eq!(".org".parse::<Directive>().ok(), Some(Directive::Org));
        assert_eq!(".INCBIN".parse::<Directive>().ok(), Some(Directive::Incbin));
        assert!("ORG".parse::<Directive>().is_err());
        assert!(".BYTE".parse::<Directive>().is_err());
        for directive in Directive::iter() {
            assert_eq!(directive.to_string().parse::<Directive>().ok(), Some(directive));
        }
    }

    #[test]
    fn params() {
        assert_eq!(split_params("$01,$02,$03"), ["$01", "$02", "$03"]);
        assert_eq!(split_params("$01, $02 $03"), ["$01", "$02", "$03"]);
        assert_eq!(split_params("$01 , $02"), ["$01", "$02"]);
        assert_eq!(split_params("$01,,$02"), ["$01", "", "$02"]);
        assert_eq!(split_params("COUNT 10"), ["COUNT", "10"]);
    }

    #[test]
    fn file_names() {
        assert_eq!(unquote("\"lib.asm\""), "lib.asm");
        assert_eq!(unquote("'font.bin'"), "font.bin");
        assert_eq!(unquote("plain.asm"), "plain.asm");
    }
}
