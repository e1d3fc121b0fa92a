/*!
  Text forms of programs.

  The ROM format is what programs are distributed as: lines of comma separated decimal words,
  concatenated into one flat sequence.

  The human readable form is called assembly. One instruction per line, spelled with the
  `strum` names of the `Operation` variants:

  ```text
  Input 9            % read into MEM[9]
  Equals 9, #8, 9
  Output 9
  Halt
  Data -1, 8
  ```

  Parameters are written `12` (position), `#12` (immediate), or `@12` (relative). `Data` emits
  raw words. Everything after `%` is a comment.
*/

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use nom::{
  IResult,
  branch::alt,
  character::complete::{
    alpha1,
    char as one_char,
    digit1,
    line_ending,
    multispace0,
    space0,
    space1
  },
  combinator::{all_consuming, map, map_res, opt, recognize},
  multi::{many1, separated_list, separated_nonempty_list},
  sequence::{delimited, pair, preceded}
};

use crate::address::Parameter;
use crate::bytecode::{decode_instruction, encode_instruction, Instruction, Mode, Operation, Word,
                      MAX_ARITY};
use crate::error::IntcodeError;

/// The pseudo-operation that emits raw words.
const DATA_MNEMONIC: &str = "Data";
const COMMENT_CHAR: char = '%';
/// How much of the unparsed text to quote in a parse error.
const ERROR_CONTEXT_LEN: usize = 16;

// region ROM parsing

fn word(input: &str) -> IResult<&str, Word> {
  map_res(
    recognize(pair(opt(alt((one_char('-'), one_char('+')))), digit1)),
    |text: &str| text.parse::<Word>()
  )(input)
}

fn comma(input: &str) -> IResult<&str, char> {
  delimited(space0, one_char(','), space0)(input)
}

fn rom_line(input: &str) -> IResult<&str, Vec<Word>> {
  preceded(space0, separated_nonempty_list(comma, word))(input)
}

fn line_breaks(input: &str) -> IResult<&str, Vec<&str>> {
  many1(preceded(space0, line_ending))(input)
}

fn rom(input: &str) -> IResult<&str, Vec<Vec<Word>>> {
  all_consuming(
    delimited(
      multispace0,
      separated_list(line_breaks, rom_line),
      multispace0
    )
  )(input)
}

/// Parses ROM text into the flat sequence of words it encodes.
pub fn parse_program(text: &str) -> Result<Vec<Word>, IntcodeError> {
  match rom(text) {
    Ok((_rest, lines)) => Ok(lines.into_iter().flatten().collect()),
    | Err(nom::Err::Error((rest, _kind)))
    | Err(nom::Err::Failure((rest, _kind))) => {
      Err(IntcodeError::Parse {
        offset: text.len() - rest.len(),
        found: rest.chars().take(ERROR_CONTEXT_LEN).collect()
      })
    }
    Err(nom::Err::Incomplete(_)) => {
      Err(IntcodeError::Parse { offset: text.len(), found: String::new() })
    }
  }
}

// endregion

// region Assembler

fn operand(input: &str) -> IResult<&str, Parameter> {
  map(
    pair(opt(alt((one_char('#'), one_char('@')))), word),
    |(sigil, value)| {
      let mode = match sigil {
        Some('#') => Mode::Immediate,
        Some('@') => Mode::Relative,
        _         => Mode::Position
      };
      Parameter::new(mode, value)
    }
  )(input)
}

fn statement(input: &str) -> IResult<&str, (&str, Option<Vec<Parameter>>)> {
  all_consuming(
    delimited(
      space0,
      pair(alpha1, opt(preceded(space1, separated_nonempty_list(comma, operand)))),
      space0
    )
  )(input)
}

/// Assembles one non-empty line (comment already removed) onto the end of `words`.
fn assemble_line(line_number: usize, line: &str, words: &mut Vec<Word>) -> Result<(), IntcodeError> {
  let error = |message: String| IntcodeError::Assembly { line: line_number, message };

  let (name, operands) =
    match statement(line) {
      Ok((_rest, (name, operands))) => (name, operands.unwrap_or_default()),
      Err(_e)                       => return Err(error(format!("cannot parse `{}`", line.trim())))
    };

  if name == DATA_MNEMONIC {
    if operands.iter().any(|p| p.mode != Mode::Position) {
      return Err(error("data words cannot carry a mode".to_string()));
    }
    words.extend(operands.iter().map(|p| p.value));
    return Ok(());
  }

  let operation = Operation::from_str(name)
      .map_err(|_| error(format!("{} is not an operation", name)))?;

  if operands.len() != operation.arity() {
    return Err(error(format!(
      "{} requires {} arguments but was given {}",
      operation, operation.arity(), operands.len()
    )));
  }
  if let Some(target) = operation.write_parameter() {
    if operands[target].mode == Mode::Immediate {
      return Err(error(format!("{} cannot write to an immediate parameter", operation)));
    }
  }

  let mut modes = [Mode::Position; MAX_ARITY];
  for (mode, parameter) in modes.iter_mut().zip(operands.iter()) {
    *mode = parameter.mode;
  }
  words.push(encode_instruction(&Instruction::new(operation, modes)));
  words.extend(operands.iter().map(|p| p.value));
  Ok(())
}

/// Assembles assembly text into program words. Line numbers in errors count from 1.
pub fn assemble(text: &str) -> Result<Vec<Word>, IntcodeError> {
  let mut words = Vec::new();

  for (idx, line) in text.lines().enumerate() {
    let code = match line.find(COMMENT_CHAR) {
      Some(start) => &line[..start],
      None        => line
    };
    if code.trim().is_empty() {
      continue;
    }
    assemble_line(idx + 1, code, &mut words)?;
  }

  Ok(words)
}

// endregion

// region Disassembler

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ListingItem {
  Instruction {
    address     : usize,
    instruction : Instruction,
    parameters  : Vec<Parameter>
  },
  Data {
    address : usize,
    value   : Word
  }
}

/// The result of disassembling a block of words.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Listing {
  pub items: Vec<ListingItem>,
}

impl ListingItem {
  pub fn address(&self) -> usize {
    match self {
      | ListingItem::Instruction { address, .. }
      | ListingItem::Data { address, .. } => *address
    }
  }

  /// Number of words this item covers.
  pub fn width(&self) -> usize {
    match self {
      ListingItem::Instruction { instruction, .. } => instruction.operation.width(),
      ListingItem::Data { .. }                     => 1
    }
  }
}

/**
  Disassembles `words` by a linear sweep from address 0. A word is listed as `Data` when it
  doesn't decode, when its operands run past the end of `words`, or when it carries mode digits
  the instruction doesn't use (so the listing always assembles back to the same words).
*/
pub fn disassemble(words: &[Word]) -> Listing {
  let mut items = Vec::new();
  let mut address = 0;

  while address < words.len() {
    let value = words[address];
    let item =
      decode_instruction(address, value)
        .ok()
        .filter(|instruction| encode_instruction(instruction) == value)
        .and_then(|instruction| {
          let start = address + 1;
          let raw = words.get(start..start + instruction.operation.arity())?;
          let parameters = instruction
              .parameters(raw)
              .iter()
              .take(instruction.operation.arity())
              .copied()
              .collect();
          Some(ListingItem::Instruction { address, instruction, parameters })
        })
        .unwrap_or(ListingItem::Data { address, value });

    address += item.width();
    items.push(item);
  }

  Listing { items }
}

impl Display for ListingItem {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let text = match self {

      ListingItem::Instruction { instruction, parameters, .. } => {
        let operands = parameters
            .iter()
            .map(Parameter::to_string)
            .collect::<Vec<String>>()
            .join(", ");
        match operands.is_empty() {
          true  => format!("{}", instruction.operation),
          false => format!("{} {}", instruction.operation, operands)
        }
      }

      ListingItem::Data { value, .. } => {
        format!("{} {}", DATA_MNEMONIC, value)
      }

    };
    write!(f, "{:<32}{} {:04}", text, COMMENT_CHAR, self.address())
  }
}

impl Display for Listing {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    for item in &self.items {
      writeln!(f, "{}", item)?;
    }
    Ok(())
  }
}

// endregion
