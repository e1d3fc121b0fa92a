/*!
  This module is responsible for the encoding and decoding of instruction words.
*/
use std::convert::TryFrom;

use super::{Instruction, Mode, Operation, MAX_ARITY};
use crate::error::Fault;

// If you change this you must also change the CLI and assembly number parsers.
pub type Word = i64;

/// Place value of the mode digit of the first parameter.
const FIRST_MODE_PLACE: Word = 100;

/**
  Splits an instruction word into its operation and parameter modes by digit extraction.
  Only the modes of parameters the operation actually takes are validated; higher digits
  are ignored.

  `ip` is used only to give a fault its context.
*/
pub fn decode_instruction(ip: usize, word: Word) -> Result<Instruction, Fault> {
  if word < 0 {
    return Err(Fault::Decode { ip, word });
  }

  let operation = u8::try_from(word % 100)
      .ok()
      .and_then(|code| Operation::try_from(code).ok())
      .ok_or(Fault::Decode { ip, word })?;

  let mut modes = [Mode::Position; MAX_ARITY];
  let mut place = FIRST_MODE_PLACE;
  for (parameter, mode) in modes.iter_mut().enumerate().take(operation.arity()) {
    let digit = (word / place) % 10;
    *mode = Mode::try_from(digit as u8)
        .map_err(|_| Fault::UnsupportedMode { ip, parameter: parameter + 1, mode: digit })?;
    place *= 10;
  }

  Ok(Instruction::new(operation, modes))
}

/// Encodes an instruction back into its opcode word. This is the inverse of
/// `decode_instruction` for every valid instruction.
pub fn encode_instruction(instruction: &Instruction) -> Word {
  let mut word = instruction.operation.code() as Word;
  let mut place = FIRST_MODE_PLACE;
  for mode in instruction.modes.iter().take(instruction.operation.arity()) {
    word += Into::<u8>::into(*mode) as Word * place;
    place *= 10;
  }
  word
}
