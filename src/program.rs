//! A `Program` is the immutable ROM a machine's memory is initialized from.

use std::fs;
use std::ops::Deref;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::bytecode::{assemble, parse_program, Word};
use crate::error::IntcodeError;

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Program {
  words: Vec<Word>,
}

impl Program {
  pub fn new(words: Vec<Word>) -> Program {
    Program { words }
  }

  /// Reads a ROM file: one or more lines of comma separated words.
  pub fn load<P: AsRef<Path>>(path: P) -> Result<Program, IntcodeError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|source| IntcodeError::Io { path: path.to_path_buf(), source })?;
    let program = text.parse::<Program>()?;
    debug!(path = %path.display(), words = program.len(), "loaded program");
    Ok(program)
  }

  /// Builds a program from assembly text.
  pub fn assemble(text: &str) -> Result<Program, IntcodeError> {
    assemble(text).map(Program::new)
  }

  pub fn words(&self) -> &[Word] {
    &self.words
  }
}

impl FromStr for Program {
  type Err = IntcodeError;

  fn from_str(text: &str) -> Result<Self, Self::Err> {
    parse_program(text).map(Program::new)
  }
}

impl Deref for Program {
  type Target = [Word];

  fn deref(&self) -> &[Word] {
    &self.words
  }
}

impl From<Vec<Word>> for Program {
  fn from(words: Vec<Word>) -> Self {
    Program::new(words)
  }
}
