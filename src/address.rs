//! The addressing resolver. A `Parameter` is a raw parameter word together with its mode; resolving
//! it against the relative base and the memory bounds yields a `Location`.

use std::fmt::{Display, Formatter};

use crate::bytecode::{Mode, Word};
use crate::error::Fault;
use crate::memory::Memory;

/// A raw parameter word and the mode it was decoded with.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Parameter {
  pub mode: Mode,
  pub value: Word,
}

/// Where an operand lives once its parameter is resolved.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Location {
  /// The operand is the parameter value itself.
  Literal(Word),
  /// The operand is the memory cell at this index, which is known to be in bounds.
  Cell(usize),
}

impl Parameter {
  pub fn new(mode: Mode, value: Word) -> Parameter {
    Parameter { mode, value }
  }

  /**
    Resolves this parameter to a location. `ip` is the address of the instruction the
    parameter belongs to and is only used to give a fault its context.
  */
  pub fn resolve(
      &self,
      memory        : &Memory,
      relative_base : Word,
      ip            : usize,
    ) -> Result<Location, Fault>
  {
    let address =
      match self.mode {
        Mode::Immediate => return Ok(Location::Literal(self.value)),
        Mode::Position  => Some(self.value),
        Mode::Relative  => self.value.checked_add(relative_base),
      };

    match address {
      Some(address) => {
        memory.index_of(address)
          .map(Location::Cell)
          .ok_or(Fault::Address { ip, address })
      }
      None => {
        // The relative address overflowed, which is certainly out of bounds.
        Err(Fault::Address { ip, address: Word::max_value() })
      }
    }
  }

  /// Resolves this parameter as a write target. Immediate parameters cannot be written to.
  /// `parameter` is the 1-based position of the parameter in its instruction.
  pub fn resolve_target(
      &self,
      memory        : &Memory,
      relative_base : Word,
      ip            : usize,
      parameter     : usize,
    ) -> Result<usize, Fault>
  {
    match self.resolve(memory, relative_base, ip)? {
      Location::Cell(idx)  => Ok(idx),
      Location::Literal(_) => Err(Fault::ImmediateWrite { ip, parameter }),
    }
  }
}

impl Location {
  /// Fetches the operand. Cells are bounds-checked during resolution.
  pub fn load(&self, memory: &Memory) -> Word {
    match self {
      Location::Literal(value) => *value,
      Location::Cell(idx)      => memory.get(*idx).unwrap_or_default(),
    }
  }
}

impl Display for Parameter {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}{}", self.mode.sigil(), self.value)
  }
}

impl Display for Location {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Location::Literal(value) => write!(f, "{}", value),
      Location::Cell(idx)      => write!(f, "MEM[{}]", idx),
    }
  }
}
