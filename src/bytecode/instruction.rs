use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumString};
use num_enum::{TryFromPrimitive, IntoPrimitive};

use crate::address::Parameter;
use crate::bytecode::Word;

/// The largest number of parameters any instruction takes.
pub const MAX_ARITY: usize = 3;

/**
  Opcodes of the virtual machine. The discriminant of each variant is its opcode, i.e. the
  instruction word modulo 100. The variant names double as assembly mnemonics.
*/
#[derive(
StrumDisplay, EnumString, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,       Eq, PartialEq,     Debug,         Hash
)]
#[repr(u8)]
pub enum Operation {
  Add         = 1,   // add( a, b, dst )
  Multiply    = 2,   // multiply( a, b, dst )
  Input       = 3,   // input( dst )
  Output      = 4,   // output( a )
  JumpIfTrue  = 5,   // jump_if_true( a, target )
  JumpIfFalse = 6,   // jump_if_false( a, target )
  LessThan    = 7,   // less_than( a, b, dst )
  Equals      = 8,   // equals( a, b, dst )
  AdjustBase  = 9,   // adjust_base( a )
  Halt        = 99,  // halt
}

impl Operation {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// Number of parameters following the instruction word.
  pub fn arity(&self) -> usize {
    match self {
      | Operation::Add
      | Operation::Multiply
      | Operation::LessThan
      | Operation::Equals      => 3,

      | Operation::JumpIfTrue
      | Operation::JumpIfFalse => 2,

      | Operation::Input
      | Operation::Output
      | Operation::AdjustBase  => 1,

      Operation::Halt          => 0,
    }
  }

  /// Size in words of the whole instruction, i.e. how far the ip advances past it.
  pub fn width(&self) -> usize {
    self.arity() + 1
  }

  /// The index of the parameter this operation writes to, if any.
  pub fn write_parameter(&self) -> Option<usize> {
    match self {
      | Operation::Add
      | Operation::Multiply
      | Operation::LessThan
      | Operation::Equals => Some(2),
      Operation::Input    => Some(0),
      _                   => None
    }
  }
}

/// How a parameter's raw value is turned into an operand.
#[derive(
TryFromPrimitive, IntoPrimitive,
Clone, Copy, Eq, PartialEq, Debug, Hash
)]
#[repr(u8)]
pub enum Mode {
  /// The raw value is an address.
  Position  = 0,
  /// The raw value is the operand itself. Never valid as a write target.
  Immediate = 1,
  /// The raw value plus the relative base is an address.
  Relative  = 2,
}

impl Mode {
  /// The prefix used for parameters of this mode in assembly text.
  pub fn sigil(&self) -> &'static str {
    match self {
      Mode::Position  => "",
      Mode::Immediate => "#",
      Mode::Relative  => "@",
    }
  }
}

impl Default for Mode {
  fn default() -> Self {
    Mode::Position
  }
}

/// A decoded instruction word: the operation and the modes of its parameters. Modes beyond the
/// operation's arity are always `Mode::Position`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Instruction {
  pub operation: Operation,
  pub modes: [Mode; MAX_ARITY],
}

impl Instruction {
  pub fn new(operation: Operation, modes: [Mode; MAX_ARITY]) -> Instruction {
    Instruction { operation, modes }
  }

  /// Pairs this instruction's modes with the given raw parameter words. Slots past the
  /// operation's arity are left as `Parameter::default()`.
  pub fn parameters(&self, raw: &[Word]) -> [Parameter; MAX_ARITY] {
    let mut parameters = [Parameter::default(); MAX_ARITY];
    for (i, value) in raw.iter().take(self.operation.arity()).enumerate() {
      parameters[i] = Parameter::new(self.modes[i], *value);
    }
    parameters
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.operation)?;
    for (i, mode) in self.modes.iter().take(self.operation.arity()).enumerate() {
      let separator = if i == 0 { " " } else { ", " };
      write!(f, "{}{}_", separator, mode.sigil())?;
    }
    Ok(())
  }
}
