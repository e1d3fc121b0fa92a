/*!
  Two kinds of failure exist. A `Fault` is raised by the machine itself while stepping a
  program. Faults are sticky: the machine records the fault in its status and never resumes.
  They are never returned from `Machine::run`. An `IntcodeError` is returned to drivers from
  operations that can fail outright, such as loading a ROM or constructing a machine.
*/

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use thiserror::Error;

use crate::bytecode::Word;
use crate::scheduler::MachineId;

/// Coarse classification of a `Fault`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum FaultKind {
  /// The opcode is not in the instruction set.
  Decode,
  /// A resolved address, or the instruction pointer, is outside of memory.
  Address,
  /// A mode digit is unsupported, or an immediate parameter is used as a write target.
  Mode,
}

impl Display for FaultKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      FaultKind::Decode  => write!(f, "decode"),
      FaultKind::Address => write!(f, "address"),
      FaultKind::Mode    => write!(f, "mode"),
    }
  }
}

/// A runtime fault. `ip` is the address of the instruction being executed when it occurred.
#[derive(Error, Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Fault {
  #[error("unknown opcode in word {word} at ip {ip}")]
  Decode { ip: usize, word: Word },

  #[error("address {address} is outside of memory (ip {ip})")]
  Address { ip: usize, address: Word },

  #[error("parameter {parameter} has unsupported mode {mode} (ip {ip})")]
  UnsupportedMode { ip: usize, parameter: usize, mode: Word },

  #[error("parameter {parameter} is an immediate write target (ip {ip})")]
  ImmediateWrite { ip: usize, parameter: usize },
}

impl Fault {
  pub fn kind(&self) -> FaultKind {
    match self {
      Fault::Decode { .. }         => FaultKind::Decode,
      Fault::Address { .. }        => FaultKind::Address,
      | Fault::UnsupportedMode { .. }
      | Fault::ImmediateWrite { .. } => FaultKind::Mode,
    }
  }

  pub fn ip(&self) -> usize {
    match self {
      | Fault::Decode { ip, .. }
      | Fault::Address { ip, .. }
      | Fault::UnsupportedMode { ip, .. }
      | Fault::ImmediateWrite { ip, .. } => *ip,
    }
  }
}

/// Errors surfaced to drivers.
#[derive(Error, Debug)]
pub enum IntcodeError {
  #[error("could not read {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed program text at byte {offset}: `{found}`")]
  Parse { offset: usize, found: String },

  #[error("assembly error on line {line}: {message}")]
  Assembly { line: usize, message: String },

  #[error("program of {program} words does not fit in {capacity} words of memory")]
  Capacity { program: usize, capacity: usize },

  #[error("address {address} is outside of {capacity} words of memory")]
  OutOfBounds { address: usize, capacity: usize },

  #[error("snapshot holds {found} words but memory holds {expected}")]
  SnapshotMismatch { expected: usize, found: usize },

  #[error("machine {machine} faulted: {fault}")]
  MachineFault { machine: MachineId, fault: Fault },

  #[error("no machine made progress in round {round}")]
  Stalled { round: usize },

  #[error("no machine with id {0}")]
  UnknownMachine(MachineId),
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fault_kinds(){
    assert_eq!(Fault::Decode { ip: 0, word: 42 }.kind(), FaultKind::Decode);
    assert_eq!(Fault::Address { ip: 3, address: -1 }.kind(), FaultKind::Address);
    assert_eq!(Fault::ImmediateWrite { ip: 0, parameter: 3 }.kind(), FaultKind::Mode);
    assert_eq!(Fault::UnsupportedMode { ip: 7, parameter: 1, mode: 5 }.ip(), 7);
  }

  #[test]
  fn messages(){
    let fault = Fault::Address { ip: 2, address: -5 };
    assert_eq!(fault.to_string(), "address -5 is outside of memory (ip 2)");

    let error = IntcodeError::MachineFault { machine: 4, fault };
    assert_eq!(error.to_string(), "machine 4 faulted: address -5 is outside of memory (ip 2)");

    let error = IntcodeError::OutOfBounds { address: usize::max_value(), capacity: 8 };
    assert_eq!(
      error.to_string(),
      format!("address {} is outside of 8 words of memory", usize::max_value())
    );
  }
}
