/*!
  An Intcode virtual machine.

  Programs are loaded into a fixed amount of word-addressed memory and exchange values with
  their driver through two FIFO queues. A machine suspends, rather than fails, when it needs
  input that hasn't been queued yet, so drivers can compose many machines by shuttling values
  between them; `scheduler` provides the common compositions.
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

mod address;
mod error;
mod io;
mod memory;
mod program;

pub mod bytecode;
pub mod logger;
pub mod machine;
pub mod scheduler;

pub use address::{Location, Parameter};
pub use bytecode::Word;
pub use error::{Fault, FaultKind, IntcodeError};
pub use io::Channel;
pub use machine::{Machine, Status};
pub use memory::{Memory, Snapshot, DEFAULT_MEMORY_CAPACITY};
pub use program::Program;
pub use scheduler::{MachineId, Network, Packet, Pipe, Scheduler, IDLE_INPUT};
