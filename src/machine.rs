//! The Intcode machine: memory, the two I/O queues, and the control unit that steps programs.
//!
//! A driver loads a program, queues input, and calls `run`. `run` returns when the machine halts,
//! faults, or executes an input instruction with nothing queued. In the last case nothing about
//! the machine has changed, so the driver can queue more input and call `run` again to retry the
//! same instruction.

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};
use tracing::{debug, warn};
#[cfg(feature = "trace_computation")]
use tracing::trace;

use crate::address::{Location, Parameter};
use crate::bytecode::{decode_instruction, Instruction, Operation, Word, MAX_ARITY};
use crate::error::{Fault, IntcodeError};
use crate::io::Channel;
use crate::memory::{Memory, Snapshot, DEFAULT_MEMORY_CAPACITY};

/// How many words after the ip the state table shows.
const MEMORY_WINDOW_AFTER: usize = 8;
/// How many words before the ip the state table shows.
const MEMORY_WINDOW_BEFORE: usize = 4;

/**
  The state of the control unit. Only `Halted` and `Faulted` are terminal; a terminal machine
  never executes another instruction.
*/
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Status {
  /// Freshly constructed, reset, or returned from a run that is not yet finished.
  Ready,
  /// The ip sits on an input instruction that found the input queue empty.
  BlockedOnInput,
  /// Executed a halt instruction.
  Halted,
  /// Stopped on a fault.
  Faulted(Fault),
}

impl Status {
  pub fn is_terminal(&self) -> bool {
    match self {
      Status::Halted | Status::Faulted(_) => true,
      _                                   => false
    }
  }
}

impl Display for Status {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Status::Ready          => write!(f, "Ready"),
      Status::BlockedOnInput => write!(f, "Blocked on input"),
      Status::Halted         => write!(f, "Halted"),
      Status::Faulted(fault) => write!(f, "Faulted: {}", fault),
    }
  }
}

/// What a single step did.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Step {
  Continue,
  Suspend,
  Halt,
}

#[derive(Clone, Debug)]
pub struct Machine {

  // Memory Store
  memory: Memory,

  // Registers //
  ip            : usize, // Instruction pointer
  relative_base : Word,  // Offset for relative mode parameters

  // Flags
  status: Status,

  // I/O Queues
  input  : Channel,
  output : Channel,

}

impl Machine {

  // region Display methods

  fn make_memory_table(&self) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Contents"]);

    let start = self.ip.saturating_sub(MEMORY_WINDOW_BEFORE);
    let end   = (self.ip + MEMORY_WINDOW_AFTER).min(self.memory.capacity());

    for idx in start..end {
      let value = self.memory.get(idx).unwrap_or_default();
      match idx == self.ip {

        true  => {
          table.add_row(row![r->format!("* --> MEM[{}] =", idx), format!("{}", value)]);
        }

        false => {
          table.add_row(row![r->format!("MEM[{}] =", idx), format!("{}", value)]);
        }

      }
    }
    table
  }

  fn make_register_table(&self) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Register", ubl->"Contents"]);
    table.add_row(row![r->"IP =", format!("{}", self.ip)]);
    table.add_row(row![r->"RB =", format!("{}", self.relative_base)]);
    table.add_row(row![r->"Status =", format!("{}", self.status)]);
    table.add_row(row![r->"Input =", format!("{}", self.input)]);
    table.add_row(row![r->"Output =", format!("{}", self.output)]);
    table
  }

  // endregion

  // region Construction and driver interface

  /**
    Copies `program` into the front of a zero-filled memory of `capacity` words and queues
    `inputs`. Fails if the program doesn't fit.
  */
  pub fn new<I>(program: &[Word], inputs: I, capacity: usize) -> Result<Machine, IntcodeError>
    where I: IntoIterator<Item = Word>
  {
    let mut input = Channel::new();
    input.extend(inputs);

    Ok(Machine {
      memory        :  Memory::new(program, capacity)?,
      ip            :  0,
      relative_base :  0,
      status        :  Status::Ready,
      input,
      output        :  Channel::new(),
    })
  }

  /// A machine with `DEFAULT_MEMORY_CAPACITY` words of memory.
  pub fn with_default_memory<I>(program: &[Word], inputs: I) -> Result<Machine, IntcodeError>
    where I: IntoIterator<Item = Word>
  {
    Machine::new(program, inputs, DEFAULT_MEMORY_CAPACITY)
  }

  pub fn push_input(&mut self, value: Word) {
    self.input.push(value);
  }

  pub fn push_inputs<I: IntoIterator<Item = Word>>(&mut self, values: I) {
    self.input.extend(values);
  }

  /// Queues the characters of `line` and a trailing newline.
  pub fn push_ascii(&mut self, line: &str) {
    self.input.push_ascii(line);
  }

  /// Queues each line as by `push_ascii`, in order.
  pub fn push_ascii_lines<'a, I>(&mut self, lines: I)
    where I: IntoIterator<Item = &'a str>
  {
    self.input.push_ascii_lines(lines);
  }

  pub fn pop_output(&mut self) -> Option<Word> {
    self.output.pop()
  }

  /// Pops leading ASCII outputs as text. A non-ASCII output stops the scan and stays queued.
  pub fn pop_output_string(&mut self) -> String {
    self.output.pop_ascii()
  }

  pub fn drain_output(&mut self) -> Vec<Word> {
    self.output.drain().collect()
  }

  pub fn pending_input(&self) -> usize {
    self.input.len()
  }

  pub fn pending_output(&self) -> usize {
    self.output.len()
  }

  pub fn status(&self) -> Status {
    self.status
  }

  /// True once the machine reached a terminal state, with or without a fault.
  pub fn is_halted(&self) -> bool {
    self.status.is_terminal()
  }

  pub fn halted_with_no_errors(&self) -> bool {
    self.status == Status::Halted
  }

  /// True while the machine can still execute instructions.
  pub fn running(&self) -> bool {
    !self.status.is_terminal()
  }

  /// The fault that stopped the machine, if any.
  pub fn fault(&self) -> Option<Fault> {
    match self.status {
      Status::Faulted(fault) => Some(fault),
      _                      => None
    }
  }

  pub fn ip(&self) -> usize {
    self.ip
  }

  pub fn relative_base(&self) -> Word {
    self.relative_base
  }

  pub fn memory(&self) -> &Memory {
    &self.memory
  }

  pub fn peek(&self, address: usize) -> Option<Word> {
    self.memory.get(address)
  }

  /// Overwrites a memory word, e.g. to patch a program before running it.
  pub fn poke(&mut self, address: usize, value: Word) -> Result<(), IntcodeError> {
    match self.memory.set(address, value) {
      true  => Ok(()),
      false => Err(IntcodeError::OutOfBounds { address, capacity: self.memory.capacity() })
    }
  }

  /// A deep copy of memory. Registers, flags and queues are not included.
  pub fn dump_memory(&self) -> Snapshot {
    self.memory.snapshot()
  }

  /// Replaces the contents of memory with `snapshot`, leaving registers, flags and queues alone.
  pub fn restore_memory(&mut self, snapshot: &Snapshot) -> Result<(), IntcodeError> {
    self.memory.restore(snapshot)
  }

  /// Clears the ip, relative base and status. Memory and queues are untouched.
  pub fn reset(&mut self) {
    self.ip            = 0;
    self.relative_base = 0;
    self.status        = Status::Ready;
  }

  // endregion

  // region Control unit

  /**
    Executes instructions until the machine halts, faults, or blocks on input, and returns the
    resulting status. Calling `run` on a terminal machine does nothing.
  */
  pub fn run(&mut self) -> Status {
    if self.status.is_terminal() {
      return self.status;
    }
    self.status = Status::Ready;

    loop {
      match self.step() {

        Ok(Step::Continue) => {}

        Ok(Step::Suspend)  => {
          debug!(ip = self.ip, "blocked on input");
          self.status = Status::BlockedOnInput;
          break;
        }

        Ok(Step::Halt)     => {
          debug!(ip = self.ip, outputs = self.output.len(), "halted");
          self.status = Status::Halted;
          break;
        }

        Err(fault)         => {
          warn!(%fault, "machine faulted");
          self.status = Status::Faulted(fault);
          break;
        }

      }
    }

    self.status
  }

  /**
    Fetches, decodes and executes one instruction. Every operand is resolved before anything is
    written, so an instruction either applies completely or faults without side effects.
  */
  fn step(&mut self) -> Result<Step, Fault> {
    let ip = self.ip;

    let word = self.memory
        .get(ip)
        .ok_or(Fault::Address { ip, address: ip as Word })?;
    let instruction = decode_instruction(ip, word)?;
    let parameters  = self.fetch_parameters(&instruction)?;

    #[cfg(feature = "trace_computation")]
    trace!(ip, %instruction, "\n{}", self);

    match instruction.operation {

      Operation::Add => {
        let (a, b, dst) = self.binary_operands(&parameters)?;
        self.store(dst, a.wrapping_add(b));
      }

      Operation::Multiply => {
        let (a, b, dst) = self.binary_operands(&parameters)?;
        self.store(dst, a.wrapping_mul(b));
      }

      Operation::LessThan => {
        let (a, b, dst) = self.binary_operands(&parameters)?;
        self.store(dst, (a < b) as Word);
      }

      Operation::Equals => {
        let (a, b, dst) = self.binary_operands(&parameters)?;
        self.store(dst, (a == b) as Word);
      }

      Operation::Input => {
        // Suspend before touching anything, so the retry sees the same machine.
        if self.input.is_empty() {
          return Ok(Step::Suspend);
        }
        let dst = self.target(&parameters, 0)?;
        if let Some(value) = self.input.pop() {
          self.store(dst, value);
        }
      }

      Operation::Output => {
        let value = self.load(&parameters, 0)?;
        self.output.push(value);
      }

      | Operation::JumpIfTrue
      | Operation::JumpIfFalse => {
        let condition = self.load(&parameters, 0)?;
        let target    = self.load(&parameters, 1)?;
        let jump = match instruction.operation {
          Operation::JumpIfTrue => condition != 0,
          _                     => condition == 0
        };
        if jump {
          // The jump target is validated here; one past the end is caught by the next fetch.
          self.ip = usize::try_from(target).map_err(|_| Fault::Address { ip, address: target })?;
          return Ok(Step::Continue);
        }
      }

      Operation::AdjustBase => {
        let offset = self.load(&parameters, 0)?;
        self.relative_base = self.relative_base.wrapping_add(offset);
      }

      Operation::Halt => {
        return Ok(Step::Halt);
      }

    }

    self.ip += instruction.operation.width();
    Ok(Step::Continue)
  }

  // endregion

  // region Operand access

  /// Reads the raw parameter words following the instruction at the ip.
  fn fetch_parameters(&self, instruction: &Instruction) -> Result<[Parameter; MAX_ARITY], Fault> {
    let arity = instruction.operation.arity();
    match self.memory.window(self.ip + 1, arity) {
      Some(raw) => Ok(instruction.parameters(raw)),
      None      => Err(Fault::Address { ip: self.ip, address: self.memory.capacity() as Word })
    }
  }

  fn resolve(&self, parameters: &[Parameter; MAX_ARITY], idx: usize) -> Result<Location, Fault> {
    parameters[idx].resolve(&self.memory, self.relative_base, self.ip)
  }

  fn load(&self, parameters: &[Parameter; MAX_ARITY], idx: usize) -> Result<Word, Fault> {
    Ok(self.resolve(parameters, idx)?.load(&self.memory))
  }

  fn target(&self, parameters: &[Parameter; MAX_ARITY], idx: usize) -> Result<usize, Fault> {
    parameters[idx].resolve_target(&self.memory, self.relative_base, self.ip, idx + 1)
  }

  /// Operands of the three-parameter instructions: two reads and a write target.
  fn binary_operands(&self, parameters: &[Parameter; MAX_ARITY]) -> Result<(Word, Word, usize), Fault> {
    let a   = self.load(parameters, 0)?;
    let b   = self.load(parameters, 1)?;
    let dst = self.target(parameters, 2)?;
    Ok((a, b, dst))
  }

  /// `dst` comes from `target`, which already checked it against the memory bounds.
  fn store(&mut self, dst: usize, value: Word) {
    self.memory.set(dst, value);
  }

  // endregion

}


lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Display for Machine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let register_table = self.make_register_table();
    let memory_table   = self.make_memory_table();

    let mut combined_table = table!([register_table, memory_table]);

    combined_table.set_titles(row![ub->"Registers", ub->"Memory"]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    write!(f, "{}", combined_table)
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::FaultKind;
  use crate::program::Program;

  const EQUALS_EIGHT: &[Word] = &[3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];
  const QUINE: &[Word] = &[109, 1, 204, -1, 1001, 100, 1, 100, 1008, 100, 16, 101, 1006, 101, 0, 99];
  const COMPARE_TO_EIGHT: &[Word] = &[
    3, 21, 1008, 21, 8, 20, 1005, 20, 22, 107, 8, 21, 20, 1006, 20, 31, 1106, 0, 36, 98, 0, 0,
    1002, 21, 125, 20, 4, 20, 1105, 1, 46, 104, 999, 1105, 1, 46, 1101, 1000, 1, 20, 4, 20, 1105,
    1, 46, 98, 99
  ];

  fn run_with(program: &[Word], inputs: Vec<Word>) -> Machine {
    let mut machine = Machine::with_default_memory(program, inputs).unwrap();
    machine.run();
    machine
  }

  #[test]
  fn add_in_place(){
    let mut machine = Machine::new(&[1, 0, 0, 0, 99], vec![], 5).unwrap();
    assert_eq!(machine.run(), Status::Halted);
    assert_eq!(machine.peek(0), Some(2));
    assert!(machine.halted_with_no_errors());
  }

  #[test]
  fn multiply_into_data(){
    let machine = run_with(&[1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50], vec![]);
    assert_eq!(machine.memory().as_slice()[..12], [3500, 9, 10, 70, 2, 3, 11, 0, 99, 30, 40, 50]);
  }

  #[test]
  fn immediate_and_negative_operands(){
    let machine = run_with(&[1101, 100, -1, 4, 0], vec![]);
    assert!(machine.halted_with_no_errors());
    assert_eq!(machine.peek(4), Some(99));
  }

  #[test]
  fn echo(){
    let mut machine = run_with(&[3, 0, 4, 0, 99], vec![7]);
    assert_eq!(machine.drain_output(), vec![7]);
    assert!(machine.halted_with_no_errors());
  }

  #[test]
  fn equals_position_mode(){
    let mut machine = run_with(EQUALS_EIGHT, vec![8]);
    assert_eq!(machine.drain_output(), vec![1]);
    assert!(machine.halted_with_no_errors());

    let mut machine = run_with(EQUALS_EIGHT, vec![7]);
    assert_eq!(machine.drain_output(), vec![0]);
  }

  #[test]
  fn jumps_and_comparisons(){
    for (input, expected) in &[(7, 999), (8, 1000), (9, 1001)] {
      let mut machine = run_with(COMPARE_TO_EIGHT, vec![*input]);
      assert_eq!(machine.drain_output(), vec![*expected]);
      assert!(machine.halted_with_no_errors());
    }
  }

  #[test]
  fn quine(){
    let mut machine = Machine::new(QUINE, vec![], 128).unwrap();
    machine.run();
    assert!(machine.halted_with_no_errors());
    assert_eq!(machine.drain_output(), QUINE.to_vec());
  }

  #[test]
  fn large_numbers(){
    let mut machine = run_with(&[1102, 34915192, 34915192, 7, 4, 7, 99, 0], vec![]);
    assert_eq!(machine.pop_output(), Some(1219070632396864));

    let mut machine = run_with(&[104, 1125899906842624, 99], vec![]);
    assert_eq!(machine.pop_output(), Some(1125899906842624));
  }

  #[test]
  fn relative_base_write(){
    // adjust base by 10, read into MEM[base + 2], output it
    let program = Program::assemble("AdjustBase #10\nInput @2\nOutput 12\nHalt").unwrap();
    let mut machine = run_with(&program, vec![-42]);
    assert_eq!(machine.relative_base(), 10);
    assert_eq!(machine.drain_output(), vec![-42]);
  }

  #[test]
  fn blocking_is_repeatable(){
    let mut machine = Machine::with_default_memory(&[3, 0, 4, 0, 3, 0, 4, 0, 99], vec![]).unwrap();

    for _ in 0..3 {
      assert_eq!(machine.run(), Status::BlockedOnInput);
      assert_eq!(machine.ip(), 0);
      assert!(machine.running());
      assert_eq!(machine.pending_output(), 0);
    }

    machine.push_input(5);
    assert_eq!(machine.run(), Status::BlockedOnInput);
    assert_eq!(machine.ip(), 4);
    assert_eq!(machine.pop_output(), Some(5));

    machine.push_inputs(vec![6, 7]);
    assert_eq!(machine.run(), Status::Halted);
    assert_eq!(machine.drain_output(), vec![6]);
    // Exactly one value per input instruction.
    assert_eq!(machine.pending_input(), 1);
  }

  #[test]
  fn terminal_runs_are_no_ops(){
    let mut machine = run_with(&[104, 1, 99], vec![]);
    assert_eq!(machine.run(), Status::Halted);
    assert_eq!(machine.drain_output(), vec![1]);

    let mut faulted = run_with(&[42], vec![]);
    let status = faulted.status();
    assert_eq!(faulted.run(), status);
    assert!(faulted.is_halted());
    assert!(!faulted.running());
  }

  #[test]
  fn snapshot_restore_reset_is_deterministic(){
    let mut machine = Machine::with_default_memory(COMPARE_TO_EIGHT, vec![8]).unwrap();
    let snapshot = machine.dump_memory();
    machine.run();
    let first = machine.drain_output();

    machine.restore_memory(&snapshot).unwrap();
    machine.reset();
    machine.push_input(8);
    machine.run();
    assert_eq!(machine.drain_output(), first);
    assert!(machine.halted_with_no_errors());
  }

  #[test]
  fn restore_does_not_touch_registers(){
    let mut machine = run_with(&[109, 5, 203, 0, 99], vec![]);
    let snapshot = machine.dump_memory();
    assert_eq!(machine.status(), Status::BlockedOnInput);

    machine.push_input(11);
    machine.run();
    assert_eq!(machine.peek(5), Some(11));

    machine.restore_memory(&snapshot).unwrap();
    assert_eq!(machine.peek(5), Some(0));
    assert_eq!(machine.relative_base(), 5);
    assert_eq!(machine.status(), Status::Halted);
  }

  #[test]
  fn unknown_opcode(){
    let machine = run_with(&[1, 0, 0, 0, 42, 99], vec![]);
    assert_eq!(machine.fault(), Some(Fault::Decode { ip: 4, word: 42 }));
    assert!(machine.is_halted());
    assert!(!machine.halted_with_no_errors());
    // The add before the fault completed.
    assert_eq!(machine.peek(0), Some(2));
  }

  #[test]
  fn negative_jump_target(){
    let machine = run_with(&[1105, 1, -3, 99], vec![]);
    assert_eq!(machine.fault(), Some(Fault::Address { ip: 0, address: -3 }));
    assert_eq!(machine.ip(), 0);
    assert_eq!(machine.memory().as_slice()[..4], [1105, 1, -3, 99]);
  }

  #[test]
  fn running_off_the_end(){
    let mut machine = Machine::new(&[1105, 1, 4, 99], vec![], 4).unwrap();
    machine.run();
    assert_eq!(machine.fault(), Some(Fault::Address { ip: 4, address: 4 }));

    // Not enough room for the parameters of the last instruction.
    let mut machine = Machine::new(&[1101, 1, 1], vec![], 3).unwrap();
    machine.run();
    assert_eq!(machine.fault().map(|f| f.kind()), Some(FaultKind::Address));
  }

  #[test]
  fn faulting_instruction_writes_nothing(){
    // Reads MEM[-1] for the second operand; the destination MEM[5] must stay untouched.
    let machine = run_with(&[1, 0, -1, 5, 99, 77], vec![]);
    assert_eq!(machine.fault(), Some(Fault::Address { ip: 0, address: -1 }));
    assert_eq!(machine.peek(5), Some(77));
  }

  #[test]
  fn faulting_input_consumes_nothing(){
    let machine = run_with(&[103, 0, 99], vec![4]);
    assert_eq!(machine.fault(), Some(Fault::ImmediateWrite { ip: 0, parameter: 1 }));
    assert_eq!(machine.pending_input(), 1);
  }

  #[test]
  fn mode_faults(){
    let machine = run_with(&[1301, 0, 0, 0, 99], vec![]);
    assert_eq!(machine.fault(), Some(Fault::UnsupportedMode { ip: 0, parameter: 1, mode: 3 }));

    let machine = run_with(&[11101, 1, 1, 0, 99], vec![]);
    assert_eq!(machine.fault().map(|f| f.kind()), Some(FaultKind::Mode));
  }

  #[test]
  fn capacity_error(){
    assert!(matches!(
      Machine::new(&[1, 2, 3], vec![], 2),
      Err(IntcodeError::Capacity { program: 3, capacity: 2 })
    ));
  }

  #[test]
  fn poke_patches_program(){
    let mut machine = Machine::with_default_memory(&[1, 0, 0, 0, 99], vec![]).unwrap();
    machine.poke(1, 4).unwrap();
    machine.poke(2, 4).unwrap();
    machine.run();
    assert_eq!(machine.peek(0), Some(198));
    assert!(machine.poke(DEFAULT_MEMORY_CAPACITY, 0).is_err());
  }

  #[test]
  fn poke_out_of_bounds_reports_address(){
    let mut machine = Machine::new(&[99], vec![], 4).unwrap();
    assert!(matches!(
      machine.poke(usize::max_value(), 1),
      Err(IntcodeError::OutOfBounds { address, capacity: 4 }) if address == usize::max_value()
    ));
    assert!(matches!(
      machine.poke(4, 1),
      Err(IntcodeError::OutOfBounds { address: 4, capacity: 4 })
    ));
    assert_eq!(machine.memory().as_slice(), &[99, 0, 0, 0][..]);
  }

  #[test]
  fn reset_keeps_memory_and_queues(){
    // Moves the base, stores one input in MEM[6] and halts with a second input still queued.
    let mut machine = run_with(&[109, 4, 3, 6, 99, 0, 0], vec![5, 9]);
    assert_eq!(machine.status(), Status::Halted);
    assert_eq!(machine.relative_base(), 4);
    assert_eq!(machine.peek(6), Some(5));
    assert_eq!(machine.pending_input(), 1);

    machine.reset();
    assert_eq!(machine.ip(), 0);
    assert_eq!(machine.relative_base(), 0);
    assert_eq!(machine.status(), Status::Ready);
    assert_eq!(machine.peek(6), Some(5));
    assert_eq!(machine.pending_input(), 1);

    // The program runs again over the same memory and consumes the leftover input.
    assert_eq!(machine.run(), Status::Halted);
    assert_eq!(machine.peek(6), Some(9));
    assert_eq!(machine.pending_input(), 0);
  }

  #[test]
  fn ascii_io(){
    // Echo characters until a newline, then output a number.
    let program = Program::assemble("
      Input 100
      Output 100
      Equals 100, #10, 101
      JumpIfFalse 101, #0
      Output #1234567
      Halt
    ").unwrap();
    let mut machine = Machine::with_default_memory(&program, vec![]).unwrap();
    machine.push_ascii("hi");
    machine.run();
    assert_eq!(machine.pop_output_string(), "hi\n");
    assert_eq!(machine.pop_output(), Some(1234567));

    machine.reset();
    machine.push_ascii_lines(vec!["ok", "ignored"]);
    machine.run();
    assert_eq!(machine.pop_output_string(), "ok\n");
    assert_eq!(machine.pending_input(), "ignored\n".len());
  }

  #[test]
  fn display_highlights_ip(){
    let machine = run_with(&[3, 0, 99], vec![]);
    let text = machine.to_string();
    assert!(text.contains("* --> MEM[0]"));
    assert!(text.contains("Blocked on input"));
  }
}
