/*!
  Fixed-capacity, word-addressed memory. The capacity is chosen at construction and never
  changes; an address outside of `[0, capacity)` is a fault, never a reason to grow.

  A `Snapshot` is an owned copy of a memory buffer. It shares nothing with the `Memory` it was
  taken from, so a driver can branch from it any number of times.
*/

use std::convert::TryFrom;

use crate::bytecode::Word;
use crate::error::IntcodeError;

/// The capacity used when a driver doesn't ask for one.
pub const DEFAULT_MEMORY_CAPACITY: usize = 16 * 1024;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Memory {
  cells: Box<[Word]>,
}

/// A deep copy of a `Memory` buffer.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Snapshot {
  cells: Box<[Word]>,
}

impl Memory {
  /// Copies `program` into the front of a zero-filled buffer of `capacity` words.
  pub fn new(program: &[Word], capacity: usize) -> Result<Memory, IntcodeError> {
    if program.len() > capacity {
      return Err(IntcodeError::Capacity { program: program.len(), capacity });
    }

    let mut cells = vec![0; capacity];
    cells[..program.len()].copy_from_slice(program);
    Ok(Memory { cells: cells.into_boxed_slice() })
  }

  pub fn capacity(&self) -> usize {
    self.cells.len()
  }

  pub fn get(&self, idx: usize) -> Option<Word> {
    self.cells.get(idx).copied()
  }

  /// Writes `value` at `idx`, returning `false` if `idx` is out of bounds.
  pub fn set(&mut self, idx: usize, value: Word) -> bool {
    match self.cells.get_mut(idx) {
      Some(cell) => {
        *cell = value;
        true
      }
      None => false
    }
  }

  /// Converts a signed address into an index, if it is in bounds.
  pub fn index_of(&self, address: Word) -> Option<usize> {
    usize::try_from(address).ok().filter(|idx| *idx < self.capacity())
  }

  /// The `len` words starting at `start`, or `None` if any of them is out of bounds.
  pub fn window(&self, start: usize, len: usize) -> Option<&[Word]> {
    let end = start.checked_add(len)?;
    self.cells.get(start..end)
  }

  pub fn as_slice(&self) -> &[Word] {
    &self.cells
  }

  pub fn snapshot(&self) -> Snapshot {
    Snapshot { cells: self.cells.clone() }
  }

  /// Overwrites every cell with the snapshot's contents. The snapshot must come from a memory
  /// of the same capacity.
  pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), IntcodeError> {
    if snapshot.cells.len() != self.cells.len() {
      return Err(IntcodeError::SnapshotMismatch {
        expected: self.cells.len(),
        found: snapshot.cells.len()
      });
    }
    self.cells.copy_from_slice(&snapshot.cells);
    Ok(())
  }
}

impl Snapshot {
  pub fn capacity(&self) -> usize {
    self.cells.len()
  }

  pub fn get(&self, idx: usize) -> Option<Word> {
    self.cells.get(idx).copied()
  }

  pub fn as_slice(&self) -> &[Word] {
    &self.cells
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zero_filled_past_program(){
    let memory = Memory::new(&[1, 2, 3], 6).unwrap();
    assert_eq!(memory.as_slice(), &[1, 2, 3, 0, 0, 0]);
    assert_eq!(memory.capacity(), 6);
    assert_eq!(memory.get(6), None);
  }

  #[test]
  fn program_must_fit(){
    match Memory::new(&[1, 2, 3], 2) {
      Err(IntcodeError::Capacity { program, capacity }) => {
        assert_eq!(program, 3);
        assert_eq!(capacity, 2);
      }
      other => panic!("expected a capacity error, got {:?}", other),
    }
    assert!(Memory::new(&[1, 2, 3], 3).is_ok());
  }

  #[test]
  fn set_never_grows(){
    let mut memory = Memory::new(&[], 2).unwrap();
    assert!(memory.set(1, 7));
    assert!(!memory.set(2, 7));
    assert_eq!(memory.capacity(), 2);
  }

  #[test]
  fn index_and_window_bounds(){
    let memory = Memory::new(&[5, 6, 7], 4).unwrap();
    assert_eq!(memory.index_of(3), Some(3));
    assert_eq!(memory.index_of(4), None);
    assert_eq!(memory.index_of(-1), None);
    assert_eq!(memory.window(1, 3), Some(&[6, 7, 0][..]));
    assert_eq!(memory.window(2, 3), None);
    assert_eq!(memory.window(usize::max_value(), 2), None);
  }

  #[test]
  fn snapshot_is_independent(){
    let mut memory = Memory::new(&[1, 2], 4).unwrap();
    let snapshot = memory.snapshot();

    memory.set(0, 100);
    assert_eq!(snapshot.get(0), Some(1));

    memory.restore(&snapshot).unwrap();
    assert_eq!(memory.get(0), Some(1));

    // Restoring doesn't alias: later writes leave the snapshot alone.
    memory.set(1, 200);
    assert_eq!(snapshot.get(1), Some(2));
  }

  #[test]
  fn snapshot_capacity_must_match(){
    let mut memory = Memory::new(&[], 4).unwrap();
    let other = Memory::new(&[], 8).unwrap().snapshot();
    assert!(matches!(
      memory.restore(&other),
      Err(IntcodeError::SnapshotMismatch { expected: 4, found: 8 })
    ));
  }
}
