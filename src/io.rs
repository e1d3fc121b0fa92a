//! The FIFO queues a machine exchanges values through. Both are unbounded.

use std::collections::vec_deque::{Drain, Iter};
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};

use crate::bytecode::Word;

/// The value an ASCII line is terminated with.
pub const NEWLINE: Word = '\n' as Word;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Channel {
  queue: VecDeque<Word>,
}

impl Channel {
  pub fn new() -> Channel {
    Channel::default()
  }

  pub fn push(&mut self, value: Word) {
    self.queue.push_back(value);
  }

  pub fn pop(&mut self) -> Option<Word> {
    self.queue.pop_front()
  }

  pub fn peek(&self) -> Option<Word> {
    self.queue.front().copied()
  }

  pub fn len(&self) -> usize {
    self.queue.len()
  }

  pub fn is_empty(&self) -> bool {
    self.queue.is_empty()
  }

  pub fn drain(&mut self) -> Drain<'_, Word> {
    self.queue.drain(..)
  }

  pub fn iter(&self) -> Iter<'_, Word> {
    self.queue.iter()
  }

  /// Queues the characters of `line` followed by a newline.
  pub fn push_ascii(&mut self, line: &str) {
    self.queue.extend(line.chars().map(|c| c as Word));
    self.queue.push_back(NEWLINE);
  }

  /// Queues each line in turn, each followed by a newline.
  pub fn push_ascii_lines<'a, I>(&mut self, lines: I)
    where I: IntoIterator<Item = &'a str>
  {
    for line in lines {
      self.push_ascii(line);
    }
  }

  /**
    Pops values for as long as they are ASCII characters and returns them as a string. The
    first non-ASCII value, if any, stays queued so the caller can pop it as a number.
  */
  pub fn pop_ascii(&mut self) -> String {
    let mut text = String::new();
    while let Some(c) = self.peek().and_then(as_ascii) {
      text.push(c);
      self.queue.pop_front();
    }
    text
  }
}

fn as_ascii(value: Word) -> Option<char> {
  match value {
    0..=127 => Some(value as u8 as char),
    _       => None
  }
}

impl Extend<Word> for Channel {
  fn extend<T: IntoIterator<Item = Word>>(&mut self, iter: T) {
    self.queue.extend(iter);
  }
}

impl Display for Channel {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "[{}]",
      self.queue
          .iter()
          .map(Word::to_string)
          .collect::<Vec<String>>()
          .join(", ")
    )
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fifo_order(){
    let mut channel = Channel::new();
    channel.extend(vec![1, 2]);
    channel.push(3);
    assert_eq!(channel.len(), 3);
    assert_eq!(channel.pop(), Some(1));
    assert_eq!(channel.pop(), Some(2));
    assert_eq!(channel.pop(), Some(3));
    assert_eq!(channel.pop(), None);
    assert!(channel.is_empty());
  }

  #[test]
  fn ascii_lines(){
    let mut channel = Channel::new();
    channel.push_ascii("NOT A J");
    assert_eq!(channel.len(), 8);
    assert_eq!(channel.iter().last(), Some(&NEWLINE));
    assert_eq!(channel.pop_ascii(), "NOT A J\n");
  }

  #[test]
  fn ascii_scripts(){
    let mut channel = Channel::new();
    channel.push_ascii_lines(vec!["NOT A J", "WALK"]);
    assert_eq!(channel.len(), 13);
    assert_eq!(channel.pop_ascii(), "NOT A J\nWALK\n");
  }

  #[test]
  fn pop_ascii_stops_at_numbers(){
    let mut channel = Channel::new();
    channel.extend(vec![79, 75, 10, 19349939, 65]);
    assert_eq!(channel.pop_ascii(), "OK\n");
    assert_eq!(channel.pop(), Some(19349939));
    assert_eq!(channel.pop_ascii(), "A");
  }

  #[test]
  fn display(){
    let mut channel = Channel::new();
    channel.extend(vec![-1, 0, 5]);
    assert_eq!(channel.to_string(), "[-1, 0, 5]");
  }
}
