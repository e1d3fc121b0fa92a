/*!
  Cooperative scheduling of several machines.

  Machines never know about each other. A `Scheduler` owns a set of machines and a routing table
  of pipes; each round it moves every piped output into its consumer's input and runs the
  consumer until it blocks. A `Network` does the same for packet-switched machines, where the
  destination of each value is part of the output itself.
*/

use std::collections::VecDeque;
use std::fmt::{Display, Formatter};

use tracing::debug;

use crate::bytecode::Word;
use crate::error::IntcodeError;
use crate::machine::{Machine, Status};
use crate::memory::DEFAULT_MEMORY_CAPACITY;

/// Index of a machine within a `Scheduler` or `Network`.
pub type MachineId = usize;

/// The value a network node receives on a round in which no packet arrived for it.
pub const IDLE_INPUT: Word = -1;

/// Words per network packet: destination, x, y.
const PACKET_LEN: usize = 3;

/// Moves every output of `from` into the input of `to`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Pipe {
  pub from : MachineId,
  pub to   : MachineId,
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
  machines : Vec<Machine>,
  pipes    : Vec<Pipe>,
  rounds   : usize,
}

impl Scheduler {
  pub fn new() -> Scheduler {
    Scheduler::default()
  }

  /**
    Builds an amplifier chain: one machine per phase setting, each seeded with its phase, the
    first also with the initial signal `0`. Each machine is piped into the next, and the last
    back into the first.
  */
  pub fn feedback_loop(program: &[Word], phases: &[Word], capacity: usize)
    -> Result<Scheduler, IntcodeError>
  {
    let mut scheduler = Scheduler::new();
    for phase in phases {
      scheduler.add(Machine::new(program, vec![*phase], capacity)?);
    }

    let count = scheduler.len();
    if count > 0 {
      scheduler.machines[0].push_input(0);
      for id in 0..count {
        scheduler.connect(id, (id + 1) % count)?;
      }
    }
    Ok(scheduler)
  }

  /// Runs a feedback loop over `phases` to completion and returns the final output of the last
  /// amplifier, if it produced one.
  pub fn amplify(program: &[Word], phases: &[Word]) -> Result<Option<Word>, IntcodeError> {
    let mut scheduler = Scheduler::feedback_loop(program, phases, DEFAULT_MEMORY_CAPACITY)?;
    scheduler.run_to_completion()?;
    Ok(scheduler.machines.last_mut().and_then(|machine| machine.drain_output().pop()))
  }

  pub fn add(&mut self, machine: Machine) -> MachineId {
    self.machines.push(machine);
    self.machines.len() - 1
  }

  /// Adds a pipe from `from` to `to`. Several pipes may feed one machine; their values are
  /// delivered in the order the pipes were added.
  pub fn connect(&mut self, from: MachineId, to: MachineId) -> Result<(), IntcodeError> {
    for id in &[from, to] {
      if *id >= self.machines.len() {
        return Err(IntcodeError::UnknownMachine(*id));
      }
    }
    self.pipes.push(Pipe { from, to });
    Ok(())
  }

  pub fn len(&self) -> usize {
    self.machines.len()
  }

  pub fn is_empty(&self) -> bool {
    self.machines.is_empty()
  }

  pub fn machine(&self, id: MachineId) -> Option<&Machine> {
    self.machines.get(id)
  }

  pub fn machine_mut(&mut self, id: MachineId) -> Option<&mut Machine> {
    self.machines.get_mut(id)
  }

  pub fn machines(&self) -> &[Machine] {
    &self.machines
  }

  pub fn pipes(&self) -> &[Pipe] {
    &self.pipes
  }

  pub fn all_halted(&self) -> bool {
    self.machines.iter().all(Machine::is_halted)
  }

  /// Moves the queued outputs of every machine piped into `id` into its input. Returns the
  /// number of values moved.
  fn deliver(&mut self, id: MachineId) -> usize {
    let mut moved = 0;
    for pipe in self.pipes.iter().filter(|pipe| pipe.to == id) {
      let values = self.machines[pipe.from].drain_output();
      moved += values.len();
      self.machines[id].push_inputs(values);
    }
    moved
  }

  /**
    Visits every machine once, in order. A machine that has not halted first receives the outputs
    of the machines piped into it and is then run until it blocks or halts. Returns whether
    anything happened: an instruction executed or a value was routed.
  */
  pub fn step_round(&mut self) -> Result<bool, IntcodeError> {
    self.rounds += 1;
    let mut progressed = false;

    for id in 0..self.machines.len() {
      if self.machines[id].is_halted() {
        continue;
      }

      let moved = self.deliver(id);

      let machine = &mut self.machines[id];
      let before  = (machine.ip(), machine.pending_input(), machine.pending_output());
      let status  = machine.run();
      let after   = (machine.ip(), machine.pending_input(), machine.pending_output());

      if let Status::Faulted(fault) = status {
        return Err(IntcodeError::MachineFault { machine: id, fault });
      }
      progressed |= moved > 0 || before != after || status == Status::Halted;
    }

    debug!(round = self.rounds, progressed, "scheduler round");
    Ok(progressed)
  }

  /// Runs rounds until every machine has halted. A round in which nothing happens while some
  /// machine is still waiting for input is reported as `Stalled`.
  pub fn run_to_completion(&mut self) -> Result<(), IntcodeError> {
    while !self.all_halted() {
      if !self.step_round()? {
        return Err(IntcodeError::Stalled { round: self.rounds });
      }
    }
    Ok(())
  }
}

/// A packet leaving the network, i.e. addressed to no node.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Packet {
  pub destination : Word,
  pub x           : Word,
  pub y           : Word,
}

impl Display for Packet {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} <- ({}, {})", self.destination, self.x, self.y)
  }
}

/**
  A packet-switched network of machines running the same program. Every node is booted with its
  own address as its first input. Nodes send packets as three consecutive outputs
  `destination, x, y`; packets for a node in the network are queued for it, and the rest are
  handed back to the caller.
*/
#[derive(Clone, Debug)]
pub struct Network {
  nodes   : Vec<Machine>,
  pending : Vec<VecDeque<Word>>,
  rounds  : usize,
}

impl Network {
  pub fn new(program: &[Word], count: usize, capacity: usize) -> Result<Network, IntcodeError> {
    let nodes = (0..count)
        .map(|address| Machine::new(program, vec![address as Word], capacity))
        .collect::<Result<Vec<Machine>, IntcodeError>>()?;

    Ok(Network {
      nodes,
      pending: vec![VecDeque::new(); count],
      rounds: 0,
    })
  }

  pub fn node(&self, id: MachineId) -> Option<&Machine> {
    self.nodes.get(id)
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// The node a destination word addresses, if it is inside the network.
  fn node_for(&self, destination: Word) -> Option<MachineId> {
    match destination {
      d if d >= 0 && (d as usize) < self.nodes.len() => Some(d as usize),
      _                                               => None
    }
  }

  /**
    Runs every node once, then routes the complete packets they emitted. Each node then receives
    the packets queued for it, or `IDLE_INPUT` if there are none. Returns the packets addressed
    outside of the network, in the order they were sent.
  */
  pub fn step_round(&mut self) -> Result<Vec<Packet>, IntcodeError> {
    self.rounds += 1;
    let mut external = Vec::new();

    for id in 0..self.nodes.len() {
      if let Status::Faulted(fault) = self.nodes[id].run() {
        return Err(IntcodeError::MachineFault { machine: id, fault });
      }

      // An incomplete packet stays queued until the node finishes it.
      while self.nodes[id].pending_output() >= PACKET_LEN {
        let mut frame = [0; PACKET_LEN];
        for word in frame.iter_mut() {
          *word = self.nodes[id].pop_output().unwrap_or_default();
        }
        let packet = Packet { destination: frame[0], x: frame[1], y: frame[2] };

        match self.node_for(packet.destination) {
          Some(to) => {
            debug!(from = id, %packet, "routing packet");
            self.pending[to].extend(&[packet.x, packet.y]);
          }
          None     => {
            debug!(from = id, %packet, "packet left the network");
            external.push(packet);
          }
        }
      }
    }

    for (node, queue) in self.nodes.iter_mut().zip(self.pending.iter_mut()) {
      // Halted nodes never read again; packets sent to them are dropped.
      if node.is_halted() {
        queue.clear();
        continue;
      }
      match queue.is_empty() {
        true  => node.push_input(IDLE_INPUT),
        false => node.push_inputs(queue.drain(..)),
      }
    }

    Ok(external)
  }

  /// Runs rounds until some packet leaves the network, giving up after `max_rounds`.
  pub fn run_until_external(&mut self, max_rounds: usize) -> Result<Option<Packet>, IntcodeError> {
    for _ in 0..max_rounds {
      if let Some(packet) = self.step_round()?.into_iter().next() {
        return Ok(Some(packet));
      }
    }
    Ok(None)
  }

  pub fn rounds(&self) -> usize {
    self.rounds
  }
}
