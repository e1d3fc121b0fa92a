use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::info;

use intcode::bytecode::disassemble;
use intcode::logger::setup_logger;
use intcode::{IntcodeError, Machine, Program, Scheduler, Status, Word, DEFAULT_MEMORY_CAPACITY};

#[derive(Parser)]
#[command(name = "intcode", about = "Run and inspect Intcode programs", version)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run a program until it halts or needs more input
  Run {
    /// ROM file: comma separated words, possibly over several lines
    rom: PathBuf,
    /// Value to queue as input (repeatable)
    #[arg(short, long = "input", allow_hyphen_values = true)]
    inputs: Vec<Word>,
    /// Line of text to queue as ASCII input, newline appended (repeatable)
    #[arg(long)]
    ascii: Vec<String>,
    /// Memory capacity in words
    #[arg(long, default_value_t = DEFAULT_MEMORY_CAPACITY)]
    memory: usize,
    /// Print the final machine state
    #[arg(long)]
    dump: bool,
  },
  /// Print an assembly listing of a program
  Disassemble {
    rom: PathBuf,
  },
  /// Run a chain of amplifiers with feedback and print the final signal
  Amplify {
    rom: PathBuf,
    /// Comma separated phase settings, one per amplifier
    #[arg(long, value_delimiter = ',', required = true)]
    phases: Vec<Word>,
  },
}

/// Prints queued outputs, as text while they are ASCII and as numbers otherwise.
fn print_outputs(machine: &mut Machine) {
  while machine.pending_output() > 0 {
    let text = machine.pop_output_string();
    if !text.is_empty() {
      print!("{}", text);
    }
    if let Some(value) = machine.pop_output() {
      println!("{}", value);
    }
  }
}

fn run(
    rom    : PathBuf,
    inputs : Vec<Word>,
    ascii  : Vec<String>,
    memory : usize,
    dump   : bool
  ) -> Result<Status, IntcodeError>
{
  let program = Program::load(&rom)?;
  let mut machine = Machine::new(&program, inputs, memory)?;
  for line in &ascii {
    machine.push_ascii(line);
  }

  let status = machine.run();
  print_outputs(&mut machine);
  if dump {
    println!("{}", machine);
  }
  info!(%status, "run finished");
  Ok(status)
}

fn execute(cli: Cli) -> Result<bool, IntcodeError> {
  match cli.command {

    Commands::Run { rom, inputs, ascii, memory, dump } => {
      let status = run(rom, inputs, ascii, memory, dump)?;
      match status {
        Status::Halted => Ok(true),
        _              => {
          eprintln!("{}", status);
          Ok(false)
        }
      }
    }

    Commands::Disassemble { rom } => {
      let program = Program::load(&rom)?;
      print!("{}", disassemble(&program));
      Ok(true)
    }

    Commands::Amplify { rom, phases } => {
      let program = Program::load(&rom)?;
      match Scheduler::amplify(&program, &phases)? {
        Some(signal) => {
          println!("{}", signal);
          Ok(true)
        }
        None => {
          eprintln!("the last amplifier produced no output");
          Ok(false)
        }
      }
    }

  }
}

fn main() {
  setup_logger();

  match execute(Cli::parse()) {
    Ok(true)  => {}
    Ok(false) => process::exit(1),
    Err(e)    => {
      eprintln!("Error: {}", e);
      process::exit(2);
    }
  }
}
