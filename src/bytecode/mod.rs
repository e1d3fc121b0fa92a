/*!

  The VM is word addressed, and every word is a signed 64 bit integer. Memory holds code and
  data interchangeably, so programs may rewrite their own instructions.

  An instruction is one opcode word followed by zero to three parameter words. The opcode word
  packs the operation and the addressing mode of each parameter as decimal digits:

    ABCDE
     │││└┴─ operation (the word modulo 100)
     ││└─── mode of parameter 1
     │└──── mode of parameter 2
     └───── mode of parameter 3

  Missing leading digits are mode zero (position). Decoding uses integer division and
  remainder, never a round trip through text.

  As in the WAM bytecode this module grew out of, an enum is used only for the operation
  itself, not for the whole instruction. Parameters stay as raw words in memory and are
  resolved against the machine's relative base at execution time.

*/

mod binary;
mod instruction;
mod assembly;

pub use binary::{decode_instruction, encode_instruction, Word};
pub use instruction::{Instruction, Operation, Mode, MAX_ARITY};
pub use assembly::{assemble, disassemble, parse_program, Listing, ListingItem};
