//! Intel 8080 CPU emulator.
//!
//! The core is stepped one whole instruction at a time: `step()` fetches,
//! decodes, and executes a single instruction and returns its cycle cost.
//! Decoding is driven by a total 256-entry opcode table; execution is one
//! exhaustive dispatch over the decoded instruction kind.
//!
//! Interrupts are the 8080's RST scheme: peripherals hand the core a vector
//! 0-7 between steps and the core pushes `pc` and jumps to `vector * 8`
//! when interrupts are enabled. Port I/O is a dedicated 256-port address
//! space with peripheral-side accessors on [`Intel8080`].

mod alu;
mod cpu;
mod decode;
pub mod flags;
mod ports;
mod registers;

pub use cpu::Intel8080;
pub use decode::{Condition, Instruction, Kind, Operand, Operand8, RegPair, decode};
pub use registers::Registers;
