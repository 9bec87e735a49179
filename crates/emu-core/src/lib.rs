//! Core traits and types for instruction-stepped CPU emulation.
//!
//! A machine is a CPU core plus a bus. The CPU fetches, decodes, and
//! executes one instruction per `step`, reporting the cycles it consumed so
//! the owning loop can pace real time and interrupt delivery.

mod bus;
mod cpu;
mod observable;

pub use bus::{Bus, SimpleBus};
pub use cpu::Cpu;
pub use observable::{Observable, Value};
