//! CPU core trait.

use crate::Bus;

/// A CPU core stepped one whole instruction at a time.
///
/// The bus is passed into each call, not owned, so it can be shared with
/// other components (e.g. a video chip scanning out of the same RAM).
///
/// CPUs expose their internal state for observation and debugging.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Fetch, decode, and execute one instruction.
    ///
    /// Returns the number of clock cycles consumed. The owning loop
    /// accumulates these to pace real-time emulation and to decide when to
    /// deliver interrupts.
    fn step<B: Bus>(&mut self, bus: &mut B) -> u32;

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Returns true if the CPU is halted.
    fn is_halted(&self) -> bool;

    /// Request a maskable interrupt on the given vector.
    ///
    /// Must only be called between `step`s, never mid-instruction.
    /// Returns true if the CPU accepted the interrupt.
    fn interrupt<B: Bus>(&mut self, bus: &mut B, vector: u8) -> bool;

    /// Reset the CPU to its power-on state.
    fn reset(&mut self);
}
