//! Intel 8080 CPU core.

mod execute;

use emu_core::{Bus, Cpu, Observable, Value};

use crate::decode::{self, Instruction};
use crate::flags::{AF, CF, PF, SF, ZF};
use crate::ports::Ports;
use crate::registers::Registers;

/// Cost of a `step` while halted: the processor keeps fetching NOP-shaped
/// machine cycles without advancing.
const HALT_IDLE_CYCLES: u32 = 4;

/// Cycles consumed by accepting an interrupt (equivalent to an RST).
const INTERRUPT_CYCLES: u64 = 11;

/// The Intel 8080 processor.
///
/// Owns its register file and port latches; memory stays outside, behind
/// the [`Bus`] passed into each call. State is only ever consistent at
/// instruction boundaries, which is why interrupt delivery happens between
/// `step`s rather than inside one.
pub struct Intel8080 {
    pub regs: Registers,
    ports: Ports,
    total_cycles: u64,
}

impl Intel8080 {
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            ports: Ports::new(),
            total_cycles: 0,
        }
    }

    /// Decode the instruction at the current program counter.
    ///
    /// Does not advance `pc` or touch any other state; usable as a
    /// disassembler probe between steps.
    pub fn fetch<B: Bus>(&self, bus: &mut B) -> Instruction {
        decode::decode(bus, self.regs.pc)
    }

    /// Total cycles executed since power-on or the last `reset`.
    #[must_use]
    pub const fn cycles(&self) -> u64 {
        self.total_cycles
    }

    /// Read a byte the program wrote with OUT.
    #[must_use]
    pub const fn read_port(&self, port: u8) -> u8 {
        self.ports.output[port as usize]
    }

    /// Read one bit of an output port.
    #[must_use]
    pub const fn read_port_bit(&self, port: u8, bit: u8) -> bool {
        self.ports.output[port as usize] >> (bit & 0x07) & 1 != 0
    }

    /// Latch a byte for the program to read with IN.
    pub const fn write_port(&mut self, port: u8, value: u8) {
        self.ports.input[port as usize] = value;
    }

    /// Set or clear one bit of an input port.
    pub const fn write_port_bit(&mut self, port: u8, bit: u8, on: bool) {
        let mask = 1 << (bit & 0x07);
        if on {
            self.ports.input[port as usize] |= mask;
        } else {
            self.ports.input[port as usize] &= !mask;
        }
    }

    pub(crate) fn push16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        bus.write(self.regs.sp, value as u8);
        bus.write(self.regs.sp.wrapping_add(1), (value >> 8) as u8);
    }

    pub(crate) fn pop16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let low = bus.read(self.regs.sp);
        let high = bus.read(self.regs.sp.wrapping_add(1));
        self.regs.sp = self.regs.sp.wrapping_add(2);
        u16::from(low) | u16::from(high) << 8
    }
}

impl Default for Intel8080 {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu for Intel8080 {
    type Registers = Registers;

    fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if self.regs.halted {
            self.total_cycles += u64::from(HALT_IDLE_CYCLES);
            return HALT_IDLE_CYCLES;
        }
        let instruction = self.fetch(bus);
        let cycles = self.execute(bus, &instruction);
        self.total_cycles += u64::from(cycles);
        cycles
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Registers {
        self.regs
    }

    fn is_halted(&self) -> bool {
        self.regs.halted
    }

    /// Deliver RST `vector` (0-7). A no-op returning false while the
    /// interrupt enable flip-flop is clear.
    fn interrupt<B: Bus>(&mut self, bus: &mut B, vector: u8) -> bool {
        if !self.regs.inte {
            return false;
        }
        self.regs.inte = false;
        self.regs.halted = false;
        let return_address = self.regs.pc;
        self.push16(bus, return_address);
        self.regs.pc = u16::from(vector & 0x07) * 8;
        self.total_cycles += INTERRUPT_CYCLES;
        true
    }

    fn reset(&mut self) {
        self.regs = Registers::new();
        self.ports = Ports::new();
        self.total_cycles = 0;
    }
}

const QUERY_PATHS: &[&str] = &[
    "a", "b", "c", "d", "e", "h", "l", "f", "bc", "de", "hl", "psw", "sp", "pc", "flags.s",
    "flags.z", "flags.a", "flags.p", "flags.c", "inte", "halted", "cycles",
];

impl Observable for Intel8080 {
    fn query(&self, path: &str) -> Option<Value> {
        let regs = &self.regs;
        let value = match path {
            "a" => Value::U8(regs.a),
            "b" => Value::U8(regs.b),
            "c" => Value::U8(regs.c),
            "d" => Value::U8(regs.d),
            "e" => Value::U8(regs.e),
            "h" => Value::U8(regs.h),
            "l" => Value::U8(regs.l),
            "f" => Value::U8(regs.f),
            "bc" => Value::U16(regs.bc()),
            "de" => Value::U16(regs.de()),
            "hl" => Value::U16(regs.hl()),
            "psw" => Value::U16(regs.psw()),
            "sp" => Value::U16(regs.sp),
            "pc" => Value::U16(regs.pc),
            "flags.s" => Value::Bool(regs.flag(SF)),
            "flags.z" => Value::Bool(regs.flag(ZF)),
            "flags.a" => Value::Bool(regs.flag(AF)),
            "flags.p" => Value::Bool(regs.flag(PF)),
            "flags.c" => Value::Bool(regs.flag(CF)),
            "inte" => Value::Bool(regs.inte),
            "halted" => Value::Bool(regs.halted),
            "cycles" => Value::U64(self.total_cycles),
            _ => return None,
        };
        Some(value)
    }

    fn query_paths(&self) -> &'static [&'static str] {
        QUERY_PATHS
    }
}
