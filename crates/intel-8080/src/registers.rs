//! 8080 register file.

use crate::flags::{FIXED_HIGH, FIXED_LOW};

/// The 8080 register file.
///
/// Seven 8-bit working registers, the packed flags byte, the stack pointer
/// and program counter, plus the two control flip-flops that outlive any
/// single instruction. Register pairs are derived views: `bc()` is always
/// `b` and `c` glued together, never separate storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator.
    pub a: u8,
    /// Flags byte (low half of PSW). Keep normalised via `set_f`.
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    /// Stack pointer.
    pub sp: u16,
    /// Program counter.
    pub pc: u16,
    /// Interrupt enable flip-flop. Set by EI, cleared by DI and by
    /// interrupt delivery.
    pub inte: bool,
    /// Set by HLT, cleared by interrupt delivery.
    pub halted: bool,
}

impl Registers {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            a: 0,
            f: FIXED_HIGH,
            b: 0,
            c: 0,
            d: 0,
            e: 0,
            h: 0,
            l: 0,
            sp: 0,
            pc: 0,
            inte: false,
            halted: false,
        }
    }

    #[must_use]
    pub const fn bc(&self) -> u16 {
        (self.b as u16) << 8 | self.c as u16
    }

    #[must_use]
    pub const fn de(&self) -> u16 {
        (self.d as u16) << 8 | self.e as u16
    }

    #[must_use]
    pub const fn hl(&self) -> u16 {
        (self.h as u16) << 8 | self.l as u16
    }

    /// Processor status word: accumulator in the high byte, flags low.
    #[must_use]
    pub const fn psw(&self) -> u16 {
        (self.a as u16) << 8 | self.f as u16
    }

    pub const fn set_bc(&mut self, value: u16) {
        self.b = (value >> 8) as u8;
        self.c = value as u8;
    }

    pub const fn set_de(&mut self, value: u16) {
        self.d = (value >> 8) as u8;
        self.e = value as u8;
    }

    pub const fn set_hl(&mut self, value: u16) {
        self.h = (value >> 8) as u8;
        self.l = value as u8;
    }

    pub const fn set_psw(&mut self, value: u16) {
        self.a = (value >> 8) as u8;
        self.set_f(value as u8);
    }

    /// Store a flags byte, forcing the architecturally fixed bits.
    pub const fn set_f(&mut self, value: u8) {
        self.f = (value | FIXED_HIGH) & !FIXED_LOW;
    }

    /// Returns true if `flag` (one of the `flags` constants) is set.
    #[must_use]
    pub const fn flag(&self, flag: u8) -> bool {
        self.f & flag != 0
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{CF, SF, ZF};

    #[test]
    fn pairs_are_views_over_registers() {
        let mut regs = Registers::new();
        regs.set_bc(0x1234);
        assert_eq!(regs.b, 0x12);
        assert_eq!(regs.c, 0x34);
        assert_eq!(regs.bc(), 0x1234);

        regs.h = 0xAB;
        regs.l = 0xCD;
        assert_eq!(regs.hl(), 0xABCD);
    }

    #[test]
    fn set_f_forces_fixed_bits() {
        let mut regs = Registers::new();
        regs.set_f(0xFF);
        assert_eq!(regs.f, 0xD7);
        regs.set_f(0x00);
        assert_eq!(regs.f, 0x02);
    }

    #[test]
    fn psw_packs_accumulator_and_flags() {
        let mut regs = Registers::new();
        regs.a = 0x9A;
        regs.set_f(SF | ZF | CF);
        assert_eq!(regs.psw(), 0x9AC3);

        regs.set_psw(0x55FF);
        assert_eq!(regs.a, 0x55);
        assert_eq!(regs.f, 0xD7);
    }
}
