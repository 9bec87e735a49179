//! 8080 flag register bits.
//!
//! The flags byte is the low half of the processor status word (PSW). Three
//! bits are architecturally fixed: bit 1 always reads 1, bits 3 and 5 always
//! read 0. [`crate::Registers::set_f`] enforces this.

/// Sign flag (bit 7) - set if bit 7 of the result is set.
pub const SF: u8 = 0b1000_0000;
/// Zero flag (bit 6) - set if the result is zero.
pub const ZF: u8 = 0b0100_0000;
/// Auxiliary carry flag (bit 4) - carry out of bit 3, consumed by DAA.
pub const AF: u8 = 0b0001_0000;
/// Parity flag (bit 2) - set if the result has an even number of set bits.
pub const PF: u8 = 0b0000_0100;
/// Carry flag (bit 0) - carry out of bit 7, or borrow for subtraction.
pub const CF: u8 = 0b0000_0001;

/// Bit of the flags byte that is wired high.
pub const FIXED_HIGH: u8 = 0b0000_0010;
/// Bits of the flags byte that are wired low.
pub const FIXED_LOW: u8 = 0b0010_1000;

/// Returns true if `value` has an even number of set bits.
#[must_use]
pub const fn parity(value: u8) -> bool {
    value.count_ones() % 2 == 0
}

/// Sign, zero, and parity flags for a result byte.
#[must_use]
pub const fn szp(value: u8) -> u8 {
    let mut flags = 0;
    if value & 0x80 != 0 {
        flags |= SF;
    }
    if value == 0 {
        flags |= ZF;
    }
    if parity(value) {
        flags |= PF;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_counts_set_bits() {
        assert!(parity(0x00));
        assert!(parity(0x03));
        assert!(parity(0xFF));
        assert!(!parity(0x01));
        assert!(!parity(0xFE));
    }

    #[test]
    fn szp_flags_for_boundary_values() {
        assert_eq!(szp(0x00), ZF | PF);
        assert_eq!(szp(0x80), SF);
        assert_eq!(szp(0xFF), SF | PF);
        assert_eq!(szp(0x01), 0);
    }
}
