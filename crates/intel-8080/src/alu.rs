//! 8080 arithmetic logic unit.
//!
//! Pure functions from operands to a result byte plus flags. Subtraction is
//! computed the way the silicon does it, as two's-complement addition, so
//! the carry and auxiliary carry bits fall out of the same carry chain as
//! addition: carry out of bit 7 present means no borrow.

use crate::flags::{AF, CF, szp};

/// Result of an ALU operation: the value and the flags it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluResult {
    pub value: u8,
    pub flags: u8,
}

/// 8-bit addition with optional carry-in. Sets S, Z, A, P, C.
#[must_use]
pub fn add8(a: u8, b: u8, carry: bool) -> AluResult {
    let carry_in = u16::from(carry);
    let sum = u16::from(a) + u16::from(b) + carry_in;
    let value = sum as u8;

    let mut flags = szp(value);
    if sum > 0xFF {
        flags |= CF;
    }
    if u16::from(a & 0x0F) + u16::from(b & 0x0F) + carry_in > 0x0F {
        flags |= AF;
    }
    AluResult { value, flags }
}

/// 8-bit subtraction with optional borrow-in. Sets S, Z, A, P, C.
///
/// Computed as `a + !b + !borrow`; the carry flag is the *absence* of
/// carry out of bit 8, i.e. a borrow occurred. Auxiliary carry is the
/// carry out of bit 3 of the same internal addition.
#[must_use]
pub fn sub8(a: u8, b: u8, borrow: bool) -> AluResult {
    let carry_in = u16::from(!borrow);
    let sum = u16::from(a) + u16::from(!b) + carry_in;
    let value = sum as u8;

    let mut flags = szp(value);
    if sum <= 0xFF {
        flags |= CF;
    }
    if u16::from(a & 0x0F) + u16::from(!b & 0x0F) + carry_in > 0x0F {
        flags |= AF;
    }
    AluResult { value, flags }
}

/// Increment for INR. Sets S, Z, A, P; the caller preserves carry.
#[must_use]
pub fn inr(value: u8) -> AluResult {
    let result = value.wrapping_add(1);
    let mut flags = szp(result);
    if result & 0x0F == 0 {
        flags |= AF;
    }
    AluResult {
        value: result,
        flags,
    }
}

/// Decrement for DCR. Sets S, Z, A, P; the caller preserves carry.
#[must_use]
pub fn dcr(value: u8) -> AluResult {
    let result = value.wrapping_sub(1);
    let mut flags = szp(result);
    if result & 0x0F != 0x0F {
        flags |= AF;
    }
    AluResult {
        value: result,
        flags,
    }
}

/// 16-bit addition for DAD. Returns the sum and the carry out of bit 15.
#[must_use]
pub fn add16(a: u16, b: u16) -> (u16, bool) {
    let sum = u32::from(a) + u32::from(b);
    (sum as u16, sum > 0xFFFF)
}

/// Decimal adjust for DAA.
///
/// Corrects the low nibble first (when it exceeds 9 or auxiliary carry is
/// set), then the high nibble of the corrected value (when it exceeds 9 or
/// carry is set). Carry is sticky: once set it survives the adjustment.
#[must_use]
pub fn daa(a: u8, aux: bool, carry: bool) -> AluResult {
    let mut value = a;
    let mut aux_out = aux;
    let mut carry_out = carry;

    let low = value & 0x0F;
    if low > 9 || aux {
        aux_out = low + 6 > 0x0F;
        value = value.wrapping_add(6);
    }

    let high = value >> 4;
    if high > 9 || carry {
        if high + 6 > 0x0F {
            carry_out = true;
        }
        value = value.wrapping_add(0x60);
    }

    let mut flags = szp(value);
    if aux_out {
        flags |= AF;
    }
    if carry_out {
        flags |= CF;
    }
    AluResult { value, flags }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{PF, SF, ZF};

    fn check_szp(flags: u8, value: u8) {
        assert_eq!(flags & SF != 0, value & 0x80 != 0, "S for {value:#04X}");
        assert_eq!(flags & ZF != 0, value == 0, "Z for {value:#04X}");
        assert_eq!(
            flags & PF != 0,
            value.count_ones() % 2 == 0,
            "P for {value:#04X}"
        );
    }

    #[test]
    fn add8_all_operands_all_carries() {
        for a in 0..=0xFFu8 {
            for b in 0..=0xFFu8 {
                for carry in [false, true] {
                    let r = add8(a, b, carry);
                    let wide = u16::from(a) + u16::from(b) + u16::from(carry);
                    assert_eq!(r.value, wide as u8);
                    check_szp(r.flags, r.value);
                    assert_eq!(r.flags & CF != 0, wide > 0xFF, "C for {a:#04X}+{b:#04X}");
                    // Carry into bit 4 falls out of the xor of the carry chain.
                    assert_eq!(
                        r.flags & AF != 0,
                        (a ^ b ^ r.value) & 0x10 != 0,
                        "A for {a:#04X}+{b:#04X}"
                    );
                }
            }
        }
    }

    #[test]
    fn sub8_all_operands_all_borrows() {
        for a in 0..=0xFFu8 {
            for b in 0..=0xFFu8 {
                for borrow in [false, true] {
                    let r = sub8(a, b, borrow);
                    assert_eq!(r.value, a.wrapping_sub(b).wrapping_sub(u8::from(borrow)));
                    check_szp(r.flags, r.value);
                    assert_eq!(
                        r.flags & CF != 0,
                        u16::from(a) < u16::from(b) + u16::from(borrow),
                        "C for {a:#04X}-{b:#04X}"
                    );
                    // Internal carry out of bit 3 means the low nibble did
                    // not borrow, so auxiliary carry is set.
                    assert_eq!(
                        r.flags & AF != 0,
                        (a ^ b ^ r.value) & 0x10 == 0,
                        "A for {a:#04X}-{b:#04X}"
                    );
                }
            }
        }
    }

    #[test]
    fn inr_full_sweep() {
        for value in 0..=0xFFu8 {
            let r = inr(value);
            assert_eq!(r.value, value.wrapping_add(1));
            check_szp(r.flags, r.value);
            assert_eq!(r.flags & AF != 0, value & 0x0F == 0x0F);
            assert_eq!(r.flags & CF, 0);
        }
    }

    #[test]
    fn dcr_full_sweep() {
        for value in 0..=0xFFu8 {
            let r = dcr(value);
            assert_eq!(r.value, value.wrapping_sub(1));
            check_szp(r.flags, r.value);
            assert_eq!(r.flags & AF != 0, value & 0x0F != 0);
            assert_eq!(r.flags & CF, 0);
        }
    }

    #[test]
    fn add16_carry_out_of_bit_15() {
        assert_eq!(add16(0x1234, 0x1111), (0x2345, false));
        assert_eq!(add16(0xFFFF, 0x0001), (0x0000, true));
        assert_eq!(add16(0x8000, 0x8000), (0x0000, true));
    }

    #[test]
    fn daa_adjusts_bcd_sums() {
        // 0x15 + 0x27 = 0x3C, adjusts to BCD 42.
        let sum = add8(0x15, 0x27, false);
        let r = daa(sum.value, sum.flags & AF != 0, sum.flags & CF != 0);
        assert_eq!(r.value, 0x42);
        assert_eq!(r.flags & CF, 0);

        // 0x99 + 0x01 = 0x9A, adjusts to BCD 00 with carry.
        let sum = add8(0x99, 0x01, false);
        let r = daa(sum.value, sum.flags & AF != 0, sum.flags & CF != 0);
        assert_eq!(r.value, 0x00);
        assert_ne!(r.flags & CF, 0);
        assert_ne!(r.flags & ZF, 0);
    }

    #[test]
    fn daa_low_nibble_correction_uses_aux_carry() {
        // 0x08 + 0x09 = 0x11 with auxiliary carry; DAA must still correct.
        let sum = add8(0x08, 0x09, false);
        assert_ne!(sum.flags & AF, 0);
        let r = daa(sum.value, sum.flags & AF != 0, sum.flags & CF != 0);
        assert_eq!(r.value, 0x17);
    }
}
