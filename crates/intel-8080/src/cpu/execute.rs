//! Instruction execution.
//!
//! One exhaustive dispatch over the decoded kind and operand. The program
//! counter advances by the instruction length before the handler runs, so
//! branch handlers simply overwrite it and CALL-family handlers push the
//! already-correct return address.

use emu_core::Bus;

use super::Intel8080;
use crate::alu;
use crate::decode::{Condition, Instruction, Kind, Operand, Operand8, RegPair};
use crate::flags::{AF, CF, szp};

/// Extra cycles when a conditional CALL or RET is taken.
const BRANCH_TAKEN_CYCLES: u32 = 6;

impl Intel8080 {
    /// Execute a decoded instruction, returning the cycles consumed.
    pub fn execute<B: Bus>(&mut self, bus: &mut B, instr: &Instruction) -> u32 {
        self.regs.pc = self.regs.pc.wrapping_add(u16::from(instr.len));
        let mut cycles = instr.cycles;

        match (instr.kind, instr.operand) {
            (Kind::Nop, _) => {}
            (Kind::Halt, _) => self.regs.halted = true,

            (Kind::Move, Operand::Move { dst, src }) => {
                let value = self.read_operand8(bus, src);
                self.write_operand8(bus, dst, value);
            }
            (Kind::MoveImmediate, Operand::RegImm8(dst, value)) => {
                self.write_operand8(bus, dst, value);
            }
            (Kind::LoadPairImmediate, Operand::PairImm16(pair, value)) => {
                self.set_pair(pair, value);
            }

            (Kind::LoadAccum, Operand::Pair(pair)) => {
                self.regs.a = bus.read(self.pair_value(pair));
            }
            (Kind::StoreAccum, Operand::Pair(pair)) => {
                bus.write(self.pair_value(pair), self.regs.a);
            }
            (Kind::LoadAccumDirect, Operand::Imm16(address)) => {
                self.regs.a = bus.read(address);
            }
            (Kind::StoreAccumDirect, Operand::Imm16(address)) => {
                bus.write(address, self.regs.a);
            }
            (Kind::LoadHlDirect, Operand::Imm16(address)) => {
                self.regs.l = bus.read(address);
                self.regs.h = bus.read(address.wrapping_add(1));
            }
            (Kind::StoreHlDirect, Operand::Imm16(address)) => {
                bus.write(address, self.regs.l);
                bus.write(address.wrapping_add(1), self.regs.h);
            }

            (Kind::ExchangeRegs, _) => {
                let de = self.regs.de();
                let hl = self.regs.hl();
                self.regs.set_de(hl);
                self.regs.set_hl(de);
            }
            (Kind::ExchangeStack, _) => {
                let sp = self.regs.sp;
                let low = bus.read(sp);
                let high = bus.read(sp.wrapping_add(1));
                bus.write(sp, self.regs.l);
                bus.write(sp.wrapping_add(1), self.regs.h);
                self.regs.l = low;
                self.regs.h = high;
            }
            (Kind::LoadSpFromHl, _) => self.regs.sp = self.regs.hl(),
            (Kind::LoadPcFromHl, _) => self.regs.pc = self.regs.hl(),

            (Kind::Add { with_carry }, operand) => {
                let value = self.alu_operand(bus, operand);
                let carry = with_carry && self.regs.flag(CF);
                let result = alu::add8(self.regs.a, value, carry);
                self.regs.a = result.value;
                self.regs.set_f(result.flags);
            }
            (Kind::Sub { with_borrow }, operand) => {
                let value = self.alu_operand(bus, operand);
                let borrow = with_borrow && self.regs.flag(CF);
                let result = alu::sub8(self.regs.a, value, borrow);
                self.regs.a = result.value;
                self.regs.set_f(result.flags);
            }
            (Kind::Compare, operand) => {
                let value = self.alu_operand(bus, operand);
                let result = alu::sub8(self.regs.a, value, false);
                self.regs.set_f(result.flags);
            }
            // Logic ops clear carry, derive S/Z/P, and leave aux alone.
            (Kind::And, operand) => {
                let value = self.alu_operand(bus, operand);
                self.regs.a &= value;
                self.regs.set_f(self.regs.f & AF | szp(self.regs.a));
            }
            (Kind::Xor, operand) => {
                let value = self.alu_operand(bus, operand);
                self.regs.a ^= value;
                self.regs.set_f(self.regs.f & AF | szp(self.regs.a));
            }
            (Kind::Or, operand) => {
                let value = self.alu_operand(bus, operand);
                self.regs.a |= value;
                self.regs.set_f(self.regs.f & AF | szp(self.regs.a));
            }

            (Kind::IncrementReg, Operand::Reg(reg)) => {
                let result = alu::inr(self.read_operand8(bus, reg));
                self.write_operand8(bus, reg, result.value);
                self.regs.set_f(self.regs.f & CF | result.flags);
            }
            (Kind::DecrementReg, Operand::Reg(reg)) => {
                let result = alu::dcr(self.read_operand8(bus, reg));
                self.write_operand8(bus, reg, result.value);
                self.regs.set_f(self.regs.f & CF | result.flags);
            }
            (Kind::IncrementPair, Operand::Pair(pair)) => {
                self.set_pair(pair, self.pair_value(pair).wrapping_add(1));
            }
            (Kind::DecrementPair, Operand::Pair(pair)) => {
                self.set_pair(pair, self.pair_value(pair).wrapping_sub(1));
            }
            (Kind::DoubleAdd, Operand::Pair(pair)) => {
                let (sum, carry) = alu::add16(self.regs.hl(), self.pair_value(pair));
                self.regs.set_hl(sum);
                self.regs.set_f(self.regs.f & !CF | u8::from(carry));
            }

            (Kind::RotateLeft, _) => {
                let carry = self.regs.a >> 7;
                self.regs.a = self.regs.a << 1 | carry;
                self.regs.set_f(self.regs.f & !CF | carry);
            }
            (Kind::RotateRight, _) => {
                let carry = self.regs.a & 1;
                self.regs.a = self.regs.a >> 1 | carry << 7;
                self.regs.set_f(self.regs.f & !CF | carry);
            }
            (Kind::RotateLeftThroughCarry, _) => {
                let carry = self.regs.a >> 7;
                self.regs.a = self.regs.a << 1 | u8::from(self.regs.flag(CF));
                self.regs.set_f(self.regs.f & !CF | carry);
            }
            (Kind::RotateRightThroughCarry, _) => {
                let carry = self.regs.a & 1;
                self.regs.a = self.regs.a >> 1 | u8::from(self.regs.flag(CF)) << 7;
                self.regs.set_f(self.regs.f & !CF | carry);
            }

            (Kind::DecimalAdjust, _) => {
                let result = alu::daa(self.regs.a, self.regs.flag(AF), self.regs.flag(CF));
                self.regs.a = result.value;
                self.regs.set_f(result.flags);
            }
            (Kind::ComplementAccum, _) => self.regs.a = !self.regs.a,
            (Kind::SetCarry, _) => self.regs.set_f(self.regs.f | CF),
            (Kind::ComplementCarry, _) => self.regs.set_f(self.regs.f ^ CF),

            (Kind::Push, Operand::Pair(pair)) => {
                let value = self.pair_value(pair);
                self.push16(bus, value);
            }
            (Kind::Pop, Operand::Pair(pair)) => {
                let value = self.pop16(bus);
                self.set_pair(pair, value);
            }

            (Kind::Jump(condition), Operand::Imm16(target)) => {
                if self.taken(condition) {
                    self.regs.pc = target;
                }
            }
            (Kind::Call(condition), Operand::Imm16(target)) => {
                if self.taken(condition) {
                    if condition.is_some() {
                        cycles += BRANCH_TAKEN_CYCLES;
                    }
                    let return_address = self.regs.pc;
                    self.push16(bus, return_address);
                    self.regs.pc = target;
                }
            }
            (Kind::Return(condition), _) => {
                if self.taken(condition) {
                    if condition.is_some() {
                        cycles += BRANCH_TAKEN_CYCLES;
                    }
                    self.regs.pc = self.pop16(bus);
                }
            }
            (Kind::Restart(vector), _) => {
                let return_address = self.regs.pc;
                self.push16(bus, return_address);
                self.regs.pc = u16::from(vector) * 8;
            }

            (Kind::EnableInterrupts, _) => self.regs.inte = true,
            (Kind::DisableInterrupts, _) => self.regs.inte = false,

            (Kind::Input, Operand::Imm8(port)) => {
                self.regs.a = self.ports.input[port as usize];
            }
            (Kind::Output, Operand::Imm8(port)) => {
                self.ports.output[port as usize] = self.regs.a;
            }

            (kind, operand) => {
                panic!("decoder produced {kind:?} with mismatched operand {operand:?}")
            }
        }

        cycles
    }

    fn taken(&self, condition: Option<Condition>) -> bool {
        condition.is_none_or(|c| c.holds(self.regs.f))
    }

    /// Resolve an ALU source: a register, memory through HL, or an
    /// immediate byte.
    fn alu_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand) -> u8 {
        match operand {
            Operand::Reg(reg) => self.read_operand8(bus, reg),
            Operand::Imm8(value) => value,
            _ => panic!("decoder produced non-byte ALU operand {operand:?}"),
        }
    }

    fn read_operand8<B: Bus>(&mut self, bus: &mut B, operand: Operand8) -> u8 {
        match operand {
            Operand8::B => self.regs.b,
            Operand8::C => self.regs.c,
            Operand8::D => self.regs.d,
            Operand8::E => self.regs.e,
            Operand8::H => self.regs.h,
            Operand8::L => self.regs.l,
            Operand8::M => bus.read(self.regs.hl()),
            Operand8::A => self.regs.a,
        }
    }

    fn write_operand8<B: Bus>(&mut self, bus: &mut B, operand: Operand8, value: u8) {
        match operand {
            Operand8::B => self.regs.b = value,
            Operand8::C => self.regs.c = value,
            Operand8::D => self.regs.d = value,
            Operand8::E => self.regs.e = value,
            Operand8::H => self.regs.h = value,
            Operand8::L => self.regs.l = value,
            Operand8::M => bus.write(self.regs.hl(), value),
            Operand8::A => self.regs.a = value,
        }
    }

    fn pair_value(&self, pair: RegPair) -> u16 {
        match pair {
            RegPair::Bc => self.regs.bc(),
            RegPair::De => self.regs.de(),
            RegPair::Hl => self.regs.hl(),
            RegPair::Sp => self.regs.sp,
            RegPair::Psw => self.regs.psw(),
        }
    }

    fn set_pair(&mut self, pair: RegPair, value: u16) {
        match pair {
            RegPair::Bc => self.regs.set_bc(value),
            RegPair::De => self.regs.set_de(value),
            RegPair::Hl => self.regs.set_hl(value),
            RegPair::Sp => self.regs.sp = value,
            RegPair::Psw => self.regs.set_psw(value),
        }
    }
}
