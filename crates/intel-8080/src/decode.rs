//! 8080 opcode decode table.
//!
//! Decoding is a pure function from a program counter to an [`Instruction`]
//! descriptor: it reads the opcode byte and any trailing immediate bytes
//! and never mutates CPU state. The table is total over all 256 opcode
//! values; the undocumented encodings alias the way the hardware decodes
//! them (0x08/0x10/... are NOP, 0xCB is JMP, 0xD9 is RET, 0xDD/0xED/0xFD
//! are CALL).

use emu_core::Bus;

use crate::flags::{CF, PF, SF, ZF};

/// 8-bit operand selector: a working register, or the byte addressed by HL.
///
/// `M` is the memory pseudo-register; the executor resolves it to a bus
/// read or write through HL at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand8 {
    B,
    C,
    D,
    E,
    H,
    L,
    M,
    A,
}

impl Operand8 {
    /// Decode a 3-bit register field (110 selects memory through HL).
    #[must_use]
    pub const fn from_code(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Operand8::B,
            1 => Operand8::C,
            2 => Operand8::D,
            3 => Operand8::E,
            4 => Operand8::H,
            5 => Operand8::L,
            6 => Operand8::M,
            _ => Operand8::A,
        }
    }
}

/// 16-bit register pair selector.
///
/// `Psw` appears only in PUSH/POP encodings, where it replaces `Sp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegPair {
    Bc,
    De,
    Hl,
    Sp,
    Psw,
}

impl RegPair {
    /// Decode the 2-bit pair field of LXI/INX/DCX/DAD/LDAX/STAX.
    #[must_use]
    pub const fn from_code(bits: u8) -> Self {
        match bits & 0x03 {
            0 => RegPair::Bc,
            1 => RegPair::De,
            2 => RegPair::Hl,
            _ => RegPair::Sp,
        }
    }

    /// Decode the 2-bit pair field of PUSH/POP, where 11 means PSW.
    #[must_use]
    pub const fn from_stack_code(bits: u8) -> Self {
        match bits & 0x03 {
            0 => RegPair::Bc,
            1 => RegPair::De,
            2 => RegPair::Hl,
            _ => RegPair::Psw,
        }
    }
}

/// Branch condition, tested against the flags byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
    ParityOdd,
    ParityEven,
    Plus,
    Minus,
}

impl Condition {
    /// Decode the 3-bit condition field of Jcc/Ccc/Rcc.
    #[must_use]
    pub const fn from_code(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Condition::NotZero,
            1 => Condition::Zero,
            2 => Condition::NoCarry,
            3 => Condition::Carry,
            4 => Condition::ParityOdd,
            5 => Condition::ParityEven,
            6 => Condition::Plus,
            _ => Condition::Minus,
        }
    }

    /// Returns true if the condition holds for the given flags byte.
    #[must_use]
    pub const fn holds(self, flags: u8) -> bool {
        match self {
            Condition::NotZero => flags & ZF == 0,
            Condition::Zero => flags & ZF != 0,
            Condition::NoCarry => flags & CF == 0,
            Condition::Carry => flags & CF != 0,
            Condition::ParityOdd => flags & PF == 0,
            Condition::ParityEven => flags & PF != 0,
            Condition::Plus => flags & SF == 0,
            Condition::Minus => flags & SF != 0,
        }
    }
}

/// What an instruction does, independent of its operands.
///
/// Conditional control flow carries `Some(condition)`; the unconditional
/// forms carry `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Nop,
    Halt,
    /// MOV between registers or memory through HL.
    Move,
    /// MVI: immediate byte into register or memory.
    MoveImmediate,
    /// LXI: immediate word into a register pair.
    LoadPairImmediate,
    /// LDAX: accumulator from the address in BC or DE.
    LoadAccum,
    /// STAX: accumulator to the address in BC or DE.
    StoreAccum,
    /// LDA: accumulator from a direct address.
    LoadAccumDirect,
    /// STA: accumulator to a direct address.
    StoreAccumDirect,
    /// LHLD: HL from a direct address.
    LoadHlDirect,
    /// SHLD: HL to a direct address.
    StoreHlDirect,
    /// XCHG: swap DE and HL.
    ExchangeRegs,
    /// XTHL: swap HL with the word at the top of the stack.
    ExchangeStack,
    /// SPHL.
    LoadSpFromHl,
    /// PCHL.
    LoadPcFromHl,
    Add { with_carry: bool },
    Sub { with_borrow: bool },
    And,
    Xor,
    Or,
    /// CMP/CPI: subtraction for flags only.
    Compare,
    IncrementReg,
    DecrementReg,
    IncrementPair,
    DecrementPair,
    /// DAD: 16-bit add into HL.
    DoubleAdd,
    /// RLC.
    RotateLeft,
    /// RRC.
    RotateRight,
    /// RAL.
    RotateLeftThroughCarry,
    /// RAR.
    RotateRightThroughCarry,
    /// DAA.
    DecimalAdjust,
    /// CMA.
    ComplementAccum,
    /// STC.
    SetCarry,
    /// CMC.
    ComplementCarry,
    Push,
    Pop,
    Jump(Option<Condition>),
    Call(Option<Condition>),
    Return(Option<Condition>),
    /// RST n: one-byte call to `n * 8`.
    Restart(u8),
    EnableInterrupts,
    DisableInterrupts,
    /// IN: port to accumulator.
    Input,
    /// OUT: accumulator to port.
    Output,
}

/// Decoded operand payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    None,
    Imm8(u8),
    Imm16(u16),
    Reg(Operand8),
    Pair(RegPair),
    RegImm8(Operand8, u8),
    PairImm16(RegPair, u16),
    Move { dst: Operand8, src: Operand8 },
}

/// One decoded instruction.
///
/// `cycles` is the base cost; taken conditional CALL/RET add 6 at
/// execution time. `len` includes the opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub address: u16,
    pub opcode: u8,
    pub mnemonic: &'static str,
    pub kind: Kind,
    pub len: u8,
    pub cycles: u32,
    pub operand: Operand,
}

const RETURN_MNEMONICS: [&str; 8] = ["RNZ", "RZ", "RNC", "RC", "RPO", "RPE", "RP", "RM"];
const JUMP_MNEMONICS: [&str; 8] = ["JNZ", "JZ", "JNC", "JC", "JPO", "JPE", "JP", "JM"];
const CALL_MNEMONICS: [&str; 8] = ["CNZ", "CZ", "CNC", "CC", "CPO", "CPE", "CP", "CM"];

/// Decode the instruction at `pc`.
#[allow(clippy::too_many_lines)]
pub fn decode<B: Bus>(bus: &mut B, pc: u16) -> Instruction {
    let opcode = bus.read(pc);
    let field = (opcode >> 3) & 0x07;
    let pair = (opcode >> 4) & 0x03;

    let (mnemonic, kind, len, cycles): (&'static str, Kind, u8, u32) = match opcode {
        0x00 | 0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => ("NOP", Kind::Nop, 1, 4),
        0x01 | 0x11 | 0x21 | 0x31 => ("LXI", Kind::LoadPairImmediate, 3, 10),
        0x02 | 0x12 => ("STAX", Kind::StoreAccum, 1, 7),
        0x0A | 0x1A => ("LDAX", Kind::LoadAccum, 1, 7),
        0x03 | 0x13 | 0x23 | 0x33 => ("INX", Kind::IncrementPair, 1, 5),
        0x0B | 0x1B | 0x2B | 0x3B => ("DCX", Kind::DecrementPair, 1, 5),
        0x09 | 0x19 | 0x29 | 0x39 => ("DAD", Kind::DoubleAdd, 1, 10),
        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x3C => ("INR", Kind::IncrementReg, 1, 5),
        0x34 => ("INR", Kind::IncrementReg, 1, 10),
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x3D => ("DCR", Kind::DecrementReg, 1, 5),
        0x35 => ("DCR", Kind::DecrementReg, 1, 10),
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x3E => ("MVI", Kind::MoveImmediate, 2, 7),
        0x36 => ("MVI", Kind::MoveImmediate, 2, 10),
        0x07 => ("RLC", Kind::RotateLeft, 1, 4),
        0x0F => ("RRC", Kind::RotateRight, 1, 4),
        0x17 => ("RAL", Kind::RotateLeftThroughCarry, 1, 4),
        0x1F => ("RAR", Kind::RotateRightThroughCarry, 1, 4),
        0x22 => ("SHLD", Kind::StoreHlDirect, 3, 16),
        0x2A => ("LHLD", Kind::LoadHlDirect, 3, 16),
        0x27 => ("DAA", Kind::DecimalAdjust, 1, 4),
        0x2F => ("CMA", Kind::ComplementAccum, 1, 4),
        0x32 => ("STA", Kind::StoreAccumDirect, 3, 13),
        0x3A => ("LDA", Kind::LoadAccumDirect, 3, 13),
        0x37 => ("STC", Kind::SetCarry, 1, 4),
        0x3F => ("CMC", Kind::ComplementCarry, 1, 4),
        0x76 => ("HLT", Kind::Halt, 1, 7),
        0x40..=0x7F => {
            let cycles = if opcode & 0x07 == 6 || field == 6 { 7 } else { 5 };
            ("MOV", Kind::Move, 1, cycles)
        }
        0x80..=0xBF => {
            let cycles = if opcode & 0x07 == 6 { 7 } else { 4 };
            let (mnemonic, kind) = match field {
                0 => ("ADD", Kind::Add { with_carry: false }),
                1 => ("ADC", Kind::Add { with_carry: true }),
                2 => ("SUB", Kind::Sub { with_borrow: false }),
                3 => ("SBB", Kind::Sub { with_borrow: true }),
                4 => ("ANA", Kind::And),
                5 => ("XRA", Kind::Xor),
                6 => ("ORA", Kind::Or),
                _ => ("CMP", Kind::Compare),
            };
            (mnemonic, kind, 1, cycles)
        }
        0xC0 | 0xC8 | 0xD0 | 0xD8 | 0xE0 | 0xE8 | 0xF0 | 0xF8 => {
            let condition = Condition::from_code(field);
            (
                RETURN_MNEMONICS[field as usize],
                Kind::Return(Some(condition)),
                1,
                5,
            )
        }
        0xC2 | 0xCA | 0xD2 | 0xDA | 0xE2 | 0xEA | 0xF2 | 0xFA => {
            let condition = Condition::from_code(field);
            (
                JUMP_MNEMONICS[field as usize],
                Kind::Jump(Some(condition)),
                3,
                10,
            )
        }
        0xC4 | 0xCC | 0xD4 | 0xDC | 0xE4 | 0xEC | 0xF4 | 0xFC => {
            let condition = Condition::from_code(field);
            (
                CALL_MNEMONICS[field as usize],
                Kind::Call(Some(condition)),
                3,
                11,
            )
        }
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => {
            ("RST", Kind::Restart(field), 1, 11)
        }
        0xC1 | 0xD1 | 0xE1 | 0xF1 => ("POP", Kind::Pop, 1, 10),
        0xC5 | 0xD5 | 0xE5 | 0xF5 => ("PUSH", Kind::Push, 1, 11),
        0xC3 | 0xCB => ("JMP", Kind::Jump(None), 3, 10),
        0xC9 | 0xD9 => ("RET", Kind::Return(None), 1, 10),
        0xCD | 0xDD | 0xED | 0xFD => ("CALL", Kind::Call(None), 3, 17),
        0xC6 => ("ADI", Kind::Add { with_carry: false }, 2, 7),
        0xCE => ("ACI", Kind::Add { with_carry: true }, 2, 7),
        0xD6 => ("SUI", Kind::Sub { with_borrow: false }, 2, 7),
        0xDE => ("SBI", Kind::Sub { with_borrow: true }, 2, 7),
        0xE6 => ("ANI", Kind::And, 2, 7),
        0xEE => ("XRI", Kind::Xor, 2, 7),
        0xF6 => ("ORI", Kind::Or, 2, 7),
        0xFE => ("CPI", Kind::Compare, 2, 7),
        0xD3 => ("OUT", Kind::Output, 2, 10),
        0xDB => ("IN", Kind::Input, 2, 10),
        0xE3 => ("XTHL", Kind::ExchangeStack, 1, 18),
        0xE9 => ("PCHL", Kind::LoadPcFromHl, 1, 5),
        0xEB => ("XCHG", Kind::ExchangeRegs, 1, 5),
        0xF9 => ("SPHL", Kind::LoadSpFromHl, 1, 5),
        0xF3 => ("DI", Kind::DisableInterrupts, 1, 4),
        0xFB => ("EI", Kind::EnableInterrupts, 1, 4),
    };

    let operand = match kind {
        Kind::Move => Operand::Move {
            dst: Operand8::from_code(field),
            src: Operand8::from_code(opcode),
        },
        Kind::MoveImmediate => Operand::RegImm8(Operand8::from_code(field), imm8(bus, pc)),
        Kind::IncrementReg | Kind::DecrementReg => Operand::Reg(Operand8::from_code(field)),
        Kind::Add { .. } | Kind::Sub { .. } | Kind::And | Kind::Xor | Kind::Or | Kind::Compare => {
            if len == 2 {
                Operand::Imm8(imm8(bus, pc))
            } else {
                Operand::Reg(Operand8::from_code(opcode))
            }
        }
        Kind::LoadPairImmediate => Operand::PairImm16(RegPair::from_code(pair), imm16(bus, pc)),
        Kind::LoadAccum
        | Kind::StoreAccum
        | Kind::IncrementPair
        | Kind::DecrementPair
        | Kind::DoubleAdd => Operand::Pair(RegPair::from_code(pair)),
        Kind::Push | Kind::Pop => Operand::Pair(RegPair::from_stack_code(pair)),
        Kind::LoadAccumDirect
        | Kind::StoreAccumDirect
        | Kind::LoadHlDirect
        | Kind::StoreHlDirect
        | Kind::Jump(_)
        | Kind::Call(_) => Operand::Imm16(imm16(bus, pc)),
        Kind::Input | Kind::Output => Operand::Imm8(imm8(bus, pc)),
        _ => Operand::None,
    };

    Instruction {
        address: pc,
        opcode,
        mnemonic,
        kind,
        len,
        cycles,
        operand,
    }
}

fn imm8<B: Bus>(bus: &mut B, pc: u16) -> u8 {
    bus.read(pc.wrapping_add(1))
}

/// Immediate words are stored little-endian: low byte first.
fn imm16<B: Bus>(bus: &mut B, pc: u16) -> u16 {
    let low = bus.read(pc.wrapping_add(1));
    let high = bus.read(pc.wrapping_add(2));
    u16::from(low) | u16::from(high) << 8
}
