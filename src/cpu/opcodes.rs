use core::fmt;

use hashbrown::HashMap;
use lazy_static::lazy_static;

use super::instructions::*;
use super::{AddressingMode, Cpu, CpuError};

pub type Execute = fn(&mut Cpu, AddressingMode) -> Result<(), CpuError>;

pub struct OpCode {
    pub code: u8,
    pub mnemonic: &'static str,
    pub len: u8,
    /// Reference timing only, the stepper does not consume it.
    pub cycles: u8,
    pub mode: AddressingMode,
    pub execute: Execute,
}

impl OpCode {
    const fn new(
        code: u8,
        mnemonic: &'static str,
        len: u8,
        cycles: u8,
        mode: AddressingMode,
        execute: Execute,
    ) -> Self {
        OpCode {
            code,
            mnemonic,
            len,
            cycles,
            mode,
            execute,
        }
    }
}

impl fmt::Debug for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ 0x{:02x} {} len:{} cycles:{} mode:{:?} }}",
            self.code, self.mnemonic, self.len, self.cycles, self.mode
        )
    }
}

macro_rules! OP {
    ($code: expr, $mnemonic: expr, $len: expr, $cycles: expr, $mode: ident, $execute: expr) => {
        OpCode::new($code, $mnemonic, $len, $cycles, AddressingMode::$mode, $execute)
    };
}

lazy_static! {
    pub static ref CPU_OPS_CODES: Vec<OpCode> = vec![
        OP!(0x00, "BRK", 1, 7, NoneAddressing, brk),
        OP!(0xEA, "NOP", 1, 2, NoneAddressing, nop),

        /* Arithmetic */
        OP!(0x69, "ADC", 2, 2, Immediate, adc),
        OP!(0x65, "ADC", 2, 3, ZeroPage, adc),
        OP!(0x75, "ADC", 2, 4, ZeroPageX, adc),
        OP!(0x6D, "ADC", 3, 4, Absolute, adc),
        OP!(0x7D, "ADC", 3, 4 /*+1 if page crossed*/, AbsoluteX, adc),
        OP!(0x79, "ADC", 3, 4 /*+1 if page crossed*/, AbsoluteY, adc),
        OP!(0x61, "ADC", 2, 6, IndirectX, adc),
        OP!(0x71, "ADC", 2, 5 /*+1 if page crossed*/, IndirectY, adc),

        OP!(0xE9, "SBC", 2, 2, Immediate, sbc),
        OP!(0xE5, "SBC", 2, 3, ZeroPage, sbc),
        OP!(0xF5, "SBC", 2, 4, ZeroPageX, sbc),
        OP!(0xED, "SBC", 3, 4, Absolute, sbc),
        OP!(0xFD, "SBC", 3, 4 /*+1 if page crossed*/, AbsoluteX, sbc),
        OP!(0xF9, "SBC", 3, 4 /*+1 if page crossed*/, AbsoluteY, sbc),
        OP!(0xE1, "SBC", 2, 6, IndirectX, sbc),
        OP!(0xF1, "SBC", 2, 5 /*+1 if page crossed*/, IndirectY, sbc),

        OP!(0x29, "AND", 2, 2, Immediate, and),
        OP!(0x25, "AND", 2, 3, ZeroPage, and),
        OP!(0x35, "AND", 2, 4, ZeroPageX, and),
        OP!(0x2D, "AND", 3, 4, Absolute, and),
        OP!(0x3D, "AND", 3, 4 /*+1 if page crossed*/, AbsoluteX, and),
        OP!(0x39, "AND", 3, 4 /*+1 if page crossed*/, AbsoluteY, and),
        OP!(0x21, "AND", 2, 6, IndirectX, and),
        OP!(0x31, "AND", 2, 5 /*+1 if page crossed*/, IndirectY, and),

        OP!(0x49, "EOR", 2, 2, Immediate, eor),
        OP!(0x45, "EOR", 2, 3, ZeroPage, eor),
        OP!(0x55, "EOR", 2, 4, ZeroPageX, eor),
        OP!(0x4D, "EOR", 3, 4, Absolute, eor),
        OP!(0x5D, "EOR", 3, 4 /*+1 if page crossed*/, AbsoluteX, eor),
        OP!(0x59, "EOR", 3, 4 /*+1 if page crossed*/, AbsoluteY, eor),
        OP!(0x41, "EOR", 2, 6, IndirectX, eor),
        OP!(0x51, "EOR", 2, 5 /*+1 if page crossed*/, IndirectY, eor),

        OP!(0x09, "ORA", 2, 2, Immediate, ora),
        OP!(0x05, "ORA", 2, 3, ZeroPage, ora),
        OP!(0x15, "ORA", 2, 4, ZeroPageX, ora),
        OP!(0x0D, "ORA", 3, 4, Absolute, ora),
        OP!(0x1D, "ORA", 3, 4 /*+1 if page crossed*/, AbsoluteX, ora),
        OP!(0x19, "ORA", 3, 4 /*+1 if page crossed*/, AbsoluteY, ora),
        OP!(0x01, "ORA", 2, 6, IndirectX, ora),
        OP!(0x11, "ORA", 2, 5 /*+1 if page crossed*/, IndirectY, ora),

        /* Shifts */
        OP!(0x0A, "ASL", 1, 2, NoneAddressing, asl_accumulator),
        OP!(0x06, "ASL", 2, 5, ZeroPage, asl),
        OP!(0x16, "ASL", 2, 6, ZeroPageX, asl),
        OP!(0x0E, "ASL", 3, 6, Absolute, asl),
        OP!(0x1E, "ASL", 3, 7, AbsoluteX, asl),

        OP!(0x4A, "LSR", 1, 2, NoneAddressing, lsr_accumulator),
        OP!(0x46, "LSR", 2, 5, ZeroPage, lsr),
        OP!(0x56, "LSR", 2, 6, ZeroPageX, lsr),
        OP!(0x4E, "LSR", 3, 6, Absolute, lsr),
        OP!(0x5E, "LSR", 3, 7, AbsoluteX, lsr),

        OP!(0x2A, "ROL", 1, 2, NoneAddressing, rol_accumulator),
        OP!(0x26, "ROL", 2, 5, ZeroPage, rol),
        OP!(0x36, "ROL", 2, 6, ZeroPageX, rol),
        OP!(0x2E, "ROL", 3, 6, Absolute, rol),
        OP!(0x3E, "ROL", 3, 7, AbsoluteX, rol),

        OP!(0x6A, "ROR", 1, 2, NoneAddressing, ror_accumulator),
        OP!(0x66, "ROR", 2, 5, ZeroPage, ror),
        OP!(0x76, "ROR", 2, 6, ZeroPageX, ror),
        OP!(0x6E, "ROR", 3, 6, Absolute, ror),
        OP!(0x7E, "ROR", 3, 7, AbsoluteX, ror),

        /* Increments, decrements */
        OP!(0xE6, "INC", 2, 5, ZeroPage, inc),
        OP!(0xF6, "INC", 2, 6, ZeroPageX, inc),
        OP!(0xEE, "INC", 3, 6, Absolute, inc),
        OP!(0xFE, "INC", 3, 7, AbsoluteX, inc),
        OP!(0xE8, "INX", 1, 2, NoneAddressing, inx),
        OP!(0xC8, "INY", 1, 2, NoneAddressing, iny),

        OP!(0xC6, "DEC", 2, 5, ZeroPage, dec),
        OP!(0xD6, "DEC", 2, 6, ZeroPageX, dec),
        OP!(0xCE, "DEC", 3, 6, Absolute, dec),
        OP!(0xDE, "DEC", 3, 7, AbsoluteX, dec),
        OP!(0xCA, "DEX", 1, 2, NoneAddressing, dex),
        OP!(0x88, "DEY", 1, 2, NoneAddressing, dey),

        /* Compare */
        OP!(0xC9, "CMP", 2, 2, Immediate, cmp),
        OP!(0xC5, "CMP", 2, 3, ZeroPage, cmp),
        OP!(0xD5, "CMP", 2, 4, ZeroPageX, cmp),
        OP!(0xCD, "CMP", 3, 4, Absolute, cmp),
        OP!(0xDD, "CMP", 3, 4 /*+1 if page crossed*/, AbsoluteX, cmp),
        OP!(0xD9, "CMP", 3, 4 /*+1 if page crossed*/, AbsoluteY, cmp),
        OP!(0xC1, "CMP", 2, 6, IndirectX, cmp),
        OP!(0xD1, "CMP", 2, 5 /*+1 if page crossed*/, IndirectY, cmp),

        OP!(0xC0, "CPY", 2, 2, Immediate, cpy),
        OP!(0xC4, "CPY", 2, 3, ZeroPage, cpy),
        OP!(0xCC, "CPY", 3, 4, Absolute, cpy),

        OP!(0xE0, "CPX", 2, 2, Immediate, cpx),
        OP!(0xE4, "CPX", 2, 3, ZeroPage, cpx),
        OP!(0xEC, "CPX", 3, 4, Absolute, cpx),

        /* Branching */
        OP!(0x4C, "JMP", 3, 3, NoneAddressing, jmp_absolute),
        OP!(0x6C, "JMP", 3, 5, NoneAddressing, jmp_indirect),

        OP!(0x20, "JSR", 3, 6, NoneAddressing, jsr),
        OP!(0x60, "RTS", 1, 6, NoneAddressing, rts),
        OP!(0x40, "RTI", 1, 6, NoneAddressing, rti),

        OP!(0xD0, "BNE", 2, 2 /*+1 if branch succeeds, +2 if to a new page*/, NoneAddressing, bne),
        OP!(0x70, "BVS", 2, 2 /*+1 if branch succeeds, +2 if to a new page*/, NoneAddressing, bvs),
        OP!(0x50, "BVC", 2, 2 /*+1 if branch succeeds, +2 if to a new page*/, NoneAddressing, bvc),
        OP!(0x30, "BMI", 2, 2 /*+1 if branch succeeds, +2 if to a new page*/, NoneAddressing, bmi),
        OP!(0xF0, "BEQ", 2, 2 /*+1 if branch succeeds, +2 if to a new page*/, NoneAddressing, beq),
        OP!(0xB0, "BCS", 2, 2 /*+1 if branch succeeds, +2 if to a new page*/, NoneAddressing, bcs),
        OP!(0x90, "BCC", 2, 2 /*+1 if branch succeeds, +2 if to a new page*/, NoneAddressing, bcc),
        OP!(0x10, "BPL", 2, 2 /*+1 if branch succeeds, +2 if to a new page*/, NoneAddressing, bpl),

        OP!(0x24, "BIT", 2, 3, ZeroPage, bit),
        OP!(0x2C, "BIT", 3, 4, Absolute, bit),

        /* Stores, loads */
        OP!(0xA9, "LDA", 2, 2, Immediate, lda),
        OP!(0xA5, "LDA", 2, 3, ZeroPage, lda),
        OP!(0xB5, "LDA", 2, 4, ZeroPageX, lda),
        OP!(0xAD, "LDA", 3, 4, Absolute, lda),
        OP!(0xBD, "LDA", 3, 4 /*+1 if page crossed*/, AbsoluteX, lda),
        OP!(0xB9, "LDA", 3, 4 /*+1 if page crossed*/, AbsoluteY, lda),
        OP!(0xA1, "LDA", 2, 6, IndirectX, lda),
        OP!(0xB1, "LDA", 2, 5 /*+1 if page crossed*/, IndirectY, lda),

        OP!(0xA2, "LDX", 2, 2, Immediate, ldx),
        OP!(0xA6, "LDX", 2, 3, ZeroPage, ldx),
        OP!(0xB6, "LDX", 2, 4, ZeroPageY, ldx),
        OP!(0xAE, "LDX", 3, 4, Absolute, ldx),
        OP!(0xBE, "LDX", 3, 4 /*+1 if page crossed*/, AbsoluteY, ldx),

        OP!(0xA0, "LDY", 2, 2, Immediate, ldy),
        OP!(0xA4, "LDY", 2, 3, ZeroPage, ldy),
        OP!(0xB4, "LDY", 2, 4, ZeroPageX, ldy),
        OP!(0xAC, "LDY", 3, 4, Absolute, ldy),
        OP!(0xBC, "LDY", 3, 4 /*+1 if page crossed*/, AbsoluteX, ldy),

        OP!(0x85, "STA", 2, 3, ZeroPage, sta),
        OP!(0x95, "STA", 2, 4, ZeroPageX, sta),
        OP!(0x8D, "STA", 3, 4, Absolute, sta),
        OP!(0x9D, "STA", 3, 5, AbsoluteX, sta),
        OP!(0x99, "STA", 3, 5, AbsoluteY, sta),
        OP!(0x81, "STA", 2, 6, IndirectX, sta),
        OP!(0x91, "STA", 2, 6, IndirectY, sta),

        OP!(0x86, "STX", 2, 3, ZeroPage, stx),
        OP!(0x96, "STX", 2, 4, ZeroPageY, stx),
        OP!(0x8E, "STX", 3, 4, Absolute, stx),

        OP!(0x84, "STY", 2, 3, ZeroPage, sty),
        OP!(0x94, "STY", 2, 4, ZeroPageX, sty),
        OP!(0x8C, "STY", 3, 4, Absolute, sty),

        /* Flags clear */
        OP!(0xD8, "CLD", 1, 2, NoneAddressing, cld),
        OP!(0x58, "CLI", 1, 2, NoneAddressing, cli),
        OP!(0xB8, "CLV", 1, 2, NoneAddressing, clv),
        OP!(0x18, "CLC", 1, 2, NoneAddressing, clc),
        OP!(0x38, "SEC", 1, 2, NoneAddressing, sec),
        OP!(0x78, "SEI", 1, 2, NoneAddressing, sei),
        OP!(0xF8, "SED", 1, 2, NoneAddressing, sed),

        OP!(0xAA, "TAX", 1, 2, NoneAddressing, tax),
        OP!(0xA8, "TAY", 1, 2, NoneAddressing, tay),
        OP!(0xBA, "TSX", 1, 2, NoneAddressing, tsx),
        OP!(0x8A, "TXA", 1, 2, NoneAddressing, txa),
        OP!(0x9A, "TXS", 1, 2, NoneAddressing, txs),
        OP!(0x98, "TYA", 1, 2, NoneAddressing, tya),

        /* Stack */
        OP!(0x48, "PHA", 1, 3, NoneAddressing, pha),
        OP!(0x68, "PLA", 1, 4, NoneAddressing, pla),
        OP!(0x08, "PHP", 1, 3, NoneAddressing, php),
        OP!(0x28, "PLP", 1, 4, NoneAddressing, plp),
    ];

    pub static ref OPCODES_MAP: HashMap<u8, &'static OpCode> = {
        let mut map = HashMap::new();
        for op in CPU_OPS_CODES.iter() {
            map.insert(op.code, op);
        }
        map
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    #[test]
    fn every_documented_opcode_once() {
        assert_eq!(CPU_OPS_CODES.len(), 151);
        assert_eq!(OPCODES_MAP.len(), 151);
    }

    #[test]
    fn mnemonics() {
        let mnemonics: HashSet<&str> = CPU_OPS_CODES.iter().map(|op| op.mnemonic).collect();
        assert_eq!(mnemonics.len(), 56);
    }

    #[test]
    fn lengths_match_addressing_modes() {
        for op in CPU_OPS_CODES.iter() {
            let expected = match op.mode {
                AddressingMode::Immediate
                | AddressingMode::ZeroPage
                | AddressingMode::ZeroPageX
                | AddressingMode::ZeroPageY
                | AddressingMode::IndirectX
                | AddressingMode::IndirectY => 2,
                AddressingMode::Absolute | AddressingMode::AbsoluteX | AddressingMode::AbsoluteY => 3,
                AddressingMode::NoneAddressing => op.len,
            };
            assert_eq!(op.len, expected, "{:?}", op);
            assert!((1..=3).contains(&op.len), "{:?}", op);
        }
    }

    #[test]
    fn lookup() {
        let lda = OPCODES_MAP[&0xA9u8];
        assert_eq!(lda.mnemonic, "LDA");
        assert_eq!(lda.len, 2);
        assert_eq!(lda.mode, AddressingMode::Immediate);
        assert_eq!(OPCODES_MAP[&0x6Cu8].mnemonic, "JMP");
        assert!(OPCODES_MAP.get(&0x02u8).is_none());
        assert!(OPCODES_MAP.get(&0xFFu8).is_none());
    }
}
