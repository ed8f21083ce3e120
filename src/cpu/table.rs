//! The 256-entry opcode table: one `OpInfo` per documented opcode, `None`
//! for the 105 undocumented slots (a Non-goal — `Cpu::execute_one` traps
//! them as `Error::IllegalOpcode`).

use once_cell::sync::Lazy;

use super::addressing::Mode;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mnemonic {
    Lda, Ldx, Ldy, Sta, Stx, Sty,
    Tax, Tay, Txa, Tya, Tsx, Txs,
    Pha, Php, Pla, Plp,
    And, Ora, Eor, Bit,
    Adc, Sbc,
    Inc, Inx, Iny, Dec, Dex, Dey,
    Asl, Lsr, Rol, Ror,
    Cmp, Cpx, Cpy,
    Bcc, Bcs, Beq, Bmi, Bne, Bpl, Bvc, Bvs,
    Jmp, Jsr, Rts, Rti,
    Clc, Sec, Cld, Sed, Cli, Sei, Clv,
    Brk, Nop,
}

#[derive(Copy, Clone, Debug)]
pub struct OpInfo {
    pub mnemonic: Mnemonic,
    pub mode: Mode,
    pub base_cycles: u32,
    pub page_cross_penalty: bool,
}

const fn op(mnemonic: Mnemonic, mode: Mode, base_cycles: u32, page_cross_penalty: bool) -> Option<OpInfo> {
    Some(OpInfo { mnemonic, mode, base_cycles, page_cross_penalty })
}

pub static OPCODES: Lazy<[Option<OpInfo>; 256]> = Lazy::new(build_table);

fn build_table() -> [Option<OpInfo>; 256] {
    use Mnemonic::*;
    use Mode::*;

    let mut t: [Option<OpInfo>; 256] = [None; 256];

    // BRK / ORA / ASL (0x00-0x0F)
    t[0x00] = op(Brk, Implied, 7, false);
    t[0x01] = op(Ora, IndirectX, 6, false);
    t[0x05] = op(Ora, ZeroPage, 3, false);
    t[0x06] = op(Asl, ZeroPage, 5, false);
    t[0x08] = op(Php, Implied, 3, false);
    t[0x09] = op(Ora, Immediate, 2, false);
    t[0x0A] = op(Asl, Accumulator, 2, false);
    t[0x0D] = op(Ora, Absolute, 4, false);
    t[0x0E] = op(Asl, Absolute, 6, false);

    // BPL / ORA / ASL / CLC (0x10-0x1F)
    t[0x10] = op(Bpl, Relative, 2, false);
    t[0x11] = op(Ora, IndirectY, 5, true);
    t[0x15] = op(Ora, ZeroPageX, 4, false);
    t[0x16] = op(Asl, ZeroPageX, 6, false);
    t[0x18] = op(Clc, Implied, 2, false);
    t[0x19] = op(Ora, AbsoluteY, 4, true);
    t[0x1D] = op(Ora, AbsoluteX, 4, true);
    t[0x1E] = op(Asl, AbsoluteX, 7, false);

    // JSR / AND / BIT / ROL (0x20-0x2F)
    t[0x20] = op(Jsr, Absolute, 6, false);
    t[0x21] = op(And, IndirectX, 6, false);
    t[0x24] = op(Bit, ZeroPage, 3, false);
    t[0x25] = op(And, ZeroPage, 3, false);
    t[0x26] = op(Rol, ZeroPage, 5, false);
    t[0x28] = op(Plp, Implied, 4, false);
    t[0x29] = op(And, Immediate, 2, false);
    t[0x2A] = op(Rol, Accumulator, 2, false);
    t[0x2C] = op(Bit, Absolute, 4, false);
    t[0x2D] = op(And, Absolute, 4, false);
    t[0x2E] = op(Rol, Absolute, 6, false);

    // BMI / AND / ROL / SEC (0x30-0x3F)
    t[0x30] = op(Bmi, Relative, 2, false);
    t[0x31] = op(And, IndirectY, 5, true);
    t[0x35] = op(And, ZeroPageX, 4, false);
    t[0x36] = op(Rol, ZeroPageX, 6, false);
    t[0x38] = op(Sec, Implied, 2, false);
    t[0x39] = op(And, AbsoluteY, 4, true);
    t[0x3D] = op(And, AbsoluteX, 4, true);
    t[0x3E] = op(Rol, AbsoluteX, 7, false);

    // RTI / EOR / LSR (0x40-0x4F)
    t[0x40] = op(Rti, Implied, 6, false);
    t[0x41] = op(Eor, IndirectX, 6, false);
    t[0x45] = op(Eor, ZeroPage, 3, false);
    t[0x46] = op(Lsr, ZeroPage, 5, false);
    t[0x48] = op(Pha, Implied, 3, false);
    t[0x49] = op(Eor, Immediate, 2, false);
    t[0x4A] = op(Lsr, Accumulator, 2, false);
    t[0x4C] = op(Jmp, Absolute, 3, false);
    t[0x4D] = op(Eor, Absolute, 4, false);
    t[0x4E] = op(Lsr, Absolute, 6, false);

    // BVC / EOR / LSR / CLI (0x50-0x5F)
    t[0x50] = op(Bvc, Relative, 2, false);
    t[0x51] = op(Eor, IndirectY, 5, true);
    t[0x55] = op(Eor, ZeroPageX, 4, false);
    t[0x56] = op(Lsr, ZeroPageX, 6, false);
    t[0x58] = op(Cli, Implied, 2, false);
    t[0x59] = op(Eor, AbsoluteY, 4, true);
    t[0x5D] = op(Eor, AbsoluteX, 4, true);
    t[0x5E] = op(Lsr, AbsoluteX, 7, false);

    // RTS / ADC / ROR (0x60-0x6F)
    t[0x60] = op(Rts, Implied, 6, false);
    t[0x61] = op(Adc, IndirectX, 6, false);
    t[0x65] = op(Adc, ZeroPage, 3, false);
    t[0x66] = op(Ror, ZeroPage, 5, false);
    t[0x68] = op(Pla, Implied, 4, false);
    t[0x69] = op(Adc, Immediate, 2, false);
    t[0x6A] = op(Ror, Accumulator, 2, false);
    t[0x6C] = op(Jmp, Indirect, 5, false);
    t[0x6D] = op(Adc, Absolute, 4, false);
    t[0x6E] = op(Ror, Absolute, 6, false);

    // BVS / ADC / ROR / SEI (0x70-0x7F)
    t[0x70] = op(Bvs, Relative, 2, false);
    t[0x71] = op(Adc, IndirectY, 5, true);
    t[0x75] = op(Adc, ZeroPageX, 4, false);
    t[0x76] = op(Ror, ZeroPageX, 6, false);
    t[0x78] = op(Sei, Implied, 2, false);
    t[0x79] = op(Adc, AbsoluteY, 4, true);
    t[0x7D] = op(Adc, AbsoluteX, 4, true);
    t[0x7E] = op(Ror, AbsoluteX, 7, false);

    // STA / STY / STX / DEY / TXA (0x80-0x8F)
    t[0x81] = op(Sta, IndirectX, 6, false);
    t[0x84] = op(Sty, ZeroPage, 3, false);
    t[0x85] = op(Sta, ZeroPage, 3, false);
    t[0x86] = op(Stx, ZeroPage, 3, false);
    t[0x88] = op(Dey, Implied, 2, false);
    t[0x8A] = op(Txa, Implied, 2, false);
    t[0x8C] = op(Sty, Absolute, 4, false);
    t[0x8D] = op(Sta, Absolute, 4, false);
    t[0x8E] = op(Stx, Absolute, 4, false);

    // BCC / STA / STY / STX / TYA / TXS (0x90-0x9F)
    t[0x90] = op(Bcc, Relative, 2, false);
    t[0x91] = op(Sta, IndirectY, 6, false);
    t[0x94] = op(Sty, ZeroPageX, 4, false);
    t[0x95] = op(Sta, ZeroPageX, 4, false);
    t[0x96] = op(Stx, ZeroPageY, 4, false);
    t[0x98] = op(Tya, Implied, 2, false);
    t[0x99] = op(Sta, AbsoluteY, 5, false);
    t[0x9A] = op(Txs, Implied, 2, false);
    t[0x9D] = op(Sta, AbsoluteX, 5, false);

    // LDY / LDA / LDX / TAY / TAX (0xA0-0xAF)
    t[0xA0] = op(Ldy, Immediate, 2, false);
    t[0xA1] = op(Lda, IndirectX, 6, false);
    t[0xA2] = op(Ldx, Immediate, 2, false);
    t[0xA4] = op(Ldy, ZeroPage, 3, false);
    t[0xA5] = op(Lda, ZeroPage, 3, false);
    t[0xA6] = op(Ldx, ZeroPage, 3, false);
    t[0xA8] = op(Tay, Implied, 2, false);
    t[0xA9] = op(Lda, Immediate, 2, false);
    t[0xAA] = op(Tax, Implied, 2, false);
    t[0xAC] = op(Ldy, Absolute, 4, false);
    t[0xAD] = op(Lda, Absolute, 4, false);
    t[0xAE] = op(Ldx, Absolute, 4, false);

    // BCS / LDA / LDY / LDX / CLV / TSX (0xB0-0xBF)
    t[0xB0] = op(Bcs, Relative, 2, false);
    t[0xB1] = op(Lda, IndirectY, 5, true);
    t[0xB4] = op(Ldy, ZeroPageX, 4, false);
    t[0xB5] = op(Lda, ZeroPageX, 4, false);
    t[0xB6] = op(Ldx, ZeroPageY, 4, false);
    t[0xB8] = op(Clv, Implied, 2, false);
    t[0xB9] = op(Lda, AbsoluteY, 4, true);
    t[0xBA] = op(Tsx, Implied, 2, false);
    t[0xBC] = op(Ldy, AbsoluteX, 4, true);
    t[0xBD] = op(Lda, AbsoluteX, 4, true);
    t[0xBE] = op(Ldx, AbsoluteY, 4, true);

    // CPY / CMP / DEC / INY / DEX (0xC0-0xCF)
    t[0xC0] = op(Cpy, Immediate, 2, false);
    t[0xC1] = op(Cmp, IndirectX, 6, false);
    t[0xC4] = op(Cpy, ZeroPage, 3, false);
    t[0xC5] = op(Cmp, ZeroPage, 3, false);
    t[0xC6] = op(Dec, ZeroPage, 5, false);
    t[0xC8] = op(Iny, Implied, 2, false);
    t[0xC9] = op(Cmp, Immediate, 2, false);
    t[0xCA] = op(Dex, Implied, 2, false);
    t[0xCC] = op(Cpy, Absolute, 4, false);
    t[0xCD] = op(Cmp, Absolute, 4, false);
    t[0xCE] = op(Dec, Absolute, 6, false);

    // BNE / CMP / DEC / CLD (0xD0-0xDF)
    t[0xD0] = op(Bne, Relative, 2, false);
    t[0xD1] = op(Cmp, IndirectY, 5, true);
    t[0xD5] = op(Cmp, ZeroPageX, 4, false);
    t[0xD6] = op(Dec, ZeroPageX, 6, false);
    t[0xD8] = op(Cld, Implied, 2, false);
    t[0xD9] = op(Cmp, AbsoluteY, 4, true);
    t[0xDD] = op(Cmp, AbsoluteX, 4, true);
    t[0xDE] = op(Dec, AbsoluteX, 7, false);

    // CPX / SBC / INC / INX / NOP (0xE0-0xEF)
    t[0xE0] = op(Cpx, Immediate, 2, false);
    t[0xE1] = op(Sbc, IndirectX, 6, false);
    t[0xE4] = op(Cpx, ZeroPage, 3, false);
    t[0xE5] = op(Sbc, ZeroPage, 3, false);
    t[0xE6] = op(Inc, ZeroPage, 5, false);
    t[0xE8] = op(Inx, Implied, 2, false);
    t[0xE9] = op(Sbc, Immediate, 2, false);
    t[0xEA] = op(Nop, Implied, 2, false);
    t[0xEC] = op(Cpx, Absolute, 4, false);
    t[0xED] = op(Sbc, Absolute, 4, false);
    t[0xEE] = op(Inc, Absolute, 6, false);

    // BEQ / SBC / INC / SED (0xF0-0xFF)
    t[0xF0] = op(Beq, Relative, 2, false);
    t[0xF1] = op(Sbc, IndirectY, 5, true);
    t[0xF5] = op(Sbc, ZeroPageX, 4, false);
    t[0xF6] = op(Inc, ZeroPageX, 6, false);
    t[0xF8] = op(Sed, Implied, 2, false);
    t[0xF9] = op(Sbc, AbsoluteY, 4, true);
    t[0xFD] = op(Sbc, AbsoluteX, 4, true);
    t[0xFE] = op(Inc, AbsoluteX, 7, false);

    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lda_immediate_is_two_cycles() {
        let info = OPCODES[0xA9].expect("LDA #imm must be documented");
        assert_eq!(info.mnemonic, Mnemonic::Lda);
        assert_eq!(info.mode, Mode::Immediate);
        assert_eq!(info.base_cycles, 2);
        assert!(!info.page_cross_penalty);
    }

    #[test]
    fn undocumented_slot_is_none() {
        assert!(OPCODES[0x02].is_none());
        assert!(OPCODES[0xFF].is_none());
    }

    #[test]
    fn indirect_y_variants_carry_page_cross_penalty() {
        for opcode in [0x11, 0x31, 0x51, 0x71, 0xB1, 0xD1, 0xF1] {
            let info = OPCODES[opcode].expect("(zp),Y opcode must be documented");
            assert_eq!(info.mode, Mode::IndirectY);
            assert!(info.page_cross_penalty);
        }
    }

    #[test]
    fn table_has_exactly_151_documented_opcodes() {
        let count = OPCODES.iter().filter(|o| o.is_some()).count();
        assert_eq!(count, 151);
    }
}
