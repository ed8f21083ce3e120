//! Single-instruction dispatch: fetch opcode, resolve its addressing mode,
//! hand the operand to the right family handler, and total the cycle cost
//! (base cycles from the table, plus a conditional page-cross penalty or
//! branch-taken penalty).

mod arithmetic;
mod branches;
mod compare;
mod control_flow;
mod load_store;
mod logical;
mod misc;
mod rmw;

use super::addressing;
use super::state::CpuState;
use super::table::{Mnemonic, OPCODES};
use crate::error::{Error, Result};
use crate::memory::Bus;

/// Outcome of a single dispatched instruction.
pub(super) struct StepOutcome {
    pub cycles: u32,
    pub brk_fired: bool,
}

pub(super) fn step(cpu: &mut CpuState, bus: &mut Bus) -> Result<StepOutcome> {
    let opcode_pc = cpu.pc;
    let opcode = cpu.fetch_u8(bus);
    let info = OPCODES[opcode as usize].ok_or(Error::IllegalOpcode { pc: opcode_pc, opcode })?;

    let operand = addressing::resolve(info.mode, cpu, bus);
    let mut cycles = info.base_cycles;
    if info.page_cross_penalty && operand.page_crossed() {
        cycles += 1;
    }

    let mut brk_fired = false;
    use Mnemonic::*;
    match info.mnemonic {
        Lda | Ldx | Ldy | Sta | Stx | Sty => load_store::handle(info.mnemonic, operand, cpu, bus),
        And | Ora | Eor | Bit => logical::handle(info.mnemonic, operand, cpu, bus),
        Adc | Sbc => arithmetic::handle(info.mnemonic, operand, cpu, bus),
        Cmp | Cpx | Cpy => compare::handle(info.mnemonic, operand, cpu, bus),
        Asl | Lsr | Rol | Ror | Inc | Dec => rmw::handle(info.mnemonic, operand, cpu, bus),
        Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bvc | Bvs => {
            cycles += branches::handle(info.mnemonic, operand, cpu, bus);
        }
        Jmp | Jsr | Rts | Rti | Brk => {
            brk_fired = control_flow::handle(info.mnemonic, operand, cpu, bus);
        }
        Tax | Tay | Txa | Tya | Tsx | Txs | Pha | Php | Pla | Plp | Inx | Iny | Dex | Dey | Clc
        | Sec | Cld | Sed | Cli | Sei | Clv | Nop => misc::handle(info.mnemonic, cpu, bus),
    }

    Ok(StepOutcome { cycles, brk_fired })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Memory;
    use crate::via::Via;

    fn run_one(program: &[u8]) -> (CpuState, u32) {
        let mut mem = Memory::new();
        for (i, b) in program.iter().enumerate() {
            mem.poke(0x8000 + i as u16, *b);
        }
        mem.poke(0xFFFC, 0x00);
        mem.poke(0xFFFD, 0x80);
        let mut via = Via::new();
        let mut bus = Bus::new(&mut mem, &mut via);
        let mut cpu = CpuState::new();
        cpu.reset(&mut bus);
        let outcome = step(&mut cpu, &mut bus).expect("known opcode");
        (cpu, outcome.cycles)
    }

    #[test]
    fn lda_immediate_loads_accumulator_and_costs_two() {
        let (cpu, cycles) = run_one(&[0xA9, 0x42]);
        assert_eq!(cpu.a, 0x42);
        assert_eq!(cycles, 2);
    }

    #[test]
    fn illegal_opcode_is_reported() {
        let mut mem = Memory::new();
        mem.poke(0x8000, 0x02);
        mem.poke(0xFFFC, 0x00);
        mem.poke(0xFFFD, 0x80);
        let mut via = Via::new();
        let mut bus = Bus::new(&mut mem, &mut via);
        let mut cpu = CpuState::new();
        cpu.reset(&mut bus);
        let err = step(&mut cpu, &mut bus).unwrap_err();
        match err {
            Error::IllegalOpcode { pc, opcode } => {
                assert_eq!(pc, 0x8000);
                assert_eq!(opcode, 0x02);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn brk_signals_and_vectors() {
        let mut mem = Memory::new();
        mem.poke(0x8000, 0x00); // BRK
        mem.poke(0xFFFC, 0x00);
        mem.poke(0xFFFD, 0x80);
        mem.poke(0xFFFE, 0x34);
        mem.poke(0xFFFF, 0x12);
        let mut via = Via::new();
        let mut bus = Bus::new(&mut mem, &mut via);
        let mut cpu = CpuState::new();
        cpu.reset(&mut bus);
        let outcome = step(&mut cpu, &mut bus).expect("BRK is documented");
        assert!(outcome.brk_fired);
        assert_eq!(outcome.cycles, 7);
        assert_eq!(cpu.pc, 0x1234);
    }
}
