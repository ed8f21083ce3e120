//! BCC/BCS/BEQ/BMI/BNE/BPL/BVC/BVS. All share the same relative-branch
//! machinery in `execute::branch`; only the flag test differs.

use super::super::addressing::Operand;
use super::super::execute;
use super::super::state::{CpuState, CARRY, NEGATIVE, OVERFLOW, ZERO};
use super::super::table::Mnemonic;
use crate::memory::Bus;

/// Returns the extra cycles the branch costs beyond the base 2 (0 if not
/// taken, 1 if taken, 2 if taken and the target crosses a page).
pub(super) fn handle(mnemonic: Mnemonic, operand: Operand, cpu: &mut CpuState, bus: &mut Bus) -> u32 {
    let offset = bus.read(operand.addr()) as i8;
    let take = match mnemonic {
        Mnemonic::Bcc => !cpu.is_flag_set(CARRY),
        Mnemonic::Bcs => cpu.is_flag_set(CARRY),
        Mnemonic::Beq => cpu.is_flag_set(ZERO),
        Mnemonic::Bne => !cpu.is_flag_set(ZERO),
        Mnemonic::Bmi => cpu.is_flag_set(NEGATIVE),
        Mnemonic::Bpl => !cpu.is_flag_set(NEGATIVE),
        Mnemonic::Bvc => !cpu.is_flag_set(OVERFLOW),
        Mnemonic::Bvs => cpu.is_flag_set(OVERFLOW),
        _ => unreachable!("branches::handle called with non-branch mnemonic"),
    };
    execute::branch(cpu, offset, take)
}
