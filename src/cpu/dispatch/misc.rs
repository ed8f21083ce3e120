//! Transfers, stack ops, register increment/decrement, flag sets/clears,
//! and NOP — every implied-mode instruction that doesn't fit another family.

use super::super::execute;
use super::super::state::{CpuState, CARRY, DECIMAL, IRQ_DISABLE, OVERFLOW};
use super::super::table::Mnemonic;
use crate::memory::Bus;

pub(super) fn handle(mnemonic: Mnemonic, cpu: &mut CpuState, bus: &mut Bus) {
    use Mnemonic::*;
    match mnemonic {
        Tax => execute::tax(cpu),
        Tay => execute::tay(cpu),
        Txa => execute::txa(cpu),
        Tya => execute::tya(cpu),
        Tsx => execute::tsx(cpu),
        Txs => execute::txs(cpu),
        Pha => execute::pha(cpu, bus),
        Php => execute::php(cpu, bus),
        Pla => execute::pla(cpu, bus),
        Plp => execute::plp(cpu, bus),
        Inx => execute::inx(cpu),
        Iny => execute::iny(cpu),
        Dex => execute::dex(cpu),
        Dey => execute::dey(cpu),
        Clc => cpu.assign_flag(CARRY, false),
        Sec => cpu.assign_flag(CARRY, true),
        Cld => cpu.assign_flag(DECIMAL, false),
        Sed => cpu.assign_flag(DECIMAL, true),
        Cli => cpu.assign_flag(IRQ_DISABLE, false),
        Sei => cpu.assign_flag(IRQ_DISABLE, true),
        Clv => cpu.assign_flag(OVERFLOW, false),
        Nop => {}
        _ => unreachable!("misc::handle called with an unhandled mnemonic"),
    }
}
