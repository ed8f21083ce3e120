//! AND/ORA/EOR/BIT.

use super::super::addressing::Operand;
use super::super::execute;
use super::super::state::CpuState;
use super::super::table::Mnemonic;
use crate::memory::Bus;

pub(super) fn handle(mnemonic: Mnemonic, operand: Operand, cpu: &mut CpuState, bus: &mut Bus) {
    let v = bus.read(operand.addr());
    match mnemonic {
        Mnemonic::And => execute::and(cpu, v),
        Mnemonic::Ora => execute::ora(cpu, v),
        Mnemonic::Eor => execute::eor(cpu, v),
        Mnemonic::Bit => execute::bit(cpu, v),
        _ => unreachable!("logical::handle called with non-logical mnemonic"),
    }
}
