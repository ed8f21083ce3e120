//! ADC/SBC. `execute::adc`/`execute::sbc` already branch on the Decimal
//! flag internally, so this family handler is just operand plumbing.

use super::super::addressing::Operand;
use super::super::execute;
use super::super::state::CpuState;
use super::super::table::Mnemonic;
use crate::memory::Bus;

pub(super) fn handle(mnemonic: Mnemonic, operand: Operand, cpu: &mut CpuState, bus: &mut Bus) {
    let v = bus.read(operand.addr());
    match mnemonic {
        Mnemonic::Adc => execute::adc(cpu, v),
        Mnemonic::Sbc => execute::sbc(cpu, v),
        _ => unreachable!("arithmetic::handle called with non-arithmetic mnemonic"),
    }
}
