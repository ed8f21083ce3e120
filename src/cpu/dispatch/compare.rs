//! CMP/CPX/CPY — all three share the same compare semantics against a
//! different register.

use super::super::addressing::Operand;
use super::super::execute;
use super::super::state::CpuState;
use super::super::table::Mnemonic;
use crate::memory::Bus;

pub(super) fn handle(mnemonic: Mnemonic, operand: Operand, cpu: &mut CpuState, bus: &mut Bus) {
    let v = bus.read(operand.addr());
    match mnemonic {
        Mnemonic::Cmp => {
            let a = cpu.a;
            execute::compare(cpu, a, v)
        }
        Mnemonic::Cpx => {
            let x = cpu.x;
            execute::compare(cpu, x, v)
        }
        Mnemonic::Cpy => {
            let y = cpu.y;
            execute::compare(cpu, y, v)
        }
        _ => unreachable!("compare::handle called with non-compare mnemonic"),
    }
}
