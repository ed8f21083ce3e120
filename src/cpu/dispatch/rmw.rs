//! ASL/LSR/ROL/ROR (accumulator or memory) and INC/DEC (memory only).
//! Memory variants go through `execute::rmw`'s read/dummy-write/write
//! sequence; accumulator variants mutate `cpu.a` directly.

use super::super::addressing::Operand;
use super::super::execute;
use super::super::state::CpuState;
use super::super::table::Mnemonic;
use crate::memory::Bus;

pub(super) fn handle(mnemonic: Mnemonic, operand: Operand, cpu: &mut CpuState, bus: &mut Bus) {
    match mnemonic {
        Mnemonic::Asl | Mnemonic::Lsr | Mnemonic::Rol | Mnemonic::Ror => {
            shift(mnemonic, operand, cpu, bus)
        }
        Mnemonic::Inc => {
            let addr = operand.addr();
            execute::rmw(bus, addr, |v| v.wrapping_add(1));
            let result = bus.read(addr);
            execute::update_zn(cpu, result);
        }
        Mnemonic::Dec => {
            let addr = operand.addr();
            execute::rmw(bus, addr, |v| v.wrapping_sub(1));
            let result = bus.read(addr);
            execute::update_zn(cpu, result);
        }
        _ => unreachable!("rmw::handle called with non-RMW mnemonic"),
    }
}

fn shift(mnemonic: Mnemonic, operand: Operand, cpu: &mut CpuState, bus: &mut Bus) {
    let op: fn(&mut CpuState, u8) -> u8 = match mnemonic {
        Mnemonic::Asl => execute::asl_value,
        Mnemonic::Lsr => execute::lsr_value,
        Mnemonic::Rol => execute::rol_value,
        Mnemonic::Ror => execute::ror_value,
        _ => unreachable!(),
    };

    match operand {
        Operand::Accumulator => {
            let a = cpu.a;
            cpu.a = op(cpu, a);
        }
        Operand::Address { addr, .. } => {
            execute::rmw(bus, addr, |old| op(cpu, old));
        }
        Operand::Implied => unreachable!("shift/rotate never resolves to Implied"),
    }
}
