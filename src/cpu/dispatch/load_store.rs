//! LDA/LDX/LDY/STA/STX/STY. Loads update Z/N through `execute::lda/ldx/ldy`;
//! stores never touch flags and never carry a page-cross penalty — the
//! opcode table only sets `page_cross_penalty` on the load variants.

use super::super::addressing::Operand;
use super::super::execute;
use super::super::state::CpuState;
use super::super::table::Mnemonic;
use crate::memory::Bus;

pub(super) fn handle(mnemonic: Mnemonic, operand: Operand, cpu: &mut CpuState, bus: &mut Bus) {
    use Mnemonic::*;
    match mnemonic {
        Lda => {
            let v = bus.read(operand.addr());
            execute::lda(cpu, v);
        }
        Ldx => {
            let v = bus.read(operand.addr());
            execute::ldx(cpu, v);
        }
        Ldy => {
            let v = bus.read(operand.addr());
            execute::ldy(cpu, v);
        }
        Sta => bus.write(operand.addr(), cpu.a),
        Stx => bus.write(operand.addr(), cpu.x),
        Sty => bus.write(operand.addr(), cpu.y),
        _ => unreachable!("load_store::handle called with non-load/store mnemonic"),
    }
}
