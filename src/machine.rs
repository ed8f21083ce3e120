//! Top-level machine loop: owns every subsystem flatly and drives them on
//! the shared cycle clock described in spec §5.
//!
//! There is no stored callback graph (Design Notes, "callback graph"): the
//! VIA reports handshake-line events from `step`, and this module forwards
//! them to the PSG (CA2 -> BC1, CB2 -> BDIR) and reads CB1 pulses by
//! handing the tape deck a `&mut Via` directly. The machine is the sole
//! owner of every component; no reference outlives a single call.

use crate::cpu::Cpu;
use crate::error::Result;
use crate::keyboard::Keyboard;
use crate::memory::{Bus, Memory};
use crate::psg::Psg;
use crate::tape::Tape;
use crate::via::Via;
use crate::video::{Video, FRAME_HEIGHT};

/// Width, in CPU cycles, of one raster line (spec GLOSSARY).
pub const CYCLES_PER_RASTER: u32 = 64;
/// Raster lines per frame.
pub const RASTER_MAX: u16 = 312;
/// First visible raster line.
pub const RASTER_VISIBLE_FIRST: u16 = 65;
/// One past the last visible raster line (`RASTER_VISIBLE_FIRST +
/// FRAME_HEIGHT`, so the visible window produces exactly one frame buffer's
/// worth of scanlines).
pub const RASTER_VISIBLE_LAST: u16 = RASTER_VISIBLE_FIRST + FRAME_HEIGHT as u16;

pub struct Machine {
    cpu: Cpu,
    mem: Memory,
    via: Via,
    psg: Psg,
    tape: Tape,
    video: Video,
    keyboard: Keyboard,
    raster_current: u16,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            mem: Memory::new(),
            via: Via::new(),
            psg: Psg::new(),
            tape: Tape::new(),
            video: Video::new(),
            keyboard: Keyboard::new(),
            raster_current: 0,
        }
    }

    pub fn load_rom(&mut self, path: impl AsRef<std::path::Path>, base: u16) -> Result<()> {
        self.mem.load(path, base)
    }

    pub fn attach_tape(&mut self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.tape.attach(path)
    }

    pub fn set_tape_motor(&mut self, on: bool) {
        self.tape.set_motor(on);
    }

    pub fn key_down(&mut self, position: u8) {
        self.keyboard.set_key(position, true);
    }

    pub fn key_up(&mut self, position: u8) {
        self.keyboard.set_key(position, false);
    }

    /// `PC <- read_word(0xFFFC)` with `SP <- 0xFD`, `P <- 0x24` (spec §4.2).
    pub fn reset(&mut self) {
        let mut bus = Bus::new(&mut self.mem, &mut self.via);
        self.cpu.reset(&mut bus);
        self.raster_current = 0;
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn via(&self) -> &Via {
        &self.via
    }

    pub fn psg(&self) -> &Psg {
        &self.psg
    }

    pub fn memory(&self) -> &Memory {
        &self.mem
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// The current frame buffer: 240x224 packed RGB, one call per visible
    /// scanline, refreshed a line at a time by `run_frame`.
    pub fn frame(&self) -> &[u8] {
        self.video.frame()
    }

    /// Execute exactly one CPU instruction and advance every other
    /// subsystem by the same cycle count (spec §2's data-flow contract:
    /// "the machine loop asks the CPU to execute one instruction, receives
    /// its actual cycle cost `c`, then advances VIA(c), PSG(c), and
    /// tape(c)"). Returns the cycle cost.
    pub fn step_instruction(&mut self) -> Result<u32> {
        self.cpu.set_irq_line(self.via.irq_asserted());

        let cycles = {
            let mut bus = Bus::new(&mut self.mem, &mut self.via);
            self.cpu.execute_one(&mut bus)?
        };

        let events = self.via.step(cycles);
        if let Some(level) = events.ca2 {
            self.psg.set_bc1(level);
        }
        if let Some(level) = events.cb2 {
            self.psg.set_bdir(level, self.via.ora_bus());
        }
        self.psg.step(cycles);
        self.tape.step(cycles, &mut self.via);
        self.keyboard.update(&mut self.via, &self.psg);

        Ok(cycles)
    }

    /// Run one full frame: 312 raster lines, each a `CYCLES_PER_RASTER`
    /// cycle budget spent executing instructions and stepping every
    /// subsystem, rendering the visible scanlines into `self.video` along
    /// the way. Returns `true` if BRK fired at any point during the frame
    /// (the caller should drop into the monitor REPL).
    ///
    /// Frame pacing (sleeping to the next 20ms boundary) and the host
    /// event pump are the caller's responsibility (spec §5): this method
    /// never blocks, which keeps the core testable without a window
    /// system or display feature.
    pub fn run_frame(&mut self) -> Result<bool> {
        let mut brk_fired = false;

        for _ in 0..RASTER_MAX {
            let mut budget: i32 = CYCLES_PER_RASTER as i32;
            while budget > 0 {
                let ran = self.step_instruction()?;
                budget -= ran as i32;
                if self.cpu.take_brk_fired() {
                    brk_fired = true;
                }
            }

            if (RASTER_VISIBLE_FIRST..RASTER_VISIBLE_LAST).contains(&self.raster_current) {
                let line = (self.raster_current - RASTER_VISIBLE_FIRST) as usize;
                self.video.render_line(line, &self.mem);
            }

            self.raster_current += 1;
            if self.raster_current == RASTER_MAX {
                self.raster_current = 0;
            }
        }

        Ok(brk_fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_instruction_advances_via_and_psg_together() {
        let mut machine = Machine::new();
        machine.mem.poke(0xFFFC, 0x00);
        machine.mem.poke(0xFFFD, 0x80);
        machine.mem.poke(0x8000, 0xEA); // NOP
        machine.reset();
        let cycles = machine.step_instruction().unwrap();
        assert_eq!(cycles, 2);
        assert_eq!(machine.cpu().pc(), 0x8001);
    }

    #[test]
    fn run_frame_advances_312_raster_lines_worth_of_cycles() {
        let mut machine = Machine::new();
        machine.mem.poke(0xFFFC, 0x00);
        machine.mem.poke(0xFFFD, 0x80);
        for addr in 0x8000u32..0xC000u32 {
            machine.mem.poke(addr as u16, 0xEA); // NOP farm, covers a full frame's worth
        }
        machine.reset();
        let brk = machine.run_frame().unwrap();
        assert!(!brk);
        assert!(machine.cpu().cycles() >= (CYCLES_PER_RASTER as u64) * (RASTER_MAX as u64));
    }

    #[test]
    fn run_frame_reports_brk_fired() {
        let mut machine = Machine::new();
        machine.mem.poke(0xFFFC, 0x00);
        machine.mem.poke(0xFFFD, 0x80);
        machine.mem.poke(0x8000, 0x00); // BRK
        machine.mem.poke(0xFFFE, 0x00);
        machine.mem.poke(0xFFFF, 0x80); // vector back to the BRK, loops harmlessly
        machine.reset();
        let brk = machine.run_frame().unwrap();
        assert!(brk);
    }
}
