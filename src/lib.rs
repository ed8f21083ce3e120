#![doc = r#"
Oricust library crate: a cycle-driven emulator core for the Oric-1 /
Atmos 8-bit home computer.

Modules:
- cpu: MOS 6502 CPU — fetch/decode/execute, addressing modes, BCD
  arithmetic, interrupt sampling at instruction boundaries
- via: MOS 6522 Versatile Interface Adapter — dual timers, handshake
  lines, interrupt flag/enable composition
- psg: AY-3-8912 programmable sound generator register file and
  BDIR/BC1/BC2 latch protocol
- tape: `.tap` file reader driving the VIA's CB1 line with a framed
  bit stream
- memory: the 64 KiB bus, ROM write protection, and the `Bus`
  borrow-context the CPU reads and writes through
- video: text-mode scanline renderer producing the 240x224 RGB frame
- keyboard: 8x8 key matrix and host-keysym mapping
- machine: the top-level loop tying CPU/VIA/PSG/tape/video/keyboard
  together on a shared cycle clock
- monitor: the line-oriented debugger REPL
- error: the crate-wide fallible-operation error type

In tests, shared ROM/TAP builders are available under `crate::test_utils`.
"#]

pub mod cpu;
#[cfg(feature = "display")]
pub mod display;
pub mod error;
pub mod keyboard;
pub mod machine;
pub mod memory;
pub mod monitor;
pub mod psg;
#[cfg(feature = "screenshot")]
pub mod screenshot;
pub mod tape;
pub mod via;
pub mod video;

pub use cpu::Cpu;
pub use error::{Error, Result};
pub use machine::Machine;
pub use memory::Memory;
pub use psg::Psg;
pub use tape::Tape;
pub use via::Via;
pub use video::Video;

#[cfg(test)]
pub mod test_utils;
