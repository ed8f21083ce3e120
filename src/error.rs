//! Crate-wide error type.
//!
//! The emulator has a narrow error surface (see spec §7): fatal
//! initialisation errors (unreadable ROM, malformed TAP) and a single
//! fail-fast runtime error (an undocumented opcode byte). There are no
//! recoverable runtime error conditions — arithmetic and register I/O are
//! total functions.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read ROM file {path}: {source}")]
    RomRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("ROM file {path} does not fit at base address 0x{base:04X} (64 KiB address space)")]
    RomTooLarge { path: PathBuf, base: u16 },

    #[error("failed to read TAP file {path}: {source}")]
    TapeRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed TAP file {path}: {reason}")]
    TapeHeader { path: PathBuf, reason: String },

    #[error("illegal opcode 0x{opcode:02X} at PC=0x{pc:04X}")]
    IllegalOpcode { pc: u16, opcode: u8 },

    #[cfg(feature = "screenshot")]
    #[error("failed to write screenshot {path}: {source}")]
    Screenshot {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
