//! PNG screenshot helper, gated behind the `screenshot` feature.

use std::path::Path;

use image::{ImageBuffer, Rgb};

use crate::error::{Error, Result};
use crate::machine::Machine;
use crate::video::{FRAME_HEIGHT, FRAME_WIDTH};

/// Write the machine's current frame buffer to a PNG file.
pub fn save_png(machine: &Machine, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let frame = machine.frame();
    let image: ImageBuffer<Rgb<u8>, _> =
        ImageBuffer::from_raw(FRAME_WIDTH as u32, FRAME_HEIGHT as u32, frame.to_vec())
            .expect("frame buffer is exactly FRAME_WIDTH * FRAME_HEIGHT * 3 bytes");
    image.save(path).map_err(|source| Error::Screenshot {
        path: path.to_path_buf(),
        source,
    })
}
