// Binary PPM (P6) writer
//
// Header: "P6\n<width> <height>\n255\n", then raw row-major RGB triplets with
// no padding and no per-row alignment.

use super::{PixelSink, RasterError, Rgb};
use std::io::Write;

/// Maximum sample value written in the header
pub const MAX_SAMPLE: u8 = 255;

/// Streaming P6 writer for a single frame
pub struct PpmWriter<W: Write> {
    inner: W,
    expected: u64,
    written: u64,
}

impl<W: Write> PpmWriter<W> {
    /// Write the header and return a writer ready for `width * height` pixels
    pub fn new(mut inner: W, width: u32, height: u32) -> Result<Self, RasterError> {
        write!(inner, "P6\n{} {}\n{}\n", width, height, MAX_SAMPLE)?;

        Ok(PpmWriter {
            inner,
            expected: width as u64 * height as u64,
            written: 0,
        })
    }

    /// Pixels written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Check the pixel count, flush, and hand back the underlying writer
    pub fn finish(mut self) -> Result<W, RasterError> {
        if self.written != self.expected {
            return Err(RasterError::PixelCount {
                expected: self.expected,
                actual: self.written,
            });
        }

        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> PixelSink for PpmWriter<W> {
    fn put_pixel(&mut self, pixel: Rgb) -> Result<(), RasterError> {
        if self.written >= self.expected {
            return Err(RasterError::PixelCount {
                expected: self.expected,
                actual: self.written + 1,
            });
        }

        self.inner.write_all(&pixel.to_bytes())?;
        self.written += 1;
        Ok(())
    }
}
