// PNG writer
//
// Collects one frame of RGB samples and encodes it when the frame is finished.

use super::{PixelSink, RasterError, Rgb};
use std::io::Write;

/// Buffered 8-bit RGB PNG writer for a single frame
pub struct PngWriter<W: Write> {
    inner: W,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl<W: Write> PngWriter<W> {
    pub fn new(inner: W, width: u32, height: u32) -> Self {
        PngWriter {
            inner,
            width,
            height,
            data: Vec::with_capacity(width as usize * height as usize * 3),
        }
    }

    fn expected(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    fn written(&self) -> u64 {
        (self.data.len() / 3) as u64
    }

    /// Encode the collected frame and hand back the underlying writer
    pub fn finish(mut self) -> Result<W, RasterError> {
        if self.written() != self.expected() {
            return Err(RasterError::PixelCount {
                expected: self.expected(),
                actual: self.written(),
            });
        }

        {
            let mut encoder = ::png::Encoder::new(&mut self.inner, self.width, self.height);
            encoder.set_color(::png::ColorType::Rgb);
            encoder.set_depth(::png::BitDepth::Eight);

            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.data)?;
            writer.finish()?;
        }

        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> PixelSink for PngWriter<W> {
    fn put_pixel(&mut self, pixel: Rgb) -> Result<(), RasterError> {
        if self.written() >= self.expected() {
            return Err(RasterError::PixelCount {
                expected: self.expected(),
                actual: self.written() + 1,
            });
        }

        self.data.extend_from_slice(&pixel.to_bytes());
        Ok(())
    }
}
