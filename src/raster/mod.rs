// Raster output
//
// Pixel sinks for captured frames: binary PPM (P6) and, with the `png`
// feature, 8-bit RGB PNG.

#[cfg(feature = "png")]
mod png;
mod ppm;

#[cfg(feature = "png")]
pub use self::png::PngWriter;
pub use ppm::PpmWriter;

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

/// One 8-bit RGB sample triplet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Samples in output order (red, green, blue)
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Errors that can occur while writing a frame
#[derive(Debug)]
pub enum RasterError {
    /// I/O error
    Io(io::Error),

    /// PNG encoding error
    #[cfg(feature = "png")]
    PngEncoding(::png::EncodingError),

    /// Frame did not receive exactly `width * height` pixels
    PixelCount { expected: u64, actual: u64 },
}

impl std::fmt::Display for RasterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterError::Io(e) => write!(f, "I/O error: {}", e),
            #[cfg(feature = "png")]
            RasterError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
            RasterError::PixelCount { expected, actual } => {
                write!(
                    f,
                    "Pixel count mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RasterError::Io(e) => Some(e),
            #[cfg(feature = "png")]
            RasterError::PngEncoding(e) => Some(e),
            RasterError::PixelCount { .. } => None,
        }
    }
}

impl From<io::Error> for RasterError {
    fn from(e: io::Error) -> Self {
        RasterError::Io(e)
    }
}

#[cfg(feature = "png")]
impl From<::png::EncodingError> for RasterError {
    fn from(e: ::png::EncodingError) -> Self {
        RasterError::PngEncoding(e)
    }
}

/// Destination for pixels produced in raster order
pub trait PixelSink {
    /// Append the next visible pixel
    fn put_pixel(&mut self, pixel: Rgb) -> Result<(), RasterError>;
}

impl PixelSink for Vec<Rgb> {
    fn put_pixel(&mut self, pixel: Rgb) -> Result<(), RasterError> {
        self.push(pixel);
        Ok(())
    }
}

impl<P: PixelSink + ?Sized> PixelSink for &mut P {
    fn put_pixel(&mut self, pixel: Rgb) -> Result<(), RasterError> {
        (**self).put_pixel(pixel)
    }
}

/// Output image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Binary portable pixmap (P6)
    #[default]
    Ppm,

    /// 8-bit RGB PNG
    #[cfg(feature = "png")]
    Png,
}

impl ImageFormat {
    /// File extension (without the dot)
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Ppm => "ppm",
            #[cfg(feature = "png")]
            ImageFormat::Png => "png",
        }
    }
}

/// File-backed frame writer
///
/// The file is created (or truncated) by [`FrameWriter::create`] and closed
/// when the writer is finished or dropped.
pub enum FrameWriter {
    Ppm(PpmWriter<BufWriter<File>>),
    #[cfg(feature = "png")]
    Png(PngWriter<BufWriter<File>>),
}

impl FrameWriter {
    /// Create the destination file and prepare a writer for one frame
    pub fn create(
        path: &Path,
        format: ImageFormat,
        width: u32,
        height: u32,
    ) -> Result<Self, RasterError> {
        let file = BufWriter::new(File::create(path)?);

        let writer = match format {
            ImageFormat::Ppm => FrameWriter::Ppm(PpmWriter::new(file, width, height)?),
            #[cfg(feature = "png")]
            ImageFormat::Png => FrameWriter::Png(PngWriter::new(file, width, height)),
        };

        Ok(writer)
    }

    /// Complete the frame and flush it to disk
    pub fn finish(self) -> Result<(), RasterError> {
        let file = match self {
            FrameWriter::Ppm(writer) => writer.finish()?,
            #[cfg(feature = "png")]
            FrameWriter::Png(writer) => writer.finish()?,
        };
        file.into_inner().map_err(|e| e.into_error())?;
        Ok(())
    }
}

impl PixelSink for FrameWriter {
    fn put_pixel(&mut self, pixel: Rgb) -> Result<(), RasterError> {
        match self {
            FrameWriter::Ppm(writer) => writer.put_pixel(pixel),
            #[cfg(feature = "png")]
            FrameWriter::Png(writer) => writer.put_pixel(pixel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_byte_order() {
        assert_eq!(Rgb::new(1, 2, 3).to_bytes(), [1, 2, 3]);
        assert_eq!(Rgb::BLACK, Rgb::default());
    }

    #[test]
    fn test_vec_sink() {
        let mut pixels: Vec<Rgb> = Vec::new();
        pixels.put_pixel(Rgb::new(9, 8, 7)).expect("vec sink never fails");
        assert_eq!(pixels, vec![Rgb::new(9, 8, 7)]);
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ImageFormat::Ppm.extension(), "ppm");
        assert_eq!(ImageFormat::default(), ImageFormat::Ppm);
        #[cfg(feature = "png")]
        assert_eq!(ImageFormat::Png.extension(), "png");
    }

    #[test]
    fn test_pixel_count_display() {
        let err = RasterError::PixelCount {
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Pixel count mismatch: expected 4, got 3");
    }

    #[test]
    fn test_frame_writer_ppm_file() {
        let path = std::env::temp_dir().join(format!(
            "render_frames_raster_{}.ppm",
            std::process::id()
        ));

        let mut writer =
            FrameWriter::create(&path, ImageFormat::Ppm, 2, 1).expect("Failed to create file");
        writer.put_pixel(Rgb::new(1, 2, 3)).unwrap();
        writer.put_pixel(Rgb::new(4, 5, 6)).unwrap();
        writer.finish().expect("Failed to finish frame");

        let bytes = std::fs::read(&path).expect("Failed to read frame");
        let _ = std::fs::remove_file(&path);
        assert_eq!(bytes, b"P6\n2 1\n255\n\x01\x02\x03\x04\x05\x06".to_vec());
    }

    #[test]
    fn test_frame_writer_unwritable_destination() {
        let path = std::env::temp_dir()
            .join("render_frames_missing_dir")
            .join("nested")
            .join("frame1.ppm");
        let result = FrameWriter::create(&path, ImageFormat::Ppm, 1, 1);
        assert!(matches!(result, Err(RasterError::Io(_))));
    }
}
