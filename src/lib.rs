// Frame capture harness library
// Clocks a simulated display controller through video timing and writes the
// visible pixels of each frame to an image file.

// Public modules
pub mod capture;
pub mod config;
pub mod logger;
pub mod raster;
pub mod runner;
pub mod sim;
pub mod timing;

// Re-export main types for convenience
pub use capture::{capture_frame, render_frame, FrameStats};
pub use config::{HarnessConfig, LoggingConfig, OutputConfig, CONFIG_FILE};
pub use logger::{FrameTrace, LogLevel, Logger, TraceEntry};
pub use raster::{FrameWriter, ImageFormat, PixelSink, PpmWriter, RasterError, Rgb};
pub use runner::{FrameRecord, FrameRunner, RunError, RunSummary};
pub use sim::{clock_cycle, PatternGenerator, Simulation};
pub use timing::{AxisRegion, AxisTiming, ScanPosition, VideoTiming};

#[cfg(feature = "png")]
pub use raster::PngWriter;
