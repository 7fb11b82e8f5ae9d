// Frame capture loop
//
// Clocks a simulated display controller through one full frame of video
// timing and collects the visible pixels in raster order.

use crate::raster::{FrameWriter, ImageFormat, PixelSink, RasterError};
use crate::sim::{clock_cycle, Simulation};
use crate::timing::VideoTiming;
use std::path::Path;

/// Counters for one captured frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Clock cycles driven, blanking included
    pub cycles: u64,
    /// Pixel triplets emitted
    pub pixels: u64,
}

/// Drive one frame through `sim` and push its visible pixels into `sink`
///
/// Every position of the frame costs one full clock cycle. Outputs are
/// sampled only after the falling-edge evaluation and only for positions
/// visible on both axes; blanking outputs are never read.
///
/// The simulation is not reset: the frame starts from whatever state the
/// previous frame left behind.
pub fn render_frame<S, P>(
    sim: &mut S,
    timing: &VideoTiming,
    sink: &mut P,
) -> Result<FrameStats, RasterError>
where
    S: Simulation + ?Sized,
    P: PixelSink + ?Sized,
{
    let mut stats = FrameStats::default();

    for pos in timing.positions() {
        clock_cycle(sim);
        stats.cycles += 1;

        if !pos.visible {
            continue;
        }

        sink.put_pixel(sim.rgb())?;
        stats.pixels += 1;
    }

    Ok(stats)
}

/// Capture one frame into an image file
///
/// The file is created (or overwritten) before the first clock cycle and is
/// closed before this returns, on success and on failure alike. A failed
/// frame leaves a partial file behind.
pub fn capture_frame<S>(
    sim: &mut S,
    timing: &VideoTiming,
    path: &Path,
    format: ImageFormat,
) -> Result<FrameStats, RasterError>
where
    S: Simulation + ?Sized,
{
    let mut writer = FrameWriter::create(path, format, timing.width(), timing.height())?;
    let stats = render_frame(sim, timing, &mut writer)?;
    writer.finish()?;

    Ok(stats)
}
