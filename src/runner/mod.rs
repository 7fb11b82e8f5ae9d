// Run controller
//
// Captures a fixed sequence of frames from a single simulation instance.
// Frames run strictly in order on the same instance: frame k starts from the
// state frame k-1 ended in.

use crate::capture::{capture_frame, FrameStats};
use crate::config::{HarnessConfig, OutputConfig};
use crate::logger::{FrameTrace, Logger};
use crate::raster::RasterError;
use crate::sim::Simulation;
use crate::timing::constants::FRAME_COUNT;
use crate::timing::VideoTiming;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Errors that can abort a run
#[derive(Debug)]
pub enum RunError {
    /// Output directory could not be created
    Io(io::Error),

    /// A frame failed to capture
    Frame { index: u32, source: RasterError },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::Io(e) => write!(f, "I/O error: {}", e),
            RunError::Frame { index, source } => write!(f, "Frame {} failed: {}", index, source),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Io(e) => Some(e),
            RunError::Frame { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> Self {
        RunError::Io(e)
    }
}

/// One captured frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRecord {
    /// Frame index (1-based)
    pub index: u32,
    /// Destination file
    pub path: PathBuf,
    /// Cycle and pixel counts
    pub stats: FrameStats,
}

/// Result of a complete run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames in capture order
    pub frames: Vec<FrameRecord>,
}

impl RunSummary {
    /// Clock cycles driven across all frames
    pub fn total_cycles(&self) -> u64 {
        self.frames.iter().map(|f| f.stats.cycles).sum()
    }

    /// Paths of the written frames, in order
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.frames.iter().map(|f| &f.path)
    }
}

/// Drives the frame capture loop once per frame index
#[derive(Debug, Clone)]
pub struct FrameRunner {
    timing: VideoTiming,
    output: OutputConfig,
    frame_count: u32,
}

impl FrameRunner {
    /// Runner for [`FRAME_COUNT`] frames of CVT-RB 800x600, writing where
    /// `config` says
    pub fn new(config: &HarnessConfig) -> Self {
        FrameRunner {
            timing: VideoTiming::CVT_RB_800X600,
            output: config.output.clone(),
            frame_count: FRAME_COUNT,
        }
    }

    /// Replace the video timing
    pub fn with_timing(mut self, timing: VideoTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Replace the number of frames per run
    pub fn with_frame_count(mut self, frame_count: u32) -> Self {
        self.frame_count = frame_count;
        self
    }

    pub fn timing(&self) -> &VideoTiming {
        &self.timing
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Destination of frame `index`: `<directory>/<prefix><index>.<ext>`
    pub fn frame_path(&self, index: u32) -> PathBuf {
        self.output.directory.join(format!(
            "{}{}.{}",
            self.output.file_prefix,
            index,
            self.output.extension()
        ))
    }

    /// Capture frames `1..=frame_count` from `sim`, in order
    ///
    /// Stops at the first failing frame. Frames written before the failure
    /// stay on disk.
    pub fn run<S>(&self, sim: &mut S, logger: &mut Logger) -> Result<RunSummary, RunError>
    where
        S: Simulation + ?Sized,
    {
        logger.info(format!(
            "Capturing {} frame(s) at {}x{} ({} cycles/frame) into {}",
            self.frame_count,
            self.timing.width(),
            self.timing.height(),
            self.timing.cycles_per_frame(),
            self.output.directory.display()
        ));

        if let Err(e) = fs::create_dir_all(&self.output.directory) {
            logger.error(format!(
                "Cannot create output directory {}: {}",
                self.output.directory.display(),
                e
            ));
            return Err(e.into());
        }

        let mut summary = RunSummary::default();

        for index in 1..=self.frame_count {
            let path = self.frame_path(index);

            let stats = match capture_frame(sim, &self.timing, &path, self.output.format) {
                Ok(stats) => stats,
                Err(source) => {
                    logger.error(format!("Frame {} ({}) failed: {}", index, path.display(), source));
                    return Err(RunError::Frame { index, source });
                }
            };

            logger.info(format!("Wrote {}", path.display()));
            logger.log_frame(FrameTrace {
                frame: index,
                cycles: stats.cycles,
                pixels: stats.pixels,
                path: path.clone(),
            });

            summary.frames.push(FrameRecord { index, path, stats });
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{LogLevel, TraceEntry};
    use crate::raster::ImageFormat;
    use crate::sim::PatternGenerator;
    use crate::timing::AxisTiming;

    fn small_timing() -> VideoTiming {
        VideoTiming::new(AxisTiming::new(4, 1, 1, 1), AxisTiming::new(2, 1, 1, 1))
    }

    fn temp_output(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("render_frames_runner_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_frame_path_naming() {
        let runner = FrameRunner::new(&HarnessConfig::default());
        assert_eq!(runner.frame_path(1), PathBuf::from("./frame1.ppm"));
        assert_eq!(runner.frame_path(5), PathBuf::from("./frame5.ppm"));
        assert_eq!(runner.frame_count(), 5);
        assert_eq!(*runner.timing(), VideoTiming::CVT_RB_800X600);
    }

    #[test]
    fn test_frame_path_extension_override() {
        let mut config = HarnessConfig::default();
        config.output.extension = Some("pgm".to_string());

        let runner = FrameRunner::new(&config);
        assert_eq!(runner.frame_path(3), PathBuf::from("./frame3.pgm"));
    }

    #[test]
    fn test_frame_count_ignores_config() {
        let config: HarnessConfig =
            toml::from_str("[output]\ndirectory = \"out\"\n").expect("Failed to parse config");
        let runner = FrameRunner::new(&config);
        assert_eq!(runner.frame_count(), FRAME_COUNT);
        assert_eq!(runner.with_frame_count(2).frame_count(), 2);
    }

    #[test]
    fn test_run_writes_frames_in_order() {
        let dir = temp_output("order");
        let mut config = HarnessConfig::default();
        config.output.directory = dir.clone();

        let runner = FrameRunner::new(&config)
            .with_timing(small_timing())
            .with_frame_count(3);
        let mut sim = PatternGenerator::new(small_timing());
        let mut logger = Logger::new();
        logger.set_log_level(LogLevel::Debug);
        logger.enable_frame_trace();

        let summary = runner.run(&mut sim, &mut logger).expect("run failed");
        let indices: Vec<u32> = summary.frames.iter().map(|f| f.index).collect();

        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(summary.total_cycles(), 3 * small_timing().cycles_per_frame());
        assert_eq!(sim.frame(), 3, "one model instance across all frames");
        for path in summary.paths() {
            assert!(path.exists(), "{} missing", path.display());
        }

        let traces = logger
            .records()
            .iter()
            .filter(|r| matches!(r.entry, TraceEntry::Frame(_)))
            .count();
        assert_eq!(traces, 3);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_frame_failure_reports_index() {
        let dir = temp_output("fail");
        let mut config = HarnessConfig::default();
        config.output.directory = dir.clone();
        config.output.format = ImageFormat::Ppm;

        // Occupy frame1.ppm's path with a directory so the file cannot be created
        fs::create_dir_all(dir.join("frame1.ppm")).expect("Failed to set up test dir");

        let runner = FrameRunner::new(&config)
            .with_timing(small_timing())
            .with_frame_count(2);
        let mut sim = PatternGenerator::new(small_timing());
        let mut logger = Logger::new();
        logger.set_log_level(LogLevel::Error);

        match runner.run(&mut sim, &mut logger) {
            Err(RunError::Frame { index, .. }) => assert_eq!(index, 1),
            other => panic!("Expected frame failure, got {:?}", other),
        }
        assert_eq!(logger.records().len(), 1);
        assert!(!dir.join("frame2.ppm").exists(), "run stops at first failure");

        let _ = fs::remove_dir_all(&dir);
    }
}
