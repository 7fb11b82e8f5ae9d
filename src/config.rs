// Configuration management
//
// Output location, image format, and logging settings. Every field has a
// default, and a missing config file means "use the defaults": frame1.ppm ..
// frame5.ppm in the working directory. The frame count and the video timing
// are fixed and cannot be set from a file.

use crate::logger::LogLevel;
use crate::raster::ImageFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default configuration file path
pub const CONFIG_FILE: &str = "render_frames.toml";

/// Harness configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the frames are written to
    pub directory: PathBuf,

    /// File name prefix; the frame index and extension are appended
    pub file_prefix: String,

    /// Image format
    pub format: ImageFormat,

    /// File extension override (e.g. `pgm`); defaults to the format's own
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Optional log file
    pub log_file: Option<PathBuf>,

    /// Record a trace entry per frame (needs level `debug`)
    pub frame_trace: bool,

    /// Mirror log lines to stderr
    pub stderr: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            directory: PathBuf::from("."),
            file_prefix: "frame".to_string(),
            format: ImageFormat::Ppm,
            extension: None,
        }
    }
}

impl OutputConfig {
    /// Extension appended to every frame file name
    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or(self.format.extension())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: LogLevel::Info,
            log_file: None,
            frame_trace: false,
            stderr: true,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from a file, or the defaults if there is no file
    ///
    /// Only a missing file falls back to defaults; a file that cannot be read
    /// or parsed is an error. Unlike [`HarnessConfig::save`], this never
    /// writes anything: a run without a config file produces only the frame
    /// images.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        match Self::load(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            result => result,
        }
    }

    /// Load configuration from a file
    ///
    /// A file that is not valid TOML for this schema is reported as
    /// `InvalidData`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save configuration to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), io::Error> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)
    }
}
