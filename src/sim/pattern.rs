// Pattern generator
//
// A small cycle-level display controller used when no external model is
// plugged in. It latches on the rising edge of `clk`, keeps its own pixel,
// line and frame counters, and drives color bars over a gradient band. The
// bars scroll by a fixed step every frame.

use super::Simulation;
use crate::raster::Rgb;
use crate::timing::{AxisRegion, VideoTiming};

/// Color bars, left to right
const BARS: [Rgb; 8] = [
    Rgb::new(255, 255, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 255, 255),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 0, 255),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(0, 0, 0),
];

/// Horizontal scroll per frame, in pixels
const SCROLL_STEP: u32 = 16;

/// Stand-in display controller with registered RGB and sync outputs
#[derive(Debug, Clone)]
pub struct PatternGenerator {
    timing: VideoTiming,

    /// Clock input as last driven
    clk: bool,
    /// Clock level seen by the previous evaluation
    clk_prev: bool,

    h: u32,
    v: u32,
    frame: u32,

    red: u8,
    green: u8,
    blue: u8,
    hsync: bool,
    vsync: bool,
}

impl PatternGenerator {
    /// Create a generator in its power-on state (counters at zero, outputs black)
    pub fn new(timing: VideoTiming) -> Self {
        PatternGenerator {
            timing,
            clk: false,
            clk_prev: false,
            h: 0,
            v: 0,
            frame: 0,
            red: 0,
            green: 0,
            blue: 0,
            hsync: false,
            vsync: false,
        }
    }

    /// Timing the generator was built for
    pub fn timing(&self) -> &VideoTiming {
        &self.timing
    }

    /// Frames completed since power-on
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Position the next rising edge will output, as (h, v)
    pub fn position(&self) -> (u32, u32) {
        (self.h, self.v)
    }

    /// Horizontal sync output
    pub fn hsync(&self) -> bool {
        self.hsync
    }

    /// Vertical sync output
    pub fn vsync(&self) -> bool {
        self.vsync
    }

    /// Color the generator drives for a visible position in a given frame
    pub fn color_at(&self, h: u32, v: u32, frame: u32) -> Rgb {
        let width = self.timing.width();
        let height = self.timing.height();

        if v < height - height / 3 {
            let x = h.wrapping_add(frame.wrapping_mul(SCROLL_STEP)) % width;
            BARS[(x as usize * BARS.len()) / width as usize]
        } else {
            Rgb::new(
                (h * 255 / width) as u8,
                (v * 255 / height) as u8,
                (frame as u8).wrapping_mul(32),
            )
        }
    }

    fn rising_edge(&mut self) {
        let color = if self.timing.is_visible(self.h, self.v) {
            self.color_at(self.h, self.v, self.frame)
        } else {
            Rgb::BLACK
        };

        self.red = color.r;
        self.green = color.g;
        self.blue = color.b;
        self.hsync = self.timing.horizontal.region(self.h) == AxisRegion::Sync;
        self.vsync = self.timing.vertical.region(self.v) == AxisRegion::Sync;

        self.h += 1;
        if self.h == self.timing.horizontal.total() {
            self.h = 0;
            self.v += 1;
            if self.v == self.timing.vertical.total() {
                self.v = 0;
                self.frame = self.frame.wrapping_add(1);
            }
        }
    }
}

impl Default for PatternGenerator {
    fn default() -> Self {
        Self::new(VideoTiming::CVT_RB_800X600)
    }
}

impl Simulation for PatternGenerator {
    fn set_clk(&mut self, level: bool) {
        self.clk = level;
    }

    fn eval(&mut self) {
        if self.clk && !self.clk_prev {
            self.rising_edge();
        }
        self.clk_prev = self.clk;
    }

    fn red(&self) -> u8 {
        self.red
    }

    fn green(&self) -> u8 {
        self.green
    }

    fn blue(&self) -> u8 {
        self.blue
    }
}
