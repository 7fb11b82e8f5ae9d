// Timing generator
//
// Walks the horizontal and vertical pixel counters of one video frame and
// classifies every position as visible or blanking.

pub mod constants;

use constants::*;
use std::ops::Range;

/// Region of a single axis a counter value falls in
///
/// Along an axis the order is: active, front porch, sync, back porch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisRegion {
    /// Visible pixels / lines
    Active,
    /// Blanking before the sync pulse
    FrontPorch,
    /// Sync pulse
    Sync,
    /// Blanking after the sync pulse
    BackPorch,
}

impl AxisRegion {
    /// `true` for every region except `Active`
    pub fn is_blank(self) -> bool {
        self != AxisRegion::Active
    }
}

/// Timing parameters for one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisTiming {
    /// Visible count
    pub active: u32,
    /// Front porch count
    pub front_porch: u32,
    /// Sync pulse count
    pub sync: u32,
    /// Back porch count
    pub back_porch: u32,
}

impl AxisTiming {
    /// Create axis timing from its four segments
    pub const fn new(active: u32, front_porch: u32, sync: u32, back_porch: u32) -> Self {
        AxisTiming {
            active,
            front_porch,
            sync,
            back_porch,
        }
    }

    /// Blanking interval (front porch + sync + back porch)
    pub const fn blank(&self) -> u32 {
        self.front_porch + self.sync + self.back_porch
    }

    /// Total count for the axis (active + blanking)
    pub const fn total(&self) -> u32 {
        self.active + self.blank()
    }

    /// A counter value is visible iff it lies below the active count
    #[inline]
    pub const fn is_visible(&self, x: u32) -> bool {
        x < self.active
    }

    /// Classify a counter value in `[0, total)`
    pub fn region(&self, x: u32) -> AxisRegion {
        debug_assert!(x < self.total(), "counter {} out of range", x);

        if x < self.active {
            AxisRegion::Active
        } else if x < self.active + self.front_porch {
            AxisRegion::FrontPorch
        } else if x < self.active + self.front_porch + self.sync {
            AxisRegion::Sync
        } else {
            AxisRegion::BackPorch
        }
    }

    /// Every counter value of the axis, in order
    ///
    /// The range is a fresh iterator on each call, so nested loops can restart it.
    pub fn counters(&self) -> Range<u32> {
        0..self.total()
    }
}

/// One position of the frame walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanPosition {
    /// Horizontal counter
    pub h: u32,
    /// Vertical counter
    pub v: u32,
    /// Visible on both axes
    pub visible: bool,
}

/// Full-frame video timing (both axes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoTiming {
    pub horizontal: AxisTiming,
    pub vertical: AxisTiming,
}

impl VideoTiming {
    /// 800x600 @ 60Hz CVT-RB
    pub const CVT_RB_800X600: VideoTiming = VideoTiming {
        horizontal: AxisTiming::new(H_PIXELS, H_FRONT_PORCH, H_SYNC, H_BACK_PORCH),
        vertical: AxisTiming::new(V_PIXELS, V_FRONT_PORCH, V_SYNC, V_BACK_PORCH),
    };

    pub const fn new(horizontal: AxisTiming, vertical: AxisTiming) -> Self {
        VideoTiming {
            horizontal,
            vertical,
        }
    }

    /// Visible width in pixels
    pub const fn width(&self) -> u32 {
        self.horizontal.active
    }

    /// Visible height in lines
    pub const fn height(&self) -> u32 {
        self.vertical.active
    }

    /// Number of pixels emitted per frame
    pub const fn pixels_per_frame(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Number of clock cycles per frame, blanking included
    pub const fn cycles_per_frame(&self) -> u64 {
        self.horizontal.total() as u64 * self.vertical.total() as u64
    }

    /// Visible on both axes
    #[inline]
    pub const fn is_visible(&self, h: u32, v: u32) -> bool {
        self.horizontal.is_visible(h) && self.vertical.is_visible(v)
    }

    /// Walk the whole frame in raster order
    ///
    /// Vertical counter is the outer loop, horizontal the inner one. Blanking
    /// positions are yielded too, flagged as not visible.
    pub fn positions(&self) -> impl Iterator<Item = ScanPosition> {
        let horizontal = self.horizontal;
        let vertical = self.vertical;

        vertical.counters().flat_map(move |v| {
            let line_visible = vertical.is_visible(v);
            horizontal.counters().map(move |h| ScanPosition {
                h,
                v,
                visible: line_visible && horizontal.is_visible(h),
            })
        })
    }
}

impl Default for VideoTiming {
    fn default() -> Self {
        VideoTiming::CVT_RB_800X600
    }
}
