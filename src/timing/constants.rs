// Video timing constants
//
// 800x600 @ 60Hz, CVT reduced blanking.

// ========================================
// Horizontal (pixels per line)
// ========================================

/// Visible pixels per line
pub const H_PIXELS: u32 = 800;

/// Horizontal front porch
pub const H_FRONT_PORCH: u32 = 48;

/// Horizontal sync pulse width
pub const H_SYNC: u32 = 32;

/// Horizontal back porch
pub const H_BACK_PORCH: u32 = 80;

/// Horizontal blanking interval (front porch + sync + back porch)
pub const H_BLANK: u32 = H_FRONT_PORCH + H_SYNC + H_BACK_PORCH;

/// Total pixel clocks per line (960)
pub const H_TOTAL: u32 = H_PIXELS + H_BLANK;

// ========================================
// Vertical (lines per frame)
// ========================================

/// Visible lines per frame
pub const V_PIXELS: u32 = 600;

/// Vertical front porch
pub const V_FRONT_PORCH: u32 = 3;

/// Vertical sync pulse width
pub const V_SYNC: u32 = 4;

/// Vertical back porch
pub const V_BACK_PORCH: u32 = 11;

/// Vertical blanking interval (front porch + sync + back porch)
pub const V_BLANK: u32 = V_FRONT_PORCH + V_SYNC + V_BACK_PORCH;

/// Total lines per frame (618)
pub const V_TOTAL: u32 = V_PIXELS + V_BLANK;

/// Pixel clocks per frame
/// 960 clocks/line × 618 lines = 593,280 clocks
pub const CYCLES_PER_FRAME: u64 = (H_TOTAL as u64) * (V_TOTAL as u64);

/// Number of frames captured per run
pub const FRAME_COUNT: u32 = 5;
