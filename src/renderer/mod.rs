//! Canvas rendering module
//!
//! Draws the road scene from a read-only view of the simulation. Nothing
//! in here may mutate game state.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::sim::{GameState, PlayingField};

/// Scene palette; obstacle bodies carry their own color
pub const ROAD_COLOR: &str = "#2b2b2b";
pub const GRASS_COLOR: &str = "#0b6623";
pub const BORDER_COLOR: &str = "#111827";
pub const LANE_LINE_COLOR: &str = "#ffffff";
pub const PLAYER_COLOR: &str = "#0ea5a4";
pub const PICKUP_COLOR: &str = "#10b981";
pub const PICKUP_GLYPH_COLOR: &str = "#063";

/// Asphalt drawn this far past the borders on both sides
pub const ROAD_SHOULDER: f64 = 20.0;
pub const BORDER_WIDTH: f64 = 12.0;

/// Dash pattern of the lane separators
pub const LANE_DASH: [f64; 2] = [20.0, 18.0];

/// Vertical scroll offset of the dashed lane lines for a frame.
/// Wraps at the dash period so the road appears to flow continuously.
#[inline]
pub fn marker_scroll(frame: u64) -> f64 {
    (frame * 5 % 38) as f64
}

/// Something that can draw one frame of the scene
pub trait Renderer {
    fn draw_frame(&mut self, state: &GameState, field: &PlayingField);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_scroll_wraps_at_dash_period() {
        assert_eq!(marker_scroll(0), 0.0);
        assert_eq!(marker_scroll(1), 5.0);
        assert_eq!(marker_scroll(7), 35.0);
        // 8 * 5 = 40 wraps to 2
        assert_eq!(marker_scroll(8), 2.0);
        for frame in 0..1000 {
            assert!(marker_scroll(frame) < 38.0);
        }
    }
}
