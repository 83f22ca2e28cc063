//! Road geometry for the scrolling playfield.

use crate::consts::{
    EDGE_MARGIN, FIELD_HEIGHT, FIELD_WIDTH, LANE_COUNT, ROAD_LEFT_FRACTION, ROAD_RIGHT_FRACTION,
};

/// Fixed road layout: a vertical asphalt strip split into equal lanes.
///
/// Geometry never changes after construction. Edges are the inner faces of
/// the road borders; everything that drives stays between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayingField {
    /// Logical field width in pixels
    pub width: f32,
    /// Logical field height in pixels
    pub height: f32,
    /// X of the left road border
    pub left_edge: f32,
    /// X of the right road border
    pub right_edge: f32,
    /// Number of traffic lanes between the borders
    pub lane_count: u32,
}

impl PlayingField {
    pub fn new(width: f32, height: f32, left_edge: f32, right_edge: f32, lane_count: u32) -> Self {
        debug_assert!(left_edge < right_edge);
        debug_assert!(lane_count >= 1);
        Self {
            width,
            height,
            left_edge,
            right_edge,
            lane_count,
        }
    }

    /// Width of a single lane
    #[inline]
    pub fn lane_width(&self) -> f32 {
        (self.right_edge - self.left_edge) / self.lane_count as f32
    }

    /// X that centers an entity of the given width inside a lane
    #[inline]
    pub fn lane_x(&self, lane: u32, entity_width: f32) -> f32 {
        self.left_edge + lane as f32 * self.lane_width() + (self.lane_width() - entity_width) / 2.0
    }

    /// Horizontal center of the whole field
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Inclusive [min, max] range the player's left edge may occupy
    #[inline]
    pub fn steer_bounds(&self, entity_width: f32) -> (f32, f32) {
        (
            self.left_edge + EDGE_MARGIN,
            self.right_edge - entity_width - EDGE_MARGIN,
        )
    }
}

impl Default for PlayingField {
    /// The standard three-lane road on a 480x720 field
    fn default() -> Self {
        Self::new(
            FIELD_WIDTH,
            FIELD_HEIGHT,
            (FIELD_WIDTH * ROAD_LEFT_FRACTION).floor(),
            (FIELD_WIDTH * ROAD_RIGHT_FRACTION).floor(),
            LANE_COUNT,
        )
    }
}
