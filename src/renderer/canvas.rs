//! Canvas 2D scene renderer

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{
    BORDER_COLOR, BORDER_WIDTH, GRASS_COLOR, LANE_DASH, LANE_LINE_COLOR, PICKUP_COLOR,
    PICKUP_GLYPH_COLOR, PLAYER_COLOR, ROAD_COLOR, ROAD_SHOULDER, Renderer, marker_scroll,
};
use crate::sim::{GameState, Obstacle, Pickup, Player, PlayingField};

/// Draws the scene onto a fixed-resolution 2d context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    fn draw_road(&self, field: &PlayingField, frame: u64) {
        let ctx = &self.ctx;
        let (w, h) = (field.width as f64, field.height as f64);
        let left = field.left_edge as f64;
        let right = field.right_edge as f64;

        // Asphalt, a little wider than the drivable strip
        ctx.set_fill_style_str(ROAD_COLOR);
        ctx.fill_rect(left - ROAD_SHOULDER, 0.0, right - left + ROAD_SHOULDER * 2.0, h);

        // Grass on both sides
        ctx.set_fill_style_str(GRASS_COLOR);
        ctx.fill_rect(0.0, 0.0, left - ROAD_SHOULDER, h);
        ctx.fill_rect(right + ROAD_SHOULDER, 0.0, w, h);

        // Scrolling dashed lane separators
        ctx.set_stroke_style_str(LANE_LINE_COLOR);
        ctx.set_line_width(4.0);
        let dash = js_sys::Array::of2(
            &JsValue::from_f64(LANE_DASH[0]),
            &JsValue::from_f64(LANE_DASH[1]),
        );
        let _ = ctx.set_line_dash(&dash);
        let lane_w = field.lane_width() as f64;
        for i in 1..field.lane_count {
            let lx = left + i as f64 * lane_w;
            ctx.begin_path();
            ctx.move_to(lx, -marker_scroll(frame));
            ctx.line_to(lx, h + 40.0);
            ctx.stroke();
        }
        let _ = ctx.set_line_dash(&js_sys::Array::new());

        // Border edges
        ctx.set_fill_style_str(BORDER_COLOR);
        ctx.fill_rect(left - BORDER_WIDTH, 0.0, BORDER_WIDTH, h);
        ctx.fill_rect(right, 0.0, BORDER_WIDTH, h);
    }

    fn draw_player(&self, player: &Player) {
        let ctx = &self.ctx;
        let (x, y) = (player.pos.x as f64, player.pos.y as f64);
        let (w, h) = (player.size.x as f64, player.size.y as f64);

        ctx.set_fill_style_str(PLAYER_COLOR);
        ctx.fill_rect(x, y, w, h);
        // Cabin
        ctx.set_fill_style_str("#0b1224");
        ctx.fill_rect(x + 6.0, y + 10.0, w - 12.0, h - 32.0);
        // Wheels
        ctx.set_fill_style_str("#111");
        ctx.fill_rect(x + 6.0, y + h - 12.0, 14.0, 8.0);
        ctx.fill_rect(x + w - 20.0, y + h - 12.0, 14.0, 8.0);
    }

    fn draw_obstacles(&self, obstacles: &[Obstacle]) {
        let ctx = &self.ctx;
        for o in obstacles {
            let (x, y) = (o.pos.x as f64, o.pos.y as f64);
            let (w, h) = (o.size.x as f64, o.size.y as f64);
            ctx.set_fill_style_str(o.color);
            ctx.fill_rect(x, y, w, h);
            // Windshield strip
            ctx.set_fill_style_str("#111");
            ctx.fill_rect(x + 6.0, y + 6.0, w - 12.0, 18.0);
        }
    }

    fn draw_pickups(&self, pickups: &[Pickup]) {
        let ctx = &self.ctx;
        for p in pickups {
            let cx = (p.pos.x + p.size / 2.0) as f64;
            let cy = (p.pos.y + p.size / 2.0) as f64;
            ctx.set_fill_style_str(PICKUP_COLOR);
            ctx.begin_path();
            let _ = ctx.arc(cx, cy, p.size as f64 / 2.0, 0.0, std::f64::consts::TAU);
            ctx.fill();
            ctx.set_fill_style_str(PICKUP_GLYPH_COLOR);
            ctx.set_font("bold 14px Arial");
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            let _ = ctx.fill_text("⛽", cx, cy);
        }
    }
}

impl Renderer for CanvasRenderer {
    fn draw_frame(&mut self, state: &GameState, field: &PlayingField) {
        self.ctx
            .clear_rect(0.0, 0.0, field.width as f64, field.height as f64);
        self.draw_road(field, state.frame);
        self.draw_pickups(&state.pickups);
        self.draw_obstacles(&state.obstacles);
        self.draw_player(&state.player);
    }
}
