use std::time::Duration;

use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};

use crate::engine::{ConceptMessage, FADE_AT, REMOVE_AT};

const FALLBACK_NODE_COLOR: Color32 = Color32::from_rgb(154, 165, 177);

pub(super) fn world_to_screen(rect: Rect, world: Pos2) -> Pos2 {
    rect.min + world.to_vec2()
}

pub(super) fn screen_to_world(rect: Rect, screen: Pos2) -> Pos2 {
    (screen - rect.min).to_pos2()
}

pub(super) fn node_color(hex: &str) -> Color32 {
    Color32::from_hex(hex.trim()).unwrap_or(FALLBACK_NODE_COLOR)
}

pub(super) fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    color.gamma_multiply(alpha.clamp(0.0, 1.0))
}

/// Opacity to draw with: eases from 1 to 0 across the fade window instead of
/// snapping when the message's opacity drops.
pub(super) fn message_alpha(message: &ConceptMessage, now: Duration) -> f32 {
    if message.opacity > 0.0 {
        return message.opacity.clamp(0.0, 1.0);
    }

    let elapsed = now.saturating_sub(message.created_at);
    let into_fade = elapsed.saturating_sub(FADE_AT).as_secs_f32();
    let fade_window = (REMOVE_AT - FADE_AT).as_secs_f32();
    (1.0 - into_fade / fade_window).clamp(0.0, 1.0)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = 56.0;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + step;
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + step;
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}
