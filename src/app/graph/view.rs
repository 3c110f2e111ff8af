use std::time::Duration;

use eframe::egui::{self, Align2, Color32, FontId, Painter, Rect, Sense, Stroke, Ui, vec2};

use crate::engine::{MessagePhase, NODE_BOX, RENDER_ANCHOR};

use super::super::ThresholdsApp;
use super::super::render_utils::{
    draw_background, message_alpha, node_color, with_alpha, world_to_screen,
};

const NODE_RADIUS: f32 = NODE_BOX / 2.0 - 4.0;
const EDGE_COLOR: Color32 = Color32::from_rgb(100, 180, 255);
const HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(255, 214, 102);

impl ThresholdsApp {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect);

        self.handle_node_drag(rect, &response);

        let frame_delta = ui.input(|input| input.stable_dt).clamp(0.0, 0.25);
        for _ in 0..self.pacer.due_ticks(Duration::from_secs_f32(frame_delta)) {
            self.engine.advance_tick(rect.size());
        }
        self.engine.update_messages();

        self.update_hover(rect, response.hover_pos());

        self.draw_edges(&painter, rect);
        self.draw_nodes(&painter, rect);
        self.draw_messages(&painter, rect);
        self.draw_status(&painter, rect);
    }

    fn draw_edges(&self, painter: &Painter, rect: Rect) {
        let stroke = Stroke::new(2.0, with_alpha(EDGE_COLOR, 0.7));
        for edge in self.engine.edges() {
            painter.line_segment(
                [world_to_screen(rect, edge.from), world_to_screen(rect, edge.to)],
                stroke,
            );
        }
    }

    fn draw_nodes(&self, painter: &Painter, rect: Rect) {
        for (index, node) in self.engine.nodes().iter().enumerate() {
            let center = world_to_screen(rect, node.position + RENDER_ANCHOR);
            painter.circle_filled(center, NODE_RADIUS, node_color(&node.color));
            painter.text(
                center,
                Align2::CENTER_CENTER,
                &node.label,
                FontId::proportional(14.0),
                Color32::from_rgb(16, 18, 22),
            );

            if self.hovered != Some(index) {
                continue;
            }

            painter.circle_stroke(center, NODE_RADIUS + 3.0, Stroke::new(2.0, Color32::WHITE));
            if !node.concept.is_empty() {
                painter.text(
                    center + vec2(0.0, NODE_RADIUS + 14.0),
                    Align2::CENTER_TOP,
                    &node.concept,
                    FontId::proportional(13.0),
                    Color32::from_gray(220),
                );
            }
        }
    }

    fn draw_messages(&self, painter: &Painter, rect: Rect) {
        let now = self.engine.now();
        for message in self.engine.messages() {
            let alpha = message_alpha(message, now);
            if alpha <= 0.0 {
                continue;
            }

            let (font, text_color) = match message.phase {
                MessagePhase::Highlighted => (FontId::proportional(18.0), HIGHLIGHT_COLOR),
                MessagePhase::Resting | MessagePhase::Fading => {
                    (FontId::proportional(15.0), Color32::WHITE)
                }
            };

            let galley =
                painter.layout_no_wrap(message.text.clone(), font, with_alpha(text_color, alpha));
            let center = world_to_screen(rect, message.anchor + RENDER_ANCHOR);
            let frame = Align2::CENTER_CENTER
                .anchor_size(center, galley.size())
                .expand(6.0);

            painter.rect_filled(
                frame,
                6.0,
                with_alpha(Color32::from_rgba_unmultiplied(12, 14, 18, 210), alpha),
            );
            if message.highlight {
                painter.rect_stroke(
                    frame,
                    6.0,
                    Stroke::new(1.5, with_alpha(HIGHLIGHT_COLOR, alpha)),
                    egui::StrokeKind::Outside,
                );
            }
            painter.galley(frame.min + vec2(6.0, 6.0), galley, text_color);
        }
    }

    fn draw_status(&self, painter: &Painter, rect: Rect) {
        let linked_groups = self
            .engine
            .groups()
            .iter()
            .filter(|group| group.members.len() > 1)
            .count();
        let status = format!(
            "tick {} | {} edges | {} linked groups | {} pairs | {} messages | {} pending",
            self.engine.tick_count(),
            self.engine.edges().len(),
            linked_groups,
            self.engine.active_pairs().len(),
            self.engine.messages().len(),
            self.engine.pending_transitions(),
        );
        painter.text(
            rect.left_top() + vec2(10.0, 8.0),
            Align2::LEFT_TOP,
            status,
            FontId::monospace(12.0),
            Color32::from_gray(150),
        );
    }
}
