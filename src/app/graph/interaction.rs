use eframe::egui::{self, PointerButton, Pos2, Rect, Vec2};

use super::super::render_utils::screen_to_world;
use super::super::{DragState, ThresholdsApp};

impl ThresholdsApp {
    pub(in crate::app) fn handle_node_drag(&mut self, rect: Rect, response: &egui::Response) {
        if response.drag_started_by(PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let world = screen_to_world(rect, pointer);
            self.drag = self.engine.node_at(world).map(|index| DragState {
                index,
                grab_offset: world - self.engine.nodes()[index].position,
            });
        }

        if let Some(drag) = self.drag
            && response.dragged_by(PointerButton::Primary)
            && response.drag_delta() != Vec2::ZERO
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let world = screen_to_world(rect, pointer);
            self.engine.drag_node(drag.index, world - drag.grab_offset);
        }

        if response.drag_stopped() {
            self.drag = None;
        }
    }

    pub(in crate::app) fn update_hover(&mut self, rect: Rect, pointer: Option<Pos2>) {
        self.hovered = match self.drag {
            Some(drag) => Some(drag.index),
            None => pointer.and_then(|pointer| self.engine.node_at(screen_to_world(rect, pointer))),
        };
    }
}
