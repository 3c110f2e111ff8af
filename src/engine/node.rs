use eframe::egui::{Pos2, Vec2, pos2, vec2};

use crate::concepts::NodeSeed;

/// Side length of the square box each node occupies on the canvas.
pub const NODE_BOX: f32 = 80.0;

#[derive(Clone, Debug)]
pub struct Node {
    pub label: String,
    pub position: Pos2,
    pub velocity: Vec2,
    pub color: String,
    pub concept: String,
}

impl Node {
    pub fn from_seed(seed: &NodeSeed) -> Self {
        Self {
            label: seed.label.trim().to_owned(),
            position: pos2(seed.x, seed.y),
            velocity: vec2(seed.dx, seed.dy),
            color: seed.color.clone(),
            concept: seed.concept.clone(),
        }
    }

    /// One unit step, flipping each axis heading out of `[0, extent - NODE_BOX]`.
    pub(super) fn advance(&mut self, bounds: Vec2) {
        self.position += self.velocity;
        self.velocity.x = bounce(self.position.x, self.velocity.x, bounds.x - NODE_BOX);
        self.velocity.y = bounce(self.position.y, self.velocity.y, bounds.y - NODE_BOX);
    }

    pub fn contains(&self, point: Pos2) -> bool {
        let offset = point - self.position;
        (0.0..=NODE_BOX).contains(&offset.x) && (0.0..=NODE_BOX).contains(&offset.y)
    }
}

fn bounce(position: f32, velocity: f32, max: f32) -> f32 {
    if (position < 0.0 && velocity < 0.0) || (position > max && velocity > 0.0) {
        -velocity
    } else {
        velocity
    }
}
