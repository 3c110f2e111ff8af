use eframe::egui::Pos2;

/// Nodes strictly closer than this are connected.
pub const THRESHOLD: f32 = 200.0;

pub fn distance(a: Pos2, b: Pos2) -> f32 {
    a.distance(b)
}

pub fn connected(a: Pos2, b: Pos2) -> bool {
    distance(a, b) < THRESHOLD
}
