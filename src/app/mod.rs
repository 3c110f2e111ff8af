use std::time::Duration;

use eframe::egui::{self, Context, Vec2};

use crate::concepts::Dataset;
use crate::engine::{GroupingEngine, MonotonicClock};

mod graph;
mod pacer;
mod render_utils;

use pacer::TickPacer;

const MAX_TICKS_PER_FRAME: u32 = 4;

pub struct ThresholdsApp {
    engine: GroupingEngine,
    pacer: TickPacer,
    drag: Option<DragState>,
    hovered: Option<usize>,
}

/// Node being dragged and where the pointer grabbed it, relative to its origin.
#[derive(Clone, Copy, Debug)]
struct DragState {
    index: usize,
    grab_offset: Vec2,
}

impl ThresholdsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dataset: &Dataset, tick_interval: Duration) -> Self {
        Self {
            engine: GroupingEngine::new(dataset, MonotonicClock::default()),
            pacer: TickPacer::new(tick_interval, MAX_TICKS_PER_FRAME),
            drag: None,
            hovered: None,
        }
    }
}

impl eframe::App for ThresholdsApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| self.draw_graph(ui));

        ctx.request_repaint();
    }
}
