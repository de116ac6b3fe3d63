use std::time::Instant;

use eframe::egui::{self, Align, Context, Layout, Pos2};

use crate::atlas::KnowledgeGraph;
use crate::engine::{Engine, Repaint, SimulationState};

mod ui;
mod viewport;

use viewport::ScreenScene;

pub struct AtlasApp {
    engine: Engine,
    scene: ScreenScene,
    started_at: Instant,
    pointer_press: Option<Pos2>,
    search: String,
    search_results: Vec<String>,
}

impl AtlasApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, graph: KnowledgeGraph) -> Self {
        let started_at = Instant::now();
        let mut scene = ScreenScene::default();
        let engine = Engine::new(graph, &mut scene, 0.0);

        Self {
            engine,
            scene,
            started_at,
            pointer_press: None,
            search: String::new(),
            search_results: Vec::new(),
        }
    }

    fn now_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    fn simulation_label(&self) -> &'static str {
        match self.engine.simulation_state() {
            SimulationState::Stopped => "stopped",
            SimulationState::Active => "running",
            SimulationState::Paused => "settled",
        }
    }
}

impl eframe::App for AtlasApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("math-atlas");
                    ui.separator();
                    ui.label(format!("entities: {}", self.engine.graph().entity_count()));
                    ui.label(format!("relations: {}", self.engine.graph().relations.len()));
                    ui.label(format!("layout: {}", self.engine.layout().label()));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!("simulation: {}", self.simulation_label()));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_viewport(ui));

        match self.engine.advance(self.now_secs(), &mut self.scene) {
            Repaint::Immediate => ctx.request_repaint(),
            Repaint::After(delay) => ctx.request_repaint_after(delay),
            Repaint::Idle => {}
        }
    }
}
