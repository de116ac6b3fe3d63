use eframe::egui::{self, Ui};

use crate::engine::{ClusterKey, Intent, IntentOutcome, LayoutKind, Orientation, SimulationState};

use super::super::AtlasApp;

const LAYOUT_CHOICES: [LayoutKind; 8] = [
    LayoutKind::ForceDirected,
    LayoutKind::Hierarchical(Orientation::Vertical),
    LayoutKind::Hierarchical(Orientation::Horizontal),
    LayoutKind::Radial,
    LayoutKind::Concentric,
    LayoutKind::Clustered(ClusterKey::Kind),
    LayoutKind::Clustered(ClusterKey::FirstTag),
    LayoutKind::Clustered(ClusterKey::Level),
];

impl AtlasApp {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        let now = self.now_secs();

        ui.heading("Atlas Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search (label, statement, or tag)");
        let search_response = ui.text_edit_singleline(&mut self.search);
        if search_response.changed() {
            let query = self.search.clone();
            self.search_results =
                match self
                    .engine
                    .apply(Intent::Search(query), now, &mut self.scene)
                {
                    IntentOutcome::SearchResults(ids) => ids,
                    IntentOutcome::Done => Vec::new(),
                };
        }

        if !self.search.trim().is_empty() {
            if self.search_results.is_empty() {
                ui.small("No matches.");
            } else {
                let matches = self
                    .search_results
                    .iter()
                    .filter_map(|id| {
                        self.engine
                            .graph()
                            .entity(id)
                            .map(|entity| (id.clone(), entity.label.clone()))
                    })
                    .collect::<Vec<_>>();

                egui::ScrollArea::vertical()
                    .id_salt("search_results")
                    .max_height(140.0)
                    .show(ui, |ui| {
                        for (id, label) in matches {
                            if ui.link(label).clicked() {
                                self.engine.apply(Intent::Select(id), now, &mut self.scene);
                            }
                        }
                    });
            }
        }

        ui.separator();

        ui.label("Layout");
        let current_layout = self.engine.layout();
        for layout in LAYOUT_CHOICES {
            if ui
                .selectable_label(current_layout == layout, layout.label())
                .clicked()
                && current_layout != layout
            {
                self.engine
                    .apply(Intent::SwitchLayout(layout), now, &mut self.scene);
            }
        }

        ui.separator();

        ui.label("Minimum node spacing");
        let mut spacing = self.engine.min_node_distance();
        if ui
            .add(egui::Slider::new(&mut spacing, 5.0..=120.0))
            .changed()
        {
            self.engine
                .apply(Intent::SetMinNodeDistance(spacing), now, &mut self.scene);
        }

        ui.add_space(6.0);

        let state = self.engine.simulation_state();
        ui.horizontal(|ui| {
            match state {
                SimulationState::Stopped => {
                    if ui.button("Start simulation").clicked() {
                        self.engine
                            .apply(Intent::StartSimulation, now, &mut self.scene);
                    }
                }
                SimulationState::Active | SimulationState::Paused => {
                    if ui.button("Stop simulation").clicked() {
                        self.engine
                            .apply(Intent::StopSimulation, now, &mut self.scene);
                    }
                }
            }

            let forces_label = if state == SimulationState::Active {
                "Pause forces"
            } else {
                "Resume forces"
            };
            if ui
                .add_enabled(
                    state != SimulationState::Stopped,
                    egui::Button::new(forces_label),
                )
                .clicked()
            {
                self.engine
                    .apply(Intent::ToggleForces, now, &mut self.scene);
            }
        });

        let mut auto_rotate = self.engine.auto_rotate();
        if ui.checkbox(&mut auto_rotate, "Auto-rotate camera").changed() {
            self.engine
                .apply(Intent::ToggleAutoRotate, now, &mut self.scene);
        }

        let mut flat = self.engine.is_two_d();
        if ui.checkbox(&mut flat, "Flatten to plane").changed() {
            self.engine.apply(Intent::Toggle2d, now, &mut self.scene);
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("Reset camera").clicked() {
                self.engine.apply(Intent::ResetCamera, now, &mut self.scene);
            }
            if ui.button("Reset positions").clicked() {
                self.engine
                    .apply(Intent::ResetPositions, now, &mut self.scene);
            }
        });

        if ui.button("Clear selection").clicked() {
            self.engine
                .apply(Intent::ClearSelection, now, &mut self.scene);
        }

        ui.add_space(10.0);
        ui.small("Drag to orbit, right-drag to pan, scroll to zoom.");
        ui.small("Arrow keys walk the selection to the nearest neighbor.");
    }
}
