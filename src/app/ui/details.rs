use eframe::egui::{RichText, Ui};

use crate::engine::Intent;

use super::super::AtlasApp;

impl AtlasApp {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let Some(selected_id) = self.engine.selected_id().map(str::to_string) else {
            ui.label("Select an entity in the graph, or pick a search result.");
            return;
        };

        let Some(entity) = self.engine.graph().entity(&selected_id).cloned() else {
            ui.label("Selected entity no longer exists in the graph.");
            return;
        };

        let detail = self.engine.selected_detail();

        if let Some(detail) = &detail {
            ui.label(RichText::new(detail.title.as_str()).strong());
        } else {
            ui.label(RichText::new(entity.label.as_str()).strong());
        }
        ui.small(format!(
            "{}  |  level {}  |  weight {:.1}  |  {} connections",
            entity.kind.label(),
            entity.level,
            entity.size,
            entity.connection_count
        ));
        ui.add_space(6.0);

        if let Some(detail) = &detail {
            ui.label(detail.statement.as_str());
            if !detail.discussion.is_empty() {
                ui.add_space(4.0);
                ui.label(RichText::new(detail.discussion.as_str()).italics());
            }
        }

        if !entity.tags.is_empty() {
            ui.add_space(6.0);
            ui.small(format!("tags: {}", entity.tags.join(", ")));
        }

        ui.separator();
        ui.label(RichText::new("Relations").strong());

        // Every relation touching the selection, duplicates included.
        let graph = self.engine.graph();
        let entries = graph
            .relations
            .iter()
            .filter_map(|relation| {
                let (other_id, outgoing) = if relation.source_id == selected_id {
                    (&relation.target_id, true)
                } else if relation.target_id == selected_id {
                    (&relation.source_id, false)
                } else {
                    return None;
                };

                let other = graph.entity(other_id)?;
                let label = if outgoing {
                    format!("{} -> {}", relation.kind.label(), other.label)
                } else {
                    format!("{} <- {}", relation.kind.label(), other.label)
                };
                Some((other.id.clone(), label))
            })
            .collect::<Vec<_>>();

        if entries.is_empty() {
            ui.label("No recorded relations touch this entity.");
            return;
        }

        let now = self.now_secs();
        for (id, label) in entries {
            if ui.link(label).clicked() {
                self.engine.apply(Intent::Select(id), now, &mut self.scene);
            }
        }
    }
}
