use std::collections::HashMap;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui};
use glam::Vec3;

use crate::atlas::EntityKind;
use crate::engine::{
    Engine, HighlightTier, Intent, LineClass, PickHit, PickRay, RenderSurface, VisualHandle,
    VisualShape, VisualStyle, ray_sphere_distance,
};

use super::AtlasApp;

const NEAR_PLANE: f32 = 1.0;

struct SphereVisual {
    center: Vec3,
    radius: f32,
    style: VisualStyle,
}

struct LineVisual {
    start: Vec3,
    end: Vec3,
    style: VisualStyle,
}

#[derive(Default)]
pub struct ScreenScene {
    next_handle: u64,
    spheres: HashMap<VisualHandle, SphereVisual>,
    lines: HashMap<VisualHandle, LineVisual>,
}

impl RenderSurface for ScreenScene {
    fn add_visual(
        &mut self,
        shape: VisualShape,
        position: Vec3,
        style: VisualStyle,
    ) -> VisualHandle {
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;

        match shape {
            VisualShape::Sphere { radius } => {
                self.spheres.insert(
                    handle,
                    SphereVisual {
                        center: position,
                        radius,
                        style,
                    },
                );
            }
            VisualShape::Line => {
                self.lines.insert(
                    handle,
                    LineVisual {
                        start: position,
                        end: position,
                        style,
                    },
                );
            }
        }
        handle
    }

    fn remove_visual(&mut self, handle: VisualHandle) {
        self.spheres.remove(&handle);
        self.lines.remove(&handle);
    }

    fn set_transform(&mut self, handle: VisualHandle, position: Vec3) {
        if let Some(sphere) = self.spheres.get_mut(&handle) {
            sphere.center = position;
        }
    }

    fn set_endpoints(&mut self, handle: VisualHandle, start: Vec3, end: Vec3) {
        if let Some(line) = self.lines.get_mut(&handle) {
            line.start = start;
            line.end = end;
        }
    }

    fn set_style(&mut self, handle: VisualHandle, style: VisualStyle) {
        if let Some(sphere) = self.spheres.get_mut(&handle) {
            sphere.style = style;
        } else if let Some(line) = self.lines.get_mut(&handle) {
            line.style = style;
        }
    }

    fn pick(&self, ray: PickRay) -> Vec<PickHit> {
        let mut hits = self
            .spheres
            .iter()
            .filter_map(|(&handle, sphere)| {
                ray_sphere_distance(ray, sphere.center, sphere.radius.max(4.0))
                    .map(|distance| PickHit { handle, distance })
            })
            .collect::<Vec<_>>();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

struct Projector {
    eye: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    center: Pos2,
    focal: f32,
}

impl Projector {
    fn new(engine: &Engine, rect: Rect) -> Self {
        let camera = engine.camera();
        let (forward, right, up) = camera.basis();
        Self {
            eye: camera.eye(),
            forward,
            right,
            up,
            center: rect.center(),
            focal: rect.height().max(1.0),
        }
    }

    fn project(&self, world: Vec3) -> Option<(Pos2, f32)> {
        let offset = world - self.eye;
        let depth = offset.dot(self.forward);
        if depth <= NEAR_PLANE {
            return None;
        }

        let scale = self.focal / depth;
        let x = offset.dot(self.right) * scale;
        let y = offset.dot(self.up) * scale;
        Some((self.center + egui::vec2(x, -y), depth))
    }

    fn pointer_ray(&self, pointer: Pos2) -> PickRay {
        let dx = (pointer.x - self.center.x) / self.focal;
        let dy = (pointer.y - self.center.y) / self.focal;
        let direction = (self.forward + self.right * dx - self.up * dy).normalize();
        PickRay {
            origin: self.eye,
            direction,
        }
    }
}

fn kind_color(kind: EntityKind) -> Color32 {
    match kind {
        EntityKind::Axiom => Color32::from_rgb(222, 106, 96),
        EntityKind::Definition => Color32::from_rgb(104, 156, 230),
        EntityKind::Lemma => Color32::from_rgb(118, 190, 122),
        EntityKind::Theorem => Color32::from_rgb(214, 172, 90),
        EntityKind::Corollary => Color32::from_rgb(156, 130, 214),
    }
}

fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgb(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
    )
}

fn node_color(style: VisualStyle, selection_active: bool) -> Color32 {
    let VisualStyle::Node { kind, tier } = style else {
        return Color32::GRAY;
    };

    let base = kind_color(kind);
    match tier {
        HighlightTier::Selected => Color32::from_rgb(245, 206, 93),
        HighlightTier::Related => Color32::from_rgb(241, 146, 94),
        HighlightTier::Default if selection_active => dim_color(base, 0.45),
        HighlightTier::Default => base,
    }
}

fn edge_stroke(style: VisualStyle) -> Stroke {
    let VisualStyle::Edge { class, emphasized } = style else {
        return Stroke::new(1.0, Color32::DARK_GRAY);
    };

    let color = match class {
        LineClass::DependsOn => Color32::from_rgba_unmultiplied(120, 130, 146, 150),
        LineClass::Proves => Color32::from_rgba_unmultiplied(118, 190, 122, 150),
        LineClass::Generalizes => Color32::from_rgba_unmultiplied(156, 130, 214, 150),
        LineClass::Other => Color32::from_rgba_unmultiplied(96, 96, 96, 120),
    };

    if emphasized {
        Stroke::new(2.4, Color32::from_rgb(246, 206, 104))
    } else {
        Stroke::new(1.2, color)
    }
}

impl AtlasApp {
    pub(super) fn draw_viewport(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        painter.rect_filled(rect, 0.0, Color32::from_rgb(16, 19, 26));

        if ui.input(|input| input.pointer.any_pressed())
            && let Some(pos) = ui.input(|input| input.pointer.interact_pos())
        {
            self.pointer_press = Some(pos);
        }

        if response.hovered() {
            let scroll = ui.input(|input| input.raw_scroll_delta.y);
            if scroll.abs() > f32::EPSILON {
                self.engine.zoom_camera(scroll * 0.35);
            }
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            self.engine.rotate_camera(delta.x, -delta.y);
        }
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            let delta = response.drag_delta();
            self.engine.pan_camera(delta.x, delta.y);
        }

        let projector = Projector::new(&self.engine, rect);

        if response.clicked_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let drag_distance = self
                .pointer_press
                .map(|press| (pointer - press).length())
                .unwrap_or(0.0);
            let ray = projector.pointer_ray(pointer);
            self.engine.click(ray, true, drag_distance, &mut self.scene);
        }

        self.handle_directional_keys(ui);

        for line in self.scene.lines.values() {
            if let (Some((start, _)), Some((end, _))) =
                (projector.project(line.start), projector.project(line.end))
            {
                painter.line_segment([start, end], edge_stroke(line.style));
            }
        }

        let selection_active = self.engine.selected_id().is_some();
        let mut drawn = self
            .scene
            .spheres
            .values()
            .filter_map(|sphere| {
                projector.project(sphere.center).map(|(pos, depth)| {
                    let radius = (sphere.radius * projector.focal / depth).clamp(2.0, 40.0);
                    (pos, depth, radius, sphere.style)
                })
            })
            .collect::<Vec<_>>();
        drawn.sort_by(|a, b| b.1.total_cmp(&a.1));

        for &(pos, _depth, radius, style) in &drawn {
            let color = node_color(style, selection_active);
            painter.circle_filled(pos, radius, color);
            painter.circle_stroke(
                pos,
                radius,
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(12, 12, 12, 190)),
            );

            if let VisualStyle::Node {
                tier: HighlightTier::Selected,
                ..
            } = style
            {
                painter.circle_stroke(
                    pos,
                    radius + 4.0,
                    Stroke::new(1.6, Color32::from_rgba_unmultiplied(245, 206, 93, 170)),
                );
            }
        }

        self.draw_labels(&painter, &projector);

        // A degenerate projection is the closest thing this surface has to a
        // failed draw call; the scheduler backs off if it keeps happening.
        let projection_ok = drawn
            .iter()
            .all(|&(pos, depth, ..)| pos.x.is_finite() && pos.y.is_finite() && depth.is_finite());
        if projection_ok {
            self.engine.report_draw_success();
        } else {
            self.engine.report_draw_failure();
        }

        if response.hovered() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::Crosshair;
            });
        }
    }

    fn handle_directional_keys(&mut self, ui: &Ui) {
        if ui.ctx().memory(|memory| memory.focused().is_some()) {
            return;
        }

        let directions = ui.input(|input| {
            [
                (egui::Key::ArrowUp, crate::engine::Direction::Up),
                (egui::Key::ArrowDown, crate::engine::Direction::Down),
                (egui::Key::ArrowLeft, crate::engine::Direction::Left),
                (egui::Key::ArrowRight, crate::engine::Direction::Right),
            ]
            .into_iter()
            .filter(|(key, _)| input.key_pressed(*key))
            .map(|(_, direction)| direction)
            .collect::<Vec<_>>()
        });

        let now = self.now_secs();
        for direction in directions {
            self.engine
                .apply(Intent::SelectDirectional(direction), now, &mut self.scene);
        }
    }

    fn draw_labels(&self, painter: &egui::Painter, projector: &Projector) {
        let tiers = self.engine.highlight_tiers();
        let selection_active = self.engine.selected_id().is_some();

        for (index, entity) in self.engine.graph().entities.iter().enumerate() {
            let tier = tiers.get(index).copied().unwrap_or(HighlightTier::Default);
            let highlighted = tier != HighlightTier::Default;
            if selection_active && !highlighted {
                continue;
            }

            let Some(position) = self.engine.entity_position(index) else {
                continue;
            };
            let Some((pos, depth)) = projector.project(position) else {
                continue;
            };

            let radius = (entity.radius * projector.focal / depth).clamp(2.0, 40.0);
            if !highlighted && radius < 7.0 {
                continue;
            }

            painter.text(
                pos + egui::vec2(radius + 5.0, 0.0),
                Align2::LEFT_CENTER,
                &entity.label,
                FontId::proportional(12.0),
                Color32::from_gray(235),
            );
        }
    }
}
