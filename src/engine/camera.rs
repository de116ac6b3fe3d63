use glam::Vec3;

use crate::util::ease_in_out;

pub const MIN_CAMERA_DISTANCE: f32 = 50.0;
pub const MAX_CAMERA_DISTANCE: f32 = 500.0;

const DEFAULT_EYE: Vec3 = Vec3::new(0.0, 40.0, 300.0);
const DEFAULT_TARGET: Vec3 = Vec3::ZERO;
const ELEVATION_BAND: f32 = 200.0;
const ROTATE_SPEED: f32 = 0.008;
const ELEVATION_SPEED: f32 = 0.9;
const PAN_SPEED: f32 = 0.45;
const ZOOM_EPSILON: f32 = 0.01;
const AUTO_ROTATE_STEP: f32 = 0.004;
const FOCUS_DISTANCE: f32 = 150.0;
const TRANSITION_FRAMES: u32 = 30;

struct CameraTransition {
    start_eye: Vec3,
    start_target: Vec3,
    end_eye: Vec3,
    end_target: Vec3,
    frame: u32,
}

pub struct OrbitCamera {
    eye: Vec3,
    target: Vec3,
    auto_rotate: bool,
    transition: Option<CameraTransition>,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            eye: DEFAULT_EYE,
            target: DEFAULT_TARGET,
            auto_rotate: false,
            transition: None,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn toggle_auto_rotate(&mut self) {
        self.auto_rotate = !self.auto_rotate;
    }

    // Forward, right, up; orthonormal even when looking nearly straight down.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.eye)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z);
        let mut right = forward.cross(Vec3::Y);
        if right.length_squared() < 1e-8 {
            right = Vec3::X;
        } else {
            right = right.normalize();
        }
        let up = right.cross(forward);
        (forward, right, up)
    }

    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        let offset = self.eye - self.target;

        let angle = -delta_x * ROTATE_SPEED;
        let (sin, cos) = angle.sin_cos();
        let rotated = Vec3::new(
            offset.x * cos - offset.z * sin,
            offset.y,
            offset.x * sin + offset.z * cos,
        );

        let elevation = (rotated.y + delta_y * ELEVATION_SPEED)
            .clamp(-ELEVATION_BAND, ELEVATION_BAND);

        self.eye = self.target + Vec3::new(rotated.x, elevation, rotated.z);
    }

    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let (_, right, up) = self.basis();
        // Screen-space deltas cover more world distance the further out we are.
        let scale = PAN_SPEED * (self.distance() / 300.0).clamp(0.2, 2.0);
        let shift = (right * -delta_x + up * delta_y) * scale;
        self.eye += shift;
        self.target += shift;
    }

    pub fn zoom(&mut self, delta: f32) {
        if delta.abs() < ZOOM_EPSILON {
            return;
        }

        let offset = self.eye - self.target;
        let distance = offset.length();
        if distance <= 0.0 {
            return;
        }

        let next = (distance - delta).clamp(MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE);
        self.eye = self.target + (offset / distance) * next;
    }

    pub fn reset_to_default(&mut self) {
        self.begin_transition(DEFAULT_EYE, DEFAULT_TARGET);
    }

    pub fn focus_on(&mut self, point: Vec3) {
        let away = (self.eye - point).try_normalize().unwrap_or(Vec3::Z);
        let end_eye = point + away * FOCUS_DISTANCE;
        let elevation = (end_eye.y - point.y).clamp(-ELEVATION_BAND, ELEVATION_BAND);
        let end_eye = Vec3::new(end_eye.x, point.y + elevation, end_eye.z);
        self.begin_transition(end_eye, point);
    }

    fn begin_transition(&mut self, end_eye: Vec3, end_target: Vec3) {
        // Always restart from the live pose, even mid-flight.
        self.transition = Some(CameraTransition {
            start_eye: self.eye,
            start_target: self.target,
            end_eye,
            end_target,
            frame: 0,
        });
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn advance_frame(&mut self) -> bool {
        let mut moved = false;

        if let Some(transition) = &mut self.transition {
            transition.frame += 1;
            let t = ease_in_out(transition.frame as f32 / TRANSITION_FRAMES as f32);
            self.eye = transition.start_eye.lerp(transition.end_eye, t);
            self.target = transition.start_target.lerp(transition.end_target, t);

            if transition.frame >= TRANSITION_FRAMES {
                self.transition = None;
            }
            moved = true;
        }

        if self.auto_rotate {
            let offset = self.eye - self.target;
            let (sin, cos) = AUTO_ROTATE_STEP.sin_cos();
            self.eye = self.target
                + Vec3::new(
                    offset.x * cos - offset.z * sin,
                    offset.y,
                    offset.x * sin + offset.z * cos,
                );
            moved = true;
        }

        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_rotate_preserves_distance_and_target() {
        let mut camera = OrbitCamera::default();
        let before = camera.distance();
        let target = camera.target();

        camera.rotate(40.0, 0.0);

        assert!((camera.distance() - before).abs() < 1e-3);
        assert_eq!(camera.target(), target);
    }

    #[test]
    fn elevation_is_clamped_to_band() {
        let mut camera = OrbitCamera::default();
        camera.rotate(0.0, 100_000.0);
        assert!(camera.eye().y - camera.target().y <= ELEVATION_BAND + 1e-3);

        camera.rotate(0.0, -200_000.0);
        assert!(camera.eye().y - camera.target().y >= -ELEVATION_BAND - 1e-3);
    }

    #[test]
    fn zoom_clamps_to_distance_range() {
        let mut camera = OrbitCamera::default();
        camera.zoom(10_000.0);
        assert!((camera.distance() - MIN_CAMERA_DISTANCE).abs() < 1e-3);

        camera.zoom(-10_000.0);
        assert!((camera.distance() - MAX_CAMERA_DISTANCE).abs() < 1e-3);
    }

    #[test]
    fn tiny_zoom_delta_is_a_no_op() {
        let mut camera = OrbitCamera::default();
        let eye = camera.eye();
        camera.zoom(ZOOM_EPSILON * 0.5);
        assert_eq!(camera.eye(), eye);
    }

    #[test]
    fn pan_moves_eye_and_target_together() {
        let mut camera = OrbitCamera::default();
        let offset_before = camera.eye() - camera.target();

        camera.pan(25.0, -12.0);

        let offset_after = camera.eye() - camera.target();
        assert!((offset_before - offset_after).length() < 1e-3);
        assert_ne!(camera.target(), DEFAULT_TARGET);
    }

    #[test]
    fn focus_transition_converges_on_the_point() {
        let mut camera = OrbitCamera::default();
        let point = Vec3::new(80.0, 10.0, -40.0);
        camera.focus_on(point);

        for _ in 0..TRANSITION_FRAMES {
            camera.advance_frame();
        }

        assert!(!camera.is_animating());
        assert!((camera.target() - point).length() < 1e-3);
        assert!((camera.distance() - FOCUS_DISTANCE).abs() < 1.0);
    }

    #[test]
    fn new_transition_restarts_from_current_pose() {
        let mut camera = OrbitCamera::default();
        camera.focus_on(Vec3::new(200.0, 0.0, 0.0));
        for _ in 0..10 {
            camera.advance_frame();
        }

        let mid_eye = camera.eye();
        camera.focus_on(Vec3::new(-200.0, 0.0, 0.0));
        camera.advance_frame();

        // One frame into the new transition we are still near the mid-flight pose.
        assert!((camera.eye() - mid_eye).length() < 30.0);
    }

    #[test]
    fn reset_returns_to_default_pose() {
        let mut camera = OrbitCamera::default();
        camera.rotate(100.0, 50.0);
        camera.pan(30.0, 30.0);
        camera.zoom(80.0);

        camera.reset_to_default();
        for _ in 0..TRANSITION_FRAMES {
            camera.advance_frame();
        }

        assert!((camera.eye() - DEFAULT_EYE).length() < 1e-3);
        assert!((camera.target() - DEFAULT_TARGET).length() < 1e-3);
    }

    #[test]
    fn auto_rotate_orbits_without_touching_target() {
        let mut camera = OrbitCamera::default();
        camera.toggle_auto_rotate();
        assert!(camera.auto_rotate());

        let eye_before = camera.eye();
        let distance_before = camera.distance();
        let moved = camera.advance_frame();

        assert!(moved);
        assert_ne!(camera.eye(), eye_before);
        assert!((camera.distance() - distance_before).abs() < 1e-3);
        assert_eq!(camera.target(), DEFAULT_TARGET);
    }
}
