//! Orbit camera for viewing the particle cloud.

use glam::{Mat4, Vec3};

const MIN_DISTANCE: f32 = 50.0;
const MAX_DISTANCE: f32 = 2000.0;

/// Camera orbiting a target point; mouse drag adjusts yaw/pitch, the
/// wheel dollies in and out.
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
}

impl Camera {
    /// Create a camera at the reference viewing distance for a
    /// radius-100 particle cloud.
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 400.0,
            target: Vec3::ZERO,
        }
    }

    /// Rotate by a mouse-drag delta in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * 0.005;
        self.pitch = (self.pitch + dy * 0.005).clamp(-1.5, 1.5);
    }

    /// Move toward or away from the target by a scroll amount.
    pub fn dolly(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * 20.0).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_position_on_z_axis() {
        let cam = Camera::new();
        let pos = cam.position();
        assert!((pos.x).abs() < 1e-4);
        assert!((pos.y).abs() < 1e-4);
        assert!((pos.z - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_dolly_clamped() {
        let mut cam = Camera::new();
        cam.dolly(1e6);
        assert_eq!(cam.distance, 50.0);
        cam.dolly(-1e6);
        assert_eq!(cam.distance, 2000.0);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut cam = Camera::new();
        cam.orbit(0.0, 1e6);
        assert_eq!(cam.pitch, 1.5);
    }
}
