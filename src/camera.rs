use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::Ray;
use crate::types::CameraUniform;

/// Fraction of the pending orbit motion applied each update
pub const DAMPING_FACTOR: f32 = 0.05;
/// Radius scale per wheel line
pub const ZOOM_STEP: f32 = 0.95;

const MIN_POLAR: f32 = 1e-4;
const MIN_RADIUS: f32 = 0.5;
const MAX_RADIUS: f32 = 50.0;

/// Initial camera placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [4.0, 2.0, 4.0],
            target: [0.0, 0.0, 0.0],
            fov_deg: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Perspective camera orbiting a target with damped drag and wheel zoom
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    radius: f32,
    /// Azimuth around +Y, measured from +Z
    theta: f32,
    /// Polar angle from +Y
    phi: f32,
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
    /// Pending (theta, phi) motion still to be applied
    velocity: Vec2,
}

impl OrbitCamera {
    pub fn new(settings: &CameraSettings, aspect: f32) -> Self {
        let target = Vec3::from(settings.target);
        let offset = Vec3::from(settings.position) - target;
        let radius = offset.length().max(MIN_RADIUS);

        Self {
            target,
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            fov_y: settings.fov_deg.to_radians(),
            aspect,
            near: settings.near,
            far: settings.far,
            velocity: Vec2::ZERO,
        }
    }

    pub fn position(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.target
            + self.radius
                * Vec3::new(sin_phi * self.theta.sin(), self.phi.cos(), sin_phi * self.theta.cos())
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize_or_zero()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or_zero()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Queue an orbit from a pointer drag in physical pixels
    pub fn rotate(&mut self, drag: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let scale = std::f32::consts::TAU / viewport_height;
        self.velocity.x -= drag.x * scale;
        self.velocity.y -= drag.y * scale;
    }

    /// Wheel zoom; positive lines move closer
    pub fn zoom(&mut self, lines: f32) {
        if lines != 0.0 {
            self.radius = (self.radius * ZOOM_STEP.powf(lines)).clamp(MIN_RADIUS, MAX_RADIUS);
        }
    }

    /// Apply a slice of the pending motion and decay the rest
    pub fn update(&mut self) {
        self.theta += self.velocity.x * DAMPING_FACTOR;
        self.phi = (self.phi + self.velocity.y * DAMPING_FACTOR)
            .clamp(MIN_POLAR, std::f32::consts::PI - MIN_POLAR);
        self.velocity *= 1.0 - DAMPING_FACTOR;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// World-space ray through a point in normalized device coordinates
    pub fn pick_ray(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_proj().inverse();
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        Ray::new(near, far - near)
    }

    pub fn to_uniform(&self, viewport: [f32; 2]) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
            right: self.right().to_array(),
            _pad1: 0.0,
            up: self.up().to_array(),
            _pad2: 0.0,
            viewport,
            _pad3: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(&CameraSettings::default(), 16.0 / 9.0)
    }

    #[test]
    fn test_spherical_round_trip() {
        let cam = camera();
        assert!((cam.position() - Vec3::new(4.0, 2.0, 4.0)).length() < 1e-4);
    }

    #[test]
    fn test_center_ray_hits_target() {
        let cam = camera();
        let ray = cam.pick_ray(Vec2::ZERO);
        let expected = (cam.target - cam.position()).normalize();
        assert!(ray.direction.dot(expected) > 0.9999);
    }

    #[test]
    fn test_damping_decays_velocity() {
        let mut cam = camera();
        cam.rotate(Vec2::new(100.0, 0.0), 600.0);
        let start = cam.velocity().x.abs();
        let theta_before = cam.position();
        cam.update();
        assert!(cam.velocity().x.abs() < start);
        assert!((cam.position() - theta_before).length() > 0.0);

        for _ in 0..500 {
            cam.update();
        }
        assert!(cam.velocity().x.abs() < 1e-6);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut cam = camera();
        cam.zoom(1000.0);
        assert_eq!(cam.radius(), MIN_RADIUS);
        cam.zoom(-10000.0);
        assert_eq!(cam.radius(), MAX_RADIUS);
    }

    #[test]
    fn test_set_aspect_ignores_degenerate() {
        let mut cam = camera();
        cam.set_aspect(0.0);
        assert_eq!(cam.aspect(), 16.0 / 9.0);
        cam.set_aspect(2.0);
        assert_eq!(cam.aspect(), 2.0);
    }
}
