// Copyright @yucwang 2026

use crate::core::sensor::Sensor;
use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray3f;

pub struct PerspectiveCamera {
    origin: Vector3f,
    forward: Vector3f,
    right: Vector3f,
    up: Vector3f,
    tan_half_fov_y: Float,
    aspect: Float,
    width: usize,
    height: usize,
}

impl PerspectiveCamera {
    pub fn new(origin: Vector3f,
               target: Vector3f,
               up: Vector3f,
               fov_y_degrees: Float,
               width: usize,
               height: usize) -> Self {
        let forward = (target - origin).normalize();
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward).normalize();
        let aspect = if height > 0 { width as Float / height as Float } else { 1.0 };

        Self {
            origin,
            forward,
            right,
            up,
            tan_half_fov_y: (0.5 * fov_y_degrees.to_radians()).tan(),
            aspect,
            width,
            height,
        }
    }
}

impl Sensor for PerspectiveCamera {
    fn generate_ray(&self, x: usize, y: usize) -> Ray3f {
        let u = (x as Float + 0.5) / self.width as Float;
        let v = (y as Float + 0.5) / self.height as Float;

        let px = (2.0 * u - 1.0) * self.aspect * self.tan_half_fov_y;
        let py = (1.0 - 2.0 * v) * self.tan_half_fov_y;

        let dir = self.right * px + self.up * py + self.forward;
        Ray3f::new(self.origin, dir, None, None)
    }

    fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn describe(&self) -> String {
        format!("PerspectiveCamera {}x{} at ({}, {}, {})",
                self.width, self.height, self.origin.x, self.origin.y, self.origin.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(width: usize, height: usize) -> PerspectiveCamera {
        PerspectiveCamera::new(Vector3f::new(0.0, 0.0, 0.0),
                               Vector3f::new(0.0, 0.0, -1.0),
                               Vector3f::new(0.0, 1.0, 0.0),
                               90.0, width, height)
    }

    #[test]
    fn test_perspective_camera_center_ray() {
        let cam = camera(1, 1);
        let dir = cam.generate_ray(0, 0).dir();

        assert!((dir.x - 0.0).abs() < 1e-6);
        assert!((dir.y - 0.0).abs() < 1e-6);
        assert!((dir.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_perspective_camera_row_zero_is_top() {
        let cam = camera(4, 2);
        assert_eq!(cam.resolution(), (4, 2));

        let top_left = cam.generate_ray(0, 0).dir();
        let bottom_right = cam.generate_ray(3, 1).dir();
        assert!(top_left.y > 0.0 && top_left.x < 0.0);
        assert!(bottom_right.y < 0.0 && bottom_right.x > 0.0);
    }
}
