// Copyright @yucwang 2026

use crate::math::ray::Ray3f;

pub trait Sensor: Send + Sync {
    /// Primary ray through the center of pixel `(x, y)`; row 0 is the top.
    fn generate_ray(&self, x: usize, y: usize) -> Ray3f;
    fn resolution(&self) -> (usize, usize);
    fn describe(&self) -> String {
        String::from("Sensor")
    }
}
