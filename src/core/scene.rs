// Copyright @yucwang 2026

use crate::core::interaction::SurfaceIntersection;
use crate::core::light::Light;
use crate::core::sensor::Sensor;
use crate::core::surface::Surface;
use crate::math::constants::Float;
use crate::math::ray::Ray3f;

pub struct Scene {
    camera: Box<dyn Sensor>,
    surfaces: Vec<Surface>,
    lights: Vec<Light>,
}

impl Scene {
    pub fn new(camera: Box<dyn Sensor>, surfaces: Vec<Surface>, lights: Vec<Light>) -> Self {
        Self { camera, surfaces, lights }
    }

    pub fn camera(&self) -> &dyn Sensor {
        self.camera.as_ref()
    }

    pub fn resolution(&self) -> (usize, usize) {
        self.camera.resolution()
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn triangle_count(&self) -> usize {
        self.surfaces.iter().map(|s| s.triangles().len()).sum()
    }

    /// Closest hit along `ray`. The returned normal faces against the ray.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection<'_>> {
        let mut closest: Option<(Float, &Surface, usize)> = None;

        for surface in &self.surfaces {
            for (idx, triangle) in surface.triangles().iter().enumerate() {
                if let Some(t) = triangle.ray_intersection(ray) {
                    if closest.map_or(true, |(closest_t, _, _)| t < closest_t) {
                        closest = Some((t, surface, idx));
                    }
                }
            }
        }

        closest.map(|(t, surface, idx)| {
            let triangle = &surface.triangles()[idx];
            let mut normal = triangle.geometric_normal();
            if normal.dot(&ray.dir()) > 0.0 {
                normal = -normal;
            }
            SurfaceIntersection::new(ray.at(t), normal, triangle, surface)
        })
    }
}
