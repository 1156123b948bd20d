// Copyright @yucwang 2023

use crate::core::texture::{get_uv_coordinates, TextureResult};
use crate::math::constants::{ EPSILON, Float, Vector2f, Vector3f };
use crate::math::ray::Ray3f;

#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub v1: Vector3f,
    pub v2: Vector3f,
    pub v3: Vector3f,
    pub uv1: Vector2f,
    pub uv2: Vector2f,
    pub uv3: Vector2f,
}

impl Triangle {
    pub fn new(v1: Vector3f, v2: Vector3f, v3: Vector3f) -> Self {
        Self::with_uvs(v1, v2, v3, Vector2f::zeros(), Vector2f::zeros(), Vector2f::zeros())
    }

    pub fn with_uvs(v1: Vector3f, v2: Vector3f, v3: Vector3f,
                    uv1: Vector2f, uv2: Vector2f, uv3: Vector2f) -> Self {
        Self { v1, v2, v3, uv1, uv2, uv3 }
    }

    /// Distance along `ray` to the hit, if any, within the ray's segment.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<Float> {
        let geo_normal = self.geometric_normal();
        let n_dot_dir = geo_normal.dot(&ray.dir());

        if n_dot_dir > -EPSILON && n_dot_dir < EPSILON {
            return None;
        }

        let plane_d = geo_normal.dot(&self.v1);
        let t = (plane_d - geo_normal.dot(&ray.origin())) / n_dot_dir;

        if !ray.test_segment(t) {
            return None;
        }

        if self.is_in_triangle(&ray.at(t)) {
            Some(t)
        } else {
            None
        }
    }

    fn is_in_triangle(&self, p: &Vector3f) -> bool {
        let geo_normal = (self.v2 - self.v1).cross(&(self.v3 - self.v1));

        let n0 = (self.v2 - self.v1).cross(&(p - self.v1));
        let n1 = (self.v3 - self.v2).cross(&(p - self.v2));
        let n2 = (self.v1 - self.v3).cross(&(p - self.v3));

        (n0.dot(&geo_normal) >= 0.0) && (n1.dot(&geo_normal) >= 0.0) && (n2.dot(&geo_normal) >= 0.0)
    }

    pub fn geometric_normal(&self) -> Vector3f {
        (self.v2 - self.v1).cross(&(self.v3 - self.v1)).normalize()
    }

    /// Texture coordinates at `p`, interpolated from the per-vertex UVs.
    pub fn uv_at(&self, p: &Vector3f) -> TextureResult<Vector2f> {
        get_uv_coordinates(p, &self.v1, &self.v2, &self.v3, &self.uv1, &self.uv2, &self.uv3)
    }
}
