// Copyright @yucwang 2023

use crate::core::surface::Surface;
use crate::math::constants::Vector3f;
use crate::shapes::triangle::Triangle;

/// The closest hit along a ray. Borrows the intersected triangle and the
/// surface that owns it, so shading never has to search the scene again.
pub struct SurfaceIntersection<'a> {
    p: Vector3f,
    normal: Vector3f,
    triangle: &'a Triangle,
    surface: &'a Surface,
}

impl<'a> SurfaceIntersection<'a> {
    pub fn new(p: Vector3f,
               normal: Vector3f,
               triangle: &'a Triangle,
               surface: &'a Surface) -> Self {
        Self { p, normal, triangle, surface }
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    pub fn triangle(&self) -> &'a Triangle {
        self.triangle
    }

    pub fn surface(&self) -> &'a Surface {
        self.surface
    }
}
