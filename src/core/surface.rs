// Copyright @yucwang 2026

use crate::core::texture::Texture;
use crate::math::spectrum::RGBSpectrum;
use crate::shapes::triangle::Triangle;

pub struct Material {
    diffuse: RGBSpectrum,
    diffuse_texture: Option<Texture>,
}

impl Default for Material {
    fn default() -> Self {
        Self::new(RGBSpectrum::splat(1.0))
    }
}

impl Material {
    pub fn new(diffuse: RGBSpectrum) -> Self {
        Self { diffuse, diffuse_texture: None }
    }

    pub fn with_texture(diffuse: RGBSpectrum, texture: Texture) -> Self {
        Self { diffuse, diffuse_texture: Some(texture) }
    }

    pub fn has_diffuse_texture(&self) -> bool {
        self.diffuse_texture.is_some()
    }

    pub fn diffuse_texture(&self) -> Option<&Texture> {
        self.diffuse_texture.as_ref()
    }

    pub fn diffuse(&self) -> RGBSpectrum {
        self.diffuse
    }
}

/// A triangle soup sharing one material.
pub struct Surface {
    name: Option<String>,
    triangles: Vec<Triangle>,
    material: Material,
}

impl Surface {
    pub fn new(triangles: Vec<Triangle>, material: Material) -> Self {
        Self { name: None, triangles, material }
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}
