// Copyright @yucwang 2026

use crate::core::interaction::SurfaceIntersection;
use crate::core::light::{Light, LightKind};
use crate::core::scene::Scene;
use crate::core::shade::shade;
use crate::core::texture::{FilterMode, PixelFormat, Texture, TextureResult};
use crate::math::constants::{Vector3f, SHADOW_EPSILON};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Direct lighting from the scene's delta lights with hard shadows.
/// Owns the packed RGBA canvas it renders into.
pub struct DirectIntegrator {
    scene: Scene,
    filter: FilterMode,
    output_image: Texture,
}

impl DirectIntegrator {
    pub fn new(scene: Scene, filter: FilterMode) -> Self {
        let (width, height) = scene.resolution();
        let output_image = Texture::with_format(PixelFormat::PackedRgba8, width, height);
        Self { scene, filter, output_image }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn output_image(&self) -> &Texture {
        &self.output_image
    }

    /// Renders every pixel into the canvas, overwriting any previous
    /// result, and returns the wall-clock time spent in the pixel loop.
    pub fn render(&mut self) -> Duration {
        let (width, height) = self.scene.resolution();
        log::info!("Rendering {}x{} with {} filtering, {} triangles, {} lights.",
                   width, height, self.filter, self.scene.triangle_count(), self.scene.lights().len());

        let progress = ProgressBar::new(height as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rows")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let start = Instant::now();
        let mut degenerate_hits = 0usize;
        for y in 0..height {
            for x in 0..width {
                let color = match self.shade_pixel(x, y) {
                    Ok(color) => color,
                    Err(e) => {
                        log::debug!("pixel ({}, {}): {}", x, y, e);
                        degenerate_hits += 1;
                        RGBSpectrum::default()
                    }
                };
                self.output_image.write_pixel_color(color, x, y);
            }
            progress.inc(1);
        }
        let elapsed = start.elapsed();
        progress.finish_and_clear();

        if degenerate_hits > 0 {
            log::warn!("{} pixels hit degenerate triangles and were left black.", degenerate_hits);
        }
        elapsed
    }

    /// Unquantized radiance for pixel `(x, y)`. Pixels whose texture
    /// coordinates cannot be recovered come back black.
    pub fn trace_pixel(&self, x: usize, y: usize) -> RGBSpectrum {
        self.shade_pixel(x, y).unwrap_or_else(|e| {
            log::debug!("pixel ({}, {}): {}", x, y, e);
            RGBSpectrum::default()
        })
    }

    fn shade_pixel(&self, x: usize, y: usize) -> TextureResult<RGBSpectrum> {
        let ray = self.scene.camera().generate_ray(x, y);
        match self.scene.ray_intersection(&ray) {
            Some(hit) => self.shade_hit(&hit),
            None => Ok(RGBSpectrum::default()),
        }
    }

    fn shade_hit(&self, hit: &SurfaceIntersection<'_>) -> TextureResult<RGBSpectrum> {
        let material = hit.surface().material();
        let base_color = match material.diffuse_texture() {
            Some(texture) => {
                let uv = hit.triangle().uv_at(&hit.p())?;
                texture.fetch(uv, self.filter)
            }
            None => material.diffuse(),
        };

        let mut color = RGBSpectrum::default();
        for light in self.scene.lights() {
            color += match light.kind() {
                LightKind::Directional => self.directional_contribution(light, hit, base_color),
                LightKind::Point => self.point_contribution(light, hit, base_color),
            };
        }
        Ok(color)
    }

    fn shadow_ray(&self, hit: &SurfaceIntersection<'_>, direction: Vector3f) -> Ray3f {
        Ray3f::new(hit.p() + hit.normal() * SHADOW_EPSILON, direction, None, None)
    }

    // The cosine uses the stored direction as given, so its length scales
    // the contribution.
    fn directional_contribution(&self, light: &Light, hit: &SurfaceIntersection<'_>,
                                base_color: RGBSpectrum) -> RGBSpectrum {
        let direction = light.location_or_direction();
        let shadow_ray = self.shadow_ray(hit, direction);
        if self.scene.ray_intersection(&shadow_ray).is_some() {
            return RGBSpectrum::default();
        }
        shade(light, base_color) * direction.dot(&hit.normal()).abs()
    }

    // The shadow ray is unbounded; an occluder only blocks the light when it
    // is closer to the hit point than the light itself.
    fn point_contribution(&self, light: &Light, hit: &SurfaceIntersection<'_>,
                          base_color: RGBSpectrum) -> RGBSpectrum {
        let displacement = light.location_or_direction() - hit.p();
        let distance_squared = displacement.norm_squared();
        if distance_squared <= 0.0 {
            return RGBSpectrum::default();
        }
        let direction = displacement.normalize();

        let shadow_ray = self.shadow_ray(hit, direction);
        let visible = match self.scene.ray_intersection(&shadow_ray) {
            None => true,
            Some(occluder) => (occluder.p() - hit.p()).norm_squared() > distance_squared,
        };
        if !visible {
            return RGBSpectrum::default();
        }

        shade(light, base_color) * direction.dot(&hit.normal()).abs() / distance_squared
    }
}
