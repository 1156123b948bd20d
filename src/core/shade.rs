// Copyright @yucwang 2026

use crate::core::light::Light;
use crate::math::constants::INV_PI;
use crate::math::spectrum::RGBSpectrum;

/// Lambertian response of `color` under `light`: radiance ⊙ color / π.
pub fn shade(light: &Light, color: RGBSpectrum) -> RGBSpectrum {
    light.radiance() * color * INV_PI
}
