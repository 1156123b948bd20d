// Copyright @yucwang 2026

use crate::math::constants::Vector3f;
use crate::math::spectrum::RGBSpectrum;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Point,
    Directional,
}

/// A delta emitter. For directional lights `location_or_direction` is the
/// direction pointing towards the light; for point lights it is the
/// world-space position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    kind: LightKind,
    location_or_direction: Vector3f,
    radiance: RGBSpectrum,
}

impl Light {
    pub fn new(kind: LightKind, location_or_direction: Vector3f, radiance: RGBSpectrum) -> Self {
        Self { kind, location_or_direction, radiance }
    }

    pub fn directional(direction: Vector3f, radiance: RGBSpectrum) -> Self {
        Self::new(LightKind::Directional, direction, radiance)
    }

    pub fn point(location: Vector3f, radiance: RGBSpectrum) -> Self {
        Self::new(LightKind::Point, location, radiance)
    }

    pub fn kind(&self) -> LightKind {
        self.kind
    }

    pub fn location_or_direction(&self) -> Vector3f {
        self.location_or_direction
    }

    pub fn radiance(&self) -> RGBSpectrum {
        self.radiance
    }
}
