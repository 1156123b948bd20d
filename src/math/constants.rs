/* Copyright 2020 @Yuchen Wong */

pub type Float = f32;

pub type Vector2f = nalgebra::Vector2<Float>;
pub type Vector3f = nalgebra::Vector3<Float>;

pub const EPSILON: Float = 1e-4;
pub const PI: Float = std::f32::consts::PI;
pub const INV_PI: Float = std::f32::consts::FRAC_1_PI;

// Offset along the surface normal for shadow ray origins.
pub const SHADOW_EPSILON: Float = 1e-3;

// Triangles with an area at or below this are treated as degenerate.
pub const DEGENERATE_AREA: Float = 1e-12;
