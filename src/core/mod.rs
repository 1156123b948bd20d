// Copyright @yucwang 2026

pub mod interaction;
pub mod light;
pub mod scene;
pub mod scene_loader;
pub mod sensor;
pub mod shade;
pub mod surface;
pub mod texture;
