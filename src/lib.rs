// Copyright @yucwang 2026

pub mod core;
pub mod integrators;
pub mod io;
pub mod math;
pub mod sensors;
pub mod shapes;
