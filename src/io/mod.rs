// Copyright @yucwang 2026

pub mod image_io;
pub mod obj_utils;
