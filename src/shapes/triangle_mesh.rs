// Copyright @yucwang 2023

use super::triangle::Triangle;

use crate::io::obj_utils;
use crate::io::obj_utils::ObjLoadError;
use crate::math::constants::{ Float, Vector2f, Vector3f };

use std::path::Path;
use std::vec::Vec;

use wavefront_obj::obj::{ObjSet, Primitive};

pub struct TriangleMesh {
    triangles: Vec<Triangle>,
}

impl TriangleMesh {
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, ObjLoadError> {
        let obj_set = obj_utils::load_obj_from_file(path)?;
        Ok(Self::from_obj_set(obj_set))
    }

    fn from_obj_set(obj_set: ObjSet) -> Self {
        let mut triangles = Vec::new();
        let mut skipped = 0usize;

        for object in obj_set.objects {
            let vertices: Vec<Vector3f> = object.vertices.iter()
                .map(|v| Vector3f::new(v.x as Float, v.y as Float, v.z as Float))
                .collect();
            let uvs: Vec<Vector2f> = object.tex_vertices.iter()
                .map(|vt| Vector2f::new(vt.u as Float, vt.v as Float))
                .collect();

            for geom in &object.geometry {
                for shape in &geom.shapes {
                    if let Primitive::Triangle(a, b, c) = &shape.primitive {
                        let corners = [*a, *b, *c];
                        let positions: Option<Vec<Vector3f>> = corners.iter()
                            .map(|idx| vertices.get(idx.0 as usize).cloned())
                            .collect();
                        let positions = match positions {
                            Some(p) => p,
                            None => {
                                skipped += 1;
                                continue;
                            }
                        };

                        // Faces without texture coordinates map to the UV origin.
                        let uv = |i: usize| {
                            corners[i].1
                                .and_then(|t| uvs.get(t as usize).cloned())
                                .unwrap_or_else(Vector2f::zeros)
                        };

                        triangles.push(Triangle::with_uvs(positions[0], positions[1], positions[2],
                                                          uv(0), uv(1), uv(2)));
                    }
                }
            }
        }

        if skipped > 0 {
            log::warn!("Skipped {} faces with out-of-range vertex indices.", skipped);
        }

        Self { triangles }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn into_triangles(self) -> Vec<Triangle> {
        self.triangles
    }
}
