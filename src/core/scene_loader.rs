// Copyright @yucwang 2026

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::light::Light;
use crate::core::scene::Scene;
use crate::core::surface::{Material, Surface};
use crate::core::texture::{Texture, TextureError};
use crate::io::obj_utils::ObjLoadError;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::sensors::perspective::PerspectiveCamera;
use crate::shapes::triangle_mesh::TriangleMesh;

#[derive(Error, Debug)]
pub enum SceneLoadError {
    #[error("failed to read scene {path}: {source}")]
    Io { path: String, source: std::io::Error },

    #[error("invalid scene description {path}: {source}")]
    Json { path: String, source: serde_json::Error },

    #[error("failed to load mesh {path}: {source}")]
    Obj { path: String, source: ObjLoadError },

    #[error(transparent)]
    Texture(#[from] TextureError),
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CameraConfig {
    pub from: [Float; 3],
    pub to: [Float; 3],
    #[serde(default = "default_up")]
    pub up: [Float; 3],
    pub field_of_view: Float,
}

fn default_up() -> [Float; 3] {
    [0.0, 1.0, 0.0]
}

#[derive(Deserialize, Debug, Clone)]
pub struct OutputConfig {
    pub resolution: [usize; 2],
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceDesc {
    pub mesh: String,
    #[serde(default = "default_diffuse")]
    pub diffuse: [Float; 3],
    #[serde(default)]
    pub diffuse_texture: Option<String>,
}

fn default_diffuse() -> [Float; 3] {
    [1.0, 1.0, 1.0]
}

/// Either a bare mesh path or a full surface description.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum SurfaceConfig {
    Mesh(String),
    Full(SurfaceDesc),
}

impl SurfaceConfig {
    fn into_desc(self) -> SurfaceDesc {
        match self {
            SurfaceConfig::Mesh(mesh) => SurfaceDesc { mesh, diffuse: default_diffuse(), diffuse_texture: None },
            SurfaceConfig::Full(desc) => desc,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct DirectionalLightConfig {
    pub direction: [Float; 3],
    pub radiance: [Float; 3],
}

#[derive(Deserialize, Debug, Clone)]
pub struct PointLightConfig {
    pub location: [Float; 3],
    pub radiance: [Float; 3],
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub output: OutputConfig,
    #[serde(default, alias = "surface")]
    pub surfaces: Vec<SurfaceConfig>,
    #[serde(default)]
    pub directional_lights: Vec<DirectionalLightConfig>,
    #[serde(default)]
    pub point_lights: Vec<PointLightConfig>,
}

fn vec3(v: [Float; 3]) -> Vector3f {
    Vector3f::new(v[0], v[1], v[2])
}

fn spectrum(v: [Float; 3]) -> RGBSpectrum {
    RGBSpectrum::new(v[0], v[1], v[2])
}

/// Directional lights first, then point lights, each in document order.
pub fn load_lights(config: &SceneConfig) -> Vec<Light> {
    let directional = config.directional_lights.iter()
        .map(|l| Light::directional(vec3(l.direction), spectrum(l.radiance)));
    let point = config.point_lights.iter()
        .map(|l| Light::point(vec3(l.location), spectrum(l.radiance)));
    directional.chain(point).collect()
}

pub fn parse_scene_config(json: &str, path: &Path) -> Result<SceneConfig, SceneLoadError> {
    serde_json::from_str(json).map_err(|source| SceneLoadError::Json {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneLoadError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| SceneLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config = parse_scene_config(&json, path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    build_scene(config, base_dir)
}

pub fn build_scene(config: SceneConfig, base_dir: &Path) -> Result<Scene, SceneLoadError> {
    let [width, height] = config.output.resolution;
    let camera = PerspectiveCamera::new(vec3(config.camera.from),
                                        vec3(config.camera.to),
                                        vec3(config.camera.up),
                                        config.camera.field_of_view,
                                        width, height);
    let lights = load_lights(&config);

    let mut surfaces = Vec::with_capacity(config.surfaces.len());
    for surface in config.surfaces {
        surfaces.push(load_surface(surface.into_desc(), base_dir)?);
    }

    let scene = Scene::new(Box::new(camera), surfaces, lights);
    log::info!("Loaded scene: {}, {} surfaces, {} triangles, {} lights.",
               scene.camera().describe(), scene.surfaces().len(),
               scene.triangle_count(), scene.lights().len());
    Ok(scene)
}

fn resolve(base_dir: &Path, relative: &str) -> PathBuf {
    let path = Path::new(relative);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn load_surface(desc: SurfaceDesc, base_dir: &Path) -> Result<Surface, SceneLoadError> {
    let mesh_path = resolve(base_dir, &desc.mesh);
    let mesh = TriangleMesh::from_obj(&mesh_path).map_err(|source| SceneLoadError::Obj {
        path: mesh_path.display().to_string(),
        source,
    })?;
    log::debug!("Loaded {} triangles from {}.", mesh.triangles().len(), mesh_path.display());

    let diffuse = spectrum(desc.diffuse);
    let material = match desc.diffuse_texture {
        Some(texture_path) => {
            let texture = Texture::from_file(resolve(base_dir, &texture_path))?;
            Material::with_texture(diffuse, texture)
        }
        None => Material::new(diffuse),
    };

    let surface = Surface::new(mesh.into_triangles(), material).with_name(desc.mesh);
    log::debug!("Surface {}: textured = {}.", surface.name().unwrap_or("<unnamed>"), surface.material().has_diffuse_texture());
    Ok(surface)
}
