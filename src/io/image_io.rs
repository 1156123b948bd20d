// Copyright @yucwang 2026

use crate::core::texture::{pack_rgba8, unpack_rgba8, Texture, TextureError, TextureResult};
use crate::math::spectrum::RGBSpectrum;

use exr::prelude::{read_first_rgba_layer_from_file, write_rgba_file};
use std::path::Path;

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Decodes `path` into a texture. Rows are flipped once so that the
/// in-memory row 0 corresponds to `v = 0`.
pub fn decode(path: &Path) -> TextureResult<Texture> {
    let mut texture = match extension_of(path).as_str() {
        "exr" => decode_exr(path)?,
        _ => decode_ldr(path)?,
    };
    texture.flip_vertical();

    log::info!("Loaded texture {} ({}x{}, {:?}, {} bytes).",
               path.display(), texture.width(), texture.height(), texture.format(), texture.byte_size());
    Ok(texture)
}

fn decode_ldr(path: &Path) -> TextureResult<Texture> {
    let img = image::open(path)
        .map_err(|e| TextureError::Decode { path: path.display().to_string(), source: e })?
        .to_rgba8();

    let (width, height) = img.dimensions();
    let data = img.pixels()
        .map(|p| u32::from_le_bytes(p.0))
        .collect::<Vec<u32>>();

    Texture::from_packed(width as usize, height as usize, data)
}

struct ExrPixels {
    width: usize,
    data: Vec<f32>,
}

fn decode_exr(path: &Path) -> TextureResult<Texture> {
    let image = read_first_rgba_layer_from_file(
        path,
        |resolution, _| ExrPixels {
            width: resolution.width(),
            data: vec![0.0; resolution.width() * resolution.height() * 4],
        },
        |pixels: &mut ExrPixels, position, (r, g, b, a): (f32, f32, f32, f32)| {
            let base = (position.y() * pixels.width + position.x()) * 4;
            pixels.data[base] = r;
            pixels.data[base + 1] = g;
            pixels.data[base + 2] = b;
            pixels.data[base + 3] = a;
        },
    )
    .map_err(|e| TextureError::DecodeExr { path: path.display().to_string(), source: e })?;

    let size = image.layer_data.size;
    let pixels = image.layer_data.channel_data.pixels;
    Texture::from_float(size.width(), size.height(), pixels.data)
}

/// Encodes `texture` to `path`. `.exr` is written as 32-bit float, any other
/// extension as 8-bit through the `image` codecs. Packed and float sources
/// are converted as needed.
pub fn encode(texture: &Texture, path: &Path) -> TextureResult<()> {
    if !texture.is_allocated() {
        return Err(TextureError::Unallocated);
    }

    match extension_of(path).as_str() {
        "exr" => {
            encode_exr(texture, path)?;
            log::info!("Saved EXR: {}", path.display());
        }
        ext => {
            encode_ldr(texture, path, ext)?;
            log::info!("Saved {}: {}", ext.to_ascii_uppercase(), path.display());
        }
    }
    Ok(())
}

fn encode_ldr(texture: &Texture, path: &Path, ext: &str) -> TextureResult<()> {
    let packed: Vec<u32> = match (texture.packed_data(), texture.float_data()) {
        (Some(data), _) => data.to_vec(),
        (None, Some(data)) => data
            .chunks_exact(4)
            .map(|p| pack_rgba8(RGBSpectrum::new(p[0], p[1], p[2])))
            .collect(),
        (None, None) => return Err(TextureError::Unallocated),
    };

    // JPEG has no alpha channel.
    let (bytes, color_type) = if ext == "jpg" || ext == "jpeg" {
        let bytes = packed.iter()
            .flat_map(|p| {
                let [r, g, b, _] = p.to_le_bytes();
                [r, g, b]
            })
            .collect::<Vec<u8>>();
        (bytes, image::ColorType::Rgb8)
    } else {
        let bytes = packed.iter()
            .flat_map(|p| p.to_le_bytes())
            .collect::<Vec<u8>>();
        (bytes, image::ColorType::Rgba8)
    };

    image::save_buffer(path, &bytes, texture.width() as u32, texture.height() as u32, color_type)
        .map_err(|e| TextureError::Encode { path: path.display().to_string(), source: e })
}

fn encode_exr(texture: &Texture, path: &Path) -> TextureResult<()> {
    let width = texture.width();
    let result = match (texture.float_data(), texture.packed_data()) {
        (Some(data), _) => write_rgba_file(path, width, texture.height(), |x, y| {
            let base = (y * width + x) * 4;
            (data[base], data[base + 1], data[base + 2], data[base + 3])
        }),
        (None, Some(data)) => write_rgba_file(path, width, texture.height(), |x, y| {
            let c = unpack_rgba8(data[y * width + x]);
            (c.r(), c.g(), c.b(), 1.0f32)
        }),
        (None, None) => return Err(TextureError::Unallocated),
    };

    result.map_err(|e| TextureError::EncodeExr { path: path.display().to_string(), source: e })
}
