// Copyright @yucwang 2026

use crate::io::image_io;
use crate::math::constants::{Float, Vector2f, Vector3f, DEGENERATE_AREA};
use crate::math::spectrum::RGBSpectrum;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("failed to decode image {path}: {source}")]
    Decode { path: String, source: image::ImageError },

    #[error("failed to read exr {path}: {source}")]
    DecodeExr { path: String, source: exr::error::Error },

    #[error("failed to encode image {path}: {source}")]
    Encode { path: String, source: image::ImageError },

    #[error("failed to write exr {path}: {source}")]
    EncodeExr { path: String, source: exr::error::Error },

    #[error("texture is not allocated")]
    Unallocated,

    #[error("pixel buffer holds {actual} values, a {width}x{height} texture needs {expected}")]
    BufferSize { width: usize, height: usize, expected: usize, actual: usize },

    #[error("degenerate triangle with area {area}")]
    DegenerateTriangle { area: Float },
}

pub type TextureResult<T> = Result<T, TextureError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8 bits per channel, packed as R | G << 8 | B << 16 | A << 24.
    PackedRgba8,
    /// 32-bit float per channel, RGBA order.
    FloatRgba32,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::PackedRgba8 => 4,
            PixelFormat::FloatRgba32 => 4 * std::mem::size_of::<f32>(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Bilinear,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown filter mode '{0}', expected 'nearest' (0) or 'bilinear' (1)")]
pub struct ParseFilterModeError(String);

impl FromStr for FilterMode {
    type Err = ParseFilterModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "nearest" => Ok(FilterMode::Nearest),
            "1" | "bilinear" => Ok(FilterMode::Bilinear),
            _ => Err(ParseFilterModeError(s.to_string())),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::Nearest => write!(f, "nearest"),
            FilterMode::Bilinear => write!(f, "bilinear"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum PixelBuffer {
    Empty,
    Packed(Vec<u32>),
    Float(Vec<f32>),
}

/// An owned 2D image, either unallocated or holding exactly
/// `width * height` pixels of a single format. Row 0 is the top row.
#[derive(Clone, Debug)]
pub struct Texture {
    width: usize,
    height: usize,
    buffer: PixelBuffer,
}

impl Default for Texture {
    fn default() -> Self {
        Self::new()
    }
}

impl Texture {
    pub fn new() -> Self {
        Self { width: 0, height: 0, buffer: PixelBuffer::Empty }
    }

    pub fn with_format(format: PixelFormat, width: usize, height: usize) -> Self {
        let mut texture = Self::new();
        texture.allocate(format, width, height);
        texture
    }

    pub fn from_packed(width: usize, height: usize, data: Vec<u32>) -> TextureResult<Self> {
        check_buffer_size(width, height, width * height, data.len())?;
        Ok(Self { width, height, buffer: PixelBuffer::Packed(data) })
    }

    pub fn from_float(width: usize, height: usize, data: Vec<f32>) -> TextureResult<Self> {
        check_buffer_size(width, height, width * height * 4, data.len())?;
        Ok(Self { width, height, buffer: PixelBuffer::Float(data) })
    }

    /// Decodes an image from disk. `.exr` files become float textures,
    /// everything else goes through the 8-bit decoder.
    pub fn from_file<P: AsRef<Path>>(path: P) -> TextureResult<Self> {
        image_io::decode(path.as_ref())
    }

    /// Encodes the texture, picking the codec from the path extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> TextureResult<()> {
        image_io::encode(self, path.as_ref())
    }

    /// Replaces any previous storage with a zeroed buffer.
    pub fn allocate(&mut self, format: PixelFormat, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.buffer = match format {
            PixelFormat::PackedRgba8 => PixelBuffer::Packed(vec![0u32; width * height]),
            PixelFormat::FloatRgba32 => PixelBuffer::Float(vec![0.0f32; width * height * 4]),
        };
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn format(&self) -> Option<PixelFormat> {
        match self.buffer {
            PixelBuffer::Empty => None,
            PixelBuffer::Packed(_) => Some(PixelFormat::PackedRgba8),
            PixelBuffer::Float(_) => Some(PixelFormat::FloatRgba32),
        }
    }

    pub fn is_allocated(&self) -> bool {
        !matches!(self.buffer, PixelBuffer::Empty)
    }

    pub fn byte_size(&self) -> usize {
        self.format()
            .map(|f| self.width * self.height * f.bytes_per_pixel())
            .unwrap_or(0)
    }

    pub fn packed_data(&self) -> Option<&[u32]> {
        match &self.buffer {
            PixelBuffer::Packed(data) => Some(data),
            _ => None,
        }
    }

    pub fn float_data(&self) -> Option<&[f32]> {
        match &self.buffer {
            PixelBuffer::Float(data) => Some(data),
            _ => None,
        }
    }

    /// Writes `color` at `(x, y)`. Coordinates must be in bounds.
    pub fn write_pixel_color(&mut self, color: RGBSpectrum, x: usize, y: usize) {
        let index = y * self.width + x;
        match &mut self.buffer {
            PixelBuffer::Packed(data) => {
                data[index] = pack_rgba8(color);
            }
            PixelBuffer::Float(data) => {
                let base = index * 4;
                data[base] = color.r();
                data[base + 1] = color.g();
                data[base + 2] = color.b();
                data[base + 3] = 1.0;
            }
            PixelBuffer::Empty => {
                log::debug!("write to unallocated texture at ({}, {}) ignored", x, y);
            }
        }
    }

    /// Reads the color at integer coordinates `(x, y)`, top-left origin.
    /// Coordinates must be in bounds.
    pub fn load_pixel_color(&self, x: usize, y: usize) -> RGBSpectrum {
        let index = y * self.width + x;
        match &self.buffer {
            PixelBuffer::Packed(data) => unpack_rgba8(data[index]),
            PixelBuffer::Float(data) => {
                let base = index * 4;
                RGBSpectrum::new(data[base], data[base + 1], data[base + 2])
            }
            PixelBuffer::Empty => RGBSpectrum::default(),
        }
    }

    pub fn fetch(&self, uv: Vector2f, filter: FilterMode) -> RGBSpectrum {
        match filter {
            FilterMode::Nearest => self.nearest_neighbour_fetch(uv.x, uv.y),
            FilterMode::Bilinear => self.bilinear_fetch(uv.x, uv.y),
        }
    }

    /// Picks the closest of the four texels around the sample point.
    ///
    /// The corner cell comes from `floor(u * (W - 1))` clamped to `[0, W - 2]`,
    /// while distances are measured to `u * (W - 2)`. This pairing is not a
    /// textbook nearest filter, but it is kept as-is so renders stay
    /// comparable with existing reference images. Ties keep the earlier corner
    /// in top-left, top-right, bottom-left, bottom-right order.
    pub fn nearest_neighbour_fetch(&self, u: Float, v: Float) -> RGBSpectrum {
        if !self.is_allocated() || self.width == 0 || self.height == 0 {
            return RGBSpectrum::default();
        }

        let max_left = self.width.saturating_sub(2) as Float;
        let max_top = self.height.saturating_sub(2) as Float;
        let left = (u * (self.width as Float - 1.0)).floor().clamp(0.0, max_left);
        let top = (v * (self.height as Float - 1.0)).floor().clamp(0.0, max_top);

        let midpoint = Vector2f::new(u * (self.width as Float - 2.0),
                                     v * (self.height as Float - 2.0));

        let corners = [
            Vector2f::new(left, top),
            Vector2f::new(left + 1.0, top),
            Vector2f::new(left, top + 1.0),
            Vector2f::new(left + 1.0, top + 1.0),
        ];

        let mut nearest = corners[0];
        let mut min_distance = Float::MAX;
        for corner in corners.iter() {
            let distance = (midpoint - corner).norm();
            if distance < min_distance {
                min_distance = distance;
                nearest = *corner;
            }
        }

        self.texel(nearest.x as usize, nearest.y as usize)
    }

    /// Standard bilinear reconstruction over the cell at `u * (W - 1)`.
    /// The top-left corner is clamped to `[0, W - 1]`; the far corner of the
    /// last cell always carries zero weight and is read clamped.
    pub fn bilinear_fetch(&self, u: Float, v: Float) -> RGBSpectrum {
        if !self.is_allocated() || self.width == 0 || self.height == 0 {
            return RGBSpectrum::default();
        }

        let left = (u * (self.width as Float - 1.0)).floor().clamp(0.0, self.width as Float - 1.0);
        let top = (v * (self.height as Float - 1.0)).floor().clamp(0.0, self.height as Float - 1.0);
        let right = left + 1.0;
        let bottom = top + 1.0;

        let middle = Vector2f::new(u * (self.width as Float - 1.0),
                                   v * (self.height as Float - 1.0));

        let (x0, y0) = (left as usize, top as usize);
        let (x1, y1) = (right as usize, bottom as usize);

        let upper = self.texel(x0, y0) * (right - middle.x)
            + self.texel(x1, y0) * (middle.x - left);
        let lower = self.texel(x0, y1) * (right - middle.x)
            + self.texel(x1, y1) * (middle.x - left);

        upper * (bottom - middle.y) + lower * (middle.y - top)
    }

    // Both filters only ever step one texel past a clamped corner.
    fn texel(&self, x: usize, y: usize) -> RGBSpectrum {
        self.load_pixel_color(x.min(self.width - 1), y.min(self.height - 1))
    }

    pub(crate) fn flip_vertical(&mut self) {
        let (width, height) = (self.width, self.height);
        match &mut self.buffer {
            PixelBuffer::Packed(data) => flip_rows(data, width, height),
            PixelBuffer::Float(data) => flip_rows(data, width * 4, height),
            PixelBuffer::Empty => {}
        }
    }
}

fn check_buffer_size(width: usize, height: usize, expected: usize, actual: usize) -> TextureResult<()> {
    if expected != actual {
        return Err(TextureError::BufferSize { width, height, expected, actual });
    }
    Ok(())
}

fn flip_rows<T>(data: &mut [T], row_len: usize, height: usize) {
    for y in 0..height / 2 {
        let mirrored = height - 1 - y;
        let (head, tail) = data.split_at_mut(mirrored * row_len);
        head[y * row_len..(y + 1) * row_len].swap_with_slice(&mut tail[..row_len]);
    }
}

fn quantize(channel: Float) -> u32 {
    // NaN saturates to 0 in the cast.
    (channel * 255.0).round().clamp(0.0, 255.0) as u32
}

pub fn pack_rgba8(color: RGBSpectrum) -> u32 {
    let r = quantize(color.r());
    let g = quantize(color.g()) << 8;
    let b = quantize(color.b()) << 16;
    let a = 255u32 << 24;
    r | g | b | a
}

pub fn unpack_rgba8(value: u32) -> RGBSpectrum {
    let r = value & 255;
    let g = (value >> 8) & 255;
    let b = (value >> 16) & 255;
    RGBSpectrum::new(r as Float / 255.0, g as Float / 255.0, b as Float / 255.0)
}

pub fn triangle_area(a: &Vector3f, b: &Vector3f, c: &Vector3f) -> Float {
    (b - a).cross(&(c - a)).norm() / 2.0
}

/// Interpolates per-vertex UVs at `p` using area-ratio barycentric weights.
/// The weights are neither clamped nor renormalised, so points on an edge may
/// land marginally outside `[0, 1]`.
pub fn get_uv_coordinates(p: &Vector3f,
                          v1: &Vector3f, v2: &Vector3f, v3: &Vector3f,
                          uv1: &Vector2f, uv2: &Vector2f, uv3: &Vector2f) -> TextureResult<Vector2f> {
    let area = triangle_area(v1, v2, v3);
    if !(area > DEGENERATE_AREA) {
        return Err(TextureError::DegenerateTriangle { area });
    }

    let alpha = triangle_area(p, v2, v3) / area;
    let beta = triangle_area(v1, p, v3) / area;
    let gamma = triangle_area(v1, v2, p) / area;

    Ok(uv1 * alpha + uv2 * beta + uv3 * gamma)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_checker(width: usize, height: usize) -> Texture {
        let mut tex = Texture::with_format(PixelFormat::FloatRgba32, width, height);
        for y in 0..height {
            for x in 0..width {
                let c = RGBSpectrum::new(x as Float, y as Float, (x + y * width) as Float);
                tex.write_pixel_color(c, x, y);
            }
        }
        tex
    }

    fn assert_close(a: RGBSpectrum, b: RGBSpectrum, tol: Float) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() <= tol, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_allocate_sizes() {
        let mut tex = Texture::new();
        assert!(!tex.is_allocated());
        assert_eq!(tex.byte_size(), 0);

        tex.allocate(PixelFormat::PackedRgba8, 5, 3);
        assert_eq!(tex.format(), Some(PixelFormat::PackedRgba8));
        assert_eq!(tex.packed_data().map(|d| d.len()), Some(15));
        assert_eq!(tex.byte_size(), 5 * 3 * 4);

        tex.allocate(PixelFormat::FloatRgba32, 2, 2);
        assert_eq!(tex.format(), Some(PixelFormat::FloatRgba32));
        assert!(tex.packed_data().is_none());
        assert_eq!(tex.float_data().map(|d| d.len()), Some(16));
        assert_eq!(tex.byte_size(), 2 * 2 * 16);
    }

    #[test]
    fn test_from_buffer_rejects_wrong_size() {
        assert!(Texture::from_packed(2, 2, vec![0; 4]).is_ok());
        assert!(matches!(Texture::from_packed(2, 2, vec![0; 3]),
                         Err(TextureError::BufferSize { expected: 4, actual: 3, .. })));
        assert!(matches!(Texture::from_float(2, 2, vec![0.0; 4]),
                         Err(TextureError::BufferSize { expected: 16, actual: 4, .. })));
    }

    #[test]
    fn test_packed_layout_and_clamp() {
        let mut tex = Texture::with_format(PixelFormat::PackedRgba8, 2, 2);
        tex.write_pixel_color(RGBSpectrum::new(1.0, 0.0, 0.0), 1, 0);
        tex.write_pixel_color(RGBSpectrum::new(2.0, -1.0, 0.5), 0, 1);

        let data = tex.packed_data().unwrap();
        assert_eq!(data[1], 0xFF0000FF);
        // 0.5 * 255 = 127.5 rounds up to 128 = 0x80
        assert_eq!(data[2], 0xFF8000FF);
        assert_eq!(data[0], 0);
    }

    #[test]
    fn test_packed_round_trip_within_quantization() {
        let mut tex = Texture::with_format(PixelFormat::PackedRgba8, 3, 2);
        let colors = [
            RGBSpectrum::new(0.2, 0.5, 1.0),
            RGBSpectrum::new(0.0, 0.333, 0.9999),
            RGBSpectrum::new(0.123, 0.456, 0.789),
        ];
        for (i, c) in colors.iter().enumerate() {
            tex.write_pixel_color(*c, i, 1);
            assert_close(tex.load_pixel_color(i, 1), *c, 0.5 / 255.0 + 1e-6);
        }
    }

    #[test]
    fn test_float_round_trip_exact() {
        let mut tex = Texture::with_format(PixelFormat::FloatRgba32, 2, 2);
        let c = RGBSpectrum::new(0.1234567, 3.5, -0.25);
        tex.write_pixel_color(c, 1, 1);
        assert_eq!(tex.load_pixel_color(1, 1), c);
        assert_eq!(tex.float_data().unwrap()[15], 1.0);
    }

    #[test]
    fn test_flip_vertical() {
        let mut tex = float_checker(2, 3);
        tex.flip_vertical();
        assert_eq!(tex.load_pixel_color(1, 0), RGBSpectrum::new(1.0, 2.0, 5.0));
        assert_eq!(tex.load_pixel_color(0, 1), RGBSpectrum::new(0.0, 1.0, 2.0));
        assert_eq!(tex.load_pixel_color(0, 2), RGBSpectrum::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_uv_at_vertices() {
        let v1 = Vector3f::new(1.0, 0.0, 2.0);
        let v2 = Vector3f::new(3.0, 1.0, 2.0);
        let v3 = Vector3f::new(0.0, 4.0, 1.0);
        let uv1 = Vector2f::new(0.1, 0.2);
        let uv2 = Vector2f::new(0.9, 0.3);
        let uv3 = Vector2f::new(0.4, 0.8);

        for (p, expected) in [(v1, uv1), (v2, uv2), (v3, uv3)].iter() {
            let uv = get_uv_coordinates(p, &v1, &v2, &v3, &uv1, &uv2, &uv3).unwrap();
            assert!((uv - expected).norm() < 1e-5, "{:?} != {:?}", uv, expected);
        }
    }

    #[test]
    fn test_uv_interior_weights_sum_to_one() {
        let v1 = Vector3f::new(0.0, 0.0, 0.0);
        let v2 = Vector3f::new(1.0, 0.0, 0.0);
        let v3 = Vector3f::new(0.0, 1.0, 0.0);
        let p = Vector3f::new(0.25, 0.25, 0.0);

        let alpha = triangle_area(&p, &v2, &v3) / triangle_area(&v1, &v2, &v3);
        let beta = triangle_area(&v1, &p, &v3) / triangle_area(&v1, &v2, &v3);
        let gamma = triangle_area(&v1, &v2, &p) / triangle_area(&v1, &v2, &v3);
        assert!((alpha - 0.5).abs() < 1e-6);
        assert!((beta - 0.25).abs() < 1e-6);
        assert!((gamma - 0.25).abs() < 1e-6);
        assert!((alpha + beta + gamma - 1.0).abs() < 1e-6);

        // Constant UVs must come back unchanged when the weights sum to one.
        let k = Vector2f::new(0.7, 0.3);
        let uv = get_uv_coordinates(&p, &v1, &v2, &v3, &k, &k, &k).unwrap();
        assert!((uv - k).norm() < 1e-6);

        let uv = get_uv_coordinates(&p, &v1, &v2, &v3,
                                    &Vector2f::new(0.0, 0.0),
                                    &Vector2f::new(1.0, 0.0),
                                    &Vector2f::new(0.0, 1.0)).unwrap();
        assert!((uv - Vector2f::new(0.25, 0.25)).norm() < 1e-6);
    }

    #[test]
    fn test_uv_degenerate_triangle_is_reported() {
        let v1 = Vector3f::new(0.0, 0.0, 0.0);
        let v2 = Vector3f::new(1.0, 1.0, 1.0);
        let v3 = Vector3f::new(2.0, 2.0, 2.0);
        let uv = Vector2f::new(0.0, 0.0);
        let result = get_uv_coordinates(&v2, &v1, &v2, &v3, &uv, &uv, &uv);
        assert!(matches!(result, Err(TextureError::DegenerateTriangle { .. })));
    }

    #[test]
    fn test_nearest_hits_texel_exactly() {
        let tex = float_checker(4, 4);
        // u * (W - 2) = 1 lands on texel column 1.
        assert_eq!(tex.nearest_neighbour_fetch(0.5, 0.5), tex.load_pixel_color(1, 1));
        assert_eq!(tex.nearest_neighbour_fetch(0.0, 0.0), tex.load_pixel_color(0, 0));
        assert_eq!(tex.nearest_neighbour_fetch(1.0, 1.0), tex.load_pixel_color(2, 2));
        assert_eq!(tex.nearest_neighbour_fetch(1.0, 0.0), tex.load_pixel_color(2, 0));
    }

    #[test]
    fn test_nearest_picks_closest_corner() {
        let tex = float_checker(4, 4);
        // u = 0.45: corner column floor(1.35) = 1, midpoint 0.9 -> column 1.
        // v = 0.9: corner row floor(2.7) = 2, midpoint 1.8 -> row 2.
        assert_eq!(tex.nearest_neighbour_fetch(0.45, 0.9), tex.load_pixel_color(1, 2));
    }

    #[test]
    fn test_nearest_clamps_out_of_range_uv() {
        let tex = float_checker(4, 4);
        assert_eq!(tex.nearest_neighbour_fetch(-0.01, -3.0), tex.load_pixel_color(0, 0));
        // Column midpoint 2.02 stays nearer column 2, row midpoint 10 snaps to row 3.
        assert_eq!(tex.nearest_neighbour_fetch(1.01, 5.0), tex.load_pixel_color(2, 3));
    }

    #[test]
    fn test_bilinear_corners_match_texels() {
        let tex = float_checker(3, 3);
        assert_eq!(tex.bilinear_fetch(0.0, 0.0), tex.load_pixel_color(0, 0));
        assert_eq!(tex.bilinear_fetch(0.5, 0.0), tex.load_pixel_color(1, 0));
        assert_eq!(tex.bilinear_fetch(0.5, 0.5), tex.load_pixel_color(1, 1));
        assert_eq!(tex.bilinear_fetch(1.0, 0.5), tex.load_pixel_color(2, 1));
        assert_eq!(tex.bilinear_fetch(1.0, 1.0), tex.load_pixel_color(2, 2));
    }

    #[test]
    fn test_bilinear_interpolates() {
        let tex = float_checker(3, 3);
        // Halfway between columns 0 and 1, and a quarter of the way into row 1.
        let c = tex.bilinear_fetch(0.25, 0.625);
        assert_close(c, RGBSpectrum::new(0.5, 1.25, 4.25), 1e-5);
    }

    #[test]
    fn test_fetch_on_empty_texture_is_black() {
        let tex = Texture::new();
        assert_eq!(tex.nearest_neighbour_fetch(0.5, 0.5), RGBSpectrum::default());
        assert_eq!(tex.bilinear_fetch(0.5, 0.5), RGBSpectrum::default());
    }

    #[test]
    fn test_single_texel_texture() {
        let mut tex = Texture::with_format(PixelFormat::FloatRgba32, 1, 1);
        let c = RGBSpectrum::new(0.3, 0.6, 0.9);
        tex.write_pixel_color(c, 0, 0);
        assert_eq!(tex.nearest_neighbour_fetch(0.7, 0.2), c);
    }

    #[test]
    fn test_filter_mode_from_str() {
        assert_eq!("0".parse::<FilterMode>(), Ok(FilterMode::Nearest));
        assert_eq!("Nearest".parse::<FilterMode>(), Ok(FilterMode::Nearest));
        assert_eq!("1".parse::<FilterMode>(), Ok(FilterMode::Bilinear));
        assert_eq!("bilinear".parse::<FilterMode>(), Ok(FilterMode::Bilinear));
        assert!("2".parse::<FilterMode>().is_err());
        assert!("trilinear".parse::<FilterMode>().is_err());
    }
}
