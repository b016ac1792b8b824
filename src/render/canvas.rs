//! Software RGBA canvas
//! Just the drawing operations the animations need, with normal and additive blending.

use bevy::{
    math::Vec2,
    render::{
        color::Color,
        render_resource::{Extent3d, TextureDimension, TextureFormat},
        texture::Image,
    },
};
use rayon::prelude::*;
use thiserror::Error;

use crate::util::functions::lerp;

/// The size of a canvas in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
    pub fn center(&self) -> Vec2 {
        self.as_vec2() * 0.5
    }
    /// Whether a point is within `[0, width) x [0, height)`
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width as f32
            && point.y < self.height as f32
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CanvasError {
    #[error("canvas dimensions must be non zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// How a new color is combined with what is already on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Regular alpha compositing
    #[default]
    SourceOver,
    /// Additive, saturating at white
    Lighter,
}

/// An opaque RGBA8 pixel surface, origin top left, y pointing down
#[derive(Clone, Debug)]
pub struct Canvas {
    size: CanvasSize,
    pixels: Vec<[u8; 4]>,
}

/* =================
 * Initialization
 * ================= */
impl Canvas {
    pub fn new(size: CanvasSize) -> Result<Self, CanvasError> {
        if size.is_empty() {
            return Err(CanvasError::InvalidDimensions {
                width: size.width,
                height: size.height,
            });
        }
        Ok(Self {
            size,
            pixels: vec![[0, 0, 0, 255]; (size.width * size.height) as usize],
        })
    }

    /// Resize the canvas, clearing it to black
    pub fn resize(&mut self, size: CanvasSize) -> Result<(), CanvasError> {
        *self = Self::new(size)?;
        Ok(())
    }
}

/* ======================================
 * Simple Getters
 * ====================================== */
impl Canvas {
    pub fn size(&self) -> CanvasSize {
        self.size
    }
    pub fn width(&self) -> u32 {
        self.size.width
    }
    pub fn height(&self) -> u32 {
        self.size.height
    }
    /// The raw bytes, ready to upload as a texture
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(self.pixels[(y * self.size.width + x) as usize])
    }
}

/// Blend a single premultiplied-by-coverage color into a pixel
fn blend(dst: &mut [u8; 4], src: [f32; 4], coverage: f32, mode: BlendMode) {
    let alpha = (src[3] * coverage).clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    for c in 0..3 {
        let d = dst[c] as f32 / 255.0;
        let out = match mode {
            BlendMode::SourceOver => src[c] * alpha + d * (1.0 - alpha),
            BlendMode::Lighter => d + src[c] * alpha,
        };
        dst[c] = (out.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
    dst[3] = 255;
}

fn lerp_rgba(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    std::array::from_fn(|i| lerp(a[i], b[i], t))
}

/* ======================================
 * Whole surface operations
 * ====================================== */
impl Canvas {
    /// Overwrite every pixel with an opaque color
    pub fn clear(&mut self, color: Color) {
        let [r, g, b, _] = color.as_rgba_f32();
        let px = [
            (r.clamp(0.0, 1.0) * 255.0) as u8,
            (g.clamp(0.0, 1.0) * 255.0) as u8,
            (b.clamp(0.0, 1.0) * 255.0) as u8,
            255,
        ];
        self.pixels.par_iter_mut().for_each(|p| *p = px);
    }

    /// Paint a translucent color over everything, the usual trail effect
    pub fn fade(&mut self, color: Color) {
        let src = color.as_rgba_f32();
        self.pixels
            .par_iter_mut()
            .for_each(|p| blend(p, src, 1.0, BlendMode::SourceOver));
    }

    /// Fill the whole canvas with a top to bottom gradient
    pub fn fill_vertical_gradient(&mut self, top: Color, bottom: Color) {
        let top = top.as_rgba_f32();
        let bottom = bottom.as_rgba_f32();
        let width = self.size.width as usize;
        let height = self.size.height.max(2) as f32;
        self.pixels
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                let src = lerp_rgba(top, bottom, y as f32 / (height - 1.0));
                for p in row.iter_mut() {
                    blend(p, src, 1.0, BlendMode::SourceOver);
                }
            });
    }
}

/* ======================================
 * Shapes
 * ====================================== */
impl Canvas {
    /// Blend a color into one pixel, silently ignoring anything off canvas
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, mode: BlendMode) {
        self.blend_rgba(x, y, color.as_rgba_f32(), 1.0, mode);
    }

    fn blend_rgba(&mut self, x: i32, y: i32, src: [f32; 4], coverage: f32, mode: BlendMode) {
        if x < 0 || y < 0 || x >= self.size.width as i32 || y >= self.size.height as i32 {
            return;
        }
        let idx = (y as u32 * self.size.width + x as u32) as usize;
        blend(&mut self.pixels[idx], src, coverage, mode);
    }

    /// Clip a box to the canvas, returning the inclusive-exclusive pixel ranges
    fn clip(&self, min: Vec2, max: Vec2) -> Option<(i32, i32, i32, i32)> {
        let x0 = min.x.floor().max(0.0) as i32;
        let y0 = min.y.floor().max(0.0) as i32;
        let x1 = max.x.ceil().min(self.size.width as f32) as i32;
        let y1 = max.y.ceil().min(self.size.height as f32) as i32;
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0, y0, x1, y1))
    }

    pub fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color, mode: BlendMode) {
        let src = color.as_rgba_f32();
        if let Some((x0, y0, x1, y1)) = self.clip(origin, origin + size) {
            for y in y0..y1 {
                for x in x0..x1 {
                    self.blend_rgba(x, y, src, 1.0, mode);
                }
            }
        }
    }

    /// A filled disc with a one pixel soft edge
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, mode: BlendMode) {
        if radius <= 0.0 {
            return;
        }
        let src = color.as_rgba_f32();
        let extent = Vec2::splat(radius + 1.0);
        if let Some((x0, y0, x1, y1)) = self.clip(center - extent, center + extent) {
            for y in y0..y1 {
                for x in x0..x1 {
                    let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                    let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                    if coverage > 0.0 {
                        self.blend_rgba(x, y, src, coverage, mode);
                    }
                }
            }
        }
    }

    /// A disc whose color moves from `inner` at the center to `outer` at the rim
    pub fn fill_radial_gradient(
        &mut self,
        center: Vec2,
        radius: f32,
        inner: Color,
        outer: Color,
        mode: BlendMode,
    ) {
        if radius <= 0.0 {
            return;
        }
        let inner = inner.as_rgba_f32();
        let outer = outer.as_rgba_f32();
        let extent = Vec2::splat(radius);
        if let Some((x0, y0, x1, y1)) = self.clip(center - extent, center + extent) {
            for y in y0..y1 {
                for x in x0..x1 {
                    let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                    if d < radius {
                        let src = lerp_rgba(inner, outer, d / radius);
                        self.blend_rgba(x, y, src, 1.0, mode);
                    }
                }
            }
        }
    }

    /// A one pixel wide line
    pub fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, mode: BlendMode) {
        let src = color.as_rgba_f32();
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil() as i32;
        if steps == 0 {
            self.blend_rgba(from.x as i32, from.y as i32, src, 1.0, mode);
            return;
        }
        for i in 0..=steps {
            let p = from.lerp(to, i as f32 / steps as f32);
            self.blend_rgba(p.x.floor() as i32, p.y.floor() as i32, src, 1.0, mode);
        }
    }

    /// Fill one column from `top` down to the bottom edge, used for filled curves
    pub fn fill_column(&mut self, x: i32, top: f32, color: Color, mode: BlendMode) {
        let src = color.as_rgba_f32();
        let start = top.floor().max(0.0) as i32;
        for y in start..self.size.height as i32 {
            self.blend_rgba(x, y, src, 1.0, mode);
        }
    }
}

/* ======================================
 * Engine conversion
 * ====================================== */
impl Canvas {
    /// Convert to a bevy image
    /// ```ignore
    /// let image_handle: Handle<Image> = images.add(canvas.to_bevy_image());
    /// ```
    pub fn to_bevy_image(&self) -> Image {
        Image::new(
            self.extent(),
            TextureDimension::D2,
            self.as_bytes().to_vec(),
            TextureFormat::Rgba8UnormSrgb,
        )
    }

    /// Copy the pixels into an existing image, resizing it first if needed
    pub fn copy_into(&self, image: &mut Image) {
        let extent = self.extent();
        if image.texture_descriptor.size != extent {
            image.resize(extent);
        }
        image.data.copy_from_slice(self.as_bytes());
    }

    fn extent(&self) -> Extent3d {
        Extent3d {
            width: self.size.width,
            height: self.size.height,
            depth_or_array_layers: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: u32, h: u32) -> Canvas {
        Canvas::new(CanvasSize::new(w, h)).unwrap()
    }

    #[test]
    fn test_empty_canvas_is_rejected() {
        assert_eq!(
            Canvas::new(CanvasSize::new(0, 10)).unwrap_err(),
            CanvasError::InvalidDimensions {
                width: 0,
                height: 10
            }
        );
    }

    #[test]
    fn test_clear_and_bytes() {
        let mut c = canvas(3, 2);
        c.clear(Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(c.as_bytes().len(), 3 * 2 * 4);
        assert_eq!(c.pixel(2, 1), Some([255, 0, 0, 255]));
        assert_eq!(c.pixel(3, 0), None);
    }

    #[test]
    fn test_lighter_saturates() {
        let mut c = canvas(1, 1);
        c.clear(Color::rgb(0.8, 0.8, 0.8));
        c.blend_pixel(0, 0, Color::rgb(0.8, 0.1, 0.0), BlendMode::Lighter);
        let p = c.pixel(0, 0).unwrap();
        assert_eq!(p[0], 255);
        assert!(p[1] > 204);
        assert_eq!(p[2], 204);
    }

    #[test]
    fn test_source_over_half_alpha() {
        let mut c = canvas(1, 1);
        c.clear(Color::BLACK);
        c.blend_pixel(0, 0, Color::rgba(1.0, 1.0, 1.0, 0.5), BlendMode::SourceOver);
        let p = c.pixel(0, 0).unwrap();
        assert!((127..=128).contains(&p[0]));
    }

    #[test]
    fn test_fill_circle_is_clipped_and_centered() {
        let mut c = canvas(20, 20);
        c.clear(Color::BLACK);
        c.fill_circle(Vec2::new(10.0, 10.0), 3.0, Color::WHITE, BlendMode::SourceOver);
        assert_eq!(c.pixel(10, 10), Some([255, 255, 255, 255]));
        assert_eq!(c.pixel(0, 0), Some([0, 0, 0, 255]));
        // Entirely off canvas should not panic
        c.fill_circle(Vec2::new(-50.0, -50.0), 3.0, Color::WHITE, BlendMode::SourceOver);
    }

    #[test]
    fn test_draw_line_hits_both_ends() {
        let mut c = canvas(10, 10);
        c.clear(Color::BLACK);
        c.draw_line(
            Vec2::new(1.0, 1.0),
            Vec2::new(8.0, 5.0),
            Color::WHITE,
            BlendMode::SourceOver,
        );
        assert_eq!(c.pixel(1, 1), Some([255, 255, 255, 255]));
        assert_eq!(c.pixel(8, 5), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_vertical_gradient_runs_top_to_bottom() {
        let mut c = canvas(2, 11);
        c.fill_vertical_gradient(Color::BLACK, Color::WHITE);
        assert_eq!(c.pixel(0, 0).unwrap()[0], 0);
        assert_eq!(c.pixel(1, 10).unwrap()[0], 255);
        assert!(c.pixel(0, 5).unwrap()[0] > 100);
    }

    #[test]
    fn test_copy_into_resizes_image() {
        let mut c = canvas(4, 4);
        c.clear(Color::WHITE);
        let mut image = canvas(2, 2).to_bevy_image();
        c.copy_into(&mut image);
        assert_eq!(image.texture_descriptor.size.width, 4);
        assert_eq!(image.data.len(), 4 * 4 * 4);
        assert!(image.data.iter().all(|b| *b == 255));
    }
}
