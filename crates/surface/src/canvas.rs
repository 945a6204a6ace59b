use easel_common::{Rgba, SceneSize};
use glam::Vec2;
use std::fmt;

use crate::surface::{Surface, SurfaceOptions};

/// In-memory RGBA8 raster surface.
///
/// Pixels are stored row-major with straight alpha. Fills and strokes
/// composite source-over, scaled by the current global alpha.
#[derive(Clone)]
pub struct Canvas {
    size: SceneSize,
    pixels: Vec<Rgba>,
    options: SurfaceOptions,
}

impl Canvas {
    /// Create a fully transparent canvas with default options.
    ///
    /// Allocates `size.area()` pixels up front; scenes refuse sizes above
    /// [`MAX_SURFACE_PIXELS`](crate::MAX_SURFACE_PIXELS) before getting here.
    pub fn new(size: SceneSize) -> Self {
        Self {
            size,
            pixels: vec![Rgba::TRANSPARENT; size.area()],
            options: SurfaceOptions::default(),
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Copy the canvas into an image buffer for encoding.
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.size.width, self.size.height, |x, y| {
            image::Rgba(self.pixels[self.index(x, y)].to_array())
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.size.width as usize + x as usize
    }

    /// Integer pixel span `[x0, x1) x [y0, y1)` covered by a rectangle,
    /// clipped to the canvas. `None` when nothing is covered.
    fn span(&self, origin: Vec2, extent: Vec2) -> Option<(u32, u32, u32, u32)> {
        let a = origin;
        let b = origin + extent;
        if !(a.is_finite() && b.is_finite()) {
            return None;
        }
        let min = a.min(b).round().max(Vec2::ZERO);
        let max = a.max(b).round().min(self.size.as_vec2());
        if min.x >= max.x || min.y >= max.y {
            return None;
        }
        Some((min.x as u32, min.y as u32, max.x as u32, max.y as u32))
    }

    fn paint(&mut self, origin: Vec2, extent: Vec2, color: Rgba) {
        let Some((x0, y0, x1, y1)) = self.span(origin, extent) else {
            return;
        };
        let alpha = f32::from(color.a) / 255.0 * self.options.global_alpha;
        if alpha <= 0.0 {
            return;
        }
        for y in y0..y1 {
            for x in x0..x1 {
                let i = self.index(x, y);
                self.pixels[i] = blend_over(self.pixels[i], color, alpha);
            }
        }
    }
}

/// Source-over composite of `src` (with effective opacity `alpha`) onto `dst`.
fn blend_over(dst: Rgba, src: Rgba, alpha: f32) -> Rgba {
    if alpha >= 1.0 {
        return Rgba::new(src.r, src.g, src.b, 255);
    }
    let da = f32::from(dst.a) / 255.0;
    let out_a = alpha + da * (1.0 - alpha);
    if out_a <= 0.0 {
        return Rgba::TRANSPARENT;
    }
    let channel = |s: u8, d: u8| {
        let c = (f32::from(s) * alpha + f32::from(d) * da * (1.0 - alpha)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba::new(
        channel(src.r, dst.r),
        channel(src.g, dst.g),
        channel(src.b, dst.b),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

impl Surface for Canvas {
    fn size(&self) -> SceneSize {
        self.size
    }

    fn resize(&mut self, size: SceneSize) {
        self.size = size;
        self.pixels = vec![Rgba::TRANSPARENT; size.area()];
        self.options = SurfaceOptions::default();
    }

    fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    fn apply_options(&mut self, options: &SurfaceOptions) {
        self.options = self.options.merged(options);
        tracing::trace!(options = ?self.options, "applied surface options");
    }

    fn clear_rect(&mut self, origin: Vec2, extent: Vec2) {
        let Some((x0, y0, x1, y1)) = self.span(origin, extent) else {
            return;
        };
        for y in y0..y1 {
            let row = self.index(x0, y);
            self.pixels[row..row + (x1 - x0) as usize].fill(Rgba::TRANSPARENT);
        }
    }

    fn fill_rect(&mut self, origin: Vec2, extent: Vec2) {
        let color = self.options.fill_style;
        self.paint(origin, extent, color);
    }

    fn stroke_rect(&mut self, origin: Vec2, extent: Vec2) {
        let color = self.options.stroke_style;
        let lw = self.options.line_width;
        let half = lw / 2.0;
        // Normalize so the bands below are laid out from the top-left corner.
        let min = origin.min(origin + extent);
        let size = extent.abs();
        let inner_h = (size.y - lw).max(0.0);

        // Top and bottom bands span the full outer width; the side bands fill
        // the gap between them so no pixel is painted twice.
        self.paint(min - Vec2::splat(half), Vec2::new(size.x + lw, lw), color);
        if size.y > 0.0 {
            self.paint(
                Vec2::new(min.x - half, min.y + size.y - half),
                Vec2::new(size.x + lw, lw),
                color,
            );
        }
        if inner_h > 0.0 {
            self.paint(
                Vec2::new(min.x - half, min.y + half),
                Vec2::new(lw, inner_h),
                color,
            );
            if size.x > 0.0 {
                self.paint(
                    Vec2::new(min.x + size.x - half, min.y + half),
                    Vec2::new(lw, inner_h),
                    color,
                );
            }
        }
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("size", &self.size)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::rgb(255, 0, 0);
    const BLUE: Rgba = Rgba::rgb(0, 0, 255);

    #[test]
    fn new_canvas_is_transparent() {
        let c = Canvas::new(SceneSize::new(4, 3));
        assert_eq!(c.pixels().len(), 12);
        assert!(c.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
        assert_eq!(c.pixel(4, 0), None);
    }

    #[test]
    fn fill_rect_uses_fill_style() {
        let mut c = Canvas::new(SceneSize::new(10, 10));
        c.set_fill_style(RED);
        c.fill_rect(Vec2::new(2.0, 2.0), Vec2::new(3.0, 3.0));
        assert_eq!(c.pixel(2, 2), Some(RED));
        assert_eq!(c.pixel(4, 4), Some(RED));
        assert_eq!(c.pixel(5, 5), Some(Rgba::TRANSPARENT));
        assert_eq!(c.pixel(1, 2), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn fill_rect_is_clipped_and_normalized() {
        let mut c = Canvas::new(SceneSize::new(4, 4));
        c.set_fill_style(BLUE);
        c.fill_rect(Vec2::new(6.0, 6.0), Vec2::new(-4.0, -4.0));
        assert_eq!(c.pixel(2, 2), Some(BLUE));
        assert_eq!(c.pixel(3, 3), Some(BLUE));
        assert_eq!(c.pixel(1, 1), Some(Rgba::TRANSPARENT));

        // Entirely outside: no effect, no panic.
        c.fill_rect(Vec2::new(-10.0, -10.0), Vec2::new(5.0, 5.0));
        assert_eq!(c.pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn global_alpha_blends_over_existing_pixels() {
        let mut c = Canvas::new(SceneSize::new(1, 1));
        c.set_fill_style(Rgba::WHITE);
        c.fill_rect(Vec2::ZERO, Vec2::ONE);
        c.apply_options(&SurfaceOptions {
            fill_style: Rgba::BLACK,
            global_alpha: 0.5,
            ..SurfaceOptions::default()
        });
        c.fill_rect(Vec2::ZERO, Vec2::ONE);
        let p = c.pixel(0, 0).unwrap();
        assert_eq!(p.a, 255);
        assert!((126..=129).contains(&p.r), "got {p:?}");
    }

    #[test]
    fn zero_alpha_paints_nothing() {
        let mut c = Canvas::new(SceneSize::new(2, 2));
        c.apply_options(&SurfaceOptions {
            fill_style: RED,
            global_alpha: 0.0,
            ..SurfaceOptions::default()
        });
        c.fill_rect(Vec2::ZERO, Vec2::splat(2.0));
        assert!(c.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
    }

    #[test]
    fn clear_rect_resets_pixels() {
        let mut c = Canvas::new(SceneSize::new(4, 4));
        c.set_fill_style(RED);
        c.fill_rect(Vec2::ZERO, Vec2::splat(4.0));
        c.clear_rect(Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0));
        assert_eq!(c.pixel(0, 0), Some(RED));
        assert_eq!(c.pixel(1, 1), Some(Rgba::TRANSPARENT));
        assert_eq!(c.pixel(2, 2), Some(Rgba::TRANSPARENT));
        assert_eq!(c.pixel(3, 3), Some(RED));

        c.clear();
        assert!(c.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
    }

    #[test]
    fn stroke_rect_outlines_without_filling() {
        let mut c = Canvas::new(SceneSize::new(10, 10));
        c.set_stroke_style(BLUE);
        c.set_line_width(2.0);
        c.stroke_rect(Vec2::new(2.0, 2.0), Vec2::new(6.0, 6.0));
        assert_eq!(c.pixel(1, 1), Some(BLUE));
        assert_eq!(c.pixel(2, 5), Some(BLUE));
        assert_eq!(c.pixel(8, 5), Some(BLUE));
        assert_eq!(c.pixel(5, 8), Some(BLUE));
        assert_eq!(c.pixel(5, 5), Some(Rgba::TRANSPARENT));
        assert_eq!(c.pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn translucent_stroke_corners_are_painted_once() {
        let mut c = Canvas::new(SceneSize::new(10, 10));
        c.apply_options(&SurfaceOptions {
            stroke_style: Rgba::new(255, 0, 0, 128),
            line_width: 2.0,
            ..SurfaceOptions::default()
        });
        c.stroke_rect(Vec2::new(2.0, 2.0), Vec2::new(6.0, 6.0));
        assert_eq!(c.pixel(1, 1), c.pixel(1, 5));
        assert_eq!(c.pixel(8, 8), c.pixel(5, 8));
    }

    #[test]
    fn resize_clears_and_resets_options() {
        let mut c = Canvas::new(SceneSize::new(2, 2));
        c.set_fill_style(RED);
        c.fill_rect(Vec2::ZERO, Vec2::splat(2.0));
        c.resize(SceneSize::new(5, 3));
        assert_eq!(c.size(), SceneSize::new(5, 3));
        assert_eq!(c.pixels().len(), 15);
        assert_eq!(c.pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(c.options(), &SurfaceOptions::default());
    }

    #[test]
    fn to_image_matches_pixels() {
        let mut c = Canvas::new(SceneSize::new(3, 2));
        c.set_fill_style(RED);
        c.fill_rect(Vec2::new(1.0, 1.0), Vec2::ONE);
        let img = c.to_image();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }
}
