use easel_common::{Rgba, SceneSize};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Drawing-context settings applied to a surface.
///
/// Every field has a canvas-style default, so a scene file only needs to
/// name the settings it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurfaceOptions {
    /// Color used by `fill_rect`.
    pub fill_style: Rgba,
    /// Color used by `stroke_rect`.
    pub stroke_style: Rgba,
    /// Stroke width in pixels. Non-positive or non-finite values are ignored.
    pub line_width: f32,
    /// Opacity multiplier for every paint operation, clamped to `[0, 1]`.
    pub global_alpha: f32,
    /// Whether scaled image draws are smoothed. Carried for hosts that scale.
    pub image_smoothing: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            fill_style: Rgba::BLACK,
            stroke_style: Rgba::BLACK,
            line_width: 1.0,
            global_alpha: 1.0,
            image_smoothing: true,
        }
    }
}

impl SurfaceOptions {
    /// Merge `incoming` over `self`, dropping values a 2D context would reject.
    pub fn merged(&self, incoming: &SurfaceOptions) -> SurfaceOptions {
        let line_width = if incoming.line_width.is_finite() && incoming.line_width > 0.0 {
            incoming.line_width
        } else {
            self.line_width
        };
        let global_alpha = if incoming.global_alpha.is_finite() {
            incoming.global_alpha.clamp(0.0, 1.0)
        } else {
            self.global_alpha
        };
        SurfaceOptions {
            fill_style: incoming.fill_style,
            stroke_style: incoming.stroke_style,
            line_width,
            global_alpha,
            image_smoothing: incoming.image_smoothing,
        }
    }
}

/// A resizable 2D paint target.
///
/// Rectangles are given as an origin and an extent in surface pixels;
/// negative extents are normalized and everything is clipped to the surface.
pub trait Surface {
    /// Current pixel dimensions.
    fn size(&self) -> SceneSize;

    /// Set the pixel dimensions. Clears all pixels and resets the options.
    fn resize(&mut self, size: SceneSize);

    fn options(&self) -> &SurfaceOptions;

    /// Apply drawing-context settings, see [`SurfaceOptions::merged`].
    fn apply_options(&mut self, options: &SurfaceOptions);

    /// Reset pixels inside the rectangle to fully transparent.
    fn clear_rect(&mut self, origin: Vec2, extent: Vec2);

    /// Paint the rectangle with the current fill style.
    fn fill_rect(&mut self, origin: Vec2, extent: Vec2);

    /// Outline the rectangle with the current stroke style and line width.
    fn stroke_rect(&mut self, origin: Vec2, extent: Vec2);

    /// Clear the whole surface.
    fn clear(&mut self) {
        let extent = self.size().as_vec2();
        self.clear_rect(Vec2::ZERO, extent);
    }

    fn set_fill_style(&mut self, color: Rgba) {
        let mut options = self.options().clone();
        options.fill_style = color;
        self.apply_options(&options);
    }

    fn set_stroke_style(&mut self, color: Rgba) {
        let mut options = self.options().clone();
        options.stroke_style = color;
        self.apply_options(&options);
    }

    fn set_line_width(&mut self, width: f32) {
        let mut options = self.options().clone();
        options.line_width = width;
        self.apply_options(&options);
    }
}
