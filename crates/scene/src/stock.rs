//! Stock components, addressable from scene description files.
//!
//! Each stock component stores everything it draws in its params, so the
//! size check and the inspector see the same numbers the draw routine uses.

use easel_common::{Params, Rgba};
use easel_surface::Surface;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::component::{BoxedFactory, Component, DrawError, require_color, require_number};

fn default_line_width() -> f32 {
    1.0
}

/// Declarative description of a stock component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ComponentSpec {
    /// Clears the surface and fills it with one color.
    Background { color: Rgba },
    /// Filled rectangle.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgba,
    },
    /// Outlined rectangle.
    Frame {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgba,
        #[serde(default = "default_line_width")]
        line_width: f32,
    },
    /// Checkerboard anchored at the origin.
    Checker {
        cell: f32,
        width: f32,
        height: f32,
        even: Rgba,
        odd: Rgba,
    },
}

impl ComponentSpec {
    /// Short name used in logs and summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Background { .. } => "background",
            Self::Rect { .. } => "rect",
            Self::Frame { .. } => "frame",
            Self::Checker { .. } => "checker",
        }
    }

    /// Factory that builds this component for any surface type.
    pub fn into_factory<S: Surface + 'static>(self) -> BoxedFactory<S> {
        match self {
            Self::Background { color } => Box::new(background(color)),
            Self::Rect {
                x,
                y,
                width,
                height,
                color,
            } => Box::new(rect(Vec2::new(x, y), Vec2::new(width, height), color)),
            Self::Frame {
                x,
                y,
                width,
                height,
                color,
                line_width,
            } => Box::new(frame(
                Vec2::new(x, y),
                Vec2::new(width, height),
                color,
                line_width,
            )),
            Self::Checker {
                cell,
                width,
                height,
                even,
                odd,
            } => Box::new(checker(cell, Vec2::new(width, height), even, odd)),
        }
    }
}

fn rect_params(origin: Vec2, extent: Vec2, color: Rgba) -> Params {
    Params::new()
        .with("x", origin.x)
        .with("y", origin.y)
        .with("width", extent.x)
        .with("height", extent.y)
        .with("color", color.to_string())
}

fn read_rect(params: &Params) -> Result<(Vec2, Vec2), DrawError> {
    let origin = Vec2::new(
        require_number(params, "x")? as f32,
        require_number(params, "y")? as f32,
    );
    let extent = Vec2::new(
        require_number(params, "width")? as f32,
        require_number(params, "height")? as f32,
    );
    Ok((origin, extent))
}

/// Fills the whole surface. Its declared size is the surface size at add time.
pub fn background<S: Surface + 'static>(color: Rgba) -> impl FnOnce(&S) -> Component<S> {
    move |surface: &S| {
        let size = surface.size().as_vec2();
        Component::new(
            rect_params(Vec2::ZERO, size, color),
            |surface: &mut S, params: &Params| {
                let color = require_color(params, "color")?;
                let extent = surface.size().as_vec2();
                surface.clear();
                surface.set_fill_style(color);
                surface.fill_rect(Vec2::ZERO, extent);
                Ok(())
            },
        )
    }
}

pub fn rect<S: Surface + 'static>(
    origin: Vec2,
    extent: Vec2,
    color: Rgba,
) -> impl FnOnce(&S) -> Component<S> {
    move |_: &S| {
        Component::new(
            rect_params(origin, extent, color),
            |surface: &mut S, params: &Params| {
                let (origin, extent) = read_rect(params)?;
                surface.set_fill_style(require_color(params, "color")?);
                surface.fill_rect(origin, extent);
                Ok(())
            },
        )
    }
}

pub fn frame<S: Surface + 'static>(
    origin: Vec2,
    extent: Vec2,
    color: Rgba,
    line_width: f32,
) -> impl FnOnce(&S) -> Component<S> {
    move |_: &S| {
        Component::new(
            rect_params(origin, extent, color).with("line_width", line_width),
            |surface: &mut S, params: &Params| {
                let (origin, extent) = read_rect(params)?;
                let line_width = require_number(params, "line_width")? as f32;
                surface.set_stroke_style(require_color(params, "color")?);
                surface.set_line_width(line_width);
                surface.stroke_rect(origin, extent);
                Ok(())
            },
        )
    }
}

pub fn checker<S: Surface + 'static>(
    cell: f32,
    extent: Vec2,
    even: Rgba,
    odd: Rgba,
) -> impl FnOnce(&S) -> Component<S> {
    move |_: &S| {
        let params = Params::new()
            .with("cell", cell)
            .with("width", extent.x)
            .with("height", extent.y)
            .with("even", even.to_string())
            .with("odd", odd.to_string());
        Component::new(params, |surface: &mut S, params: &Params| {
            let cell = require_number(params, "cell")? as f32;
            if !(cell.is_finite() && cell >= 1.0) {
                return Err(DrawError::InvalidParam {
                    name: "cell".into(),
                    expected: "a number of at least 1",
                });
            }
            let width = require_number(params, "width")? as f32;
            let height = require_number(params, "height")? as f32;
            let even = require_color(params, "even")?;
            let odd = require_color(params, "odd")?;

            // Cells past the surface edge would be clipped away; stop at the edge.
            let limit = (surface.size().as_vec2() / cell).ceil();
            let cols = (width / cell).ceil().clamp(0.0, limit.x) as u32;
            let rows = (height / cell).ceil().clamp(0.0, limit.y) as u32;
            for row in 0..rows {
                for col in 0..cols {
                    let color = if (row ^ col) & 1 == 0 { even } else { odd };
                    let origin = Vec2::new(col as f32, row as f32) * cell;
                    let extent = (Vec2::new(width, height) - origin).min(Vec2::splat(cell));
                    surface.set_fill_style(color);
                    surface.fill_rect(origin, extent);
                }
            }
            Ok(())
        })
    }
}
