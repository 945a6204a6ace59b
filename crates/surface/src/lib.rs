//! Drawing surfaces: the 2D paint contract components draw against.
//!
//! # Invariants
//! - A surface is resolved from its host exactly once and then owned by a
//!   single scene.
//! - Resizing a surface clears it and resets its options, like a canvas
//!   element does.
//!
//! The raster [`Canvas`] is the in-memory backend. Anything that implements
//! [`Surface`] can be handed out by a [`SurfaceHost`] instead.

mod canvas;
mod host;
mod surface;

pub use canvas::Canvas;
pub use host::{
    CanvasRegistry, DEFAULT_SURFACE_SIZE, MAX_SURFACE_PIXELS, SurfaceError, SurfaceHost,
};
pub use surface::{Surface, SurfaceOptions};

pub fn crate_info() -> &'static str {
    "easel-surface v0.1.0"
}
