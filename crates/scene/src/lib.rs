//! Scene manager: an ordered list of components painted onto one surface.
//!
//! # Invariants
//! - Scene width and height are fixed for the manager's lifetime.
//! - The surface is created exactly once, before any component is added.
//! - Components render in insertion order; removal never reorders the rest.
//! - Size diagnostics are advisory and never interrupt a render pass.
//!
//! A component failure is not contained: the first failing draw aborts the
//! pass and is returned to the caller.

mod component;
mod config;
mod diagnostics;
mod manager;
mod scene_file;
pub mod stock;

pub use component::{
    BoxedFactory, Component, DrawError, DrawFn, require_color, require_number,
};
pub use config::SceneConfig;
pub use diagnostics::{SIZE_RECOMMENDATION, SizeWarning, check_component_size};
pub use manager::{FrameStats, SceneError, SceneManager};
pub use scene_file::{SceneFile, SceneFileError};
pub use stock::ComponentSpec;

pub fn crate_info() -> &'static str {
    "easel-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}
