//! Developer Tooling: read-only scene inspection.
//!
//! # Invariants
//! - Inspection never mutates the scene or paints on its surface.

mod inspector;

pub use inspector::{ComponentInfo, RenderFailure, SceneInspector, SceneSummary};

pub fn crate_info() -> &'static str {
    "easel-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
