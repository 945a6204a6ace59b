//! Shared value types: scene dimensions, colors, component ids and parameters.

mod types;

pub use types::{ColorParseError, ComponentId, ParamValue, Params, Rgba, SceneSize};

pub fn crate_info() -> &'static str {
    "easel-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
