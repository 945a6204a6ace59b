use easel_common::SceneSize;
use easel_surface::SurfaceOptions;
use serde::{Deserialize, Serialize};

/// Scene configuration, fixed for the lifetime of a [`SceneManager`](crate::SceneManager).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    /// Scene width in pixels. Must be non-zero.
    pub width: u32,
    /// Scene height in pixels. Must be non-zero.
    pub height: u32,
    /// Identifier the surface host resolves to a drawing surface.
    pub target_id: String,
    /// Drawing-context settings applied once the surface is sized.
    #[serde(default)]
    pub surface_options: SurfaceOptions,
    /// Run the component size check on every render pass.
    #[serde(default)]
    pub dev_mode: bool,
}

impl SceneConfig {
    pub fn new(width: u32, height: u32, target_id: impl Into<String>) -> Self {
        Self {
            width,
            height,
            target_id: target_id.into(),
            surface_options: SurfaceOptions::default(),
            dev_mode: false,
        }
    }

    pub fn with_surface_options(mut self, options: SurfaceOptions) -> Self {
        self.surface_options = options;
        self
    }

    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    pub fn size(&self) -> SceneSize {
        SceneSize::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_common::Rgba;

    #[test]
    fn builder_defaults() {
        let c = SceneConfig::new(800, 600, "stage");
        assert_eq!(c.size(), SceneSize::new(800, 600));
        assert_eq!(c.target_id, "stage");
        assert!(!c.dev_mode);
        assert_eq!(c.surface_options, SurfaceOptions::default());
    }

    #[test]
    fn deserialize_with_defaults() {
        let c: SceneConfig =
            serde_json::from_str(r#"{"width": 320, "height": 200, "target_id": "hud"}"#).unwrap();
        assert_eq!(c, SceneConfig::new(320, 200, "hud"));
    }

    #[test]
    fn deserialize_full() {
        let yaml = "
width: 640
height: 480
target_id: stage
dev_mode: true
surface_options:
  fill_style: \"#112233\"
  global_alpha: 0.5
";
        let c: SceneConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(c.dev_mode);
        assert_eq!(c.surface_options.fill_style, Rgba::rgb(0x11, 0x22, 0x33));
        assert_eq!(c.surface_options.global_alpha, 0.5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let r: Result<SceneConfig, _> = serde_json::from_str(
            r#"{"width": 1, "height": 1, "target_id": "a", "fullscreen": true}"#,
        );
        assert!(r.is_err());
    }
}
