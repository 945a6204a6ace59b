//! Scene description files.
//!
//! A scene file pairs a [`SceneConfig`] with a list of stock components:
//! ```yaml
//! scene:
//!   width: 320
//!   height: 240
//!   target_id: stage
//!   dev_mode: true
//! components:
//!   - kind: background
//!     color: "#202020"
//!   - kind: rect
//!     x: 10
//!     y: 10
//!     width: 100
//!     height: 50
//!     color: "#ff8800"
//! ```
//! YAML (`.yaml`, `.yml`) and JSON (`.json`) are accepted.

use easel_surface::SurfaceHost;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::SceneConfig;
use crate::manager::{SceneError, SceneManager};
use crate::stock::ComponentSpec;

/// Errors loading a scene description file.
#[derive(Debug, thiserror::Error)]
pub enum SceneFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported scene file extension: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// A scene configuration plus the components to add, in render order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    pub scene: SceneConfig,
    #[serde(default)]
    pub components: Vec<ComponentSpec>,
}

impl SceneFile {
    /// Load a scene file, choosing the format from the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneFileError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, SceneFileError> = match ext.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(SceneFileError::UnsupportedFormat(path.to_path_buf())),
        };
        let text = std::fs::read_to_string(path)?;
        let file = parse(&text)?;
        tracing::debug!(
            path = %path.display(),
            components = file.components.len(),
            "loaded scene file"
        );
        Ok(file)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, SceneFileError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SceneFileError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Construct the scene against `host` and add every component.
    pub fn build<H>(self, host: &mut H) -> Result<SceneManager<H::Surface>, SceneError>
    where
        H: SurfaceHost,
        H::Surface: 'static,
    {
        let mut manager = SceneManager::new(self.scene, host)?;
        for spec in self.components {
            tracing::debug!(kind = spec.kind(), "adding stock component");
            manager.add(spec.into_factory());
        }
        Ok(manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_common::{Rgba, SceneSize};
    use easel_surface::CanvasRegistry;

    const YAML: &str = "
scene:
  width: 16
  height: 8
  target_id: stage
  dev_mode: true
components:
  - kind: background
    color: \"#000000\"
  - kind: rect
    x: 0
    y: 0
    width: 40
    height: 4
    color: \"#ff0000\"
";

    #[test]
    fn parse_yaml() {
        let file = SceneFile::from_yaml_str(YAML).unwrap();
        assert_eq!(file.scene.size(), SceneSize::new(16, 8));
        assert!(file.scene.dev_mode);
        assert_eq!(file.components.len(), 2);
        assert_eq!(file.components[0].kind(), "background");
    }

    #[test]
    fn parse_json_without_components() {
        let file = SceneFile::from_json_str(
            r#"{"scene": {"width": 2, "height": 2, "target_id": "stage"}}"#,
        )
        .unwrap();
        assert!(file.components.is_empty());
        assert!(!file.scene.dev_mode);
    }

    #[test]
    fn build_adds_components_in_order() {
        let file = SceneFile::from_yaml_str(YAML).unwrap();
        let mut host = CanvasRegistry::new().with_target("stage");
        let mut scene = file.build(&mut host).unwrap();
        assert_eq!(scene.len(), 2);

        scene.render().unwrap();
        // The rect is wider than the scene: one width warning.
        assert_eq!(scene.frame_stats().warnings.len(), 1);
        assert_eq!(scene.surface().pixel(0, 0), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(scene.surface().pixel(0, 6), Some(Rgba::BLACK));
    }

    #[test]
    fn load_from_disk_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("scene.yaml");
        std::fs::write(&yaml_path, YAML).unwrap();
        assert_eq!(SceneFile::load(&yaml_path).unwrap().components.len(), 2);

        let json_path = dir.path().join("scene.JSON");
        let json = serde_json::to_string(&SceneFile::from_yaml_str(YAML).unwrap()).unwrap();
        std::fs::write(&json_path, json).unwrap();
        assert_eq!(
            SceneFile::load(&json_path).unwrap(),
            SceneFile::from_yaml_str(YAML).unwrap()
        );
    }

    #[test]
    fn bundled_demo_scenes_parse() {
        let stage = SceneFile::from_yaml_str(include_str!("../../../demos/stage.yaml")).unwrap();
        assert_eq!(stage.components.len(), 4);
        let minimal =
            SceneFile::from_json_str(include_str!("../../../demos/minimal.json")).unwrap();
        assert_eq!(minimal.scene.size(), SceneSize::new(64, 64));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = SceneFile::load("scene.toml").unwrap_err();
        assert!(matches!(err, SceneFileError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SceneFile::load(dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, SceneFileError::Io(_)));
    }
}
