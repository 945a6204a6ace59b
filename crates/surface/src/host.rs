use easel_common::SceneSize;
use std::collections::BTreeMap;

use crate::canvas::Canvas;
use crate::surface::Surface;

/// Size a freshly resolved surface has before a scene sizes it.
pub const DEFAULT_SURFACE_SIZE: SceneSize = SceneSize::new(300, 150);

/// Largest pixel count a surface may be sized to (8192 x 8192).
pub const MAX_SURFACE_PIXELS: usize = 1 << 26;

/// Errors resolving a target identifier to a surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("no surface target named {0:?}")]
    NotFound(String),
    #[error("surface target {0:?} is already owned by another scene")]
    AlreadyClaimed(String),
}

/// Host environment that resolves target identifiers to drawing surfaces.
pub trait SurfaceHost {
    type Surface: Surface;

    /// Look up `target_id` and hand out its surface.
    fn resolve(&mut self, target_id: &str) -> Result<Self::Surface, SurfaceError>;
}

/// In-memory host: a set of named canvas targets, each handed out once.
#[derive(Debug, Default)]
pub struct CanvasRegistry {
    targets: BTreeMap<String, bool>,
}

impl CanvasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_target(mut self, target_id: impl Into<String>) -> Self {
        self.register(target_id);
        self
    }

    /// Declare a target. Returns `false` if it was already declared.
    pub fn register(&mut self, target_id: impl Into<String>) -> bool {
        let id = target_id.into();
        if self.targets.contains_key(&id) {
            return false;
        }
        tracing::debug!(target_id = %id, "registered surface target");
        self.targets.insert(id, false);
        true
    }

    pub fn contains(&self, target_id: &str) -> bool {
        self.targets.contains_key(target_id)
    }

    /// Whether the target's surface has been handed out.
    pub fn is_claimed(&self, target_id: &str) -> bool {
        self.targets.get(target_id).copied().unwrap_or(false)
    }

    /// Declared target ids in sorted order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }
}

impl SurfaceHost for CanvasRegistry {
    type Surface = Canvas;

    fn resolve(&mut self, target_id: &str) -> Result<Canvas, SurfaceError> {
        let claimed = self
            .targets
            .get_mut(target_id)
            .ok_or_else(|| SurfaceError::NotFound(target_id.to_string()))?;
        if *claimed {
            return Err(SurfaceError::AlreadyClaimed(target_id.to_string()));
        }
        *claimed = true;
        tracing::debug!(target_id, "resolved surface target");
        Ok(Canvas::new(DEFAULT_SURFACE_SIZE))
    }
}
