use easel_common::{ComponentId, SceneSize};
use easel_surface::{MAX_SURFACE_PIXELS, Surface, SurfaceError, SurfaceHost};
use std::time::{Duration, Instant};

use crate::component::{Component, DrawError};
use crate::config::SceneConfig;
use crate::diagnostics::{SizeWarning, check_component_size};

/// Errors from scene construction and rendering.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("cannot resolve surface target {target_id:?}: {source}")]
    SurfaceResolution {
        target_id: String,
        #[source]
        source: SurfaceError,
    },
    #[error("scene size must be non-zero, got {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("scene size {width}x{height} exceeds the limit of {max_pixels} pixels")]
    SizeTooLarge {
        width: u32,
        height: u32,
        max_pixels: usize,
    },
    #[error("component #{index} ({id}) failed to draw: {source}")]
    MalformedComponent {
        index: usize,
        id: ComponentId,
        #[source]
        source: DrawError,
    },
}

/// Statistics for the most recent render pass.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    /// 1-based render pass counter; 0 before the first pass.
    pub frame: u64,
    pub components_drawn: usize,
    /// Size warnings raised during the pass (dev mode only).
    pub warnings: Vec<SizeWarning>,
    pub frame_time: Duration,
}

struct Entry<S> {
    id: ComponentId,
    component: Component<S>,
}

/// Owns a drawing surface and the ordered components painted onto it.
///
/// Components render in insertion order. The surface is lent to each
/// factory at add time and to each draw routine during [`render`](Self::render);
/// it never leaves the manager while the scene is live.
pub struct SceneManager<S: Surface> {
    config: SceneConfig,
    surface: S,
    components: Vec<Entry<S>>,
    stats: FrameStats,
}

impl<S: Surface> SceneManager<S> {
    /// Resolve the configured target through `host`, size it and apply the
    /// configured surface options.
    ///
    /// The size is validated before the host is asked for a surface, so a
    /// rejected config leaves the target unclaimed.
    pub fn new<H>(config: SceneConfig, host: &mut H) -> Result<Self, SceneError>
    where
        H: SurfaceHost<Surface = S>,
    {
        let size = config.size();
        if size.is_empty() {
            return Err(SceneError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }
        if size
            .checked_area()
            .is_none_or(|pixels| pixels > MAX_SURFACE_PIXELS)
        {
            return Err(SceneError::SizeTooLarge {
                width: size.width,
                height: size.height,
                max_pixels: MAX_SURFACE_PIXELS,
            });
        }
        let mut surface =
            host.resolve(&config.target_id)
                .map_err(|source| SceneError::SurfaceResolution {
                    target_id: config.target_id.clone(),
                    source,
                })?;
        surface.resize(size);
        surface.apply_options(&config.surface_options);
        tracing::info!(
            target_id = %config.target_id,
            %size,
            dev_mode = config.dev_mode,
            "scene created"
        );

        Ok(Self {
            config,
            surface,
            components: Vec::new(),
            stats: FrameStats::default(),
        })
    }

    /// Build a component against the scene's surface and append it.
    ///
    /// The returned id is only needed for [`remove`](Self::remove) and
    /// inspection; it is fine to ignore it.
    pub fn add<F>(&mut self, factory: F) -> ComponentId
    where
        F: FnOnce(&S) -> Component<S>,
    {
        let component = factory(&self.surface);
        let id = ComponentId::new();
        tracing::debug!(
            component = %id.short(),
            params = %component.params(),
            index = self.components.len(),
            "component added"
        );
        self.components.push(Entry { id, component });
        id
    }

    /// Remove a component. The remaining components keep their order.
    pub fn remove(&mut self, id: ComponentId) -> Option<Component<S>> {
        let index = self.components.iter().position(|e| e.id == id)?;
        let entry = self.components.remove(index);
        tracing::debug!(component = %id.short(), index, "component removed");
        Some(entry.component)
    }

    /// Draw every component, in insertion order, onto the surface.
    ///
    /// In dev mode each component's declared size is checked first; a
    /// mismatch is logged and recorded in [`frame_stats`](Self::frame_stats)
    /// but never stops the pass. A draw failure does: the remaining
    /// components are skipped and the error is returned.
    pub fn render(&mut self) -> Result<(), SceneError> {
        let frame = self.stats.frame + 1;
        let _span = tracing::info_span!("scene_render", frame).entered();
        let frame_start = Instant::now();
        self.stats = FrameStats {
            frame,
            ..FrameStats::default()
        };

        let scene_size = self.config.size();
        let mut outcome = Ok(());
        for (index, entry) in self.components.iter_mut().enumerate() {
            if self.config.dev_mode {
                if let Some(warning) = check_component_size(entry.component.params(), scene_size)
                {
                    tracing::warn!(component = %entry.id.short(), "{warning}");
                    self.stats.warnings.push(warning);
                }
            }
            if let Err(source) = entry.component.draw(&mut self.surface) {
                outcome = Err(SceneError::MalformedComponent {
                    index,
                    id: entry.id,
                    source,
                });
                break;
            }
            self.stats.components_drawn += 1;
        }

        self.stats.frame_time = frame_start.elapsed();
        tracing::trace!(
            drawn = self.stats.components_drawn,
            warnings = self.stats.warnings.len(),
            frame_time_us = self.stats.frame_time.as_micros() as u64,
            "render pass finished"
        );
        outcome
    }

    /// Size check for `component` against this scene, without logging.
    pub fn dev_check(&self, component: &Component<S>) -> Option<SizeWarning> {
        check_component_size(component.params(), self.config.size())
    }

    pub fn scene_width(&self) -> u32 {
        self.config.width
    }

    pub fn scene_height(&self) -> u32 {
        self.config.height
    }

    pub fn scene_size(&self) -> SceneSize {
        SceneSize::new(self.scene_width(), self.scene_height())
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn target_id(&self) -> &str {
        &self.config.target_id
    }

    pub fn is_dev_mode(&self) -> bool {
        self.config.dev_mode
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Component ids in render order.
    pub fn component_ids(&self) -> Vec<ComponentId> {
        self.components.iter().map(|e| e.id).collect()
    }

    /// Components with their ids, in render order.
    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &Component<S>)> {
        self.components.iter().map(|e| (e.id, &e.component))
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component<S>> {
        self.components
            .iter()
            .find(|e| e.id == id)
            .map(|e| &e.component)
    }

    /// Render-order position of a component.
    pub fn index_of(&self, id: ComponentId) -> Option<usize> {
        self.components.iter().position(|e| e.id == id)
    }

    /// Read-only view of the surface, e.g. for readback after a pass.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Drop the components and hand back the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn frame_stats(&self) -> &FrameStats {
        &self.stats
    }
}
