use easel_common::{ComponentId, Params, SceneSize};
use easel_scene::{DrawError, SceneError, SceneManager, SizeWarning};
use easel_surface::Surface;

/// Scene inspector for developer tooling.
///
/// Provides read-only queries against a scene for debugging and for the
/// CLI's `inspect` command.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene state.
    pub fn summary<S: Surface>(scene: &SceneManager<S>) -> SceneSummary {
        let stats = scene.frame_stats();
        SceneSummary {
            size: scene.scene_size(),
            target_id: scene.target_id().to_string(),
            dev_mode: scene.is_dev_mode(),
            component_count: scene.len(),
            last_frame: stats.frame,
            last_frame_drawn: stats.components_drawn,
            last_frame_warnings: stats.warnings.len(),
        }
    }

    /// Params and render position of a single component.
    pub fn inspect_component<S: Surface>(
        scene: &SceneManager<S>,
        id: ComponentId,
    ) -> Option<ComponentInfo> {
        let index = scene.index_of(id)?;
        let component = scene.component(id)?;
        Some(ComponentInfo {
            id,
            index,
            params: component.params().clone(),
        })
    }

    /// Every component whose declared size exceeds the scene, checked
    /// regardless of dev mode and without logging.
    pub fn oversized<S: Surface>(scene: &SceneManager<S>) -> Vec<(ComponentId, SizeWarning)> {
        let found: Vec<_> = scene
            .components()
            .filter_map(|(id, c)| scene.dev_check(c).map(|w| (id, w)))
            .collect();
        tracing::debug!(oversized = found.len(), "scanned component sizes");
        found
    }

    /// Where an aborted render pass stopped, for a failed [`SceneManager::render`].
    ///
    /// `None` for errors that are not draw failures.
    pub fn render_failure<S: Surface>(
        scene: &SceneManager<S>,
        error: &SceneError,
    ) -> Option<RenderFailure> {
        let SceneError::MalformedComponent { index, id, source } = error else {
            return None;
        };
        Some(RenderFailure {
            id: *id,
            index: *index,
            drawn: scene.frame_stats().components_drawn,
            total: scene.len(),
            cause: source.clone(),
        })
    }
}

/// A render pass cut short by a component that failed to draw.
#[derive(Debug, Clone)]
pub struct RenderFailure {
    pub id: ComponentId,
    pub index: usize,
    pub drawn: usize,
    pub total: usize,
    pub cause: DrawError,
}

impl std::fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Render stopped at component #{} [{}]: drawn={} of {} ({})",
            self.index,
            self.id.short(),
            self.drawn,
            self.total,
            self.cause,
        )
    }
}

/// Summary of scene state for the inspector.
#[derive(Debug, Clone)]
pub struct SceneSummary {
    pub size: SceneSize,
    pub target_id: String,
    pub dev_mode: bool,
    pub component_count: usize,
    pub last_frame: u64,
    pub last_frame_drawn: usize,
    pub last_frame_warnings: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: target={} size={} dev_mode={} components={} frame={} drawn={} warnings={}",
            self.target_id,
            self.size,
            self.dev_mode,
            self.component_count,
            self.last_frame,
            self.last_frame_drawn,
            self.last_frame_warnings,
        )
    }
}

/// Detailed info about a single component.
#[derive(Debug, Clone)]
pub struct ComponentInfo {
    pub id: ComponentId,
    pub index: usize,
    pub params: Params,
}

impl std::fmt::Display for ComponentInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Component #{} [{}] params={}",
            self.index,
            self.id.short(),
            self.params
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_scene::{Component, SceneConfig};
    use easel_surface::{Canvas, CanvasRegistry};

    fn scene(dev_mode: bool) -> SceneManager<Canvas> {
        let mut host = CanvasRegistry::new().with_target("stage");
        let config = SceneConfig::new(800, 600, "stage").with_dev_mode(dev_mode);
        SceneManager::new(config, &mut host).unwrap()
    }

    fn sized(width: i32, height: i32) -> impl FnOnce(&Canvas) -> Component<Canvas> {
        move |_: &Canvas| {
            Component::new(
                Params::new().with("width", width).with("height", height),
                |_: &mut Canvas, _: &Params| Ok(()),
            )
        }
    }

    #[test]
    fn summary_empty_scene() {
        let scene = scene(false);
        let summary = SceneInspector::summary(&scene);
        assert_eq!(summary.size, SceneSize::new(800, 600));
        assert_eq!(summary.component_count, 0);
        assert_eq!(summary.last_frame, 0);
    }

    #[test]
    fn summary_after_render() {
        let mut scene = scene(true);
        scene.add(sized(10, 10));
        scene.add(sized(900, 10));
        scene.render().unwrap();

        let summary = SceneInspector::summary(&scene);
        assert_eq!(summary.component_count, 2);
        assert_eq!(summary.last_frame, 1);
        assert_eq!(summary.last_frame_drawn, 2);
        assert_eq!(summary.last_frame_warnings, 1);
    }

    #[test]
    fn inspect_component_found() {
        let mut scene = scene(false);
        scene.add(sized(1, 1));
        let id = scene.add(sized(3, 4));

        let info = SceneInspector::inspect_component(&scene, id).unwrap();
        assert_eq!(info.index, 1);
        assert_eq!(info.params.width(), Some(3.0));
        assert!(info.to_string().starts_with("Component #1"));
    }

    #[test]
    fn inspect_component_not_found() {
        let scene = scene(false);
        assert!(SceneInspector::inspect_component(&scene, ComponentId::new()).is_none());
    }

    #[test]
    fn oversized_ignores_dev_mode() {
        let mut scene = scene(false);
        scene.add(sized(10, 10));
        let tall = scene.add(sized(10, 601));
        let wide = scene.add(sized(801, 601));

        let found = SceneInspector::oversized(&scene);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].0, tall);
        assert!(matches!(found[0].1, SizeWarning::Height { .. }));
        assert_eq!(found[1].0, wide);
        assert!(matches!(found[1].1, SizeWarning::Width { .. }));
    }

    #[test]
    fn render_failure_reports_where_the_pass_stopped() {
        let mut scene = scene(false);
        scene.add(sized(1, 1));
        let bad = scene.add(|_: &Canvas| {
            Component::new(Params::new(), |_: &mut Canvas, _: &Params| {
                Err(DrawError::MissingParam("color".into()))
            })
        });
        scene.add(sized(1, 1));

        let err = scene.render().unwrap_err();
        let failure = SceneInspector::render_failure(&scene, &err).unwrap();
        assert_eq!(failure.id, bad);
        assert_eq!(failure.index, 1);
        assert_eq!(failure.drawn, 1);
        assert_eq!(failure.total, 3);
        let text = failure.to_string();
        assert!(text.starts_with("Render stopped at component #1"));
        assert!(text.contains("drawn=1 of 3"));
        assert!(text.contains("color"));

        assert_eq!(SceneInspector::summary(&scene).last_frame_drawn, 1);
    }

    #[test]
    fn render_failure_ignores_other_errors() {
        let scene = scene(false);
        let err = SceneError::InvalidSize {
            width: 0,
            height: 0,
        };
        assert!(SceneInspector::render_failure(&scene, &err).is_none());
    }

    #[test]
    fn summary_display() {
        let scene = scene(true);
        let s = format!("{}", SceneInspector::summary(&scene));
        assert!(s.contains("target=stage"));
        assert!(s.contains("size=800x600"));
        assert!(s.contains("dev_mode=true"));
    }
}
