use easel_common::{Params, SceneSize};
use std::fmt;

/// Remediation hint appended to every size warning.
pub const SIZE_RECOMMENDATION: &str = "Recommendation: Make sure the component implementation \
     respects the scene size. Or that it renders itself responsively.";

/// A component declares dimensions larger than the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SizeWarning {
    Width { component: f64, scene: u32 },
    Height { component: f64, scene: u32 },
}

impl fmt::Display for SizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width { component, scene } => write!(
                f,
                "Component width {component} is larger than scene width of {scene}. {SIZE_RECOMMENDATION}"
            ),
            Self::Height { component, scene } => write!(
                f,
                "Component height {component} is larger than scene height of {scene}. {SIZE_RECOMMENDATION}"
            ),
        }
    }
}

/// Compare declared `width`/`height` params against the scene.
///
/// Width is checked first and wins: a component too wide and too tall
/// yields only the width warning. Missing or non-numeric dimensions are
/// never reported.
pub fn check_component_size(params: &Params, scene: SceneSize) -> Option<SizeWarning> {
    if let Some(w) = params.width().filter(|w| *w > f64::from(scene.width)) {
        return Some(SizeWarning::Width {
            component: w,
            scene: scene.width,
        });
    }
    params
        .height()
        .filter(|h| *h > f64::from(scene.height))
        .map(|h| SizeWarning::Height {
            component: h,
            scene: scene.height,
        })
}
