use easel_common::{ParamValue, Params, Rgba};
use std::fmt;

/// Failure raised by a component's draw routine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DrawError {
    #[error("missing parameter {0:?}")]
    MissingParam(String),
    #[error("parameter {name:?} must be {expected}")]
    InvalidParam { name: String, expected: &'static str },
    #[error("surface error: {0}")]
    Surface(String),
}

/// Paint routine bound to a component.
pub type DrawFn<S> = Box<dyn FnMut(&mut S, &Params) -> Result<(), DrawError>>;

/// Builds a component against the scene's surface at add time.
pub type BoxedFactory<S> = Box<dyn FnOnce(&S) -> Component<S>>;

/// A paintable unit: declared parameters plus the routine that paints them.
///
/// The draw routine receives the surface only for the duration of a render
/// pass; the component never owns it.
pub struct Component<S> {
    params: Params,
    draw: DrawFn<S>,
}

impl<S> Component<S> {
    pub fn new<F>(params: Params, draw: F) -> Self
    where
        F: FnMut(&mut S, &Params) -> Result<(), DrawError> + 'static,
    {
        Self {
            params,
            draw: Box::new(draw),
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Invoke the draw routine with this component's params.
    pub fn draw(&mut self, surface: &mut S) -> Result<(), DrawError> {
        (self.draw)(surface, &self.params)
    }
}

impl<S> fmt::Debug for Component<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Numeric parameter `key`, or the error a draw routine should return.
pub fn require_number(params: &Params, key: &str) -> Result<f64, DrawError> {
    match params.get(key) {
        None => Err(DrawError::MissingParam(key.to_string())),
        Some(ParamValue::Number(n)) => Ok(*n),
        Some(_) => Err(DrawError::InvalidParam {
            name: key.to_string(),
            expected: "a number",
        }),
    }
}

/// Color parameter `key`, stored as a hex string.
pub fn require_color(params: &Params, key: &str) -> Result<Rgba, DrawError> {
    let invalid = || DrawError::InvalidParam {
        name: key.to_string(),
        expected: "a hex color string",
    };
    match params.get(key) {
        None => Err(DrawError::MissingParam(key.to_string())),
        Some(ParamValue::Text(s)) => s.parse().map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}
