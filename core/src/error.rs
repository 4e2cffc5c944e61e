use thiserror::Error;

/// Errors produced by the animation engine.
///
/// The engine itself is infallible at run time; only configuration can be
/// rejected, and always before anything starts moving.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlickError {
  /// A spring was built with a parameter the integrator can't work with.
  #[error("invalid spring parameter `{name}`: {value}")]
  InvalidSpring { name: &'static str, value: f32 },
}
