use crate::error::FlickError;

/// A physically modeled transition: the value behaves as a unit attached to a
/// damped spring anchored at the target. There is no fixed duration; the
/// animation ends when the motion settles under the rest thresholds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
  pub mass: f32,
  pub damping: f32,
  pub stiffness: f32,
}

impl Spring {
  /// Resting when both displacement and speed fall under these.
  pub const REST_DISPLACEMENT: f32 = 0.01;
  pub const REST_SPEED: f32 = 0.01;

  /// A lightly damped spring with a touch of bounce, the engine default
  /// (mass 1, damping 10, stiffness 100).
  pub const DEFAULT: Spring = Spring { mass: 1., damping: 10., stiffness: 100. };

  /// Validated construction for springs built from user input.
  pub fn new(mass: f32, damping: f32, stiffness: f32) -> Result<Self, FlickError> {
    if !(mass.is_finite() && mass > 0.) {
      return Err(FlickError::InvalidSpring { name: "mass", value: mass });
    }
    if !(damping.is_finite() && damping >= 0.) {
      return Err(FlickError::InvalidSpring { name: "damping", value: damping });
    }
    if !(stiffness.is_finite() && stiffness > 0.) {
      return Err(FlickError::InvalidSpring { name: "stiffness", value: stiffness });
    }
    Ok(Spring { mass, damping, stiffness })
  }
}

impl Default for Spring {
  fn default() -> Self { Self::DEFAULT }
}
