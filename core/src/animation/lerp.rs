/// Linearly interpolate between two values by a factor.
pub trait Lerp {
  /// The value between `self` and `to` at `factor`; 0 is `self`, 1 is `to`.
  fn lerp(&self, to: &Self, factor: f32) -> Self;
}

impl Lerp for f32 {
  #[inline]
  fn lerp(&self, to: &Self, factor: f32) -> Self { self + (to - self) * factor }
}

impl Lerp for f64 {
  #[inline]
  fn lerp(&self, to: &Self, factor: f32) -> Self { self + (to - self) * factor as f64 }
}
