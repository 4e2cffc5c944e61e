use std::time::Duration;

use super::easing::Easing;

/// Where a timed animation currently is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimateProgress {
  /// Not started moving yet.
  Dismissed,
  /// In flight; the eased rate in `0..1`.
  Between(f32),
  /// Arrived at the target.
  Finish,
}

impl AnimateProgress {
  pub fn value(&self) -> f32 {
    match self {
      AnimateProgress::Dismissed => 0.,
      AnimateProgress::Between(rate) => *rate,
      AnimateProgress::Finish => 1.,
    }
  }

  #[inline]
  pub fn is_finish(&self) -> bool { matches!(self, AnimateProgress::Finish) }
}

/// A fixed-duration transition shaped by an easing curve.
#[derive(Clone, Copy, Debug)]
pub struct EasingTransition<E> {
  pub duration: Duration,
  pub easing: E,
}

impl<E: Easing> EasingTransition<E> {
  /// The eased rate of change after `elapsed` time from start.
  pub fn rate_of_change(&self, elapsed: Duration) -> AnimateProgress {
    if elapsed >= self.duration {
      AnimateProgress::Finish
    } else if elapsed.is_zero() {
      AnimateProgress::Dismissed
    } else {
      let time_rate = elapsed.as_secs_f32() / self.duration.as_secs_f32();
      AnimateProgress::Between(self.easing.easing(time_rate))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::animation::easing;

  #[test]
  fn rate_of_change_phases() {
    let t = EasingTransition { duration: Duration::from_millis(200), easing: easing::LINEAR };
    assert_eq!(t.rate_of_change(Duration::ZERO), AnimateProgress::Dismissed);
    assert_eq!(
      t.rate_of_change(Duration::from_millis(100)),
      AnimateProgress::Between(0.5)
    );
    assert!(t.rate_of_change(Duration::from_millis(200)).is_finish());
    assert!(t.rate_of_change(Duration::from_secs(1)).is_finish());
  }

  #[test]
  fn zero_duration_finishes_immediately() {
    let t = EasingTransition { duration: Duration::ZERO, easing: easing::LINEAR };
    assert!(t.rate_of_change(Duration::ZERO).is_finish());
  }

  #[test]
  fn progress_value() {
    assert_eq!(AnimateProgress::Dismissed.value(), 0.);
    assert_eq!(AnimateProgress::Between(0.3).value(), 0.3);
    assert_eq!(AnimateProgress::Finish.value(), 1.);
  }
}
