use lyon_geom::{CubicBezierSegment, QuadraticBezierSegment};

/// Specify the rate of change of the rate over time.
pub trait Easing {
  fn easing(&self, time_rate: f32) -> f32;
}

/// Animate at a Cubic Bézier curve. Limit x value between [0., 1.], so x-axis
/// same as time rate (t == x), y-axis use as for the rate of change.
///
/// Construct `CubicBezierEasing` with two control points, the curve always
/// start from (0., 0.) to (1., 1.).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezierEasing(CubicBezierSegment<f32>);

/// Animate at a Quadratic Bézier curve, same x/y convention as
/// [`CubicBezierEasing`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadraticBezierEasing(QuadraticBezierSegment<f32>);

/// Animates at an even speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearEasing;

/// Symmetric circular arc: slow start, slow end, steepest in the middle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularEasing;

// Some const easing curves. Control points reference:
// https://developer.mozilla.org/en-US/docs/Web/CSS/animation-timing-function

/// Increases in velocity towards the middle of the animation, slowing back
/// down at the end. This is the icon cross-fade curve of the search input.
pub const EASE: CubicBezierEasing = CubicBezierEasing::new(0.25, 0.1, 0.25, 1.0);

/// Animates at an even speed.
pub const LINEAR: LinearEasing = LinearEasing;

/// Starts off slowly, increasing until complete.
pub const EASE_IN: QuadraticBezierEasing = QuadraticBezierEasing::new(0.42, 0.);

/// Starts quickly, slowing down as the animation continues.
pub const EASE_OUT: QuadraticBezierEasing = QuadraticBezierEasing::new(0.58, 1.);

/// Slow in, fast middle, slow out.
pub const EASE_IN_OUT: CubicBezierEasing = CubicBezierEasing::new(0.42, 0., 0.58, 1.);

/// Circular ease-in-out, the checkmark fade curve of the send button.
pub const CIRC_IN_OUT: CircularEasing = CircularEasing;

impl CubicBezierEasing {
  /// Construct cubic bezier by two control points; the x values must stay in
  /// the 0..=1 range for the curve to be a function of time.
  pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
    use lyon_geom::Point as LPoint;
    Self(CubicBezierSegment {
      from: LPoint::new(0., 0.),
      ctrl1: LPoint::new(x1, y1),
      ctrl2: LPoint::new(x2, y2),
      to: LPoint::new(1., 1.),
    })
  }
}

impl QuadraticBezierEasing {
  pub const fn new(x: f32, y: f32) -> Self {
    use lyon_geom::Point as LPoint;
    Self(QuadraticBezierSegment {
      from: LPoint::new(0., 0.),
      ctrl: LPoint::new(x, y),
      to: LPoint::new(1., 1.),
    })
  }
}

impl Easing for LinearEasing {
  #[inline]
  fn easing(&self, time_rate: f32) -> f32 { time_rate }
}

impl Easing for QuadraticBezierEasing {
  #[inline]
  fn easing(&self, time_rate: f32) -> f32 { self.0.y(time_rate) }
}

impl Easing for CubicBezierEasing {
  #[inline]
  fn easing(&self, time_rate: f32) -> f32 { self.0.y(time_rate.clamp(0., 1.)) }
}

impl Easing for CircularEasing {
  fn easing(&self, time_rate: f32) -> f32 {
    let t = time_rate.clamp(0., 1.);
    if t < 0.5 {
      (1. - (1. - (2. * t).powi(2)).sqrt()) / 2.
    } else {
      ((1. - (-2. * t + 2.).powi(2)).sqrt() + 1.) / 2.
    }
  }
}

impl<E: Easing + ?Sized> Easing for Box<E> {
  #[inline]
  fn easing(&self, time_rate: f32) -> f32 { (**self).easing(time_rate) }
}
