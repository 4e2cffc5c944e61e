//! Drivers that move a shared `f32` register toward a target, either over a
//! fixed-duration eased transition or along spring physics. Completion is
//! delivered exactly once, as a continuation queued on the event loop when
//! the motion settles; an interrupted animation never completes.

use std::{
  cell::{Cell, RefCell},
  rc::Rc,
  time::{Duration, Instant},
};

use super::{easing::Easing, lerp::Lerp, spring::Spring, transition::EasingTransition};
use crate::{
  scheduler::{Scheduler, Task},
  state::Stateful,
};

/// An animation ready to run: which register to write, where to move it, and
/// how.
pub struct Animate {
  state: Stateful<f32>,
  to: f32,
  kind: MotionKind,
  on_complete: Option<Task>,
}

enum MotionKind {
  Timed { duration: Duration, easing: Box<dyn Easing> },
  Spring(Spring),
}

/// Owner handle of a running animation.
///
/// Dropping it stops the animation where it stands, which is what ties an
/// animation's lifetime to its widget: a torn-down widget drops its handles
/// and no callback can reach it afterwards.
#[must_use = "dropping the handle stops the animation"]
pub struct AnimateHandle {
  anim: Rc<RunningAnimate>,
}

impl Animate {
  /// A fixed-duration eased animation toward `to`.
  pub fn timed<E: Easing + 'static>(
    state: &Stateful<f32>, to: f32, transition: EasingTransition<E>,
  ) -> Self {
    Animate {
      state: state.clone_writer(),
      to,
      kind: MotionKind::Timed {
        duration: transition.duration,
        easing: Box::new(transition.easing),
      },
      on_complete: None,
    }
  }

  /// A spring-physics animation toward `to`, starting at rest from the
  /// register's current value.
  pub fn spring(state: &Stateful<f32>, to: f32, spring: Spring) -> Self {
    Animate {
      state: state.clone_writer(),
      to,
      kind: MotionKind::Spring(spring),
      on_complete: None,
    }
  }

  /// Continuation to queue on the event loop once the motion settles. Not
  /// called when the animation is stopped or its handle dropped.
  pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
    self.on_complete = Some(Box::new(f));
    self
  }

  /// Start from the register's current value; the loop samples the motion
  /// every frame from here on.
  pub fn run(self, sched: &Scheduler) -> AnimateHandle {
    let Animate { state, to, kind, on_complete } = self;
    let from = state.get();
    let ctrl: Box<dyn MotionCtrl> = match kind {
      MotionKind::Timed { duration, easing } => Box::new(TimedCtrl {
        transition: EasingTransition { duration, easing },
        from,
        to,
        elapsed: Duration::ZERO,
      }),
      MotionKind::Spring(spring) => {
        Box::new(SpringCtrl { spring, to, position: from, velocity: 0. })
      }
    };

    let anim = Rc::new(RunningAnimate {
      state,
      ctrl: RefCell::new(ctrl),
      last_tick: Cell::new(sched.now()),
      status: Cell::new(Status::Running),
      on_complete: RefCell::new(on_complete),
    });
    sched.register_animation(&anim);
    AnimateHandle { anim }
  }
}

impl AnimateHandle {
  /// Stop without completing; the register keeps its last written value.
  pub fn stop(&self) {
    if self.anim.is_active() {
      self.anim.status.set(Status::Stopped);
      self.anim.on_complete.borrow_mut().take();
    }
  }

  pub fn is_running(&self) -> bool { self.anim.is_active() }
}

impl Drop for AnimateHandle {
  fn drop(&mut self) { self.stop(); }
}

#[derive(Clone, Copy, PartialEq)]
enum Status {
  Running,
  Stopped,
  Done,
}

/// A running animation registered with the scheduler's frame store.
pub(crate) struct RunningAnimate {
  state: Stateful<f32>,
  ctrl: RefCell<Box<dyn MotionCtrl>>,
  last_tick: Cell<Instant>,
  status: Cell<Status>,
  on_complete: RefCell<Option<Task>>,
}

impl RunningAnimate {
  pub(crate) fn is_active(&self) -> bool { self.status.get() == Status::Running }

  /// Advance to `now`; returns whether the animation keeps running.
  pub(crate) fn tick(&self, now: Instant, sched: &Scheduler) -> bool {
    if !self.is_active() {
      return false;
    }
    let dt = now.saturating_duration_since(self.last_tick.get());
    self.last_tick.set(now);

    let motion = self.ctrl.borrow_mut().advance(dt);
    match motion {
      MotionState::Moving(v) => {
        self.state.set(v);
        true
      }
      MotionState::Settled(v) => {
        self.state.set(v);
        self.status.set(Status::Done);
        if let Some(cb) = self.on_complete.borrow_mut().take() {
          sched.spawn_boxed(cb);
        }
        false
      }
    }
  }
}

enum MotionState {
  Moving(f32),
  /// Arrived; carries the exact target so the register ends pixel-perfect.
  Settled(f32),
}

trait MotionCtrl {
  fn advance(&mut self, dt: Duration) -> MotionState;
}

struct TimedCtrl<E> {
  transition: EasingTransition<E>,
  from: f32,
  to: f32,
  elapsed: Duration,
}

impl<E: Easing> MotionCtrl for TimedCtrl<E> {
  fn advance(&mut self, dt: Duration) -> MotionState {
    self.elapsed += dt;
    let progress = self.transition.rate_of_change(self.elapsed);
    if progress.is_finish() {
      MotionState::Settled(self.to)
    } else {
      MotionState::Moving(self.from.lerp(&self.to, progress.value()))
    }
  }
}

struct SpringCtrl {
  spring: Spring,
  to: f32,
  position: f32,
  velocity: f32,
}

impl MotionCtrl for SpringCtrl {
  fn advance(&mut self, dt: Duration) -> MotionState {
    // Semi-implicit Euler, sub-stepped so stiff springs stay stable across
    // coarse frames.
    const MAX_STEP: f32 = 0.004;
    let mut remain = dt.as_secs_f32();
    while remain > 0. {
      let step = remain.min(MAX_STEP);
      let displacement = self.position - self.to;
      let spring_force = -self.spring.stiffness * displacement;
      let damping_force = -self.spring.damping * self.velocity;
      let acceleration = (spring_force + damping_force) / self.spring.mass;
      self.velocity += acceleration * step;
      self.position += self.velocity * step;
      remain -= step;
    }

    let at_rest = (self.position - self.to).abs() < Spring::REST_DISPLACEMENT
      && self.velocity.abs() < Spring::REST_SPEED;
    if at_rest {
      self.position = self.to;
      self.velocity = 0.;
      MotionState::Settled(self.to)
    } else {
      MotionState::Moving(self.position)
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, rc::Rc};

  use super::*;
  use crate::animation::easing;

  fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    (count, move || c.set(c.get() + 1))
  }

  #[test]
  fn timed_reaches_target_and_completes_once() {
    let sched = Scheduler::new();
    let value = Stateful::new(0.0f32);
    let (count, bump) = counter();

    let transition =
      EasingTransition { duration: Duration::from_millis(200), easing: easing::LINEAR };
    let _h = Animate::timed(&value, 10., transition)
      .on_complete(bump)
      .run(&sched);

    sched.advance_by(Duration::from_millis(100));
    let mid = value.get();
    assert!(mid > 0. && mid < 10., "expected mid-flight value, got {mid}");
    assert_eq!(count.get(), 0);

    sched.advance_by(Duration::from_millis(200));
    assert_eq!(value.get(), 10.);
    assert_eq!(count.get(), 1);

    // Nothing left to fire.
    sched.advance_by(Duration::from_secs(1));
    assert_eq!(count.get(), 1);
  }

  #[test]
  fn spring_settles_exactly_at_target() {
    let sched = Scheduler::new();
    let value = Stateful::new(0.0f32);
    let (count, bump) = counter();

    let h = Animate::spring(&value, 320., Spring::default())
      .on_complete(bump)
      .run(&sched);

    sched.advance_by(Duration::from_millis(100));
    assert!(h.is_running());
    assert!(value.get() > 0.);

    sched.advance_by(Duration::from_secs(4));
    assert!(!h.is_running());
    assert_eq!(value.get(), 320.);
    assert_eq!(count.get(), 1);
  }

  #[test]
  fn overdamped_spring_creeps_in_without_overshoot() {
    let sched = Scheduler::new();
    let value = Stateful::new(320.0f32);
    let spring = Spring::new(1., 100., 100.).unwrap();
    let _h = Animate::spring(&value, 0., spring).run(&sched);

    let mut last = 320.0f32;
    for _ in 0..20 {
      sched.advance_by(Duration::from_millis(100));
      let v = value.get();
      assert!(v <= last + 1e-3, "overshoot: {v} after {last}");
      assert!(v >= 0.);
      last = v;
    }

    sched.advance_by(Duration::from_secs(15));
    assert_eq!(value.get(), 0.);
  }

  #[test]
  fn stop_keeps_current_value_and_skips_completion() {
    let sched = Scheduler::new();
    let value = Stateful::new(0.0f32);
    let (count, bump) = counter();

    let transition =
      EasingTransition { duration: Duration::from_millis(200), easing: easing::LINEAR };
    let h = Animate::timed(&value, 10., transition)
      .on_complete(bump)
      .run(&sched);

    sched.advance_by(Duration::from_millis(100));
    h.stop();
    let frozen = value.get();

    sched.advance_by(Duration::from_secs(1));
    assert_eq!(value.get(), frozen);
    assert_eq!(count.get(), 0);
  }

  #[test]
  fn dropping_the_handle_stops_the_animation() {
    let sched = Scheduler::new();
    let value = Stateful::new(0.0f32);
    let (count, bump) = counter();

    let transition =
      EasingTransition { duration: Duration::from_millis(200), easing: easing::LINEAR };
    drop(
      Animate::timed(&value, 10., transition)
        .on_complete(bump)
        .run(&sched),
    );

    sched.advance_by(Duration::from_secs(1));
    assert_eq!(value.get(), 0.);
    assert_eq!(count.get(), 0);
  }

  #[test]
  fn replacing_an_animation_starts_from_current_value() {
    let sched = Scheduler::new();
    let value = Stateful::new(0.0f32);

    let transition = EasingTransition { duration: Duration::from_millis(400), easing: easing::LINEAR };
    let h = Animate::timed(&value, 100., transition).run(&sched);
    sched.advance_by(Duration::from_millis(200));
    let mid = value.get();
    assert!(mid > 0. && mid < 100.);

    h.stop();
    let _h2 = Animate::spring(&value, 0., Spring::new(1., 100., 100.).unwrap()).run(&sched);
    sched.advance_by(Duration::from_millis(50));
    assert!(value.get() < mid, "should move back down from the interrupted value");
  }
}
