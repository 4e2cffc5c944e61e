//! The animated send button: `Idle → Loading → Success → Idle`. A press
//! kicks off the (simulated) submission; when it completes the button morphs
//! into a checkmark circle and then snaps back to its labeled idle shape.

use std::{
  cell::RefCell,
  rc::{Rc, Weak},
  time::Duration,
};

use flick_core::prelude::*;

/// Idle shape: a labeled rounded rectangle.
const IDLE_WIDTH: f32 = 240.;
const IDLE_RADIUS: f32 = 8.;
/// Collapsed shape: icon width (40) plus padding on both sides.
const COLLAPSED_WIDTH: f32 = 48.;
/// Large enough that the corners read as a full circle at any size.
const COLLAPSED_RADIUS: f32 = 9999.;

/// The simulated submission latency.
const SEND_DELAY: Duration = Duration::from_millis(1000);
const CHECKMARK_FADE: Duration = Duration::from_millis(200);

/// Which of the button's three faces is showing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SendPhase {
  Idle,
  Loading,
  /// Transient: the collapsing circle with the checkmark, until the width
  /// spring settles.
  Success,
}

/// The morphing send button. See the module docs.
///
/// Presses while a cycle is in flight are ignored rather than racing two
/// delays against each other. Dropping the widget mid-cycle cancels the
/// pending delay and every running animation.
pub struct SendButton {
  inner: Rc<RefCell<ButtonInner>>,
}

struct ButtonInner {
  ui: Scheduler,
  phase: SendPhase,
  width: Stateful<f32>,
  corner_radius: Stateful<f32>,
  checkmark_opacity: Stateful<f32>,
  delay: Option<TimerHandle>,
  width_anim: Option<AnimateHandle>,
  radius_anim: Option<AnimateHandle>,
  checkmark_anim: Option<AnimateHandle>,
}

impl SendButton {
  pub fn new(ui: &Scheduler) -> Self {
    SendButton {
      inner: Rc::new(RefCell::new(ButtonInner {
        ui: ui.clone(),
        phase: SendPhase::Idle,
        width: Stateful::new(IDLE_WIDTH),
        corner_radius: Stateful::new(IDLE_RADIUS),
        checkmark_opacity: Stateful::new(0.),
        delay: None,
        width_anim: None,
        radius_anim: None,
        checkmark_anim: None,
      })),
    }
  }

  /// Submit. Returns whether the press was accepted: a press while a cycle
  /// is already in flight is ignored.
  pub fn press(&self) -> bool {
    let weak = Rc::downgrade(&self.inner);
    let mut inner = self.inner.borrow_mut();
    if inner.phase != SendPhase::Idle {
      log::debug!("send press ignored while {:?}", inner.phase);
      return false;
    }
    inner.phase = SendPhase::Loading;
    let ui = inner.ui.clone();
    inner.delay = Some(ui.timer(SEND_DELAY, move || finish_submit(&weak)));
    true
  }

  pub fn phase(&self) -> SendPhase { self.inner.borrow().phase }

  pub fn is_loading(&self) -> bool { self.phase() == SendPhase::Loading }

  pub fn width(&self) -> f32 { self.inner.borrow().width.get() }

  pub fn corner_radius(&self) -> f32 { self.inner.borrow().corner_radius.get() }

  pub fn checkmark_opacity(&self) -> f32 { self.inner.borrow().checkmark_opacity.get() }
}

/// The delay elapsed: play the success choreography. The checkmark fades in
/// on a short circular curve while the width springs down to a circle; the
/// corner radius springs out to keep the shape round the whole way.
fn finish_submit(weak: &Weak<RefCell<ButtonInner>>) {
  let Some(rc) = weak.upgrade() else { return };
  let weak = Rc::downgrade(&rc);
  let mut inner = rc.borrow_mut();
  inner.phase = SendPhase::Success;
  inner.delay = None;

  let ui = inner.ui.clone();
  let fade = EasingTransition { duration: CHECKMARK_FADE, easing: easing::CIRC_IN_OUT };
  inner.checkmark_anim = Some(Animate::timed(&inner.checkmark_opacity, 1., fade).run(&ui));
  inner.radius_anim =
    Some(Animate::spring(&inner.corner_radius, COLLAPSED_RADIUS, Spring::default()).run(&ui));
  inner.width_anim = Some(
    Animate::spring(&inner.width, COLLAPSED_WIDTH, Spring::default())
      .on_complete(move || {
        if let Some(rc) = weak.upgrade() {
          rc.borrow_mut().reset_idle();
        }
      })
      .run(&ui),
  );
}

impl ButtonInner {
  /// Snap straight back to the idle labeled shape; the button never rests in
  /// its circular form.
  fn reset_idle(&mut self) {
    self.width_anim = None;
    self.radius_anim = None;
    self.checkmark_anim = None;
    self.phase = SendPhase::Idle;
    self.width.set(IDLE_WIDTH);
    self.corner_radius.set(IDLE_RADIUS);
    self.checkmark_opacity.set(0.);
  }
}
