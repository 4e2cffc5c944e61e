//! The animated search input: a collapsed icon that springs open into a text
//! field spanning the screen width, and collapses back with a heavily damped
//! spring so the close never overshoots.

use std::{
  cell::RefCell,
  rc::{Rc, Weak},
  time::Duration,
};

use flick_core::prelude::*;

use crate::host::InputHost;

/// Horizontal padding reserved beside the field (16 on each side).
const H_PADDING: f32 = 32.;
/// Width of the icon slot at the field's trailing edge.
const ICON_SLOT: f32 = 48.;
/// Text inset applied while the field is open.
const OPEN_LEFT_PADDING: f32 = 16.;

const ICON_FADE: Duration = Duration::from_millis(900);

/// Collapse spring: overdamped so the field glides shut without bounce.
const CLOSE_SPRING: Spring = Spring { mass: 1., damping: 100., stiffness: 100. };

/// The expanding search field. See the module docs.
///
/// All methods are synchronous handlers meant to run on the event loop that
/// was passed to [`SearchInput::new`]; the animated registers are sampled by
/// that same loop. Dropping the widget cancels anything still in flight,
/// including a not-yet-delivered focus request.
pub struct SearchInput {
  inner: Rc<RefCell<SearchInner>>,
}

struct SearchInner {
  ui: Scheduler,
  host: Rc<dyn InputHost>,
  screen_width: f32,
  is_open: bool,
  text: String,
  width: Stateful<f32>,
  left_padding: Stateful<f32>,
  search_icon_opacity: Stateful<f32>,
  close_icon_opacity: Stateful<f32>,
  width_anim: Option<AnimateHandle>,
  fade_search: Option<AnimateHandle>,
  fade_close: Option<AnimateHandle>,
}

impl SearchInput {
  pub fn new(ui: &Scheduler, host: Rc<dyn InputHost>, screen_width: f32) -> Self {
    SearchInput {
      inner: Rc::new(RefCell::new(SearchInner {
        ui: ui.clone(),
        host,
        screen_width,
        is_open: false,
        text: String::new(),
        width: Stateful::new(0.),
        left_padding: Stateful::new(0.),
        search_icon_opacity: Stateful::new(1.),
        close_icon_opacity: Stateful::new(0.),
        width_anim: None,
        fade_search: None,
        fade_close: None,
      })),
    }
  }

  /// Expand the field. The icons cross-fade on a 900ms eased curve while the
  /// width springs out; focus moves into the field only once the width
  /// settles, never while it is still invisible.
  pub fn open(&self) {
    let weak = Rc::downgrade(&self.inner);
    let mut inner = self.inner.borrow_mut();
    if inner.is_open {
      log::debug!("search input already open, ignoring");
      return;
    }
    inner.is_open = true;
    inner.left_padding.set(OPEN_LEFT_PADDING);
    inner.cross_fade_icons(0., 1.);

    let ui = inner.ui.clone();
    let target = inner.expanded_width();
    inner.width_anim = Some(
      Animate::spring(&inner.width, target, Spring::default())
        .on_complete(move || focus_if_still_open(&weak))
        .run(&ui),
    );
  }

  /// Collapse the field: dismiss the keyboard, clear the text, fade the
  /// icons back and glide the width to zero. Safe to call repeatedly; the
  /// end state is the same.
  pub fn close(&self) {
    let mut inner = self.inner.borrow_mut();
    inner.host.dismiss_keyboard();
    inner.text.clear();
    inner.is_open = false;
    inner.left_padding.set(0.);
    inner.cross_fade_icons(1., 0.);

    let ui = inner.ui.clone();
    // Replacing the handle stops an in-flight open, so its pending focus
    // callback dies with it.
    inner.width_anim = Some(Animate::spring(&inner.width, 0., CLOSE_SPRING).run(&ui));
  }

  /// Replace the field's text, as a host text input would on change.
  pub fn set_text(&self, text: impl Into<String>) { self.inner.borrow_mut().text = text.into(); }

  pub fn text(&self) -> String { self.inner.borrow().text.clone() }

  pub fn is_open(&self) -> bool { self.inner.borrow().is_open }

  /// The width the field expands to on this screen.
  pub fn expanded_width(&self) -> f32 { self.inner.borrow().expanded_width() }

  pub fn width(&self) -> f32 { self.inner.borrow().width.get() }

  pub fn left_padding(&self) -> f32 { self.inner.borrow().left_padding.get() }

  pub fn search_icon_opacity(&self) -> f32 { self.inner.borrow().search_icon_opacity.get() }

  pub fn close_icon_opacity(&self) -> f32 { self.inner.borrow().close_icon_opacity.get() }
}

impl SearchInner {
  fn expanded_width(&self) -> f32 { self.screen_width - H_PADDING - ICON_SLOT }

  fn cross_fade_icons(&mut self, search_to: f32, close_to: f32) {
    let fade = EasingTransition { duration: ICON_FADE, easing: easing::EASE };
    self.fade_search =
      Some(Animate::timed(&self.search_icon_opacity, search_to, fade).run(&self.ui));
    self.fade_close = Some(Animate::timed(&self.close_icon_opacity, close_to, fade).run(&self.ui));
  }
}

fn focus_if_still_open(inner: &Weak<RefCell<SearchInner>>) {
  // The widget may have been torn down or closed while the spring settled.
  let Some(inner) = inner.upgrade() else { return };
  let inner = inner.borrow();
  if inner.is_open {
    inner.host.request_focus();
  }
}
