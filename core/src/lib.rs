//! The engine behind Flick's micro-interaction widgets: a single-threaded
//! cooperative event loop with timers, plus an animation layer that
//! interpolates shared `f32` registers with easing curves or spring physics
//! and delivers completion callbacks through the loop, never inline.
//!
//! The loop is driven with explicit instants (`advance_by`/`advance_to`),
//! which keeps every choreography deterministic and testable without a real
//! window system behind it.

pub mod animation;
mod error;
pub mod scheduler;
pub mod state;

pub use error::FlickError;

pub mod prelude {
  pub use crate::{
    animation::{
      Animate, AnimateHandle, AnimateProgress, EasingTransition, Lerp, Spring, easing,
      easing::Easing,
    },
    error::FlickError,
    scheduler::{Scheduler, TimerHandle},
    state::Stateful,
  };
}
