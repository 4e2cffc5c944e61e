//! Flick's two micro-interaction widgets, headless state machines over
//! `flick_core`'s animation engine:
//!
//! - [`SearchInput`]: a collapsed search icon that springs open into a text
//!   field and focuses it once the width settles.
//! - [`SendButton`]: a labeled button that loads, morphs into a checkmark
//!   circle, and snaps back to its idle shape.
//!
//! Rendering, layout and input plumbing belong to the embedding toolkit; the
//! widgets only expose the animated registers a renderer would bind to and a
//! narrow [`InputHost`] seam for focus and keyboard control.

mod host;
mod search_input;
mod send_button;

pub use host::{HeadlessHost, InputHost};
pub use search_input::SearchInput;
pub use send_button::{SendButton, SendPhase};

pub mod prelude {
  pub use flick_core::prelude::*;

  pub use crate::{
    host::{HeadlessHost, InputHost},
    search_input::SearchInput,
    send_button::{SendButton, SendPhase},
  };
}
