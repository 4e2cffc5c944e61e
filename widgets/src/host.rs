/// The slice of the embedding toolkit the widgets talk back to: moving input
/// focus and dismissing an on-screen keyboard. Everything else about
/// rendering and layout stays on the toolkit side of the boundary.
pub trait InputHost {
  /// Move input focus into the widget's text field.
  fn request_focus(&self);

  /// Dismiss any active on-screen keyboard.
  fn dismiss_keyboard(&self);
}

/// A host that swallows every request, for tests and headless demos.
#[derive(Clone, Copy, Default, Debug)]
pub struct HeadlessHost;

impl InputHost for HeadlessHost {
  fn request_focus(&self) {}

  fn dismiss_keyboard(&self) {}
}
