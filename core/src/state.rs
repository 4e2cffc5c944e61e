use std::{
  cell::{Ref, RefCell, RefMut},
  rc::Rc,
};

/// A shared, single-threaded state cell.
///
/// Animated registers (`width`, opacities, corner radius) are `Stateful<f32>`
/// values shared between a widget and the animation drivers writing to them.
/// Every access happens on the event-loop thread, so a plain `RefCell` is
/// enough; the type only exists to make the sharing explicit.
pub struct Stateful<T>(Rc<RefCell<T>>);

impl<T> Stateful<T> {
  pub fn new(data: T) -> Self { Stateful(Rc::new(RefCell::new(data))) }

  /// Another writer of the same underlying data.
  pub fn clone_writer(&self) -> Self { Stateful(self.0.clone()) }

  #[track_caller]
  pub fn read(&self) -> Ref<'_, T> { self.0.borrow() }

  #[track_caller]
  pub fn write(&self) -> RefMut<'_, T> { self.0.borrow_mut() }
}

impl<T: Copy> Stateful<T> {
  #[inline]
  pub fn get(&self) -> T { *self.read() }

  #[inline]
  pub fn set(&self, v: T) { *self.write() = v; }
}

impl<T> Clone for Stateful<T> {
  fn clone(&self) -> Self { self.clone_writer() }
}
