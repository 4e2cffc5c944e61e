mod animate;
pub mod easing;
mod lerp;
mod spring;
mod transition;

pub use animate::{Animate, AnimateHandle};
pub(crate) use animate::RunningAnimate;
pub use lerp::Lerp;
pub use spring::Spring;
pub use transition::{AnimateProgress, EasingTransition};
