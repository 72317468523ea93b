//! Breakpoint projection and frame classification.

pub mod coords;
pub mod frame;

pub use coords::{classify_region, project, Projection};
pub use frame::{classify, junction, FrameJunction};
