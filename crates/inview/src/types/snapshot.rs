/*! The layout-observer port: what the host delivers per layout pass. */

use super::{Bounds, Size};
use serde::{Deserialize, Serialize};

/// One layout measurement for an attached element.
///
/// The host layout system must deliver a snapshot whenever the element's
/// position, size, or the viewport's clipping of it changes, and a terminal
/// detach notification exactly once when the element leaves the tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
  /// Element bounds intersected with the viewport, in window coordinates.
  /// Possibly empty.
  pub visible_bounds: Bounds,
  /// The element's own un-clipped layout size.
  pub size: Size,
  /// False once the element has left the tree.
  pub attached: bool,
}

impl LayoutSnapshot {
  pub const fn new(visible_bounds: Bounds, size: Size, attached: bool) -> Self {
    Self {
      visible_bounds,
      size,
      attached,
    }
  }
}
