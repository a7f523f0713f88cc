/*! Geometry types in window coordinates. */

use serde::{Deserialize, Serialize};

/// An element's full layout size, before any viewport clipping.
///
/// Dimensions are ≥ 0 by the host contract; negative values are treated as
/// degenerate (zero extent) everywhere they are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
  pub width: i32,
  pub height: i32,
}

impl Size {
  pub const fn new(width: i32, height: i32) -> Self {
    Self { width, height }
  }
}

/// Rectangle in window coordinates. May be degenerate (zero width or height)
/// or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
  pub left: i32,
  pub top: i32,
  pub right: i32,
  pub bottom: i32,
}

impl Bounds {
  /// The empty rectangle at the origin.
  pub const ZERO: Bounds = Bounds {
    left: 0,
    top: 0,
    right: 0,
    bottom: 0,
  };

  pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
    Self {
      left,
      top,
      right,
      bottom,
    }
  }

  /// Width of the rectangle. Inverted rectangles count as zero.
  pub const fn width(&self) -> i32 {
    if self.right > self.left {
      self.right - self.left
    } else {
      0
    }
  }

  /// Height of the rectangle. Inverted rectangles count as zero.
  pub const fn height(&self) -> i32 {
    if self.bottom > self.top {
      self.bottom - self.top
    } else {
      0
    }
  }

  /// True when the rectangle encloses no area.
  pub const fn is_empty(&self) -> bool {
    self.width() == 0 || self.height() == 0
  }

  /// Intersection of two rectangles. [`Bounds::ZERO`] when they do not overlap.
  ///
  /// Hosts can use this to clip an element's raw bounds against the viewport
  /// before building a [`LayoutSnapshot`](super::LayoutSnapshot).
  pub fn intersect(self, other: Bounds) -> Bounds {
    let left = self.left.max(other.left);
    let top = self.top.max(other.top);
    let right = self.right.min(other.right);
    let bottom = self.bottom.min(other.bottom);
    if right > left && bottom > top {
      Bounds {
        left,
        top,
        right,
        bottom,
      }
    } else {
      Bounds::ZERO
    }
  }
}
