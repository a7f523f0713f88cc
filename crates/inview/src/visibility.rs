/*!
Pure visibility computation.

Given an element's full size and its viewport-clipped bounds, decide whether
the element is visible and what fraction of each axis lies inside the
viewport. Stateless, deterministic, and total: degenerate sizes produce zero
fractions instead of failing.
*/

use crate::types::{Bounds, Size};

/// Result of one visibility computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coverage {
  /// True when the element is attached and its clipped bounds enclose area.
  pub visible: bool,
  /// Fraction (0.0–1.0) of the element's width inside the viewport.
  pub fraction_visible_width: f32,
  /// Fraction (0.0–1.0) of the element's height inside the viewport.
  pub fraction_visible_height: f32,
}

/// Compute visibility and per-axis visible fractions.
pub fn coverage(size: Size, visible_bounds: Bounds, attached: bool) -> Coverage {
  Coverage {
    visible: attached && !visible_bounds.is_empty(),
    fraction_visible_width: fraction(visible_bounds.width(), size.width),
    fraction_visible_height: fraction(visible_bounds.height(), size.height),
  }
}

/// Visible span over full span. Zero when the full span has no extent.
fn fraction(visible: i32, full: i32) -> f32 {
  if full <= 0 {
    0.0
  } else {
    visible as f32 / full as f32
  }
}
