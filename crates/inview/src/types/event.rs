/*! Event types delivered to visibility handlers. */

use super::{Bounds, Size};
use serde::Serialize;

/// Payload carried by `Visible` and `PositionChanged` events.
///
/// Both axes are exposed independently so callers can define arbitrary
/// partial-visibility policies ("≥ 50% of height visible") without
/// re-deriving geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Exposure {
  /// Element bounds clipped to the viewport, in window coordinates.
  pub visible_bounds: Bounds,
  /// The element's full, un-clipped layout size.
  pub size: Size,
  /// Fraction (0.0–1.0) of the element's width inside the viewport.
  pub fraction_visible_width: f32,
  /// Fraction (0.0–1.0) of the element's height inside the viewport.
  pub fraction_visible_height: f32,
}

/// Events emitted by the simple tracker variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum VisibleEvent {
  /// The element became visible.
  #[serde(rename = "visibility:visible")]
  Visible(Exposure),

  /// The element became invisible. Carries no payload: the last known bounds
  /// are stale the moment the element leaves the viewport.
  #[serde(rename = "visibility:invisible")]
  Invisible,
}

/// Events emitted by the position-tracking variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum VisiblePositionEvent {
  /// The element became visible.
  #[serde(rename = "visibility:visible")]
  Visible(Exposure),

  /// The element became invisible.
  #[serde(rename = "visibility:invisible")]
  Invisible,

  /// Visibility did not flip, but the clipped bounds moved or resized.
  #[serde(rename = "visibility:moved")]
  PositionChanged(Exposure),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn events_tag_by_name() {
    let exposure = Exposure {
      visible_bounds: Bounds::new(0, 0, 50, 100),
      size: Size::new(100, 100),
      fraction_visible_width: 0.5,
      fraction_visible_height: 1.0,
    };

    let json = serde_json::to_value(VisibleEvent::Visible(exposure)).unwrap();
    assert_eq!(json["event"], "visibility:visible");
    assert_eq!(json["data"]["fraction_visible_width"], 0.5);

    let json = serde_json::to_value(VisibleEvent::Invisible).unwrap();
    assert_eq!(json["event"], "visibility:invisible");

    let json = serde_json::to_value(VisiblePositionEvent::PositionChanged(exposure)).unwrap();
    assert_eq!(json["event"], "visibility:moved");
    assert_eq!(json["data"]["visible_bounds"]["right"], 50);
  }
}
