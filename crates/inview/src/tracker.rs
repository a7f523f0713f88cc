/*!
Visibility state machines.

Each tracker wraps the pure [`coverage`] computation with just enough state
to turn a stream of layout snapshots into deduplicated events: repeated
snapshots that do not represent a meaningful change emit nothing, and a
snapshot that changes state emits exactly one event.

Two variants share a transition core. [`VisibilityTracker`] reports only
visible/invisible flips; [`VisibilityPositionTracker`] additionally reports
movement of the clipped bounds while the flag is unchanged.
*/

use crate::types::{
  Bounds, Exposure, InviewError, InviewResult, LayoutSnapshot, VisibleEvent, VisiblePositionEvent,
};
use crate::visibility::{coverage, Coverage};

/// Handler invoked synchronously with each emitted event.
pub type Handler<E> = Box<dyn FnMut(E) + Send>;

/// How one snapshot relates to the stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
  /// Neither the flag nor the bounds changed.
  Unchanged,
  /// The element became visible.
  Shown,
  /// The element became invisible.
  Hidden,
  /// Visibility flag unchanged, bounds moved or resized.
  Moved,
}

/// State shared by both tracker variants.
#[derive(Debug)]
struct TrackerState {
  currently_visible: bool,
  last_visible_bounds: Bounds,
  detached: bool,
}

impl TrackerState {
  const fn new() -> Self {
    Self {
      currently_visible: false,
      last_visible_bounds: Bounds::ZERO,
      detached: false,
    }
  }

  /// Classify a snapshot against the stored state, then absorb it.
  fn observe(&mut self, snapshot: &LayoutSnapshot) -> InviewResult<(Transition, Coverage)> {
    if self.detached {
      return Err(InviewError::Detached);
    }

    let coverage = coverage(snapshot.size, snapshot.visible_bounds, snapshot.attached);
    let transition = if coverage.visible == self.currently_visible {
      if snapshot.visible_bounds == self.last_visible_bounds {
        Transition::Unchanged
      } else {
        Transition::Moved
      }
    } else if coverage.visible {
      Transition::Shown
    } else {
      Transition::Hidden
    };

    self.currently_visible = coverage.visible;
    self.last_visible_bounds = snapshot.visible_bounds;
    Ok((transition, coverage))
  }

  /// Force the terminal invisible state. Returns false when already detached.
  fn detach(&mut self) -> bool {
    if self.detached {
      return false;
    }
    self.detached = true;
    self.currently_visible = false;
    self.last_visible_bounds = Bounds::ZERO;
    true
  }
}

fn exposure(snapshot: &LayoutSnapshot, coverage: Coverage) -> Exposure {
  Exposure {
    visible_bounds: snapshot.visible_bounds,
    size: snapshot.size,
    fraction_visible_width: coverage.fraction_visible_width,
    fraction_visible_height: coverage.fraction_visible_height,
  }
}

/// Reports visible/invisible transitions for one element.
///
/// Snapshots that leave the visibility flag unchanged emit nothing, so the
/// handler never sees a transition that did not happen.
pub struct VisibilityTracker {
  state: TrackerState,
  handler: Handler<VisibleEvent>,
}

impl std::fmt::Debug for VisibilityTracker {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("VisibilityTracker")
      .field("state", &self.state)
      .finish_non_exhaustive()
  }
}

impl VisibilityTracker {
  /// Create a tracker that has observed no layout yet.
  pub fn new(handler: impl FnMut(VisibleEvent) + Send + 'static) -> Self {
    Self {
      state: TrackerState::new(),
      handler: Box::new(handler),
    }
  }

  /// Replace the handler. Takes effect before the next emitted event.
  pub fn set_handler(&mut self, handler: impl FnMut(VisibleEvent) + Send + 'static) {
    self.handler = Box::new(handler);
  }

  /// Last reported visibility.
  pub const fn currently_visible(&self) -> bool {
    self.state.currently_visible
  }

  /// Whether the terminal detach has been observed.
  pub const fn is_detached(&self) -> bool {
    self.state.detached
  }

  /// Feed one layout snapshot. Emits zero or one event, synchronously.
  ///
  /// Returns [`InviewError::Detached`] once [`detach`](Self::detach) has run.
  pub fn layout_changed(&mut self, snapshot: &LayoutSnapshot) -> InviewResult<()> {
    let (transition, coverage) = self.state.observe(snapshot)?;
    match transition {
      Transition::Shown => (self.handler)(VisibleEvent::Visible(exposure(snapshot, coverage))),
      Transition::Hidden => (self.handler)(VisibleEvent::Invisible),
      // Movement without a flag change is not a transition for this variant.
      Transition::Unchanged | Transition::Moved => {}
    }
    Ok(())
  }

  /// Observe the terminal detach.
  ///
  /// Emits `Invisible` unconditionally, even when the element was already
  /// invisible. Idempotent: further calls do nothing.
  pub fn detach(&mut self) {
    if self.state.detach() {
      (self.handler)(VisibleEvent::Invisible);
    }
  }
}

/// Reports visible/invisible transitions plus continuous position changes.
///
/// Superset of [`VisibilityTracker`]: dedup requires both the flag and the
/// clipped bounds to be unchanged. While the flag holds steady but the bounds
/// move, a `PositionChanged` event fires - including while invisible, where
/// the payload carries empty bounds and zero-area fractions. That quirk
/// matches the observed behavior this tracker reproduces.
pub struct VisibilityPositionTracker {
  state: TrackerState,
  handler: Handler<VisiblePositionEvent>,
}

impl std::fmt::Debug for VisibilityPositionTracker {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("VisibilityPositionTracker")
      .field("state", &self.state)
      .finish_non_exhaustive()
  }
}

impl VisibilityPositionTracker {
  /// Create a tracker that has observed no layout yet.
  pub fn new(handler: impl FnMut(VisiblePositionEvent) + Send + 'static) -> Self {
    Self {
      state: TrackerState::new(),
      handler: Box::new(handler),
    }
  }

  /// Replace the handler. Takes effect before the next emitted event.
  pub fn set_handler(&mut self, handler: impl FnMut(VisiblePositionEvent) + Send + 'static) {
    self.handler = Box::new(handler);
  }

  /// Last reported visibility.
  pub const fn currently_visible(&self) -> bool {
    self.state.currently_visible
  }

  /// Last reported visible bounds. [`Bounds::ZERO`] before the first snapshot.
  pub const fn last_visible_bounds(&self) -> Bounds {
    self.state.last_visible_bounds
  }

  /// Whether the terminal detach has been observed.
  pub const fn is_detached(&self) -> bool {
    self.state.detached
  }

  /// Feed one layout snapshot. Emits zero or one event, synchronously.
  ///
  /// Returns [`InviewError::Detached`] once [`detach`](Self::detach) has run.
  pub fn layout_changed(&mut self, snapshot: &LayoutSnapshot) -> InviewResult<()> {
    let (transition, coverage) = self.state.observe(snapshot)?;
    match transition {
      Transition::Shown => {
        (self.handler)(VisiblePositionEvent::Visible(exposure(snapshot, coverage)));
      }
      Transition::Hidden => (self.handler)(VisiblePositionEvent::Invisible),
      Transition::Moved => {
        (self.handler)(VisiblePositionEvent::PositionChanged(exposure(
          snapshot, coverage,
        )));
      }
      Transition::Unchanged => {}
    }
    Ok(())
  }

  /// Observe the terminal detach. Same contract as
  /// [`VisibilityTracker::detach`]: unconditional `Invisible`, idempotent.
  pub fn detach(&mut self) {
    if self.state.detach() {
      (self.handler)(VisiblePositionEvent::Invisible);
    }
  }
}
