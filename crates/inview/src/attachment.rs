/*!
Attachment surface: one tracker per attached element.

Makes the host lifecycle contract concrete: `attach` creates a fresh tracker
with exclusively owned state, `layout_changed` drives it once per layout
pass, and dropping the returned handle delivers the terminal detach. Trackers
are never reused across elements; re-attaching creates a fresh id and fresh
state.

Handlers run with the registry lock released (take/replace), so a handler may
query the [`Inview`] instance, though it must not trigger layout mutations
synchronously without host support.
*/

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::tracker::{VisibilityPositionTracker, VisibilityTracker};
use crate::types::{
  ElementId, InviewError, InviewResult, LayoutSnapshot, VisibleEvent, VisiblePositionEvent,
};

/// A tracker slot. The variant is fixed at attach time.
enum Slot {
  Simple(VisibilityTracker),
  Position(VisibilityPositionTracker),
}

impl Slot {
  fn layout_changed(&mut self, snapshot: &LayoutSnapshot) -> InviewResult<()> {
    match self {
      Slot::Simple(tracker) => tracker.layout_changed(snapshot),
      Slot::Position(tracker) => tracker.layout_changed(snapshot),
    }
  }

  fn detach(&mut self) {
    match self {
      Slot::Simple(tracker) => tracker.detach(),
      Slot::Position(tracker) => tracker.detach(),
    }
  }
}

/// Registry of attached elements.
///
/// Clone is cheap (Arc bump) - hosts can hold one instance and hand clones to
/// whatever owns the layout pass. There is no coordination between elements:
/// each slot is an independent state machine.
#[derive(Clone, Default)]
pub struct Inview {
  slots: Arc<Mutex<HashMap<ElementId, Slot>>>,
}

impl std::fmt::Debug for Inview {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Inview")
      .field("attached", &self.slots.lock().len())
      .finish_non_exhaustive()
  }
}

impl Inview {
  /// Create an empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Attach an element with the simple tracker variant.
  ///
  /// The handler fires synchronously on visible/invisible transitions.
  /// Dropping the handle detaches and emits the terminal `Invisible`.
  #[must_use = "the element detaches as soon as the handle drops"]
  pub fn attach(&self, handler: impl FnMut(VisibleEvent) + Send + 'static) -> AttachmentHandle {
    self.insert(Slot::Simple(VisibilityTracker::new(handler)))
  }

  /// Attach an element with the position-tracking variant.
  ///
  /// Same contract as [`attach`](Self::attach), plus `PositionChanged` events
  /// while the visibility flag holds steady.
  #[must_use = "the element detaches as soon as the handle drops"]
  pub fn attach_with_position(
    &self,
    handler: impl FnMut(VisiblePositionEvent) + Send + 'static,
  ) -> AttachmentHandle {
    self.insert(Slot::Position(VisibilityPositionTracker::new(handler)))
  }

  fn insert(&self, slot: Slot) -> AttachmentHandle {
    let id = ElementId::new();
    self.slots.lock().insert(id, slot);
    log::debug!("Attached element {id}");
    AttachmentHandle {
      id,
      inview: self.clone(),
    }
  }

  /// Host entry point: deliver one layout snapshot for an element.
  ///
  /// The handler runs with the registry lock released; a re-entrant call for
  /// the same element during handler execution sees `ElementNotFound`.
  pub fn layout_changed(&self, id: ElementId, snapshot: &LayoutSnapshot) -> InviewResult<()> {
    // Take the slot so the handler fires without the lock held
    let mut slot = self
      .slots
      .lock()
      .remove(&id)
      .ok_or(InviewError::ElementNotFound(id))?;
    let result = slot.layout_changed(snapshot);
    self.slots.lock().insert(id, slot);
    result
  }

  /// Replace the handler of a simple-variant attachment.
  ///
  /// Takes effect before the next emitted event.
  pub fn set_handler(
    &self,
    id: ElementId,
    handler: impl FnMut(VisibleEvent) + Send + 'static,
  ) -> InviewResult<()> {
    match self.slots.lock().get_mut(&id) {
      Some(Slot::Simple(tracker)) => {
        tracker.set_handler(handler);
        Ok(())
      }
      Some(Slot::Position(_)) => Err(InviewError::VariantMismatch(id)),
      None => Err(InviewError::ElementNotFound(id)),
    }
  }

  /// Replace the handler of a position-variant attachment.
  ///
  /// Takes effect before the next emitted event.
  pub fn set_position_handler(
    &self,
    id: ElementId,
    handler: impl FnMut(VisiblePositionEvent) + Send + 'static,
  ) -> InviewResult<()> {
    match self.slots.lock().get_mut(&id) {
      Some(Slot::Position(tracker)) => {
        tracker.set_handler(handler);
        Ok(())
      }
      Some(Slot::Simple(_)) => Err(InviewError::VariantMismatch(id)),
      None => Err(InviewError::ElementNotFound(id)),
    }
  }

  /// Detach an element: emits the terminal `Invisible` and discards its state.
  ///
  /// No-op for unknown ids, so handle drop and an explicit host detach cannot
  /// double-fire.
  pub fn detach(&self, id: ElementId) {
    let slot = self.slots.lock().remove(&id);
    if let Some(mut slot) = slot {
      // Terminal event fires without the lock held
      slot.detach();
      log::debug!("Detached element {id}");
    }
  }

  /// Whether an element is currently attached.
  pub fn is_attached(&self, id: ElementId) -> bool {
    self.slots.lock().contains_key(&id)
  }
}

/// Handle to an attached element. Detaches on drop.
#[derive(Debug)]
pub struct AttachmentHandle {
  id: ElementId,
  inview: Inview,
}

impl AttachmentHandle {
  /// Identifier the host uses to deliver snapshots for this element.
  pub const fn id(&self) -> ElementId {
    self.id
  }

  /// Detach now instead of on drop.
  pub fn dispose(self) {
    // Drop performs the detach
  }
}

impl Drop for AttachmentHandle {
  fn drop(&mut self) {
    self.inview.detach(self.id);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::{Bounds, Size};
  use std::sync::Arc;

  type Log<E> = Arc<Mutex<Vec<E>>>;

  fn visible_snapshot() -> LayoutSnapshot {
    LayoutSnapshot::new(Bounds::new(0, 0, 100, 100), Size::new(100, 100), true)
  }

  fn attach_logged(inview: &Inview) -> (AttachmentHandle, Log<VisibleEvent>) {
    let log: Log<VisibleEvent> = Arc::default();
    let sink = Arc::clone(&log);
    let handle = inview.attach(move |event| sink.lock().push(event));
    (handle, log)
  }

  #[test]
  fn snapshots_route_to_the_right_element() {
    let inview = Inview::new();
    let (first, first_log) = attach_logged(&inview);
    let (second, second_log) = attach_logged(&inview);

    inview.layout_changed(first.id(), &visible_snapshot()).unwrap();
    assert_eq!(first_log.lock().len(), 1);
    assert!(second_log.lock().is_empty(), "streams are independent");

    inview.layout_changed(second.id(), &visible_snapshot()).unwrap();
    assert_eq!(second_log.lock().len(), 1);
  }

  #[test]
  fn drop_detaches_and_emits_terminal_invisible() {
    let inview = Inview::new();
    let (handle, log) = attach_logged(&inview);
    let id = handle.id();
    inview.layout_changed(id, &visible_snapshot()).unwrap();

    drop(handle);
    assert_eq!(log.lock().last(), Some(&VisibleEvent::Invisible));
    assert!(!inview.is_attached(id));

    let result = inview.layout_changed(id, &visible_snapshot());
    assert!(matches!(result, Err(InviewError::ElementNotFound(_))));
  }

  #[test]
  fn dispose_equals_drop() {
    let inview = Inview::new();
    let (handle, log) = attach_logged(&inview);
    let id = handle.id();

    handle.dispose();
    assert_eq!(log.lock().as_slice(), [VisibleEvent::Invisible]);
    assert!(!inview.is_attached(id));
  }

  #[test]
  fn explicit_detach_then_drop_fires_once() {
    let inview = Inview::new();
    let (handle, log) = attach_logged(&inview);

    inview.detach(handle.id());
    drop(handle); // detach again via Drop - slot is already gone
    assert_eq!(log.lock().len(), 1, "terminal Invisible must fire exactly once");
  }

  #[test]
  fn reattach_gets_fresh_state() {
    let inview = Inview::new();
    let (first, _log) = attach_logged(&inview);
    let first_id = first.id();
    drop(first);

    let (second, log) = attach_logged(&inview);
    assert_ne!(second.id(), first_id, "ids are never reused");

    // Fresh state: the new tracker starts unseen, so a visible snapshot flips
    inview.layout_changed(second.id(), &visible_snapshot()).unwrap();
    assert_eq!(log.lock().len(), 1);
  }

  #[test]
  fn set_handler_swaps_the_sink() {
    let inview = Inview::new();
    let (handle, old_log) = attach_logged(&inview);

    let new_log: Log<VisibleEvent> = Arc::default();
    let sink = Arc::clone(&new_log);
    inview.set_handler(handle.id(), move |event| sink.lock().push(event)).unwrap();

    inview.layout_changed(handle.id(), &visible_snapshot()).unwrap();
    assert!(old_log.lock().is_empty());
    assert_eq!(new_log.lock().len(), 1);
  }

  #[test]
  fn set_handler_rejects_wrong_variant() {
    let inview = Inview::new();
    let handle = inview.attach_with_position(|_event| {});

    let result = inview.set_handler(handle.id(), |_event| {});
    assert!(matches!(result, Err(InviewError::VariantMismatch(_))));

    let result = inview.set_position_handler(handle.id(), |_event| {});
    assert!(result.is_ok());
  }

  #[test]
  fn position_attachments_report_movement() {
    let inview = Inview::new();
    let log: Log<VisiblePositionEvent> = Arc::default();
    let sink = Arc::clone(&log);
    let handle = inview.attach_with_position(move |event| sink.lock().push(event));

    let first = LayoutSnapshot::new(Bounds::new(0, 0, 50, 100), Size::new(100, 100), true);
    let moved = LayoutSnapshot::new(Bounds::new(0, 0, 60, 100), Size::new(100, 100), true);
    inview.layout_changed(handle.id(), &first).unwrap();
    inview.layout_changed(handle.id(), &moved).unwrap();

    let events = log.lock();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[1], VisiblePositionEvent::PositionChanged(_)));
  }

  #[test]
  fn handler_may_query_the_registry() {
    // The take/replace pattern keeps the lock released while the handler runs.
    let inview = Inview::new();
    let probe = inview.clone();
    let saw_attached: Arc<Mutex<Option<bool>>> = Arc::default();
    let saw = Arc::clone(&saw_attached);

    let handle = inview.attach(move |_event| {
      // The element's own slot is taken for the duration of the call.
      *saw.lock() = Some(probe.is_attached(ElementId(u32::MAX)));
    });
    inview.layout_changed(handle.id(), &visible_snapshot()).unwrap();

    assert_eq!(*saw_attached.lock(), Some(false), "handler ran re-entrantly");
  }
}
