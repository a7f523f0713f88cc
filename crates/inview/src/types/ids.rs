/*! Branded ID type for attached elements. */

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

/// Identifier for one attached element.
///
/// Fresh per attachment: re-attaching the same UI element yields a new id,
/// which is what guarantees fresh tracker state per element lifecycle.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
pub struct ElementId(pub u32);

/// Global counter for `ElementId` generation. Starts at 1 (0 could be confused with "null").
static ELEMENT_COUNTER: AtomicU32 = AtomicU32::new(1);

impl ElementId {
  /// Generate a new unique `ElementId`.
  pub fn new() -> Self {
    Self(ELEMENT_COUNTER.fetch_add(1, Ordering::Relaxed))
  }
}

impl Default for ElementId {
  fn default() -> Self {
    Self::new()
  }
}
