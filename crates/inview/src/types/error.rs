/*! Error types for inview operations. */

use super::ElementId;

/// Errors that can occur during inview operations.
///
/// The visibility computation itself is total; these only surface caller
/// misuse of the attachment lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum InviewError {
  #[error("Element not found: {0}")]
  ElementNotFound(ElementId),

  #[error("Element {0} was attached with the other tracker variant")]
  VariantMismatch(ElementId),

  #[error("Tracker already received its terminal detach")]
  Detached,
}

/// Result type for inview operations.
pub type InviewResult<T> = Result<T, InviewError>;
