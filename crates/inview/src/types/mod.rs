/*! Core types for inview. */

#![allow(missing_docs)]

mod error;
mod event;
mod geometry;
mod ids;
mod snapshot;

pub use error::{InviewError, InviewResult};
pub use event::{Exposure, VisibleEvent, VisiblePositionEvent};
pub use geometry::{Bounds, Size};
pub use ids::ElementId;
pub use snapshot::LayoutSnapshot;
