/*!
inview - viewport visibility tracking for UI elements

Decides whether a rectangular element is visible inside its containing
viewport and reports transitions between visible and invisible (and,
optionally, continuous position changes) to a caller-supplied handler. The
host layout system drives it with one snapshot per element per layout pass;
repeated snapshots that change nothing are deduplicated.

```ignore
use inview::{Inview, LayoutSnapshot, VisibleEvent};

let inview = Inview::new();

let handle = inview.attach(|event| match event {
    VisibleEvent::Visible(exposure) => {
        // impression started; exposure carries bounds, size and per-axis fractions
    }
    VisibleEvent::Invisible => {
        // impression ended
    }
});

// Host layout pass, once per measured layout:
inview.layout_changed(handle.id(), &snapshot)?;

// Element left the tree - emits a final Invisible
drop(handle);
```

The state machines are also usable standalone via [`VisibilityTracker`] and
[`VisibilityPositionTracker`] when the host prefers to own the state itself.
*/

mod attachment;
mod tracker;
mod visibility;

mod types;
pub use types::*;

pub use attachment::{AttachmentHandle, Inview};
pub use tracker::{Handler, VisibilityPositionTracker, VisibilityTracker};
pub use visibility::{coverage, Coverage};
