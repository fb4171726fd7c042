//! Progress display contract.

use std::time::Duration;

use crate::state::{ActionId, EntityId};

/// Starts a progress display (e.g. a progress bar over the actor).
pub trait ProgressObserver {
    fn start(&self, actor: EntityId, action: ActionId, duration: Duration) -> Box<dyn ProgressHandle>;
}

/// Handle to a running progress display.
///
/// Both methods consume the handle, so it can be retired at most once. The
/// owning action guarantees it is retired at least once as well.
pub trait ProgressHandle: Send {
    /// The action broke: show the interruption.
    fn interrupt(self: Box<Self>);

    /// The action ended without interruption (completed or cancelled).
    fn retire(self: Box<Self>);
}
