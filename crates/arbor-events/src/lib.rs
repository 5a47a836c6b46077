//! Arbor events
//!
//! Capture / at-target / bubble event dispatch over arbor-dom trees.
//! Listeners are plain closures in a per-node registry resolved at
//! dispatch time; the dispatcher walks the ancestor path computed once
//! per dispatch and reports the outcome as an [`EventRecord`].

mod dispatch;
mod event;
mod registry;

pub use dispatch::{EventCtx, EventDispatcher};
pub use event::{EventRecord, HandlerFault, Phase};
pub use registry::{ListenerId, ListenerOptions};
