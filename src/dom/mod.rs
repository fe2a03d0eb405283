pub mod event;
pub mod gesture;
pub mod listeners;
pub mod target;

pub use event::{EventType, Propagation, UiEvent};
pub use listeners::{Handler, ListenerCategory, ListenerId, ListenerRegistry, Phase};
pub use target::EventTarget;
