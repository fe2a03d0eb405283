pub mod command;
pub mod event;
pub mod key_bindings;

pub use command::Command;
pub use event::{ChangeAction, ChangeEvent};
pub use key_bindings::{KeyBinding, KeyBindings};
