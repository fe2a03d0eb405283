pub mod assets;
pub mod config;
pub mod core;
pub mod dom;
pub mod runtime;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use crate::core::codec;
pub use crate::core::literal;
pub use crate::core::value;

pub use dom::event;
pub use dom::gesture;
pub use dom::listeners;
pub use dom::target;

pub use crate::core::value::Value;
pub use dom::event::{EventType, UiEvent};
pub use dom::target::EventTarget;
pub use runtime::event::{ChangeAction, ChangeEvent};
pub use widgets::components::editable_object::{
    AddPropertyError, EditState, EditableObject, InitError, PropertyRow,
};
