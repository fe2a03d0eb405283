//! `<editable-object>`: a list of `key : value` rows over an ordered object.
//!
//! Rows can be selected, edited in place, reordered, removed, and new
//! properties added from a `key:value` line. Every successful mutation of
//! the object queues a [`ChangeEvent`] that the next [`EditableObject::dispatch`]
//! (or [`EditableObject::take_events`]) hands to the host.

mod actions;
mod interaction;
mod lifecycle;
mod markup;
mod model;
mod render;

#[cfg(test)]
mod tests;

use indexmap::IndexMap;

use crate::config::parse_flag_attribute;
use crate::core::value::Value;
use crate::dom::gesture::DoubleTap;
use crate::dom::listeners::ListenerRegistry;
use crate::dom::target::EventTarget;
use crate::runtime::event::ChangeEvent;
use crate::widgets::base::ElementBase;

pub use actions::AddPropertyError;
pub use lifecycle::{InitError, parse_object_attribute};
pub use model::{Control, EditState, PropertyRow, Toolbar};

use model::AddInput;

pub const TAG_NAME: &str = "editable-object";

pub const ATTR_OBJECT: &str = "object";
pub const ATTR_ADD_PROPERTY_PLACEHOLDER: &str = "add-property-placeholder";
pub const ATTR_DISABLE_EDIT: &str = "disable-edit";

pub const OBSERVED_ATTRIBUTES: [&str; 3] = [
    ATTR_OBJECT,
    ATTR_ADD_PROPERTY_PLACEHOLDER,
    ATTR_DISABLE_EDIT,
];

pub const DEFAULT_ADD_PROPERTY_PLACEHOLDER: &str = "Add new property in key:value format";

pub struct EditableObject {
    base: ElementBase,
    object: IndexMap<String, Value>,
    rows: Vec<PropertyRow>,
    state: EditState,
    listeners: ListenerRegistry,
    double_tap: DoubleTap,
    add_input: AddInput,
    focused: Option<EventTarget>,
    defocused: bool,
    touch: bool,
    mounted: bool,
    outbox: Vec<ChangeEvent>,
}

impl EditableObject {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: ElementBase::new(id),
            object: IndexMap::new(),
            rows: Vec::new(),
            state: EditState::Idle,
            listeners: ListenerRegistry::new(),
            double_tap: DoubleTap::new(),
            add_input: AddInput::default(),
            focused: None,
            defocused: false,
            touch: false,
            mounted: false,
            outbox: Vec::new(),
        }
    }

    pub fn object(&self) -> &IndexMap<String, Value> {
        &self.object
    }

    /// Replaces the edited object and re-renders. Anything but an object is
    /// ignored and reported as `false`.
    pub fn set_object(&mut self, value: Value) -> bool {
        match value {
            Value::Object(object) => {
                self.replace_object(object);
                true
            }
            other => {
                log::debug!("ignoring non-object value ({})", other.type_name());
                false
            }
        }
    }

    /// Shallow merge: existing keys keep their position, new keys append.
    pub fn merge_object(&mut self, partial: IndexMap<String, Value>) {
        let mut merged = self.object.clone();
        merged.extend(partial);
        self.replace_object(merged);
    }

    pub fn add_property_placeholder(&self) -> &str {
        self.base
            .attribute(ATTR_ADD_PROPERTY_PLACEHOLDER)
            .filter(|text| !text.is_empty())
            .unwrap_or(DEFAULT_ADD_PROPERTY_PLACEHOLDER)
    }

    pub fn set_add_property_placeholder(&mut self, placeholder: Option<&str>) {
        match placeholder {
            Some(text) if !text.is_empty() => {
                self.base.set_attribute(ATTR_ADD_PROPERTY_PLACEHOLDER, text);
            }
            _ => {
                self.base.remove_attribute(ATTR_ADD_PROPERTY_PLACEHOLDER);
            }
        }
    }

    pub fn disable_edit(&self) -> bool {
        self.base
            .attribute(ATTR_DISABLE_EDIT)
            .is_some_and(parse_flag_attribute)
    }

    pub fn set_disable_edit(&mut self, disabled: bool) {
        if disabled == self.disable_edit() {
            return;
        }
        if disabled {
            self.base.set_attribute(ATTR_DISABLE_EDIT, "");
        } else {
            self.base.remove_attribute(ATTR_DISABLE_EDIT);
        }
        self.apply_edit_mode();
    }

    pub fn rows(&self) -> &[PropertyRow] {
        &self.rows
    }

    pub fn row(&self, key: &str) -> Option<&PropertyRow> {
        self.rows.iter().find(|row| row.key == key)
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.state.selected_key()
    }

    pub fn editing_key(&self) -> Option<&str> {
        self.state.editing_key()
    }

    pub fn add_input(&self) -> &str {
        &self.add_input.text
    }

    /// Replaces the add-property text, clearing any error marker.
    pub fn set_add_input(&mut self, text: impl Into<String>) {
        self.add_input.text = text.into();
        self.add_input.invalid = false;
    }

    pub fn add_input_invalid(&self) -> bool {
        self.add_input.invalid
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn focused(&self) -> Option<&EventTarget> {
        self.focused.as_ref()
    }

    /// Moves keyboard focus without dispatching anything. Focus on a row
    /// that does not exist is dropped.
    pub fn set_focus(&mut self, target: Option<EventTarget>) {
        self.focused = target.filter(|target| {
            target
                .row_key()
                .is_none_or(|key| self.row_index(key).is_some())
        });
    }

    pub fn is_defocused(&self) -> bool {
        self.defocused
    }

    pub fn is_touch(&self) -> bool {
        self.touch
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Drains change events queued by direct calls.
    pub fn take_events(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.outbox)
    }

    fn row_index(&self, key: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.key == key)
    }
}
