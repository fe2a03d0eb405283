use std::fmt;

use super::*;

use crate::core::codec;
use crate::dom::gesture::is_touch_user_agent;
use crate::dom::listeners::ListenerCategory;
use crate::widgets::traits::{CustomElement, MountContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    /// The `object` attribute is not a structural literal.
    MalformedObject(String),
    /// The `object` attribute parsed to something other than an object.
    NotAnObject(&'static str),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedObject(message) => write!(f, "malformed object attribute: {message}"),
            Self::NotAnObject(kind) => write!(f, "object attribute holds {kind}, not an object"),
        }
    }
}

impl std::error::Error for InitError {}

/// Parses an `object` attribute. Single-quoted literals are accepted.
pub fn parse_object_attribute(text: &str) -> Result<IndexMap<String, Value>, InitError> {
    let requoted = codec::requote(text.trim(), '"');
    let json: serde_json::Value = serde_json::from_str(&requoted)
        .map_err(|err| InitError::MalformedObject(err.to_string()))?;
    match Value::from_json(json) {
        Value::Object(object) => Ok(object),
        other => Err(InitError::NotAnObject(other.type_name())),
    }
}

impl EditableObject {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.base.attribute(name)
    }

    /// Stores the attribute and runs the change callback when the value of
    /// an observed attribute actually changed.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) -> Result<(), InitError> {
        let value = value.into();
        let old = self.base.set_attribute(name, value.as_str());
        self.notify_attribute(name, old.as_deref(), Some(value.as_str()))
    }

    pub fn remove_attribute(&mut self, name: &str) -> Result<(), InitError> {
        let old = self.base.remove_attribute(name);
        self.notify_attribute(name, old.as_deref(), None)
    }

    fn notify_attribute(
        &mut self,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) -> Result<(), InitError> {
        if old == new || !OBSERVED_ATTRIBUTES.contains(&name) {
            return Ok(());
        }
        self.attribute_changed(name, old, new)
    }

    /// Re-applies the edit mode to toolbars, listeners and any open edit.
    pub(super) fn apply_edit_mode(&mut self) {
        let disabled = self.disable_edit();
        if disabled {
            self.cancel_edit();
            self.add_input = AddInput::default();
        }
        self.refresh_toolbars();
        if self.mounted {
            self.attach_component_listeners();
            self.listeners.release_category(ListenerCategory::Item);
            self.attach_item_listeners();
        }
        log::debug!("edit {}", if disabled { "disabled" } else { "enabled" });
    }
}

impl CustomElement for EditableObject {
    type Error = InitError;

    fn tag_name() -> &'static str {
        TAG_NAME
    }

    fn observed_attributes() -> &'static [&'static str] {
        &OBSERVED_ATTRIBUTES
    }

    fn connected(&mut self, ctx: &MountContext) -> Result<(), InitError> {
        let object = match self.base.attribute(ATTR_OBJECT) {
            Some(text) => parse_object_attribute(text)?,
            None => self.object.clone(),
        };
        if self.mounted {
            self.disconnected();
        }

        self.touch = ctx
            .user_agent
            .as_deref()
            .is_some_and(is_touch_user_agent);
        self.defocused = false;
        self.mounted = true;
        self.attach_component_listeners();
        self.replace_object(object);
        log::debug!(
            "<{TAG_NAME} id={}> connected (touch: {})",
            self.base.id(),
            self.touch
        );
        Ok(())
    }

    fn disconnected(&mut self) {
        self.cancel_edit();
        let released = self.listeners.release_all();
        self.mounted = false;
        log::debug!(
            "<{TAG_NAME} id={}> disconnected, released {released} listener(s)",
            self.base.id()
        );
    }

    fn attribute_changed(
        &mut self,
        name: &str,
        _old: Option<&str>,
        new: Option<&str>,
    ) -> Result<(), InitError> {
        match name {
            ATTR_OBJECT => {
                let object = match new {
                    Some(text) => parse_object_attribute(text)?,
                    None => IndexMap::new(),
                };
                self.replace_object(object);
            }
            ATTR_DISABLE_EDIT => self.apply_edit_mode(),
            // Read at render time.
            _ => {}
        }
        Ok(())
    }

    fn shadow_markup(&self) -> String {
        self.render_markup()
    }
}
