use std::fmt;

use super::*;

use crate::core::codec::{self, DecodeError};
use crate::core::literal::{LiteralError, PropertyLiteral};
use crate::dom::listeners::ListenerCategory;

#[derive(Debug, Clone, PartialEq)]
pub enum AddPropertyError {
    EditDisabled,
    Literal(LiteralError),
    DuplicateKey(String),
    Decode(DecodeError),
}

impl fmt::Display for AddPropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EditDisabled => f.write_str("editing is disabled"),
            Self::Literal(err) => write!(f, "{err}"),
            Self::DuplicateKey(key) => write!(f, "property '{key}' already exists"),
            Self::Decode(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AddPropertyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Literal(err) => Some(err),
            Self::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LiteralError> for AddPropertyError {
    fn from(err: LiteralError) -> Self {
        Self::Literal(err)
    }
}

impl From<DecodeError> for AddPropertyError {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

impl EditableObject {
    /// Full re-render: every row is rebuilt, item listeners are swapped for
    /// fresh ones and any edit session is dropped. The first row ends up
    /// selected and focused.
    pub(super) fn replace_object(&mut self, object: IndexMap<String, Value>) {
        self.listeners.release_category(ListenerCategory::EditSession);
        self.listeners.release_category(ListenerCategory::Item);
        self.state = EditState::Idle;
        self.double_tap.reset();

        self.rows = render::build_rows(&object, self.disable_edit());
        self.object = object;
        if self.mounted {
            self.attach_item_listeners();
        }
        log::debug!("rendered {} row(s)", self.rows.len());

        let first = self.rows.first().map(|row| row.key.clone());
        match first {
            Some(key) => {
                self.select_row(&key);
                self.focused = Some(EventTarget::RowInput(key));
            }
            None => self.focused = None,
        }
    }

    /// Marks `key` as the only selected row. A pending edit on another row is
    /// committed first.
    pub fn select_row(&mut self, key: &str) -> bool {
        if self.row_index(key).is_none() {
            return false;
        }
        if self.editing_key().is_some_and(|editing| editing != key) {
            self.finish_pending_edit();
        }

        for row in &mut self.rows {
            let selected = row.key == key;
            row.selected = selected;
            row.tabbable = selected;
            row.invalid = false;
        }
        if self.editing_key() != Some(key) {
            self.state = EditState::Selected {
                key: key.to_string(),
            };
        }
        true
    }

    pub fn clear_selection(&mut self) {
        self.finish_pending_edit();
        for row in &mut self.rows {
            row.selected = false;
            row.tabbable = false;
        }
        self.state = EditState::Idle;
    }

    /// Opens `key` for editing. Refused while edit is disabled or another
    /// edit session is open.
    pub fn start_edit(&mut self, key: &str) -> bool {
        if self.disable_edit() || self.state.is_editing() {
            return false;
        }
        if !self.select_row(key) {
            return false;
        }
        let Some(index) = self.row_index(key) else {
            return false;
        };

        let row = &mut self.rows[index];
        row.editing = true;
        let original = row.display.clone();

        self.listeners.release_category(ListenerCategory::EditSession);
        if self.mounted {
            self.attach_edit_listeners(key);
        }
        self.state = EditState::Editing {
            key: key.to_string(),
            original,
        };
        self.focused = Some(EventTarget::row_input(key));
        log::debug!("editing '{key}'");
        true
    }

    /// Replaces the text of the row being edited.
    pub fn set_row_input(&mut self, key: &str, text: impl Into<String>) -> bool {
        if self.editing_key() != Some(key) {
            return false;
        }
        match self.row_index(key) {
            Some(index) => {
                self.rows[index].display = text.into();
                true
            }
            None => false,
        }
    }

    /// Decodes the edited text and writes it back into the object.
    ///
    /// `Ok(false)` means no edit was open. On a decode error the row goes
    /// back to its pre-edit text, is flagged invalid and the object is left
    /// alone.
    pub fn commit_edit(&mut self) -> Result<bool, DecodeError> {
        let (key, original) = match &self.state {
            EditState::Editing { key, original } => (key.clone(), original.clone()),
            _ => return Ok(false),
        };
        self.listeners.release_category(ListenerCategory::EditSession);
        self.state = EditState::Selected { key: key.clone() };

        let Some(index) = self.row_index(&key) else {
            return Ok(false);
        };
        self.rows[index].editing = false;
        let text = self.rows[index].display.clone();

        match codec::decode(&text) {
            Ok(value) => {
                let row = &mut self.rows[index];
                row.display = codec::encode(&value);
                row.invalid = false;
                let stored = self
                    .object
                    .insert(key.clone(), value.clone())
                    .unwrap_or(Value::Null);
                let previous = codec::decode(&original).unwrap_or(stored);
                log::debug!("committed '{key}'");
                self.outbox.push(ChangeEvent::edit(key, previous, value));
                Ok(true)
            }
            Err(err) => {
                let row = &mut self.rows[index];
                row.display = original;
                row.invalid = true;
                log::debug!("edit of '{key}' rejected: {err}");
                Err(err)
            }
        }
    }

    /// Abandons the open edit without touching the object.
    pub fn cancel_edit(&mut self) -> bool {
        let (key, original) = match &self.state {
            EditState::Editing { key, original } => (key.clone(), original.clone()),
            _ => return false,
        };
        self.listeners.release_category(ListenerCategory::EditSession);
        if let Some(index) = self.row_index(&key) {
            let row = &mut self.rows[index];
            row.display = original;
            row.editing = false;
        }
        self.state = EditState::Selected { key };
        true
    }

    pub(super) fn finish_pending_edit(&mut self) {
        if let Err(err) = self.commit_edit() {
            log::warn!("pending edit discarded: {err}");
        }
    }

    /// Swaps the row with its predecessor. Display order only; the object
    /// keeps its order until the next full render. Focus moves to the
    /// button, so an open edit is committed first.
    pub fn move_up(&mut self, key: &str) -> bool {
        match self.row_index(key) {
            Some(index) if index > 0 => {
                self.finish_pending_edit();
                self.rows.swap(index - 1, index);
                self.refresh_toolbars();
                self.focused = Some(EventTarget::MoveUp(key.to_string()));
                true
            }
            _ => false,
        }
    }

    pub fn move_down(&mut self, key: &str) -> bool {
        match self.row_index(key) {
            Some(index) if index + 1 < self.rows.len() => {
                self.finish_pending_edit();
                self.rows.swap(index, index + 1);
                self.refresh_toolbars();
                self.focused = Some(EventTarget::MoveDown(key.to_string()));
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        if self.disable_edit() {
            return false;
        }
        let Some(index) = self.row_index(key) else {
            return false;
        };

        let shown = match &self.state {
            EditState::Editing { key: editing, original } if editing == key => original.clone(),
            _ => self.rows[index].display.clone(),
        };
        if self.editing_key() == Some(key) {
            self.listeners.release_category(ListenerCategory::EditSession);
        } else {
            self.finish_pending_edit();
        }
        if self.selected_key() == Some(key) {
            self.state = EditState::Idle;
        }

        self.rows.remove(index);
        let stored = self.object.shift_remove(key).unwrap_or(Value::Null);
        let previous = codec::decode(&shown).unwrap_or(stored);
        self.listeners
            .release_matching(ListenerCategory::Item, |target| target.row_key() == Some(key));
        self.refresh_toolbars();
        if self
            .focused
            .as_ref()
            .and_then(EventTarget::row_key)
            .is_some_and(|focused| focused == key)
        {
            self.focused = None;
        }

        log::debug!("removed '{key}'");
        self.outbox.push(ChangeEvent::remove(key, previous));
        true
    }

    /// Parses the add-property line and merges the new property.
    ///
    /// `Ok(None)` for a blank line. On error the line stays as typed and is
    /// flagged invalid.
    pub fn add_property(&mut self) -> Result<Option<String>, AddPropertyError> {
        if self.disable_edit() {
            return Err(AddPropertyError::EditDisabled);
        }
        let raw = self.add_input.text.trim().to_string();
        if raw.is_empty() {
            return Ok(None);
        }

        let parsed = PropertyLiteral::parse(&raw)
            .map_err(AddPropertyError::from)
            .and_then(|literal| {
                if self.object.contains_key(literal.key) {
                    return Err(AddPropertyError::DuplicateKey(literal.key.to_string()));
                }
                let value = codec::decode(literal.value)?;
                Ok((literal.key.to_string(), value))
            });
        let (key, value) = match parsed {
            Ok(entry) => entry,
            Err(err) => {
                self.add_input.invalid = true;
                self.focused = Some(EventTarget::AddInput);
                return Err(err);
            }
        };

        self.finish_pending_edit();
        let mut partial = IndexMap::new();
        partial.insert(key.clone(), value.clone());
        self.merge_object(partial);
        self.outbox.push(ChangeEvent::add(key.as_str(), value));

        self.select_row(&key);
        self.focused = Some(EventTarget::row_input(key.as_str()));
        self.add_input = AddInput::default();
        log::debug!("added '{key}'");
        Ok(Some(key))
    }
}
