//! The element tree the widget listens on.
//!
//! Rows are addressed by property key, never by position, so moving a row
//! does not change the identity of its controls.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Document,
    /// Any node outside the host element.
    Outside,
    Host,
    Container,
    PropertyList,
    Row(String),
    /// The label/value wrapper of a row.
    RowItem(String),
    RowInput(String),
    MoveUp(String),
    MoveDown(String),
    Remove(String),
    NewProperty,
    AddInput,
    AddButton,
}

impl EventTarget {
    pub fn row(key: impl Into<String>) -> Self {
        Self::Row(key.into())
    }

    pub fn row_item(key: impl Into<String>) -> Self {
        Self::RowItem(key.into())
    }

    pub fn row_input(key: impl Into<String>) -> Self {
        Self::RowInput(key.into())
    }

    pub fn parent(&self) -> Option<EventTarget> {
        match self {
            Self::Document => None,
            Self::Outside | Self::Host => Some(Self::Document),
            Self::Container => Some(Self::Host),
            Self::PropertyList | Self::NewProperty => Some(Self::Container),
            Self::Row(_) => Some(Self::PropertyList),
            Self::RowItem(key) | Self::MoveUp(key) | Self::MoveDown(key) | Self::Remove(key) => {
                Some(Self::Row(key.clone()))
            }
            Self::RowInput(key) => Some(Self::RowItem(key.clone())),
            Self::AddInput | Self::AddButton => Some(Self::NewProperty),
        }
    }

    /// Target first, document last.
    pub fn composed_path(&self) -> Vec<EventTarget> {
        let mut path = vec![self.clone()];
        let mut current = self.parent();
        while let Some(node) = current {
            current = node.parent();
            path.push(node);
        }
        path
    }

    pub fn is_within_host(&self) -> bool {
        self.composed_path().contains(&Self::Host)
    }

    pub fn row_key(&self) -> Option<&str> {
        match self {
            Self::Row(key)
            | Self::RowItem(key)
            | Self::RowInput(key)
            | Self::MoveUp(key)
            | Self::MoveDown(key)
            | Self::Remove(key) => Some(key.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for EventTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => f.write_str("document"),
            Self::Outside => f.write_str("outside"),
            Self::Host => f.write_str("host"),
            Self::Container => f.write_str(".editable-object"),
            Self::PropertyList => f.write_str(".object-properties"),
            Self::Row(key) => write!(f, "li[{key}]"),
            Self::RowItem(key) => write!(f, "li[{key}] .property-wrapper"),
            Self::RowInput(key) => write!(f, "#eo-{key}-value"),
            Self::MoveUp(key) => write!(f, "li[{key}] .editable-object-up-property"),
            Self::MoveDown(key) => write!(f, "li[{key}] .editable-object-down-property"),
            Self::Remove(key) => write!(f, "li[{key}] .editable-object-remove-property"),
            Self::NewProperty => f.write_str(".new-object-property"),
            Self::AddInput => f.write_str(".add-new-object-property-input"),
            Self::AddButton => f.write_str(".editable-object-add-property"),
        }
    }
}
