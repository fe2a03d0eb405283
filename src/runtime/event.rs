use serde::Serialize;

use crate::core::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Add,
    Edit,
    Remove,
}

/// The `change` notification raised after every successful mutation of the
/// edited object. `previous` and `new` carry decoded values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeEvent {
    pub action: ChangeAction,
    pub key: String,
    pub previous: Value,
    pub new: Value,
}

impl ChangeEvent {
    pub const TYPE: &'static str = "change";
    pub const BUBBLES: bool = true;
    pub const COMPOSED: bool = true;
    pub const CANCELABLE: bool = false;

    pub fn add(key: impl Into<String>, value: Value) -> Self {
        Self {
            action: ChangeAction::Add,
            key: key.into(),
            previous: Value::Null,
            new: value,
        }
    }

    pub fn edit(key: impl Into<String>, previous: Value, new: Value) -> Self {
        Self {
            action: ChangeAction::Edit,
            key: key.into(),
            previous,
            new,
        }
    }

    pub fn remove(key: impl Into<String>, previous: Value) -> Self {
        Self {
            action: ChangeAction::Remove,
            key: key.into(),
            previous,
            new: Value::Null,
        }
    }

    /// The event `detail` as JSON.
    pub fn detail(&self) -> serde_json::Value {
        serde_json::json!({
            "action": self.action,
            "key": self.key,
            "previous": self.previous,
            "new": self.new,
        })
    }
}
