//! Element configuration, usually loaded from a YAML file by the demo host.
//!
//! ```yaml
//! object: { name: demo, count: 3 }
//! add-property-placeholder: "key:value"
//! disable-edit: false
//! user-agent: "Mozilla/5.0 (iPhone)"
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::core::codec;
use crate::core::value::Value;
use crate::widgets::components::editable_object::{
    ATTR_OBJECT, EditableObject, InitError,
};
use crate::widgets::traits::MountContext;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ElementConfig {
    pub object: Option<Value>,
    pub add_property_placeholder: Option<String>,
    pub disable_edit: bool,
    pub user_agent: Option<String>,
}

impl ElementConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn mount_context(&self) -> MountContext {
        MountContext {
            user_agent: self.user_agent.clone(),
        }
    }

    /// Writes the configuration onto `element` as attributes.
    pub fn apply(&self, element: &mut EditableObject) -> Result<(), InitError> {
        if let Some(object) = &self.object {
            element.set_attribute(ATTR_OBJECT, codec::encode(object))?;
        }
        element.set_add_property_placeholder(self.add_property_placeholder.as_deref());
        element.set_disable_edit(self.disable_edit);
        Ok(())
    }
}

/// Boolean attribute semantics: present means on, unless spelled `false`.
pub fn parse_flag_attribute(value: &str) -> bool {
    !value.trim().eq_ignore_ascii_case("false")
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read config: {err}"),
            Self::Yaml(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Yaml(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err)
    }
}
