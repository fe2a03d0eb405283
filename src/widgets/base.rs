use indexmap::IndexMap;

/// Identity and string attributes of a host element.
#[derive(Debug, Clone)]
pub struct ElementBase {
    id: String,
    attributes: IndexMap<String, String>,
}

impl ElementBase {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns the previous value.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) -> Option<String> {
        self.attributes.insert(name.to_string(), value.into())
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }
}
