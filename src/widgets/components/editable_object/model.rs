#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Enabled,
    /// Keeps its place in the toolbar but cannot be seen or activated.
    Hidden,
    /// Not rendered at all.
    Removed,
}

impl Control {
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toolbar {
    pub move_up: Control,
    pub move_down: Control,
    pub remove: Control,
}

/// One rendered entry of the edited object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRow {
    pub(super) key: String,
    pub(super) display: String,
    pub(super) selected: bool,
    pub(super) editing: bool,
    pub(super) invalid: bool,
    pub(super) tabbable: bool,
    pub(super) toolbar: Toolbar,
}

impl PropertyRow {
    pub(super) fn new(key: impl Into<String>, display: impl Into<String>, toolbar: Toolbar) -> Self {
        Self {
            key: key.into(),
            display: display.into(),
            selected: false,
            editing: false,
            invalid: false,
            tabbable: false,
            toolbar,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Toolbar buttons take part in tab order only on the selected row.
    pub fn is_tabbable(&self) -> bool {
        self.tabbable
    }

    pub fn toolbar(&self) -> Toolbar {
        self.toolbar
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Selected {
        key: String,
    },
    Editing {
        key: String,
        /// Row text captured when the edit started.
        original: String,
    },
}

impl EditState {
    pub fn selected_key(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Selected { key } | Self::Editing { key, .. } => Some(key.as_str()),
        }
    }

    pub fn editing_key(&self) -> Option<&str> {
        match self {
            Self::Editing { key, .. } => Some(key.as_str()),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub(super) struct AddInput {
    pub(super) text: String,
    pub(super) invalid: bool,
}
