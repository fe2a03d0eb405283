use crate::runtime::command::Command;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Bindings used while no text input has focus.
#[derive(Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, Command>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind(&mut self, key: KeyBinding, command: Command) {
        self.bindings.insert(key, command);
    }

    pub fn unbind(&mut self, key: &KeyBinding) {
        self.bindings.remove(key);
    }

    pub fn resolve(&self, event: KeyEvent) -> Option<Command> {
        self.bindings.get(&KeyBinding::from_event(event)).copied()
    }

    fn install_defaults(&mut self) {
        self.bind(KeyBinding::ctrl(KeyCode::Char('c')), Command::Exit);
        self.bind(KeyBinding::key(KeyCode::Char('q')), Command::Exit);
        self.bind(KeyBinding::key(KeyCode::Up), Command::SelectPrevious);
        self.bind(KeyBinding::key(KeyCode::Down), Command::SelectNext);
        self.bind(KeyBinding::key(KeyCode::Enter), Command::Activate);
        self.bind(KeyBinding::key(KeyCode::Esc), Command::Blur);
        self.bind(KeyBinding::key(KeyCode::Char('k')), Command::MoveUp);
        self.bind(KeyBinding::key(KeyCode::Char('j')), Command::MoveDown);
        self.bind(KeyBinding::key(KeyCode::Char('d')), Command::Remove);
        self.bind(KeyBinding::key(KeyCode::Delete), Command::Remove);
        self.bind(KeyBinding::key(KeyCode::Char('a')), Command::FocusAdd);
        self.bind(KeyBinding::key(KeyCode::Tab), Command::ClickOutside);
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyBinding, KeyBindings};
    use crate::runtime::command::Command;
    use crate::terminal::{KeyCode, KeyEvent};

    #[test]
    fn defaults_cover_navigation() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.resolve(KeyEvent::plain(KeyCode::Up)),
            Some(Command::SelectPrevious)
        );
        assert_eq!(
            bindings.resolve(KeyEvent::plain(KeyCode::Char('d'))),
            Some(Command::Remove)
        );
        assert_eq!(bindings.resolve(KeyEvent::plain(KeyCode::Char('x'))), None);
    }

    #[test]
    fn unbind_removes_binding() {
        let mut bindings = KeyBindings::new();
        bindings.unbind(&KeyBinding::key(KeyCode::Char('q')));
        assert_eq!(bindings.resolve(KeyEvent::plain(KeyCode::Char('q'))), None);
    }
}
