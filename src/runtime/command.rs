/// Host-level commands the demo maps keys to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    SelectPrevious,
    SelectNext,
    /// Enter: start an edit, or confirm the active input.
    Activate,
    /// Esc: blur the active input.
    Blur,
    MoveUp,
    MoveDown,
    Remove,
    FocusAdd,
    /// Click somewhere outside the widget.
    ClickOutside,
}
