use std::fmt;

use crate::terminal::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    DoubleClick,
    TouchEnd,
    KeyPress,
    Blur,
}

impl EventType {
    pub fn bubbles(self) -> bool {
        !matches!(self, Self::Blur)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::DoubleClick => "dblclick",
            Self::TouchEnd => "touchend",
            Self::KeyPress => "keypress",
            Self::Blur => "blur",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An interaction delivered to the widget by its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiEvent {
    pub event_type: EventType,
    pub key: Option<KeyCode>,
    /// Host timestamp in milliseconds; only touch gestures read it.
    pub time_ms: u64,
}

impl UiEvent {
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            key: None,
            time_ms: 0,
        }
    }

    pub fn click() -> Self {
        Self::new(EventType::Click)
    }

    pub fn double_click() -> Self {
        Self::new(EventType::DoubleClick)
    }

    pub fn blur() -> Self {
        Self::new(EventType::Blur)
    }

    pub fn touch_end(time_ms: u64) -> Self {
        Self {
            time_ms,
            ..Self::new(EventType::TouchEnd)
        }
    }

    pub fn key_press(key: KeyCode) -> Self {
        Self {
            key: Some(key),
            ..Self::new(EventType::KeyPress)
        }
    }

    pub fn is_key(&self, key: KeyCode) -> bool {
        self.event_type == EventType::KeyPress && self.key == Some(key)
    }

    /// Pointer activations and the Enter key confirm; other keys do not.
    pub fn is_confirm(&self) -> bool {
        self.event_type != EventType::KeyPress || self.key == Some(KeyCode::Enter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}
