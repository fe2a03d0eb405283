use crate::runtime::event::ChangeEvent;
use crate::ui::span::SpanLine;

// ---------------------------------------------------------------------------
// Custom element capability set
// ---------------------------------------------------------------------------

/// Host facts supplied when an element is connected.
#[derive(Debug, Clone, Default)]
pub struct MountContext {
    pub user_agent: Option<String>,
}

impl MountContext {
    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: Some(user_agent.into()),
        }
    }
}

/// Lifecycle, attribute observation and shadow-root markup: what a host
/// custom-element mechanism needs from a widget.
pub trait CustomElement {
    type Error;

    fn tag_name() -> &'static str;

    fn observed_attributes() -> &'static [&'static str];

    fn connected(&mut self, ctx: &MountContext) -> Result<(), Self::Error>;

    fn disconnected(&mut self);

    /// Called only for observed attributes whose value actually changed.
    fn attribute_changed(
        &mut self,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) -> Result<(), Self::Error>;

    fn shadow_markup(&self) -> String;
}

// ---------------------------------------------------------------------------
// Drawable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
}

pub trait Drawable {
    fn id(&self) -> &str;
    fn draw(&self) -> DrawOutput;
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub events: Vec<ChangeEvent>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, other: Self) {
        self.handled |= other.handled;
        self.request_render |= other.request_render;
        self.events.extend(other.events);
    }
}
