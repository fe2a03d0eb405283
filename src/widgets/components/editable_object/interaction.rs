use super::*;

use crate::dom::event::{EventType, Propagation, UiEvent};
use crate::dom::listeners::{Handler, ListenerCategory, Phase};
use crate::terminal::KeyCode;
use crate::widgets::traits::InteractionResult;

impl EditableObject {
    pub(super) fn attach_component_listeners(&mut self) {
        self.listeners.release_category(ListenerCategory::Component);
        let mut bindings = vec![
            (EventTarget::Document, EventType::Click, Handler::Defocus, Phase::Bubble),
            (EventTarget::Container, EventType::Click, Handler::RestoreFocus, Phase::Capture),
        ];
        if !self.disable_edit() {
            bindings.extend([
                (EventTarget::NewProperty, EventType::Click, Handler::ClearSelection, Phase::Capture),
                (EventTarget::AddInput, EventType::KeyPress, Handler::AddProperty, Phase::Bubble),
                (EventTarget::AddButton, EventType::Click, Handler::AddProperty, Phase::Bubble),
            ]);
        }
        for (target, event_type, handler, phase) in bindings {
            self.listen(target, event_type, handler, phase, ListenerCategory::Component);
        }
    }

    pub(super) fn attach_item_listeners(&mut self) {
        let editable = !self.disable_edit();
        let keys: Vec<String> = self.rows.iter().map(|row| row.key.clone()).collect();

        for key in keys {
            let mut bindings = vec![
                (EventTarget::row(key.as_str()), EventType::Click, Handler::SelectRow),
                (EventTarget::row_item(key.as_str()), EventType::KeyPress, Handler::KeySelect),
                (EventTarget::MoveUp(key.clone()), EventType::Click, Handler::MoveUp),
                (EventTarget::MoveDown(key.clone()), EventType::Click, Handler::MoveDown),
            ];
            if editable {
                bindings.push((
                    EventTarget::row_item(key.as_str()),
                    EventType::DoubleClick,
                    Handler::StartEdit,
                ));
                if self.touch {
                    bindings.push((
                        EventTarget::row_item(key.as_str()),
                        EventType::TouchEnd,
                        Handler::DoubleTapEdit,
                    ));
                }
                bindings.push((EventTarget::Remove(key.clone()), EventType::Click, Handler::Remove));
            }
            for (target, event_type, handler) in bindings {
                self.listen(target, event_type, handler, Phase::Bubble, ListenerCategory::Item);
            }
        }
    }

    pub(super) fn attach_edit_listeners(&mut self, key: &str) {
        for event_type in [EventType::Blur, EventType::KeyPress] {
            self.listen(
                EventTarget::row_input(key),
                event_type,
                Handler::CommitEdit,
                Phase::Bubble,
                ListenerCategory::EditSession,
            );
        }
    }

    fn listen(
        &mut self,
        target: EventTarget,
        event_type: EventType,
        handler: Handler,
        phase: Phase,
        category: ListenerCategory,
    ) {
        let attached = match phase {
            Phase::Capture => self.listeners.attach_capture(target, event_type, handler, category),
            Phase::Bubble => self.listeners.attach(target, event_type, handler, category),
        };
        if let Err(err) = attached {
            log::warn!("{err}");
        }
    }

    /// Delivers `event` at `target`: capture from the document down, then
    /// bubble back up (the target only, for non-bubbling events). Change
    /// events raised while handling it are returned in the result.
    pub fn dispatch(&mut self, target: EventTarget, event: UiEvent) -> InteractionResult {
        let mut result = self.propagate(&target, event);
        result.events.extend(self.outbox.drain(..));
        if !result.events.is_empty() {
            result.request_render = true;
        }
        result
    }

    fn propagate(&mut self, target: &EventTarget, event: UiEvent) -> InteractionResult {
        if !self.mounted {
            return InteractionResult::ignored();
        }
        if let Some(key) = target.row_key()
            && self.row_index(key).is_none()
        {
            log::trace!("{} has no row; ignoring {}", target, event.event_type);
            return InteractionResult::ignored();
        }

        let path = target.composed_path();
        let mut result = InteractionResult::ignored();

        for node in path.iter().rev() {
            if self.fire(node, target, event, Phase::Capture, &mut result) == Propagation::Stop {
                return result;
            }
        }

        let reach = if event.event_type.bubbles() { path.len() } else { 1 };
        for node in &path[..reach] {
            if self.fire(node, target, event, Phase::Bubble, &mut result) == Propagation::Stop {
                break;
            }
        }
        result
    }

    fn fire(
        &mut self,
        node: &EventTarget,
        target: &EventTarget,
        event: UiEvent,
        phase: Phase,
        result: &mut InteractionResult,
    ) -> Propagation {
        let mut propagation = Propagation::Continue;
        for (id, handler) in self.listeners.active(node, event.event_type, phase) {
            // An earlier handler may have released this one.
            if !self.listeners.is_active(id) {
                continue;
            }
            result.handled = true;
            result.request_render = true;
            if self.run_handler(handler, target, event, result) == Propagation::Stop {
                propagation = Propagation::Stop;
            }
        }
        propagation
    }

    fn run_handler(
        &mut self,
        handler: Handler,
        target: &EventTarget,
        event: UiEvent,
        result: &mut InteractionResult,
    ) -> Propagation {
        let key = target.row_key().map(str::to_string);

        match handler {
            Handler::Defocus => {
                if !target.is_within_host() {
                    self.defocused = true;
                }
                Propagation::Continue
            }
            Handler::RestoreFocus => {
                self.defocused = false;
                Propagation::Continue
            }
            Handler::ClearSelection => {
                self.clear_selection();
                self.focused = Some(target.clone());
                Propagation::Continue
            }
            Handler::AddProperty => {
                if event.is_confirm()
                    && let Err(err) = self.add_property()
                {
                    log::debug!("add property rejected: {err}");
                }
                Propagation::Continue
            }
            Handler::SelectRow => {
                if let Some(key) = key
                    && self.select_row(&key)
                {
                    self.focused = Some(EventTarget::RowInput(key));
                }
                Propagation::Continue
            }
            Handler::KeySelect => {
                let activates = event.is_key(KeyCode::Enter) || event.is_key(KeyCode::Char(' '));
                if activates
                    && !self.state.is_editing()
                    && matches!(target, EventTarget::RowInput(_))
                {
                    let click = self.propagate(target, UiEvent::click());
                    result.merge(click);
                }
                Propagation::Continue
            }
            Handler::StartEdit => {
                if let Some(key) = key {
                    self.start_edit(&key);
                }
                Propagation::Continue
            }
            Handler::DoubleTapEdit => {
                if self.double_tap.register(event.time_ms)
                    && let Some(key) = key
                {
                    self.start_edit(&key);
                }
                Propagation::Continue
            }
            Handler::MoveUp => {
                if let Some(key) = key {
                    self.move_up(&key);
                }
                Propagation::Stop
            }
            Handler::MoveDown => {
                if let Some(key) = key {
                    self.move_down(&key);
                }
                Propagation::Stop
            }
            Handler::Remove => {
                if let Some(key) = key {
                    self.remove(&key);
                }
                Propagation::Stop
            }
            Handler::CommitEdit => {
                if !event.is_confirm() {
                    return Propagation::Continue;
                }
                if let Err(err) = self.commit_edit() {
                    log::debug!("commit rejected: {err}");
                }
                // Enter is consumed by the edit.
                if event.event_type == EventType::KeyPress {
                    Propagation::Stop
                } else {
                    Propagation::Continue
                }
            }
        }
    }
}
