use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use editable_object::config::ElementConfig;
use editable_object::runtime::{Command, KeyBindings};
use editable_object::terminal::{KeyCode, KeyEvent, Terminal, TerminalEvent};
use editable_object::ui::span::{Span, SpanLine};
use editable_object::ui::style::{Color, Style};
use editable_object::widgets::traits::{CustomElement, Drawable, InteractionResult};
use editable_object::{EditableObject, EventTarget, UiEvent};

const EVENT_HISTORY: usize = 6;
const HELP: &str =
    "↑/↓ select  enter edit/confirm  esc blur  k/j move  d remove  a add  tab outside  q quit";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => ElementConfig::load(&path)?,
        None => demo_config()?,
    };

    let mut element = EditableObject::new("demo");
    config.apply(&mut element)?;
    element.connected(&config.mount_context())?;

    let mut terminal = Terminal::new()?;
    terminal.enter()?;
    let result = event_loop(&mut terminal, Demo::new(element));
    terminal.leave()?;
    Ok(result?)
}

fn demo_config() -> Result<ElementConfig, Box<dyn std::error::Error>> {
    Ok(ElementConfig::from_yaml(
        r#"
object:
  name: editable-object
  version: 1
  tags: [widget, object]
  published: false
"#,
    )?)
}

fn event_loop(terminal: &mut Terminal, mut demo: Demo) -> io::Result<()> {
    let mut render_requested = true;

    loop {
        if terminal.poll(Duration::from_millis(100))? {
            match terminal.read_event()? {
                TerminalEvent::Key(key_event) => {
                    demo.handle_key(key_event);
                    render_requested = true;
                }
                TerminalEvent::Resize { .. } => {
                    render_requested = true;
                }
            }
        }

        if render_requested {
            terminal.render(&demo.lines())?;
            render_requested = false;
        }

        if demo.should_exit {
            break;
        }
    }
    Ok(())
}

struct Demo {
    element: EditableObject,
    bindings: KeyBindings,
    started: Instant,
    history: Vec<String>,
    should_exit: bool,
}

impl Demo {
    fn new(element: EditableObject) -> Self {
        Self {
            element,
            bindings: KeyBindings::new(),
            started: Instant::now(),
            history: Vec::new(),
            should_exit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.is_typing() {
            self.handle_text_key(key);
            return;
        }
        if let Some(command) = self.bindings.resolve(key) {
            self.run_command(command);
        }
    }

    /// A row under edit or the add-property input owns the keyboard.
    fn is_typing(&self) -> bool {
        self.element.editing_key().is_some()
            || self.element.focused() == Some(&EventTarget::AddInput)
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        let target = match self.element.editing_key() {
            Some(editing) => EventTarget::row_input(editing),
            None => EventTarget::AddInput,
        };

        match key.code {
            KeyCode::Esc => {
                if matches!(target, EventTarget::RowInput(_)) {
                    self.dispatch(target, UiEvent::blur());
                } else {
                    self.element.set_focus(None);
                }
            }
            KeyCode::Enter => self.dispatch(target, UiEvent::key_press(KeyCode::Enter)),
            KeyCode::Char(ch) => {
                self.edit_text(&target, |text| text.push(ch));
                self.dispatch(target, UiEvent::key_press(key.code));
            }
            KeyCode::Backspace => self.edit_text(&target, |text| {
                text.pop();
            }),
            _ => {}
        }
    }

    fn edit_text(&mut self, target: &EventTarget, edit: impl FnOnce(&mut String)) {
        match target {
            EventTarget::RowInput(key) => {
                let mut text = self
                    .element
                    .row(key)
                    .map(|row| row.display().to_string())
                    .unwrap_or_default();
                edit(&mut text);
                self.element.set_row_input(key, text);
            }
            _ => {
                let mut text = self.element.add_input().to_string();
                edit(&mut text);
                self.element.set_add_input(text);
            }
        }
    }

    fn run_command(&mut self, command: Command) {
        let selected = self.element.selected_key().map(str::to_string);

        match command {
            Command::Exit => self.should_exit = true,
            Command::SelectPrevious | Command::SelectNext => {
                if let Some(key) = self.neighbour(selected.as_deref(), command == Command::SelectNext) {
                    self.dispatch(EventTarget::row(key), UiEvent::click());
                }
            }
            Command::Activate => {
                if let Some(key) = selected {
                    self.dispatch(EventTarget::row_item(key), UiEvent::double_click());
                }
            }
            Command::Blur => self.element.set_focus(None),
            Command::MoveUp => {
                if let Some(key) = selected {
                    self.dispatch(EventTarget::MoveUp(key), UiEvent::click());
                }
            }
            Command::MoveDown => {
                if let Some(key) = selected {
                    self.dispatch(EventTarget::MoveDown(key), UiEvent::click());
                }
            }
            Command::Remove => {
                if let Some(key) = selected {
                    self.dispatch(EventTarget::Remove(key), UiEvent::click());
                }
            }
            Command::FocusAdd => {
                if !self.element.disable_edit() {
                    self.dispatch(EventTarget::AddInput, UiEvent::click());
                }
            }
            Command::ClickOutside => self.dispatch(EventTarget::Outside, UiEvent::click()),
        }
    }

    fn neighbour(&self, selected: Option<&str>, forward: bool) -> Option<String> {
        let rows = self.element.rows();
        let index = selected.and_then(|key| rows.iter().position(|row| row.key() == key));
        let next = match (index, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1).min(rows.len().saturating_sub(1)),
            (Some(i), false) => i.saturating_sub(1),
        };
        rows.get(next).map(|row| row.key().to_string())
    }

    fn dispatch(&mut self, target: EventTarget, mut event: UiEvent) {
        event.time_ms = self.started.elapsed().as_millis() as u64;
        let result: InteractionResult = self.element.dispatch(target, event);
        for change in result.events {
            self.history.push(change.detail().to_string());
        }
        let overflow = self.history.len().saturating_sub(EVENT_HISTORY);
        self.history.drain(..overflow);
    }

    fn lines(&self) -> Vec<SpanLine> {
        let title = Style::new().color(Color::Magenta).bold();
        let muted = Style::new().color(Color::DarkGrey);

        let mut lines = vec![
            vec![Span::styled(format!("<{}>", EditableObject::tag_name()), title)],
            Vec::new(),
        ];
        lines.extend(self.element.draw().lines);
        lines.push(Vec::new());
        lines.push(vec![Span::styled("change events", title)]);
        if self.history.is_empty() {
            lines.push(vec![Span::styled("  none yet", muted)]);
        }
        for detail in &self.history {
            lines.push(vec![Span::styled(format!("  {detail}"), Style::new().color(Color::Green))]);
        }
        lines.push(Vec::new());
        lines.push(vec![Span::styled(HELP, muted)]);
        lines
    }
}
