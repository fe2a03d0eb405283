use super::*;

use crate::core::codec;
use crate::ui::span::{Span, SpanLine, pad_to_width};
use crate::ui::style::{Color, Style};
use crate::widgets::traits::{DrawOutput, Drawable};
use unicode_width::UnicodeWidthStr;

const EMPTY_LABEL: &str = "(no properties)";

/// Move buttons are hidden on the edges, remove is dropped in read-only mode.
pub(super) fn toolbar_for(index: usize, len: usize, disable_edit: bool) -> Toolbar {
    let edge = |hidden: bool| if hidden { Control::Hidden } else { Control::Enabled };
    Toolbar {
        move_up: edge(index == 0),
        move_down: edge(index + 1 >= len),
        remove: if disable_edit {
            Control::Removed
        } else {
            Control::Enabled
        },
    }
}

pub(super) fn build_rows(object: &IndexMap<String, Value>, disable_edit: bool) -> Vec<PropertyRow> {
    let len = object.len();
    object
        .iter()
        .enumerate()
        .map(|(index, (key, value))| {
            PropertyRow::new(
                key.as_str(),
                codec::encode(value),
                toolbar_for(index, len, disable_edit),
            )
        })
        .collect()
}

impl EditableObject {
    pub(super) fn refresh_toolbars(&mut self) {
        let len = self.rows.len();
        let disable_edit = self.disable_edit();
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.toolbar = toolbar_for(index, len, disable_edit);
        }
    }

    fn row_line(&self, row: &PropertyRow, key_width: usize) -> SpanLine {
        let base = if self.defocused {
            Style::new().dim()
        } else {
            Style::new()
        };

        let marker = if row.selected { "› " } else { "  " };
        let key_style = if row.selected {
            Style {
                color: Some(Color::Cyan),
                bold: true,
                ..base
            }
        } else {
            Style {
                color: Some(Color::White),
                ..base
            }
        };
        let value_style = if row.invalid {
            Style {
                color: Some(Color::Red),
                ..base
            }
        } else if row.editing {
            Style {
                color: Some(Color::Yellow),
                ..base
            }
        } else {
            base
        };

        let mut line = vec![
            Span::styled(marker, key_style),
            Span::styled(pad_to_width(&row.key, key_width), key_style),
            Span::styled(" : ", Style::new().color(Color::DarkGrey)),
            Span::styled(row.display.clone(), value_style),
        ];
        if row.editing {
            line.push(Span::styled("▏", Style::new().color(Color::Yellow)));
        }
        if row.selected {
            line.push(Span::new("  "));
            line.extend(toolbar_spans(row.toolbar));
        }
        line
    }

    fn add_line(&self) -> SpanLine {
        let focused = self.focused == Some(EventTarget::AddInput);
        let prompt_style = if focused {
            Style::new().color(Color::Cyan).bold()
        } else {
            Style::new().color(Color::DarkGrey)
        };
        let mut line = vec![Span::styled("+ ", prompt_style)];
        if self.add_input.text.is_empty() {
            line.push(Span::styled(
                self.add_property_placeholder(),
                Style::new().color(Color::DarkGrey).dim(),
            ));
        } else {
            let style = if self.add_input.invalid {
                Style::new().color(Color::Red)
            } else {
                Style::new()
            };
            line.push(Span::styled(self.add_input.text.clone(), style));
        }
        if focused {
            line.push(Span::styled("▏", Style::new().color(Color::Cyan)));
        }
        line
    }
}

fn toolbar_spans(toolbar: Toolbar) -> Vec<Span> {
    let button = |glyph: &str, control: Control| match control {
        Control::Enabled => Some(Span::styled(format!("[{glyph}]"), Style::new().color(Color::Blue))),
        Control::Hidden => Some(Span::new("   ")),
        Control::Removed => None,
    };
    [
        button("↑", toolbar.move_up),
        button("↓", toolbar.move_down),
        button("✕", toolbar.remove),
    ]
    .into_iter()
    .flatten()
    .collect()
}

impl Drawable for EditableObject {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn draw(&self) -> DrawOutput {
        let key_width = self
            .rows
            .iter()
            .map(|row| UnicodeWidthStr::width(row.key.as_str()))
            .max()
            .unwrap_or(0);

        let mut lines: Vec<SpanLine> = self
            .rows
            .iter()
            .map(|row| self.row_line(row, key_width))
            .collect();
        if lines.is_empty() {
            lines.push(vec![Span::styled(
                EMPTY_LABEL,
                Style::new().color(Color::DarkGrey),
            )]);
        }
        if !self.disable_edit() {
            lines.push(Vec::new());
            lines.push(self.add_line());
        }
        DrawOutput { lines }
    }
}
