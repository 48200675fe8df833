use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::util::panel_block;
use crate::surface::EntryField;
use crate::util::{KeyHandleResult, Shortcut};

/// Single-line text entry. `cursor` counts chars, not bytes.
#[derive(Debug, Default)]
pub struct EntryPanel {
    text: String,
    cursor: usize,
    focus_requested: bool,
}

impl EntryPanel {
    /// Returns true once after the controller asked for focus.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyHandleResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return KeyHandleResult::Ignored;
        }
        match key.code {
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.remove_char_at(self.cursor);
                }
                KeyHandleResult::Consumed
            }
            KeyCode::Delete => {
                self.remove_char_at(self.cursor);
                KeyHandleResult::Consumed
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                KeyHandleResult::Consumed
            }
            KeyCode::Right => {
                if self.cursor < self.char_len() {
                    self.cursor += 1;
                }
                KeyHandleResult::Consumed
            }
            KeyCode::Home => {
                self.cursor = 0;
                KeyHandleResult::Consumed
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                KeyHandleResult::Consumed
            }
            KeyCode::Char(c) => {
                let at = self.byte_index(self.cursor);
                self.text.insert(at, c);
                self.cursor += 1;
                KeyHandleResult::Consumed
            }
            _ => KeyHandleResult::Ignored,
        }
    }

    pub fn shortcuts(&self) -> Vec<Shortcut> {
        vec![
            Shortcut {
                key: "Enter",
                description: "Add task",
            },
            Shortcut {
                key: "←/→",
                description: "Move cursor",
            },
            Shortcut {
                key: "Tab",
                description: "Next control",
            },
        ]
    }

    /// Draw the bordered text field. Returns the area that accepts clicks.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) -> Rect {
        let block = panel_block(" New task ", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let input_area = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        };
        let available_width = input_area.width as usize;
        if available_width == 0 {
            return area;
        }

        let scroll = self.cursor.saturating_sub(available_width.saturating_sub(1));
        let visible_text: String = self
            .text
            .chars()
            .skip(scroll)
            .take(available_width)
            .collect();

        let line = if self.text.is_empty() && !focused {
            Line::from(Span::styled(
                "What needs doing?",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(Span::styled(visible_text, Style::default().fg(Color::White)))
        };
        frame.render_widget(Paragraph::new(line), input_area);

        if focused {
            let cursor_x = input_area.x + (self.cursor - scroll) as u16;
            if cursor_x < input_area.x + input_area.width {
                frame.set_cursor_position((cursor_x, input_area.y));
            }
        }

        area
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn remove_char_at(&mut self, char_index: usize) {
        if char_index < self.char_len() {
            let at = self.byte_index(char_index);
            self.text.remove(at);
        }
    }
}

impl EntryField for EntryPanel {
    fn value(&self) -> String {
        self.text.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.text = value.to_string();
        self.cursor = self.char_len();
    }

    fn focus(&mut self) {
        self.focus_requested = true;
    }
}

/// Draw the submit control next to the entry field.
pub fn render_submit_button(frame: &mut Frame, area: Rect, label: &str, focused: bool) {
    let block = panel_block("", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(label, style)).alignment(Alignment::Center),
        inner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(entry: &mut EntryPanel, text: &str) {
        for c in text.chars() {
            entry.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_builds_value() {
        let mut entry = EntryPanel::default();
        type_str(&mut entry, "milk");
        assert_eq!(entry.value(), "milk");
        assert_eq!(entry.cursor(), 4);
    }

    #[test]
    fn editing_in_the_middle() {
        let mut entry = EntryPanel::default();
        type_str(&mut entry, "mlk");
        entry.handle_key(key(KeyCode::Left));
        entry.handle_key(key(KeyCode::Left));
        type_str(&mut entry, "i");
        assert_eq!(entry.value(), "milk");

        entry.handle_key(key(KeyCode::Home));
        entry.handle_key(key(KeyCode::Delete));
        assert_eq!(entry.value(), "ilk");

        entry.handle_key(key(KeyCode::End));
        entry.handle_key(key(KeyCode::Backspace));
        assert_eq!(entry.value(), "il");
    }

    #[test]
    fn multibyte_chars_edit_cleanly() {
        let mut entry = EntryPanel::default();
        type_str(&mut entry, "café");
        entry.handle_key(key(KeyCode::Backspace));
        assert_eq!(entry.value(), "caf");
        type_str(&mut entry, "é!");
        entry.handle_key(key(KeyCode::Left));
        entry.handle_key(key(KeyCode::Backspace));
        assert_eq!(entry.value(), "caf!");
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut entry = EntryPanel::default();
        entry.handle_key(key(KeyCode::Backspace));
        assert_eq!(entry.value(), "");
        assert_eq!(entry.cursor(), 0);
    }

    #[test]
    fn set_value_moves_cursor_to_end() {
        let mut entry = EntryPanel::default();
        type_str(&mut entry, "abc");
        entry.set_value("");
        assert_eq!(entry.cursor(), 0);
        entry.set_value("xy");
        assert_eq!(entry.cursor(), 2);
    }

    #[test]
    fn focus_request_is_taken_once() {
        let mut entry = EntryPanel::default();
        assert!(!entry.take_focus_request());
        entry.focus();
        assert!(entry.take_focus_request());
        assert!(!entry.take_focus_request());
    }

    #[test]
    fn enter_and_control_keys_are_not_consumed() {
        let mut entry = EntryPanel::default();
        assert_eq!(entry.handle_key(key(KeyCode::Enter)), KeyHandleResult::Ignored);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(entry.handle_key(ctrl_c), KeyHandleResult::Ignored);
        assert_eq!(entry.value(), "");
    }
}
