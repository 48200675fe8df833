use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::util::panel_block;
use crate::events::Target;
use crate::surface::{RowContainer, TaskRow};
use crate::task::TaskId;
use crate::ui::ClickAreas;
use crate::util::Shortcut;

pub const DELETE_CONTROL: &str = "[Delete]";

/// Outcome of a key press on the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Consumed,
    Ignored,
    /// The key activates an element; the caller dispatches it.
    Activate(Target),
}

/// Display container for task rows, with a keyboard cursor.
pub struct TasksPanel {
    rows: Vec<TaskRow>,
    cursor: usize,
    /// Visible task rows (updated during render)
    page_size: usize,
}

impl Default for TasksPanel {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            cursor: 0,
            page_size: 10,
        }
    }
}

impl RowContainer for TasksPanel {
    fn append_row(&mut self, row: TaskRow) {
        self.rows.push(row);
    }

    fn remove_row(&mut self, id: TaskId) {
        self.rows.retain(|r| r.id != id);
        self.clamp_cursor();
    }

    fn set_row_completed(&mut self, id: TaskId, completed: bool) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == id) {
            row.completed = completed;
        }
    }
}

impl TasksPanel {
    #[cfg(test)]
    pub fn rows(&self) -> &[TaskRow] {
        &self.rows
    }

    pub fn selected(&self) -> Option<&TaskRow> {
        self.rows.get(self.cursor)
    }

    /// Put the cursor on the row of `id`, if present.
    pub fn select(&mut self, id: TaskId) {
        if let Some(index) = self.rows.iter().position(|r| r.id == id) {
            self.cursor = index;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ListAction {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_down();
                ListAction::Consumed
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_up();
                ListAction::Consumed
            }
            KeyCode::PageDown | KeyCode::Char(',') => {
                self.page_down();
                ListAction::Consumed
            }
            KeyCode::PageUp | KeyCode::Char('.') => {
                self.page_up();
                ListAction::Consumed
            }
            KeyCode::Enter | KeyCode::Char(' ') => self
                .selected()
                .map_or(ListAction::Consumed, |row| {
                    ListAction::Activate(Target::Row(row.id))
                }),
            KeyCode::Char('d') | KeyCode::Delete => self
                .selected()
                .map_or(ListAction::Consumed, |row| {
                    ListAction::Activate(Target::DeleteButton(row.id))
                }),
            _ => ListAction::Ignored,
        }
    }

    pub fn shortcuts(&self) -> Vec<Shortcut> {
        vec![
            Shortcut {
                key: "j/k",
                description: "Navigate",
            },
            Shortcut {
                key: "Home/End",
                description: "First/Last",
            },
            Shortcut {
                key: "Space",
                description: "Toggle done",
            },
            Shortcut {
                key: "d",
                description: "Delete",
            },
            Shortcut {
                key: "Tab",
                description: "Next control",
            },
        ]
    }

    // -- Focus/navigation methods --

    fn clamp_cursor(&mut self) {
        if self.cursor >= self.rows.len() {
            self.cursor = self.rows.len().saturating_sub(1);
        }
    }

    fn move_down(&mut self) {
        if self.cursor + 1 < self.rows.len() {
            self.cursor += 1;
        }
    }

    fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn page_down(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = (self.cursor + self.page_size).min(self.rows.len() - 1);
        }
    }

    fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.page_size);
    }

    // -- Rendering --

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        focused: bool,
        click_areas: &mut ClickAreas,
    ) {
        let block = panel_block(" Tasks ", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.rows.is_empty() {
            let centered = Layout::vertical([Constraint::Length(1)])
                .flex(Flex::Center)
                .split(inner)[0];
            let placeholder = Paragraph::new("(empty)")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(placeholder, centered);
            return;
        }

        let total_height = inner.height as usize;
        if total_height == 0 {
            return;
        }

        // Reserve last row for ellipsis indicator
        let visible_height = total_height.saturating_sub(1).max(1);
        self.page_size = visible_height.saturating_sub(1).max(1);

        let cursor = focused.then_some(self.cursor);
        let offset = scroll_offset(self.rows.len(), visible_height, Some(self.cursor));
        let has_more_below = offset + visible_height < self.rows.len();

        let prefix_width = 6; // "> [x] "
        let delete_width = DELETE_CONTROL.len();
        // Too narrow for a delete control that does not cover the label
        let show_delete = inner.width as usize >= prefix_width + delete_width + 1;
        let max_text_width = if show_delete {
            (inner.width as usize).saturating_sub(prefix_width + delete_width + 1)
        } else {
            (inner.width as usize).saturating_sub(prefix_width)
        };

        for (line_idx, (i, row)) in self
            .rows
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible_height)
            .enumerate()
        {
            let row_area = Rect {
                y: inner.y + line_idx as u16,
                height: 1,
                ..inner
            };
            let is_selected = cursor == Some(i);
            frame.render_widget(
                Paragraph::new(row_line(row, is_selected, max_text_width)),
                row_area,
            );
            click_areas.rows.push((row_area, row.id));

            if show_delete {
                let delete_area = Rect {
                    x: row_area.right() - delete_width as u16,
                    width: delete_width as u16,
                    ..row_area
                };
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        DELETE_CONTROL,
                        Style::default().fg(Color::Red),
                    )),
                    delete_area,
                );
                click_areas.delete_buttons.push((delete_area, row.id));
            }
        }

        if has_more_below {
            let ellipsis_area = Rect {
                y: inner.y + visible_height as u16,
                height: 1,
                ..inner
            };
            if ellipsis_area.y < inner.bottom() {
                frame.render_widget(
                    Paragraph::new(Span::styled("  ...", Style::default().fg(Color::DarkGray))),
                    ellipsis_area,
                );
            }
        }
    }
}

fn row_line(row: &TaskRow, is_selected: bool, max_text_width: usize) -> Line<'static> {
    let checkbox = if row.completed { "[x] " } else { "[ ] " };
    let mut text_style = if row.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::Gray)
    };
    if is_selected {
        text_style = text_style.fg(Color::White).add_modifier(Modifier::BOLD);
    }
    let pointer = if is_selected {
        Span::styled("> ", Style::default().fg(Color::Cyan))
    } else {
        Span::raw("  ")
    };

    Line::from(vec![
        pointer,
        Span::styled(checkbox, Style::default().fg(Color::DarkGray)),
        Span::styled(truncate_with_ellipsis(&row.label, max_text_width), text_style),
    ])
}

fn scroll_offset(total: usize, visible: usize, focused: Option<usize>) -> usize {
    let Some(cursor) = focused else { return 0 };
    if visible == 0 {
        return 0;
    }
    let max_offset = total.saturating_sub(visible);
    let margin = 2usize;
    // Keep cursor at least `margin` from bottom when scrolling down
    let min_offset_for_cursor =
        cursor.saturating_sub(visible.saturating_sub(margin).saturating_sub(1));
    // Keep cursor at least `margin` from top when scrolling up
    let max_offset_for_cursor = cursor.saturating_sub(margin);
    min_offset_for_cursor
        .min(max_offset)
        .min(max_offset_for_cursor.min(max_offset))
}

fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    if max_width < 3 {
        return ".".repeat(max_width);
    }
    let kept: String = text.chars().take(max_width - 3).collect();
    format!("{}...", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::task::Task;

    fn row(id: u64, text: &str) -> TaskRow {
        TaskRow::for_task(&Task::new(TaskId::new(id), text.to_string()))
    }

    fn panel_with(texts: &[&str]) -> TasksPanel {
        let mut panel = TasksPanel::default();
        for (i, text) in texts.iter().enumerate() {
            panel.append_row(row(i as u64 + 1, text));
        }
        panel
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn rendered(panel: &mut TasksPanel, width: u16, height: u16) -> (String, ClickAreas) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut areas = ClickAreas::default();
        terminal
            .draw(|f| {
                let area = f.area();
                panel.render(f, area, true, &mut areas);
            })
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        (text, areas)
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut panel = panel_with(&["a", "b"]);
        panel.handle_key(key(KeyCode::Char('k')));
        assert_eq!(panel.selected().map(|r| r.label.as_str()), Some("a"));
        panel.handle_key(key(KeyCode::Char('j')));
        panel.handle_key(key(KeyCode::Char('j')));
        assert_eq!(panel.selected().map(|r| r.label.as_str()), Some("b"));
    }

    #[test]
    fn space_activates_row_and_d_activates_delete() {
        let mut panel = panel_with(&["a"]);
        let id = TaskId::new(1);
        assert_eq!(
            panel.handle_key(key(KeyCode::Char(' '))),
            ListAction::Activate(Target::Row(id))
        );
        assert_eq!(
            panel.handle_key(key(KeyCode::Char('d'))),
            ListAction::Activate(Target::DeleteButton(id))
        );
    }

    #[test]
    fn activation_on_empty_list_does_nothing() {
        let mut panel = TasksPanel::default();
        assert_eq!(panel.handle_key(key(KeyCode::Enter)), ListAction::Consumed);
        assert_eq!(panel.handle_key(key(KeyCode::Char('q'))), ListAction::Ignored);
    }

    #[test]
    fn removing_last_row_clamps_cursor() {
        let mut panel = panel_with(&["a", "b", "c"]);
        panel.select(TaskId::new(3));
        panel.remove_row(TaskId::new(3));
        assert_eq!(panel.selected().map(|r| r.label.as_str()), Some("b"));
        panel.remove_row(TaskId::new(1));
        panel.remove_row(TaskId::new(2));
        assert!(panel.selected().is_none());
    }

    #[test]
    fn completion_flag_updates_only_that_row() {
        let mut panel = panel_with(&["a", "b"]);
        panel.set_row_completed(TaskId::new(2), true);
        let flags: Vec<bool> = panel.rows().iter().map(|r| r.completed).collect();
        assert_eq!(flags, [false, true]);
    }

    #[test]
    fn renders_rows_with_delete_controls() {
        let mut panel = panel_with(&["Buy milk", "Walk dog"]);
        panel.set_row_completed(TaskId::new(1), true);
        let (text, areas) = rendered(&mut panel, 40, 8);

        assert!(text.contains("[x] Buy milk"));
        assert!(text.contains("[ ] Walk dog"));
        assert_eq!(text.matches(DELETE_CONTROL).count(), 2);
        assert_eq!(areas.rows.len(), 2);
        assert_eq!(areas.delete_buttons.len(), 2);
    }

    #[test]
    fn narrow_panel_drops_delete_controls() {
        let mut panel = panel_with(&["Buy milk"]);
        let (text, areas) = rendered(&mut panel, 12, 6);
        assert!(!text.contains("[Delete]"));
        assert!(areas.delete_buttons.is_empty());
        assert_eq!(areas.rows.len(), 1);
        assert_eq!(
            panel.handle_key(key(KeyCode::Char('d'))),
            ListAction::Activate(Target::DeleteButton(TaskId::new(1)))
        );
    }

    #[test]
    fn delete_control_never_overlaps_label() {
        let mut panel = panel_with(&["a fairly long task label"]);
        let (_, areas) = rendered(&mut panel, 17, 6);
        let (row, _) = areas.rows[0];
        let (delete, _) = areas.delete_buttons[0];
        assert_eq!(delete.width, 8);
        assert_eq!(delete.right(), row.right());
        assert!(delete.x >= row.x + 6);
    }

    #[test]
    fn renders_placeholder_when_empty() {
        let mut panel = TasksPanel::default();
        let (text, areas) = rendered(&mut panel, 30, 6);
        assert!(text.contains("(empty)"));
        assert!(areas.rows.is_empty());
    }

    #[test]
    fn long_list_scrolls_to_cursor() {
        let texts: Vec<String> = (1..=20).map(|i| format!("task {i:02}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let mut panel = panel_with(&refs);
        panel.select(TaskId::new(20));
        let (text, areas) = rendered(&mut panel, 40, 8);
        assert!(text.contains("task 20"));
        assert!(!text.contains("task 01"));
        assert!(areas.rows.iter().any(|(_, id)| *id == TaskId::new(20)));
    }

    #[test]
    fn truncation_respects_width() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("a long task label", 10), "a long...");
        assert_eq!(truncate_with_ellipsis("abcdef", 2), "..");
    }

    #[test]
    fn scroll_offset_keeps_cursor_visible() {
        assert_eq!(scroll_offset(5, 10, Some(4)), 0);
        let offset = scroll_offset(30, 6, Some(29));
        assert!(offset <= 29 && 29 < offset + 6);
        assert_eq!(scroll_offset(30, 6, None), 0);
    }
}
