use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::events::Target;
use crate::overlays::render_help_overlay;
use crate::panels::{render_submit_button, PanelId};
use crate::task::TaskId;

/// Screen areas of clickable elements, rebuilt on every render.
#[derive(Debug, Default)]
pub struct ClickAreas {
    pub entry: Option<Rect>,
    pub submit: Option<Rect>,
    pub rows: Vec<(Rect, TaskId)>,
    pub delete_buttons: Vec<(Rect, TaskId)>,
}

impl ClickAreas {
    pub fn reset(&mut self) {
        self.entry = None;
        self.submit = None;
        self.rows.clear();
        self.delete_buttons.clear();
    }

    /// Innermost element under the given cell. Delete controls sit inside
    /// their rows, so they are checked first.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<Target> {
        let pos = Position::new(column, row);
        if let Some((_, id)) = self.delete_buttons.iter().find(|(r, _)| r.contains(pos)) {
            return Some(Target::DeleteButton(*id));
        }
        if let Some((_, id)) = self.rows.iter().find(|(r, _)| r.contains(pos)) {
            return Some(Target::Row(*id));
        }
        if self.submit.is_some_and(|r| r.contains(pos)) {
            return Some(Target::SubmitButton);
        }
        if self.entry.is_some_and(|r| r.contains(pos)) {
            return Some(Target::Entry);
        }
        None
    }
}

pub struct AppLayout {
    pub title: Rect,
    pub entry: Rect,
    pub submit: Rect,
    pub tasks: Rect,
    pub footer: Rect,
}

pub fn create_layout(area: Rect, submit_label: &str) -> AppLayout {
    let [title, entry_row, tasks, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let button_width = submit_label.chars().count() as u16 + 4;
    let [entry, submit] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(button_width)])
            .areas(entry_row);

    AppLayout {
        title,
        entry,
        submit,
        tasks,
        footer,
    }
}

pub fn render(frame: &mut Frame, app: &mut App) {
    app.click_areas.reset();
    let submit_label = app.controller.submit_button().label.clone();
    let layout = create_layout(frame.area(), &submit_label);

    frame.render_widget(
        Paragraph::new(Span::styled(
            app.title.as_str(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        layout.title,
    );

    let entry_area = app.controller.entry().render(
        frame,
        layout.entry,
        app.focused_panel == PanelId::Entry,
    );
    app.click_areas.entry = Some(entry_area);

    render_submit_button(
        frame,
        layout.submit,
        &submit_label,
        app.focused_panel == PanelId::Submit,
    );
    app.click_areas.submit = Some(layout.submit);

    app.controller.container_mut().render(
        frame,
        layout.tasks,
        app.focused_panel == PanelId::Tasks,
        &mut app.click_areas,
    );

    render_footer(frame, layout.footer, app);

    if app.help_visible {
        render_help_overlay(frame, app.focused_panel.name(), &app.focused_shortcuts());
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let tasks = app.controller.tasks();
    let mut spans = vec![Span::styled(
        format!(" {} tasks, {} done", tasks.len(), tasks.completed_count()),
        Style::default().fg(Color::DarkGray),
    )];

    if app.focused_panel == PanelId::Tasks {
        if let Some(row) = app.controller.container().selected() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                row.delete_label.as_str(),
                Style::default().fg(Color::Gray),
            ));
        }
    }

    spans.push(Span::raw("  "));
    spans.push(Span::styled("[F1]", Style::default().fg(Color::Yellow)));
    spans.push(Span::raw(" Help"));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
