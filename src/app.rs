use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, trace};

use crate::config::UiConfig;
use crate::controller::TaskListController;
use crate::events::Target;
use crate::panels::{EntryPanel, ListAction, PanelId, TasksPanel};
use crate::surface::SubmitButton;
use crate::ui::ClickAreas;
use crate::util::{KeyHandleResult, Shortcut};

pub type Controller = TaskListController<EntryPanel, TasksPanel>;

pub struct App {
    pub should_quit: bool,
    pub controller: Controller,
    pub focused_panel: PanelId,
    pub help_visible: bool,
    pub title: String,
    /// Hit areas recorded by the last render
    pub click_areas: ClickAreas,
}

impl Default for App {
    fn default() -> Self {
        Self::new(&UiConfig::default())
    }
}

impl App {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            should_quit: false,
            controller: TaskListController::new(
                EntryPanel::default(),
                SubmitButton::new(config.submit_label.clone()),
                TasksPanel::default(),
            ),
            focused_panel: PanelId::Entry,
            help_visible: false,
            title: config.title.clone(),
            click_areas: ClickAreas::default(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global shortcuts first
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Esc => {
                if self.help_visible {
                    self.help_visible = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            KeyCode::F(1) => {
                self.help_visible = !self.help_visible;
                return;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.focused_panel = self.focused_panel.previous();
                } else {
                    self.focused_panel = self.focused_panel.next();
                }
                return;
            }
            KeyCode::BackTab => {
                self.focused_panel = self.focused_panel.previous();
                return;
            }
            _ => {}
        }

        if self.help_visible {
            if key.code == KeyCode::Char('?') {
                self.help_visible = false;
            }
            return;
        }

        // Pass to focused control
        let result = match self.focused_panel {
            PanelId::Entry => self.handle_entry_key(key),
            PanelId::Submit => self.handle_submit_key(key),
            PanelId::Tasks => self.handle_tasks_key(key),
        };

        // Letters are text while the entry has focus
        if result == KeyHandleResult::Ignored && self.focused_panel != PanelId::Entry {
            match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('?') => self.help_visible = true,
                _ => {}
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if self.help_visible {
            self.help_visible = false;
            return;
        }
        let Some(target) = self.click_areas.hit_test(mouse.column, mouse.row) else {
            trace!(column = mouse.column, row = mouse.row, "click outside any control");
            return;
        };
        match target {
            Target::Row(id) => {
                self.controller.container_mut().select(id);
                self.focused_panel = PanelId::Tasks;
            }
            Target::DeleteButton(_) => self.focused_panel = PanelId::Tasks,
            Target::SubmitButton => self.focused_panel = PanelId::Submit,
            Target::Entry => {}
        }
        self.click(target);
    }

    pub fn focused_shortcuts(&self) -> Vec<Shortcut> {
        match self.focused_panel {
            PanelId::Entry => self.controller.entry().shortcuts(),
            PanelId::Submit => vec![Shortcut {
                key: "Enter",
                description: "Add task",
            }],
            PanelId::Tasks => self.controller.container().shortcuts(),
        }
    }

    fn handle_entry_key(&mut self, key: KeyEvent) -> KeyHandleResult {
        let result = match self.controller.on_entry_key(key) {
            KeyHandleResult::Consumed => KeyHandleResult::Consumed,
            KeyHandleResult::Ignored => self.controller.entry_mut().handle_key(key),
        };
        self.sync_focus();
        result
    }

    fn handle_submit_key(&mut self, key: KeyEvent) -> KeyHandleResult {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.click(Target::SubmitButton);
                KeyHandleResult::Consumed
            }
            _ => KeyHandleResult::Ignored,
        }
    }

    fn handle_tasks_key(&mut self, key: KeyEvent) -> KeyHandleResult {
        if matches!(key.code, KeyCode::Home | KeyCode::End) {
            let tasks = self.controller.tasks();
            let index = if key.code == KeyCode::Home {
                0
            } else {
                tasks.len().saturating_sub(1)
            };
            if let Some(id) = tasks.id_at(index) {
                self.controller.container_mut().select(id);
            }
            return KeyHandleResult::Consumed;
        }
        match self.controller.container_mut().handle_key(key) {
            ListAction::Consumed => KeyHandleResult::Consumed,
            ListAction::Ignored => KeyHandleResult::Ignored,
            ListAction::Activate(target) => {
                self.click(target);
                KeyHandleResult::Consumed
            }
        }
    }

    fn click(&mut self, target: Target) {
        let dispatch = self.controller.click(target);
        debug!(?target, handled = ?dispatch.handled, "gesture dispatched");
        self.sync_focus();
    }

    /// Follow focus requests the controller made on the entry field.
    fn sync_focus(&mut self) {
        if self.controller.entry_mut().take_focus_request() {
            self.focused_panel = PanelId::Entry;
        }
    }
}
