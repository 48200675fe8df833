use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
};

pub fn panel_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

/// Focusable controls, in focus-ring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Entry,
    Submit,
    Tasks,
}

impl PanelId {
    pub const fn all() -> [Self; 3] {
        [Self::Entry, Self::Submit, Self::Tasks]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Entry => "Entry",
            Self::Submit => "Submit",
            Self::Tasks => "Tasks",
        }
    }

    pub fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|&p| p == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn previous(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|&p| p == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_ring_wraps_both_ways() {
        assert_eq!(PanelId::Entry.next(), PanelId::Submit);
        assert_eq!(PanelId::Tasks.next(), PanelId::Entry);
        assert_eq!(PanelId::Entry.previous(), PanelId::Tasks);
        assert_eq!(PanelId::Submit.previous(), PanelId::Entry);
    }
}
