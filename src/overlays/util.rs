use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear},
    Frame,
};

/// A `width` x `height` rect centred in `area`, shrunk to fit if needed.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

pub fn render_overlay_frame(frame: &mut Frame, area: Rect, title: &str, color: Color) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

pub fn shortcut_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw("    "),
        Span::styled(format!("{:<8}", format!("[{key}]")), Style::default().fg(Color::Yellow)),
        Span::raw(format!(" {description}")),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centred_within_area() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(area, 30, 10), Rect::new(35, 15, 30, 10));
    }

    #[test]
    fn shrinks_to_small_area() {
        let area = Rect::new(2, 1, 20, 5);
        assert_eq!(centered_rect(area, 30, 10), area);
    }
}
