use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use super::super::view::DialogRender;
use super::layout::centered_rect;

const MIN_WIDTH: u16 = 24;

pub fn render_dialog(frame: &mut Frame<'_>, dialog: DialogRender<'_>) {
    let screen = frame.area();
    let widest = dialog
        .message
        .lines()
        .map(UnicodeWidthStr::width)
        .chain(std::iter::once(dialog.title.width()))
        .max()
        .unwrap_or(0) as u16;
    let width_limit = screen.width.saturating_sub(2).max(1);
    let width = widest.saturating_add(4).max(MIN_WIDTH).min(width_limit);
    let inner_width = width.saturating_sub(2).max(1) as usize;

    let mut lines: Vec<Line<'static>> = wrap(dialog.message, inner_width)
        .into_iter()
        .map(|line| Line::from(line.into_owned()))
        .collect();
    lines.push(Line::default());
    lines.push(buttons(dialog.yes_selected));

    let height = (lines.len() as u16).saturating_add(2);
    let area = centered_rect(screen, width, height);
    frame.render_widget(Clear, area);

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(dialog.title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(paragraph, area);
}

fn buttons(yes_selected: bool) -> Line<'static> {
    let active = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let idle = Style::default();
    let (yes, no) = if yes_selected {
        (active, idle)
    } else {
        (idle, active)
    };
    Line::from(vec![
        Span::styled("[ Yes ]", yes),
        Span::raw("   "),
        Span::styled("[ No ]", no),
    ])
}
