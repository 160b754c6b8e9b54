use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::super::view::{FieldRow, FormView};

const HIGHLIGHT_SYMBOL: &str = "» ";

pub fn render_fields(frame: &mut Frame<'_>, area: Rect, view: &FormView, enable_cursor: bool) {
    let title = view.title.clone().unwrap_or_else(|| "Fields".to_string());
    if view.rows.is_empty() {
        let placeholder = Paragraph::new("This form has no fields")
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem<'static>> = view
        .rows
        .iter()
        .map(field_line)
        .map(ListItem::new)
        .collect();
    let focused = view.focused.min(view.rows.len() - 1);
    let mut state = ListState::default();
    state.select(Some(focused));

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(HIGHLIGHT_SYMBOL);
    frame.render_stateful_widget(list, area, &mut state);

    if enable_cursor {
        let row = &view.rows[focused];
        let line = focused.saturating_sub(state.offset()) as u16;
        let column = HIGHLIGHT_SYMBOL.width() + row.label.width() + 2 + row.text.width();
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(column as u16)
            .min(area.right().saturating_sub(2));
        let y = area.y.saturating_add(1).saturating_add(line);
        if y < area.bottom().saturating_sub(1) {
            frame.set_cursor_position((x, y));
        }
    }
}

fn field_line(row: &FieldRow) -> Line<'static> {
    let text_style = if row.readable {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    };
    let mut spans = vec![
        Span::styled(
            format!("{}: ", row.label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(row.text.clone(), text_style),
    ];
    if !row.hint.is_empty() {
        spans.push(Span::styled(
            format!("  ({})", row.hint),
            Style::default().fg(Color::Gray),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend, layout::Position};

    fn row(label: &str, text: &str, readable: bool) -> FieldRow {
        FieldRow {
            label: label.to_string(),
            text: text.to_string(),
            hint: String::new(),
            readable,
        }
    }

    fn invoice_view(focused: usize) -> FormView {
        FormView {
            title: Some("Invoice".to_string()),
            rows: vec![row("price", "12,5", false), row("qty", "3", true)],
            focused,
        }
    }

    fn draw(view: &FormView, enable_cursor: bool) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_fields(frame, area, view, enable_cursor)
            })
            .unwrap();
        terminal
    }

    #[test]
    fn cursor_sits_after_focused_text() {
        let mut terminal = draw(&invoice_view(0), true);
        // border + "» " + "price: " + "12,5"
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(14, 1));

        let mut terminal = draw(&invoice_view(1), true);
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(9, 2));
    }

    #[test]
    fn unreadable_text_is_red() {
        let terminal = draw(&invoice_view(1), false);
        let buffer = terminal.backend().buffer();

        let bad = &buffer[Position::new(10, 1)];
        assert_eq!(bad.symbol(), "1");
        assert_eq!(bad.fg, Color::Red);
        assert!(bad.modifier.contains(Modifier::BOLD));

        let good = &buffer[Position::new(8, 2)];
        assert_eq!(good.symbol(), "3");
        assert_eq!(good.fg, Color::White);
    }

    #[test]
    fn empty_form_shows_placeholder() {
        let view = FormView::default();
        let terminal = draw(&view, true);
        let line: String = (0..40)
            .map(|x| terminal.backend().buffer()[Position::new(x, 1)].symbol().to_string())
            .collect();
        assert!(line.contains("This form has no fields"));
    }
}
