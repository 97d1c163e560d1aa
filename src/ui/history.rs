// History list rendering.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Focus};
use crate::history::ArticleStore;

use super::border_style;

/// Render past lookups, newest first.
pub fn draw_history<S: ArticleStore, C>(frame: &mut Frame, app: &mut App<S, C>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app.focus == Focus::History))
        .title(format!(" History ({}) ", app.history.len()));

    if app.history.is_empty() {
        let text = Paragraph::new("No articles yet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let items: Vec<ListItem> = app
        .history
        .articles()
        .iter()
        .map(|article| {
            ListItem::new(Line::from(Span::styled(
                article.url.as_str(),
                Style::default().fg(Color::Blue),
            )))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.history_state);
}
