//! Search overlay popup
//!
//! Input line plus live results. Shared by the global search and the seed
//! picker; only the title and hint differ.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
};

use crate::store::search::MIN_QUERY_CHARS;
use crate::store::{OverlayState, SearchOverlay, SearchScope};
use crate::ui::{centered_rect, Theme};

pub fn render(frame: &mut Frame, area: Rect, overlay: &SearchOverlay) {
    let popup = centered_rect(70, 70, area);
    frame.render_widget(Clear, popup);

    let (title, style) = match overlay.scope() {
        SearchScope::Catalog => (
            format!(" SEARCH {} ", overlay.media_type().to_string().to_uppercase()),
            Theme::border_focused(),
        ),
        SearchScope::Seeds => (" PICK A SEED MOVIE ".to_string(), Theme::lab()),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style)
        .title(Span::styled(title, style))
        .style(Style::default().bg(Theme::BACKGROUND));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);

    let input = Paragraph::new(format!("⌕ {}│", overlay.query()))
        .style(Theme::input())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border()),
        );
    frame.render_widget(input, chunks[0]);

    match overlay.state() {
        OverlayState::Closed => {}
        OverlayState::Open => {
            let hint = Paragraph::new(format!(
                "Type more than {} characters to search",
                MIN_QUERY_CHARS
            ))
            .style(Theme::dimmed())
            .alignment(Alignment::Center);
            frame.render_widget(hint, chunks[1]);
        }
        OverlayState::Querying if overlay.results().is_empty() => {
            let loading = Paragraph::new("Searching...")
                .style(Theme::loading())
                .alignment(Alignment::Center);
            frame.render_widget(loading, chunks[1]);
        }
        OverlayState::ResultsShown if overlay.results().is_empty() => {
            let none = Paragraph::new("No matches")
                .style(Theme::dimmed())
                .alignment(Alignment::Center);
            frame.render_widget(none, chunks[1]);
        }
        OverlayState::Querying | OverlayState::ResultsShown => {
            let visible = chunks[1].height as usize;
            let offset = crate::ui::browser::scroll_offset(overlay.selected, visible);
            let rows: Vec<ListItem> = overlay
                .results()
                .iter()
                .enumerate()
                .skip(offset)
                .take(visible)
                .map(|(i, item)| {
                    let selected = i == overlay.selected;
                    let year = item.year().map(|y| format!(" ({})", y)).unwrap_or_default();
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            item.title.clone(),
                            if selected {
                                Theme::list_item_selected()
                            } else {
                                Theme::list_item()
                            },
                        ),
                        Span::styled(year, Theme::year()),
                        Span::raw(" "),
                        Span::styled(
                            format!("★ {:.1}", item.vote_average),
                            Theme::rating(item.vote_average),
                        ),
                    ]))
                })
                .collect();
            frame.render_widget(List::new(rows), chunks[1]);
        }
    }
}
