//! Catalog list
//!
//! Renders a list of catalog items (discover, favorites, lab results) with
//! a selection marker, year, media type, rating and favorite flag.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::app::ListState;
use crate::models::{CatalogItem, MediaType};
use crate::store::FavoritesStore;
use crate::ui::Theme;

/// One renderable list of catalog items
pub struct CatalogList<'a> {
    pub items: &'a [CatalogItem],
    pub list: &'a ListState,
    pub title: String,
    pub focused: bool,
    /// Marks favorites with a heart when given
    pub favorites: Option<&'a FavoritesStore>,
    /// Shown instead of the list when there are no items
    pub empty_message: &'a str,
    /// Optional last line (e.g. load-more hint)
    pub footer: Option<Line<'a>>,
}

/// First visible row so that `selected` stays on screen
pub fn scroll_offset(selected: usize, visible_height: usize) -> usize {
    if visible_height == 0 {
        selected
    } else {
        (selected + 1).saturating_sub(visible_height)
    }
}

impl<'a> CatalogList<'a> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        if self.items.is_empty() {
            let empty = Paragraph::new(self.empty_message)
                .style(Theme::dimmed())
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(border_style)
                        .border_type(BorderType::Rounded)
                        .title(Span::styled(format!(" {} ", self.title), Theme::title())),
                );
            frame.render_widget(empty, area);
            return;
        }

        let footer_rows = usize::from(self.footer.is_some());
        let visible_height = (area.height.saturating_sub(2) as usize).saturating_sub(footer_rows);
        let offset = scroll_offset(self.list.selected, visible_height);

        let mut rows: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible_height)
            .map(|(i, item)| self.render_item(i, item))
            .collect();
        if let Some(footer) = &self.footer {
            rows.push(ListItem::new(footer.clone()));
        }

        let title = format!(
            " {} ({}/{}) ",
            self.title,
            self.list.selected + 1,
            self.items.len()
        );

        let list = List::new(rows)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .border_type(BorderType::Rounded)
                    .title(Span::styled(title, Theme::title())),
            )
            .style(Theme::text());

        frame.render_widget(list, area);
    }

    /// Format: ▸ Title (Year) [MOVIE] ★ 8.5 ♥
    fn render_item(&self, index: usize, item: &CatalogItem) -> ListItem<'static> {
        let is_selected = self.focused && index == self.list.selected;

        let marker = if is_selected { "▸ " } else { "  " };
        let year_str = item.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        let type_str = match item.media_type {
            MediaType::Movie => "MOVIE",
            MediaType::Tv => "TV",
        };

        let mut spans = vec![
            Span::styled(
                marker,
                if is_selected { Theme::accent() } else { Theme::dimmed() },
            ),
            Span::styled(
                item.title.clone(),
                if is_selected {
                    Theme::list_item_selected()
                } else {
                    Theme::list_item()
                },
            ),
            Span::styled(year_str, Theme::year()),
            Span::raw(" "),
            Span::styled(format!("[{}]", type_str), Theme::dimmed()),
            Span::raw(" "),
            Span::styled(
                format!("★ {:.1}", item.vote_average),
                Theme::rating(item.vote_average),
            ),
        ];

        if self.favorites.is_some_and(|f| f.contains(item.id)) {
            spans.push(Span::styled(" ♥", Theme::favorite()));
        }

        ListItem::new(Line::from(spans))
    }
}
