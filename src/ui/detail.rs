//! Detail popup for movies and TV shows
//!
//! Info panel on the left; cast and similar titles stacked on the right.
//! Tab cycles focus between the three panels.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::app::DetailFocus;
use crate::models::{CastMember, CatalogItem, DetailRecord};
use crate::store::{DetailLoader, FavoritesStore};
use crate::ui::{centered_rect, Theme};

/// Everything the popup needs from the app
pub struct DetailPopup<'a> {
    pub loader: &'a DetailLoader,
    pub favorites: &'a FavoritesStore,
    pub focus: DetailFocus,
    pub cursor: usize,
}

fn runtime_str(minutes: Option<u32>) -> Option<String> {
    match minutes? {
        0 => None,
        m if m < 60 => Some(format!("{}m", m)),
        m => Some(format!("{}h {}m", m / 60, m % 60)),
    }
}

fn panel_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(format!(" {} ", title), Theme::title()))
}

impl<'a> DetailPopup<'a> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(90, 85, area);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Block::default().style(Style::default().bg(Theme::BACKGROUND)),
            popup,
        );

        let Some(record) = self.loader.current() else {
            self.render_loading(frame, popup);
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(popup);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        self.render_info_panel(frame, columns[0], record);
        self.render_cast_panel(frame, right[0], &record.cast);
        self.render_similar_panel(frame, right[1], &record.similar);
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let text = if self.loader.is_loading() {
            Span::styled("⟳ Loading details...", Theme::loading())
        } else {
            Span::styled("No details", Theme::dimmed())
        };
        let paragraph = Paragraph::new(vec![Line::from(""), Line::from(text)])
            .alignment(Alignment::Center)
            .block(panel_block("DETAILS", true));
        frame.render_widget(paragraph, area);
    }

    fn render_info_panel(&self, frame: &mut Frame, area: Rect, record: &DetailRecord) {
        let block = panel_block("INFO", self.focus == DetailFocus::Info);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();

        let year_str = record.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        let mut title_spans = vec![
            Span::styled("▶ ", Theme::accent()),
            Span::styled(record.title.clone(), Theme::title()),
            Span::styled(year_str, Theme::year()),
        ];
        if self.favorites.contains(record.id) {
            title_spans.push(Span::styled(" ♥", Theme::favorite()));
        }
        lines.push(Line::from(title_spans));

        let mut meta_spans = vec![Span::styled(
            format!("★ {:.1}", record.vote_average),
            Theme::rating(record.vote_average),
        )];
        if let Some(runtime) = runtime_str(record.runtime) {
            meta_spans.push(Span::styled(" │ ", Theme::dimmed()));
            meta_spans.push(Span::styled(runtime, Theme::text()));
        }
        meta_spans.push(Span::styled(" │ ", Theme::dimmed()));
        meta_spans.push(Span::styled(
            record.media_type.to_string().to_uppercase(),
            Theme::dimmed(),
        ));
        lines.push(Line::from(meta_spans));

        let genres = record.genres_str();
        if !genres.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Genre: ", Theme::dimmed()),
                Span::styled(genres, Theme::genre()),
            ]));
        }

        lines.push(Line::from(Span::styled(
            "─".repeat(inner.width as usize),
            Theme::dimmed(),
        )));

        if !record.overview.is_empty() {
            lines.push(Line::from(Span::styled("OVERVIEW", Theme::accent())));
            lines.push(Line::from(""));
            for line in record.overview.lines() {
                lines.push(Line::from(Span::styled(line.to_string(), Theme::text())));
            }
            lines.push(Line::from(""));
        }

        let trailer_hint = if record.trailer().is_some() {
            Span::styled("Trailer  ", Theme::keybind_desc())
        } else {
            Span::styled("No trailer  ", Theme::dimmed())
        };
        lines.push(Line::from(vec![
            Span::styled(" t ", Theme::keybind()),
            trailer_hint,
            Span::styled(" SPACE ", Theme::keybind()),
            Span::styled("Favorite  ", Theme::keybind_desc()),
            Span::styled(" a ", Theme::keybind()),
            Span::styled("To lab  ", Theme::keybind_desc()),
            Span::styled(" s ", Theme::keybind()),
            Span::styled("Share", Theme::keybind_desc()),
        ]));

        let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn render_cast_panel(&self, frame: &mut Frame, area: Rect, cast: &[CastMember]) {
        let focused = self.focus == DetailFocus::Cast;
        let block = panel_block("CAST", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if cast.is_empty() {
            frame.render_widget(
                Paragraph::new("No cast listed").style(Theme::dimmed()),
                inner,
            );
            return;
        }

        let visible = inner.height as usize;
        let offset = crate::ui::browser::scroll_offset(self.cursor, visible);
        let rows: Vec<ListItem> = cast
            .iter()
            .enumerate()
            .skip(if focused { offset } else { 0 })
            .take(visible)
            .map(|(i, member)| {
                let selected = focused && i == self.cursor;
                ListItem::new(Line::from(vec![
                    Span::styled(
                        member.name.clone(),
                        if selected {
                            Theme::list_item_selected()
                        } else {
                            Theme::list_item()
                        },
                    ),
                    Span::styled(format!("  {}", member.character), Theme::dimmed()),
                ]))
            })
            .collect();
        frame.render_widget(List::new(rows), inner);
    }

    fn render_similar_panel(&self, frame: &mut Frame, area: Rect, similar: &[CatalogItem]) {
        let focused = self.focus == DetailFocus::Similar;
        let block = panel_block("SIMILAR", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if similar.is_empty() {
            frame.render_widget(
                Paragraph::new("Nothing similar").style(Theme::dimmed()),
                inner,
            );
            return;
        }

        let visible = inner.height as usize;
        let offset = crate::ui::browser::scroll_offset(self.cursor, visible);
        let rows: Vec<ListItem> = similar
            .iter()
            .enumerate()
            .skip(if focused { offset } else { 0 })
            .take(visible)
            .map(|(i, item)| {
                let selected = focused && i == self.cursor;
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
        frame.render_widget(List::new(rows), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_str() {
        assert_eq!(runtime_str(None), None);
        assert_eq!(runtime_str(Some(0)), None);
        assert_eq!(runtime_str(Some(45)), Some("45m".to_string()));
        assert_eq!(runtime_str(Some(148)), Some("2h 28m".to_string()));
    }
}
