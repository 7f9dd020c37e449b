//! Filter panel
//!
//! Side panel over the discover list: genre, year, minimum rating, sort
//! and the active cast member filter.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{FilterField, FilterPanel};
use crate::store::CatalogStore;
use crate::ui::Theme;

fn field_label(field: FilterField) -> &'static str {
    match field {
        FilterField::Genre => "Genre",
        FilterField::Year => "Year",
        FilterField::Rating => "Min rating",
        FilterField::Sort => "Sort",
        FilterField::Actor => "Cast",
    }
}

fn field_value(field: FilterField, catalog: &CatalogStore) -> String {
    let filter = catalog.filter();
    match field {
        FilterField::Genre => filter
            .genre
            .map(|id| {
                catalog
                    .genre_name(id)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{}", id))
            })
            .unwrap_or_else(|| "All genres".into()),
        FilterField::Year => filter
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "All years".into()),
        FilterField::Rating => format!("{:.1}+", filter.min_rating),
        FilterField::Sort => filter.sort.to_string(),
        FilterField::Actor => filter
            .actor
            .as_ref()
            .map(|a| a.name.clone())
            .unwrap_or_else(|| "-".into()),
    }
}

pub fn render(frame: &mut Frame, area: Rect, panel: &FilterPanel, catalog: &CatalogStore) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(" FILTERS ", Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for field in FilterField::ALL {
        let active = field == panel.field;
        lines.push(Line::from(Span::styled(
            field_label(field).to_uppercase(),
            if active { Theme::accent() } else { Theme::dimmed() },
        )));
        lines.push(Line::from(vec![
            Span::styled(if active { "◂ " } else { "  " }, Theme::keybind()),
            Span::styled(
                field_value(field, catalog),
                if active { Theme::title() } else { Theme::text() },
            ),
            Span::styled(if active { " ▸" } else { "" }, Theme::keybind()),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("↑↓", Theme::keybind()),
        Span::styled(" field  ", Theme::keybind_desc()),
        Span::styled("←→", Theme::keybind()),
        Span::styled(" adjust  ", Theme::keybind_desc()),
        Span::styled("x", Theme::keybind()),
        Span::styled(" clear cast", Theme::keybind_desc()),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}
