//! Terminal UI components
//!
//! Rendering is a pure function of `App`: every frame is drawn from the
//! stores, and overlays stack on top of the active view.

pub mod browser;
pub mod detail;
pub mod filter;
pub mod lab;
pub mod search;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, View};
use crate::ui::browser::CatalogList;
use crate::ui::detail::DetailPopup;

/// Rectangle of `percent_x` by `percent_y` centered in `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Main render function, dispatches to view renderers and overlays
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(Style::default().bg(Theme::BACKGROUND)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);

    if app.details.is_open() {
        DetailPopup {
            loader: &app.details,
            favorites: &app.favorites,
            focus: app.detail_focus,
            cursor: app.detail_cursor,
        }
        .render(frame, chunks[1]);
    }
    if app.search.is_open() {
        search::render(frame, chunks[1], &app.search);
    }
    if app.seed_picker.is_open() {
        search::render(frame, chunks[1], &app.seed_picker);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14), // Logo
            Constraint::Min(1),     // Tabs
            Constraint::Length(12), // Media type
        ])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled("FLUX", Theme::title()),
        Span::styled("IFY", Theme::lab()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, header_chunks[0]);

    let mut tabs = Vec::new();
    for (i, view) in [View::Discover, View::Favorites, View::Lab].iter().enumerate() {
        let label = match view {
            View::Favorites => format!(" {} {} ({}) ", i + 1, view.title(), app.favorites.len()),
            _ => format!(" {} {} ", i + 1, view.title()),
        };
        let style = if *view == app.view {
            Theme::list_item_selected()
        } else {
            Theme::dimmed()
        };
        tabs.push(Span::styled(label, style));
        tabs.push(Span::raw(" "));
    }
    let tabs = Paragraph::new(Line::from(tabs)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(tabs, header_chunks[1]);

    let media = Paragraph::new(Span::styled(
        app.catalog.media_type().to_string().to_uppercase(),
        Theme::accent(),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(media, header_chunks[2]);
}

fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    match app.view {
        View::Discover => render_discover(frame, area, app),
        View::Favorites => CatalogList {
            items: app.favorites.items(),
            list: &app.favorites_list,
            title: "FAVORITES".into(),
            focused: true,
            favorites: None,
            empty_message: "No favorites yet. Press SPACE in a detail view to add one.",
            footer: None,
        }
        .render(frame, area),
        View::Lab => lab::render(frame, area, app),
    }
}

fn render_discover(frame: &mut Frame, area: Rect, app: &App) {
    let list_area = if app.filter_panel.open {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(1)])
            .split(area);
        filter::render(frame, columns[0], &app.filter_panel, &app.catalog);
        columns[1]
    } else {
        area
    };

    let catalog = &app.catalog;
    if catalog.is_loading() && catalog.is_empty() {
        let loading = Paragraph::new("⟳ Loading...")
            .style(Theme::loading())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Theme::border()),
            );
        frame.render_widget(loading, list_area);
        return;
    }

    let footer = if catalog.is_loading_more() {
        Some(Line::from(Span::styled("  ⟳ Loading more...", Theme::loading())))
    } else if !catalog.is_empty() {
        Some(Line::from(vec![
            Span::styled("  n ", Theme::keybind()),
            Span::styled("Load more", Theme::keybind_desc()),
        ]))
    } else {
        None
    };

    let mut title = if catalog.has_active_filter() {
        "DISCOVER".to_string()
    } else {
        "TRENDING".to_string()
    };
    if let Some(actor) = &catalog.filter().actor {
        title = format!("{} · {}", title, actor.name);
    }

    CatalogList {
        items: catalog.items(),
        list: &app.discover_list,
        title,
        focused: !app.filter_panel.open,
        favorites: Some(&app.favorites),
        empty_message: "No data",
        footer,
    }
    .render(frame, list_area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let view_indicator = Span::styled(
        format!(" {} ", app.view.title().to_uppercase()),
        Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
    );

    let status_line = match &app.status {
        Some(status) => Line::from(vec![
            view_indicator,
            Span::raw(" "),
            Span::styled(status.clone(), Theme::accent()),
        ]),
        None => {
            let help = if app.details.is_open() {
                " ESC:close  TAB:focus  ENTER:open  t:trailer  SPACE:favorite "
            } else {
                match app.view {
                    View::Discover => " q:quit  /:search  f:filters  m:movie/tv  1-3:views ",
                    View::Favorites => " q:quit  ENTER:details  SPACE:remove  1-3:views ",
                    View::Lab => " q:quit  +:add seed  d:remove  r:run  TAB:focus ",
                }
            };
            Line::from(vec![view_indicator, Span::styled(help, Theme::dimmed())])
        }
    };

    let status = Paragraph::new(status_line).style(Theme::status_bar());
    frame.render_widget(status, area);
}
