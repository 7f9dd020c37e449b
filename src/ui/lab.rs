//! AI Lab view
//!
//! Three seed slots on the left, synthesized results on the right.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::app::{App, LabFocus};
use crate::store::synthesis::MAX_SLOTS;
use crate::ui::browser::CatalogList;
use crate::ui::Theme;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(1)])
        .split(area);

    render_slots(frame, columns[0], app);

    let engine = &app.synthesis;
    if engine.is_scanning() {
        let scanning = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("⟳ SCANNING...", Theme::lab())),
            Line::from(Span::styled("Blending your seeds", Theme::dimmed())),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::lab())
                .title(Span::styled(" RESULTS ", Theme::lab())),
        );
        frame.render_widget(scanning, columns[1]);
        return;
    }

    let empty = if engine.is_full() {
        "Press r to synthesize"
    } else {
        "Fill all three slots, then press r"
    };
    CatalogList {
        items: engine.results(),
        list: &app.results_list,
        title: "RESULTS".into(),
        focused: app.lab_focus == LabFocus::Results,
        favorites: Some(&app.favorites),
        empty_message: empty,
        footer: None,
    }
    .render(frame, columns[1]);
}

fn render_slots(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.lab_focus == LabFocus::Slots;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused { Theme::lab() } else { Theme::border() })
        .title(Span::styled(
            format!(" SEEDS {}/{} ", app.synthesis.slots().len(), MAX_SLOTS),
            Theme::lab(),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let slots = app.synthesis.slots();
    let mut rows: Vec<ListItem> = (0..MAX_SLOTS)
        .map(|i| match slots.get(i) {
            Some(item) => {
                let selected = focused && i == app.slots_list.selected;
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), Theme::dimmed()),
                    Span::styled(
                        item.title.clone(),
                        if selected {
                            Theme::list_item_selected()
                        } else {
                            Theme::list_item()
                        },
                    ),
                ]))
            }
            None => ListItem::new(Line::from(vec![
                Span::styled(format!("{}. ", i + 1), Theme::dimmed()),
                Span::styled("[ empty slot ]", Theme::dimmed()),
            ])),
        })
        .collect();

    rows.push(ListItem::new(""));
    rows.push(ListItem::new(Line::from(vec![
        Span::styled(" + ", Theme::keybind()),
        Span::styled("Add  ", Theme::keybind_desc()),
        Span::styled(" d ", Theme::keybind()),
        Span::styled("Remove  ", Theme::keybind_desc()),
        Span::styled(" r ", Theme::keybind()),
        Span::styled("Run", Theme::keybind_desc()),
    ])));

    frame.render_widget(List::new(rows), inner);
}
