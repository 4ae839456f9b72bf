// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-jThinker-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jThinker and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
};

use super::{node_label, App};
use crate::deck::{Deck, TabContent};

const FOCUS_COLOR: Color = Color::LightGreen;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const TOAST_COLOR: Color = Color::Yellow;
const UNSAVED_MARKER: &str = " *";

pub(super) fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    if app
        .toast
        .as_ref()
        .is_some_and(|toast| toast.expires_at <= Instant::now())
    {
        app.toast = None;
    }

    frame.render_widget(tab_strip(&app.deck), layout[0]);
    render_body(frame, &app.deck, layout[1]);
    frame.render_widget(Paragraph::new(footer_line(app)), layout[2]);
}

fn tab_strip(deck: &Deck) -> Tabs<'static> {
    let titles = deck
        .tabs()
        .iter()
        .map(|tab| {
            let dirty = tab.diagram().is_some_and(|pane| !pane.is_saved());
            let marker = if dirty { UNSAVED_MARKER } else { "" };
            Line::from(format!("{}{marker}", tab.title()))
        })
        .collect::<Vec<_>>();

    Tabs::new(titles)
        .select(deck.selected_index().unwrap_or_default())
        .highlight_style(Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title("Diagrams"))
}

fn render_body(frame: &mut Frame<'_>, deck: &Deck, area: Rect) {
    let selected = deck.selected_index().and_then(|idx| deck.tabs().get(idx));
    let Some(tab) = selected else {
        frame.render_widget(welcome("No open diagrams."), area);
        return;
    };

    let pane = match tab.content() {
        TabContent::Diagram(pane) => pane,
        TabContent::Placeholder => {
            frame.render_widget(welcome("Welcome to jThinker."), area);
            return;
        }
    };

    let diagram = pane.diagram();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let nodes = diagram
        .nodes()
        .iter()
        .map(|(node_id, data)| ListItem::new(format!("{node_id} {}", node_label(data))))
        .collect::<Vec<_>>();
    let nodes_title = format!(
        "{} | {} nodes | rev {}",
        pane.diagram_type().title(),
        diagram.nodes().len(),
        pane.rev()
    );
    frame.render_widget(
        List::new(nodes).block(
            Block::default()
                .borders(Borders::ALL)
                .title(nodes_title)
                .border_style(Style::default().fg(FOCUS_COLOR)),
        ),
        columns[0],
    );

    let links = diagram
        .links()
        .iter()
        .map(|(link_id, link)| {
            ListItem::new(format!("{link_id}: {} -> {}", link.from_node(), link.to_node()))
        })
        .collect::<Vec<_>>();
    frame.render_widget(
        List::new(links).block(Block::default().borders(Borders::ALL).title("Links")),
        columns[1],
    );
}

fn welcome(headline: &'static str) -> Paragraph<'static> {
    let lines = vec![
        Line::from(Span::styled(headline, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("Press n to start a new diagram or o to open one."),
    ];
    Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL))
}

fn footer_line(app: &App) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    push_footer_entry(&mut spans, "new", "n");
    push_footer_entry(&mut spans, "type", &format!("N ({})", app.next_type.slug()));
    push_footer_entry(&mut spans, "open", "o");
    push_footer_entry(&mut spans, "save", "s");
    push_footer_entry(&mut spans, "close", "w");
    push_footer_entry(&mut spans, "nodes", "a/t/b/e");
    push_footer_entry(&mut spans, "quit", "q");
    if let Some(message) = app.toast_message() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(message.to_owned(), Style::default().fg(TOAST_COLOR)));
    }
    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{label}:"),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(value.to_owned(), Style::default().fg(FOOTER_KEY_COLOR)));
}

pub(super) fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}
