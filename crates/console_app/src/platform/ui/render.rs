use console_core::{AppViewModel, BrowserPhase, BrowserView, StatusView};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::constants::*;
use super::layout::{main_areas, modal_area};
use crate::platform::input::{Focus, InputState};

pub fn render(frame: &mut Frame, view: &AppViewModel, input: &InputState) {
    let areas = main_areas(frame.area());

    render_header(frame, areas.header, &view.status);
    render_drop_zone(frame, areas.drop_zone, view, input);
    render_destination(frame, areas.destination, view, input);
    render_status(frame, areas.status, &view.status);
    render_notice(frame, areas.notice, view, input);
    frame.render_widget(
        Paragraph::new(MAIN_HINTS).style(Style::new().fg(Color::DarkGray)),
        areas.footer,
    );

    if view.browser.visible {
        render_browser(frame, modal_area(frame.area()), &view.browser);
    }
}

fn render_header(frame: &mut Frame, area: Rect, status: &StatusView) {
    let badge = Span::styled(
        format!(" {} ", status.badge_text),
        Style::new()
            .fg(Color::Black)
            .bg(tone_color(status.badge_tone))
            .add_modifier(Modifier::BOLD),
    );
    let line = Line::from(vec![
        Span::styled(TITLE, Style::new().add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        badge,
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn field_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(border))
        .title(format!(" {title} "))
}

fn render_drop_zone(frame: &mut Frame, area: Rect, view: &AppViewModel, input: &InputState) {
    let zone = &view.drop_zone;
    let label_style = if zone.active {
        Style::new().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::new().fg(Color::Gray)
    };
    let lines = vec![
        Line::from(Span::styled(zone.label.clone(), label_style)),
        Line::from(vec![
            Span::styled("path: ", Style::new().fg(Color::DarkGray)),
            Span::raw(input.file_input.clone()),
        ]),
    ];
    let mut block = field_block("Torrent file", input.focus == Focus::File);
    if zone.drag_over {
        block = block.border_style(Style::new().fg(Color::Yellow));
    }
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_destination(frame: &mut Frame, area: Rect, view: &AppViewModel, input: &InputState) {
    let block = field_block("Destination", input.focus == Focus::Destination);
    frame.render_widget(
        Paragraph::new(view.destination.clone()).block(block),
        area,
    );
}

/// Gauge fill is clamped to the widget; the label shows the engine's value.
fn gauge_ratio(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    (percent / 100.0).clamp(0.0, 1.0)
}

fn render_status(frame: &mut Frame, area: Rect, status: &StatusView) {
    let block = field_block("Transfer", false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [message_area, gauge_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);
    frame.render_widget(Paragraph::new(status.message.clone()), message_area);

    let gauge = Gauge::default()
        .gauge_style(Style::new().fg(tone_color(status.bar_tone)))
        .ratio(gauge_ratio(status.percent))
        .label(format!("{} ({})", status.percent_text, status.bar_width));
    frame.render_widget(gauge, gauge_area);
}

fn render_notice(frame: &mut Frame, area: Rect, view: &AppViewModel, input: &InputState) {
    let mut lines = Vec::new();
    if let Some(hint) = &input.hint {
        lines.push(Line::from(Span::styled(
            hint.clone(),
            Style::new().fg(Color::Yellow),
        )));
    }
    if let Some(notice) = &view.submission.notice {
        let color = if view.submission.failed {
            Color::Red
        } else {
            Color::Green
        };
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::new().fg(color),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_browser(frame: &mut Frame, area: Rect, browser: &BrowserView) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(Color::Cyan))
        .title(MODAL_TITLE);
    if browser.fading {
        block = block
            .border_style(Style::new().fg(Color::DarkGray))
            .style(Style::new().add_modifier(Modifier::DIM));
    }
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let [path_area, list_area, state_area, hints_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("in ", Style::new().fg(Color::DarkGray)),
            Span::styled(
                browser.current_path.clone(),
                Style::new().add_modifier(Modifier::BOLD),
            ),
        ])),
        path_area,
    );

    let items: Vec<ListItem> = browser
        .rows
        .iter()
        .map(|row| ListItem::new(format!("{}/", row.name)))
        .collect();
    let list = List::new(items)
        .highlight_style(Style::new().bg(Color::Cyan).fg(Color::Black))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !browser.rows.is_empty() && !browser.fading {
        state.select(Some(browser.highlighted));
    }
    frame.render_stateful_widget(list, list_area, &mut state);

    let state_line = match (&browser.phase, &browser.error) {
        (BrowserPhase::Loading, _) => Line::from(Span::styled(
            "Loading...",
            Style::new().fg(Color::Yellow),
        )),
        (_, Some(error)) => Line::from(Span::styled(
            format!("Error: {error}"),
            Style::new().fg(Color::Red),
        )),
        _ => Line::default(),
    };
    frame.render_widget(Paragraph::new(state_line), state_area);
    frame.render_widget(
        Paragraph::new(MODAL_HINTS).style(Style::new().fg(Color::DarkGray)),
        hints_area,
    );
}
