use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table};
use ratatui::Frame;

use crate::app::App;
use crate::widgets::{help_modal, status_bar};

/// Master render function: header block, data table, status bar.
pub fn render(frame: &mut Frame, app: &App) {
    let header_height = if app.state.error.is_some() { 8 } else { 6 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height), // header block
            Constraint::Min(0),                // data table / placeholder
            Constraint::Length(1),             // status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    status_bar::render(frame, chunks[2]);

    if app.show_help {
        help_modal::render(frame);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                "HBL Dashboard",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                "Monitor team capacity and unassigned tickets",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        updated_line(app),
        Line::from(vec![
            Span::styled("Note: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                "the unassigned ticket limit is 25% of the HBL (Healthy Backlog Limit)",
                Style::default().fg(Color::Blue),
            ),
        ]),
    ];

    if let Some(error) = &app.state.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(Span::styled(
            "Check the configured source URL in ~/.hbl-dash/config.toml",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" hbl-dash ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
    );

    frame.render_widget(header, area);
}

fn updated_line(app: &App) -> Line<'static> {
    let mut spans = Vec::new();
    if app.state.is_loading {
        spans.push(Span::styled(
            "Refreshing...  ",
            Style::default().fg(Color::Yellow),
        ));
    } else {
        spans.push(Span::styled("[r] Refresh  ", Style::default().fg(Color::Yellow)));
    }
    match &app.state.last_updated {
        Some(ts) => {
            spans.push(Span::raw("Last updated: "));
            spans.push(Span::styled(
                ts.format("%Y-%m-%d %H:%M:%S").to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        }
        None => spans.push(Span::styled(
            "Not yet loaded",
            Style::default().fg(Color::DarkGray),
        )),
    }
    Line::from(spans)
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    if !app.state.rows.is_empty() {
        render_table(frame, app, area);
    } else if app.state.is_loading {
        render_placeholder(frame, area, "Loading data...", Color::Yellow);
    } else if app.state.error.is_none() {
        render_placeholder(
            frame,
            area,
            "No Data Available. Press r to load the latest data.",
            Color::DarkGray,
        );
    } else {
        // Error with nothing loaded yet: bare frame, the banner says the rest.
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .title(" Healthy Backlog Limits "),
            area,
        );
    }
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = TableRow::new(vec![
        Cell::from("Subgroup"),
        Cell::from("Team"),
        Cell::from(right_aligned("HBL")),
        Cell::from(right_aligned("Unassigned")),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<TableRow> = app
        .state
        .rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let row = TableRow::new(vec![
                Cell::from(r.subgroup.as_str()),
                Cell::from(r.team.as_str()),
                Cell::from(right_aligned(r.hbl.to_string())),
                Cell::from(right_aligned(r.unassigned.to_string())),
            ]);
            if i == app.selected_index {
                row.style(Style::default().bg(Color::DarkGray))
            } else {
                row
            }
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Min(24),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default().borders(Borders::ALL).title(format!(
            " Healthy Backlog Limits ({} teams) ",
            app.state.rows.len()
        )),
    );

    frame.render_widget(table, area);
}

fn right_aligned<'a>(content: impl Into<String>) -> Text<'a> {
    Text::from(content.into()).alignment(Alignment::Right)
}

fn render_placeholder(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(color),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Healthy Backlog Limits "),
    );
    frame.render_widget(paragraph, area);
}
