//! UI rendering helpers for the terminal user interface.
//!
//! The whole frame is redrawn from the `App` model with `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Padding, Paragraph, Wrap},
};

use crate::app::{App, EditTarget, Field, FilterField, OptionState, PopupKind, known_zone};
use crate::components::{HeatGrid, LinePlot, Report};

/// Key bindings shown in the footer, in display order.
const CONTROLS: [(&str, &str); 11] = [
    ("[/]", "analyzer"),
    ("tab", "next field"),
    ("i", "edit/search"),
    ("space", "toggle"),
    ("h/l", "adjust"),
    ("t", "add top artists"),
    ("x", "remove artist"),
    ("a", "analyze"),
    ("j/k", "scroll"),
    ("o", "load folder"),
    ("q", "quit"),
];

/// Colors cycled through by line plot series.
const SERIES_COLORS: [Color; 10] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::LightCyan,
    Color::LightYellow,
    Color::LightMagenta,
    Color::LightGreen,
];

/// Width of one hour cell in the heat grid.
const GRID_CELL_WIDTH: usize = 4;
const SIDEBAR_WIDTH: u16 = 38;
/// Candidates listed under the artist search.
const SEARCH_HINTS: usize = 5;

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(key, action)| format!("[{key}] {action}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Top-left part of `r` no larger than `width` x `height`.
fn clamped_rect(width: u16, height: u16, r: Rect) -> Rect {
    Rect {
        x: r.x,
        y: r.y,
        width: width.min(r.width),
        height: height.min(r.height),
    }
}

fn left_padded() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the entire UI into the provided `frame` using `app` state.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_selector(frame, app, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
        .split(chunks[2]);
    draw_sidebar(frame, app, body[0]);
    draw_report(frame, app, body[1]);

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_padded()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);

    if let Some(editing) = app
        .editing
        .as_ref()
        .filter(|e| e.target == EditTarget::LoadPath)
    {
        draw_overlay(
            frame,
            chunks[2],
            " load folder (enter loads, esc cancels) ",
            format!("{}_", editing.buffer),
            Style::default(),
        );
    }

    if let Some(popup) = &app.popup {
        let (title, color) = match popup.kind {
            PopupKind::Warning => (" warning ", Color::Yellow),
            PopupKind::Error => (" error ", Color::Red),
        };
        draw_overlay(
            frame,
            chunks[2],
            title,
            popup.message.clone(),
            Style::default().fg(color),
        );
    }
}

fn draw_overlay(frame: &mut Frame, area: Rect, title: &str, text: String, style: Style) {
    let popup_area = centered_rect_sized(72, 7, area);
    frame.render_widget(Clear, popup_area);
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(title)
                .padding(left_padded()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let text = match (&app.loaded_dir, app.tracks()) {
        (Some(dir), Some(tracks)) => format!("{} • {} tracks", dir.display(), tracks.len()),
        _ => "No streaming history loaded".to_string(),
    };
    let header = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" spotify analyzer ")
            .title_alignment(Alignment::Center),
    );
    frame.render_widget(header, area);
}

fn draw_selector(frame: &mut Frame, app: &App, area: Rect) {
    let name = app
        .names
        .get(app.selected)
        .map(String::as_str)
        .unwrap_or("-");
    let line = Line::from(vec![
        Span::raw("< "),
        Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" >  ({}/{})", app.selected + 1, app.names.len())),
    ]);
    let selector = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" analyzer ")
            .padding(left_padded()),
    );
    frame.render_widget(selector, area);
}

/// Value text of `field`, showing the edit buffer when it is being edited.
fn field_value(app: &App, field: Field) -> String {
    if let Some(editing) = &app.editing {
        if editing.target == EditTarget::Field(field) {
            return format!("{}_", editing.buffer);
        }
    }
    match field {
        Field::Option(index) => app
            .options
            .get(index)
            .map(OptionState::summary)
            .unwrap_or_default(),
        Field::Filter(filter) => match app.filters.get(filter) {
            "" => "-".to_string(),
            text => text.to_string(),
        },
    }
}

fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focused();
    let mut lines: Vec<Line> = Vec::new();

    for field in app.fields() {
        if field == Field::Filter(FilterField::Start) {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                "Filters",
                Style::default().add_modifier(Modifier::UNDERLINED),
            ));
        }

        let label = match field {
            Field::Option(index) => app.options.get(index).map_or("", OptionState::label),
            Field::Filter(filter) => filter.label(),
        };
        let mut style = Style::default();
        if Some(field) == focused {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let value = field_value(app, field);
        let invalid_zone = match field {
            Field::Option(index) => matches!(
                app.options.get(index),
                Some(OptionState::TimeZone(name)) if known_zone(name).is_none()
            ),
            Field::Filter(FilterField::TimeZone) => {
                let name = app.filters.get(FilterField::TimeZone);
                !name.is_empty() && known_zone(name).is_none()
            }
            Field::Filter(_) => false,
        };
        let value_style = if invalid_zone {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{label}:"), style),
            Span::raw(" "),
            Span::styled(value, value_style),
        ]));

        if let Field::Option(index) = field {
            if let Some(OptionState::Artists(chooser)) = app.options.get(index) {
                for artist in &chooser.chosen {
                    lines.push(Line::raw(format!("  • {artist}")));
                }
                let searching = app
                    .editing
                    .as_ref()
                    .filter(|e| e.target == EditTarget::Field(field));
                if let Some(editing) = searching {
                    for candidate in chooser.candidates(&editing.buffer).iter().take(SEARCH_HINTS) {
                        lines.push(Line::styled(
                            format!("  ? {candidate}"),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                }
            }
        }
    }

    let sidebar = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" options ")
                .padding(left_padded()),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(sidebar, area);
}

fn draw_report(frame: &mut Frame, app: &App, area: Rect) {
    let (width, height) = app.component_size();
    // the component size excludes the border
    let area = clamped_rect(width.saturating_add(2), height.saturating_add(2), area);
    let title = format!(" {} ", app.component_name().unwrap_or("report"));
    let block = Block::default().borders(Borders::ALL).title(title);

    match &app.report {
        None => {
            let hint = if app.has_tracks() {
                "Press a to analyze"
            } else {
                "Press o to load a streaming history folder"
            };
            frame.render_widget(Paragraph::new(hint).block(block), area);
        }
        Some(Report::Text(text)) => {
            let paragraph = Paragraph::new(text.as_str())
                .block(block)
                .scroll((app.report_scroll, 0));
            frame.render_widget(paragraph, area);
        }
        Some(Report::Lines(plot)) => draw_line_plot(frame, plot, block, area),
        Some(Report::Grid(grid)) => {
            let paragraph = Paragraph::new(heat_grid_lines(grid)).block(block);
            frame.render_widget(paragraph, area);
        }
    }
}

fn draw_line_plot(frame: &mut Frame, plot: &LinePlot, block: Block, area: Rect) {
    let datasets: Vec<Dataset> = plot
        .series
        .iter()
        .zip(SERIES_COLORS.iter().cycle())
        .map(|(series, color)| {
            Dataset::default()
                .name(series.label.as_str())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(*color))
                .data(&series.points)
        })
        .collect();

    let [_, top] = plot.y_bounds;
    let y_labels = [
        "0".to_string(),
        format!("{:.1}", top / 2.0),
        format!("{top:.1}"),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds(plot.x_bounds)
                .labels(plot.x_labels.iter().map(String::as_str)),
        )
        .y_axis(
            Axis::default()
                .title("listens")
                .bounds(plot.y_bounds)
                .labels(y_labels),
        );
    frame.render_widget(chart, area);
}

fn heat_grid_lines(grid: &HeatGrid) -> Vec<Line<'static>> {
    let label_width = grid
        .row_labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        + 1;

    let mut lines = Vec::with_capacity(grid.values.len() + 1);
    let header: String = grid
        .column_labels
        .iter()
        .map(|label| format!("{label:>GRID_CELL_WIDTH$}"))
        .collect();
    lines.push(Line::raw(format!("{:label_width$}{header}", "")));

    for (label, row) in grid.row_labels.iter().zip(&grid.values) {
        let mut spans = vec![Span::raw(format!("{label:<label_width$}"))];
        spans.extend(row.iter().map(|&count| {
            let (r, g, b) = grid.color(count);
            Span::styled(
                " ".repeat(GRID_CELL_WIDTH),
                Style::default().bg(Color::Rgb(r, g, b)),
            )
        }));
        lines.push(Line::from(spans));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::components::ComponentRegistry;
    use ratatui::{Terminal, backend::TestBackend};

    fn grid() -> HeatGrid {
        HeatGrid {
            values: vec![vec![0, 2], vec![1, 0]],
            row_labels: vec!["Saturday".into(), "Friday".into()],
            column_labels: vec!["1am".into(), "2am".into()],
            hue: 0.0,
        }
    }

    #[test]
    fn centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect_sized(72, 7, area);
        assert_eq!(rect, Rect::new(1, 1, 38, 7));
    }

    #[test]
    fn clamped_rect_keeps_origin() {
        let area = Rect::new(5, 3, 50, 20);
        assert_eq!(clamped_rect(80, 7, area), Rect::new(5, 3, 50, 7));
    }

    #[test]
    fn heat_grid_has_header_and_one_line_per_row() {
        let lines = heat_grid_lines(&grid());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].to_string(), "          1am 2am");
        assert_eq!(lines[1].spans.len(), 3);
        assert_eq!(lines[1].spans[0].content, "Saturday ");
        assert_eq!(lines[1].spans[1].style.bg, Some(Color::Rgb(255, 255, 255)));
        assert_eq!(lines[1].spans[2].style.bg, Some(Color::Rgb(255, 1, 1)));
    }

    #[test]
    fn controls_cover_quit() {
        assert!(controls_text().ends_with("[q] quit"));
    }

    #[test]
    fn draws_without_panicking() {
        let backend = TestBackend::new(140, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = App::new(ComponentRegistry::with_builtins());
        app.show_warning("something went wrong");
        terminal.draw(|f| draw(f, &app)).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("warning"));
        assert!(text.contains("Listens per day"));
    }
}
