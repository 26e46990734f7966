// TUI rendering: membrane potential chart (time on X, mV on Y) + status panel.

use std::io::Stdout;

use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Terminal,
};

use crate::app::App;
use crate::backend::TraceBackend;

const PALETTE: [Color; 6] = [
    Color::White,
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::Red,
];

fn bound_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| Span::raw(format!("{:.0}", v)))
        .collect()
}

/// Draws the UI each frame:
/// - Top: one line per unit, x clamped to the simulated window.
/// - Bottom: run parameters, per-unit spike statistics, controls.
pub fn draw<B: TraceBackend>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &App<B>,
) -> anyhow::Result<()> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
            .split(f.size());

        let datasets: Vec<Dataset> = app
            .series
            .iter()
            .enumerate()
            .map(|(unit, points)| {
                Dataset::default()
                    .name(format!("unit {}", unit))
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(PALETTE[unit % PALETTE.len()]))
                    .data(points)
            })
            .collect();

        let x_bounds = app.x_bounds();
        let chart = Chart::new(datasets)
            .block(Block::default().title("Membrane Potential").borders(Borders::ALL))
            .x_axis(
                Axis::default()
                    .title("Time (ms)")
                    .style(Style::default().fg(Color::Gray))
                    .bounds(x_bounds)
                    .labels(bound_labels(x_bounds)),
            )
            .y_axis(
                Axis::default()
                    .title("Membrane potential (mV)")
                    .style(Style::default().fg(Color::Gray))
                    .bounds(app.y_bounds)
                    .labels(bound_labels(app.y_bounds)),
            );
        f.render_widget(chart, chunks[0]);

        let mut status = vec![format!(
            "Units: {} | dt: {} ms | Window: [{}, {}] ms | Spikes: {} | Controls: [q] Quit",
            app.result.unit_count(),
            app.result.dt(),
            x_bounds[0],
            x_bounds[1],
            app.result.total_spikes(),
        )];
        status.extend(app.summary_lines());
        let status_widget = Paragraph::new(status.join("\n"))
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().title("Status").borders(Borders::ALL));
        f.render_widget(status_widget, chunks[1]);
    })?;
    Ok(())
}
