//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for the instrument (fiber count, patrol
//! area, focal-plane area) plus a sweep range and a probe density, then renders
//! the assigned fraction and fiber usage curves over the sweep.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::{run_estimate, run_sweep, EstimateRun, SweepRun};
use crate::domain::{InstrumentConfig, SweepConfig, SweepScale};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::SweepPlottersChart;

const SWEEP_STEPS: usize = 121;
const FIELD_COUNT: usize = 5;

/// Start the TUI.
pub fn run(instrument: InstrumentConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(instrument);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    initial: InstrumentConfig,
    instrument: InstrumentConfig,
    max_density: f64,
    probe_density: f64,
    selected_field: usize,
    status: String,
    sweep: Option<SweepRun>,
    probe: Option<EstimateRun>,
}

impl App {
    fn new(instrument: InstrumentConfig) -> Self {
        let mut app = Self {
            initial: instrument,
            instrument,
            max_density: 4000.0,
            probe_density: 2000.0,
            selected_field: 0,
            status: String::new(),
            sweep: None,
            probe: None,
        };
        app.recompute();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < FIELD_COUNT {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char('r') => {
                self.instrument = self.initial;
                self.recompute();
                self.status = "Reset instrument.".to_string();
            }
            _ => {}
        }
        false
    }

    fn adjust_field(&mut self, delta: i32) {
        let up = delta >= 0;
        match self.selected_field {
            0 => {
                let step = 500.0;
                let next = if up { self.instrument.fiber_count + step } else { self.instrument.fiber_count - step };
                self.instrument.fiber_count = next.max(0.0);
                self.status = format!("fibers: {:.0}", self.instrument.fiber_count);
            }
            1 => {
                let factor = if up { 1.1 } else { 1.0 / 1.1 };
                self.instrument.fiber_patrol_area *= factor;
                self.status = format!("patrol area: {:.6} deg²", self.instrument.fiber_patrol_area);
            }
            2 => {
                let next = self.instrument.focal_plane_area + if up { 0.25 } else { -0.25 };
                self.instrument.focal_plane_area = next.max(0.25);
                self.status = format!("focal plane: {:.2} deg²", self.instrument.focal_plane_area);
            }
            3 => {
                let next = self.max_density + if up { 500.0 } else { -500.0 };
                self.max_density = next.max(500.0);
                self.status = format!("sweep max density: {:.0}", self.max_density);
            }
            4 => {
                let next = self.probe_density + if up { 100.0 } else { -100.0 };
                self.probe_density = next.max(0.0);
                self.status = format!("probe density: {:.0}", self.probe_density);
            }
            _ => {}
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        let config = SweepConfig {
            min_density: 0.0,
            max_density: self.max_density,
            steps: SWEEP_STEPS,
            scale: SweepScale::Linear,
        };
        match run_sweep(self.instrument, config) {
            Ok(run) => self.sweep = Some(run),
            Err(err) => {
                self.sweep = None;
                self.status = format!("Sweep failed: {err}");
            }
        }
        match run_estimate(self.instrument, self.probe_density) {
            Ok(run) => self.probe = Some(run),
            Err(err) => {
                self.probe = None;
                self.status = format!("Estimate failed: {err}");
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("faprob", Style::default().fg(Color::Cyan)),
            Span::raw(" - fiber assignment explorer"),
        ]));

        let probe = match &self.probe {
            Some(run) => format!(
                "density {:.0}: targets={} assigned={} fraction={}",
                run.density,
                run.result.total_targets,
                run.result.assigned_fibers,
                run.result
                    .assigned_fraction()
                    .map(|f| format!("{f:.4}"))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            None => "-".to_string(),
        };
        lines.push(Line::from(Span::styled(probe, Style::default().fg(Color::Gray))));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(7)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Assigned fraction (cyan) / fiber usage (green)")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(sweep) = &self.sweep else {
            let msg = Paragraph::new("No sweep available.").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let series = chart_series(sweep, self.probe.as_ref());
        let widget = SweepPlottersChart {
            fraction: &series.fraction,
            usage: &series.usage,
            probe: &series.probe,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: "density (per deg²)",
            y_label: "fraction",
        };
        frame.render_widget(widget, inner);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items = vec![
            ListItem::new(format!("Fibers: {:.0}", self.instrument.fiber_count)),
            ListItem::new(format!("Patrol area: {:.6} deg²", self.instrument.fiber_patrol_area)),
            ListItem::new(format!("Focal plane: {:.2} deg²", self.instrument.focal_plane_area)),
            ListItem::new(format!("Sweep max density: {:.0}", self.max_density)),
            ListItem::new(format!("Probe density: {:.0}", self.probe_density)),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  r reset  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Chart-ready series for one sweep.
#[derive(Debug, Clone, PartialEq)]
struct ChartSeries {
    fraction: Vec<(f64, f64)>,
    usage: Vec<(f64, f64)>,
    probe: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

fn chart_series(sweep: &SweepRun, probe: Option<&EstimateRun>) -> ChartSeries {
    let fraction: Vec<(f64, f64)> = sweep
        .points
        .iter()
        .filter(|p| p.total_targets > 0)
        .map(|p| (p.density, p.assigned_fraction))
        .collect();
    let usage = sweep.points.iter().map(|p| (p.density, p.fiber_usage)).collect();

    let x_bounds = [sweep.config.min_density, sweep.config.max_density];
    let probe = probe
        .filter(|run| run.density >= x_bounds[0] && run.density <= x_bounds[1])
        .and_then(|run| run.result.assigned_fraction().map(|f| (run.density, f)))
        .into_iter()
        .collect();

    ChartSeries {
        fraction,
        usage,
        probe,
        x_bounds,
        y_bounds: [0.0, 1.05],
    }
}
