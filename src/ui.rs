use crate::app::AppState;
use crate::classifier::Severity;
use crate::metrics::Snapshot;
use crossbeam_channel::TryRecvError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

/// Terminal event loop: drains the line channel, folds each line into the
/// app state, and redraws. Pure consumer of snapshots — nothing here writes
/// back into the aggregate.
pub fn run_ui(
    mut app: AppState,
    line_rx: crossbeam_channel::Receiver<String>,
    refresh_hz: u16,
) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut should_quit = false;
    let mut stream_ended = false;
    let mut last_tick = Instant::now();

    while !should_quit {
        loop {
            match line_rx.try_recv() {
                Ok(line) => {
                    app.apply_line(&line);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    stream_ended = true;
                    break;
                }
            }
        }

        terminal.draw(|frame| draw_main(frame, frame.area(), &app, stream_ended))?;

        let tick_rate = Duration::from_secs_f64(1.0 / refresh_hz as f64);
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if is_quit_key(key) {
                    should_quit = true;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    cleanup_terminal(&mut terminal)?;
    Ok(())
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn is_quit_key(key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }
    key.code == KeyCode::Char('q')
}

fn draw_main(frame: &mut ratatui::Frame, area: Rect, app: &AppState, stream_ended: bool) {
    let snapshot = match app.snapshot.as_ref() {
        Some(snapshot) => snapshot,
        None => {
            let title = format!("pingpulse [{}]", app.format());
            let waiting = Paragraph::new("Waiting for ping output on stdin...")
                .block(Block::default().title(title).borders(Borders::ALL));
            frame.render_widget(waiting, area);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    draw_summary(frame, chunks[0], app, snapshot, stream_ended);
    draw_chart(frame, chunks[1], app, snapshot);
    draw_status(frame, chunks[2], snapshot);
    draw_last_latency(frame, chunks[3], snapshot);
}

fn draw_summary(
    frame: &mut ratatui::Frame,
    area: Rect,
    app: &AppState,
    snapshot: &Snapshot,
    stream_ended: bool,
) {
    let mean = snapshot
        .mean_latency_ms
        .map(|v| format!("{v:.1} ms"))
        .unwrap_or_else(|| "-".to_string());
    let range = match (snapshot.graph_min, snapshot.graph_max) {
        (Some(min), Some(max)) => format!("{min:.0} to {max:.0} ms"),
        _ => "-".to_string(),
    };
    let jitter = snapshot
        .jitter_ms
        .map(|v| format!("{v:.1} ms"))
        .unwrap_or_else(|| "-".to_string());

    let mut title = format!("pingpulse [{}]", app.format());
    if stream_ended {
        title.push_str(" [stream ended]");
    }
    let summary = Paragraph::new(format!("{mean} ({range}) jitter {jitter}"))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(summary, area);
}

fn draw_chart(frame: &mut ratatui::Frame, area: Rect, app: &AppState, snapshot: &Snapshot) {
    let points: Vec<(f64, f64)> = snapshot
        .graph
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();

    let dataset = Dataset::default()
        .name("latency")
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title("latency (ms)").borders(Borders::ALL))
        .x_axis(Axis::default().bounds([0.0, app.config.graph_max.saturating_sub(1) as f64]))
        .y_axis(
            Axis::default()
                .bounds([0.0, app.config.max_graph_value])
                .labels(vec![
                    "0".to_string(),
                    format!("{:.0}", app.config.max_graph_value / 2.0),
                    format!("{:.0}", app.config.max_graph_value),
                ]),
        );
    frame.render_widget(chart, area);
}

fn draw_status(frame: &mut ratatui::Frame, area: Rect, snapshot: &Snapshot) {
    let badge = if snapshot.online {
        Span::styled("Online", Style::default().bg(Color::Green).fg(Color::White))
    } else {
        Span::styled("Offline", Style::default().bg(Color::Red).fg(Color::White))
    };
    let dns = if snapshot.reachable { "DNS ok" } else { "DNS down" };
    let detail = format!(
        " {:.1}% ({}s:{}s) {} timed out. streak {} (best {}) {}",
        snapshot.online_pct,
        snapshot.online_count,
        snapshot.offline_count,
        snapshot.timeout_count,
        snapshot.current_online_streak,
        snapshot.max_online_streak,
        dns,
    );
    let status = Paragraph::new(Line::from(vec![badge, Span::raw(detail)]))
        .block(Block::default().title("status").borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn draw_last_latency(frame: &mut ratatui::Frame, area: Rect, snapshot: &Snapshot) {
    let style = Style::default()
        .fg(severity_color(snapshot.severity))
        .add_modifier(Modifier::BOLD);
    let line = Line::from(Span::styled(
        format!("Latency: {}", snapshot.last_latency),
        style,
    ));
    let paragraph =
        Paragraph::new(line).block(Block::default().title("last event").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Ok => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}
