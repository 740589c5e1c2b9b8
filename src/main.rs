use pingpulse::app::AppState;
use pingpulse::config::MonitorConfig;
use pingpulse::runtime::{spawn_resolver, spawn_stdin_reader};
use pingpulse::settings::load_from_cli;
use pingpulse::ui::run_ui;

fn main() -> std::io::Result<()> {
    let settings = load_from_cli()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string()))?;

    let mut resolver = spawn_resolver(settings.probe_host.clone(), settings.probe_interval);
    let app = AppState::new(MonitorConfig::default(), settings.format, resolver.flag());

    let (line_tx, line_rx) = crossbeam_channel::unbounded();
    // Detached on purpose: the reader blocks in stdin reads and only ends
    // with the process.
    let _reader = spawn_stdin_reader(line_tx);

    let result = run_ui(app, line_rx, settings.refresh_hz);
    resolver.stop();
    result
}
