use crate::config::{DEFAULT_PROBE_HOST, DEFAULT_PROBE_INTERVAL, LineFormat};
use clap::Parser;
use std::time::Duration;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "pingpulse")]
#[command(about = "Real-time ping latency and connectivity monitor", long_about = None)]
pub struct CliArgs {
    /// Ping output format: unix|windows (defaults to the build platform)
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<String>,

    /// Hostname resolved by the background reachability probe
    #[arg(long, default_value = DEFAULT_PROBE_HOST)]
    probe_host: String,

    /// Reachability probe interval (ms)
    #[arg(long, default_value_t = DEFAULT_PROBE_INTERVAL.as_millis() as u64)]
    probe_interval_ms: u64,

    /// UI refresh rate (Hz)
    #[arg(long, default_value_t = 10)]
    refresh_hz: u16,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unknown line format {value:?} (expected unix or windows)")]
    UnknownFormat { value: String },
    #[error("probe interval must be greater than zero")]
    InvalidProbeInterval,
    #[error("ui refresh rate must be greater than zero (got {value})")]
    InvalidRefreshHz { value: u16 },
}

#[derive(Clone, Debug)]
pub struct AppSettings {
    pub format: LineFormat,
    pub probe_host: String,
    pub probe_interval: Duration,
    pub refresh_hz: u16,
}

pub fn load_from_cli() -> Result<AppSettings, SettingsError> {
    let args = CliArgs::parse();
    from_args(args)
}

pub fn from_args(args: CliArgs) -> Result<AppSettings, SettingsError> {
    let format = match &args.format {
        Some(value) => {
            LineFormat::parse_cli(value).ok_or_else(|| SettingsError::UnknownFormat {
                value: value.clone(),
            })?
        }
        None => LineFormat::native(),
    };

    if args.probe_interval_ms == 0 {
        return Err(SettingsError::InvalidProbeInterval);
    }
    if args.refresh_hz == 0 {
        return Err(SettingsError::InvalidRefreshHz {
            value: args.refresh_hz,
        });
    }

    Ok(AppSettings {
        format,
        probe_host: args.probe_host,
        probe_interval: Duration::from_millis(args.probe_interval_ms),
        refresh_hz: args.refresh_hz,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(format: Option<&str>, probe_interval_ms: u64, refresh_hz: u16) -> CliArgs {
        CliArgs {
            format: format.map(str::to_string),
            probe_host: DEFAULT_PROBE_HOST.to_string(),
            probe_interval_ms,
            refresh_hz,
        }
    }

    #[test]
    fn from_args_defaults_to_native_format() {
        let settings = from_args(args(None, 1000, 10)).expect("settings");
        assert_eq!(settings.format, LineFormat::native());
        assert_eq!(settings.probe_host, DEFAULT_PROBE_HOST);
        assert_eq!(settings.probe_interval, Duration::from_millis(1000));
        assert_eq!(settings.refresh_hz, 10);
    }

    #[test]
    fn from_args_accepts_explicit_format() {
        let settings = from_args(args(Some("windows"), 1000, 10)).expect("settings");
        assert_eq!(settings.format, LineFormat::Windows);
    }

    #[test]
    fn from_args_rejects_unknown_format() {
        let err = from_args(args(Some("beos"), 1000, 10)).expect_err("should error");
        match err {
            SettingsError::UnknownFormat { value } => assert_eq!(value, "beos"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn from_args_rejects_zero_probe_interval() {
        let err = from_args(args(None, 0, 10)).expect_err("should error");
        assert!(matches!(err, SettingsError::InvalidProbeInterval));
    }

    #[test]
    fn from_args_rejects_zero_refresh_hz() {
        let err = from_args(args(None, 1000, 0)).expect_err("should error");
        match err {
            SettingsError::InvalidRefreshHz { value } => assert_eq!(value, 0),
            other => panic!("unexpected error: {other}"),
        }
    }
}
