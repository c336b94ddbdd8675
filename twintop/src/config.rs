//! Command-line and environment configuration for the viewer.

use std::time::Duration;

use crate::poller::DEFAULT_INTERVAL;

pub const DEFAULT_URL: &str = "http://127.0.0.1:5000";
pub const URL_ENV: &str = "TWINTOP_URL";
pub const LOG_FILE_ENV: &str = "TWINTOP_LOG_FILE";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub url: String,
    pub interval: Duration,
    pub auto_rotate: bool,
    pub dry_run: bool,
}

fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--interval-ms MS|-i MS] [--no-rotate] [--dry-run] [http://HOST:PORT]\n\
         Keys: arrows orbit, +/- zoom, r reset view, space pause animation, a auto-rotate, q quit"
    )
}

/// Parse `args` (program name first). `env_url` is the value of `TWINTOP_URL`,
/// used when no positional URL is given. `Err` carries the text to print,
/// which is the usage for `--help`.
pub fn parse_args<I: IntoIterator<Item = String>>(
    args: I,
    env_url: Option<String>,
) -> Result<Config, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "twintop".into());
    let mut url: Option<String> = None;
    let mut interval = DEFAULT_INTERVAL;
    let mut auto_rotate = true;
    let mut dry_run = false;

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(usage(&prog)),
            "--interval-ms" | "-i" => {
                interval = parse_interval(it.next().as_deref(), &prog)?;
            }
            "--no-rotate" => auto_rotate = false,
            "--dry-run" => dry_run = true,
            _ if arg.starts_with("--interval-ms=") => {
                let v = arg.split_once('=').map(|(_, v)| v);
                interval = parse_interval(v, &prog)?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option {arg}. {}", usage(&prog)));
            }
            _ => {
                if url.is_none() {
                    url = Some(arg);
                } else {
                    return Err(format!("Unexpected argument. {}", usage(&prog)));
                }
            }
        }
    }

    let url = url
        .or(env_url.filter(|u| !u.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_URL.to_string());
    Ok(Config {
        url,
        interval,
        auto_rotate,
        dry_run,
    })
}

fn parse_interval(v: Option<&str>, prog: &str) -> Result<Duration, String> {
    match v.and_then(|s| s.parse::<u64>().ok()) {
        Some(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(format!("--interval-ms expects a positive number. {}", usage(prog))),
    }
}
