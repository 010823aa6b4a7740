//! Entry point for the cloudmon TUI. Parses args, resolves config and runs the MonitorApp.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use tracing::warn;

use cloudmon::api::MetricsClient;
use cloudmon::app::MonitorApp;
use cloudmon::config::{load_profiles, profiles_path, save_profiles, ConfigRequest, API_URL_ENV};
use cloudmon::logging::{init_file_logging, LOG_FILE_ENV};

#[derive(Debug, Default)]
struct ParsedArgs {
    request: ConfigRequest,
    log_file: Option<PathBuf>,
    dry_run: bool,
    help: bool,
}

fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--profile NAME|-P NAME] [--save] [--interval SECS|-i SECS] \
         [--timeout SECS|-T SECS] [--log-file PATH] [--dry-run] [http://HOST:PORT]\n\
         \n\
         The metrics service URL may also come from a saved profile or the {API_URL_ENV} environment variable."
    )
}

fn parse_secs(flag: &str, v: Option<String>) -> Result<u64, String> {
    let v = v.ok_or_else(|| format!("{flag} requires a value"))?;
    match v.parse::<u64>() {
        Ok(0) | Err(_) => Err(format!(
            "{flag} expects a positive whole number of seconds, got '{v}'"
        )),
        Ok(secs) => Ok(secs),
    }
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "cloudmon".into());
    let mut parsed = ParsedArgs::default();

    while let Some(arg) = it.next() {
        // --flag=value is accepted for every valued flag
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = || inline.clone().or_else(|| it.next());
        match flag.as_str() {
            "-h" | "--help" => parsed.help = true,
            "--profile" | "-P" => {
                parsed.request.profile = Some(value().ok_or("--profile requires a name")?);
            }
            "--interval" | "-i" => parsed.request.interval_secs = Some(parse_secs(&flag, value())?),
            "--timeout" | "-T" => parsed.request.timeout_secs = Some(parse_secs(&flag, value())?),
            "--log-file" => {
                parsed.log_file = Some(value().ok_or("--log-file requires a path")?.into());
            }
            "--save" => parsed.request.save = true,
            "--dry-run" => parsed.dry_run = true,
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option '{arg}'. {}", usage(&prog)));
            }
            _ => {
                if parsed.request.url.is_none() {
                    parsed.request.url = Some(arg);
                } else {
                    return Err(format!("Unexpected argument. {}", usage(&prog)));
                }
            }
        }
    }
    Ok(parsed)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let prog = args.first().cloned().unwrap_or_else(|| "cloudmon".into());
    let parsed = match parse_args(args) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::from(2);
        }
    };
    if parsed.help {
        println!("{}", usage(&prog));
        return ExitCode::SUCCESS;
    }

    match run(parsed).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("cloudmon: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(parsed: ParsedArgs) -> anyhow::Result<()> {
    let log_file = parsed
        .log_file
        .clone()
        .or_else(|| env::var_os(LOG_FILE_ENV).map(PathBuf::from));
    if let Some(path) = log_file {
        init_file_logging(&path)
            .with_context(|| format!("opening log file {}", path.display()))?;
    }

    // Missing URL is fatal here, before the terminal is touched
    let profiles = load_profiles();
    let resolved = parsed
        .request
        .resolve(&profiles, env::var(API_URL_ENV).ok())?;
    if let Some(updated) = resolved.save.as_ref() {
        if let Err(e) = save_profiles(updated) {
            warn!(path = %profiles_path().display(), error = %e, "could not save profile");
        }
    }

    let settings = resolved.settings;
    let client = MetricsClient::new(&settings.base_url, settings.timeout)?;

    if parsed.dry_run {
        println!("url: {}", client.base_url());
        println!("interval: {}s", settings.interval.as_secs());
        println!("timeout: {}s", settings.timeout.as_secs());
        return Ok(());
    }

    let mut app = MonitorApp::new(client, settings.interval);
    app.run().await.context("terminal error")?;
    Ok(())
}
