use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use clap::Parser;
use dterm::{Console, ConsoleConfig, FileStorage, Surface};
use tracing_subscriber::EnvFilter;
use web_time::Instant;

use crate::error::{CliError, Result};
use crate::loader::HttpLoader;
use crate::session::Session;

#[derive(Debug, Parser)]
#[command(
    name = "dterm",
    about = "Dashboard command terminal in line mode: one command per stdin line",
    version
)]
pub struct Cli {
    /// Config file (TOML, or JSON when the extension is `.json`).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Dashboard state file. Overrides `persistence.path`.
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 800.0)]
    pub width: f32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 600.0)]
    pub height: f32,

    /// Tracing filter directive (e.g. `debug`, `dterm.dispatch=trace`).
    /// Overrides `RUST_LOG`; the default is `info`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Start empty when there is no saved state.
    #[arg(long)]
    pub no_seed: bool,

    /// Print the visible panel after each command.
    #[arg(long)]
    pub frame: bool,

    /// Run these lines in order instead of reading stdin.
    #[arg(short = 'e', long = "exec", value_name = "LINE")]
    pub exec: Vec<String>,

    #[arg(long = "tick-ms", default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;
    run(cli)
}

/// Install the stderr subscriber. Call once per process.
pub fn init_tracing(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|err| CliError::invalid(format!("--log-level {directive}: {err}")))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let timeout = config.loader_timeout();
    let console = build_console(&cli, config)?;
    let stdout = std::io::stdout();
    let mut session = Session::new(console, stdout.lock(), cli.frame);

    if cli.exec.is_empty() {
        let stdin = BufReader::new(std::io::stdin());
        read_loop(&mut session, stdin, Duration::from_millis(cli.tick_ms))?;
    } else {
        for line in &cli.exec {
            if !session.submit(line)? {
                break;
            }
        }
    }
    session.finish(timeout)
}

/// Config from `--config` (or defaults), validated.
pub fn load_config(cli: &Cli) -> Result<ConsoleConfig> {
    if !(cli.width > 0.0 && cli.height > 0.0) {
        return Err(CliError::invalid(format!(
            "surface must be positive, got {}x{}",
            cli.width, cli.height
        )));
    }
    let config = match &cli.config {
        Some(path) => ConsoleConfig::from_file(path)?,
        None => ConsoleConfig::default(),
    };
    Ok(config.validated()?)
}

pub fn build_console(cli: &Cli, mut config: ConsoleConfig) -> Result<Console> {
    if cli.no_seed {
        config.widgets.seed_defaults = false;
    }
    if let Some(path) = &cli.state {
        config.persistence.path = Some(path.clone());
    }
    let loader = HttpLoader::new(config.loader_timeout())?;
    let mut builder = Console::builder(dterm::default_catalog())
        .surface(Surface::new(cli.width, cli.height))
        .loader(Arc::new(loader))
        .open(true);
    if let Some(path) = config.persistence.path.clone() {
        tracing::info!(target: "dterm.cli", path = %path.display(), "state file");
        builder = builder.persistence(FileStorage::new(path));
    }
    Ok(builder.config(config).build())
}

/// Feed lines from `input` until it ends or the session exits, ticking
/// whenever no line arrives within `tick`.
pub fn read_loop<W, R>(session: &mut Session<W>, input: R, tick: Duration) -> Result<()>
where
    W: std::io::Write,
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("dterm-input".into())
        .spawn(move || {
            for line in input.lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;

    loop {
        match rx.recv_timeout(tick) {
            Ok(line) => {
                if !session.submit(&line)? {
                    return Ok(());
                }
                session.tick(Instant::now())?;
            }
            Err(RecvTimeoutError::Timeout) => session.tick(Instant::now())?,
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }
    }
}
