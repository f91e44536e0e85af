//! FastBox entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::{EditController, FsGateway, Prompt};
use core_config::Config;
use core_input::{KeyDecoder, StdinSource};
use core_render::prompt_row;
use core_state::EditorState;
use core_terminal::{CrosstermBackend, RawSession, TerminalBackend, prompt_line};
use crossterm::{cursor::MoveTo, queue};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;

const WINDOW_TITLE: &str = "FastBox Text Editor";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "fastbox", version, about = "FastBox text editor")]
struct Args {
    /// Optional file to load at startup. Without it the editor starts on one empty line.
    pub path: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `fastbox.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Log file path (overrides `[log] file` from the configuration).
    #[arg(long = "log")]
    pub log: Option<PathBuf>,
}

/// File names are typed on the row below the document with the terminal's
/// own line editing.
struct ConsolePrompt;

impl Prompt for ConsolePrompt {
    fn ask(&mut self, label: &str, row: u16) -> Result<Option<String>> {
        let mut input = io::stdin().lock();
        let mut out = io::stdout().lock();
        prompt_line(&mut input, &mut out, label, row)
    }
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    /// Log file is truncated on every start.
    fn configure_logging(&mut self, log_path: &Path) -> Result<()> {
        let log_dir = match log_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let file_name = log_path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("fastbox.log"));
        let full = log_dir.join(&file_name);
        if full.exists() {
            let _ = std::fs::remove_file(&full);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, file_name);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        // RUST_LOG refines the filter; without it warnings and startup info still land.
        let filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();
        match tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // A subscriber is already installed; dropping the guard stops the writer.
            }
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                // Leave raw mode first so the report is readable.
                let _ = crossterm::terminal::disable_raw_mode();
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }

    /// Config, then logging, then the config report, so load problems are
    /// written to the log the config chose.
    fn bootstrap(&mut self, args: &Args) -> Result<Config> {
        let config = core_config::load_from(args.config.clone())?;
        let log_path = args
            .log
            .clone()
            .unwrap_or_else(|| config.file.log.file.clone());
        self.configure_logging(&log_path)?;
        Self::install_panic_hook();
        info!(
            target: "runtime",
            config_override = args.config.is_some(),
            log_override = args.log.is_some(),
            "startup"
        );
        config.report();
        Ok(config)
    }

    fn run(&mut self, args: Args) -> Result<()> {
        let config = self.bootstrap(&args)?;

        CrosstermBackend::ensure_tty()?;
        if config.file.terminal.set_title {
            self.backend.set_title(WINDOW_TITLE)?;
        }
        let session = RawSession::begin(&mut self.backend)?;

        let mut controller = EditController::new(EditorState::new(), FsGateway, ConsolePrompt);
        if let Some(path) = args.path.as_deref() {
            let opened = controller.open(path);
            info!(target: "runtime.startup", opened, "initial_file");
        }

        let mut decoder =
            KeyDecoder::with_escape_timeout(StdinSource::new(), config.escape_timeout());
        let mut out = io::stdout();
        let stats = controller.run(&mut decoder, &mut out)?;

        // Park the shell prompt under the last drawn row.
        queue!(out, MoveTo(0, prompt_row(controller.state())))?;
        out.write_all(b"\r\n")?;
        out.flush()?;

        session.end()?;
        info!(target: "runtime", keys = stats.keys, frames = stats.frames, "shutdown");
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.run(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn no_arguments_starts_blank() {
        let args = Args::try_parse_from(["fastbox"]).unwrap();
        assert!(args.path.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn path_and_config_are_parsed() {
        let args =
            Args::try_parse_from(["fastbox", "notes.txt", "--config", "alt.toml"]).unwrap();
        assert_eq!(args.path.as_deref(), Some(Path::new("notes.txt")));
        assert_eq!(args.config.as_deref(), Some(Path::new("alt.toml")));
    }

    #[test]
    fn log_override_is_parsed() {
        let args = Args::try_parse_from(["fastbox", "--log", "/tmp/fb.log"]).unwrap();
        assert_eq!(args.log.as_deref(), Some(Path::new("/tmp/fb.log")));
    }

    #[test]
    fn malformed_config_warning_reaches_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("fastbox.toml");
        std::fs::write(&config, "[input\nescape_timeout_ms = ").unwrap();
        let log = dir.path().join("session.log");
        let args = Args::try_parse_from([
            OsString::from("fastbox"),
            OsString::from("--config"),
            config.into_os_string(),
            OsString::from("--log"),
            log.clone().into_os_string(),
        ])
        .unwrap();

        let mut startup = AppStartup::new();
        let cfg = startup.bootstrap(&args).unwrap();
        assert!(cfg.parse_error.is_some());
        assert_eq!(cfg.file.input.escape_timeout_ms, 10);

        // Dropping the worker guard flushes the non-blocking writer.
        drop(startup.log_guard.take());
        let text = std::fs::read_to_string(&log).unwrap();
        assert!(text.contains("config_parse_failed"), "{text}");
        assert!(text.find("startup") < text.find("config_parse_failed"));
    }

    #[test]
    fn extra_positional_is_rejected() {
        assert!(Args::try_parse_from(["fastbox", "a.txt", "b.txt"]).is_err());
    }

    #[test]
    fn console_prompt_is_a_prompt() {
        fn assert_prompt<P: Prompt>() {}
        assert_prompt::<ConsolePrompt>();
    }
}
