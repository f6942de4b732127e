//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};

/// Target used for stage headers.
const STAGE_TARGET: &str = "home_sweep::stage";

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`tracing_subscriber::Layer`] that appends all events to the persistent
/// log file with timestamps and ANSI codes stripped.
///
/// Always captures events at `DEBUG` level and above regardless of the
/// console verbosity setting.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Open the log file for `command` in the cache directory.
    ///
    /// Returns `None` if no cache directory is available or the file cannot
    /// be opened.
    pub(super) fn new(command: &str) -> Option<Self> {
        Self::at(&log_file_path(command)?)
    }

    /// Truncate the log file at `path`, write a run header, and return a
    /// layer appending to it.
    pub(super) fn at(path: &Path) -> Option<Self> {
        let version = crate::cli::VERSION;
        let header = format!(
            "==========================================\n\
             home-sweep {version} {}\n\
             ==========================================\n",
            format_utc_datetime(),
        );
        fs::write(path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let level = *metadata.level();
        let target = metadata.target();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = strip_ansi(&extractor.message);
        let ts = format_utc_time();

        let line = match (level, target) {
            (tracing::Level::INFO, STAGE_TARGET) => format!("[{ts}] ==> {msg}"),
            (tracing::Level::ERROR, _) => format!("[{ts}]     [error] {msg}"),
            (tracing::Level::WARN, _) => format!("[{ts}]     [warn] {msg}"),
            (tracing::Level::DEBUG | tracing::Level::TRACE, _) => {
                format!("[{ts}]     [debug] {msg}")
            }
            _ => format!("[{ts}]     {msg}"),
        };

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// Whether console output to a stream may carry ANSI styling.
///
/// Styling needs a terminal and is turned off by a non-empty `NO_COLOR`.
fn stream_supports_ansi(is_terminal: bool, no_color: Option<&std::ffi::OsStr>) -> bool {
    is_terminal && no_color.is_none_or(std::ffi::OsStr::is_empty)
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits the console style:
/// bold stage arrows, indented info lines, coloured warnings and errors.
///
/// Info and debug lines go to stdout, warnings and errors to stderr; each
/// side is styled only when its stream accepts ANSI codes. Escapes embedded
/// in a message are stripped when its stream does not.
#[derive(Debug, Clone, Copy)]
struct ConsoleFormatter {
    stdout_ansi: bool,
    stderr_ansi: bool,
}

impl ConsoleFormatter {
    /// Inspect the process's stdout and stderr.
    fn detect() -> Self {
        use std::io::IsTerminal as _;
        let no_color = std::env::var_os("NO_COLOR");
        Self {
            stdout_ansi: stream_supports_ansi(std::io::stdout().is_terminal(), no_color.as_deref()),
            stderr_ansi: stream_supports_ansi(std::io::stderr().is_terminal(), no_color.as_deref()),
        }
    }

    /// Render one event as a console line, without the trailing newline.
    fn render(self, level: tracing::Level, target: &str, msg: &str) -> String {
        let ansi = if level <= tracing::Level::WARN {
            self.stderr_ansi
        } else {
            self.stdout_ansi
        };
        let paint = |style: &str, text: &str| {
            if ansi {
                format!("\x1b[{style}m{text}\x1b[0m")
            } else {
                text.to_string()
            }
        };
        let msg = if ansi {
            msg.to_string()
        } else {
            strip_ansi(msg)
        };

        match level {
            tracing::Level::ERROR => format!("{} {msg}", paint("31", "ERROR")),
            tracing::Level::WARN => format!("{}  {msg}", paint("33", "WARN")),
            tracing::Level::INFO if target == STAGE_TARGET => {
                format!("{} {}", paint("1;34", "==>"), paint("1", &msg))
            }
            tracing::Level::INFO => format!("  {msg}"),
            _ => format!("  {}", paint("2", &msg)),
        }
    }
}

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        writeln!(
            writer,
            "{}",
            self.render(*metadata.level(), metadata.target(), &extractor.message)
        )
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console events at `INFO` go to stdout and `WARN`/`ERROR` to stderr; debug
/// events reach the console only when `verbose` is set. A file layer writes
/// every event (including `debug`) to `$XDG_CACHE_HOME/home-sweep/<command>.log`
/// when a cache directory is available.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter::detect())
        .with_writer(make_writer)
        .with_filter(console_level);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
