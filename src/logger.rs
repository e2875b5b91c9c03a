use chrono::Local;
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::{LazyLock, OnceLock};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, format::FmtSpan, time::FormatTime},
    layer::SubscriberExt,
    reload,
    util::SubscriberInitExt,
};

/// Default log file used by `--log` when `--log-file` is not given
pub const DEFAULT_LOG_FILE: &str = "twin-track-debug.log";

const OWN_TARGET: &str = "twin_track";
const NOISY_TARGETS: [&str; 6] = ["reqwest", "hyper", "h2", "rustls", "want", "mio"];

static LOGGING_ENABLED: LazyLock<Mutex<bool>> = LazyLock::new(|| Mutex::new(false));
static LOG_FILE: LazyLock<Mutex<Option<std::fs::File>>> = LazyLock::new(|| Mutex::new(None));
static VERBOSE_LOGGING: LazyLock<Mutex<bool>> = LazyLock::new(|| Mutex::new(false));
static FILTER_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

/// Sends formatted records to the log file while logging is enabled
#[derive(Clone)]
struct FileWriter;

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if *LOGGING_ENABLED.lock()
            && let Some(file) = LOG_FILE.lock().as_mut()
        {
            let _ = file.write_all(buf);
            let _ = file.flush();
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(file) = LOG_FILE.lock().as_mut() {
            let _ = file.flush();
        }
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for FileWriter {
    type Writer = FileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        FileWriter
    }
}

/// Local wall-clock timestamps with milliseconds
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Filter directives: our own debug records, warnings from everyone else,
/// and HTTP client chatter only when verbose
pub fn filter_directives(verbose: bool) -> String {
    let mut directives = format!("{OWN_TARGET}=debug");
    if verbose {
        for target in NOISY_TARGETS {
            directives.push_str(&format!(",{target}=debug"));
        }
    }
    directives.push_str(",warn");
    directives
}

/// `RUST_LOG` wins when set; otherwise the built-in directives
fn build_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(verbose)))
}

/// Initialize logging: one tracing subscriber that also receives `log` records
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    use std::sync::Once;
    static INIT: Once = Once::new();
    static INIT_RESULT: OnceLock<Result<(), String>> = OnceLock::new();

    INIT.call_once(|| {
        if std::env::var("TWIN_TRACK_VERBOSE").is_ok() {
            *VERBOSE_LOGGING.lock() = true;
        }

        let (filter_layer, handle) = reload::Layer::new(build_filter(*VERBOSE_LOGGING.lock()));

        let fmt_layer = fmt::Layer::new()
            .with_target(true)
            .with_level(true)
            .with_ansi(false)
            .with_timer(LocalTimer)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(FileWriter);

        // try_init also installs the `log` bridge, so log_* macros land here too
        let result = Registry::default()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init()
            .map(|()| {
                let _ = FILTER_HANDLE.set(handle);
            })
            .map_err(|e| format!("Failed to initialize logging: {e}"));

        let _ = INIT_RESULT.set(result);
    });

    match INIT_RESULT.get() {
        Some(Ok(())) => Ok(()),
        Some(Err(e)) => Err(e.clone().into()),
        None => Err("Initialization failed unexpectedly".into()),
    }
}

pub fn enable_logging() {
    *LOGGING_ENABLED.lock() = true;
}

pub fn disable_logging() {
    *LOGGING_ENABLED.lock() = false;
}

/// Let HTTP client logs through (or filter them again)
pub fn set_verbose_logging(enabled: bool) {
    *VERBOSE_LOGGING.lock() = enabled;

    if let Some(handle) = FILTER_HANDLE.get()
        && let Err(e) = handle.reload(build_filter(enabled))
    {
        log::warn!("Could not update log filter: {e}");
    }
}

pub fn is_verbose_logging() -> bool {
    *VERBOSE_LOGGING.lock()
}

pub fn set_log_file(file_path: &str) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;

    *LOG_FILE.lock() = Some(file);
    Ok(())
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}
