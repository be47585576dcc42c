//! Tracing subscriber setup for the vmpooler CLI.
//!
//! Logs never go to stdout: the console writer is stderr, so command output
//! stays machine-readable.

use std::{
    env,
    io::{self, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::MakeWriter, prelude::*, registry, EnvFilter};

// --- Custom "Tee" Writer ---
struct Tee<A, B> {
    a: A,
    b: B,
}

impl<A, B> Write for Tee<A, B>
where
    A: Write,
    B: Write,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let res_a = self.a.write(buf);
        let res_b = self.b.write(buf);
        res_a.or(res_b)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.a.flush()?;
        self.b.flush()
    }
}

#[derive(Clone)]
struct MakeTee<A, B> {
    make_a: A,
    make_b: B,
}

impl<'a, A, B, W1, W2> MakeWriter<'a> for MakeTee<A, B>
where
    A: MakeWriter<'a, Writer = W1>,
    B: MakeWriter<'a, Writer = W2>,
    W1: Write + 'a,
    W2: Write + 'a,
{
    type Writer = Tee<W1, W2>;
    fn make_writer(&'a self) -> Self::Writer {
        Tee {
            a: self.make_a.make_writer(),
            b: self.make_b.make_writer(),
        }
    }
}

/// Where log records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Console,
    File,
    Both,
    None,
}

impl LogOutput {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => LogOutput::File,
            "both" => LogOutput::Both,
            "none" | "off" => LogOutput::None,
            _ => LogOutput::Console,
        }
    }
}

/// Logging configuration, normally read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub output: LogOutput,
    pub json: bool,
    pub file_path: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            output: LogOutput::Console,
            json: false,
            file_path: env::temp_dir().join("vmpooler.log"),
        }
    }
}

impl LogSettings {
    /// Read `VMPOOLER_LOG_LEVEL`, `VMPOOLER_LOG_OUTPUT`, `VMPOOLER_LOG_FORMAT`
    /// and `VMPOOLER_LOG_FILE`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            level: lookup("VMPOOLER_LOG_LEVEL").unwrap_or(defaults.level),
            output: lookup("VMPOOLER_LOG_OUTPUT")
                .map(|v| LogOutput::parse(&v))
                .unwrap_or(defaults.output),
            json: lookup("VMPOOLER_LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
            file_path: lookup("VMPOOLER_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.file_path),
        }
    }

    /// `--debug` on the command line wins over the environment.
    pub fn with_debug(mut self, debug: bool) -> Self {
        if debug {
            self.level = "debug".to_string();
        }
        self
    }
}

/// The subscriber could not be installed.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct InitError(String);

/// Initializes the global tracing subscriber.
///
/// The returned guard must be held until exit when file output is enabled,
/// otherwise buffered records are lost.
pub fn init_subscriber(settings: &LogSettings) -> Result<Option<WorkerGuard>, InitError> {
    let env_filter = EnvFilter::try_new(&settings.level)
        .map_err(|e| InitError(format!("invalid log level '{}': {e}", settings.level)))?
        .add_directive(directive("hyper=warn")?)
        .add_directive(directive("reqwest=warn")?)
        .add_directive(directive("rustls=warn")?);

    let subscriber = registry().with(env_filter);

    let log_path = Path::new(&settings.file_path);
    let log_dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let log_filename = log_path.file_name().unwrap_or("vmpooler.log".as_ref());

    let mut guard: Option<WorkerGuard> = None;

    let result = match settings.output {
        LogOutput::Both => {
            let file_appender = tracing_appender::rolling::daily(log_dir, log_filename);
            let (non_blocking, worker) = tracing_appender::non_blocking(file_appender);
            guard = Some(worker);

            let tee_writer = MakeTee {
                make_a: io::stderr,
                make_b: non_blocking,
            };

            let fmt_layer = tracing_subscriber::fmt::layer().with_writer(tee_writer);
            if settings.json {
                subscriber.with(fmt_layer.json()).try_init()
            } else {
                subscriber.with(fmt_layer.compact()).try_init()
            }
        }
        LogOutput::Console => {
            let fmt_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);
            if settings.json {
                subscriber.with(fmt_layer.json()).try_init()
            } else {
                subscriber.with(fmt_layer.compact()).try_init()
            }
        }
        LogOutput::File => {
            let file_appender = tracing_appender::rolling::daily(log_dir, log_filename);
            let (non_blocking, worker) = tracing_appender::non_blocking(file_appender);
            guard = Some(worker);

            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false);
            if settings.json {
                subscriber.with(fmt_layer.json()).try_init()
            } else {
                subscriber.with(fmt_layer).try_init()
            }
        }
        LogOutput::None => subscriber.try_init(),
    };

    result.map_err(|e| InitError(e.to_string()))?;
    Ok(guard)
}

fn directive(text: &str) -> Result<tracing_subscriber::filter::Directive, InitError> {
    text.parse()
        .map_err(|e| InitError(format!("invalid log directive '{text}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> LogSettings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LogSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_environment_empty() {
        assert_eq!(settings_from(&[]), LogSettings::default());
    }

    #[test]
    fn test_reads_environment() {
        let settings = settings_from(&[
            ("VMPOOLER_LOG_LEVEL", "info"),
            ("VMPOOLER_LOG_OUTPUT", "both"),
            ("VMPOOLER_LOG_FORMAT", "JSON"),
            ("VMPOOLER_LOG_FILE", "/var/log/vmpooler.log"),
        ]);
        assert_eq!(settings.level, "info");
        assert_eq!(settings.output, LogOutput::Both);
        assert!(settings.json);
        assert_eq!(settings.file_path, PathBuf::from("/var/log/vmpooler.log"));
    }

    #[test]
    fn test_unknown_output_falls_back_to_console() {
        assert_eq!(LogOutput::parse("syslog"), LogOutput::Console);
        assert_eq!(LogOutput::parse("OFF"), LogOutput::None);
    }

    #[test]
    fn test_invalid_level_is_reported() {
        let settings = LogSettings {
            level: "vmpooler=loud".to_string(),
            output: LogOutput::None,
            ..LogSettings::default()
        };
        let err = init_subscriber(&settings).unwrap_err();
        assert!(err.to_string().starts_with("invalid log level 'vmpooler=loud'"));
    }

    #[test]
    fn test_debug_flag_overrides_level() {
        let settings = settings_from(&[("VMPOOLER_LOG_LEVEL", "error")]).with_debug(true);
        assert_eq!(settings.level, "debug");
        let settings = settings_from(&[("VMPOOLER_LOG_LEVEL", "error")]).with_debug(false);
        assert_eq!(settings.level, "error");
    }
}
