//! Logging utilities wrapping `tracing` initialisation
//!
//! Informational diagnostics ("found coordinates", "determined output
//! location", write failures) go to stdout, or into a [`CapturedDiagnostics`]
//! buffer when the caller wants to fold them into structured output. A log
//! file can be teed in addition through a non-blocking appender.

use crate::config::LoggingOptions;
use crate::error::{Error, Result};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::Subscriber;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

type LayeredEnvFilter = Layered<EnvFilter, Registry>;
type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// In-memory sink for diagnostic lines, shared between the subscriber and the caller.
#[derive(Debug, Clone, Default)]
pub struct CapturedDiagnostics {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedDiagnostics {
    /// Lines written so far, without trailing newlines
    pub fn lines(&self) -> Vec<String> {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.trim_end().to_string())
            .collect()
    }
}

/// Writer handed out per event by [`CapturedDiagnostics`]
pub struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedDiagnostics {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter(Arc::clone(&self.buffer))
    }
}

/// Initialise the global tracing subscriber according to the provided logging options.
///
/// Diagnostics go to stdout unless `capture` is given, in which case they are
/// buffered there without ANSI colours. Returns the file writer's guard when
/// a log file is configured; keep it alive until exit so buffered lines are
/// flushed. Calls after a subscriber is already installed are ignored.
pub fn init(
    options: &LoggingOptions,
    capture: Option<CapturedDiagnostics>,
) -> Result<Option<WorkerGuard>> {
    if tracing::dispatcher::has_been_set() {
        return Ok(None);
    }

    let env_filter = level_filter(&options.level)?;

    let (tee, guard) = match file_layer::<LayeredEnvFilter>(options)? {
        Some((layer, guard)) => (Some(layer), Some(guard)),
        None => (None, None),
    };

    let diagnostics = match capture {
        Some(capture) => diagnostics_layer(capture, false),
        None => diagnostics_layer(io::stdout, options.color),
    };

    Registry::default()
        .with(env_filter)
        .with(tee)
        .with(diagnostics)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))?;

    Ok(guard)
}

/// Parse a level/directive string such as `info` or `geoqr=debug`.
pub fn level_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| Error::Config(format!("Invalid log level '{level}': {e}")))
}

fn file_layer<S>(options: &LoggingOptions) -> Result<Option<(BoxedLayer<S>, WorkerGuard)>>
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync + 'static,
{
    let Some(path) = options.file.as_ref() else {
        return Ok(None);
    };

    let file_name = path.file_name().ok_or_else(|| {
        Error::Config(format!(
            "Log file path '{}' must include a filename",
            path.display()
        ))
    })?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::Config(format!(
            "Failed to create log directory {}: {e}",
            dir.display()
        ))
    })?;

    // One-shot runs append to a single file; no rotation.
    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(rolling::never(dir, file_name));

    let layer = fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(false)
        .with_writer(writer)
        .with_target(true)
        .boxed();

    Ok(Some((layer, guard)))
}

fn diagnostics_layer<S, W>(writer: W, color: bool) -> BoxedLayer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .without_time()
        .with_writer(writer)
        .with_ansi(color)
        .with_target(false)
        .boxed()
}
