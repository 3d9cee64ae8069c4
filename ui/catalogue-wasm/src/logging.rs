//! `tracing` output for the browser.
//!
//! The fmt subscriber formats each event into a buffer; the buffer is sent
//! to the devtools console when the writer is dropped, using the console
//! method that matches the event level.

use std::io::{self, Write};
use tracing::{Level, Metadata};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf).trim_end().to_owned();
        if self.level == Level::ERROR {
            gloo_console::error!(line);
        } else if self.level == Level::WARN {
            gloo_console::warn!(line);
        } else if self.level == Level::INFO {
            gloo_console::info!(line);
        } else {
            gloo_console::debug!(line);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

/// Install the global subscriber. `directives` uses `EnvFilter` syntax; an
/// unparsable value falls back to `info`.
pub fn init(directives: &str) {
    let (filter, rejected) = match EnvFilter::try_new(directives) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new("info"), Some(err)),
    };

    // No clock in wasm32-unknown-unknown; the console timestamps lines itself.
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(MakeConsoleWriter)
        .without_time()
        .with_ansi(false)
        .try_init();
    if let Err(err) = installed {
        gloo_console::warn!(format!("tracing already initialised: {err}"));
    }

    if let Some(err) = rejected {
        tracing::warn!(%directives, error = %err, "invalid log filter, using info");
    }
}
