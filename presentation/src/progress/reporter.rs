//! Progress reporting for a single turn

use crate::output::console::ConsoleFormatter;
use indicatif::{ProgressBar, ProgressStyle};
use socratic_application::{QueryError, TurnNotifier};
use socratic_domain::Role;
use std::io::{self, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Prints streamed chunks behind an assistant tag, one line per response.
#[derive(Default)]
struct StreamPrinter {
    streaming: AtomicBool,
}

impl StreamPrinter {
    fn chunk(&self, chunk: &str) {
        let mut stdout = io::stdout().lock();
        if !self.streaming.swap(true, Ordering::SeqCst) {
            let _ = write!(stdout, "{} ", ConsoleFormatter::role_tag(Role::Assistant));
        }
        let _ = write!(stdout, "{}", chunk);
        let _ = stdout.flush();
    }

    fn end(&self) {
        if self.streaming.swap(false, Ordering::SeqCst) {
            println!();
        }
    }

    fn error(&self, error: &QueryError) {
        eprintln!("{}", ConsoleFormatter::format_error(error));
    }
}

/// Reports turn progress with a spinner while the query is outstanding
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
    printer: StreamPrinter,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            printer: StreamPrinter::default(),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn take_spinner(&self) -> Option<ProgressBar> {
        self.spinner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnNotifier for ProgressReporter {
    fn on_query_start(&self, _input: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message("Thinking...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Some(previous) = self
            .spinner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_query_end(&self) {
        if let Some(pb) = self.take_spinner() {
            pb.finish_and_clear();
        }
    }

    fn on_chunk(&self, chunk: &str) {
        self.printer.chunk(chunk);
    }

    fn on_stream_end(&self) {
        self.printer.end();
    }

    fn on_error(&self, error: &QueryError) {
        if let Some(pb) = self.take_spinner() {
            pb.finish_and_clear();
        }
        self.printer.error(error);
    }
}

/// Simple text-based progress (no spinner)
#[derive(Default)]
pub struct SimpleProgress {
    printer: StreamPrinter,
}

impl SimpleProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TurnNotifier for SimpleProgress {
    fn on_chunk(&self, chunk: &str) {
        self.printer.chunk(chunk);
    }

    fn on_stream_end(&self) {
        self.printer.end();
    }

    fn on_error(&self, error: &QueryError) {
        self.printer.error(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_cleared_after_query() {
        let reporter = ProgressReporter::new();
        reporter.on_query_start("What is entropy?");
        assert!(reporter.spinner.lock().unwrap().is_some());

        reporter.on_query_end();
        assert!(reporter.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn test_spinner_cleared_on_error() {
        let reporter = ProgressReporter::new();
        reporter.on_query_start("What is entropy?");
        reporter.on_error(&QueryError::Remote { status_code: 500 });
        assert!(reporter.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn test_stream_printer_tracks_open_line() {
        let printer = StreamPrinter::default();
        printer.chunk("Entropy ");
        assert!(printer.streaming.load(Ordering::SeqCst));

        printer.end();
        assert!(!printer.streaming.load(Ordering::SeqCst));
    }
}
