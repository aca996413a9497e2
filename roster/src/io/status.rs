//! User-visible status reporting.

use tracing::warn;

/// Receives the message of every failed load, once per failure.
pub trait StatusReporter {
    fn show_error_message(&self, text: &str);
}

/// Reports failures through `tracing` at `warn` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl StatusReporter for LogReporter {
    fn show_error_message(&self, text: &str) {
        warn!(error = text, "recipient load failed");
    }
}

impl<R: StatusReporter + ?Sized> StatusReporter for &R {
    fn show_error_message(&self, text: &str) {
        (**self).show_error_message(text);
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("capture lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn log_reporter_keeps_error_text_in_its_own_field() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            LogReporter.show_error_message("cannot read response.json");
        });

        let output = String::from_utf8(captured.0.lock().expect("capture lock").clone())
            .expect("utf8");
        assert!(output.contains("recipient load failed"), "{output}");
        assert!(output.contains(r#"error="cannot read response.json""#), "{output}");
    }
}
