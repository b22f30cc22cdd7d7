//! Timed logging scopes.

use crate::logging::ProgressLogger;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(0);

/// A titled scope that logs when it starts and how long it took to finish.
///
/// Scope ids increase monotonically across the process so interleaved start
/// and finish lines can be paired up in the log.
pub struct LogScope {
    id: u64,
    title: String,
    started: Instant,
    logger: Arc<dyn ProgressLogger>,
}

impl LogScope {
    /// Open a scope, logging a start line.
    pub fn start(title: impl Into<String>, logger: Arc<dyn ProgressLogger>) -> Self {
        let id = NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed) + 1;
        let title = title.into();
        logger.info(&format!("[start:{id:0>3}] Start {title}"));

        Self {
            id,
            title,
            started: Instant::now(),
            logger,
        }
    }

    /// Close the scope, logging the elapsed time.
    pub fn finish(self) {
        let elapsed = self.started.elapsed().as_secs_f64();
        self.logger.info(&format!(
            "[finish:{:0>3}] Finish {} (took {:.3} sec)",
            self.id, self.title, elapsed
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingLogger {
        messages: Mutex<Vec<String>>,
    }

    impl ProgressLogger for RecordingLogger {
        fn info(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn test_scope_logs_start_and_finish() {
        let logger = Arc::new(RecordingLogger {
            messages: Mutex::new(Vec::new()),
        });

        let scope = LogScope::start("training", Arc::clone(&logger) as Arc<dyn ProgressLogger>);
        scope.finish();

        let messages = logger.messages.lock().unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("Start training"));
        assert!(messages[1].contains("Finish training"));
        assert!(messages[1].contains("sec)"));
    }

    #[test]
    fn test_scope_ids_increase() {
        let logger = Arc::new(RecordingLogger {
            messages: Mutex::new(Vec::new()),
        });

        let a = LogScope::start("first", Arc::clone(&logger) as Arc<dyn ProgressLogger>);
        let b = LogScope::start("second", Arc::clone(&logger) as Arc<dyn ProgressLogger>);
        assert!(b.id > a.id);
        a.finish();
        b.finish();
    }
}
