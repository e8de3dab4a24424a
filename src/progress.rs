// src/progress.rs
/// Lightweight progress reporting used by long-running operations (download/export).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called once the catalog size is known (after the first list page).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one record was resolved.
    fn item_done(&mut self, _name: &str) {}

    /// Called when one record was skipped after exhausting retries.
    fn item_failed(&mut self, _name: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// CLI sink: routes everything through the logger, with a status line every
/// `every` records.
pub struct LogProgress {
    label: String,
    total: usize,
    done: usize,
    failed: usize,
    every: usize,
}

impl LogProgress {
    pub fn new(label: impl Into<String>, every: usize) -> Self {
        Self { label: label.into(), total: 0, done: 0, failed: 0, every: every.max(1) }
    }
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        log::info!("{}: {} catalog entries", self.label, total);
    }

    fn log(&mut self, msg: &str) {
        log::info!("{}: {}", self.label, msg);
    }

    fn item_done(&mut self, name: &str) {
        self.done += 1;
        log::debug!("{}: resolved {name}", self.label);
        let seen = self.done + self.failed;
        if seen % self.every == 0 {
            log::info!("{}: {seen}/{} processed", self.label, self.total);
        }
    }

    fn item_failed(&mut self, name: &str, reason: &str) {
        self.failed += 1;
        log::debug!("{}: skipped {name}: {reason}", self.label);
    }

    fn finish(&mut self) {
        log::info!(
            "{}: finished, {} resolved, {} skipped",
            self.label, self.done, self.failed
        );
    }
}
