/// Events emitted while a batch analysis runs.
///
/// A run is a sequence of phases. The analysis phase wraps a task whose steps are the
/// individual structure files; `Message` carries per-file notes such as skipped files.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

/// Receives progress events. Rayon workers report concurrently, hence `Send + Sync`.
pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback; silent without one.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(callback) = &self.callback {
            callback(event);
        }
    }

    /// Reports a free-form note. The message is only formatted when someone listens.
    pub fn message(&self, text: impl FnOnce() -> String) {
        if self.callback.is_some() {
            self.report(Progress::Message(text()));
        }
    }
}
