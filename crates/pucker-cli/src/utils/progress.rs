use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use ringpucker::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Bar state shared between the handler and its callback.
struct BarState {
    bar: ProgressBar,
    phase: &'static str,
    skipped: u64,
}

impl BarState {
    fn refresh_message(&self) {
        if self.skipped == 0 {
            self.bar.set_message(self.phase);
        } else {
            self.bar
                .set_message(format!("{} ({} skipped)", self.phase, self.skipped));
        }
    }
}

/// Renders batch-analysis progress on stderr: a spinner per phase, a file counter bar
/// for the analysis task, and skipped files printed above the bar.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<BarState>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(Self::spinner_style());
        bar.finish_and_clear();

        Self {
            state: Arc::new(Mutex::new(BarState {
                bar,
                phase: "",
                skipped: 0,
            })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = self.state.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut state) = state.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    state.phase = name;
                    state.bar.reset();
                    state.bar.set_length(0);
                    state.bar.set_style(Self::spinner_style());
                    state
                        .bar
                        .enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    state.refresh_message();
                }
                Progress::PhaseFinish => {
                    state.bar.disable_steady_tick();
                    state.bar.finish_with_message(format!("✓ {}", state.phase));
                }
                Progress::TaskStart { total_steps } => {
                    state.skipped = 0;
                    state.bar.disable_steady_tick();
                    state.bar.reset();
                    state.bar.set_length(total_steps);
                    state.bar.set_style(Self::bar_style());
                    state.refresh_message();
                }
                Progress::TaskIncrement => state.bar.inc(1),
                Progress::TaskFinish => {
                    let length = state.bar.length().unwrap_or(0);
                    state.bar.set_position(length);
                }
                Progress::Message(text) => {
                    state.skipped += 1;
                    state.bar.println(format!("  ! {}", text));
                    state.refresh_message();
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<24} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
