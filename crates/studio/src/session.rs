//! One generation, from submit to the terminal view.
//!
//! The session submits the request, animates a simulated progress bar on a
//! fixed tick, asks the backend for the final status once the bar reaches
//! 100 and saves completed videos to history.
//!
//! ```text
//! Idle -> Generating -> Completed
//!                   \-> Error
//! ```

use std::time::{Duration, Instant};

use rand::Rng;
use reelgen_client::VideoBackend;
use reelgen_core::generation::{GenerationRecord, GenerationStatus};
use reelgen_core::progress::{current_step_index, remaining_secs, ProgressSimulator};
use reelgen_core::request::ValidatedRequest;
use reelgen_store::{HistoryStore, KeyValueStore};

/// Shown when a failed record carries no message of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred during video generation.";

/// Where a session currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Generating(GenerationRecord),
    Completed(GenerationRecord),
    Error(String),
}

impl SessionState {
    pub fn is_generating(&self) -> bool {
        matches!(self, SessionState::Generating(_))
    }
}

/// Snapshot emitted on every progress tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub progress: f64,
    pub percent: u8,
    pub step_index: usize,
    pub step_label: &'static str,
    pub elapsed_secs: u64,
    pub remaining_secs: Option<u64>,
}

/// Drives a single generation against a backend and a history store.
pub struct GenerationSession<'a, S> {
    backend: &'a dyn VideoBackend,
    history: &'a HistoryStore<S>,
    tick_interval: Duration,
    state: SessionState,
}

impl<'a, S: KeyValueStore> GenerationSession<'a, S> {
    pub fn new(
        backend: &'a dyn VideoBackend,
        history: &'a HistoryStore<S>,
        tick_interval: Duration,
    ) -> Self {
        Self {
            backend,
            history,
            tick_interval: tick_interval.max(Duration::from_millis(1)),
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Back to [`SessionState::Idle`] for another attempt.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Run the whole flow for `request`.
    ///
    /// `on_progress` is called once per tick while generating. The final
    /// state is returned and also kept in [`Self::state`]. Failing to write
    /// history is logged and does not fail the session.
    pub async fn run<R, F>(
        &mut self,
        request: &ValidatedRequest,
        rng: &mut R,
        mut on_progress: F,
    ) -> &SessionState
    where
        R: Rng + ?Sized,
        F: FnMut(&ProgressUpdate),
    {
        let mut record = match self.backend.submit(request).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "Generation submit failed");
                self.state = SessionState::Error(e.to_string());
                return &self.state;
            }
        };
        tracing::info!(id = %record.id, "Generation submitted");
        self.state = SessionState::Generating(record.clone());

        let started = Instant::now();
        let estimated_time = record.estimated_time;
        let mut simulator = ProgressSimulator::new();
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        while !simulator.is_complete() {
            ticker.tick().await;
            let progress = simulator.advance(rng);
            let elapsed_secs = started.elapsed().as_secs();
            let step_index = current_step_index(progress);
            on_progress(&ProgressUpdate {
                progress,
                percent: simulator.percent(),
                step_index,
                step_label: simulator.step().label,
                elapsed_secs,
                remaining_secs: remaining_secs(estimated_time, elapsed_secs),
            });
        }

        let elapsed = u32::try_from(started.elapsed().as_secs()).unwrap_or(u32::MAX);
        let outcome = match self.backend.check_status(&record.id).await {
            Ok(update) => record.apply_update(update, elapsed),
            Err(e) => {
                tracing::warn!(id = %record.id, error = %e, "Status check failed");
                record.fail(e.to_string())
            }
        };
        if let Err(e) = outcome {
            self.state = SessionState::Error(e.to_string());
            return &self.state;
        }

        self.state = self.finish(record);
        &self.state
    }

    fn finish(&self, record: GenerationRecord) -> SessionState {
        match record.status {
            GenerationStatus::Completed => {
                match self.history.save(&record) {
                    Ok(saved) => tracing::debug!(id = %record.id, saved, "History updated"),
                    Err(e) => {
                        tracing::warn!(id = %record.id, error = %e, "Failed to save history")
                    }
                }
                SessionState::Completed(record)
            }
            _ => SessionState::Error(
                record
                    .error
                    .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()),
            ),
        }
    }
}
