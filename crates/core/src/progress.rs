//! Cosmetic progress simulation for the generation view.
//!
//! The upstream API reports no progress, so the front end animates a
//! percentage on a timer: slow start, faster middle, slow finish. The value
//! has no relation to the remote job and must not be read as a real
//! progress signal.

use rand::Rng;

/// Progress ceiling.
pub const PROGRESS_MAX: f64 = 100.0;

/// Below this the simulation uses the slow start increments.
const SLOW_START_BELOW: f64 = 20.0;
/// At or above this the simulation uses the slow finish increments.
const SLOW_FINISH_FROM: f64 = 80.0;

/// A labelled phase shown while the simulation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStep {
    pub label: &'static str,
    /// The step is current while progress is below this value.
    pub threshold: u8,
}

pub const PROGRESS_STEPS: &[ProgressStep] = &[
    ProgressStep {
        label: "Initializing generation",
        threshold: 10,
    },
    ProgressStep {
        label: "Processing prompt",
        threshold: 25,
    },
    ProgressStep {
        label: "Rendering frames",
        threshold: 50,
    },
    ProgressStep {
        label: "Adding effects",
        threshold: 75,
    },
    ProgressStep {
        label: "Finalizing video",
        threshold: 90,
    },
    ProgressStep {
        label: "Complete!",
        threshold: 100,
    },
];

/// Random increment for the next tick given the current progress.
///
/// - below 20: `[1, 3)`
/// - 20 to 80: `[2, 7)`
/// - 80 and above: `[0.5, 2.5)`
pub fn next_increment<R: Rng + ?Sized>(current: f64, rng: &mut R) -> f64 {
    if current < SLOW_START_BELOW {
        rng.random_range(1.0..3.0)
    } else if current < SLOW_FINISH_FROM {
        rng.random_range(2.0..7.0)
    } else {
        rng.random_range(0.5..2.5)
    }
}

/// Index into [`PROGRESS_STEPS`] for `progress`.
pub fn current_step_index(progress: f64) -> usize {
    PROGRESS_STEPS
        .iter()
        .position(|step| progress < f64::from(step.threshold))
        .unwrap_or(PROGRESS_STEPS.len() - 1)
}

pub fn current_step(progress: f64) -> &'static ProgressStep {
    &PROGRESS_STEPS[current_step_index(progress)]
}

/// Seconds left on an advisory estimate, floored at zero.
pub fn remaining_secs(estimated_time: Option<u32>, elapsed_secs: u64) -> Option<u64> {
    estimated_time.map(|estimate| u64::from(estimate).saturating_sub(elapsed_secs))
}

/// Monotonic, capped progress counter.
#[derive(Debug, Clone, Default)]
pub struct ProgressSimulator {
    progress: f64,
}

impl ProgressSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current progress in `0.0..=100.0`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Current progress rounded for display.
    pub fn percent(&self) -> u8 {
        self.progress.round() as u8
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= PROGRESS_MAX
    }

    pub fn step(&self) -> &'static ProgressStep {
        current_step(self.progress)
    }

    /// Advance one tick and return the new progress. Once at 100 further
    /// ticks are no-ops.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        if !self.is_complete() {
            let increment = next_increment(self.progress, rng);
            self.progress = (self.progress + increment).min(PROGRESS_MAX);
        }
        self.progress
    }
}
