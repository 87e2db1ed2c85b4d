//! Progress derived from the due-today checklist.
//!
//! Nothing here is stored. Every value is recomputed from the state passed
//! in, so adding an unticked reminder after everything was done moves the
//! header straight back to [`HeaderStatus::InProgress`].

use crate::state::ReminderState;
use serde::{Deserialize, Serialize};

/// Title of the celebration view shown on [`HeaderStatus::AllComplete`]
pub const CELEBRATION_TITLE: &str = "All Done! 🎉";

/// Subtitle of the celebration view
pub const CELEBRATION_SUBTITLE: &str = "All Reminders Completed";

/// Aggregate completion state of the due-today checklist
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderStatus {
    /// Nothing is due today
    Empty,
    /// Some reminders are still waiting for water
    InProgress {
        /// How many are left
        remaining: usize,
    },
    /// Every reminder due today is ticked off
    AllComplete,
}

impl HeaderStatus {
    /// Text shown above the progress bar
    #[must_use]
    pub fn message(self) -> String {
        match self {
            Self::Empty => "Add your first plant 🌱".to_string(),
            Self::InProgress { remaining } => {
                format!("{remaining} of your plants feel loved today ✨")
            },
            Self::AllComplete => "All plants feel loved today ✨".to_string(),
        }
    }

    /// Returns true when the celebration view should be up
    #[must_use]
    pub const fn is_all_complete(self) -> bool {
        matches!(self, Self::AllComplete)
    }
}

impl std::fmt::Display for HeaderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::InProgress { remaining } => write!(f, "in progress ({remaining} remaining)"),
            Self::AllComplete => write!(f, "all complete"),
        }
    }
}

/// Completion ratio of the due-today subset, in `[0.0, 1.0]`
///
/// An empty subset yields exactly `0.0`.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Checklist sizes are far below 2^52
pub fn progress(state: &ReminderState) -> f64 {
    let total = state.due_today_count();
    if total == 0 {
        return 0.0;
    }
    state.completed_count() as f64 / total as f64
}

/// Aggregate status of the due-today subset
#[must_use]
pub fn header_status(state: &ReminderState) -> HeaderStatus {
    let total = state.due_today_count();
    let remaining = state.remaining_count();

    match (total, remaining) {
        (0, _) => HeaderStatus::Empty,
        (_, 0) => HeaderStatus::AllComplete,
        (_, remaining) => HeaderStatus::InProgress { remaining },
    }
}

/// Everything the checklist header needs, read in one pass
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Reminders due today that are ticked off
    pub completed: usize,
    /// Reminders due today
    pub total: usize,
    /// `completed / total`, or `0.0` when nothing is due
    pub ratio: f64,
    /// Aggregate status
    pub status: HeaderStatus,
}

impl ProgressReport {
    /// Computes the report for the current state
    #[must_use]
    pub fn from_state(state: &ReminderState) -> Self {
        Self {
            completed: state.completed_count(),
            total: state.due_today_count(),
            ratio: progress(state),
            status: header_status(state),
        }
    }

    /// Filled cells of a `width`-cell progress bar
    ///
    /// At least one cell is shown when the bar has room, never more than `width`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn bar_cells(&self, width: usize) -> usize {
        if width == 0 {
            return 0;
        }
        let filled = (self.ratio * width as f64).round() as usize;
        filled.clamp(1, width)
    }
}
