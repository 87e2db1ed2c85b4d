//! Houseplant watering checklist.
//!
//! A single [`ReminderStore`] owns every reminder. Screens read snapshots and
//! derived progress from it and forward user intents as [`ReminderAction`]
//! commands. The header status ([`HeaderStatus`]) is recomputed on every read
//! and announced through the store's subscription whenever it changes.
//!
//! # Quick Start
//!
//! ```no_run
//! use my_plants::{build_store, ProgressReport, ReminderAction, ReminderConfig};
//! use my_plants_core::environment::SystemClock;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = build_store(&ReminderConfig::default(), Arc::new(SystemClock));
//!
//! // Tick off the first plant on today's list
//! let first = store.state(|s| s.due_today().next().map(|r| r.id)).await;
//! if let Some(id) = first {
//!     store.send(ReminderAction::ToggleDone { id }).await?;
//! }
//!
//! let report = store.state(ProgressReport::from_state).await;
//! println!("{}", report.status.message());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod progress;
pub mod reducer;
pub mod seed;
pub mod state;
pub mod types;

pub use config::{ConfigError, ReminderConfig};
pub use error::ReminderError;
pub use progress::{header_status, progress, HeaderStatus, ProgressReport};
pub use reducer::{ReminderEnvironment, ReminderReducer};
pub use state::ReminderState;
pub use types::{
    ListView, Reminder, ReminderAction, ReminderDraft, ReminderId, ReminderStatus,
};

use my_plants_core::environment::Clock;
use my_plants_runtime::Store;
use std::sync::Arc;

/// The store type every screen shares
pub type ReminderStore =
    Store<ReminderState, ReminderAction, ReminderEnvironment, ReminderReducer>;

/// Builds the store described by `config`
///
/// The checklist starts with the sample plants when `seed_samples` is set.
#[must_use]
pub fn build_store(config: &ReminderConfig, clock: Arc<dyn Clock>) -> ReminderStore {
    let mut state = ReminderState::new();
    if config.seed_samples {
        state.seed_if_empty(seed::sample_reminders());
    }

    Store::with_config(
        state,
        ReminderReducer::new(),
        config.environment(clock),
        config.store_config(),
    )
}
