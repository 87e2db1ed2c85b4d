//! Domain types for the watering checklist.
//!
//! A [`Reminder`] is one plant that may need water today. The collection of
//! reminders lives in [`crate::state::ReminderState`]; everything the
//! checklist header shows is derived from it by [`crate::progress`].

use crate::error::ReminderError;
use crate::progress::HeaderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Time note shown on every new reminder
pub const DEFAULT_TIME_NOTE: &str = "20–30 min";

/// Rooms offered by the reminder form
pub const SUGGESTED_ROOMS: [&str; 5] = ["Bedroom", "Living room", "Kitchen", "Balcony", "Bathroom"];

/// Light levels offered by the reminder form
pub const SUGGESTED_LIGHTS: [&str; 3] = ["Full sun", "Partial sun", "Low Light"];

/// Watering schedules offered by the reminder form
pub const SUGGESTED_WATERING_DAYS: [&str; 3] = ["Every day", "Every 2 days", "Weekly"];

/// Water amounts offered by the reminder form
pub const SUGGESTED_WATER_AMOUNTS: [&str; 3] = ["10–20 ml", "20–50 ml", "50–80 ml"];

/// Unique identifier for a reminder
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReminderId(Uuid);

impl ReminderId {
    /// Creates a new random `ReminderId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `ReminderId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for ReminderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReminderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a reminder sits in its own two-state cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderStatus {
    /// Not watered yet
    Pending,
    /// Ticked off
    Done,
}

/// A single plant-care reminder
///
/// Derived `PartialEq` compares every field. Use [`Reminder::same_identity`]
/// when only the identifier matters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Unique identifier, never reassigned
    pub id: ReminderId,
    /// Display name of the plant
    pub plant_name: String,
    /// Room the plant lives in
    pub room: String,
    /// Light the plant gets
    pub light: String,
    /// How often it is watered
    pub watering_days: String,
    /// How much water it gets
    pub water_amount: String,
    /// Free-form duration hint
    pub time_note: String,
    /// Whether the plant shows up on today's checklist
    pub due_today: bool,
    /// Whether today's watering has been ticked off
    pub is_done: bool,
    /// When the reminder was last ticked off, cleared when unticked
    pub done_at: Option<DateTime<Utc>>,
}

impl Reminder {
    /// Creates a pending reminder that is due today
    #[must_use]
    pub fn new(
        plant_name: impl Into<String>,
        room: impl Into<String>,
        light: impl Into<String>,
        watering_days: impl Into<String>,
        water_amount: impl Into<String>,
    ) -> Self {
        Self {
            id: ReminderId::new(),
            plant_name: plant_name.into(),
            room: room.into(),
            light: light.into(),
            watering_days: watering_days.into(),
            water_amount: water_amount.into(),
            time_note: DEFAULT_TIME_NOTE.to_string(),
            due_today: true,
            is_done: false,
            done_at: None,
        }
    }

    /// Replaces the identifier
    #[must_use]
    pub fn with_id(mut self, id: ReminderId) -> Self {
        self.id = id;
        self
    }

    /// Sets whether the reminder is on today's checklist
    #[must_use]
    pub fn with_due_today(mut self, due_today: bool) -> Self {
        self.due_today = due_today;
        self
    }

    /// Sets the done flag without a timestamp
    #[must_use]
    pub fn with_done(mut self, is_done: bool) -> Self {
        self.is_done = is_done;
        self
    }

    /// Identity comparison: two reminders are the same iff their ids match
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// Current position in the Pending ⇄ Done cycle
    #[must_use]
    pub const fn status(&self) -> ReminderStatus {
        if self.is_done {
            ReminderStatus::Done
        } else {
            ReminderStatus::Pending
        }
    }

    /// Sets the done flag, stamping or clearing `done_at`
    pub fn set_done(&mut self, is_done: bool, at: DateTime<Utc>) {
        self.is_done = is_done;
        self.done_at = is_done.then_some(at);
    }

    /// Returns true if the plant name has no visible characters
    #[must_use]
    pub fn has_blank_name(&self) -> bool {
        self.plant_name.trim().is_empty()
    }
}

/// What the "Set Reminder" form submits
///
/// `Default` carries the form's preselected values and an empty name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderDraft {
    /// Name typed by the user
    pub plant_name: String,
    /// Selected room
    pub room: String,
    /// Selected light level
    pub light: String,
    /// Selected watering schedule
    pub watering_days: String,
    /// Selected water amount
    pub water_amount: String,
}

impl Default for ReminderDraft {
    fn default() -> Self {
        Self {
            plant_name: String::new(),
            room: SUGGESTED_ROOMS[0].to_string(),
            light: SUGGESTED_LIGHTS[0].to_string(),
            watering_days: SUGGESTED_WATERING_DAYS[0].to_string(),
            water_amount: SUGGESTED_WATER_AMOUNTS[1].to_string(),
        }
    }
}

impl ReminderDraft {
    /// Starts a draft for the given plant with the form defaults
    #[must_use]
    pub fn named(plant_name: impl Into<String>) -> Self {
        Self {
            plant_name: plant_name.into(),
            ..Self::default()
        }
    }

    /// Turns the submitted form into a fresh pending reminder due today
    #[must_use]
    pub fn into_reminder(self) -> Reminder {
        Reminder::new(
            self.plant_name,
            self.room,
            self.light,
            self.watering_days,
            self.water_amount,
        )
    }
}

/// Which ordered list a positional delete indexes into
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListView {
    /// Every reminder in insertion order
    All,
    /// Only reminders due today, in insertion order
    #[default]
    DueToday,
}

/// Commands and events for the reminder collection
///
/// Commands are requests from the presentation layer; the reducer validates
/// them and turns them into events, which are the only actions that change
/// state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ReminderAction {
    // ========== Commands ==========
    /// Command: append a reminder to the collection
    AddReminder {
        /// Fully populated reminder from the form
        reminder: Reminder,
    },

    /// Command: flip the done flag of a reminder
    ToggleDone {
        /// Reminder to toggle
        id: ReminderId,
    },

    /// Command: remove a reminder by identifier
    DeleteReminder {
        /// Reminder to remove
        id: ReminderId,
    },

    /// Command: remove the reminders shown at the given rows
    DeleteAtPositions {
        /// List the positions refer to
        view: ListView,
        /// Row offsets; duplicates are ignored
        positions: Vec<usize>,
    },

    /// Command: replace the record stored under an identifier
    UpdateReminder {
        /// Reminder to replace
        id: ReminderId,
        /// New values; its own id is ignored
        reminder: Reminder,
    },

    /// Command: load sample data if the collection is empty
    SeedIfEmpty {
        /// Reminders to load
        reminders: Vec<Reminder>,
    },

    // ========== Events ==========
    /// Event: a reminder was appended
    ReminderAdded {
        /// The stored reminder
        reminder: Reminder,
    },

    /// Event: a reminder's done flag changed
    DoneToggled {
        /// Reminder that changed
        id: ReminderId,
        /// New value of the flag
        is_done: bool,
        /// When it happened
        at: DateTime<Utc>,
    },

    /// Event: reminders were removed
    RemindersDeleted {
        /// Removed identifiers
        ids: Vec<ReminderId>,
    },

    /// Event: a reminder was replaced
    ReminderUpdated {
        /// The stored reminder, carrying its original id
        reminder: Reminder,
    },

    /// Event: sample data was loaded into an empty collection
    Seeded {
        /// Loaded reminders
        reminders: Vec<Reminder>,
    },

    /// Event: a command was rejected
    ValidationFailed {
        /// Why
        error: ReminderError,
    },

    /// Event: the checklist header moved to a different status
    StatusChanged {
        /// Status before the action
        from: HeaderStatus,
        /// Status after the action
        to: HeaderStatus,
    },
}

impl ReminderAction {
    /// Returns true for presentation-layer requests
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::AddReminder { .. }
                | Self::ToggleDone { .. }
                | Self::DeleteReminder { .. }
                | Self::DeleteAtPositions { .. }
                | Self::UpdateReminder { .. }
                | Self::SeedIfEmpty { .. }
        )
    }

    /// Returns true for facts produced by the reducer
    #[must_use]
    pub const fn is_event(&self) -> bool {
        !self.is_command()
    }
}
