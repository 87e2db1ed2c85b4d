//! The reminder collection.
//!
//! [`ReminderState`] owns the ordered list of reminders. Its mutating methods
//! are what the reducer applies events with; they are public so the same
//! rules can be exercised directly in tests and tools.

use crate::error::ReminderError;
use crate::types::{ListView, Reminder, ReminderId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// State of the watering checklist
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReminderState {
    /// Every reminder, in insertion order
    pub reminders: Vec<Reminder>,
    /// Last rejected command (if any)
    pub last_error: Option<ReminderError>,
}

impl ReminderState {
    /// Creates an empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reminders: Vec::new(),
            last_error: None,
        }
    }

    /// Creates a collection holding `reminders` in the given order
    #[must_use]
    pub fn with_reminders(reminders: impl IntoIterator<Item = Reminder>) -> Self {
        Self {
            reminders: reminders.into_iter().collect(),
            last_error: None,
        }
    }

    // ========== Queries ==========

    /// Number of reminders, due today or not
    #[must_use]
    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    /// Returns true if there are no reminders at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    /// Every reminder in order
    pub fn iter(&self) -> impl Iterator<Item = &Reminder> {
        self.reminders.iter()
    }

    /// Returns a reminder by ID
    #[must_use]
    pub fn get(&self, id: &ReminderId) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.id == *id)
    }

    /// Checks if a reminder exists
    #[must_use]
    pub fn exists(&self, id: &ReminderId) -> bool {
        self.get(id).is_some()
    }

    /// Position of a reminder in the full list
    #[must_use]
    pub fn position(&self, id: &ReminderId) -> Option<usize> {
        self.reminders.iter().position(|r| r.id == *id)
    }

    /// Reminders due today, in insertion order
    pub fn due_today(&self) -> impl Iterator<Item = &Reminder> {
        self.reminders.iter().filter(|r| r.due_today)
    }

    /// Number of reminders due today
    #[must_use]
    pub fn due_today_count(&self) -> usize {
        self.due_today().count()
    }

    /// Number of reminders due today that are ticked off
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.due_today().filter(|r| r.is_done).count()
    }

    /// Number of reminders due today still waiting for water
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.due_today().filter(|r| !r.is_done).count()
    }

    /// Owned copy of the ordered collection
    #[must_use]
    pub fn snapshot(&self) -> Vec<Reminder> {
        self.reminders.clone()
    }

    /// Maps row positions in `view` to reminder ids
    ///
    /// Duplicate positions collapse. The result is in list order.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::IndexOutOfRange`] for the first position past
    /// the end of the view.
    pub fn resolve_positions(
        &self,
        view: ListView,
        positions: &[usize],
    ) -> Result<Vec<ReminderId>, ReminderError> {
        let rows: Vec<ReminderId> = match view {
            ListView::All => self.reminders.iter().map(|r| r.id).collect(),
            ListView::DueToday => self.due_today().map(|r| r.id).collect(),
        };

        let unique: BTreeSet<usize> = positions.iter().copied().collect();
        unique
            .into_iter()
            .map(|index| {
                rows.get(index).copied().ok_or(ReminderError::IndexOutOfRange {
                    index,
                    len: rows.len(),
                })
            })
            .collect()
    }

    // ========== Mutations ==========

    /// Appends a reminder. No validation happens here.
    pub fn add(&mut self, reminder: Reminder) {
        self.reminders.push(reminder);
    }

    /// Sets the done flag of a reminder; returns false if the id is unknown
    pub fn set_done(&mut self, id: &ReminderId, is_done: bool, at: DateTime<Utc>) -> bool {
        match self.reminders.iter_mut().find(|r| r.id == *id) {
            Some(reminder) => {
                reminder.set_done(is_done, at);
                true
            },
            None => false,
        }
    }

    /// Flips the done flag of a reminder
    ///
    /// Returns the new value, or `None` (and changes nothing) if the id is
    /// unknown.
    pub fn toggle_done(&mut self, id: &ReminderId, now: DateTime<Utc>) -> Option<bool> {
        let is_done = !self.get(id)?.is_done;
        self.set_done(id, is_done, now);
        Some(is_done)
    }

    /// Removes a reminder by identifier; unknown ids are a no-op
    pub fn delete(&mut self, id: &ReminderId) -> Option<Reminder> {
        let index = self.position(id)?;
        Some(self.reminders.remove(index))
    }

    /// Removes every reminder whose id is in `ids`, keeping the order of the rest
    pub fn delete_many(&mut self, ids: &[ReminderId]) -> Vec<Reminder> {
        let (removed, kept): (Vec<Reminder>, Vec<Reminder>) = std::mem::take(&mut self.reminders)
            .into_iter()
            .partition(|r| ids.contains(&r.id));
        self.reminders = kept;
        removed
    }

    /// Removes the reminders shown at `positions` in `view`
    ///
    /// All-or-nothing: if any position is out of range nothing is removed.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::IndexOutOfRange`] for a position past the end
    /// of the view.
    pub fn delete_at_positions(
        &mut self,
        view: ListView,
        positions: &[usize],
    ) -> Result<Vec<Reminder>, ReminderError> {
        let ids = self.resolve_positions(view, positions)?;
        Ok(self.delete_many(&ids))
    }

    /// Replaces the record stored under `id`, keeping that id
    ///
    /// Returns false (and changes nothing) if the id is unknown.
    pub fn update(&mut self, id: &ReminderId, replacement: Reminder) -> bool {
        match self.reminders.iter_mut().find(|r| r.id == *id) {
            Some(slot) => {
                *slot = replacement.with_id(*id);
                true
            },
            None => false,
        }
    }

    /// Loads `seed` if the collection is empty; returns whether it did
    pub fn seed_if_empty(&mut self, seed: impl IntoIterator<Item = Reminder>) -> bool {
        if !self.is_empty() {
            return false;
        }
        self.reminders.extend(seed);
        !self.is_empty()
    }
}
