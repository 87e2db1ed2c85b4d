//! Errors raised by reminder commands.

use crate::types::ReminderId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a reminder command was rejected.
///
/// Unknown identifiers are not errors: toggling, updating or deleting an id
/// that is not in the collection is a silent no-op.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderError {
    /// A positional delete referenced a row that does not exist
    #[error("Position {index} is out of range for a list of {len} reminders")]
    IndexOutOfRange {
        /// Offending position
        index: usize,
        /// Length of the view the position was resolved against
        len: usize,
    },

    /// The plant name is empty or whitespace
    #[error("Plant name cannot be blank")]
    BlankPlantName,

    /// A reminder with this id is already in the collection
    #[error("Reminder with ID {0} already exists")]
    DuplicateId(ReminderId),
}
