//! Sample plants for a first launch.

use crate::types::Reminder;

/// The four demo plants loaded into an empty checklist
#[must_use]
pub fn sample_reminders() -> Vec<Reminder> {
    [
        ("Monstera", "Kitchen", "Full sun"),
        ("Pothos", "Bedroom", "Low Light"),
        ("Orchid", "Living room", "Partial sun"),
        ("Spider", "Kitchen", "Full sun"),
    ]
    .into_iter()
    .map(|(name, room, light)| Reminder::new(name, room, light, "Every day", "20–50 ml"))
    .collect()
}
