//! Reducer for the reminder collection.
//!
//! Commands are validated against the current state and turned into events;
//! events are applied to state. After every action the header status is
//! recomputed, and a change is announced with a dispatched
//! [`ReminderAction::StatusChanged`] so the presentation layer can switch to
//! or away from the celebration view.

use crate::error::ReminderError;
use crate::progress::header_status;
use crate::state::ReminderState;
use crate::types::{ListView, Reminder, ReminderAction, ReminderId};
use my_plants_core::{effect::Effect, environment::Clock, reducer::Reducer, smallvec, SmallVec};
use std::sync::Arc;

/// Environment dependencies for the reminder reducer
#[derive(Clone)]
pub struct ReminderEnvironment {
    /// Clock for `done_at` timestamps
    pub clock: Arc<dyn Clock>,
    /// Reject reminders whose plant name is blank
    pub reject_blank_names: bool,
}

impl ReminderEnvironment {
    /// Creates an environment that rejects blank plant names
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            reject_blank_names: true,
        }
    }

    /// Sets the blank-name policy
    #[must_use]
    pub fn with_reject_blank_names(mut self, reject: bool) -> Self {
        self.reject_blank_names = reject;
        self
    }
}

/// Reducer for the reminder collection
#[derive(Clone, Copy, Debug, Default)]
pub struct ReminderReducer;

impl ReminderReducer {
    /// Creates a new `ReminderReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn validate_reminder(
        env: &ReminderEnvironment,
        reminder: &Reminder,
    ) -> Result<(), ReminderError> {
        if env.reject_blank_names && reminder.has_blank_name() {
            return Err(ReminderError::BlankPlantName);
        }
        Ok(())
    }

    fn validate_add(
        state: &ReminderState,
        env: &ReminderEnvironment,
        reminder: &Reminder,
    ) -> Result<(), ReminderError> {
        if state.exists(&reminder.id) {
            return Err(ReminderError::DuplicateId(reminder.id));
        }
        Self::validate_reminder(env, reminder)
    }

    /// Turns a command into the event it produces, if any
    ///
    /// `Ok(None)` means there is nothing to do, e.g. the id is unknown.
    fn handle_command(
        state: &ReminderState,
        env: &ReminderEnvironment,
        command: ReminderAction,
    ) -> Result<Option<ReminderAction>, ReminderError> {
        let event = match command {
            ReminderAction::AddReminder { reminder } => {
                Self::validate_add(state, env, &reminder)?;
                Some(ReminderAction::ReminderAdded { reminder })
            },
            ReminderAction::ToggleDone { id } => {
                state.get(&id).map(|r| ReminderAction::DoneToggled {
                    id,
                    is_done: !r.is_done,
                    at: env.clock.now(),
                })
            },
            ReminderAction::DeleteReminder { id } => state
                .exists(&id)
                .then(|| ReminderAction::RemindersDeleted { ids: vec![id] }),
            ReminderAction::DeleteAtPositions { view, positions } => {
                Self::handle_positional_delete(state, view, &positions)?
            },
            ReminderAction::UpdateReminder { id, reminder } => {
                if state.exists(&id) {
                    Self::validate_reminder(env, &reminder)?;
                    Some(ReminderAction::ReminderUpdated {
                        reminder: reminder.with_id(id),
                    })
                } else {
                    None
                }
            },
            ReminderAction::SeedIfEmpty { reminders } => {
                let should_seed = state.is_empty() && !reminders.is_empty();
                should_seed.then_some(ReminderAction::Seeded { reminders })
            },
            // Replayed events still may not duplicate an id
            ReminderAction::ReminderAdded { reminder } => {
                if state.exists(&reminder.id) {
                    return Err(ReminderError::DuplicateId(reminder.id));
                }
                Some(ReminderAction::ReminderAdded { reminder })
            },
            // Other events are applied as they are
            event => Some(event),
        };
        Ok(event)
    }

    fn handle_positional_delete(
        state: &ReminderState,
        view: ListView,
        positions: &[usize],
    ) -> Result<Option<ReminderAction>, ReminderError> {
        let ids = state.resolve_positions(view, positions)?;
        Ok((!ids.is_empty()).then_some(ReminderAction::RemindersDeleted { ids }))
    }

    /// Applies an event to state
    fn apply_event(state: &mut ReminderState, event: &ReminderAction) {
        match event {
            ReminderAction::ReminderAdded { reminder } => {
                if !state.exists(&reminder.id) {
                    state.add(reminder.clone());
                }
                state.last_error = None;
            },
            ReminderAction::DoneToggled { id, is_done, at } => {
                state.set_done(id, *is_done, *at);
                state.last_error = None;
            },
            ReminderAction::RemindersDeleted { ids } => {
                state.delete_many(ids);
                state.last_error = None;
            },
            ReminderAction::ReminderUpdated { reminder } => {
                state.update(&reminder.id, reminder.clone());
                state.last_error = None;
            },
            ReminderAction::Seeded { reminders } => {
                state.seed_if_empty(reminders.iter().cloned());
                state.last_error = None;
            },
            ReminderAction::ValidationFailed { error } => {
                state.last_error = Some(error.clone());
            },
            // Announcements and commands do not touch state
            ReminderAction::StatusChanged { .. }
            | ReminderAction::AddReminder { .. }
            | ReminderAction::ToggleDone { .. }
            | ReminderAction::DeleteReminder { .. }
            | ReminderAction::DeleteAtPositions { .. }
            | ReminderAction::UpdateReminder { .. }
            | ReminderAction::SeedIfEmpty { .. } => {},
        }
    }

    fn ignored(id: Option<ReminderId>) {
        tracing::debug!(?id, "Command had nothing to act on");
    }
}

impl Reducer for ReminderReducer {
    type State = ReminderState;
    type Action = ReminderAction;
    type Environment = ReminderEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if matches!(action, ReminderAction::StatusChanged { .. }) {
            return SmallVec::new();
        }

        let before = header_status(state);

        let target = match &action {
            ReminderAction::ToggleDone { id }
            | ReminderAction::DeleteReminder { id }
            | ReminderAction::UpdateReminder { id, .. } => Some(*id),
            _ => None,
        };

        match Self::handle_command(state, env, action) {
            Ok(Some(event)) => Self::apply_event(state, &event),
            Ok(None) => {
                Self::ignored(target);
                state.last_error = None;
            },
            Err(error) => {
                tracing::warn!(%error, "Reminder command rejected");
                Self::apply_event(state, &ReminderAction::ValidationFailed { error });
            },
        }

        let after = header_status(state);
        if before == after {
            return SmallVec::new();
        }

        tracing::info!(from = %before, to = %after, "Checklist status changed");
        smallvec![Effect::Dispatch(ReminderAction::StatusChanged {
            from: before,
            to: after,
        })]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::progress::HeaderStatus;
    use crate::seed::sample_reminders;
    use my_plants_testing::{assertions, test_clock, ReducerTest};
    use uuid::Uuid;

    fn create_test_env() -> ReminderEnvironment {
        ReminderEnvironment::new(Arc::new(test_clock()))
    }

    fn due(id: u128) -> Reminder {
        Reminder::new(format!("Plant {id}"), "Kitchen", "Full sun", "Every day", "20–50 ml")
            .with_id(rid(id))
    }

    fn rid(id: u128) -> ReminderId {
        ReminderId::from_uuid(Uuid::from_u128(id))
    }

    fn status_change(from: HeaderStatus, to: HeaderStatus) -> Vec<ReminderAction> {
        vec![ReminderAction::StatusChanged { from, to }]
    }

    #[test]
    fn test_add_reminder_success() {
        let reminder = due(1);
        let expected = reminder.clone();

        ReducerTest::new(ReminderReducer::new())
            .with_env(create_test_env())
            .given_state(ReminderState::new())
            .when_action(ReminderAction::AddReminder { reminder })
            .then_state(move |state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.get(&expected.id), Some(&expected));
                assert!(state.last_error.is_none());
            })
            .then_effects(|effects| {
                assert_eq!(
                    assertions::dispatched_actions(effects),
                    status_change(
                        HeaderStatus::Empty,
                        HeaderStatus::InProgress { remaining: 1 }
                    )
                );
            })
            .run();
    }

    #[test]
    fn test_add_reminder_blank_name_rejected() {
        ReducerTest::new(ReminderReducer::new())
            .with_env(create_test_env())
            .given_state(ReminderState::new())
            .when_action(ReminderAction::AddReminder {
                reminder: due(1),
            })
            .when_action(ReminderAction::AddReminder {
                reminder: Reminder::new("   ", "Kitchen", "Full sun", "Every day", "20–50 ml"),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.last_error, Some(ReminderError::BlankPlantName));
            })
            .run();
    }

    #[test]
    fn test_add_reminder_blank_name_allowed_when_configured() {
        ReducerTest::new(ReminderReducer::new())
            .with_env(create_test_env().with_reject_blank_names(false))
            .given_state(ReminderState::new())
            .when_action(ReminderAction::AddReminder {
                reminder: Reminder::new("", "Kitchen", "Full sun", "Every day", "20–50 ml"),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert!(state.last_error.is_none());
            })
            .run();
    }

    #[test]
    fn test_add_reminder_duplicate_id() {
        ReducerTest::new(ReminderReducer::new())
            .with_env(create_test_env())
            .given_state(ReminderState::with_reminders([due(1)]))
            .when_action(ReminderAction::AddReminder { reminder: due(1) })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.last_error, Some(ReminderError::DuplicateId(rid(1))));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_toggle_stamps_done_at() {
        let now = test_clock().now();

        ReducerTest::new(ReminderReducer::new())
            .with_env(create_test_env())
            .given_state(ReminderState::with_reminders([due(1), due(2)]))
            .when_action(ReminderAction::ToggleDone { id: rid(1) })
            .then_state(move |state| {
                let reminder = state.get(&rid(1)).unwrap();
                assert!(reminder.is_done);
                assert_eq!(reminder.done_at, Some(now));
            })
            .then_effects(|effects| {
                assert_eq!(
                    assertions::dispatched_actions(effects),
                    status_change(
                        HeaderStatus::InProgress { remaining: 2 },
                        HeaderStatus::InProgress { remaining: 1 }
                    )
                );
            })
            .run();
    }

    #[test]
    fn test_toggle_twice_is_involution() {
        ReducerTest::new(ReminderReducer::new())
            .with_env(create_test_env())
            .given_state(ReminderState::with_reminders([due(1)]))
            .when_action(ReminderAction::ToggleDone { id: rid(1) })
            .when_action(ReminderAction::ToggleDone { id: rid(1) })
            .then_state(|state| {
                let reminder = state.get(&rid(1)).unwrap();
                assert!(!reminder.is_done);
                assert_eq!(reminder.done_at, None);
            })
            .then_effects(|effects| {
                assert_eq!(
                    assertions::dispatched_actions(effects),
                    vec![
                        ReminderAction::StatusChanged {
                            from: HeaderStatus::InProgress { remaining: 1 },
                            to: HeaderStatus::AllComplete,
                        },
                        ReminderAction::StatusChanged {
                            from: HeaderStatus::AllComplete,
                            to: HeaderStatus::InProgress { remaining: 1 },
                        },
                    ]
                );
            })
            .run();
    }

    #[test]
    fn test_unknown_ids_are_silently_ignored() {
        let given = ReminderState::with_reminders([due(1)]);
        let expected = given.clone();

        ReducerTest::new(ReminderReducer::new())
            .with_env(create_test_env())
            .given_state(given)
            .when_action(ReminderAction::ToggleDone { id: rid(9) })
            .when_action(ReminderAction::DeleteReminder { id: rid(9) })
            .when_action(ReminderAction::UpdateReminder {
                id: rid(9),
                reminder: due(5),
            })
            .then_state(move |state| {
                assert_eq!(*state, expected);
                assert!(state.last_error.is_none());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_delete_reminder() {
        ReducerTest::new(ReminderReducer::new())
            .with_env(create_test_env())
            .given_state(ReminderState::with_reminders([due(1), due(2)]))
            .when_action(ReminderAction::DeleteReminder { id: rid(1) })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert!(!state.exists(&rid(1)));
            })
            .run();
    }

    #[test]
    fn test_delete_at_positions_out_of_range() {
        ReducerTest::new(ReminderReducer::new())
            .with_env(create_test_env())
            .given_state(ReminderState::with_reminders([due(1), due(2)]))
            .when_action(ReminderAction::DeleteAtPositions {
                view: ListView::DueToday,
                positions: vec![0, 5],
            })
            .then_state(|state| {
                assert_eq!(state.len(), 2);
                assert_eq!(
                    state.last_error,
                    Some(ReminderError::IndexOutOfRange { index: 5, len: 2 })
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_delete_at_positions_clears_previous_error() {
        let mut given = ReminderState::with_reminders([due(1), due(2)]);
        given.last_error = Some(ReminderError::BlankPlantName);

        ReducerTest::new(ReminderReducer::new())
            .with_env(create_test_env())
            .given_state(given)
            .when_action(ReminderAction::DeleteAtPositions {
                view: ListView::All,
                positions: vec![1],
            })
            .then_state(|state| {
                assert_eq!(state.snapshot(), vec![due(1)]);
                assert!(state.last_error.is_none());
            })
            .run();
    }

    #[test]
    fn test_update_keeps_id_and_done_flag_from_replacement() {
        let done_at = test_clock().now();
        let mut replacement = due(7);
        replacement.plant_name = "Fiddle Leaf".to_string();
        replacement.set_done(true, done_at);

        ReducerTest::new(ReminderReducer::new())
            .with_env(create_test_env())
            .given_state(ReminderState::with_reminders([due(1)]))
            .when_action(ReminderAction::UpdateReminder {
                id: rid(1),
                reminder: replacement,
            })
            .then_state(move |state| {
                assert_eq!(state.len(), 1);
                let stored = state.get(&rid(1)).unwrap();
                assert_eq!(stored.plant_name, "Fiddle Leaf");
                assert!(stored.is_done);
                assert_eq!(stored.done_at, Some(done_at));
                assert!(!state.exists(&rid(7)));
            })
            .then_effects(|effects| {
                assert_eq!(
                    assertions::dispatched_actions(effects),
                    status_change(
                        HeaderStatus::InProgress { remaining: 1 },
                        HeaderStatus::AllComplete
                    )
                );
            })
            .run();
    }

    #[test]
    fn test_replayed_add_with_existing_id_is_rejected() {
        ReducerTest::new(ReminderReducer::new())
            .with_env(create_test_env())
            .given_state(ReminderState::with_reminders([due(1)]))
            .when_action(ReminderAction::ReminderAdded { reminder: due(1) })
            .when_action(ReminderAction::ToggleDone { id: rid(1) })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert!(state.get(&rid(1)).unwrap().is_done);
                assert!(state.last_error.is_none());
            })
            .run();

        ReducerTest::new(ReminderReducer::new())
            .with_env(create_test_env())
            .given_state(ReminderState::with_reminders([due(1)]))
            .when_action(ReminderAction::ReminderAdded { reminder: due(1) })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.last_error, Some(ReminderError::DuplicateId(rid(1))));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_ignored_command_clears_previous_error() {
        ReducerTest::new(ReminderReducer::new())
            .with_env(create_test_env())
            .given_state(ReminderState::with_reminders([due(1)]))
            .when_action(ReminderAction::AddReminder {
                reminder: Reminder::new(" ", "Kitchen", "Full sun", "Every day", "20–50 ml"),
            })
            .when_action(ReminderAction::ToggleDone { id: rid(9) })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert!(state.last_error.is_none());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_seed_if_empty() {
        ReducerTest::new(ReminderReducer::new())
            .with_env(create_test_env())
            .given_state(ReminderState::new())
            .when_action(ReminderAction::SeedIfEmpty {
                reminders: sample_reminders(),
            })
            .when_action(ReminderAction::SeedIfEmpty {
                reminders: sample_reminders(),
            })
            .then_state(|state| assert_eq!(state.len(), 4))
            .then_effects(|effects| {
                assert_eq!(
                    assertions::dispatched_actions(effects),
                    status_change(
                        HeaderStatus::Empty,
                        HeaderStatus::InProgress { remaining: 4 }
                    )
                );
            })
            .run();
    }

    #[test]
    fn test_status_changed_is_inert() {
        let given = ReminderState::with_reminders([due(1)]);
        let expected = given.clone();

        ReducerTest::new(ReminderReducer::new())
            .with_env(create_test_env())
            .given_state(given)
            .when_action(ReminderAction::StatusChanged {
                from: HeaderStatus::Empty,
                to: HeaderStatus::AllComplete,
            })
            .then_state(move |state| assert_eq!(*state, expected))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_event_replay() {
        let now = test_clock().now();

        ReducerTest::new(ReminderReducer::new())
            .with_env(create_test_env())
            .given_state(ReminderState::new())
            .when_action(ReminderAction::ReminderAdded { reminder: due(1) })
            .when_action(ReminderAction::DoneToggled {
                id: rid(1),
                is_done: true,
                at: now,
            })
            .then_state(move |state| {
                let reminder = state.get(&rid(1)).unwrap();
                assert!(reminder.is_done);
                assert_eq!(reminder.done_at, Some(now));
            })
            .run();
    }
}
