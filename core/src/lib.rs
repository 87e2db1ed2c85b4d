//! # My Plants Core
//!
//! Primitives shared by the reminder store and its runtime.
//!
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: a description of follow-up work, executed by the runtime
//! - **Environment**: injected dependencies such as the [`environment::Clock`]
//!
//! State only ever changes inside a reducer, and a reducer only ever runs
//! inside the store's single writer. Everything the presentation layer shows
//! is derived from the state it reads back.

pub use chrono::{DateTime, Utc};
pub use smallvec::{smallvec, SmallVec};

/// Reducer trait - where all state transitions happen
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// Pure business logic over a state type.
    ///
    /// # Example
    ///
    /// ```
    /// use my_plants_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
    ///
    /// struct Tally;
    ///
    /// impl Reducer for Tally {
    ///     type State = u32;
    ///     type Action = u32;
    ///     type Environment = ();
    ///
    ///     fn reduce(&self, state: &mut u32, action: u32, _env: &()) -> SmallVec<[Effect<u32>; 4]> {
    ///         *state += action;
    ///         smallvec![Effect::None]
    ///     }
    /// }
    ///
    /// let mut total = 0;
    /// Tally.reduce(&mut total, 3, &());
    /// assert_eq!(total, 3);
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Apply `action` to `state` in place and describe any follow-up work.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect descriptions returned by reducers
pub mod effect {
    /// Follow-up work requested by a reducer.
    ///
    /// Effects are values. The runtime decides when and how to run them.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Effect<Action> {
        /// Nothing to do
        None,

        /// Feed an action back into the reducer and announce it to subscribers
        Dispatch(Action),

        /// Run effects one after another
        Sequential(Vec<Effect<Action>>),
    }

    impl<Action> Effect<Action> {
        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Self {
            Self::Sequential(effects)
        }

        /// Returns true if this effect does no work at all
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Self::None => true,
                Self::Dispatch(_) => false,
                Self::Sequential(effects) => effects.iter().all(Self::is_none),
            }
        }

        /// Flattens the effect into the actions it dispatches, in order
        #[must_use]
        pub fn into_actions(self) -> Vec<Action> {
            match self {
                Self::None => Vec::new(),
                Self::Dispatch(action) => vec![action],
                Self::Sequential(effects) => {
                    effects.into_iter().flat_map(Self::into_actions).collect()
                },
            }
        }
    }
}

/// Environment module - dependency injection traits
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time so reducers stay deterministic under test
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
