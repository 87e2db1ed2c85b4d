//! # My Plants Runtime
//!
//! The [`Store`] owns a state value and is its only writer. Callers send
//! actions, the store runs them through the reducer, feeds dispatched effects
//! back in and announces every reduced action to subscribers. Reads go through
//! a closure so the lock is released promptly.
//!
//! ## Example
//!
//! ```ignore
//! use my_plants_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! store.send(Action::DoSomething).await?;
//! let value = store.state(|s| s.some_field).await;
//! ```

use my_plants_core::reducer::Reducer;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Effects kept dispatching actions past the configured limit
        #[error("Feedback limit of {0} actions exceeded for a single send")]
        FeedbackLimitExceeded(usize),

        /// The action broadcast channel closed
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;
pub use store::{Store, Subscription};

/// Configuration for a [`Store`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of actions buffered per subscriber before it starts lagging
    pub broadcast_capacity: usize,
    /// Upper bound on actions reduced for one `send`, including feedback
    pub max_feedback_actions: usize,
}

impl StoreConfig {
    /// Set the subscriber buffer size (clamped to at least 1)
    #[must_use]
    pub fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity.max(1);
        self
    }

    /// Set the feedback limit (clamped to at least 1)
    #[must_use]
    pub fn with_max_feedback_actions(mut self, limit: usize) -> Self {
        self.max_feedback_actions = limit.max(1);
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
            max_feedback_actions: 64,
        }
    }
}

/// Store module
pub mod store {
    use super::{
        broadcast, Arc, AtomicBool, Ordering, Reducer, RwLock, StoreConfig, StoreError, VecDeque,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// Cloning a store is cheap and every clone shares the same state. All
    /// mutation happens inside [`Store::send`] while the write lock is held,
    /// so there is exactly one logical writer no matter how many clones exist.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        config: StoreConfig,
        shutdown: Arc<AtomicBool>,
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + std::fmt::Debug + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with the default [`StoreConfig`]
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                config,
                shutdown: Arc::new(AtomicBool::new(false)),
                action_broadcast,
            }
        }

        /// Send an action through the reducer
        ///
        /// Actions dispatched by the returned effects are reduced before this
        /// call returns, in order, under the same write lock. Every reduced
        /// action (the original one included) is broadcast to subscribers.
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`] if [`Store::shutdown`] was called.
        /// - [`StoreError::FeedbackLimitExceeded`] if effects keep dispatching
        ///   past [`StoreConfig::max_feedback_actions`]. Actions reduced up to
        ///   that point stay applied.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                return Err(StoreError::ShutdownInProgress);
            }

            let mut state = self.state.write().await;
            let mut queue = VecDeque::from([action]);
            let mut reduced = 0_usize;

            while let Some(action) = queue.pop_front() {
                if reduced == self.config.max_feedback_actions {
                    tracing::error!(
                        limit = self.config.max_feedback_actions,
                        dropped = queue.len() + 1,
                        "Feedback limit exceeded"
                    );
                    return Err(StoreError::FeedbackLimitExceeded(
                        self.config.max_feedback_actions,
                    ));
                }
                reduced += 1;

                tracing::trace!(?action, "Reducing action");
                metrics::counter!("store.actions.total").increment(1);

                let effects = self
                    .reducer
                    .reduce(&mut *state, action.clone(), self.environment.as_ref());

                // No subscribers is not an error
                let _ = self.action_broadcast.send(action);

                for effect in effects {
                    queue.extend(effect.into_actions());
                }
            }

            tracing::debug!(reduced, "Action processing completed");
            Ok(())
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Subscribe to every action the store reduces from now on
        #[must_use]
        pub fn subscribe(&self) -> Subscription<A> {
            Subscription {
                receiver: self.action_broadcast.subscribe(),
            }
        }

        /// Stop accepting actions. Reads keep working.
        pub fn shutdown(&self) {
            tracing::info!("Store shutdown requested");
            self.shutdown.store(true, Ordering::Release);
        }

        /// Returns true once [`Store::shutdown`] has been called
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                config: self.config,
                shutdown: Arc::clone(&self.shutdown),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }

    /// Receiving side of [`Store::subscribe`]
    #[derive(Debug)]
    pub struct Subscription<A> {
        receiver: broadcast::Receiver<A>,
    }

    impl<A: Clone> Subscription<A> {
        /// Wait for the next reduced action
        ///
        /// A subscriber that falls behind skips the actions it missed and
        /// continues with the oldest one still buffered; it should re-read
        /// state rather than rely on seeing every action.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ChannelClosed`] once every store clone is dropped.
        pub async fn recv(&mut self) -> Result<A, StoreError> {
            loop {
                match self.receiver.recv().await {
                    Ok(action) => return Ok(action),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Subscriber lagged behind the store");
                    },
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(StoreError::ChannelClosed);
                    },
                }
            }
        }

        /// Take the next buffered action without waiting
        pub fn try_recv(&mut self) -> Option<A> {
            loop {
                match self.receiver.try_recv() {
                    Ok(action) => return Some(action),
                    Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Subscriber lagged behind the store");
                    },
                    Err(_) => return None,
                }
            }
        }
    }
}
