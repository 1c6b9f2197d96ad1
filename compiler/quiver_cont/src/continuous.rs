//! Continuous values over host closures.

use std::fmt;
use std::sync::Arc;

/// A continuation: the next state from the current state and an event.
pub type Continuation<S, E> = Arc<dyn Fn(&S, &E) -> S + Send + Sync>;

/// A state paired with the continuation that advances it.
///
/// Applying events never mutates a value; it returns a new one sharing the
/// same continuation.
pub struct ContinuousValue<S, E> {
    state: S,
    continuation: Continuation<S, E>,
}

impl<S, E> ContinuousValue<S, E> {
    pub fn new(state: S, continuation: impl Fn(&S, &E) -> S + Send + Sync + 'static) -> Self {
        Self::from_continuation(state, Arc::new(continuation))
    }

    pub fn from_continuation(state: S, continuation: Continuation<S, E>) -> Self {
        ContinuousValue {
            state,
            continuation,
        }
    }

    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn continuation(&self) -> &Continuation<S, E> {
        &self.continuation
    }

    /// The value after `event`.
    #[must_use]
    pub fn apply_event(&self, event: &E) -> Self {
        ContinuousValue {
            state: (self.continuation)(&self.state, event),
            continuation: Arc::clone(&self.continuation),
        }
    }

    /// The value after each of `events`, in order. No events leaves the
    /// state unchanged.
    #[must_use]
    pub fn apply_events<'e>(&self, events: impl IntoIterator<Item = &'e E>) -> Self
    where
        S: Clone,
        E: 'e,
    {
        let state = events
            .into_iter()
            .fold(self.state.clone(), |state, event| {
                (self.continuation)(&state, event)
            });
        ContinuousValue {
            state,
            continuation: Arc::clone(&self.continuation),
        }
    }

    /// State after applying `events`.
    pub fn final_value<'e>(&self, events: impl IntoIterator<Item = &'e E>) -> S
    where
        S: Clone,
        E: 'e,
    {
        self.apply_events(events).state
    }

    /// Take the state, dropping the continuation.
    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S: Clone, E> Clone for ContinuousValue<S, E> {
    fn clone(&self) -> Self {
        ContinuousValue {
            state: self.state.clone(),
            continuation: Arc::clone(&self.continuation),
        }
    }
}

impl<S: fmt::Debug, E> fmt::Debug for ContinuousValue<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContinuousValue")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
