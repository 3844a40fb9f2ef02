/// Optimistic mutation state machine
///
/// A mutated entity moves through an explicit lifecycle instead of
/// exception-driven control flow:
///
/// ```text
/// Idle -> Pending { optimistic, rollback } -> Committed | RolledBack
/// ```
///
/// The caller applies a change locally (Pending shows the optimistic
/// value), issues the persistence call, and settles the mutation from
/// that call's `Result`: Ok commits the confirmed value, Err reverts to
/// the value held for rollback. There is no retry policy; a failed
/// persistence call surfaces as a rollback, and starting over is the
/// caller's decision.
///
/// # Example
///
/// ```
/// use cadence_shared::mutation::Mutation;
///
/// let mut history = Mutation::new(vec!["2024-01-01".to_string()]);
///
/// // Show the toggled history immediately.
/// let optimistic = vec!["2024-01-01".to_string(), "2024-01-02".to_string()];
/// history.begin(optimistic.clone());
/// assert_eq!(history.visible(), &optimistic);
///
/// // Persistence failed: the old value comes back.
/// history.settle(Err::<Vec<String>, _>("io error"));
/// assert_eq!(history.visible(), &vec!["2024-01-01".to_string()]);
/// ```

/// Lifecycle of one in-flight mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationState {
    /// No mutation in flight
    Idle,

    /// Optimistic value applied locally, persistence outcome unknown
    Pending,

    /// Persistence confirmed the value
    Committed,

    /// Persistence failed; the previous value was restored
    RolledBack,
}

/// An entity value tracked through optimistic updates
///
/// `T` is the entity state the UI renders (a habit's history, a todo's
/// fields). The machine owns the currently visible value plus, while
/// Pending, the known-good value to fall back to.
#[derive(Debug, Clone)]
pub struct Mutation<T> {
    value: T,
    rollback: Option<T>,
    state: MutationState,
}

impl<T: Clone> Mutation<T> {
    /// Starts tracking an entity at its last known-good value
    pub fn new(value: T) -> Self {
        Self {
            value,
            rollback: None,
            state: MutationState::Idle,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> &MutationState {
        &self.state
    }

    /// The value a UI should display right now
    ///
    /// Idle/Committed: the confirmed value. Pending: the optimistic
    /// value. RolledBack: the restored previous value.
    pub fn visible(&self) -> &T {
        &self.value
    }

    /// Applies an optimistic value and enters Pending
    ///
    /// The previous visible value is retained for rollback. Beginning a
    /// new mutation while one is already Pending replaces the optimistic
    /// value but keeps the original rollback point, so a later failure
    /// restores the last value persistence actually confirmed.
    pub fn begin(&mut self, optimistic: T) {
        if self.rollback.is_none() {
            self.rollback = Some(self.value.clone());
        }
        self.value = optimistic;
        self.state = MutationState::Pending;
    }

    /// Settles a Pending mutation from the persistence call's result
    ///
    /// On Ok the confirmed value (which may differ from the optimistic
    /// one, e.g. server-normalized) becomes visible and the state is
    /// Committed. On Err the rollback value is restored and the state is
    /// RolledBack. Settling while not Pending is a no-op: there is
    /// nothing in flight to resolve.
    pub fn settle<E>(&mut self, result: Result<T, E>) {
        if self.state != MutationState::Pending {
            return;
        }
        match result {
            Ok(confirmed) => {
                self.value = confirmed;
                self.rollback = None;
                self.state = MutationState::Committed;
            }
            Err(_) => {
                if let Some(previous) = self.rollback.take() {
                    self.value = previous;
                }
                self.state = MutationState::RolledBack;
            }
        }
    }
}
