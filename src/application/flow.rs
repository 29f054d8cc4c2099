use tokio::sync::watch;

pub const CLOSE_CONFIRMATION_MESSAGE: &str =
    "El pago está en proceso. ¿Estás seguro de que quieres salir?";

/// Where a submission currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    Validating,
    Simulating,
    Notifying,
    Success,
}

impl FlowState {
    /// Whether the form is being checked or the steps are still running.
    ///
    /// `Notifying` does not count; the success modal is already showing by then.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, FlowState::Validating | FlowState::Simulating)
    }
}

/// Owner side of the flow state; the controller holds the only one.
#[derive(Debug)]
pub struct FlowTracker {
    tx: watch::Sender<FlowState>,
}

impl Default for FlowTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FlowState::Idle);
        Self { tx }
    }

    pub fn current(&self) -> FlowState {
        *self.tx.borrow()
    }

    pub fn set(&self, state: FlowState) {
        let previous = self.tx.send_replace(state);
        if previous != state {
            tracing::debug!(from = ?previous, to = ?state, "checkout flow transition");
        }
    }

    /// Moves to `Validating` unless a payment is already running.
    pub fn try_begin(&self) -> bool {
        self.tx.send_if_modified(|state| {
            if state.is_in_progress() {
                false
            } else {
                *state = FlowState::Validating;
                true
            }
        })
    }

    /// Moves `from` to `to`, unless another submission has changed the state since.
    pub fn advance(&self, from: FlowState, to: FlowState) -> bool {
        let moved = self.tx.send_if_modified(|state| {
            if *state == from {
                *state = to;
                true
            } else {
                false
            }
        });
        if moved {
            tracing::debug!(from = ?from, to = ?to, "checkout flow transition");
        }
        moved
    }

    pub fn subscribe(&self) -> watch::Receiver<FlowState> {
        self.tx.subscribe()
    }

    pub fn close_guard(&self) -> CloseGuard {
        CloseGuard {
            rx: self.subscribe(),
        }
    }
}

/// Answers the host's "may the window close?" question.
#[derive(Debug, Clone)]
pub struct CloseGuard {
    rx: watch::Receiver<FlowState>,
}

impl CloseGuard {
    /// The confirmation prompt to show, or `None` if closing is harmless.
    pub fn before_unload(&self) -> Option<&'static str> {
        self.rx
            .borrow()
            .is_in_progress()
            .then_some(CLOSE_CONFIRMATION_MESSAGE)
    }

    pub fn state(&self) -> FlowState {
        *self.rx.borrow()
    }
}
