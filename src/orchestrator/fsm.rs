use crate::{Error, Result};
use tracing::{debug, info, warn};

// Action states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    Validating,
    Busy,
}

// Action events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEvent {
    Submit,
    InputRejected,
    InputAccepted,
    RequestSucceeded,
    RequestFailed,
}

/// Lifecycle of one user action. Every path ends back in `Idle`.
#[derive(Debug)]
pub struct ActionStateMachine {
    state: ActionState,
}

impl Default for ActionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionStateMachine {
    pub fn new() -> Self {
        Self {
            state: ActionState::Idle,
        }
    }

    pub fn current_state(&self) -> ActionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == ActionState::Idle
    }

    pub fn transition(&mut self, event: ActionEvent) -> Result<ActionState> {
        let old_state = self.state;
        debug!("FSM processing event {:?} in state {:?}", event, old_state);

        let new_state = match (old_state, event) {
            (ActionState::Idle, ActionEvent::Submit) => ActionState::Validating,
            (ActionState::Validating, ActionEvent::InputRejected) => ActionState::Idle,
            (ActionState::Validating, ActionEvent::InputAccepted) => ActionState::Busy,
            (ActionState::Busy, ActionEvent::RequestSucceeded) => ActionState::Idle,
            (ActionState::Busy, ActionEvent::RequestFailed) => ActionState::Idle,
            _ => {
                warn!(
                    "Invalid FSM transition from {:?} with event {:?}",
                    old_state, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", old_state),
                    requested: format!("{:?}", event),
                });
            }
        };

        info!(
            "FSM state transition: {:?} -> {:?} (event: {:?})",
            old_state, new_state, event
        );

        self.state = new_state;
        Ok(new_state)
    }

    /// Forces the machine back to `Idle`, used when an in-flight action is
    /// abandoned before it reaches a terminal event.
    pub fn reset(&mut self) {
        if self.state != ActionState::Idle {
            warn!("FSM reset from {:?} to Idle", self.state);
            self.state = ActionState::Idle;
        }
    }
}
