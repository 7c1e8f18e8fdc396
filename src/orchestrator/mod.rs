mod executor;
pub mod fsm;

pub use executor::{Orchestrator, Outcome};
pub use fsm::{ActionEvent, ActionState, ActionStateMachine};
