use super::fsm::{ActionEvent, ActionState, ActionStateMachine};
use crate::{
    Error, Result,
    client::{GenerationRequest, ReqwestTransport, Transport, classify_response},
    config::BackendConfig,
    presentation::{DisplayStyle, PresentationSink},
    validation::{self, ValidationError, ValidationResult},
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

/// How a single user action ended.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The input never left the client.
    Rejected(ValidationError),
    Generated(String),
    Failed(Error),
    /// Another action was still in flight.
    Ignored,
}

impl Outcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

pub struct Orchestrator {
    transport: Box<dyn Transport>,
    sink: Arc<dyn PresentationSink>,
    machine: Mutex<ActionStateMachine>,
}

impl Orchestrator {
    pub fn new(transport: Box<dyn Transport>, sink: Arc<dyn PresentationSink>) -> Self {
        Self {
            transport,
            sink,
            machine: Mutex::new(ActionStateMachine::new()),
        }
    }

    pub fn from_config(config: &BackendConfig, sink: Arc<dyn PresentationSink>) -> Result<Self> {
        info!("Initializing orchestrator for endpoint {}", config.endpoint);
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(Box::new(transport), sink))
    }

    pub fn state(&self) -> ActionState {
        self.machine().current_state()
    }

    /// Runs one user action: validate, request, display.
    ///
    /// A call made while another is still in flight is ignored and leaves
    /// the sink untouched.
    pub async fn submit(&self, raw: &str) -> Outcome {
        let span = info_span!("action", id = %Uuid::new_v4());
        self.run(raw).instrument(span).await
    }

    /// Sends an already validated topic and returns the generated idea.
    pub async fn generate(&self, topic: &str) -> Result<String> {
        let request = GenerationRequest {
            topic: topic.to_string(),
        };

        debug!("Sending request to backend with topic: {}", request.topic);

        let response = self
            .transport
            .send(&request)
            .await
            .map_err(|e| e.with_port(self.transport.endpoint_port()))?;

        let generated = classify_response(response)?;
        Ok(generated.idea)
    }

    async fn run(&self, raw: &str) -> Outcome {
        if let Err(e) = self.advance(ActionEvent::Submit) {
            debug!("Ignoring submit: {}", e);
            return Outcome::Ignored;
        }

        let topic = match validation::validate(raw) {
            ValidationResult::Valid { value } => value,
            ValidationResult::Invalid { reason } => {
                self.sink.show_text(&reason.to_string());
                self.sink.set_style(DisplayStyle::Error);
                self.settle(ActionEvent::InputRejected);
                return Outcome::Rejected(reason);
            }
        };

        if let Err(e) = self.advance(ActionEvent::InputAccepted) {
            self.machine().reset();
            return Outcome::Failed(e);
        }

        let mut in_flight = InFlight::start(self);

        match self.generate(&topic).await {
            Ok(idea) => {
                info!("Generated idea ({} chars)", idea.chars().count());
                self.sink.show_text(&idea);
                self.sink.set_style(DisplayStyle::Success);
                in_flight.finish(ActionEvent::RequestSucceeded);
                Outcome::Generated(idea)
            }
            Err(e) => {
                warn!("Error generating idea: {}", e);
                self.sink.show_text(&e.user_message());
                self.sink.set_style(DisplayStyle::Error);
                in_flight.finish(ActionEvent::RequestFailed);
                Outcome::Failed(e)
            }
        }
    }

    fn advance(&self, event: ActionEvent) -> Result<ActionState> {
        self.machine().transition(event)
    }

    /// Applies an event that must land in `Idle`, resetting if it does not.
    fn settle(&self, event: ActionEvent) {
        let mut machine = self.machine();
        if let Err(e) = machine.transition(event) {
            warn!("Could not settle action: {}", e);
            machine.reset();
        }
    }

    fn machine(&self) -> MutexGuard<'_, ActionStateMachine> {
        self.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Busy section of an action. Dropping it clears the busy indicator and
/// returns the machine to `Idle`, also when the future is cancelled.
struct InFlight<'a> {
    orchestrator: &'a Orchestrator,
    event: Option<ActionEvent>,
}

impl<'a> InFlight<'a> {
    fn start(orchestrator: &'a Orchestrator) -> Self {
        let sink = &orchestrator.sink;
        sink.set_style(DisplayStyle::Neutral);
        sink.set_busy(true);
        sink.show_text("");

        Self {
            orchestrator,
            event: None,
        }
    }

    fn finish(&mut self, event: ActionEvent) {
        self.event = Some(event);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.orchestrator.sink.set_busy(false);

        match self.event {
            Some(event) => self.orchestrator.settle(event),
            None => self.orchestrator.machine().reset(),
        }
    }
}
