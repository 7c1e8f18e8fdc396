use async_trait::async_trait;
use idea_forge::{
    Error, Result,
    client::{GenerationRequest, RawResponse, Transport},
    error::TransportFailureKind,
    presentation::{DisplayStyle, PresentationSink},
};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Mock transport for testing
#[derive(Debug)]
pub struct MockTransport {
    pub responses: Arc<Mutex<Vec<RawResponse>>>,
    pub requests: Arc<Mutex<Vec<GenerationRequest>>>,
    pub failure: Option<(TransportFailureKind, String)>,
    pub gate: Option<Arc<Notify>>,
    pub hang: bool,
    pub port: Option<u16>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            gate: None,
            hang: false,
            port: Some(5000),
        }
    }

    pub fn with_response(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(RawResponse::new(status, body));
        self
    }

    pub fn with_failure(mut self, kind: TransportFailureKind, message: &str) -> Self {
        self.failure = Some((kind, message.to_string()));
        self
    }

    /// Holds every request until the gate is notified.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Never answers.
    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub fn requests_handle(&self) -> Arc<Mutex<Vec<GenerationRequest>>> {
        self.requests.clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &GenerationRequest) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(request.clone());

        if self.hang {
            std::future::pending::<()>().await;
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if let Some((kind, message)) = &self.failure {
            return Err(Error::transport(*kind, message.clone()));
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::internal("No more mock responses available"));
        }

        Ok(responses.remove(0))
    }

    fn endpoint_port(&self) -> Option<u16> {
        self.port
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Text(String),
    Style(DisplayStyle),
    Busy(bool),
}

/// Presentation sink that records every call
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last_text(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|event| match event {
            SinkEvent::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn last_style(&self) -> Option<DisplayStyle> {
        self.events().into_iter().rev().find_map(|event| match event {
            SinkEvent::Style(style) => Some(style),
            _ => None,
        })
    }

    pub fn is_busy(&self) -> bool {
        self.events()
            .into_iter()
            .rev()
            .find_map(|event| match event {
                SinkEvent::Busy(busy) => Some(busy),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl PresentationSink for RecordingSink {
    fn show_text(&self, text: &str) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Text(text.to_string()));
    }

    fn set_style(&self, style: DisplayStyle) {
        self.events.lock().unwrap().push(SinkEvent::Style(style));
    }

    fn set_busy(&self, busy: bool) {
        self.events.lock().unwrap().push(SinkEvent::Busy(busy));
    }
}
