use async_trait::async_trait;
use aws_lambda_events::sqs::{SqsEvent, SqsMessage};
use forwarder::Forwarder;
use lambda_runtime::{Context, LambdaEvent};
use model::{ForwardError, KeyGenerator, MESSAGE_GROUP_ID};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Create a dummy SQS message with a set id and body
pub fn sqs_message(message_id: &str, body: &str) -> SqsMessage {
    SqsMessage {
        message_id: Some(message_id.to_string()),
        receipt_handle: None,
        body: Some(body.to_string()),
        md5_of_body: None,
        md5_of_message_attributes: None,
        attributes: Default::default(),
        message_attributes: Default::default(),
        event_source_arn: None,
        event_source: None,
        aws_region: None,
    }
}

/// Create a dummy SQS message carrying an explicit ordering key
pub fn sqs_message_in_group(message_id: &str, body: &str, group_id: &str) -> SqsMessage {
    let mut message: SqsMessage = sqs_message(message_id, body);
    message
        .attributes
        .insert(MESSAGE_GROUP_ID.to_string(), group_id.to_string());

    message
}

/// A well-formed record body targeting the given URL
pub fn body_for(url: &str) -> String {
    format!(r#"{{"url":"{url}","payload":{{"value":1}}}}"#)
}

/// Wrap records in the event shape the Lambda runtime delivers
pub fn sqs_lambda_event(records: Vec<SqsMessage>) -> LambdaEvent<SqsEvent> {
    LambdaEvent::new(SqsEvent { records }, Context::default())
}

/// Key generator yielding key-0, key-1, ... for deterministic tests
#[derive(Default)]
pub struct SequentialKeys {
    counter: AtomicUsize,
}

impl KeyGenerator for SequentialKeys {
    fn generate(&self) -> String {
        format!("key-{}", self.counter.fetch_add(1, Ordering::SeqCst))
    }
}

/// Outcome a `MockForwarder` is scripted to produce for one URL.
pub enum MockOutcome {
    Status(u16),
    TransportFailure,
}

/// A forwarder returning scripted outcomes per target URL and
/// recording every attempt in order. URLs without a scripted outcome
/// succeed with a 200.
#[derive(Default)]
pub struct MockForwarder {
    outcomes: HashMap<String, MockOutcome>,
    delays: HashMap<String, Duration>,
    attempts: Mutex<Vec<String>>,
}

impl MockForwarder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_outcome(mut self, url: &str, outcome: MockOutcome) -> Self {
        self.outcomes.insert(url.to_string(), outcome);
        self
    }

    /// Delay the response for one URL, to stagger group tasks
    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    /// Every URL attempted so far, in attempt order
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Forwarder for MockForwarder {
    async fn forward(&self, url: &str, _payload: &str) -> Result<u16, ForwardError> {
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }

        self.attempts.lock().unwrap().push(url.to_string());

        match self.outcomes.get(url) {
            Some(MockOutcome::Status(status)) => Ok(*status),
            Some(MockOutcome::TransportFailure) => {
                Err(ForwardError::Transport("connection refused".to_string()))
            }
            None => Ok(200),
        }
    }
}
