use aws_lambda_events::sqs::SqsMessageAttribute;
use serde::Deserialize;
use serde_json::value::RawValue;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

pub mod keys;

pub use keys::{KeyGenerator, UuidKeys};

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Attribute carrying the ordering key on records from a FIFO queue.
/// Records from a standard queue do not have it.
pub const MESSAGE_GROUP_ID: &str = "MessageGroupID";

/// The expected shape of a record body: where to deliver, and what.
/// The payload is kept raw so it reaches the target byte-for-byte.
#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub url: String,
    pub payload: Box<RawValue>,
}

/// Decoded form of one SQS record, resolved to its ordering group.
/// Never mutated after parsing.
#[derive(Debug)]
pub struct ParsedMessage {
    pub message_id: String,
    pub body: MessageBody,
    pub attributes: HashMap<String, String>,
    pub message_attributes: HashMap<String, SqsMessageAttribute>,
    pub group_id: String,
}

/// Failure kinds for a single message.
///
/// A response carrying an error status is not a `ForwardError`; the
/// forwarder hands the status back and the group worker folds it into
/// the same retry outcome.
#[derive(Debug)]
pub enum ForwardError {
    // The record body was not the expected {url, payload} shape
    MalformedBody(String),
    // The request could not be sent or no response was received
    Transport(String),
}

impl Display for ForwardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(format!("{:?}", self).as_str())
    }
}

impl std::error::Error for ForwardError {}
