use aws_lambda_events::sqs::SqsMessage;
use forwarder::Forwarder;
use lambda_runtime::tracing;
use lambda_runtime::tracing::{Instrument, Span};
use model::{KeyGenerator, ParsedMessage};

use crate::parse::parse_message;

/// Process one group's records strictly in order, stopping the group
/// at the first failure.
///
/// A failed record's id goes onto the returned list; the records after
/// it are skipped outright, not reported, so the queue redelivers from
/// the failed record onwards without reordering the group. Groups are
/// independent, so the caller merges these lists after all groups have
/// joined.
pub async fn process_group(
    group_id: &str,
    records: Vec<SqsMessage>,
    forwarder: &dyn Forwarder,
    keys: &dyn KeyGenerator,
) -> Vec<String> {
    tracing::info!("Processing group [{group_id}] with [{}] records", records.len());

    let mut failures: Vec<String> = Vec::new();

    for record in records {
        let message_id: String = record.message_id.clone().unwrap_or_default();
        let trace_id: String = keys.generate();

        let message_span: Span =
            tracing::span!(tracing::Level::INFO, "Message", trace_id, message_id);

        let delivered: bool = deliver(&record, group_id, forwarder)
            .instrument(message_span)
            .await;

        if !delivered {
            failures.push(message_id);
            break;
        }
    }

    failures
}

/// One record: parse, forward, classify. All three failure kinds end
/// up as `false`; the caller cannot tell them apart and does not need
/// to.
async fn deliver(record: &SqsMessage, group_id: &str, forwarder: &dyn Forwarder) -> bool {
    let message: ParsedMessage = match parse_message(record, group_id) {
        Ok(message) => message,
        Err(err) => {
            tracing::error!("Failed to parse message: {err}");
            return false;
        }
    };

    match forwarder
        .forward(&message.body.url, message.body.payload.get())
        .await
    {
        Ok(status) if status < 400 => {
            tracing::info!("Delivered message with status [{status}]");
            true
        }
        Ok(status) => {
            tracing::error!("Target rejected message with status [{status}]");
            false
        }
        Err(err) => {
            tracing::error!("Failed to reach target: {err}");
            false
        }
    }
}
