use aws_lambda_events::sqs::{BatchItemFailure, SqsBatchResponse, SqsEvent, SqsMessage};
use forwarder::Forwarder;
use lambda_runtime::tracing::{Instrument, Span};
use lambda_runtime::{tracing, Error, LambdaEvent};
use model::KeyGenerator;
use std::collections::HashMap;

use crate::partition::group_by_message_group;
use crate::worker::process_group;

/// Handle one SQS batch: fan out a worker per message group, join them
/// all, and report the failed message ids for selective redelivery.
///
/// Groups run in parallel with respect to each other; each group's own
/// records run strictly in order inside its worker. The join is a
/// barrier, not a race, so every group finishes before the response is
/// built. The invocation itself always succeeds; failures travel in
/// the batch response, and the queue only redelivers the ids named
/// there. The function *must* have `ReportBatchItemFailures` set.
pub async fn handle_batch(
    event: LambdaEvent<SqsEvent>,
    forwarder: &dyn Forwarder,
    keys: &dyn KeyGenerator,
) -> Result<SqsBatchResponse, Error> {
    let records: Vec<SqsMessage> = event.payload.records;

    tracing::info!("Handling batch of [{}] from SQS", records.len());

    let groups: HashMap<String, Vec<SqsMessage>> = group_by_message_group(records, keys);

    // Start a task for each message group
    let tasks: Vec<_> = groups
        .into_iter()
        .map(|(group_id, group_records)| {
            let group_span: Span = tracing::span!(tracing::Level::INFO, "Group", group_id);

            async move { process_group(&group_id, group_records, forwarder, keys).await }
                .instrument(group_span)
        })
        .collect();

    // Process all groups concurrently, waiting for every one
    let results: Vec<Vec<String>> = futures::future::join_all(tasks).await;

    let batch_item_failures: Vec<BatchItemFailure> = results
        .into_iter()
        .flatten()
        .map(|id| BatchItemFailure {
            item_identifier: id,
        })
        .collect();

    Ok(SqsBatchResponse {
        batch_item_failures,
    })
}
