use aws_lambda_events::sqs::SqsMessage;
use model::{KeyGenerator, MESSAGE_GROUP_ID};
use std::collections::HashMap;

/// Partition a batch by `MessageGroupID`, preserving each record's
/// relative order within its group.
///
/// Records without the attribute each get a generated key, so they
/// form singleton groups with no ordering relationship to anything
/// else in the batch.
pub fn group_by_message_group(
    records: Vec<SqsMessage>,
    keys: &dyn KeyGenerator,
) -> HashMap<String, Vec<SqsMessage>> {
    let mut groups: HashMap<String, Vec<SqsMessage>> = HashMap::new();

    for record in records {
        let group_id: String = match record.attributes.get(MESSAGE_GROUP_ID) {
            Some(group_id) => group_id.clone(),
            None => keys.generate(),
        };

        groups.entry(group_id).or_default().push(record);
    }

    groups
}
