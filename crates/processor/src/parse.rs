use aws_lambda_events::sqs::SqsMessage;
use lambda_runtime::tracing;
use model::{ForwardError, MessageBody, ParsedMessage};

/// Decode one raw record into a `ParsedMessage`.
///
/// The body must be a JSON object with a `url` and a `payload`; the
/// payload itself is carried through untouched. The resolved group id
/// comes from the partitioner, since keyless records have a generated
/// one not present on the record.
pub fn parse_message(record: &SqsMessage, group_id: &str) -> Result<ParsedMessage, ForwardError> {
    let message_id: String = record.message_id.clone().unwrap_or_default();
    let raw_body: &str = record.body.as_deref().unwrap_or_default();

    let body: MessageBody =
        serde_json::from_str(raw_body).map_err(|err| ForwardError::MalformedBody(err.to_string()))?;

    tracing::debug!("Parsed message [{message_id}] targeting {}", body.url);

    Ok(ParsedMessage {
        message_id,
        body,
        attributes: record.attributes.clone(),
        message_attributes: record.message_attributes.clone(),
        group_id: group_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{sqs_message, sqs_message_in_group};

    #[test]
    fn parses_url_and_payload() {
        let record: SqsMessage = sqs_message(
            "m1",
            r#"{"url":"https://api.test/hook","payload":{"order":42,"items":["a","b"]}}"#,
        );

        let message: ParsedMessage = parse_message(&record, "g1").unwrap();

        assert_eq!("m1", message.message_id);
        assert_eq!("https://api.test/hook", message.body.url);
        assert_eq!("g1", message.group_id);
    }

    #[test]
    fn payload_passes_through_verbatim() {
        let record: SqsMessage = sqs_message(
            "m1",
            r#"{"url":"https://api.test/hook","payload":{"nested":{"a":[1,2,3]},"b":null}}"#,
        );

        let message: ParsedMessage = parse_message(&record, "g1").unwrap();

        assert_eq!(r#"{"nested":{"a":[1,2,3]},"b":null}"#, message.body.payload.get());
    }

    #[test]
    fn copies_group_attribute_map() {
        let record: SqsMessage =
            sqs_message_in_group("m1", r#"{"url":"https://api.test","payload":1}"#, "g1");

        let message: ParsedMessage = parse_message(&record, "g1").unwrap();

        assert_eq!("g1", message.attributes[model::MESSAGE_GROUP_ID]);
    }

    #[test]
    fn invalid_json_is_malformed() {
        let record: SqsMessage = sqs_message("m1", "not json at all");

        let result = parse_message(&record, "g1");

        assert!(matches!(result, Err(ForwardError::MalformedBody(_))));
    }

    #[test]
    fn missing_url_is_malformed() {
        let record: SqsMessage = sqs_message("m1", r#"{"payload":{"order":42}}"#);

        let result = parse_message(&record, "g1");

        assert!(matches!(result, Err(ForwardError::MalformedBody(_))));
    }

    #[test]
    fn missing_payload_is_malformed() {
        let record: SqsMessage = sqs_message("m1", r#"{"url":"https://api.test"}"#);

        let result = parse_message(&record, "g1");

        assert!(matches!(result, Err(ForwardError::MalformedBody(_))));
    }

    #[test]
    fn empty_body_is_malformed() {
        let mut record: SqsMessage = sqs_message("m1", "");
        record.body = None;

        let result = parse_message(&record, "g1");

        assert!(matches!(result, Err(ForwardError::MalformedBody(_))));
    }
}
