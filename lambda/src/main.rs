use aws_lambda_events::sqs::SqsEvent;
use forwarder::HttpForwarder;
use lambda_runtime::{service_fn, tracing, Error, LambdaEvent};
use model::UuidKeys;
use processor::handle_batch;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    tracing::info!("Beginning execution");

    // One client and key source for the lifetime of the environment
    let forwarder: HttpForwarder = HttpForwarder::new();
    let keys: UuidKeys = UuidKeys;

    lambda_runtime::run(service_fn(|event: LambdaEvent<SqsEvent>| {
        handle_batch(event, &forwarder, &keys)
    }))
    .await
}
