use std::sync::Arc;

use apigw_bridge::config::AdapterConfig;
use apigw_bridge::handler::{Bridge, function_handler};
use apigw_bridge::kernel::ForwardingKernel;
use lambda_runtime::{Error, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Use Lambda runtime's built-in tracing subscriber for CloudWatch Logs
    lambda_runtime::tracing::init_default_subscriber();

    let config = AdapterConfig::from_env()?;
    let kernel = ForwardingKernel::from_config(&config)?;
    let bridge = Arc::new(Bridge::new(config, kernel));

    lambda_runtime::run(service_fn(move |event| {
        let bridge = Arc::clone(&bridge);
        async move { function_handler(event, &bridge).await }
    }))
    .await
}
