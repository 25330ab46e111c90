use std::sync::Arc;

use lambda_http::{run, service_fn, Error, Request};
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use posts_api::{handle_event, AppState, Config, DynamoPostStore, PostStore};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = Config::from_env();
    let store: Option<Arc<dyn PostStore>> = match &config.table_name {
        Some(table) => Some(Arc::new(DynamoPostStore::from_env(table.clone()).await)),
        None => {
            warn!("TABLE_NAME is not set; store-backed routes will report a misconfigured server");
            None
        }
    };

    let state = AppState::new(config, store);
    let state_ref = &state;

    run(service_fn(|event: Request| async move {
        handle_event(state_ref, event).await
    }))
    .await
}

/// JSON logs on stdout for CloudWatch, filter taken from `RUST_LOG` when
/// set.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().json().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
