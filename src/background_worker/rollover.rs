use std::{sync::Arc, time::Duration};

use anyhow::Result;
use chrono::Utc;
use tracing::{error, info};

use crate::application::usecases::subscriptions::SubscriptionUseCase;

/// Periodically renews or expires subscriptions whose billing period has ended.
pub async fn run_rollover_loop(usecase: Arc<SubscriptionUseCase>, interval: Duration) -> Result<()> {
    info!(
        interval_secs = interval.as_secs(),
        "rollover worker: started"
    );

    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;

        let today = Utc::now().date_naive();
        if let Err(e) = usecase.rollover(today).await {
            error!(%today, error = ?e, "rollover worker: pass failed");
        }
    }
}
