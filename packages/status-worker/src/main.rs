use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use status_worker::config::WorkerAppConfig;
use status_worker::consumer::consume_status_events;
use status_worker::scheduler::run_boundary_scheduler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = WorkerAppConfig::load().context("Failed to load config")?;

    let db = store::database::connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    let mq = Arc::new(
        mq::connect(mq::MqConfig {
            url: config.mq.url.clone(),
            pool_size: config.mq.pool_size,
        })
        .await
        .context("Failed to initialize MQ")?,
    );

    info!(
        queue = %config.mq.status_queue_name,
        scheduler_enabled = config.scheduler.enabled,
        "Status worker starting"
    );

    let scheduler_handle = config.scheduler.enabled.then(|| {
        tokio::spawn(run_boundary_scheduler(
            db.clone(),
            Arc::clone(&mq),
            config.mq.status_queue_name.clone(),
            config.scheduler.interval(),
        ))
    });

    tokio::select! {
        () = consume_status_events(db, Arc::clone(&mq), config.mq.status_queue_name.clone()) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, draining status consumer");
        }
    }

    if let Some(handle) = scheduler_handle {
        handle.abort();
    }

    Ok(())
}
