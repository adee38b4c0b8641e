use std::sync::Arc;

use common::StatusEvent;
use mq::{BroccoliError, BrokerMessage, Mq};
use sea_orm::DatabaseConnection;
use tracing::{error, info};

use crate::transition::apply_status_event;

/// Consume status events until the queue connection fails or the process
/// shuts down.
///
/// One event at a time: the writes are independent single-row updates, so
/// no intra-process coordination is needed, and sequential consumption
/// keeps per-producer order. Returning `Err` from the handler leaves the
/// event unacknowledged, so the queue redelivers it under its default
/// retry policy; there is deliberately no backoff or dead-letter step.
pub async fn consume_status_events(db: DatabaseConnection, mq: Arc<Mq>, queue_name: String) {
    info!(queue = %queue_name, "Starting status event consumer");

    let result = mq
        .process_messages(
            &queue_name,
            None, // single consumer
            None,
            move |message: BrokerMessage<StatusEvent>| {
                let db = db.clone();
                async move {
                    let event = message.payload;

                    match apply_status_event(&db, &event).await {
                        Ok(outcome) => {
                            info!(
                                event_id = %event.id,
                                kind = %event.name,
                                outcome = ?outcome,
                                "Status event processed"
                            );
                            Ok(())
                        }
                        Err(e) => {
                            error!(
                                event_id = %event.id,
                                kind = %event.name,
                                error = %e,
                                "Failed to apply status event, leaving unacknowledged"
                            );
                            Err(BroccoliError::Job(e.to_string()))
                        }
                    }
                }
            },
        )
        .await;

    if let Err(e) = result {
        error!(error = %e, "Status event consumer stopped unexpectedly");
    }
}
