//! The status transition worker.
//!
//! Consumes status events from the queue and applies the corresponding
//! single-row write to the store. Also hosts the boundary scheduler that
//! enqueues events once a contest or challenge time window opens or closes.

pub mod config;
pub mod consumer;
pub mod scheduler;
pub mod transition;
