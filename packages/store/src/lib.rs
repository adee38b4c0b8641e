//! The persistence layer shared by the HTTP server and the status worker.
//!
//! Entities live here (rather than inside the server) because two processes
//! touch the same tables: the server for CRUD, the worker for status writes.

pub mod database;
pub mod entity;
pub mod status;
