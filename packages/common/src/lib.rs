pub mod config;
pub mod contest_status;
pub mod status_event;
pub mod user_role;

pub use contest_status::ContestStatus;
pub use status_event::{StatusEvent, StatusEventData, StatusEventError, StatusEventKind};
pub use user_role::UserRole;
