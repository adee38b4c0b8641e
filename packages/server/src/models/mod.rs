pub mod auth;
pub mod challenge;
pub mod contest;
pub mod leaderboard;
pub mod shared;
pub mod submission;
