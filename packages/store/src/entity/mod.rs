pub mod challenge;
pub mod contest;
pub mod leaderboard;
pub mod submission;
pub mod user;
