pub mod admin;
pub mod auth;
pub mod contest;
pub mod leaderboard;
