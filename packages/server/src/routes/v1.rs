use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/contests", contest_routes())
        .route("/admin/contests", get(handlers::admin::list_own_contests))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/magic-login", post(handlers::auth::magic_login))
        .route("/callback", get(handlers::auth::callback))
        .route("/me", get(handlers::auth::me))
        .route("/set-username", post(handlers::auth::set_username))
}

fn contest_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::contest::list_contests).post(handlers::admin::create_contest),
        )
        .route(
            "/{id}",
            get(handlers::contest::get_contest)
                .put(handlers::admin::update_contest)
                .delete(handlers::admin::delete_contest),
        )
        .route(
            "/{id}/challenges",
            post(handlers::admin::create_challenge),
        )
        .route(
            "/{id}/challenges/{challenge_id}",
            get(handlers::admin::get_challenge)
                .put(handlers::admin::update_challenge)
                .delete(handlers::admin::delete_challenge),
        )
        .route("/{id}/submissions", get(handlers::admin::list_submissions))
        .route(
            "/{id}/leaderboard",
            get(handlers::leaderboard::get_leaderboard),
        )
}
