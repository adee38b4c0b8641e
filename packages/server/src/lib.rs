pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;

use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::CorsLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Podium Contest Platform API",
        version = "1.0.0",
        description = "API for the Podium contest platform"
    ),
    paths(
        handlers::auth::magic_login,
        handlers::auth::callback,
        handlers::auth::me,
        handlers::auth::set_username,
        handlers::contest::list_contests,
        handlers::contest::get_contest,
        handlers::admin::create_contest,
        handlers::admin::list_own_contests,
        handlers::admin::update_contest,
        handlers::admin::delete_contest,
        handlers::admin::create_challenge,
        handlers::admin::get_challenge,
        handlers::admin::update_challenge,
        handlers::admin::delete_challenge,
        handlers::admin::list_submissions,
        handlers::leaderboard::get_leaderboard,
    ),
    tags(
        (name = "Auth", description = "Magic-link authentication and profile"),
        (name = "Contests", description = "Public contest views"),
        (name = "Admin", description = "Contest and challenge management"),
        (name = "Leaderboard", description = "Contest standings"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// CORS from configuration. Credentials are always allowed because the
/// session rides in a cookie, which rules out a wildcard origin.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::error!(origin = %origin, "Invalid CORS origin, skipping");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(config.max_age))
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);

    axum::Router::new()
        .nest("/api", routes::api_routes())
        .with_state(state)
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .layer(cors)
}
