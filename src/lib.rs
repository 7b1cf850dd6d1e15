//! HTTP service over a JSON-file-backed store of all-time basketball players
//! and generated drafts.

pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::store::Store;

/// Build the application router. Trailing slashes are part of the path
/// contract and registered verbatim.
pub fn app(store: Arc<Store>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "All-Time Legends API - v1.0" }))
        .route("/health", get(routes::health::health_check))
        // Player queries
        .route("/players", get(routes::players::get_players))
        .route("/players/{id}", get(routes::players::get_player_by_id))
        .route(
            "/players/position/{position}",
            get(routes::players::get_players_by_position),
        )
        .route(
            "/players/top-scorers/{top_n}",
            get(routes::players::get_top_scorers),
        )
        .route(
            "/players/top-assisters/{top_n}",
            get(routes::players::get_top_assisters),
        )
        .route(
            "/players/top-rebounders/{top_n}",
            get(routes::players::get_top_rebounders),
        )
        .route(
            "/players/championships/{min_championships}",
            get(routes::players::get_players_by_championships),
        )
        .route(
            "/players/team/{team_name}",
            get(routes::players::get_players_by_team),
        )
        .route(
            "/players/no-championships/",
            get(routes::players::get_players_without_championships),
        )
        .route(
            "/players/hall-of-fame/",
            get(routes::players::get_hall_of_fame_candidates),
        )
        .route(
            "/players/all-stars/{min_appearances}",
            get(routes::players::get_all_star_players),
        )
        // Player mutations
        .route(
            "/players/championships/add-championship/{id}",
            put(routes::players::add_championship),
        )
        .route(
            "/players/all-star/add-allstar/{id}",
            put(routes::players::add_allstar),
        )
        .route(
            "/players/change-team/{id}",
            put(routes::players::change_team),
        )
        .route(
            "/players/change-position/{id}",
            put(routes::players::change_position),
        )
        .route("/players/add-player/", post(routes::players::add_player))
        .route(
            "/players/delete/{id}",
            delete(routes::players::delete_player),
        )
        // Drafts
        .route("/drafts/", get(routes::drafts::get_drafts))
        .route("/team/random-draft/", post(routes::drafts::random_draft))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
