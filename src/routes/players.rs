use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::models::{
    AllStarsResponse, ChampionshipFilterResponse, HallOfFameResponse, Lookup, MessageResponse,
    MutationResponse, NewPlayer, NoChampionshipsResponse, Player, Position, Team,
    TeamFilterResponse, TopAssistersResponse, TopReboundersResponse, TopScorersResponse,
};
use crate::store::Store;

// GET /players - List all players
pub async fn get_players(State(store): State<Arc<Store>>) -> Json<Vec<Player>> {
    Json(store.players().await)
}

// GET /players/:id - Get player by ID, or a 200 not-found marker
pub async fn get_player_by_id(
    State(store): State<Arc<Store>>,
    Path(player_id): Path<u64>,
) -> Json<Lookup<Player>> {
    match store.player_by_id(player_id).await {
        Some(player) => Json(Lookup::Found(player)),
        None => Json(Lookup::missing("Player not found")),
    }
}

// GET /players/position/:position - Filter by position
pub async fn get_players_by_position(
    State(store): State<Arc<Store>>,
    Path(position): Path<Position>,
) -> Json<Lookup<Vec<Player>>> {
    let players = store.players_by_position(position).await;
    if players.is_empty() {
        return Json(Lookup::missing("No players found for this position"));
    }
    Json(Lookup::Found(players))
}

// GET /players/top-scorers/:top_n - Top N by points per game
pub async fn get_top_scorers(
    State(store): State<Arc<Store>>,
    Path(top_n): Path<i64>,
) -> Json<TopScorersResponse> {
    Json(TopScorersResponse {
        top_scorers: store.top_scorers(top_n).await,
    })
}

// GET /players/top-assisters/:top_n - Top N by assists per game
pub async fn get_top_assisters(
    State(store): State<Arc<Store>>,
    Path(top_n): Path<i64>,
) -> Json<TopAssistersResponse> {
    Json(TopAssistersResponse {
        top_assisters: store.top_assisters(top_n).await,
    })
}

// GET /players/top-rebounders/:top_n - Top N by rebounds per game
pub async fn get_top_rebounders(
    State(store): State<Arc<Store>>,
    Path(top_n): Path<i64>,
) -> Json<TopReboundersResponse> {
    Json(TopReboundersResponse {
        top_rebounders: store.top_rebounders(top_n).await,
    })
}

// GET /players/championships/:min - Players with at least N championships
pub async fn get_players_by_championships(
    State(store): State<Arc<Store>>,
    Path(min_championships): Path<i64>,
) -> Json<ChampionshipFilterResponse> {
    Json(ChampionshipFilterResponse {
        min_championships,
        players: store.by_min_championships(min_championships).await,
    })
}

// GET /players/team/:team - Players whose team field contains the nickname
pub async fn get_players_by_team(
    State(store): State<Arc<Store>>,
    Path(team_name): Path<Team>,
) -> Json<TeamFilterResponse> {
    Json(TeamFilterResponse {
        team: team_name,
        players: store.by_team(team_name).await,
    })
}

// GET /players/no-championships/ - Players with zero championships
pub async fn get_players_without_championships(
    State(store): State<Arc<Store>>,
) -> Json<NoChampionshipsResponse> {
    let players = store.without_championships().await;
    let count = players.len();
    Json(NoChampionshipsResponse { players, count })
}

// GET /players/hall-of-fame/ - Composite-score candidates
pub async fn get_hall_of_fame_candidates(
    State(store): State<Arc<Store>>,
) -> Json<HallOfFameResponse> {
    Json(HallOfFameResponse {
        hall_of_fame_candidates: store.hall_of_fame_candidates().await,
    })
}

// GET /players/all-stars/:min - Players with at least N all-star appearances
pub async fn get_all_star_players(
    State(store): State<Arc<Store>>,
    Path(min_appearances): Path<i64>,
) -> Json<AllStarsResponse> {
    Json(AllStarsResponse {
        min_appearances,
        players: store.all_stars(min_appearances).await,
    })
}

// PUT /players/championships/add-championship/:id
pub async fn add_championship(
    State(store): State<Arc<Store>>,
    Path(player_id): Path<u64>,
) -> Result<Json<MutationResponse>, ApiError> {
    let player = store.add_championship(player_id).await?;
    Ok(Json(MutationResponse {
        message: format!(
            "{} now has {} championship(s)",
            player.name, player.championships
        ),
        player,
    }))
}

// PUT /players/all-star/add-allstar/:id
pub async fn add_allstar(
    State(store): State<Arc<Store>>,
    Path(player_id): Path<u64>,
) -> Result<Json<MutationResponse>, ApiError> {
    let player = store.add_all_star(player_id).await?;
    Ok(Json(MutationResponse {
        message: format!(
            "{} now has {} all-star appearances",
            player.name, player.all_star_appearances
        ),
        player,
    }))
}

#[derive(Deserialize)]
pub struct ChangeTeamQuery {
    new_team: Team,
}

// PUT /players/change-team/:id?new_team=Lakers
pub async fn change_team(
    State(store): State<Arc<Store>>,
    Path(player_id): Path<u64>,
    Query(params): Query<ChangeTeamQuery>,
) -> Result<Json<MutationResponse>, ApiError> {
    let player = store.change_team(player_id, params.new_team).await?;
    Ok(Json(MutationResponse {
        message: format!(
            "{}'s team updated successfully to {}.",
            player.name, player.team
        ),
        player,
    }))
}

#[derive(Deserialize)]
pub struct ChangePositionQuery {
    new_position: Position,
}

// PUT /players/change-position/:id?new_position=PG
pub async fn change_position(
    State(store): State<Arc<Store>>,
    Path(player_id): Path<u64>,
    Query(params): Query<ChangePositionQuery>,
) -> Result<Json<MutationResponse>, ApiError> {
    let player = store.change_position(player_id, params.new_position).await?;
    Ok(Json(MutationResponse {
        message: format!(
            "{}'s position updated successfully to {}.",
            player.name, player.position
        ),
        player,
    }))
}

// POST /players/add-player/ - Add a player; the id is assigned by the store
pub async fn add_player(
    State(store): State<Arc<Store>>,
    Json(new_player): Json<NewPlayer>,
) -> Result<Json<MutationResponse>, ApiError> {
    let player = store.add_player(new_player).await?;
    Ok(Json(MutationResponse {
        message: format!("Player {} added successfully!", player.name),
        player,
    }))
}

// DELETE /players/delete/:id
pub async fn delete_player(
    State(store): State<Arc<Store>>,
    Path(player_id): Path<u64>,
) -> Result<Json<MessageResponse>, ApiError> {
    store.delete_player(player_id).await?;
    Ok(Json(MessageResponse {
        message: format!("Player with ID {} has been successfully deleted!", player_id),
    }))
}
