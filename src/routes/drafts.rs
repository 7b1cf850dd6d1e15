use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::error::ApiError;
use crate::models::{DraftRecord, RandomDraftResponse};
use crate::store::Store;

// GET /drafts/ - List all draft records
pub async fn get_drafts(State(store): State<Arc<Store>>) -> Json<Vec<DraftRecord>> {
    Json(store.drafts().await)
}

// POST /team/random-draft/ - Generate one random draft assignment
pub async fn random_draft(
    State(store): State<Arc<Store>>,
) -> Result<Json<RandomDraftResponse>, ApiError> {
    let draft = store.random_draft().await?;
    Ok(Json(RandomDraftResponse {
        message: "Random draft created".to_string(),
        draft,
    }))
}
