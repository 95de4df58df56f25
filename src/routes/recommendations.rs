use axum::{body::Bytes, extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{PreferenceRequest, Recommendation},
    routes::AppState,
};

/// Handler for the recommendation endpoint
///
/// The body is decoded by hand so that an empty body or absent fields fall
/// back to defaults instead of being rejected by the JSON extractor.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> AppResult<Json<Vec<Recommendation>>> {
    let preferences = PreferenceRequest::from_body(&body)
        .map_err(|e| AppError::InvalidInput(format!("Invalid request body: {}", e)))?;

    tracing::info!(
        request_id = %request_id,
        liked_count = preferences.liked_artists.len(),
        disliked_count = preferences.disliked_artists.len(),
        genres = %preferences.genres,
        mood = %preferences.mood,
        artists = %preferences.artists,
        "Processing recommendation request"
    );

    let recommendations = state.recommender.recommend(&preferences).await?;

    tracing::info!(
        request_id = %request_id,
        count = recommendations.len(),
        "Recommendation request completed"
    );

    Ok(Json(recommendations))
}
