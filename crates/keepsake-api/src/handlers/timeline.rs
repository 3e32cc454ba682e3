use std::sync::Arc;

use axum::{extract::State, Json};
use keepsake_core::models::{TimelineEntry, TimelineEvent};
use keepsake_core::timeline::{merge_with_defaults, DEFAULT_EVENTS};

use crate::state::AppState;

/// Events created from uploads, ascending by year
#[utoipa::path(
    get,
    path = "/api/timeline",
    tag = "timeline",
    responses(
        (status = 200, description = "Uploaded events sorted by year", body = Vec<TimelineEvent>)
    )
)]
pub async fn list_timeline(State(state): State<Arc<AppState>>) -> Json<Vec<TimelineEvent>> {
    Json(state.timeline.list_sorted().await)
}

/// The page's timeline: fixed biographical events merged with uploads, ascending by year
#[utoipa::path(
    get,
    path = "/api/timeline/full",
    tag = "timeline",
    responses(
        (status = 200, description = "Default and uploaded events sorted by year", body = Vec<TimelineEntry>)
    )
)]
pub async fn full_timeline(State(state): State<Arc<AppState>>) -> Json<Vec<TimelineEntry>> {
    let uploads = state.timeline.list_sorted().await;
    Json(merge_with_defaults(DEFAULT_EVENTS, uploads))
}
