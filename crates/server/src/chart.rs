//! Chart API endpoints

use api_types::chart::ChartData;
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

/// Handle requests for the per category totals
pub async fn chart_data(State(state): State<ServerState>) -> Result<Json<ChartData>, ServerError> {
    Ok(Json(state.engine.chart_totals().await?))
}
