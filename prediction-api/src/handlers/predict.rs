//! Prediction handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use crate::model::FeatureRow;
use crate::models::{PredictionQuery, PredictionResponse, RootMessage};
use crate::{validation, AppError, AppResult, AppState};

/// Static greeting
pub async fn root() -> Json<RootMessage> {
    Json(RootMessage {
        message: "Earthquake Prediction API",
    })
}

/// Predict a magnitude from six query parameters
pub async fn predict(
    State(state): State<AppState>,
    query: Result<Query<PredictionQuery>, QueryRejection>,
) -> AppResult<Json<PredictionResponse>> {
    let Query(query) = query.map_err(|e| AppError::InvalidQuery(e.body_text()))?;

    validation::enforce(state.config.input_validation, &query)?;

    let row = FeatureRow::from(&query);
    let model = state.model.clone();
    let predicted_magnitude = tokio::task::spawn_blocking(move || model.predict(&row)).await??;

    tracing::debug!(?row, predicted_magnitude, "Prediction served");

    Ok(Json(PredictionResponse {
        predicted_magnitude,
    }))
}
