//! Chart handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::charts::{render_charts, ChartPair};
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    /// Absent or empty means no filter
    #[serde(default, deserialize_with = "empty_as_none")]
    pub year: Option<i32>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse().map(Some).map_err(de::Error::custom),
    }
}

#[derive(Debug, Serialize)]
pub struct YearsResponse {
    pub years: Vec<i32>,
}

/// Recompute both charts for the selected year
pub async fn charts(
    State(state): State<AppState>,
    query: Result<Query<ChartQuery>, QueryRejection>,
) -> AppResult<Json<ChartPair>> {
    let Query(query) = query.map_err(|e| AppError::InvalidQuery(e.body_text()))?;

    let dataset = state.dataset.clone();
    let year = query.year;
    let pair = tokio::task::spawn_blocking(move || render_charts(dataset.records(), year))
        .await?;

    tracing::debug!(
        ?year,
        points = pair.trend.point_count(),
        "Charts recomputed"
    );

    Ok(Json(pair))
}

/// Distinct years available for filtering
pub async fn years(State(state): State<AppState>) -> Json<YearsResponse> {
    Json(YearsResponse {
        years: state.dataset.years().to_vec(),
    })
}
