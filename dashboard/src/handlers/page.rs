//! Dashboard page handler

use axum::{extract::State, response::Html};

use crate::{page, AppState};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page::render_index(
        state.dataset.years(),
        state.config.default_year,
    ))
}
