use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;

use crate::{dtos::ExplainRequest, utils::ValidatedJson, AppState};

/// Explain a math concept for a child of the given age, returning the
/// explanation together with a generated visual.
pub async fn explain(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ExplainRequest>,
) -> Result<impl IntoResponse, AppError> {
    let res = state.tutor.explain(&req).await?;
    Ok((StatusCode::OK, Json(res)))
}
