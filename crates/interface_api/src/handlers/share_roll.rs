//! Share roll handlers

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use domain_share_roll::{ExportSheet, ShareRollEngine, ShareRollInput, ShareRollReport};

use crate::dto::share_roll::ShareRollRequest;
use crate::{error::ApiError, AppState};

/// Runs the engine for one request, honouring a requested operation order
fn run(state: &AppState, request: &ShareRollRequest) -> Result<(ShareRollInput, ShareRollReport), ApiError> {
    let mut config = state.config.engine_config();
    if let Some(order) = request.operation_order()? {
        config = config.with_operation_order(order);
    }

    let input = request.to_input();
    let report = ShareRollEngine::new(config).calculate(&input)?;
    Ok((input, report))
}

/// Calculates a share roll
pub async fn calculate(
    State(state): State<AppState>,
    Json(request): Json<ShareRollRequest>,
) -> Result<Json<ShareRollReport>, ApiError> {
    let (_, report) = run(&state, &request)?;
    Ok(Json(report))
}

/// Calculates a share roll and returns one sheet as CSV
pub async fn export(
    State(state): State<AppState>,
    Path(sheet): Path<String>,
    Json(request): Json<ShareRollRequest>,
) -> Result<Response, ApiError> {
    let sheet: ExportSheet = sheet
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Unknown export sheet: {}", sheet)))?;

    let (input, report) = run(&state, &request)?;
    let body = sheet.render(&input, &report)?;

    debug!(sheet = %sheet, calculation_id = %report.calculation_id, bytes = body.len(), "Exported sheet");

    let disposition = format!(
        "attachment; filename=\"{}\"",
        sheet.file_name(report.current_year)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
