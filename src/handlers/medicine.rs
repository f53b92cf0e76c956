use axum::{extract::State, http::StatusCode, Json};

use super::error::ApiError;
use super::extractors::{MedicineBody, MedicineId};
use crate::db::models::Medicine;
use crate::server::AppState;

/// GET /api/medicines
pub async fn list_medicines(State(state): State<AppState>) -> Result<Json<Vec<Medicine>>, ApiError> {
    log::debug!("Listing medicines");
    let medicines = state.medicines.list().await?;
    Ok(Json(medicines))
}

/// GET /api/medicines/{id}
pub async fn get_medicine(
    State(state): State<AppState>,
    MedicineId(id): MedicineId,
) -> Result<Json<Medicine>, ApiError> {
    let medicine = state.medicines.get(id).await?;
    Ok(Json(medicine))
}

/// POST /api/medicines
pub async fn create_medicine(
    State(state): State<AppState>,
    MedicineBody(input): MedicineBody,
) -> Result<(StatusCode, Json<Medicine>), ApiError> {
    let medicine = state.medicines.create(input).await?;
    Ok((StatusCode::CREATED, Json(medicine)))
}

/// PUT /api/medicines/{id}
pub async fn update_medicine(
    State(state): State<AppState>,
    MedicineId(id): MedicineId,
    MedicineBody(input): MedicineBody,
) -> Result<Json<Medicine>, ApiError> {
    let medicine = state.medicines.update(id, input).await?;
    Ok(Json(medicine))
}

/// DELETE /api/medicines/{id}
pub async fn delete_medicine(
    State(state): State<AppState>,
    MedicineId(id): MedicineId,
) -> Result<StatusCode, ApiError> {
    state.medicines.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
