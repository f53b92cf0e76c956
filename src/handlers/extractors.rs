//! Extractors that map axum rejections onto [`ApiError`].

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;

use super::error::ApiError;
use crate::db::models::MedicineInput;

/// Medicine id from the `{id}` path segment. A segment that is not an integer
/// cannot name a medicine, so it is reported as not found.
pub struct MedicineId(pub i32);

impl<S> FromRequestParts<S> for MedicineId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;

        raw.parse::<i32>().map(Self).map_err(|_| ApiError::NotFound)
    }
}

/// JSON body of create and update requests.
pub struct MedicineBody(pub MedicineInput);

impl<S> FromRequest<S> for MedicineBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(input) = Json::<MedicineInput>::from_request(req, state)
            .await
            .map_err(|rejection| {
                log::debug!("Rejected medicine payload: {}", rejection.body_text());
                ApiError::InvalidPayload
            })?;
        Ok(Self(input))
    }
}
