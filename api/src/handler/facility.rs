use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use garde::Validate;

use kernel::model::facility::event::DeleteFacility;
use kernel::model::id::FacilityId;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::extractor::AuthorizedUser;
use crate::model::facility::{
    CreateFacilityRequest, CreateFacilityResponse, FacilitiesResponse, UpdateFacilityRequest,
    UpdateFacilityRequestWithId,
};

pub async fn register_facility(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateFacilityRequest>,
) -> AppResult<(StatusCode, Json<CreateFacilityResponse>)> {
    req.validate(&())?;
    registry
        .facility_repository()
        .create(req.into())
        .await
        .map(|facility_id| {
            (
                StatusCode::CREATED,
                Json(CreateFacilityResponse { facility_id }),
            )
        })
}

pub async fn show_facility_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<FacilitiesResponse>> {
    registry
        .facility_repository()
        .find_all()
        .await
        .map(FacilitiesResponse::from)
        .map(Json)
}

pub async fn update_facility(
    _user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateFacilityRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;
    let update = UpdateFacilityRequestWithId::new(facility_id, req);
    registry
        .facility_repository()
        .update(update.into())
        .await
        .map(|_| StatusCode::OK)
}

/// Refused with a 409 while any post still references the facility.
pub async fn delete_facility(
    _user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .facility_repository()
        .delete(DeleteFacility::new(facility_id))
        .await
        .map(|_| StatusCode::OK)
}
