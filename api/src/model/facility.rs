use derive_new::new;
use garde::Validate;
use serde::{Deserialize, Serialize};

use kernel::model::facility::{
    event::{CreateFacility, UpdateFacility},
    Facility,
};
use kernel::model::id::FacilityId;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacilityRequest {
    #[garde(length(min = 1))]
    pub facility: String,
}

impl From<CreateFacilityRequest> for CreateFacility {
    fn from(value: CreateFacilityRequest) -> Self {
        Self::new(value.facility)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFacilityRequest {
    #[garde(length(min = 1))]
    pub facility: String,
}

#[derive(Debug, new)]
pub struct UpdateFacilityRequestWithId(pub FacilityId, pub UpdateFacilityRequest);

impl From<UpdateFacilityRequestWithId> for UpdateFacility {
    fn from(value: UpdateFacilityRequestWithId) -> Self {
        let UpdateFacilityRequestWithId(facility_id, request) = value;
        Self::new(facility_id, request.facility)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacilityResponse {
    pub facility_id: FacilityId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityResponse {
    pub facility_id: FacilityId,
    pub facility_name: String,
}

impl From<Facility> for FacilityResponse {
    fn from(value: Facility) -> Self {
        let Facility {
            facility_id,
            facility_name,
        } = value;
        Self {
            facility_id,
            facility_name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilitiesResponse {
    pub items: Vec<FacilityResponse>,
}

impl From<Vec<Facility>> for FacilitiesResponse {
    fn from(value: Vec<Facility>) -> Self {
        Self {
            items: value.into_iter().map(FacilityResponse::from).collect(),
        }
    }
}
