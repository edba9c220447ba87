use derive_new::new;

use crate::model::id::FacilityId;

#[derive(Debug, new)]
pub struct CreateFacility {
    pub facility_name: String,
}

#[derive(Debug, new)]
pub struct UpdateFacility {
    pub facility_id: FacilityId,
    pub facility_name: String,
}

#[derive(Debug, new)]
pub struct DeleteFacility {
    pub facility_id: FacilityId,
}
