pub mod event;

use crate::model::id::FacilityId;

#[derive(Debug)]
pub struct Facility {
    pub facility_id: FacilityId,
    pub facility_name: String,
}
