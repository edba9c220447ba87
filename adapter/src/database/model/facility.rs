use kernel::model::facility::Facility;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct FacilityRow {
    pub facility_id: Uuid,
    pub facility_name: String,
}

impl From<FacilityRow> for Facility {
    fn from(value: FacilityRow) -> Self {
        let FacilityRow {
            facility_id,
            facility_name,
        } = value;
        Facility {
            facility_id: facility_id.into(),
            facility_name,
        }
    }
}
