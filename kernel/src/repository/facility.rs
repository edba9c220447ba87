use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::facility::{
    event::{CreateFacility, DeleteFacility, UpdateFacility},
    Facility,
};
use crate::model::id::FacilityId;

#[async_trait]
pub trait FacilityRepository: Send + Sync {
    async fn create(&self, event: CreateFacility) -> AppResult<FacilityId>;
    async fn find_all(&self) -> AppResult<Vec<Facility>>;
    async fn update(&self, event: UpdateFacility) -> AppResult<()>;
    /// Fails with `AppError::FacilityInUse` carrying the reference count
    /// while any post still links to the facility.
    async fn delete(&self, event: DeleteFacility) -> AppResult<()>;
}
