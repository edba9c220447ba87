use derive_new::new;

use crate::model::id::{FacilityId, PostId, ProfileId, UserId};
use crate::model::post::{Gender, PostStatus};

/// Creation command for a listing. `posted_by` is the caller's login id;
/// the repository resolves it to the owner profile before inserting.
#[derive(Debug, new)]
pub struct CreatePost {
    pub title: String,
    pub price: String,
    pub location: String,
    pub category: String,
    pub gender: Gender,
    pub description: String,
    pub image_url: String,
    pub posted_by: UserId,
    pub facility_ids: Vec<FacilityId>,
}

#[derive(Debug, new)]
pub struct UpdatePostStatus {
    pub post_id: PostId,
    pub status: PostStatus,
}

/// Public search filter. `location == "all"` bypasses the location
/// predicate; an empty gender set matches nothing; a non-empty facility
/// set keeps posts having at least one of the requested facilities.
#[derive(Debug, new)]
pub struct SearchPosts {
    pub location: String,
    pub genders: Vec<Gender>,
    pub facility_ids: Vec<FacilityId>,
}

#[derive(Debug, new)]
pub struct PostsByOwner {
    pub owned_by: Option<ProfileId>,
    pub status: PostStatus,
}
