use std::str::FromStr;

use chrono::{DateTime, Utc};
use kernel::model::facility::Facility;
use kernel::model::post::{Gender, Post, PostDetail, PostStatus};
use kernel::model::user::OwnerContact;
use shared::error::AppError;
use uuid::Uuid;

/// Raw listing row. Status and gender arrive as strings and are parsed
/// into the closed enums exactly once, here.
#[derive(sqlx::FromRow)]
pub struct PostRow {
    pub post_id: Uuid,
    pub title: String,
    pub price: String,
    pub location: String,
    pub category: String,
    pub gender: String,
    pub description: String,
    pub image_url: String,
    pub status: String,
    pub owned_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = AppError;

    fn try_from(value: PostRow) -> Result<Self, Self::Error> {
        let PostRow {
            post_id,
            title,
            price,
            location,
            category,
            gender,
            description,
            image_url,
            status,
            owned_by,
            created_at,
            updated_at,
        } = value;
        Ok(Post {
            post_id: post_id.into(),
            title,
            price,
            location,
            category,
            gender: Gender::from_str(&gender)
                .map_err(|_| AppError::ConversionEntityError(format!("gender `{gender}`")))?,
            description,
            image_url,
            status: PostStatus::from_str(&status)
                .map_err(|_| AppError::ConversionEntityError(format!("status `{status}`")))?,
            owned_by: owned_by.into(),
            created_at,
            updated_at,
        })
    }
}

/// Listing joined with the owner profile, used by the detail lookups.
#[derive(sqlx::FromRow)]
pub struct PostWithOwnerRow {
    #[sqlx(flatten)]
    pub post: PostRow,
    pub profile_id: Uuid,
    pub full_name: String,
    pub address: String,
    pub phone: String,
    pub occupation: String,
    pub owner_gender: String,
}

impl PostWithOwnerRow {
    pub fn into_detail(self, facilities: Vec<Facility>) -> Result<PostDetail, AppError> {
        let PostWithOwnerRow {
            post,
            profile_id,
            full_name,
            address,
            phone,
            occupation,
            owner_gender,
        } = self;
        Ok(PostDetail {
            post: post.try_into()?,
            facilities,
            owner: OwnerContact {
                profile_id: profile_id.into(),
                full_name,
                address,
                phone,
                occupation,
                gender: owner_gender,
            },
        })
    }
}

/// One facility association row, joined with the facility name so a
/// batch of these can be stitched onto their posts.
#[derive(sqlx::FromRow)]
pub struct PostFacilityRow {
    pub post_id: Uuid,
    pub facility_id: Uuid,
    pub facility_name: String,
}

impl PostFacilityRow {
    pub fn into_facility(self) -> Facility {
        Facility {
            facility_id: self.facility_id.into(),
            facility_name: self.facility_name,
        }
    }
}
