use std::collections::HashSet;
use std::str::FromStr;

use chrono::Utc;
use garde::Validate;
use serde::{Deserialize, Serialize};

use kernel::model::id::{FacilityId, PostId, ProfileId, UserId};
use kernel::model::post::{
    event::{CreatePost, SearchPosts},
    Gender, Post, PostDetail, PostStatus,
};
use shared::datetime::{calendar_date, time_elapsed};
use shared::error::{AppError, AppResult};

use crate::model::facility::FacilityResponse;
use crate::model::user::OwnerContactResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderName {
    Male,
    Female,
    Any,
}

impl From<Gender> for GenderName {
    fn from(value: Gender) -> Self {
        match value {
            Gender::Male => Self::Male,
            Gender::Female => Self::Female,
            Gender::Any => Self::Any,
        }
    }
}

impl From<GenderName> for Gender {
    fn from(value: GenderName) -> Self {
        match value {
            GenderName::Male => Self::Male,
            GenderName::Female => Self::Female,
            GenderName::Any => Self::Any,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatusName {
    Pending,
    Active,
    Denied,
    Expired,
}

impl From<PostStatus> for PostStatusName {
    fn from(value: PostStatus) -> Self {
        match value {
            PostStatus::Pending => Self::Pending,
            PostStatus::Active => Self::Active,
            PostStatus::Denied => Self::Denied,
            PostStatus::Expired => Self::Expired,
        }
    }
}

impl From<PostStatusName> for PostStatus {
    fn from(value: PostStatusName) -> Self {
        match value {
            PostStatusName::Pending => Self::Pending,
            PostStatusName::Active => Self::Active,
            PostStatusName::Denied => Self::Denied,
            PostStatusName::Expired => Self::Expired,
        }
    }
}

/// Text fields of the multipart creation request. The image part is
/// handled separately by the handler; `facilities` arrives as a
/// comma-separated id list.
#[derive(Debug, Default, Validate)]
pub struct CreatePostRequest {
    #[garde(length(min = 1))]
    pub title: String,
    #[garde(length(min = 1))]
    pub price: String,
    #[garde(length(min = 1))]
    pub location: String,
    #[garde(length(min = 1))]
    pub category: String,
    #[garde(length(min = 1))]
    pub gender: String,
    #[garde(length(min = 1))]
    pub description: String,
    #[garde(length(min = 1))]
    pub accommodater_id: String,
    #[garde(skip)]
    pub facilities: String,
}

impl CreatePostRequest {
    pub fn into_event(self, image_url: String) -> AppResult<CreatePost> {
        let gender = Gender::from_str(&self.gender)
            .map_err(|_| AppError::UnprocessableEntity(format!("invalid gender: {}", self.gender)))?;
        let posted_by = UserId::from_str(&self.accommodater_id)?;
        let facility_ids = parse_facility_ids(&self.facilities)?;
        Ok(CreatePost::new(
            self.title,
            self.price,
            self.location,
            self.category,
            gender,
            self.description,
            image_url,
            posted_by,
            facility_ids,
        ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostResponse {
    pub post_id: PostId,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchPostsRequest {
    #[garde(skip)]
    pub genders: Vec<GenderName>,
    #[garde(skip)]
    #[serde(default)]
    pub facilities: String,
}

impl SearchPostsRequest {
    pub fn into_event(self, location: String) -> AppResult<SearchPosts> {
        let genders = self.genders.into_iter().map(Gender::from).collect();
        let facility_ids = parse_facility_ids(&self.facilities)?;
        Ok(SearchPosts::new(location, genders, facility_ids))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailQuery {
    pub owner_id: ProfileId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub post_id: PostId,
    pub title: String,
    pub price: String,
    pub location: String,
    pub category: String,
    pub gender: GenderName,
    pub description: String,
    pub image_url: String,
    pub status: PostStatusName,
    pub owned_by: ProfileId,
    pub posted_at: String,
    pub time_elapsed: String,
}

impl From<Post> for PostResponse {
    fn from(value: Post) -> Self {
        let now = Utc::now();
        let Post {
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
            ..
        } = value;
        Self {
            post_id,
            title,
            price,
            location,
            category,
            gender: gender.into(),
            description,
            image_url,
            status: status.into(),
            owned_by,
            posted_at: calendar_date(created_at),
            time_elapsed: time_elapsed(created_at, now),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsResponse {
    pub items: Vec<PostResponse>,
}

impl From<Vec<Post>> for PostsResponse {
    fn from(value: Vec<Post>) -> Self {
        Self {
            items: value.into_iter().map(PostResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub facilities: Vec<FacilityResponse>,
    pub owner: OwnerContactResponse,
}

impl From<PostDetail> for PostDetailResponse {
    fn from(value: PostDetail) -> Self {
        let PostDetail {
            post,
            facilities,
            owner,
        } = value;
        Self {
            post: post.into(),
            facilities: facilities.into_iter().map(FacilityResponse::from).collect(),
            owner: owner.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailsResponse {
    pub items: Vec<PostDetailResponse>,
}

impl From<Vec<PostDetail>> for PostDetailsResponse {
    fn from(value: Vec<PostDetail>) -> Self {
        Self {
            items: value.into_iter().map(PostDetailResponse::from).collect(),
        }
    }
}

/// Splits a comma-separated id list, ignoring blank segments and
/// collapsing duplicates while preserving first-seen order.
pub fn parse_facility_ids(raw: &str) -> AppResult<Vec<FacilityId>> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id = FacilityId::from_str(part)
            .map_err(|_| AppError::UnprocessableEntity(format!("invalid facility id: {part}")))?;
        if seen.insert(id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facility_id_list_is_deduplicated_in_order() {
        let a = FacilityId::new();
        let b = FacilityId::new();
        let raw = format!("{a}, {b},,{a} ,");
        let ids = parse_facility_ids(&raw).unwrap();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn empty_facility_list_means_no_filter() {
        assert!(parse_facility_ids("").unwrap().is_empty());
        assert!(parse_facility_ids(" , ,").unwrap().is_empty());
    }

    #[test]
    fn malformed_facility_id_is_unprocessable() {
        let res = parse_facility_ids("not-a-uuid");
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
    }

    #[test]
    fn create_request_rejects_unknown_gender() {
        let req = CreatePostRequest {
            title: "Cozy room".into(),
            price: "1200".into(),
            location: "matara".into(),
            category: "single".into(),
            gender: "unisex".into(),
            description: "near campus".into(),
            accommodater_id: UserId::new().to_string(),
            facilities: String::new(),
        };
        assert!(matches!(
            req.into_event("/uploads/post_images/x.png".into()),
            Err(AppError::UnprocessableEntity(_))
        ));
    }
}
