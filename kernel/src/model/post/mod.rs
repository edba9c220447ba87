pub mod event;

use chrono::{DateTime, Utc};
use strum::{AsRefStr, EnumString};

use crate::model::facility::Facility;
use crate::model::id::{PostId, ProfileId};
use crate::model::user::OwnerContact;

/// Lifecycle state of a listing. A post always starts out pending and is
/// moved between states administratively; the enum is closed and any
/// other value is rejected at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PostStatus {
    Pending,
    Active,
    Denied,
    Expired,
}

/// Gender restriction carried by a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Any,
}

#[derive(Debug)]
pub struct Post {
    pub post_id: PostId,
    pub title: String,
    pub price: String,
    pub location: String,
    pub category: String,
    pub gender: Gender,
    pub description: String,
    pub image_url: String,
    pub status: PostStatus,
    pub owned_by: ProfileId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post together with its facility set and the owner's contact
/// attributes, as returned by the detail lookups.
#[derive(Debug)]
pub struct PostDetail {
    pub post: Post,
    pub facilities: Vec<Facility>,
    pub owner: OwnerContact,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn post_status_is_a_closed_enum() {
        assert_eq!(PostStatus::from_str("active").unwrap(), PostStatus::Active);
        assert_eq!(
            PostStatus::from_str("expired").unwrap(),
            PostStatus::Expired
        );
        assert!(PostStatus::from_str("archived").is_err());
        assert!(PostStatus::from_str("ACTIVE").is_err());
        assert_eq!(PostStatus::Denied.as_ref(), "denied");
    }

    #[test]
    fn gender_parses_lowercase_only() {
        assert_eq!(Gender::from_str("male").unwrap(), Gender::Male);
        assert_eq!(Gender::Any.as_ref(), "any");
        assert!(Gender::from_str("other").is_err());
    }
}
