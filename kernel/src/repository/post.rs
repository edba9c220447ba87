use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::id::{PostId, ProfileId};
use crate::model::post::{
    event::{CreatePost, PostsByOwner, SearchPosts, UpdatePostStatus},
    Post, PostDetail,
};

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Creates the post and its facility associations as one atomic unit.
    /// The event carries a login id; it is resolved to the owner profile
    /// inside the same transaction.
    async fn create(&self, event: CreatePost) -> AppResult<PostId>;
    /// Public search over active posts only.
    async fn search(&self, event: SearchPosts) -> AppResult<Vec<Post>>;
    /// Single post scoped to an owner, with facilities and owner contact.
    async fn find_by_id(
        &self,
        post_id: PostId,
        owned_by: ProfileId,
    ) -> AppResult<Option<PostDetail>>;
    /// Posts of one owner (or every owner) in one lifecycle status.
    async fn find_by_owner_and_status(&self, event: PostsByOwner) -> AppResult<Vec<PostDetail>>;
    /// Moves the post to the requested status and bumps its timestamp.
    async fn update_status(&self, event: UpdatePostStatus) -> AppResult<()>;
}
