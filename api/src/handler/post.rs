use std::str::FromStr;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use garde::Validate;

use kernel::model::id::{PostId, ProfileId};
use kernel::model::post::{
    event::{PostsByOwner, UpdatePostStatus},
    PostStatus,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::extractor::AuthorizedUser;
use crate::model::post::{
    CreatePostRequest, CreatePostResponse, PostDetailQuery, PostDetailResponse,
    PostDetailsResponse, PostsResponse, SearchPostsRequest,
};

/// Subdirectory of the image store holding listing photos.
const POST_IMAGE_DIR: &str = "post_images";

/// Accepts the multipart creation form: text fields plus one `image`
/// part. The image is written to storage first; if validation or the
/// listing transaction fails afterwards, the stored file is removed so
/// no orphan remains.
pub async fn register_post(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<CreatePostResponse>)> {
    let (req, image) = collect_post_form(multipart).await?;
    let Some((content, extension)) = image else {
        return Err(AppError::UnprocessableEntity(
            "an image is required to create a post".into(),
        ));
    };

    let storage = registry.image_storage();
    let stored = storage.save(POST_IMAGE_DIR, content, &extension).await?;

    let outcome = async {
        req.validate(&())?;
        let event = req.into_event(stored.url.clone())?;
        registry.post_repository().create(event).await
    }
    .await;

    match outcome {
        Ok(post_id) => Ok((StatusCode::CREATED, Json(CreatePostResponse { post_id }))),
        Err(e) => {
            if let Err(cleanup) = storage.delete(POST_IMAGE_DIR, &stored.file_name).await {
                tracing::warn!(
                    error.cause_chain = ?cleanup,
                    file_name = %stored.file_name,
                    "failed to remove uploaded image after create rollback"
                );
            }
            Err(e)
        }
    }
}

pub async fn search_posts(
    Path(location): Path<String>,
    State(registry): State<AppRegistry>,
    Json(req): Json<SearchPostsRequest>,
) -> AppResult<Json<PostsResponse>> {
    req.validate(&())?;
    let event = req.into_event(location)?;
    registry
        .post_repository()
        .search(event)
        .await
        .map(PostsResponse::from)
        .map(Json)
}

pub async fn show_post(
    Path(post_id): Path<PostId>,
    Query(query): Query<PostDetailQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PostDetailResponse>> {
    registry
        .post_repository()
        .find_by_id(post_id, query.owner_id)
        .await
        .and_then(|detail| match detail {
            Some(detail) => Ok(Json(detail.into())),
            None => Err(AppError::EntityNotFound("post not found".into())),
        })
}

/// Lists one owner's posts in one status; the literal owner id `all`
/// drops the owner predicate so admins can review every listing.
pub async fn show_owner_posts(
    _user: AuthorizedUser,
    Path((owner_id, status)): Path<(String, String)>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PostDetailsResponse>> {
    let status = parse_status(&status)?;
    let owned_by = match owner_id.as_str() {
        "all" => None,
        raw => Some(ProfileId::from_str(raw)?),
    };
    registry
        .post_repository()
        .find_by_owner_and_status(PostsByOwner::new(owned_by, status))
        .await
        .map(PostDetailsResponse::from)
        .map(Json)
}

pub async fn update_post_status(
    _user: AuthorizedUser,
    Path((post_id, status)): Path<(PostId, String)>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let status = parse_status(&status)?;
    registry
        .post_repository()
        .update_status(UpdatePostStatus::new(post_id, status))
        .await
        .map(|_| StatusCode::OK)
}

fn parse_status(raw: &str) -> AppResult<PostStatus> {
    PostStatus::from_str(raw)
        .map_err(|_| AppError::UnprocessableEntity(format!("invalid status: {raw}")))
}

/// Drains the multipart stream into the request struct, capturing the
/// image part's bytes and extension along the way.
async fn collect_post_form(
    mut multipart: Multipart,
) -> AppResult<(CreatePostRequest, Option<(Vec<u8>, String)>)> {
    let mut req = CreatePostRequest::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == "image" {
            let extension = field
                .file_name()
                .and_then(|f| f.rsplit('.').next())
                .unwrap_or("png")
                .to_string();
            let content = field
                .bytes()
                .await
                .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;
            image = Some((content.to_vec(), extension));
            continue;
        }
        let value = field
            .text()
            .await
            .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;
        match name.as_str() {
            "title" => req.title = value,
            "price" => req.price = value,
            "location" => req.location = value,
            "category" => req.category = value,
            "gender" => req.gender = value,
            "description" => req.description = value,
            "accommodaterId" => req.accommodater_id = value,
            "facilities" => req.facilities = value,
            _ => {}
        }
    }

    Ok((req, image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_enum_status_is_rejected_at_the_boundary() {
        assert!(matches!(
            parse_status("archived"),
            Err(AppError::UnprocessableEntity(_))
        ));
        assert!(matches!(
            parse_status("ACTIVE"),
            Err(AppError::UnprocessableEntity(_))
        ));
        assert_eq!(parse_status("expired").unwrap(), PostStatus::Expired);
    }
}
