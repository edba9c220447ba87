use std::collections::HashMap;

use async_trait::async_trait;
use derive_new::new;
use kernel::model::facility::Facility;
use kernel::model::id::{PostId, ProfileId};
use kernel::model::post::{
    event::{CreatePost, PostsByOwner, SearchPosts, UpdatePostStatus},
    Post, PostDetail,
};
use kernel::repository::post::PostRepository;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

use crate::database::model::post::{PostFacilityRow, PostRow, PostWithOwnerRow};
use crate::database::ConnectionPool;

const POST_WITH_OWNER_COLUMNS: &str = r#"
    p.post_id,
    p.title,
    p.price,
    p.location,
    p.category,
    p.gender,
    p.description,
    p.image_url,
    p.status,
    p.owned_by,
    p.created_at,
    p.updated_at,
    pr.profile_id,
    pr.full_name,
    pr.address,
    pr.phone,
    pr.occupation,
    pr.gender AS owner_gender
"#;

#[derive(new)]
pub struct PostRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl PostRepository for PostRepositoryImpl {
    async fn create(&self, event: CreatePost) -> AppResult<PostId> {
        let mut tx = self.db.begin().await?;

        // The caller supplies a login id; listings store the profile id.
        let profile_id = sqlx::query_scalar::<_, Uuid>(
            r#"
                SELECT profile_id FROM user_profiles WHERE login_id = $1
            "#,
        )
        .bind(event.posted_by.raw())
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(profile_id) = profile_id else {
            return Err(AppError::EntityNotFound(format!(
                "no owner profile exists for login ({})",
                event.posted_by
            )));
        };

        let post_id = PostId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO posts
                (post_id, title, price, location, category, gender,
                description, image_url, owned_by)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(post_id.raw())
        .bind(&event.title)
        .bind(&event.price)
        .bind(&event.location)
        .bind(&event.category)
        .bind(event.gender.as_ref())
        .bind(&event.description)
        .bind(&event.image_url)
        .bind(profile_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no post record has been created".into(),
            ));
        }

        // Association rows are written inside the same transaction; a
        // partially-written facility set must never become visible.
        if !event.facility_ids.is_empty() {
            let facility_ids: Vec<Uuid> = event.facility_ids.iter().map(|id| id.raw()).collect();
            let res = sqlx::query(
                r#"
                    INSERT INTO post_facilities (post_id, facility_id)
                    SELECT $1, t.facility_id
                    FROM UNNEST($2::uuid[]) AS t(facility_id)
                "#,
            )
            .bind(post_id.raw())
            .bind(&facility_ids)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if res.rows_affected() != facility_ids.len() as u64 {
                return Err(AppError::NoRowsAffectedError(
                    "facility associations were not fully created".into(),
                ));
            }
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(post_id)
    }

    async fn search(&self, event: SearchPosts) -> AppResult<Vec<Post>> {
        let genders: Vec<String> = event
            .genders
            .iter()
            .map(|g| g.as_ref().to_string())
            .collect();
        let facility_ids: Vec<Uuid> = event.facility_ids.iter().map(|id| id.raw()).collect();

        // Public search is always pinned to active posts. The facility
        // predicate is any-of: one matching association qualifies.
        let rows: Vec<PostRow> = sqlx::query_as(
            r#"
                SELECT
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
                    updated_at
                FROM posts
                WHERE status = 'active'
                  AND ($1::text = 'all' OR location = $1)
                  AND gender = ANY($2::text[])
                  AND (cardinality($3::uuid[]) = 0
                       OR EXISTS (
                            SELECT 1 FROM post_facilities pf
                            WHERE pf.post_id = posts.post_id
                              AND pf.facility_id = ANY($3)
                       ))
                ORDER BY created_at DESC
            "#,
        )
        .bind(&event.location)
        .bind(&genders)
        .bind(&facility_ids)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Post::try_from).collect()
    }

    async fn find_by_id(
        &self,
        post_id: PostId,
        owned_by: ProfileId,
    ) -> AppResult<Option<PostDetail>> {
        let row: Option<PostWithOwnerRow> = sqlx::query_as(&format!(
            r#"
                SELECT {POST_WITH_OWNER_COLUMNS}
                FROM posts AS p
                INNER JOIN user_profiles AS pr ON p.owned_by = pr.profile_id
                WHERE p.post_id = $1 AND p.owned_by = $2
            "#
        ))
        .bind(post_id.raw())
        .bind(owned_by.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut facilities = self.facilities_for_posts(&[post_id.raw()]).await?;
        let facilities = facilities.remove(&post_id.raw()).unwrap_or_default();

        row.into_detail(facilities).map(Some)
    }

    async fn find_by_owner_and_status(&self, event: PostsByOwner) -> AppResult<Vec<PostDetail>> {
        let rows: Vec<PostWithOwnerRow> = sqlx::query_as(&format!(
            r#"
                SELECT {POST_WITH_OWNER_COLUMNS}
                FROM posts AS p
                INNER JOIN user_profiles AS pr ON p.owned_by = pr.profile_id
                WHERE p.status = $1
                  AND ($2::uuid IS NULL OR p.owned_by = $2)
                ORDER BY p.created_at DESC
            "#
        ))
        .bind(event.status.as_ref())
        .bind(event.owned_by.map(|p| p.raw()))
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let post_ids: Vec<Uuid> = rows.iter().map(|r| r.post.post_id).collect();
        let mut facilities = self.facilities_for_posts(&post_ids).await?;

        rows.into_iter()
            .map(|row| {
                let fs = facilities.remove(&row.post.post_id).unwrap_or_default();
                row.into_detail(fs)
            })
            .collect()
    }

    async fn update_status(&self, event: UpdatePostStatus) -> AppResult<()> {
        // created_at is reset on purpose: a status change re-ranks the
        // post in the freshness-ordered listings.
        let res = sqlx::query(
            r#"
                UPDATE posts
                SET status = $1,
                    created_at = CURRENT_TIMESTAMP,
                    updated_at = CURRENT_TIMESTAMP
                WHERE post_id = $2
            "#,
        )
        .bind(event.status.as_ref())
        .bind(event.post_id.raw())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "post ({}) was not found",
                event.post_id
            )));
        }

        Ok(())
    }
}

impl PostRepositoryImpl {
    /// Fetches the facility lists for a batch of posts in one query and
    /// groups them per post.
    async fn facilities_for_posts(
        &self,
        post_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, Vec<Facility>>> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<PostFacilityRow> = sqlx::query_as(
            r#"
                SELECT pf.post_id, f.facility_id, f.facility_name
                FROM post_facilities AS pf
                INNER JOIN facilities AS f ON pf.facility_id = f.facility_id
                WHERE pf.post_id = ANY($1::uuid[])
                ORDER BY f.facility_name ASC
            "#,
        )
        .bind(post_ids)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let mut grouped: HashMap<Uuid, Vec<Facility>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.post_id)
                .or_default()
                .push(row.into_facility());
        }
        Ok(grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::id::{FacilityId, UserId};
    use kernel::model::post::{Gender, PostStatus};

    async fn seed_owner(pool: &sqlx::PgPool, email: &str) -> anyhow::Result<(UserId, ProfileId)> {
        let login_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO logins (login_id, name, email, password_hash, role, is_active)
             VALUES ($1, 'Test Owner', $2, 'x', 'accommodater', TRUE)",
        )
        .bind(login_id)
        .bind(email)
        .execute(pool)
        .await?;

        let profile_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO user_profiles
             (profile_id, login_id, full_name, address, phone, occupation, gender)
             VALUES ($1, $2, 'Test Owner', '12 Main St', '0771234567', 'Engineer', 'male')",
        )
        .bind(profile_id)
        .bind(login_id)
        .execute(pool)
        .await?;

        Ok((login_id.into(), profile_id.into()))
    }

    async fn seed_facility(pool: &sqlx::PgPool, name: &str) -> anyhow::Result<FacilityId> {
        let facility_id = Uuid::new_v4();
        sqlx::query("INSERT INTO facilities (facility_id, facility_name) VALUES ($1, $2)")
            .bind(facility_id)
            .bind(name)
            .execute(pool)
            .await?;
        Ok(facility_id.into())
    }

    fn create_event(posted_by: UserId, facility_ids: Vec<FacilityId>) -> CreatePost {
        CreatePost::new(
            "Single room near campus".into(),
            "7500".into(),
            "Moratuwa".into(),
            "single".into(),
            Gender::Male,
            "Quiet room with attached bathroom".into(),
            "http://localhost:8080/uploads/post_images/1.jpg".into(),
            posted_by,
            facility_ids,
        )
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn create_links_every_requested_facility(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = PostRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let (login_id, _) = seed_owner(&pool, "owner@example.com").await?;
        let wifi = seed_facility(&pool, "WiFi").await?;
        let parking = seed_facility(&pool, "Parking").await?;
        let meals = seed_facility(&pool, "Meals").await?;

        let post_id = repo
            .create(create_event(login_id, vec![wifi, parking, meals]))
            .await?;

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM post_facilities WHERE post_id = $1")
                .bind(post_id.raw())
                .fetch_one(&pool)
                .await?;
        assert_eq!(count, 3);

        // A fresh post starts pending and must not surface in search.
        let found = repo
            .search(SearchPosts::new("all".into(), vec![Gender::Male], vec![]))
            .await?;
        assert!(found.is_empty());
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn create_rolls_back_when_association_write_fails(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = PostRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let (login_id, _) = seed_owner(&pool, "owner@example.com").await?;

        // Unknown facility id violates the FK inside the transaction.
        let res = repo
            .create(create_event(login_id, vec![FacilityId::new()]))
            .await;
        assert!(res.is_err());

        let posts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&pool)
            .await?;
        let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM post_facilities")
            .fetch_one(&pool)
            .await?;
        assert_eq!(posts, 0);
        assert_eq!(links, 0);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn create_rejects_unknown_owner(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = PostRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let res = repo.create(create_event(UserId::new(), vec![])).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn search_applies_location_gender_and_facility_filters(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = PostRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let (login_id, _) = seed_owner(&pool, "owner@example.com").await?;
        let wifi = seed_facility(&pool, "WiFi").await?;
        let parking = seed_facility(&pool, "Parking").await?;

        let mut in_moratuwa = create_event(login_id, vec![wifi]);
        in_moratuwa.location = "Moratuwa".into();
        let moratuwa_id = repo.create(in_moratuwa).await?;

        let mut in_kandy = create_event(login_id, vec![parking]);
        in_kandy.location = "Kandy".into();
        in_kandy.gender = Gender::Female;
        let kandy_id = repo.create(in_kandy).await?;

        for id in [moratuwa_id, kandy_id] {
            repo.update_status(UpdatePostStatus::new(id, PostStatus::Active))
                .await?;
        }

        // Exact location match, case-sensitive.
        let found = repo
            .search(SearchPosts::new(
                "Moratuwa".into(),
                vec![Gender::Male, Gender::Female, Gender::Any],
                vec![],
            ))
            .await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].post_id, moratuwa_id);
        assert!(found.iter().all(|p| p.location == "Moratuwa"));

        // The "all" sentinel bypasses the location predicate.
        let found = repo
            .search(SearchPosts::new(
                "all".into(),
                vec![Gender::Male, Gender::Female, Gender::Any],
                vec![],
            ))
            .await?;
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| p.status == PostStatus::Active));

        // Gender set is an is-one-of predicate; empty matches nothing.
        let found = repo
            .search(SearchPosts::new("all".into(), vec![Gender::Female], vec![]))
            .await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].post_id, kandy_id);
        let found = repo
            .search(SearchPosts::new("all".into(), vec![], vec![]))
            .await?;
        assert!(found.is_empty());

        // Any-of facility filter: one matching association qualifies.
        let found = repo
            .search(SearchPosts::new(
                "all".into(),
                vec![Gender::Male, Gender::Female, Gender::Any],
                vec![wifi, parking],
            ))
            .await?;
        assert_eq!(found.len(), 2);
        let found = repo
            .search(SearchPosts::new(
                "all".into(),
                vec![Gender::Male, Gender::Female, Gender::Any],
                vec![wifi],
            ))
            .await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].post_id, moratuwa_id);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn pending_posts_never_surface_in_search(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = PostRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let (login_id, _) = seed_owner(&pool, "owner@example.com").await?;

        let post_id = repo.create(create_event(login_id, vec![])).await?;
        repo.update_status(UpdatePostStatus::new(post_id, PostStatus::Denied))
            .await?;

        let found = repo
            .search(SearchPosts::new(
                "all".into(),
                vec![Gender::Male, Gender::Female, Gender::Any],
                vec![],
            ))
            .await?;
        assert!(found.is_empty());
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn update_status_bumps_created_at(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = PostRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let (login_id, profile_id) = seed_owner(&pool, "owner@example.com").await?;

        let post_id = repo.create(create_event(login_id, vec![])).await?;
        let before: chrono::DateTime<chrono::Utc> =
            sqlx::query_scalar("SELECT created_at FROM posts WHERE post_id = $1")
                .bind(post_id.raw())
                .fetch_one(&pool)
                .await?;

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        repo.update_status(UpdatePostStatus::new(post_id, PostStatus::Denied))
            .await?;

        let detail = repo
            .find_by_id(post_id, profile_id)
            .await?
            .expect("post should exist");
        assert_eq!(detail.post.status, PostStatus::Denied);
        assert!(detail.post.created_at > before);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn update_status_of_missing_post_is_not_found(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = PostRepositoryImpl::new(ConnectionPool::new(pool));

        let res = repo
            .update_status(UpdatePostStatus::new(PostId::new(), PostStatus::Active))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn owner_listing_attaches_facilities_and_contact(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = PostRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let (login_id, profile_id) = seed_owner(&pool, "owner@example.com").await?;
        let (other_login, _) = seed_owner(&pool, "other@example.com").await?;
        let wifi = seed_facility(&pool, "WiFi").await?;

        let mine = repo.create(create_event(login_id, vec![wifi])).await?;
        repo.create(create_event(other_login, vec![])).await?;

        let details = repo
            .find_by_owner_and_status(PostsByOwner::new(Some(profile_id), PostStatus::Pending))
            .await?;
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].post.post_id, mine);
        assert_eq!(details[0].facilities.len(), 1);
        assert_eq!(details[0].facilities[0].facility_name, "WiFi");
        assert_eq!(details[0].owner.phone, "0771234567");

        // The "all owners" sentinel widens the same query.
        let details = repo
            .find_by_owner_and_status(PostsByOwner::new(None, PostStatus::Pending))
            .await?;
        assert_eq!(details.len(), 2);
        Ok(())
    }
}
