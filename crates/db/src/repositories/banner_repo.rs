//! Repository for the `banners` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::banner::{Banner, BannerListParams, CreateBanner, UpdateBanner};
use crate::repositories::PlacementRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, headline, subheadline, cta_text, cta_url, \
    cta_new_tab, image_desktop, image_mobile, background_color, alt_text, \
    is_active, created_at, updated_at";

/// Default page size for the banner list.
const DEFAULT_LIMIT: i64 = 50;
/// Hard cap on the page size.
const MAX_LIMIT: i64 = 100;

/// Provides CRUD operations for banners.
pub struct BannerRepo;

impl BannerRepo {
    /// Insert a new banner, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBanner) -> Result<Banner, sqlx::Error> {
        let query = format!(
            "INSERT INTO banners \
                (title, headline, subheadline, cta_text, cta_url, cta_new_tab, \
                 image_desktop, image_mobile, background_color, alt_text, is_active) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, false), $7, $8, $9, $10, \
                 COALESCE($11, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Banner>(&query)
            .bind(&input.title)
            .bind(&input.headline)
            .bind(&input.subheadline)
            .bind(&input.cta_text)
            .bind(&input.cta_url)
            .bind(input.cta_new_tab)
            .bind(&input.image_desktop)
            .bind(&input.image_mobile)
            .bind(&input.background_color)
            .bind(&input.alt_text)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a banner by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Banner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM banners WHERE id = $1");
        sqlx::query_as::<_, Banner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List banners, newest first, with clamped pagination.
    pub async fn list(
        pool: &PgPool,
        params: &BannerListParams,
    ) -> Result<Vec<Banner>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);

        let query = if params.include_inactive {
            format!(
                "SELECT {COLUMNS} FROM banners \
                 ORDER BY created_at DESC LIMIT $1 OFFSET $2"
            )
        } else {
            format!(
                "SELECT {COLUMNS} FROM banners WHERE is_active = true \
                 ORDER BY created_at DESC LIMIT $1 OFFSET $2"
            )
        };
        sqlx::query_as::<_, Banner>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a banner. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBanner,
    ) -> Result<Option<Banner>, sqlx::Error> {
        let query = format!(
            "UPDATE banners SET \
                title = COALESCE($2, title), \
                headline = COALESCE($3, headline), \
                subheadline = COALESCE($4, subheadline), \
                cta_text = COALESCE($5, cta_text), \
                cta_url = COALESCE($6, cta_url), \
                cta_new_tab = COALESCE($7, cta_new_tab), \
                image_desktop = COALESCE($8, image_desktop), \
                image_mobile = COALESCE($9, image_mobile), \
                background_color = COALESCE($10, background_color), \
                alt_text = COALESCE($11, alt_text), \
                is_active = COALESCE($12, is_active), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Banner>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.headline)
            .bind(&input.subheadline)
            .bind(&input.cta_text)
            .bind(&input.cta_url)
            .bind(input.cta_new_tab)
            .bind(&input.image_desktop)
            .bind(&input.image_mobile)
            .bind(&input.background_color)
            .bind(&input.alt_text)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a banner, cascading to its placements and compacting every
    /// space it was placed in, all in one transaction.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let affected_spaces: Vec<(DbId,)> =
            sqlx::query_as("SELECT DISTINCT space_id FROM placements WHERE banner_id = $1")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        let result = sqlx::query("DELETE FROM banners WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        for (space_id,) in &affected_spaces {
            PlacementRepo::compact(&mut tx, *space_id).await?;
            PlacementRepo::bump_version(&mut tx, *space_id).await?;
        }

        tx.commit().await?;
        Ok(true)
    }
}
