//! Repository for the `spaces` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::space::{CreateSpace, Space, UpdateSpace};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, key, name, page, layout_kind, max_items, \
    placements_version, created_at, updated_at";

/// Provides CRUD operations for spaces.
///
/// Layout/capacity validation happens in the handler layer via
/// `vitrine_core::space::validate_capacity`; the database check constraints
/// are the backstop.
pub struct SpaceRepo;

impl SpaceRepo {
    /// Insert a new space, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSpace) -> Result<Space, sqlx::Error> {
        let query = format!(
            "INSERT INTO spaces (key, name, page, layout_kind, max_items) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Space>(&query)
            .bind(&input.key)
            .bind(&input.name)
            .bind(&input.page)
            .bind(&input.layout_kind)
            .bind(input.max_items)
            .fetch_one(pool)
            .await
    }

    /// Find a space by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Space>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spaces WHERE id = $1");
        sqlx::query_as::<_, Space>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a space by its stable key.
    pub async fn find_by_key(pool: &PgPool, key: &str) -> Result<Option<Space>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spaces WHERE key = $1");
        sqlx::query_as::<_, Space>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// List all spaces, grouped by page.
    pub async fn list(pool: &PgPool) -> Result<Vec<Space>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spaces ORDER BY page, name");
        sqlx::query_as::<_, Space>(&query).fetch_all(pool).await
    }

    /// Update a space. Only non-`None` fields are applied. The key is
    /// immutable.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSpace,
    ) -> Result<Option<Space>, sqlx::Error> {
        let query = format!(
            "UPDATE spaces SET \
                name = COALESCE($2, name), \
                page = COALESCE($3, page), \
                layout_kind = COALESCE($4, layout_kind), \
                max_items = COALESCE($5, max_items), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Space>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.page)
            .bind(&input.layout_kind)
            .bind(input.max_items)
            .fetch_optional(pool)
            .await
    }

    /// Delete a space and (via cascade) all its placements.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM spaces WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
