//! Repository for the `placements` table: the ordering protocol, capacity
//! guard, and schedule setter.
//!
//! Every mutation is one transaction that takes a `FOR UPDATE` lock on the
//! space row first, serializing writers per space. Positions within a space
//! always form a dense 1-based sequence after commit; removal paths run a
//! single compaction pass rather than N incremental shifts so concurrent
//! readers never observe transient gaps.

use sqlx::{PgPool, Postgres, Transaction};
use vitrine_core::ordering::{self, PlacementError};
use vitrine_core::types::{DbId, Timestamp};

use crate::models::placement::{Placement, PlacementEntry, StorefrontRow};
use crate::models::space::Space;
use crate::repositories::RepoError;

/// Column list for the `placements` table.
const COLUMNS: &str = "id, space_id, banner_id, position, starts_at, ends_at, \
    is_active, created_at, updated_at";

/// Column list for placement entries joined with their banner summary.
const ENTRY_COLUMNS: &str = "p.id, p.banner_id, b.title, b.image_desktop, \
    p.position, p.starts_at, p.ends_at, p.is_active";

/// Space fields read under the per-space write lock.
#[derive(sqlx::FromRow)]
struct LockedSpace {
    max_items: i32,
    placements_version: i64,
}

/// Provides the placement engine's mutations and ordered reads.
pub struct PlacementRepo;

impl PlacementRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// List a space's placements in rank order, joined with banner summaries.
    pub async fn list_for_space(
        pool: &PgPool,
        space_id: DbId,
    ) -> Result<Vec<PlacementEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM placements p \
             JOIN banners b ON b.id = p.banner_id \
             WHERE p.space_id = $1 ORDER BY p.position"
        );
        sqlx::query_as::<_, PlacementEntry>(&query)
            .bind(space_id)
            .fetch_all(pool)
            .await
    }

    /// Storefront read path: ordered rows with full banner content.
    ///
    /// Banners whose global `is_active` flag is off are excluded here;
    /// per-placement visibility is derived by the caller from the window
    /// fields.
    pub async fn storefront_rows(
        pool: &PgPool,
        space_id: DbId,
    ) -> Result<Vec<StorefrontRow>, sqlx::Error> {
        let query = "SELECT p.banner_id, p.position, b.headline, b.subheadline, \
                b.cta_text, b.cta_url, b.cta_new_tab, b.image_desktop, \
                b.image_mobile, b.background_color, b.alt_text, \
                p.starts_at, p.ends_at, p.is_active \
             FROM placements p \
             JOIN banners b ON b.id = p.banner_id \
             WHERE p.space_id = $1 AND b.is_active = true \
             ORDER BY p.position";
        sqlx::query_as::<_, StorefrontRow>(query)
            .bind(space_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Attach / detach
    // -----------------------------------------------------------------------

    /// Attach a banner at the end of a space's order.
    ///
    /// Rejects duplicates (`AlreadyAttached`) and full spaces
    /// (`CapacityExceeded`) before any write.
    pub async fn attach(
        pool: &PgPool,
        space: &Space,
        banner_id: DbId,
    ) -> Result<Placement, RepoError> {
        let mut tx = pool.begin().await?;
        let locked = Self::lock_space(&mut tx, space).await?;

        let banner_exists: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM banners WHERE id = $1")
                .bind(banner_id)
                .fetch_optional(&mut *tx)
                .await?;
        if banner_exists.is_none() {
            return Err(PlacementError::BannerNotFound { id: banner_id }.into());
        }

        let duplicate: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM placements WHERE space_id = $1 AND banner_id = $2",
        )
        .bind(space.id)
        .bind(banner_id)
        .fetch_optional(&mut *tx)
        .await?;
        if duplicate.is_some() {
            return Err(PlacementError::AlreadyAttached {
                space_key: space.key.clone(),
                banner_id,
            }
            .into());
        }

        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM placements WHERE space_id = $1")
                .bind(space.id)
                .fetch_one(&mut *tx)
                .await?;
        ordering::check_capacity(count, i64::from(locked.max_items), 1)?;

        let query = format!(
            "INSERT INTO placements (space_id, banner_id, position) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let placement = sqlx::query_as::<_, Placement>(&query)
            .bind(space.id)
            .bind(banner_id)
            .bind(count as i32 + 1)
            .fetch_one(&mut *tx)
            .await?;

        Self::bump_version(&mut tx, space.id).await?;
        tx.commit().await?;

        tracing::info!(space = %space.key, banner_id, position = placement.position, "Banner attached");
        Ok(placement)
    }

    /// Detach a banner from a space and compact the remaining ranks.
    pub async fn detach(pool: &PgPool, space: &Space, banner_id: DbId) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        Self::lock_space(&mut tx, space).await?;

        let result = sqlx::query("DELETE FROM placements WHERE space_id = $1 AND banner_id = $2")
            .bind(space.id)
            .bind(banner_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(PlacementError::NotPlaced {
                space_key: space.key.clone(),
                banner_id,
            }
            .into());
        }

        Self::compact(&mut tx, space.id).await?;
        Self::bump_version(&mut tx, space.id).await?;
        tx.commit().await?;

        tracing::info!(space = %space.key, banner_id, "Banner detached");
        Ok(())
    }

    /// Detach several banners at once with a single compaction pass.
    ///
    /// Ids not placed in the space are skipped. Returns the number of
    /// placements removed.
    pub async fn detach_many(
        pool: &PgPool,
        space: &Space,
        banner_ids: &[DbId],
    ) -> Result<u64, RepoError> {
        let mut tx = pool.begin().await?;
        Self::lock_space(&mut tx, space).await?;

        let result =
            sqlx::query("DELETE FROM placements WHERE space_id = $1 AND banner_id = ANY($2)")
                .bind(space.id)
                .bind(banner_ids)
                .execute(&mut *tx)
                .await?;

        Self::compact(&mut tx, space.id).await?;
        Self::bump_version(&mut tx, space.id).await?;
        tx.commit().await?;

        let removed = result.rows_affected();
        tracing::info!(space = %space.key, removed, "Banners bulk-detached");
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Reorder / move
    // -----------------------------------------------------------------------

    /// Rewrite a space's ranks from the complete desired order.
    ///
    /// The payload must be a permutation of the space's current placement
    /// set (`OrderMismatch` otherwise; no partial write). When
    /// `expected_version` is given and stale, fails with `Conflict` so the
    /// client can refetch and replay.
    ///
    /// Returns the committed `placements_version` alongside the new order.
    /// The version is computed from the value read under the space lock,
    /// not from the caller's `space` snapshot, which may predate concurrent
    /// mutations.
    pub async fn reorder(
        pool: &PgPool,
        space: &Space,
        banner_ids: &[DbId],
        expected_version: Option<i64>,
    ) -> Result<(i64, Vec<PlacementEntry>), RepoError> {
        let mut tx = pool.begin().await?;
        let locked = Self::lock_space(&mut tx, space).await?;

        if let Some(expected) = expected_version {
            if expected != locked.placements_version {
                return Err(PlacementError::Conflict {
                    expected,
                    actual: locked.placements_version,
                }
                .into());
            }
        }

        let current: Vec<(DbId,)> = sqlx::query_as(
            "SELECT banner_id FROM placements WHERE space_id = $1 ORDER BY position",
        )
        .bind(space.id)
        .fetch_all(&mut *tx)
        .await?;
        let current_ids: Vec<DbId> = current.into_iter().map(|(id,)| id).collect();
        ordering::validate_reorder(&current_ids, banner_ids)?;

        // One statement rewrites every rank; the position uniqueness
        // constraint is deferred until commit.
        let positions: Vec<i32> = (1..=banner_ids.len() as i32).collect();
        sqlx::query(
            "UPDATE placements p SET position = v.pos, updated_at = now() \
             FROM (SELECT * FROM UNNEST($2::bigint[], $3::int[]) AS t (banner_id, pos)) v \
             WHERE p.space_id = $1 AND p.banner_id = v.banner_id",
        )
        .bind(space.id)
        .bind(banner_ids)
        .bind(&positions)
        .execute(&mut *tx)
        .await?;

        Self::bump_version(&mut tx, space.id).await?;

        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM placements p \
             JOIN banners b ON b.id = p.banner_id \
             WHERE p.space_id = $1 ORDER BY p.position"
        );
        let entries = sqlx::query_as::<_, PlacementEntry>(&query)
            .bind(space.id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        let version = locked.placements_version + 1;
        tracing::info!(space = %space.key, version, count = entries.len(), "Space reordered");
        Ok((version, entries))
    }

    /// Move a placement into another space as one all-or-nothing
    /// transaction: a capacity or duplicate rejection on the destination
    /// leaves the source untouched.
    ///
    /// The placement's window and active flag travel with it.
    pub async fn move_to_space(
        pool: &PgPool,
        source: &Space,
        destination: &Space,
        banner_id: DbId,
        index: Option<i32>,
    ) -> Result<Placement, RepoError> {
        let mut tx = pool.begin().await?;

        // Lock both space rows in id order to avoid lock-order inversion
        // with a concurrent move in the opposite direction.
        let dest_locked = if source.id < destination.id {
            Self::lock_space(&mut tx, source).await?;
            Self::lock_space(&mut tx, destination).await?
        } else {
            let locked = Self::lock_space(&mut tx, destination).await?;
            Self::lock_space(&mut tx, source).await?;
            locked
        };

        let duplicate: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM placements WHERE space_id = $1 AND banner_id = $2",
        )
        .bind(destination.id)
        .bind(banner_id)
        .fetch_optional(&mut *tx)
        .await?;
        if duplicate.is_some() {
            return Err(PlacementError::AlreadyAttached {
                space_key: destination.key.clone(),
                banner_id,
            }
            .into());
        }

        let (dest_count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM placements WHERE space_id = $1")
                .bind(destination.id)
                .fetch_one(&mut *tx)
                .await?;
        ordering::check_capacity(dest_count, i64::from(dest_locked.max_items), 1)?;

        let removed: Option<(Option<Timestamp>, Option<Timestamp>, bool)> = sqlx::query_as(
            "DELETE FROM placements WHERE space_id = $1 AND banner_id = $2 \
             RETURNING starts_at, ends_at, is_active",
        )
        .bind(source.id)
        .bind(banner_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((starts_at, ends_at, is_active)) = removed else {
            return Err(PlacementError::NotPlaced {
                space_key: source.key.clone(),
                banner_id,
            }
            .into());
        };

        Self::compact(&mut tx, source.id).await?;

        let insert_at = ordering::clamp_insert_index(index, dest_count);
        sqlx::query(
            "UPDATE placements SET position = position + 1, updated_at = now() \
             WHERE space_id = $1 AND position >= $2",
        )
        .bind(destination.id)
        .bind(insert_at)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO placements \
                (space_id, banner_id, position, starts_at, ends_at, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let placement = sqlx::query_as::<_, Placement>(&query)
            .bind(destination.id)
            .bind(banner_id)
            .bind(insert_at)
            .bind(starts_at)
            .bind(ends_at)
            .bind(is_active)
            .fetch_one(&mut *tx)
            .await?;

        Self::bump_version(&mut tx, source.id).await?;
        Self::bump_version(&mut tx, destination.id).await?;
        tx.commit().await?;

        tracing::info!(
            from = %source.key,
            to = %destination.key,
            banner_id,
            position = placement.position,
            "Banner moved between spaces"
        );
        Ok(placement)
    }

    // -----------------------------------------------------------------------
    // Schedule setter
    // -----------------------------------------------------------------------

    /// Set or clear a placement's visibility window. Never touches rank.
    ///
    /// Setting any bound also sets `is_active = true` so the flag never
    /// contradicts the window (the window is the sole authority while it
    /// exists). Clearing both bounds reverts the placement to flag-driven
    /// status without touching the flag.
    pub async fn set_window(
        pool: &PgPool,
        space: &Space,
        banner_id: DbId,
        starts_at: Option<Timestamp>,
        ends_at: Option<Timestamp>,
    ) -> Result<Placement, RepoError> {
        ordering::validate_window(starts_at, ends_at)?;

        let mut tx = pool.begin().await?;
        Self::lock_space(&mut tx, space).await?;

        let query = format!(
            "UPDATE placements SET \
                starts_at = $3, \
                ends_at = $4, \
                is_active = CASE WHEN $3::timestamptz IS NULL AND $4::timestamptz IS NULL \
                    THEN is_active ELSE true END, \
                updated_at = now() \
             WHERE space_id = $1 AND banner_id = $2 \
             RETURNING {COLUMNS}"
        );
        let placement = sqlx::query_as::<_, Placement>(&query)
            .bind(space.id)
            .bind(banner_id)
            .bind(starts_at)
            .bind(ends_at)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(PlacementError::NotPlaced {
                space_key: space.key.clone(),
                banner_id,
            })?;

        Self::bump_version(&mut tx, space.id).await?;
        tx.commit().await?;

        tracing::info!(space = %space.key, banner_id, "Placement window updated");
        Ok(placement)
    }

    /// Toggle the unwindowed active flag. Ignored for display purposes
    /// while a window exists.
    pub async fn set_active(
        pool: &PgPool,
        space: &Space,
        banner_id: DbId,
        is_active: bool,
    ) -> Result<Placement, RepoError> {
        let mut tx = pool.begin().await?;
        Self::lock_space(&mut tx, space).await?;

        let query = format!(
            "UPDATE placements SET is_active = $3, updated_at = now() \
             WHERE space_id = $1 AND banner_id = $2 \
             RETURNING {COLUMNS}"
        );
        let placement = sqlx::query_as::<_, Placement>(&query)
            .bind(space.id)
            .bind(banner_id)
            .bind(is_active)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(PlacementError::NotPlaced {
                space_key: space.key.clone(),
                banner_id,
            })?;

        Self::bump_version(&mut tx, space.id).await?;
        tx.commit().await?;
        Ok(placement)
    }

    // -----------------------------------------------------------------------
    // Transaction helpers (shared with BannerRepo's cascade path)
    // -----------------------------------------------------------------------

    /// Take the per-space write lock, returning the fields mutations need.
    async fn lock_space(
        tx: &mut Transaction<'_, Postgres>,
        space: &Space,
    ) -> Result<LockedSpace, RepoError> {
        sqlx::query_as::<_, LockedSpace>(
            "SELECT max_items, placements_version FROM spaces WHERE id = $1 FOR UPDATE",
        )
        .bind(space.id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| {
            PlacementError::SpaceNotFound {
                key: space.key.clone(),
            }
            .into()
        })
    }

    /// Renumber a space's placements to a dense 1..N sequence in one pass.
    pub(crate) async fn compact(
        tx: &mut Transaction<'_, Postgres>,
        space_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE placements p SET position = r.new_pos::int, updated_at = now() \
             FROM (SELECT id, ROW_NUMBER() OVER (ORDER BY position) AS new_pos \
                   FROM placements WHERE space_id = $1) r \
             WHERE p.id = r.id AND p.position <> r.new_pos",
        )
        .bind(space_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Record that this space's placement set changed.
    pub(crate) async fn bump_version(
        tx: &mut Transaction<'_, Postgres>,
        space_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE spaces SET placements_version = placements_version + 1, \
             updated_at = now() WHERE id = $1",
        )
        .bind(space_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
