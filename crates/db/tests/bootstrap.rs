//! Bootstrap tests: connect, migrate, verify schema and seed data.

use sqlx::PgPool;
use vitrine_db::models::space::CreateSpace;
use vitrine_db::repositories::SpaceRepo;

/// Full bootstrap: connect, migrate, verify seed spaces exist.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    vitrine_db::health_check(&pool).await.unwrap();

    let spaces = SpaceRepo::list(&pool).await.unwrap();
    assert!(!spaces.is_empty(), "seed spaces should be present");

    let hero = SpaceRepo::find_by_key(&pool, "home_hero_slider")
        .await
        .unwrap()
        .expect("home_hero_slider should be seeded");
    assert_eq!(hero.layout_kind, "slider");
    assert_eq!(hero.max_items, 3);
    assert_eq!(hero.placements_version, 0);
}

/// The `single` layout capacity invariant is enforced at the schema level.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_single_layout_check_constraint(pool: PgPool) {
    let result = SpaceRepo::create(
        &pool,
        &CreateSpace {
            key: "bad_single".into(),
            name: "Bad single".into(),
            page: "home".into(),
            layout_kind: "single".into(),
            max_items: 3,
        },
    )
    .await;
    assert!(result.is_err(), "single layout with max_items=3 must violate ck_spaces_single_capacity");
}

/// Space keys are unique.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_space_key_rejected(pool: PgPool) {
    let dup = SpaceRepo::create(
        &pool,
        &CreateSpace {
            key: "home_hero_slider".into(),
            name: "Duplicate hero".into(),
            page: "home".into(),
            layout_kind: "slider".into(),
            max_items: 3,
        },
    )
    .await;
    assert!(dup.is_err(), "duplicate key must violate uq_spaces_key");
}
