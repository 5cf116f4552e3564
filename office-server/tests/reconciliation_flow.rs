//! Count session lifecycle against a real (in-memory) database: seeding,
//! field-scoped writes, the stock-sync guard, and the one-way finalize.

mod common;

use std::collections::HashMap;

use common::*;
use office_server::db::repository::{RepoError, count_session, product};
use office_server::money::to_f64;
use office_server::reconciliation;
use shared::models::CountStatus;

async fn seed_catalog(pool: &sqlx::SqlitePool) {
    seed_category(pool, 1, "Drinks").await;
    seed_product(pool, 101, "Berry Punch", 1, 3.0, 10).await;
    seed_product(pool, 102, "Berry Fizz", 1, 3.0, 5).await;
}

#[tokio::test]
async fn create_seeds_entries_from_catalog_stock() {
    let pool = setup_pool().await;
    seed_catalog(&pool).await;

    let session = count_session::create(&pool, "July count", "2025-07-15")
        .await
        .unwrap();

    assert_eq!(session.status, CountStatus::Draft);
    assert_eq!(session.entries.len(), 2);
    // Entries arrive in ascending product-id order
    assert_eq!(session.entries[0].product_id, 101);
    assert_eq!(session.entries[0].system_quantity, Some(10));
    assert_eq!(session.entries[0].actual_quantity, None);
    assert_eq!(session.entries[1].system_quantity, Some(5));
}

#[tokio::test]
async fn entry_save_and_stock_sync_touch_disjoint_fields() {
    let pool = setup_pool().await;
    seed_catalog(&pool).await;
    let session = count_session::create(&pool, "July count", "2025-07-15")
        .await
        .unwrap();

    // Staff counts 6 on the shelf
    count_session::save_entry(&pool, session.id, 101, 6)
        .await
        .unwrap();

    // A sync tick lands afterwards with a new system figure
    let fresh = HashMap::from([(101, 12), (102, 5)]);
    let touched = count_session::sync_system_quantities(&pool, session.id, &fresh)
        .await
        .unwrap();
    assert_eq!(touched, 2);

    // The user's count survived; only the system side moved. Variance must
    // reflect the fresh system figure — stock may legitimately change
    // between count start and the physical count.
    let entries = count_session::find_entries(&pool, session.id).await.unwrap();
    let entry = entries.iter().find(|e| e.product_id == 101).unwrap();
    assert_eq!(entry.actual_quantity, Some(6));
    assert_eq!(entry.system_quantity, Some(12));

    let variance = reconciliation::compute_variance(&entries);
    assert_eq!(variance[&101].diff, -6);
}

#[tokio::test]
async fn stock_sync_ignores_unknown_products_and_keeps_replacements() {
    let pool = setup_pool().await;
    seed_catalog(&pool).await;
    let session = count_session::create(&pool, "July count", "2025-07-15")
        .await
        .unwrap();

    count_session::save_entry(&pool, session.id, 101, 6).await.unwrap();
    count_session::save_entry(&pool, session.id, 102, 9).await.unwrap();
    count_session::apply_replacement(&pool, session.id, 101, Some(102))
        .await
        .unwrap();

    // 999 has no entry in this session; 101's sync must not clear the
    // accepted replacement
    let fresh = HashMap::from([(101, 11), (999, 7)]);
    let touched = count_session::sync_system_quantities(&pool, session.id, &fresh)
        .await
        .unwrap();
    assert_eq!(touched, 1);

    let entries = count_session::find_entries(&pool, session.id).await.unwrap();
    let entry = entries.iter().find(|e| e.product_id == 101).unwrap();
    assert_eq!(entry.system_quantity, Some(11));
    assert_eq!(entry.replacement_product_id, Some(102));
}

#[tokio::test]
async fn sync_is_a_noop_once_saved() {
    let pool = setup_pool().await;
    seed_catalog(&pool).await;
    let session = count_session::create(&pool, "July count", "2025-07-15")
        .await
        .unwrap();
    count_session::finalize(&pool, session.id).await.unwrap();

    let fresh = HashMap::from([(101, 99)]);
    let touched = count_session::sync_system_quantities(&pool, session.id, &fresh)
        .await
        .unwrap();
    assert_eq!(touched, 0);

    let entries = count_session::find_entries(&pool, session.id).await.unwrap();
    let entry = entries.iter().find(|e| e.product_id == 101).unwrap();
    assert_eq!(entry.system_quantity, Some(10));
}

#[tokio::test]
async fn finalize_is_one_way_and_double_finalize_conflicts() {
    let pool = setup_pool().await;
    seed_catalog(&pool).await;
    let session = count_session::create(&pool, "July count", "2025-07-15")
        .await
        .unwrap();

    let saved = count_session::finalize(&pool, session.id).await.unwrap();
    assert_eq!(saved.status, CountStatus::Saved);
    assert!(saved.saved_at.is_some());

    let err = count_session::finalize(&pool, session.id).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    // Mutations are rejected after finalize too
    let err = count_session::save_entry(&pool, session.id, 101, 3)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));
}

#[tokio::test]
async fn shortage_value_tracks_replacement_accept_and_clear() {
    let pool = setup_pool().await;
    seed_catalog(&pool).await;
    let session = count_session::create(&pool, "July count", "2025-07-15")
        .await
        .unwrap();

    // A short 4, B over 4
    count_session::save_entry(&pool, session.id, 101, 6).await.unwrap();
    count_session::save_entry(&pool, session.id, 102, 9).await.unwrap();

    let products = product::find_catalog(&pool).await.unwrap();
    let entries = count_session::find_entries(&pool, session.id).await.unwrap();
    assert_eq!(
        to_f64(reconciliation::compute_shortage_value(&entries, &products)),
        12.0
    );

    // The engine proposes B for A; accepting it explains the shortfall
    let suggestions = reconciliation::suggest_replacements(&entries, &products);
    assert_eq!(suggestions.get(&101), Some(&102));

    count_session::apply_replacement(&pool, session.id, 101, Some(102))
        .await
        .unwrap();
    let entries = count_session::find_entries(&pool, session.id).await.unwrap();
    assert_eq!(
        to_f64(reconciliation::compute_shortage_value(&entries, &products)),
        0.0
    );

    // Clearing the pairing returns A to ordinary shortage accounting
    count_session::apply_replacement(&pool, session.id, 101, None)
        .await
        .unwrap();
    let entries = count_session::find_entries(&pool, session.id).await.unwrap();
    assert_eq!(
        to_f64(reconciliation::compute_shortage_value(&entries, &products)),
        12.0
    );
}
