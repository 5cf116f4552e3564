//! Shared fixtures for integration tests: an in-memory SQLite pool with
//! the embedded migrations applied, plus seed helpers.

#![allow(dead_code)]

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

pub async fn setup_pool() -> SqlitePool {
    // One connection: every handle must see the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory sqlite");
    office_server::db::DbService::migrate(&pool)
        .await
        .expect("failed to apply migrations");
    pool
}

pub async fn seed_category(pool: &SqlitePool, id: i64, name: &str) {
    sqlx::query(
        "INSERT INTO category (id, name, sort_order, is_active, created_at, updated_at) VALUES (?, ?, 0, 1, 0, 0)",
    )
    .bind(id)
    .bind(name)
    .execute(pool)
    .await
    .expect("seed category");
}

pub async fn seed_product(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    category_id: i64,
    unit_price: f64,
    system_stock: i64,
) {
    sqlx::query(
        "INSERT INTO product (id, name, category_id, unit_price, system_stock, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, 1, 0, 0)",
    )
    .bind(id)
    .bind(name)
    .bind(category_id)
    .bind(unit_price)
    .bind(system_stock)
    .execute(pool)
    .await
    .expect("seed product");
}

pub async fn seed_employee(pool: &SqlitePool, id: i64, name: &str, pay_unit: &str, pay_rate: f64) {
    sqlx::query(
        "INSERT INTO employee (id, display_name, pay_unit, pay_rate, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, 1, 0, 0)",
    )
    .bind(id)
    .bind(name)
    .bind(pay_unit)
    .bind(pay_rate)
    .execute(pool)
    .await
    .expect("seed employee");
}

pub async fn seed_shift(
    pool: &SqlitePool,
    id: i64,
    employee_id: i64,
    shift_date: &str,
    started_at: i64,
    ended_at: i64,
) {
    sqlx::query(
        "INSERT INTO work_shift (id, employee_id, shift_date, started_at, ended_at, shift_type, created_at) VALUES (?, ?, ?, ?, ?, 'evening', 0)",
    )
    .bind(id)
    .bind(employee_id)
    .bind(shift_date)
    .bind(started_at)
    .bind(ended_at)
    .execute(pool)
    .await
    .expect("seed shift");
}

pub async fn seed_debt(
    pool: &SqlitePool,
    id: i64,
    employee_id: i64,
    product_id: i64,
    quantity: i64,
    unit_price: f64,
    incurred_at: i64,
) {
    sqlx::query(
        "INSERT INTO debt (id, employee_id, product_id, quantity, unit_price, incurred_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(employee_id)
    .bind(product_id)
    .bind(quantity)
    .bind(unit_price)
    .bind(incurred_at)
    .execute(pool)
    .await
    .expect("seed debt");
}

pub async fn seed_adjustment(
    pool: &SqlitePool,
    id: i64,
    shift_id: i64,
    employee_id: i64,
    kind: &str,
    amount: f64,
) {
    sqlx::query(
        "INSERT INTO shift_adjustment (id, shift_id, employee_id, kind, amount, created_at) VALUES (?, ?, ?, ?, ?, 0)",
    )
    .bind(id)
    .bind(shift_id)
    .bind(employee_id)
    .bind(kind)
    .bind(amount)
    .execute(pool)
    .await
    .expect("seed adjustment");
}
