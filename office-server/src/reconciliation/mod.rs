//! Inventory reconciliation engine
//!
//! Pure projections over a count session's entries and the product catalog:
//! per-product variance, greedy replacement suggestions, and the aggregate
//! shortage value. No I/O, no caching — sessions hold tens to low hundreds
//! of products, so every result is recomputed from scratch on each call and
//! the reconciliation screen can safely recompute on every keystroke.

use std::collections::{BTreeMap, HashMap, HashSet};

use rust_decimal::prelude::*;
use serde::Serialize;
use shared::models::{CountEntry, Product};

use crate::money::{round_money, to_decimal};
use crate::utils::AppError;

/// Variance classification for one counted product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VarianceStatus {
    Normal,
    Surplus,
    Shortage,
}

/// Derived per-product variance (never persisted)
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Variance {
    /// actual − system (unset quantities read as 0)
    pub diff: i64,
    pub status: VarianceStatus,
}

/// Per-product variance for a session's entries.
///
/// Counts are entered incrementally, so an unset quantity is treated as 0
/// rather than an error.
pub fn compute_variance(entries: &[CountEntry]) -> BTreeMap<i64, Variance> {
    entries
        .iter()
        .map(|e| {
            let diff = e.actual_quantity.unwrap_or(0) - e.system_quantity.unwrap_or(0);
            let status = match diff {
                0 => VarianceStatus::Normal,
                d if d > 0 => VarianceStatus::Surplus,
                _ => VarianceStatus::Shortage,
            };
            (e.product_id, Variance { diff, status })
        })
        .collect()
}

/// Lowercased alphanumeric tokens of a product name
fn tokenize(name: &str) -> HashSet<String> {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Name-similarity score between a shortage product and a surplus
/// candidate: exact case-insensitive match = 3, substring containment
/// either direction = 2, at least one shared alphanumeric token = 1,
/// otherwise 0 (not eligible).
fn name_similarity(shortage: &str, candidate: &str) -> u8 {
    let a = shortage.trim().to_lowercase();
    let b = candidate.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    if a == b {
        return 3;
    }
    if a.contains(&b) || b.contains(&a) {
        return 2;
    }
    if tokenize(&a).intersection(&tokenize(&b)).next().is_some() {
        return 1;
    }
    0
}

/// Greedy one-pass replacement suggestions: shortage product → surplus
/// product in the same category, best name-similarity score first, most
/// remaining surplus among equals (lowest id on a full tie).
///
/// Shortage products are visited in ascending product-id order and each
/// chosen surplus target loses one available unit per suggestion, so the
/// pass is order-sensitive and deliberately not a global optimum — the
/// product behaves this way and downstream expectations depend on it.
/// Entries that already carry an accepted replacement are skipped;
/// suggestions are advisory until a user accepts one.
pub fn suggest_replacements(entries: &[CountEntry], products: &[Product]) -> BTreeMap<i64, i64> {
    let catalog: HashMap<i64, &Product> = products.iter().map(|p| (p.id, p)).collect();
    let by_product: BTreeMap<i64, &CountEntry> =
        entries.iter().map(|e| (e.product_id, e)).collect();
    let variance = compute_variance(entries);

    // Remaining unallocated surplus units per product
    let mut surplus_pool: BTreeMap<i64, i64> = variance
        .iter()
        .filter(|(_, v)| v.status == VarianceStatus::Surplus)
        .map(|(id, v)| (*id, v.diff))
        .collect();

    let mut suggestions = BTreeMap::new();
    for (product_id, entry) in &by_product {
        let Some(v) = variance.get(product_id) else {
            continue;
        };
        if v.status != VarianceStatus::Shortage || entry.replacement_product_id.is_some() {
            continue;
        }
        let Some(product) = catalog.get(product_id) else {
            continue;
        };

        // (score, remaining units, candidate id) of the best match so far
        let mut best: Option<(u8, i64, i64)> = None;
        for (cand_id, remaining) in &surplus_pool {
            if *remaining <= 0 || cand_id == product_id {
                continue;
            }
            let Some(candidate) = catalog.get(cand_id) else {
                continue;
            };
            if candidate.category_id != product.category_id {
                continue;
            }
            let score = name_similarity(&product.name, &candidate.name);
            if score == 0 {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_score, best_remaining, _)) => {
                    score > best_score || (score == best_score && *remaining > best_remaining)
                }
            };
            if better {
                best = Some((score, *remaining, *cand_id));
            }
        }

        if let Some((_, _, cand_id)) = best {
            suggestions.insert(*product_id, cand_id);
            *surplus_pool.get_mut(&cand_id).expect("candidate came from pool") -= 1;
        }
    }
    suggestions
}

/// Aggregate monetary shortage value of a session:
/// `Σ (system − actual) × unit_price` over products counted short, skipping
/// any product whose shortfall was explained by an accepted replacement.
pub fn compute_shortage_value(entries: &[CountEntry], products: &[Product]) -> Decimal {
    let catalog: HashMap<i64, &Product> = products.iter().map(|p| (p.id, p)).collect();

    let mut total = Decimal::ZERO;
    for entry in entries {
        if entry.replacement_product_id.is_some() {
            continue;
        }
        let system = entry.system_quantity.unwrap_or(0);
        let actual = entry.actual_quantity.unwrap_or(0);
        if actual >= system {
            continue;
        }
        let Some(product) = catalog.get(&entry.product_id) else {
            continue;
        };
        total += Decimal::from(system - actual) * to_decimal(product.unit_price);
    }
    round_money(total)
}

/// Validate a replacement pairing before it is written: a product never
/// replaces itself and the replacement must live in the same category.
pub fn validate_replacement(product: &Product, replacement: &Product) -> Result<(), AppError> {
    if product.id == replacement.id {
        return Err(AppError::validation(format!(
            "Product '{}' cannot be its own replacement",
            product.name
        )));
    }
    if product.category_id != replacement.category_id {
        return Err(AppError::validation(format!(
            "Replacement '{}' is not in the same category as '{}'",
            replacement.name, product.name
        )));
    }
    Ok(())
}
