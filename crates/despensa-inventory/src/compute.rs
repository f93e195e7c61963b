//! Pure snapshot computations: line capture, summarization, and
//! two-snapshot comparison.
//!
//! All quantity and money arithmetic is `Decimal` — floating point is
//! never used here.

use std::collections::HashMap;

use despensa_core::models::area::AreaSelector;
use despensa_core::models::ingredient::{Ingredient, Unit};
use despensa_core::models::snapshot::{
    ComparisonRow, Snapshot, SnapshotComparison, SnapshotItem, SnapshotRef, SnapshotSummary,
    SummaryDifference,
};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Capture line items from the live catalog.
///
/// Inactive ingredients are skipped. Zero-quantity lines are kept, so
/// summaries and later comparisons always operate on the full line set
/// of what the venue stocked at close time.
pub fn capture_items(ingredients: &[Ingredient], area: AreaSelector) -> Vec<SnapshotItem> {
    ingredients
        .iter()
        .filter(|ingredient| ingredient.active)
        .map(|ingredient| {
            let quantity = match area {
                AreaSelector::All => ingredient.stock.total(),
                AreaSelector::One(a) => ingredient.stock.get(a),
            };
            SnapshotItem {
                ingredient_id: Some(ingredient.id),
                name: ingredient.name.clone(),
                sku: ingredient.sku.clone(),
                quantity,
                unit: ingredient.unit,
                purchase_price: ingredient.unit_cost,
                total_value: quantity * ingredient.unit_cost,
            }
        })
        .collect()
}

/// Aggregate a line set into its summary.
pub fn summarize(items: &[SnapshotItem]) -> SnapshotSummary {
    SnapshotSummary {
        total_items: items.len() as u64,
        total_quantity: items.iter().map(|item| item.quantity).sum(),
        total_value: items.iter().map(|item| item.total_value).sum(),
    }
}

fn comparison_row(name: String, unit: Unit, q1: Decimal, q2: Decimal) -> ComparisonRow {
    let difference = q2 - q1;
    // Percent change is undefined against a zero baseline — the row
    // simply omits it rather than emitting Infinity or NaN.
    let percent_change = (!q1.is_zero()).then(|| difference / q1 * Decimal::ONE_HUNDRED);
    ComparisonRow {
        name,
        unit,
        snapshot1_quantity: q1,
        snapshot2_quantity: q2,
        difference,
        percent_change,
    }
}

/// Join two line sets and compute per-row deltas.
///
/// Rows are matched by ingredient id, which survives renames. The name
/// match is a legacy fallback, used only when one side's line carries
/// no id — two distinct ingredients that merely share a name are never
/// merged. An item present on only one side is included with the
/// missing side's quantity as zero, so additions and removals show as
/// full deltas. Rows with a zero quantity difference are omitted — an
/// empty result means the two snapshots agree.
pub fn compare_items(s1: &[SnapshotItem], s2: &[SnapshotItem]) -> Vec<ComparisonRow> {
    let mut by_id: HashMap<Uuid, usize> = HashMap::new();
    let mut by_name: HashMap<&str, usize> = HashMap::new();
    for (index, item) in s1.iter().enumerate() {
        if let Some(id) = item.ingredient_id {
            by_id.insert(id, index);
        }
        // First occurrence wins on name collisions.
        by_name.entry(item.name.as_str()).or_insert(index);
    }

    let mut matched = vec![false; s1.len()];
    let mut rows = Vec::new();

    for item in s2 {
        let partner = item
            .ingredient_id
            .and_then(|id| by_id.get(&id).copied())
            .or_else(|| {
                by_name
                    .get(item.name.as_str())
                    .copied()
                    .filter(|&index| {
                        item.ingredient_id.is_none() || s1[index].ingredient_id.is_none()
                    })
            })
            .filter(|&index| !matched[index]);

        let q1 = match partner {
            Some(index) => {
                matched[index] = true;
                s1[index].quantity
            }
            None => Decimal::ZERO,
        };

        if item.quantity != q1 {
            rows.push(comparison_row(item.name.clone(), item.unit, q1, item.quantity));
        }
    }

    // Items present only in the first snapshot.
    for (index, item) in s1.iter().enumerate() {
        if !matched[index] && !item.quantity.is_zero() {
            rows.push(comparison_row(
                item.name.clone(),
                item.unit,
                item.quantity,
                Decimal::ZERO,
            ));
        }
    }

    rows
}

/// Deltas between two precomputed summaries. Computed from the stored
/// summaries directly, independent of any row filtering.
pub fn summary_difference(s1: &SnapshotSummary, s2: &SnapshotSummary) -> SummaryDifference {
    SummaryDifference {
        items: s2.total_items as i64 - s1.total_items as i64,
        quantity: s2.total_quantity - s1.total_quantity,
        value: s2.total_value - s1.total_value,
    }
}

/// Full comparison of two loaded snapshots. Pure; mutates neither.
pub fn compare(s1: &Snapshot, s2: &Snapshot) -> SnapshotComparison {
    SnapshotComparison {
        snapshot1: SnapshotRef {
            id: s1.id,
            name: s1.name.clone(),
        },
        snapshot2: SnapshotRef {
            id: s2.id,
            name: s2.name.clone(),
        },
        comparison: compare_items(&s1.items, &s2.items),
        summary_difference: summary_difference(&s1.summary, &s2.summary),
    }
}
