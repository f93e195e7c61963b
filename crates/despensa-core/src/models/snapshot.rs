//! Inventory snapshot ("cierre") domain model.
//!
//! A snapshot is a point-in-time copy of stock quantities and values.
//! Once created, its line items and summary are historical fact and are
//! never mutated; only the name and description may be edited.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::area::AreaSelector;
use crate::models::ingredient::Unit;

/// One captured line in a snapshot, denormalized from the ingredient at
/// creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotItem {
    /// Source ingredient id. Optional so that records captured before
    /// ids were denormalized still deserialize.
    pub ingredient_id: Option<Uuid>,
    pub name: String,
    pub sku: String,
    pub quantity: Decimal,
    pub unit: Unit,
    /// Unit cost at capture time.
    pub purchase_price: Decimal,
    /// quantity × purchase_price.
    pub total_value: Decimal,
}

/// Precomputed aggregate over a snapshot's line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSummary {
    pub total_items: u64,
    pub total_quantity: Decimal,
    pub total_value: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub area: AreaSelector,
    pub items: Vec<SnapshotItem>,
    pub summary: SnapshotSummary,
    pub created_at: DateTime<Utc>,
}

/// Caller-facing request to close inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSnapshot {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub area: AreaSelector,
}

/// A fully computed snapshot ready for persistence — produced by the
/// inventory engine, never built by callers.
#[derive(Debug, Clone)]
pub struct NewSnapshot {
    pub name: String,
    pub description: String,
    pub area: AreaSelector,
    pub items: Vec<SnapshotItem>,
    pub summary: SnapshotSummary,
}

/// Metadata-only edit. Line items and summary have no update path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSnapshotMeta {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Reference to a compared snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRef {
    pub id: Uuid,
    pub name: String,
}

/// One joined row of a two-snapshot comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub name: String,
    pub unit: Unit,
    pub snapshot1_quantity: Decimal,
    pub snapshot2_quantity: Decimal,
    /// snapshot2_quantity − snapshot1_quantity.
    pub difference: Decimal,
    /// difference ÷ snapshot1_quantity × 100. Omitted when the first
    /// snapshot's quantity is zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_change: Option<Decimal>,
}

/// Aggregate deltas between two snapshot summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryDifference {
    pub items: i64,
    pub quantity: Decimal,
    pub value: Decimal,
}

/// Derived projection of two snapshots. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotComparison {
    pub snapshot1: SnapshotRef,
    pub snapshot2: SnapshotRef,
    pub comparison: Vec<ComparisonRow>,
    pub summary_difference: SummaryDifference,
}
