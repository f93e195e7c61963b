//! SurrealDB implementation of [`SnapshotRepository`].
//!
//! Snapshots are historical fact: the only UPDATE this repository
//! issues touches `name` and `description`. Line items and summary are
//! written once at create time and never again.

use chrono::{DateTime, Utc};
use despensa_core::error::DespensaResult;
use despensa_core::models::area::AreaSelector;
use despensa_core::models::ingredient::Unit;
use despensa_core::models::snapshot::{
    NewSnapshot, Snapshot, SnapshotItem, SnapshotSummary, UpdateSnapshotMeta,
};
use despensa_core::repository::{PaginatedResult, Pagination, SnapshotRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::{parse_decimal, parse_uuid};

#[derive(Debug, SurrealValue)]
struct ItemRow {
    ingredient_id: Option<String>,
    name: String,
    sku: String,
    quantity: String,
    unit: String,
    purchase_price: String,
    total_value: String,
}

impl ItemRow {
    fn from_item(item: &SnapshotItem) -> Self {
        Self {
            ingredient_id: item.ingredient_id.map(|id| id.to_string()),
            name: item.name.clone(),
            sku: item.sku.clone(),
            quantity: item.quantity.to_string(),
            unit: item.unit.as_str().to_string(),
            purchase_price: item.purchase_price.to_string(),
            total_value: item.total_value.to_string(),
        }
    }

    fn try_into_item(self) -> Result<SnapshotItem, DbError> {
        let ingredient_id = match self.ingredient_id {
            Some(raw) => Some(parse_uuid(&raw, "ingredient")?),
            None => None,
        };
        Ok(SnapshotItem {
            ingredient_id,
            name: self.name,
            sku: self.sku,
            quantity: parse_decimal(&self.quantity, "quantity")?,
            unit: Unit::parse(&self.unit)
                .ok_or_else(|| DbError::Decode(format!("unknown unit: {}", self.unit)))?,
            purchase_price: parse_decimal(&self.purchase_price, "purchase_price")?,
            total_value: parse_decimal(&self.total_value, "total_value")?,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct SummaryRow {
    total_items: u64,
    total_quantity: String,
    total_value: String,
}

impl SummaryRow {
    fn from_summary(summary: &SnapshotSummary) -> Self {
        Self {
            total_items: summary.total_items,
            total_quantity: summary.total_quantity.to_string(),
            total_value: summary.total_value.to_string(),
        }
    }

    fn try_into_summary(self) -> Result<SnapshotSummary, DbError> {
        Ok(SnapshotSummary {
            total_items: self.total_items,
            total_quantity: parse_decimal(&self.total_quantity, "total_quantity")?,
            total_value: parse_decimal(&self.total_value, "total_value")?,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct SnapshotRow {
    name: String,
    description: String,
    area: String,
    items: Vec<ItemRow>,
    summary: SummaryRow,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct SnapshotRowWithId {
    record_id: String,
    name: String,
    description: String,
    area: String,
    items: Vec<ItemRow>,
    summary: SummaryRow,
    created_at: DateTime<Utc>,
}

fn parse_area(raw: &str) -> Result<AreaSelector, DbError> {
    AreaSelector::parse(raw).ok_or_else(|| DbError::Decode(format!("unknown area: {raw}")))
}

impl SnapshotRow {
    fn into_snapshot(self, id: Uuid) -> Result<Snapshot, DbError> {
        Ok(Snapshot {
            id,
            name: self.name,
            description: self.description,
            area: parse_area(&self.area)?,
            items: self
                .items
                .into_iter()
                .map(ItemRow::try_into_item)
                .collect::<Result<Vec<_>, DbError>>()?,
            summary: self.summary.try_into_summary()?,
            created_at: self.created_at,
        })
    }
}

impl SnapshotRowWithId {
    fn try_into_snapshot(self) -> Result<Snapshot, DbError> {
        let id = parse_uuid(&self.record_id, "snapshot")?;
        Ok(Snapshot {
            id,
            name: self.name,
            description: self.description,
            area: parse_area(&self.area)?,
            items: self
                .items
                .into_iter()
                .map(ItemRow::try_into_item)
                .collect::<Result<Vec<_>, DbError>>()?,
            summary: self.summary.try_into_summary()?,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Snapshot repository.
#[derive(Clone)]
pub struct SurrealSnapshotRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSnapshotRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> SnapshotRepository for SurrealSnapshotRepository<C> {
    async fn create(&self, input: NewSnapshot) -> DespensaResult<Snapshot> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let items: Vec<ItemRow> = input.items.iter().map(ItemRow::from_item).collect();
        let summary = SummaryRow::from_summary(&input.summary);

        // One CREATE carrying the full record — the snapshot either
        // fully exists or does not exist at all.
        let result = self
            .db
            .query(
                "CREATE type::record('snapshot', $id) SET \
                 name = $name, description = $description, \
                 area = $area, items = $items, summary = $summary",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("description", input.description))
            .bind(("area", input.area.as_str().to_string()))
            .bind(("items", items))
            .bind(("summary", summary))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<SnapshotRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "snapshot".into(),
            id: id_str,
        })?;

        Ok(row.into_snapshot(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> DespensaResult<Snapshot> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('snapshot', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SnapshotRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "snapshot".into(),
            id: id_str,
        })?;

        Ok(row.into_snapshot(id)?)
    }

    async fn update_meta(&self, id: Uuid, input: UpdateSnapshotMeta) -> DespensaResult<Snapshot> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }

        if sets.is_empty() {
            // Nothing to change; return the stored record as-is.
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE type::record('snapshot', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<SnapshotRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "snapshot".into(),
            id: id_str,
        })?;

        Ok(row.into_snapshot(id)?)
    }

    async fn delete(&self, id: Uuid) -> DespensaResult<()> {
        self.db
            .query("DELETE type::record('snapshot', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> DespensaResult<PaginatedResult<Snapshot>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM snapshot GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        // Newest closes first.
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM snapshot \
                 ORDER BY created_at DESC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SnapshotRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_snapshot())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
