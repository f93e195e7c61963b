//! SurrealDB implementation of [`IngredientRepository`].

use chrono::{DateTime, Utc};
use despensa_core::error::{DespensaError, DespensaResult};
use despensa_core::models::area::Area;
use despensa_core::models::ingredient::{
    CreateIngredient, Ingredient, StockLevels, Unit, UpdateIngredient,
};
use despensa_core::repository::{IngredientRepository, PaginatedResult, Pagination};
use rust_decimal::Decimal;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::{parse_decimal, parse_uuid};

#[derive(Debug, SurrealValue)]
struct StockRow {
    almacen: String,
    cocina: String,
    ensalada: String,
    isla: String,
}

impl StockRow {
    fn try_into_levels(self) -> Result<StockLevels, DbError> {
        Ok(StockLevels {
            almacen: parse_decimal(&self.almacen, "stock.almacen")?,
            cocina: parse_decimal(&self.cocina, "stock.cocina")?,
            ensalada: parse_decimal(&self.ensalada, "stock.ensalada")?,
            isla: parse_decimal(&self.isla, "stock.isla")?,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct IngredientRow {
    name: String,
    detail: String,
    sku: String,
    unit: String,
    unit_cost: String,
    min_stock: String,
    active: bool,
    stock: StockRow,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct IngredientRowWithId {
    record_id: String,
    name: String,
    detail: String,
    sku: String,
    unit: String,
    unit_cost: String,
    min_stock: String,
    active: bool,
    stock: StockRow,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_unit(raw: &str) -> Result<Unit, DbError> {
    Unit::parse(raw).ok_or_else(|| DbError::Decode(format!("unknown unit: {raw}")))
}

impl IngredientRow {
    fn into_ingredient(self, id: Uuid) -> Result<Ingredient, DbError> {
        Ok(Ingredient {
            id,
            name: self.name,
            detail: self.detail,
            sku: self.sku,
            unit: parse_unit(&self.unit)?,
            unit_cost: parse_decimal(&self.unit_cost, "unit_cost")?,
            min_stock: parse_decimal(&self.min_stock, "min_stock")?,
            active: self.active,
            stock: self.stock.try_into_levels()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl IngredientRowWithId {
    fn try_into_ingredient(self) -> Result<Ingredient, DbError> {
        let id = parse_uuid(&self.record_id, "ingredient")?;
        Ok(Ingredient {
            id,
            name: self.name,
            detail: self.detail,
            sku: self.sku,
            unit: parse_unit(&self.unit)?,
            unit_cost: parse_decimal(&self.unit_cost, "unit_cost")?,
            min_stock: parse_decimal(&self.min_stock, "min_stock")?,
            active: self.active,
            stock: self.stock.try_into_levels()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Ingredient repository.
#[derive(Clone)]
pub struct SurrealIngredientRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealIngredientRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> IngredientRepository for SurrealIngredientRepository<C> {
    async fn create(&self, input: CreateIngredient) -> DespensaResult<Ingredient> {
        if input.unit_cost < Decimal::ZERO {
            return Err(DespensaError::Validation {
                message: "unit cost must not be negative".into(),
            });
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('ingredient', $id) SET \
                 name = $name, detail = $detail, sku = $sku, \
                 unit = $unit, unit_cost = $unit_cost, \
                 min_stock = $min_stock, active = true",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("detail", input.detail))
            .bind(("sku", input.sku))
            .bind(("unit", input.unit.as_str().to_string()))
            .bind(("unit_cost", input.unit_cost.to_string()))
            .bind(("min_stock", input.min_stock.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<IngredientRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "ingredient".into(),
            id: id_str,
        })?;

        Ok(row.into_ingredient(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> DespensaResult<Ingredient> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('ingredient', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<IngredientRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "ingredient".into(),
            id: id_str,
        })?;

        Ok(row.into_ingredient(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateIngredient) -> DespensaResult<Ingredient> {
        if input.unit_cost.is_some_and(|cost| cost < Decimal::ZERO) {
            return Err(DespensaError::Validation {
                message: "unit cost must not be negative".into(),
            });
        }

        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.detail.is_some() {
            sets.push("detail = $detail");
        }
        if input.sku.is_some() {
            sets.push("sku = $sku");
        }
        if input.unit.is_some() {
            sets.push("unit = $unit");
        }
        if input.unit_cost.is_some() {
            sets.push("unit_cost = $unit_cost");
        }
        if input.min_stock.is_some() {
            sets.push("min_stock = $min_stock");
        }
        if input.active.is_some() {
            sets.push("active = $active");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('ingredient', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(detail) = input.detail {
            builder = builder.bind(("detail", detail));
        }
        if let Some(sku) = input.sku {
            builder = builder.bind(("sku", sku));
        }
        if let Some(unit) = input.unit {
            builder = builder.bind(("unit", unit.as_str().to_string()));
        }
        if let Some(unit_cost) = input.unit_cost {
            builder = builder.bind(("unit_cost", unit_cost.to_string()));
        }
        if let Some(min_stock) = input.min_stock {
            builder = builder.bind(("min_stock", min_stock.to_string()));
        }
        if let Some(active) = input.active {
            builder = builder.bind(("active", active));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<IngredientRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "ingredient".into(),
            id: id_str,
        })?;

        Ok(row.into_ingredient(id)?)
    }

    async fn delete(&self, id: Uuid) -> DespensaResult<()> {
        self.db
            .query("DELETE type::record('ingredient', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> DespensaResult<PaginatedResult<Ingredient>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM ingredient GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM ingredient \
                 ORDER BY name ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<IngredientRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_ingredient())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn list_all(&self) -> DespensaResult<Vec<Ingredient>> {
        // Single query — the consistent point-in-time read snapshot
        // creation is computed from.
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM ingredient \
                 ORDER BY name ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<IngredientRowWithId> = result.take(0).map_err(DbError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| row.try_into_ingredient())
            .collect::<Result<Vec<_>, DbError>>()?)
    }

    async fn set_stock(&self, id: Uuid, area: Area, quantity: Decimal) -> DespensaResult<Ingredient> {
        if quantity < Decimal::ZERO {
            return Err(DespensaError::Validation {
                message: "stock quantity must not be negative".into(),
            });
        }

        let id_str = id.to_string();

        let query = format!(
            "UPDATE type::record('ingredient', $id) SET \
             stock.{} = $quantity, updated_at = time::now()",
            area.as_str()
        );

        let result = self
            .db
            .query(&query)
            .bind(("id", id_str.clone()))
            .bind(("quantity", quantity.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<IngredientRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "ingredient".into(),
            id: id_str,
        })?;

        Ok(row.into_ingredient(id)?)
    }
}
