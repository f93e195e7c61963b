//! Ingredient domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::area::Area;

/// Unit of measure for an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Pieza,
    Paquete,
    Mililitro,
    Litro,
    Gramo,
    Kilo,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Pieza => "pieza",
            Unit::Paquete => "paquete",
            Unit::Mililitro => "mililitro",
            Unit::Litro => "litro",
            Unit::Gramo => "gramo",
            Unit::Kilo => "kilo",
        }
    }

    pub fn parse(s: &str) -> Option<Unit> {
        match s {
            "pieza" => Some(Unit::Pieza),
            "paquete" => Some(Unit::Paquete),
            "mililitro" => Some(Unit::Mililitro),
            "litro" => Some(Unit::Litro),
            "gramo" => Some(Unit::Gramo),
            "kilo" => Some(Unit::Kilo),
            _ => None,
        }
    }
}

/// Per-area stock quantities. An area the venue has never captured
/// holds zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevels {
    #[serde(default)]
    pub almacen: Decimal,
    #[serde(default)]
    pub cocina: Decimal,
    #[serde(default)]
    pub ensalada: Decimal,
    #[serde(default)]
    pub isla: Decimal,
}

impl StockLevels {
    pub fn get(&self, area: Area) -> Decimal {
        match area {
            Area::Almacen => self.almacen,
            Area::Cocina => self.cocina,
            Area::Ensalada => self.ensalada,
            Area::Isla => self.isla,
        }
    }

    pub fn set(&mut self, area: Area, quantity: Decimal) {
        match area {
            Area::Almacen => self.almacen = quantity,
            Area::Cocina => self.cocina = quantity,
            Area::Ensalada => self.ensalada = quantity,
            Area::Isla => self.isla = quantity,
        }
    }

    /// Sum across all four areas.
    pub fn total(&self) -> Decimal {
        self.almacen + self.cocina + self.ensalada + self.isla
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    /// Brand or free-text detail shown alongside the name.
    pub detail: String,
    pub sku: String,
    pub unit: Unit,
    /// Cost per unit. Non-negative.
    pub unit_cost: Decimal,
    /// Threshold below which the ingredient shows up in the low-stock
    /// report.
    pub min_stock: Decimal,
    pub active: bool,
    pub stock: StockLevels,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIngredient {
    pub name: String,
    pub detail: String,
    pub sku: String,
    pub unit: Unit,
    pub unit_cost: Decimal,
    pub min_stock: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateIngredient {
    pub name: Option<String>,
    pub detail: Option<String>,
    pub sku: Option<String>,
    pub unit: Option<Unit>,
    pub unit_cost: Option<Decimal>,
    pub min_stock: Option<Decimal>,
    pub active: Option<bool>,
}
