//! Reports computed over the loaded catalog.

use despensa_core::models::ingredient::{Ingredient, Unit};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One ingredient at or below its minimum-stock threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowStockLine {
    pub ingredient_id: Uuid,
    pub name: String,
    pub unit: Unit,
    /// Stock summed across all areas.
    pub total_stock: Decimal,
    pub min_stock: Decimal,
    /// min_stock − total_stock; how much is missing to reach the
    /// threshold.
    pub shortfall: Decimal,
}

/// Active ingredients whose total stock is at or below `min_stock`.
pub fn low_stock(ingredients: &[Ingredient]) -> Vec<LowStockLine> {
    ingredients
        .iter()
        .filter(|ingredient| ingredient.active)
        .filter(|ingredient| ingredient.stock.total() <= ingredient.min_stock)
        .map(|ingredient| {
            let total_stock = ingredient.stock.total();
            LowStockLine {
                ingredient_id: ingredient.id,
                name: ingredient.name.clone(),
                unit: ingredient.unit,
                total_stock,
                min_stock: ingredient.min_stock,
                shortfall: ingredient.min_stock - total_stock,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use despensa_core::models::ingredient::StockLevels;
    use rust_decimal::dec;

    fn ingredient(name: &str, min_stock: Decimal, almacen: Decimal, active: bool) -> Ingredient {
        Ingredient {
            id: Uuid::new_v4(),
            name: name.into(),
            detail: String::new(),
            sku: format!("SKU-{name}"),
            unit: Unit::Kilo,
            unit_cost: dec!(1),
            min_stock,
            active,
            stock: StockLevels {
                almacen,
                ..Default::default()
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn flags_items_at_or_below_threshold() {
        let ingredients = vec![
            ingredient("low", dec!(5), dec!(2), true),
            ingredient("exact", dec!(5), dec!(5), true),
            ingredient("plenty", dec!(5), dec!(9), true),
        ];
        let lines = low_stock(&ingredients);
        let names: Vec<&str> = lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["low", "exact"]);
        assert_eq!(lines[0].shortfall, dec!(3));
        assert_eq!(lines[1].shortfall, dec!(0));
    }

    #[test]
    fn inactive_items_are_ignored() {
        let lines = low_stock(&[ingredient("retired", dec!(5), dec!(0), false)]);
        assert!(lines.is_empty());
    }
}
