//! Integration tests for the inventory service against in-memory
//! SurrealDB.

use despensa_core::DespensaError;
use despensa_core::models::area::{Area, AreaSelector};
use despensa_core::models::ingredient::{CreateIngredient, Unit};
use despensa_core::models::snapshot::CreateSnapshot;
use despensa_core::repository::{IngredientRepository, Pagination, SnapshotRepository};
use despensa_db::repository::{SurrealIngredientRepository, SurrealSnapshotRepository};
use despensa_inventory::InventoryService;
use rust_decimal::{Decimal, dec};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

type Db = surrealdb::engine::local::Db;

/// Spin up in-memory DB, run migrations, and stock two ingredients in
/// the warehouse.
async fn setup() -> (
    InventoryService<SurrealIngredientRepository<Db>, SurrealSnapshotRepository<Db>>,
    SurrealIngredientRepository<Db>,
    SurrealSnapshotRepository<Db>,
) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    despensa_db::run_migrations(&db).await.unwrap();

    let ingredient_repo = SurrealIngredientRepository::new(db.clone());
    let snapshot_repo = SurrealSnapshotRepository::new(db.clone());

    let a = ingredient_repo
        .create(CreateIngredient {
            name: "Tomate".into(),
            detail: String::new(),
            sku: "ING-001".into(),
            unit: Unit::Kilo,
            unit_cost: dec!(10),
            min_stock: dec!(1),
        })
        .await
        .unwrap();
    ingredient_repo
        .set_stock(a.id, Area::Almacen, dec!(2))
        .await
        .unwrap();

    let b = ingredient_repo
        .create(CreateIngredient {
            name: "Cebolla".into(),
            detail: String::new(),
            sku: "ING-002".into(),
            unit: Unit::Kilo,
            unit_cost: dec!(5),
            min_stock: dec!(1),
        })
        .await
        .unwrap();
    ingredient_repo
        .set_stock(b.id, Area::Almacen, dec!(3))
        .await
        .unwrap();

    let service = InventoryService::new(
        SurrealIngredientRepository::new(db.clone()),
        SurrealSnapshotRepository::new(db.clone()),
    );

    (service, ingredient_repo, snapshot_repo)
}

fn close(name: &str, area: AreaSelector) -> CreateSnapshot {
    CreateSnapshot {
        name: name.into(),
        description: String::new(),
        area,
    }
}

#[tokio::test]
async fn blank_name_is_rejected_before_persisting() {
    let (service, _, snapshot_repo) = setup().await;

    let result = service
        .create_snapshot(close("   ", AreaSelector::All))
        .await;
    assert!(matches!(result, Err(DespensaError::Validation { .. })));

    // Nothing was written.
    let stored = snapshot_repo.list(Pagination::default()).await.unwrap();
    assert_eq!(stored.total, 0);
}

#[tokio::test]
async fn snapshot_captures_quantities_and_totals() {
    let (service, _, _) = setup().await;

    let snapshot = service
        .create_snapshot(close("Cierre almacén", AreaSelector::One(Area::Almacen)))
        .await
        .unwrap();

    assert_eq!(snapshot.summary.total_items, 2);
    assert_eq!(snapshot.summary.total_quantity, dec!(5));
    assert_eq!(snapshot.summary.total_value, dec!(35));

    let tomate = snapshot.items.iter().find(|i| i.name == "Tomate").unwrap();
    assert_eq!(tomate.quantity, dec!(2));
    assert_eq!(tomate.total_value, dec!(20));

    let cebolla = snapshot.items.iter().find(|i| i.name == "Cebolla").unwrap();
    assert_eq!(cebolla.quantity, dec!(3));
    assert_eq!(cebolla.total_value, dec!(15));
}

#[tokio::test]
async fn all_areas_snapshot_sums_per_area_stock() {
    let (service, ingredient_repo, _) = setup().await;

    let tomate = ingredient_repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .find(|i| i.name == "Tomate")
        .unwrap();
    ingredient_repo
        .set_stock(tomate.id, Area::Cocina, dec!(1.5))
        .await
        .unwrap();

    let snapshot = service
        .create_snapshot(close("Cierre total", AreaSelector::All))
        .await
        .unwrap();

    let line = snapshot.items.iter().find(|i| i.name == "Tomate").unwrap();
    assert_eq!(line.quantity, dec!(3.5));
    assert_eq!(line.total_value, dec!(35.0));
}

#[tokio::test]
async fn stored_snapshot_is_immutable_under_stock_edits() {
    let (service, ingredient_repo, _) = setup().await;

    let snapshot = service
        .create_snapshot(close("Histórico", AreaSelector::One(Area::Almacen)))
        .await
        .unwrap();

    // Live stock changes after the close.
    let tomate = ingredient_repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .find(|i| i.name == "Tomate")
        .unwrap();
    ingredient_repo
        .set_stock(tomate.id, Area::Almacen, dec!(99))
        .await
        .unwrap();

    // The stored record still reflects the moment of the close.
    let reloaded = service
        .compare_snapshots(snapshot.id, snapshot.id)
        .await
        .unwrap();
    assert!(reloaded.comparison.is_empty());
    assert_eq!(reloaded.summary_difference.value, Decimal::ZERO);

    let fresh = service
        .create_snapshot(close("Nuevo", AreaSelector::One(Area::Almacen)))
        .await
        .unwrap();
    assert_ne!(fresh.summary.total_quantity, snapshot.summary.total_quantity);

    // The stored historical record still totals what it did at close
    // time: 99 + 3 now, against the original 2 + 3.
    let across = service
        .compare_snapshots(snapshot.id, fresh.id)
        .await
        .unwrap();
    assert_eq!(across.summary_difference.quantity, dec!(97));
}

#[tokio::test]
async fn comparison_of_missing_snapshot_is_not_found() {
    let (service, _, _) = setup().await;

    let snapshot = service
        .create_snapshot(close("Único", AreaSelector::All))
        .await
        .unwrap();

    let result = service
        .compare_snapshots(snapshot.id, Uuid::new_v4())
        .await;
    assert!(matches!(result, Err(DespensaError::NotFound { .. })));
}

#[tokio::test]
async fn comparison_reports_deltas_between_closes() {
    let (service, ingredient_repo, _) = setup().await;

    let first = service
        .create_snapshot(close("Apertura", AreaSelector::One(Area::Almacen)))
        .await
        .unwrap();

    // Consume one kilo of tomato, leave onion untouched.
    let tomate = ingredient_repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .find(|i| i.name == "Tomate")
        .unwrap();
    ingredient_repo
        .set_stock(tomate.id, Area::Almacen, dec!(1))
        .await
        .unwrap();

    let second = service
        .create_snapshot(close("Cierre", AreaSelector::One(Area::Almacen)))
        .await
        .unwrap();

    let comparison = service
        .compare_snapshots(first.id, second.id)
        .await
        .unwrap();

    assert_eq!(comparison.snapshot1.name, "Apertura");
    assert_eq!(comparison.snapshot2.name, "Cierre");

    // Only the changed line shows up.
    assert_eq!(comparison.comparison.len(), 1);
    let row = &comparison.comparison[0];
    assert_eq!(row.name, "Tomate");
    assert_eq!(row.snapshot1_quantity, dec!(2));
    assert_eq!(row.snapshot2_quantity, dec!(1));
    assert_eq!(row.difference, dec!(-1));
    assert_eq!(row.percent_change, Some(dec!(-50)));

    assert_eq!(comparison.summary_difference.items, 0);
    assert_eq!(comparison.summary_difference.quantity, dec!(-1));
    assert_eq!(comparison.summary_difference.value, dec!(-10));

    // The reverse comparison mirrors the aggregate deltas.
    let reverse = service
        .compare_snapshots(second.id, first.id)
        .await
        .unwrap();
    assert_eq!(
        reverse.summary_difference.value,
        -comparison.summary_difference.value
    );
}

#[tokio::test]
async fn snapshot_metadata_can_be_renamed() {
    let (service, _, snapshot_repo) = setup().await;

    let snapshot = service
        .create_snapshot(close("Borrador", AreaSelector::All))
        .await
        .unwrap();

    let renamed = service
        .update_snapshot_meta(
            snapshot.id,
            despensa_core::models::snapshot::UpdateSnapshotMeta {
                name: Some("Cierre de mes".into()),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Cierre de mes");
    assert_eq!(renamed.summary, snapshot.summary);

    service.delete_snapshot(snapshot.id).await.unwrap();
    let stored = snapshot_repo.list(Pagination::default()).await.unwrap();
    assert_eq!(stored.total, 0);
}

#[tokio::test]
async fn low_stock_report_flags_depleted_items() {
    let (service, ingredient_repo, _) = setup().await;

    // Drain the onion below its minimum of 1.
    let cebolla = ingredient_repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .find(|i| i.name == "Cebolla")
        .unwrap();
    ingredient_repo
        .set_stock(cebolla.id, Area::Almacen, dec!(0.5))
        .await
        .unwrap();

    let report = service.low_stock_report().await.unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].name, "Cebolla");
    assert_eq!(report[0].shortfall, dec!(0.5));
}
