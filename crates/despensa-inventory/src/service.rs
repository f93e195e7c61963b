//! Inventory service — snapshot lifecycle orchestration.
//!
//! Generic over repository implementations so the engine has no
//! dependency on the database crate.

use despensa_core::error::{DespensaError, DespensaResult};
use despensa_core::models::snapshot::{
    CreateSnapshot, NewSnapshot, Snapshot, SnapshotComparison, UpdateSnapshotMeta,
};
use despensa_core::repository::{IngredientRepository, SnapshotRepository};
use tracing::info;
use uuid::Uuid;

use crate::compute;
use crate::report::{self, LowStockLine};

pub struct InventoryService<I: IngredientRepository, S: SnapshotRepository> {
    ingredient_repo: I,
    snapshot_repo: S,
}

impl<I: IngredientRepository, S: SnapshotRepository> InventoryService<I, S> {
    pub fn new(ingredient_repo: I, snapshot_repo: S) -> Self {
        Self {
            ingredient_repo,
            snapshot_repo,
        }
    }

    /// Close inventory: capture the live catalog into an immutable
    /// snapshot.
    pub async fn create_snapshot(&self, input: CreateSnapshot) -> DespensaResult<Snapshot> {
        // 1. Validate before touching storage.
        if input.name.trim().is_empty() {
            return Err(DespensaError::Validation {
                message: "snapshot name must not be blank".into(),
            });
        }

        // 2. One read of the full catalog — the consistent point-in-time
        //    view the capture is computed from.
        let ingredients = self.ingredient_repo.list_all().await?;

        // 3. Compute line items and summary.
        let items = compute::capture_items(&ingredients, input.area);
        let summary = compute::summarize(&items);

        // 4. Persist in a single write; the snapshot either fully exists
        //    or does not exist at all.
        let snapshot = self
            .snapshot_repo
            .create(NewSnapshot {
                name: input.name,
                description: input.description,
                area: input.area,
                items,
                summary,
            })
            .await?;

        info!(
            snapshot = %snapshot.id,
            area = snapshot.area.as_str(),
            items = snapshot.summary.total_items,
            "inventory closed"
        );

        Ok(snapshot)
    }

    /// Compare two stored snapshots. Loads both, mutates neither.
    pub async fn compare_snapshots(
        &self,
        id1: Uuid,
        id2: Uuid,
    ) -> DespensaResult<SnapshotComparison> {
        let s1 = self.snapshot_repo.get_by_id(id1).await?;
        let s2 = self.snapshot_repo.get_by_id(id2).await?;
        Ok(compute::compare(&s1, &s2))
    }

    /// Edit a snapshot's name/description. Line items and summary are
    /// historical fact and have no update path.
    pub async fn update_snapshot_meta(
        &self,
        id: Uuid,
        input: UpdateSnapshotMeta,
    ) -> DespensaResult<Snapshot> {
        self.snapshot_repo.update_meta(id, input).await
    }

    pub async fn delete_snapshot(&self, id: Uuid) -> DespensaResult<()> {
        self.snapshot_repo.delete(id).await
    }

    /// Active ingredients at or below their minimum-stock threshold.
    pub async fn low_stock_report(&self) -> DespensaResult<Vec<LowStockLine>> {
        let ingredients = self.ingredient_repo.list_all().await?;
        Ok(report::low_stock(&ingredients))
    }
}
