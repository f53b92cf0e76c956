use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{MedicineStore, StoreError};
use crate::db::models::{MedicineRow, NewMedicineRow};

/// [`MedicineStore`] kept in process memory. Ids start at 1 and are never
/// reused, like a `SERIAL` column.
#[derive(Default)]
pub struct InMemoryMedicineStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i32,
    rows: BTreeMap<i32, MedicineRow>,
}

impl InMemoryMedicineStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MedicineStore for InMemoryMedicineStore {
    async fn list(&self) -> Result<Vec<MedicineRow>, StoreError> {
        let inner = self.inner.read().await;
        let mut rows: Vec<MedicineRow> = inner.rows.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<Option<MedicineRow>, StoreError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, row: NewMedicineRow) -> Result<MedicineRow, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let stored = MedicineRow {
            id: inner.last_id,
            name: row.name,
            dosage: row.dosage,
            frequency: row.frequency,
            time_of_day: row.time_of_day,
            start_date: row.start_date,
            end_date: row.end_date,
            notes: Some(row.notes),
            created_at: row.created_at,
            updated_at: row.updated_at,
        };
        inner.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: i32,
        row: NewMedicineRow,
    ) -> Result<Option<MedicineRow>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(stored) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };
        stored.name = row.name;
        stored.dosage = row.dosage;
        stored.frequency = row.frequency;
        stored.time_of_day = row.time_of_day;
        stored.start_date = row.start_date;
        stored.end_date = row.end_date;
        stored.notes = Some(row.notes);
        stored.updated_at = row.updated_at;
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }
}
