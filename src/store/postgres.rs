use async_trait::async_trait;
use sqlx::PgPool;

use super::{MedicineStore, StoreError};
use crate::db::models::{MedicineRow, NewMedicineRow};

const COLUMNS: &str = "id, name, dosage, frequency, time_of_day, start_date, end_date, notes, created_at, updated_at";

/// [`MedicineStore`] backed by a PostgreSQL pool. Each call is a single
/// statement; no transaction spans calls.
#[derive(Clone)]
pub struct PgMedicineStore {
    pool: PgPool,
}

impl PgMedicineStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MedicineStore for PgMedicineStore {
    async fn list(&self) -> Result<Vec<MedicineRow>, StoreError> {
        let rows = sqlx::query_as::<_, MedicineRow>(&format!(
            "SELECT {} FROM medicines ORDER BY created_at DESC, id DESC",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<Option<MedicineRow>, StoreError> {
        let row = sqlx::query_as::<_, MedicineRow>(&format!(
            "SELECT {} FROM medicines WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert(&self, row: NewMedicineRow) -> Result<MedicineRow, StoreError> {
        let inserted = sqlx::query_as::<_, MedicineRow>(&format!(
            "INSERT INTO medicines (name, dosage, frequency, time_of_day, start_date, end_date, notes, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {}",
            COLUMNS
        ))
        .bind(row.name)
        .bind(row.dosage)
        .bind(row.frequency)
        .bind(row.time_of_day)
        .bind(row.start_date)
        .bind(row.end_date)
        .bind(row.notes)
        .bind(row.created_at)
        .bind(row.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }

    async fn update(
        &self,
        id: i32,
        row: NewMedicineRow,
    ) -> Result<Option<MedicineRow>, StoreError> {
        let updated = sqlx::query_as::<_, MedicineRow>(&format!(
            "UPDATE medicines \
             SET name = $1, dosage = $2, frequency = $3, time_of_day = $4, \
                 start_date = $5, end_date = $6, notes = $7, updated_at = $8 \
             WHERE id = $9 \
             RETURNING {}",
            COLUMNS
        ))
        .bind(row.name)
        .bind(row.dosage)
        .bind(row.frequency)
        .bind(row.time_of_day)
        .bind(row.start_date)
        .bind(row.end_date)
        .bind(row.notes)
        .bind(row.updated_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM medicines WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
