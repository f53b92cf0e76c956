//! Storage access for the `medicines` table.
//!
//! Handlers never touch a connection directly; they go through a
//! [`MedicineStore`] handed to them at startup, so tests can swap in
//! [`InMemoryMedicineStore`].

use async_trait::async_trait;
use thiserror::Error;

use crate::db::models::{MedicineRow, NewMedicineRow};

mod memory;
mod postgres;

pub use memory::InMemoryMedicineStore;
pub use postgres::PgMedicineStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

#[async_trait]
pub trait MedicineStore: Send + Sync {
    /// All rows, most recently created first.
    async fn list(&self) -> Result<Vec<MedicineRow>, StoreError>;

    async fn get(&self, id: i32) -> Result<Option<MedicineRow>, StoreError>;

    /// Inserts a row and returns it with its assigned id.
    async fn insert(&self, row: NewMedicineRow) -> Result<MedicineRow, StoreError>;

    /// Overwrites every column but `id` and `created_at`. Returns `None` when
    /// no row has this id; nothing is inserted in that case.
    async fn update(&self, id: i32, row: NewMedicineRow)
        -> Result<Option<MedicineRow>, StoreError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;
}
