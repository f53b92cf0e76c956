use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use crate::{
    db::{
        models::{Medicine, MedicineInput, NewMedicineRow},
        time_of_day::encode_time_of_day,
    },
    store::{MedicineStore, StoreError},
    validation::{validate_medicine_input, ValidationError},
};

/// Which operation a storage failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Medicine {0} not found")]
    NotFound(i32),
    #[error("Failed to encode time of day: {0}")]
    Encoding(#[source] serde_json::Error),
    #[error("Stored time of day is not a list of strings: {source}")]
    Corrupt {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
    #[error("Store failed during {operation}: {source}")]
    Store {
        operation: Operation,
        #[source]
        source: StoreError,
    },
}

/// CRUD operations on medicine reminders.
#[derive(Clone)]
pub struct MedicineService {
    store: Arc<dyn MedicineStore>,
}

impl MedicineService {
    pub fn new(store: Arc<dyn MedicineStore>) -> Self {
        Self { store }
    }

    /// All reminders, most recently created first.
    pub async fn list(&self) -> Result<Vec<Medicine>, ServiceError> {
        let rows = self
            .store
            .list()
            .await
            .map_err(store_error(Operation::List))?;

        rows.into_iter()
            .map(|row| Medicine::try_from(row).map_err(corrupt(Operation::List)))
            .collect()
    }

    pub async fn get(&self, id: i32) -> Result<Medicine, ServiceError> {
        let row = self
            .store
            .get(id)
            .await
            .map_err(store_error(Operation::Get))?
            .ok_or(ServiceError::NotFound(id))?;

        Medicine::try_from(row).map_err(corrupt(Operation::Get))
    }

    /// Validates `input` and stores it with `created_at == updated_at == now`.
    pub async fn create(&self, input: MedicineInput) -> Result<Medicine, ServiceError> {
        let row = to_row(input)?;
        let stored = self
            .store
            .insert(row)
            .await
            .map_err(store_error(Operation::Create))?;

        log::info!("Created medicine {}", stored.id);
        Medicine::try_from(stored).map_err(corrupt(Operation::Create))
    }

    /// Validates `input` and overwrites the reminder `id`, refreshing
    /// `updated_at`. Never creates a reminder.
    pub async fn update(&self, id: i32, input: MedicineInput) -> Result<Medicine, ServiceError> {
        let row = to_row(input)?;
        let stored = self
            .store
            .update(id, row)
            .await
            .map_err(store_error(Operation::Update))?
            .ok_or(ServiceError::NotFound(id))?;

        log::info!("Updated medicine {}", id);
        Medicine::try_from(stored).map_err(corrupt(Operation::Update))
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let removed = self
            .store
            .delete(id)
            .await
            .map_err(store_error(Operation::Delete))?;

        if !removed {
            return Err(ServiceError::NotFound(id));
        }
        log::info!("Deleted medicine {}", id);
        Ok(())
    }
}

fn to_row(input: MedicineInput) -> Result<NewMedicineRow, ServiceError> {
    let (start_date, end_date) = validate_medicine_input(&input)?;

    let time_of_day = encode_time_of_day(&input.time_of_day).map_err(ServiceError::Encoding)?;
    let now = Utc::now();

    Ok(NewMedicineRow {
        name: input.name,
        dosage: input.dosage,
        frequency: input.frequency,
        time_of_day,
        start_date,
        end_date,
        notes: input.notes,
        created_at: now,
        updated_at: now,
    })
}

fn store_error(operation: Operation) -> impl FnOnce(StoreError) -> ServiceError {
    move |source| ServiceError::Store { operation, source }
}

fn corrupt(operation: Operation) -> impl FnOnce(serde_json::Error) -> ServiceError {
    move |source| ServiceError::Corrupt { operation, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryMedicineStore;
    use chrono::{Duration, TimeZone};

    fn service() -> MedicineService {
        MedicineService::new(Arc::new(InMemoryMedicineStore::new()))
    }

    fn input(name: &str, times: &[&str]) -> MedicineInput {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        MedicineInput {
            name: name.into(),
            dosage: "100mg".into(),
            frequency: "Once daily".into(),
            time_of_day: times.iter().map(|t| t.to_string()).collect(),
            start_date: Some(start),
            end_date: Some(start + Duration::days(7)),
            notes: "with water".into(),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_input_fields() {
        let service = service();
        let created = service
            .create(input("Aspirin", &["09:00", "21:00"]))
            .await
            .unwrap();

        assert!(created.id > 0);
        assert_eq!(created.created_at, created.updated_at);

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Aspirin");
        assert_eq!(fetched.time_of_day, vec!["09:00", "21:00"]);
        assert_eq!(fetched.notes, "with water");
    }

    #[tokio::test]
    async fn invalid_input_persists_nothing() {
        let service = service();
        let mut bad = input("Aspirin", &["09:00"]);
        bad.end_date = bad.start_date.map(|d| d - Duration::days(1));

        let err = service.create(bad.clone()).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::EndBeforeStart)
        ));
        assert!(service.list().await.unwrap().is_empty());

        let created = service.create(input("Aspirin", &["09:00"])).await.unwrap();
        let err = service.update(created.id, bad).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::EndBeforeStart)
        ));
        assert_eq!(service.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn update_overwrites_and_keeps_identity() {
        let service = service();
        let created = service.create(input("Ibuprofen", &["08:00"])).await.unwrap();

        let mut changes = input("Ibuprofen", &["08:00", "16:00", "00:00"]);
        changes.dosage = "200mg".into();
        changes.notes = String::new();
        let updated = service.update(created.id, changes).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.dosage, "200mg");
        assert_eq!(updated.notes, "");
        assert_eq!(updated.time_of_day, vec!["08:00", "16:00", "00:00"]);
    }

    #[tokio::test]
    async fn update_missing_is_not_upsert() {
        let service = service();
        let err = service
            .update(99, input("Ghost", &["08:00"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(99)));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let service = service();
        let created = service.create(input("Omeprazole", &["08:00"])).await.unwrap();

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.get(created.id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(created.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let service = service();
        let first = service.create(input("Lisinopril", &["08:00"])).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = service.create(input("Atorvastatin", &["20:00"])).await.unwrap();

        let ids: Vec<i32> = service.list().await.unwrap().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
