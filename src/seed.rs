use std::sync::Arc;

use chrono::{Duration, Utc};
use envconfig::Envconfig;
use medicine_reminder::{
    config::Config,
    db::{init_db, models::MedicineInput, PoolSettings},
    services::MedicineService,
    store::PgMedicineStore,
};

type Error = Box<dyn std::error::Error + Send + Sync>;

const SEED_MEDICINES: [(&str, &str, &str, &[&str]); 10] = [
    ("Aspirin", "100mg", "Once daily", &["08:00"]),
    ("Paracetamol", "500mg", "Every 6 hours", &["08:00", "14:00", "20:00", "02:00"]),
    ("Ibuprofen", "200mg", "Every 8 hours", &["08:00", "16:00", "00:00"]),
    ("Amoxicillin", "250mg", "Twice daily", &["09:00", "21:00"]),
    ("Metformin", "500mg", "Twice daily", &["08:00", "20:00"]),
    ("Lisinopril", "10mg", "Once daily", &["08:00"]),
    ("Amlodipine", "5mg", "Once daily", &["08:00"]),
    ("Atorvastatin", "20mg", "Once daily", &["20:00"]),
    ("Omeprazole", "20mg", "Once daily", &["08:00"]),
    ("Metoprolol", "25mg", "Twice daily", &["08:00", "20:00"]),
];

fn get_seed_data() -> Vec<MedicineInput> {
    let start = Utc::now();
    let end = start + Duration::days(30);

    SEED_MEDICINES
        .iter()
        .map(|(name, dosage, frequency, times)| MedicineInput {
            name: name.to_string(),
            dosage: dosage.to_string(),
            frequency: frequency.to_string(),
            time_of_day: times.iter().map(|t| t.to_string()).collect(),
            start_date: Some(start),
            end_date: Some(end),
            notes: format!("Notes for {}", name),
        })
        .collect()
}

pub async fn seed_database(service: &MedicineService) -> Result<(), Error> {
    for input in get_seed_data() {
        let medicine = service.create(input).await?;
        log::info!("Seeded {} (id {})", medicine.name, medicine.id);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::init_from_env()?;
    let settings = PoolSettings {
        max_connections: 1,
        acquire_timeout: config.acquire_timeout(),
    };
    let pool = init_db(&config.connection_string(), settings).await?;

    let service = MedicineService::new(Arc::new(PgMedicineStore::new(pool.clone())));
    seed_database(&service).await?;

    pool.close().await;
    Ok(())
}
