use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::db::models::MedicineInput;

/// The first rule a [`MedicineInput`] breaks. The messages are returned to
/// clients as-is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name is required")]
    NameRequired,
    #[error("dosage is required")]
    DosageRequired,
    #[error("frequency is required")]
    FrequencyRequired,
    #[error("time of day is required")]
    TimeOfDayRequired,
    #[error("start date is required")]
    StartDateRequired,
    #[error("end date is required")]
    EndDateRequired,
    #[error("end date must be after start date")]
    EndBeforeStart,
}

/// Checks `input` in a fixed order and reports the first failing rule:
/// name, dosage, frequency, time of day, start date, end date, then date order.
/// On success returns the checked `(start_date, end_date)`.
pub fn validate_medicine_input(
    input: &MedicineInput,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ValidationError> {
    if input.name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if input.dosage.is_empty() {
        return Err(ValidationError::DosageRequired);
    }
    if input.frequency.is_empty() {
        return Err(ValidationError::FrequencyRequired);
    }
    if input.time_of_day.is_empty() {
        return Err(ValidationError::TimeOfDayRequired);
    }
    let start_date = present(input.start_date).ok_or(ValidationError::StartDateRequired)?;
    let end_date = present(input.end_date).ok_or(ValidationError::EndDateRequired)?;
    if end_date < start_date {
        return Err(ValidationError::EndBeforeStart);
    }
    Ok((start_date, end_date))
}

/// `0001-01-01T00:00:00Z` is what many clients send for an unset timestamp,
/// so it counts as missing.
fn present(date: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    date.filter(|d| *d != zero_instant())
}

fn zero_instant() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
