use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::time_of_day::decode_time_of_day;

/// A medication reminder as returned to clients.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Medicine {
    pub id: i32,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub time_of_day: Vec<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row of the `medicines` table. `time_of_day` holds the encoded JSON array.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct MedicineRow {
    pub id: i32,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub time_of_day: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<MedicineRow> for Medicine {
    type Error = serde_json::Error;

    fn try_from(row: MedicineRow) -> Result<Self, Self::Error> {
        Ok(Medicine {
            id: row.id,
            name: row.name,
            dosage: row.dosage,
            frequency: row.frequency,
            time_of_day: decode_time_of_day(&row.time_of_day)?,
            start_date: row.start_date,
            end_date: row.end_date,
            notes: row.notes.unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Column values written on insert and update. `created_at` is ignored by
/// updates.
#[derive(Debug, Clone)]
pub struct NewMedicineRow {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub time_of_day: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body accepted by create and update.
///
/// Every field may be omitted or `null`; either way the gap is reported by
/// validation rather than by the JSON decoder, so clients get the rule that
/// failed.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MedicineInput {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dosage: String,
    #[serde(deserialize_with = "null_as_default")]
    pub frequency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub time_of_day: Vec<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub notes: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_tolerates_missing_fields() {
        let input: MedicineInput = serde_json::from_str(r#"{"name":"Aspirin"}"#).unwrap();
        assert_eq!(input.name, "Aspirin");
        assert!(input.dosage.is_empty());
        assert!(input.time_of_day.is_empty());
        assert!(input.start_date.is_none());
        assert!(input.notes.is_empty());
    }

    #[test]
    fn input_treats_null_as_missing() {
        let input: MedicineInput = serde_json::from_str(
            r#"{"name":null,"dosage":null,"frequency":null,"time_of_day":null,
                "start_date":null,"end_date":null,"notes":null}"#,
        )
        .unwrap();
        assert_eq!(input, MedicineInput::default());
    }

    #[test]
    fn input_still_rejects_wrong_types() {
        assert!(serde_json::from_str::<MedicineInput>(r#"{"time_of_day":"08:00"}"#).is_err());
        assert!(serde_json::from_str::<MedicineInput>(r#"{"name":5}"#).is_err());
    }

    #[test]
    fn input_parses_rfc3339_dates() {
        let input: MedicineInput = serde_json::from_str(
            r#"{"start_date":"2024-01-01T00:00:00Z","end_date":"2024-01-08T02:00:00+02:00"}"#,
        )
        .unwrap();
        assert_eq!(
            input.start_date.unwrap().to_rfc3339(),
            "2024-01-01T00:00:00+00:00"
        );
        assert_eq!(
            input.end_date.unwrap().to_rfc3339(),
            "2024-01-08T00:00:00+00:00"
        );
    }

    fn row(time_of_day: &str, notes: Option<&str>) -> MedicineRow {
        let now = Utc::now();
        MedicineRow {
            id: 1,
            name: "Aspirin".into(),
            dosage: "100mg".into(),
            frequency: "Once daily".into(),
            time_of_day: time_of_day.into(),
            start_date: now,
            end_date: now,
            notes: notes.map(str::to_string),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_converts_to_medicine() {
        let medicine = Medicine::try_from(row(r#"["09:00","21:00"]"#, None)).unwrap();
        assert_eq!(medicine.time_of_day, vec!["09:00", "21:00"]);
        assert_eq!(medicine.notes, "");
    }

    #[test]
    fn corrupt_time_of_day_fails_conversion() {
        assert!(Medicine::try_from(row("09:00", Some("with food"))).is_err());
    }

    #[test]
    fn medicine_uses_snake_case_keys() {
        let now = Utc::now();
        let medicine = Medicine {
            id: 7,
            name: "Aspirin".into(),
            dosage: "100mg".into(),
            frequency: "Once daily".into(),
            time_of_day: vec!["08:00".into()],
            start_date: now,
            end_date: now,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&medicine).unwrap();
        for key in [
            "id",
            "name",
            "dosage",
            "frequency",
            "time_of_day",
            "start_date",
            "end_date",
            "notes",
            "created_at",
            "updated_at",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["time_of_day"], serde_json::json!(["08:00"]));
    }
}
