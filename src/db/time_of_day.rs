//! Storage encoding of the time-of-day list.
//!
//! The `time_of_day` column holds a compact JSON array of strings. Entries are
//! kept verbatim and in order; their format is never checked.

/// Encodes the list for the `time_of_day` column.
pub fn encode_time_of_day(times: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(times)
}

/// Decodes a `time_of_day` column value.
pub fn decode_time_of_day(stored: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str(stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_compact_array() {
        let times = vec!["09:00".to_string(), "21:00".to_string()];
        assert_eq!(encode_time_of_day(&times).unwrap(), r#"["09:00","21:00"]"#);
    }

    #[test]
    fn decode_preserves_order() {
        let times = decode_time_of_day(r#"["21:00","09:00","13:30"]"#).unwrap();
        assert_eq!(times, vec!["21:00", "09:00", "13:30"]);
    }

    #[test]
    fn stored_values_reencode_identically() {
        for stored in [
            r#"["08:00"]"#,
            r#"["08:00","14:00","20:00","02:00"]"#,
            r#"["after breakfast","bedtime"]"#,
            r#"["\"quoted\"","ünïcode"]"#,
        ] {
            let decoded = decode_time_of_day(stored).unwrap();
            assert_eq!(encode_time_of_day(&decoded).unwrap(), stored);
        }
    }

    #[test]
    fn arbitrary_strings_are_accepted() {
        let times = vec!["not a time".to_string(), String::new()];
        let stored = encode_time_of_day(&times).unwrap();
        assert_eq!(decode_time_of_day(&stored).unwrap(), times);
    }

    #[test]
    fn rejects_non_array_values() {
        assert!(decode_time_of_day("09:00").is_err());
        assert!(decode_time_of_day(r#"{"at":"09:00"}"#).is_err());
        assert!(decode_time_of_day("[1,2]").is_err());
    }
}
