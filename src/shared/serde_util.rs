//! Custom serde helpers for upstream and persisted formats.

/// (De)serializes `DateTime<Utc>` as Unix milliseconds.
///
/// The upstream chart endpoint sends sample times as JSON numbers that may be
/// integral or floating (`1711843200000` / `1711843200000.0`).
pub mod timestamp_ms {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(value.timestamp_millis())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = f64::deserialize(deserializer)?;
        from_millis(millis)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", millis)))
    }

    /// Converts float milliseconds to a UTC timestamp, `None` when out of range.
    pub fn from_millis(millis: f64) -> Option<DateTime<Utc>> {
        if !millis.is_finite() {
            return None;
        }
        DateTime::<Utc>::from_timestamp_millis(millis.round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "super::timestamp_ms")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_timestamp_ms_accepts_int_and_float() {
        let a: Sample = serde_json::from_str(r#"{"at": 1711843200000}"#).unwrap();
        let b: Sample = serde_json::from_str(r#"{"at": 1711843200000.0}"#).unwrap();
        assert_eq!(a.at, b.at);
        assert_eq!(a.at.timestamp_millis(), 1_711_843_200_000);
    }

    #[test]
    fn test_timestamp_ms_serializes_as_number() {
        let s: Sample = serde_json::from_str(r#"{"at": 1000}"#).unwrap();
        assert_eq!(serde_json::to_string(&s).unwrap(), r#"{"at":1000}"#);
    }

    #[test]
    fn test_from_millis_rejects_nan() {
        assert!(super::timestamp_ms::from_millis(f64::NAN).is_none());
    }
}
