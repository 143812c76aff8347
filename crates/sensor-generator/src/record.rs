//! The record published once per tick.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

/// Inclusive upper bound of `meta_id`.
pub const MAX_META_ID: u32 = 100_000;

/// One synthetic sensor reading.
///
/// Records are built fresh for every tick and never mutated afterwards.
/// `feature_of_interest` is part of the downstream schema but is never
/// populated here; it always serializes as `null`. `data` keys follow the
/// order the topology declares the sensor's features in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub meta_id: u32,
    pub node_id: String,
    pub sensor: String,
    pub feature_of_interest: Option<String>,
    pub data: IndexMap<String, f64>,
    #[serde(with = "iso_datetime")]
    pub datetime: NaiveDateTime,
}

impl Record {
    /// Feature names present in `data`, in the sensor's declaration order.
    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }
}

/// ISO-8601 without offset, microsecond precision: `2016-08-05T00:00:08.246000`.
pub mod iso_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

    pub fn format(dt: &NaiveDateTime) -> String {
        dt.format(FORMAT).to_string()
    }

    /// Parses the microsecond form, and any other fractional precision.
    pub fn parse(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
    }

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 8, 5)
            .unwrap()
            .and_hms_micro_opt(0, 0, 8, 246_000)
            .unwrap()
    }

    #[test]
    fn test_datetime_format_has_micros_and_no_offset() {
        let formatted = iso_datetime::format(&sample_datetime());
        assert_eq!(formatted, "2016-08-05T00:00:08.246000");
    }

    #[test]
    fn test_datetime_parse_accepts_whole_seconds() {
        let parsed = iso_datetime::parse("2016-08-05T00:00:08").unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2016, 8, 5)
                .unwrap()
                .and_hms_opt(0, 0, 8)
                .unwrap()
        );
    }

    #[test]
    fn test_serialized_shape() {
        let record = Record {
            meta_id: 23,
            node_id: "node_dev_2".to_string(),
            sensor: "sensor_dev_2".to_string(),
            feature_of_interest: None,
            data: IndexMap::from([("humidity".to_string(), 0.5)]),
            datetime: sample_datetime(),
        };

        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 6);
        assert!(object["feature_of_interest"].is_null());
        assert_eq!(object["datetime"], "2016-08-05T00:00:08.246000");
        assert_eq!(object["data"]["humidity"], 0.5);
        assert_eq!(record.feature_names().collect::<Vec<_>>(), vec!["humidity"]);
    }
}
