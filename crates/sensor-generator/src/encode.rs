//! ASCII-safe JSON payload encoding.
//!
//! The ingestion side expects pure ASCII, so every non-ASCII character that
//! `serde_json` would emit verbatim is rewritten as a `\uXXXX` escape
//! (UTF-16 surrogate pairs for characters outside the BMP). Non-ASCII can
//! only occur inside JSON strings, so the rewrite never changes meaning.

use crate::record::Record;

/// Errors from encoding or decoding a payload.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize a record into the payload bytes handed to the sink.
pub fn encode_record(record: &Record) -> Result<Vec<u8>, EncodeError> {
    let json = serde_json::to_string(record)?;
    Ok(escape_non_ascii(&json).into_bytes())
}

/// Parse a payload produced by [`encode_record`].
pub fn decode_record(payload: &[u8]) -> Result<Record, EncodeError> {
    Ok(serde_json::from_slice(payload)?)
}

/// Human-readable form printed to the console before each submit.
pub fn to_pretty_json(record: &Record) -> Result<String, EncodeError> {
    Ok(serde_json::to_string_pretty(record)?)
}

fn escape_non_ascii(json: &str) -> String {
    if json.is_ascii() {
        return json.to_string();
    }

    let mut out = String::with_capacity(json.len() + 16);
    let mut units = [0u16; 2];
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::iso_datetime;
    use indexmap::IndexMap;

    fn sample_record() -> Record {
        Record {
            meta_id: 100_000,
            node_id: "node_dev_1".to_string(),
            sensor: "sensor_dev_1".to_string(),
            feature_of_interest: None,
            data: IndexMap::from([("mag_x".to_string(), 0.25), ("mag_y".to_string(), 0.0)]),
            datetime: iso_datetime::parse("2024-03-01T12:00:00.000001").unwrap(),
        }
    }

    #[test]
    fn test_encode_decode_preserves_record() {
        let record = sample_record();
        let payload = encode_record(&record).unwrap();
        let decoded = decode_record(&payload).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_payload_is_ascii_with_exact_keys() {
        let payload = encode_record(&sample_record()).unwrap();
        assert!(payload.is_ascii());

        let value: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "data",
                "datetime",
                "feature_of_interest",
                "meta_id",
                "node_id",
                "sensor"
            ]
        );
        assert!(value["data"]["mag_x"].is_number());
        assert!(value["meta_id"].is_u64());
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        let mut record = sample_record();
        record.data = IndexMap::from([("températur€".to_string(), 0.5)]);
        record.feature_of_interest = Some("𝔸".to_string());

        let payload = encode_record(&record).unwrap();
        assert!(payload.is_ascii());

        let text = String::from_utf8(payload.clone()).unwrap();
        assert!(text.contains("temp\\u00e9ratur\\u20ac"));
        assert!(text.contains("\\ud835\\udd38"));

        assert_eq!(decode_record(&payload).unwrap(), record);
    }

    #[test]
    fn test_payload_keeps_feature_order() {
        let mut record = sample_record();
        record.sensor = "sensor_dev_4".to_string();
        record.data = IndexMap::from([
            ("temp".to_string(), 0.5),
            ("mag_z".to_string(), 0.25),
            ("oxygen".to_string(), 0.75),
        ]);

        let payload = encode_record(&record).unwrap();
        let text = String::from_utf8(payload.clone()).unwrap();
        let temp = text.find("\"temp\"").unwrap();
        let mag_z = text.find("\"mag_z\"").unwrap();
        let oxygen = text.find("\"oxygen\"").unwrap();
        assert!(temp < mag_z && mag_z < oxygen);

        let decoded = decode_record(&payload).unwrap();
        assert_eq!(
            decoded.feature_names().collect::<Vec<_>>(),
            ["temp", "mag_z", "oxygen"]
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_record(b"not json"),
            Err(EncodeError::Json(_))
        ));
    }
}
