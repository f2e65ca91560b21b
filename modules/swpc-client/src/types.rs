use serde::{Deserialize, Deserializer};

// --- Categorical alerts (json/alerts.json) ---

/// A product issued on the SWPC alerts feed (watches, warnings, alerts, summaries).
#[derive(Debug, Clone, Deserialize)]
pub struct Alert {
    pub message: String,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub issue_datetime: Option<String>,
}

// --- Planetary K-index (json/planetary_k_index_1m.json) ---

#[derive(Debug, Clone, Deserialize)]
pub struct KpIndex {
    pub time_tag: String,
    #[serde(rename = "kp_index", deserialize_with = "lenient_f64")]
    pub kp: f64,
}

// --- Solar wind summary (products/summary/dscovr-solar-wind.json) ---

#[derive(Debug, Clone, Deserialize)]
pub struct BzReading {
    #[serde(rename = "bz_gsm", deserialize_with = "lenient_f64")]
    pub bz: f64,
    pub time_tag: String,
}

/// Particle or X-ray flux sample. Parsed but not evaluated by any alert yet.
#[derive(Debug, Clone, Deserialize)]
pub struct FluxReading {
    pub energy: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub flux: f64,
    pub time_tag: String,
}

/// Most recent entry of a time-ordered feed. SWPC lists are oldest-first.
pub fn latest<T>(readings: &[T]) -> Option<&T> {
    readings.last()
}

/// SWPC `products/` endpoints quote numbers as strings; `json/` endpoints don't.
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrString {
        Num(f64),
        Str(String),
    }

    match NumOrString::deserialize(deserializer)? {
        NumOrString::Num(n) => Ok(n),
        NumOrString::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alerts_parse_with_extra_fields() {
        let json = r#"[
            {
                "product_id": "K07A",
                "issue_datetime": "2025-06-01 12:05:00.000",
                "message": "Space Weather Message Code: ALTK07\r\nALERT: Geomagnetic K-index of 7\r\nNOAA Scale: G3 - Strong"
            },
            {"message": "WATCH: Geomagnetic Storm Category G1 Predicted"}
        ]"#;

        let alerts: Vec<Alert> = serde_json::from_str(json).unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].product_id.as_deref(), Some("K07A"));
        assert!(alerts[0].message.contains("G3 - Strong"));
        assert!(alerts[1].issue_datetime.is_none());
    }

    #[test]
    fn kp_index_accepts_integers_and_floats() {
        let json = r#"[
            {"time_tag": "2025-06-01T12:00:00", "kp_index": 5, "estimated_kp": 5.33, "kp": "5P"},
            {"time_tag": "2025-06-01T12:01:00", "kp_index": 7.5}
        ]"#;

        let readings: Vec<KpIndex> = serde_json::from_str(json).unwrap();
        assert_eq!(readings[0].kp, 5.0);
        assert_eq!(latest(&readings).unwrap().time_tag, "2025-06-01T12:01:00");
        assert_eq!(latest(&readings).unwrap().kp, 7.5);
    }

    #[test]
    fn bz_accepts_quoted_numbers() {
        let json = r#"[
            {"bz_gsm": "-3", "time_tag": "2025-06-01 12:00:00.000"},
            {"bz_gsm": -9.25, "time_tag": "2025-06-01 12:01:00.000"}
        ]"#;

        let readings: Vec<BzReading> = serde_json::from_str(json).unwrap();
        assert_eq!(readings[0].bz, -3.0);
        assert_eq!(readings[1].bz, -9.25);
    }

    #[test]
    fn bz_rejects_non_numeric_string() {
        let json = r#"[{"bz_gsm": "n/a", "time_tag": "2025-06-01 12:00:00.000"}]"#;
        assert!(serde_json::from_str::<Vec<BzReading>>(json).is_err());
    }

    #[test]
    fn flux_reading_parses() {
        let json = r#"{"energy": ">=10 MeV", "flux": 12.5, "time_tag": "2025-06-01T12:00:00Z"}"#;
        let reading: FluxReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.energy, ">=10 MeV");
        assert_eq!(reading.flux, 12.5);
    }

    #[test]
    fn latest_of_empty_is_none() {
        let empty: Vec<KpIndex> = Vec::new();
        assert!(latest(&empty).is_none());
    }
}
