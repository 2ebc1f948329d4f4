use serde::{Deserialize, Deserializer};

/// One forecast slot as returned by the weather API.
///
/// Temperatures and rain probability arrive as text-encoded numbers; they are
/// kept verbatim and only parsed when the view model is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRecord {
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub max_temp: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub min_temp: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub rain: Option<String>,
}

/// Forecasts for a single city. Index 0 is the current slot, the rest follow
/// in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForecastSeries {
    pub city: String,
    #[serde(default)]
    pub forecasts: Vec<ForecastRecord>,
}

impl ForecastSeries {
    pub fn current(&self) -> Option<&ForecastRecord> {
        self.forecasts.first()
    }

    pub fn upcoming(&self) -> &[ForecastRecord] {
        self.forecasts.get(1..).unwrap_or_default()
    }
}

/// Top-level JSON body of the weather API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<ForecastSeries>,
    #[serde(default)]
    pub message: Option<String>,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_encoded_record() {
        let json = r#"{
            "startTime": "2025-03-01T09:00:00",
            "weather": "多雲時晴",
            "maxTemp": "30",
            "minTemp": "22",
            "rain": "10"
        }"#;

        let record: ForecastRecord = serde_json::from_str(json).expect("valid record");
        assert_eq!(record.start_time, "2025-03-01T09:00:00");
        assert_eq!(record.weather.as_deref(), Some("多雲時晴"));
        assert_eq!(record.max_temp.as_deref(), Some("30"));
        assert_eq!(record.min_temp.as_deref(), Some("22"));
        assert_eq!(record.rain.as_deref(), Some("10"));
    }

    #[test]
    fn numbers_are_kept_as_text_and_missing_fields_are_none() {
        let json = r#"{ "startTime": "2025-03-01T09:00:00", "maxTemp": 31, "rain": null }"#;

        let record: ForecastRecord = serde_json::from_str(json).expect("valid record");
        assert_eq!(record.max_temp.as_deref(), Some("31"));
        assert_eq!(record.min_temp, None);
        assert_eq!(record.rain, None);
        assert_eq!(record.weather, None);
    }

    #[test]
    fn missing_forecasts_is_an_empty_series() {
        let series: ForecastSeries = serde_json::from_str(r#"{ "city": "臺北市" }"#).unwrap();
        assert!(series.forecasts.is_empty());
        assert!(series.current().is_none());
        assert!(series.upcoming().is_empty());
    }

    #[test]
    fn envelope_without_data_or_message() {
        let env: ApiEnvelope = serde_json::from_str(r#"{ "success": false }"#).unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert!(env.message.is_none());
    }
}
