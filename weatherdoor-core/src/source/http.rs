use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::{
    error::FetchError,
    model::{ApiEnvelope, ForecastSeries},
};

use super::ForecastSource;

/// Forecast source backed by the weather door HTTP API.
#[derive(Debug, Clone)]
pub struct HttpForecastSource {
    base_url: String,
    http: Client,
}

impl HttpForecastSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self { base_url: base_url.into(), http }
    }
}

#[async_trait]
impl ForecastSource for HttpForecastSource {
    #[instrument(skip(self))]
    async fn fetch_series(&self, city: &str) -> Result<ForecastSeries, FetchError> {
        debug!(url = %self.base_url, "Requesting forecast");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[("city", city)])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| FetchError::Transport(e.to_string()))?;

        let envelope: ApiEnvelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    body: truncate_body(&body),
                });
            }
            Err(e) => return Err(FetchError::Decode(e.to_string())),
        };

        if !envelope.success {
            return Err(FetchError::rejected(envelope.message));
        }

        envelope.data.ok_or(FetchError::MissingData)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_untouched() {
        assert_eq!(truncate_body("bad gateway"), "bad gateway");
    }

    #[test]
    fn long_bodies_are_cut_on_char_boundaries() {
        let body = "雨".repeat(250);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
    }
}
