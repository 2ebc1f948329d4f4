use crate::{error::FetchError, model::ForecastSeries};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod http;

pub use http::HttpForecastSource;

/// Anything able to produce the forecast series for a city.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch_series(&self, city: &str) -> Result<ForecastSeries, FetchError>;
}
