//! Timing and ordering behaviour of the fetch orchestrator, on tokio's paused
//! clock so the delays are deterministic.

use async_trait::async_trait;
use std::{collections::HashMap, time::Duration};
use tokio::time::Instant;
use weatherdoor_core::{
    FetchError, FetchOrchestrator, FetchOutcome, ForecastSeries, ForecastSource, HtmlPage,
};

/// Answers each city after its own latency; unknown cities are rejected.
#[derive(Debug, Default)]
struct SlowSource {
    latency: HashMap<String, Duration>,
}

impl SlowSource {
    fn with(mut self, city: &str, latency_ms: u64) -> Self {
        self.latency.insert(city.to_string(), Duration::from_millis(latency_ms));
        self
    }
}

#[async_trait]
impl ForecastSource for SlowSource {
    async fn fetch_series(&self, city: &str) -> Result<ForecastSeries, FetchError> {
        let latency = self
            .latency
            .get(city)
            .copied()
            .ok_or_else(|| FetchError::rejected(Some(format!("unknown city {city}"))))?;
        tokio::time::sleep(latency).await;
        Ok(ForecastSeries { city: city.to_string(), forecasts: vec![] })
    }
}

#[tokio::test(start_paused = true)]
async fn fast_response_waits_for_minimum_loading_time() {
    let door = FetchOrchestrator::new(SlowSource::default().with("臺北市", 50), HtmlPage::default());

    let started = Instant::now();
    assert_eq!(door.fetch_weather("臺北市").await, FetchOutcome::Applied);
    assert!(started.elapsed() >= Duration::from_millis(1000));
    assert!(started.elapsed() < Duration::from_millis(1100));
}

#[tokio::test(start_paused = true)]
async fn slow_response_is_not_delayed_further() {
    let door = FetchOrchestrator::new(SlowSource::default().with("臺北市", 3000), HtmlPage::default());

    let started = Instant::now();
    door.fetch_weather("臺北市").await;
    assert!(started.elapsed() >= Duration::from_millis(3000));
    assert!(started.elapsed() < Duration::from_millis(3100));
}

#[tokio::test(start_paused = true)]
async fn loading_indicator_is_visible_while_waiting() {
    let door = FetchOrchestrator::new(SlowSource::default().with("臺東縣", 10), HtmlPage::default());

    let probe = async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        let page = door.page();
        (page.is_loading_visible(), page.is_content_visible())
    };

    let (outcome, during) = tokio::join!(door.fetch_weather("臺東縣"), probe);
    assert_eq!(outcome, FetchOutcome::Applied);
    assert_eq!(during, (true, false));
}

#[tokio::test(start_paused = true)]
async fn only_latest_request_reaches_the_page() {
    let source = SlowSource::default().with("高雄市", 4000).with("屏東縣", 1500);
    let door = FetchOrchestrator::new(source, HtmlPage::default());

    let second = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        door.fetch_weather("屏東縣").await
    };

    let (first, second) = tokio::join!(door.fetch_weather("高雄市"), second);

    assert_eq!(first, FetchOutcome::Superseded);
    assert_eq!(second, FetchOutcome::Applied);
    assert_eq!(door.page().title(), "屏東縣的天氣任意門");
}

#[tokio::test(start_paused = true)]
async fn stale_failure_is_not_surfaced() {
    let source = SlowSource::default().with("嘉義市", 1200);
    let door = FetchOrchestrator::new(source, HtmlPage::default());

    let second = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        door.fetch_weather("嘉義市").await
    };

    let (first, second) = tokio::join!(door.fetch_weather("不存在"), second);

    assert_eq!(first, FetchOutcome::Superseded);
    assert_eq!(second, FetchOutcome::Applied);
    assert!(door.page().alerts().is_empty());
}
