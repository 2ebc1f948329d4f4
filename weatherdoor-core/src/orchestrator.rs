//! Drives one load of the page: loading state, the request joined with a
//! minimum display delay, rendering, and the failure notice.

use chrono::{Local, NaiveDateTime};
use std::{
    fmt::Debug,
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tracing::{debug, error, info, instrument};

use crate::{
    error::FetchError,
    page::{DisplayState, Page},
    render,
    source::ForecastSource,
};

/// Minimum time the loading indicator stays up.
pub const DEFAULT_MIN_LOADING: Duration = Duration::from_millis(1000);

/// Source of the wall-clock time used for period labels and the header.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// What happened to a single `fetch_weather` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The forecast was rendered and the content shown.
    Applied,
    /// The failure was surfaced to the user.
    Failed(String),
    /// A newer request started meanwhile; the result was dropped.
    Superseded,
}

pub fn page_title(city: &str) -> String {
    format!("{city}的天氣任意門")
}

pub fn failure_notice(err: &FetchError) -> String {
    format!("大雄！任意門壞掉了！({err})")
}

#[derive(Debug)]
pub struct FetchOrchestrator<S, P> {
    source: S,
    page: Mutex<P>,
    clock: Box<dyn Clock>,
    min_loading: Duration,
    latest: AtomicU64,
}

impl<S: ForecastSource, P: Page> FetchOrchestrator<S, P> {
    pub fn new(source: S, page: P) -> Self {
        Self {
            source,
            page: Mutex::new(page),
            clock: Box::new(SystemClock),
            min_loading: DEFAULT_MIN_LOADING,
            latest: AtomicU64::new(0),
        }
    }

    pub fn with_min_loading(mut self, min_loading: Duration) -> Self {
        self.min_loading = min_loading;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Exclusive access to the page. Never held across an await point.
    pub fn page(&self) -> MutexGuard<'_, P> {
        self.page.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn into_page(self) -> P {
        self.page.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load `city` onto the page.
    ///
    /// Only the most recently started call may touch the page once its
    /// request resolves; earlier ones report [`FetchOutcome::Superseded`].
    #[instrument(skip(self))]
    pub async fn fetch_weather(&self, city: &str) -> FetchOutcome {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        info!(token, "Loading forecast");

        self.page().set_display(DisplayState::Loading);

        let (_, result) =
            tokio::join!(tokio::time::sleep(self.min_loading), self.source.fetch_series(city));

        if self.latest.load(Ordering::SeqCst) != token {
            debug!(token, "Discarding stale response");
            return FetchOutcome::Superseded;
        }

        let mut page = self.page();
        match result {
            Ok(series) => {
                render::render(&mut *page, &series, self.clock.now());
                page.set_title(&page_title(city));
                page.set_display(DisplayState::Content);
                info!(forecasts = series.forecasts.len(), "Forecast rendered");
                FetchOutcome::Applied
            }
            Err(err) => {
                error!(error = %err, "Failed to load forecast");
                let notice = failure_notice(&err);
                page.set_display(DisplayState::Dismissed);
                page.alert(&notice);
                FetchOutcome::Failed(notice)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::ForecastSeries, page::HtmlPage};
    use async_trait::async_trait;

    #[derive(Debug)]
    struct Fixed(Result<ForecastSeries, String>);

    #[async_trait]
    impl ForecastSource for Fixed {
        async fn fetch_series(&self, _city: &str) -> Result<ForecastSeries, FetchError> {
            self.0.clone().map_err(|m| FetchError::rejected(Some(m)))
        }
    }

    #[test]
    fn title_and_notice_text() {
        assert_eq!(page_title("臺南市"), "臺南市的天氣任意門");
        let err = FetchError::rejected(Some("X".into()));
        assert_eq!(failure_notice(&err), "大雄！任意門壞掉了！(X)");
    }

    #[tokio::test]
    async fn success_shows_content_and_sets_title() {
        let series = ForecastSeries { city: "宜蘭縣".into(), forecasts: vec![] };
        let door = FetchOrchestrator::new(Fixed(Ok(series)), HtmlPage::default())
            .with_min_loading(Duration::ZERO);

        assert_eq!(door.fetch_weather("宜蘭縣").await, FetchOutcome::Applied);

        let page = door.page();
        assert_eq!(page.title(), "宜蘭縣的天氣任意門");
        assert!(page.is_content_visible());
        assert!(!page.is_loading_visible());
        assert!(page.alerts().is_empty());
    }

    #[tokio::test]
    async fn failure_alerts_and_hides_loading() {
        let door = FetchOrchestrator::new(Fixed(Err("X".into())), HtmlPage::default())
            .with_min_loading(Duration::ZERO);

        let outcome = door.fetch_weather("澎湖縣").await;
        assert_eq!(outcome, FetchOutcome::Failed("大雄！任意門壞掉了！(X)".into()));

        let page = door.into_page();
        assert!(!page.is_loading_visible());
        assert!(!page.is_content_visible());
        assert_eq!(page.title(), "天氣任意門");
        assert_eq!(page.alerts(), ["大雄！任意門壞掉了！(X)"]);
    }
}
