//! Presentation-ready shape of a forecast series.
//!
//! Nothing here touches a page; [`crate::templates`] turns these structs into
//! markup.

use chrono::{Datelike, NaiveDateTime, Weekday};

use crate::{
    classify::{self, Advice, TimePeriod},
    model::{ForecastRecord, ForecastSeries},
};

/// Shown wherever a raw value is missing or not a number.
pub const MISSING: &str = "--";

/// Prefix for upcoming slots that fall on another day of the month.
pub const NEXT_DAY_PREFIX: &str = "明天";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroCard {
    pub period: TimePeriod,
    pub city: String,
    pub icon: &'static str,
    pub average_temp: Option<i64>,
    pub condition: String,
    pub advice: Advice,
    pub rain: String,
    pub max_temp: String,
}

impl HeroCard {
    pub fn from_record(city: &str, record: &ForecastRecord) -> Self {
        Self {
            period: classify::classify_period(&record.start_time),
            city: city.to_string(),
            icon: classify::select_icon(record.weather.as_deref()),
            average_temp: classify::average_temp(
                record.max_temp.as_deref(),
                record.min_temp.as_deref(),
            ),
            condition: raw(&record.weather),
            advice: classify::build_advice(record.rain.as_deref(), record.max_temp.as_deref()),
            rain: raw(&record.rain),
            max_temp: raw(&record.max_temp),
        }
    }

    /// "早晨・臺南市"
    pub fn heading(&self) -> String {
        format!("{}・{}", self.period.label(), self.city)
    }

    pub fn temperature(&self) -> String {
        self.average_temp.map_or_else(|| MISSING.to_string(), |t| t.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniCard {
    pub period: TimePeriod,
    pub next_day: bool,
    pub icon: &'static str,
    pub min_temp: String,
    pub max_temp: String,
    pub rain: String,
}

impl MiniCard {
    pub fn from_record(record: &ForecastRecord, now: NaiveDateTime) -> Self {
        let start = classify::parse_start_time(&record.start_time);
        Self {
            period: classify::classify_period(&record.start_time),
            next_day: start.is_some_and(|t| t.day() != now.day()),
            icon: classify::select_icon(record.weather.as_deref()),
            min_temp: raw(&record.min_temp),
            max_temp: raw(&record.max_temp),
            rain: raw(&record.rain),
        }
    }

    pub fn label(&self) -> String {
        if self.next_day {
            format!("{NEXT_DAY_PREFIX}{}", self.period.label())
        } else {
            self.period.label().to_string()
        }
    }

    /// "20 - 26"
    pub fn temp_range(&self) -> String {
        format!("{} - {}", self.min_temp, self.max_temp)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastView {
    NoData,
    Forecast { hero: HeroCard, upcoming: Vec<MiniCard> },
}

/// Build the view for `series` as seen at local time `now`.
pub fn build_view(series: &ForecastSeries, now: NaiveDateTime) -> ForecastView {
    let Some(current) = series.current() else {
        return ForecastView::NoData;
    };

    ForecastView::Forecast {
        hero: HeroCard::from_record(&series.city, current),
        upcoming: series.upcoming().iter().map(|r| MiniCard::from_record(r, now)).collect(),
    }
}

/// Header timestamp, e.g. "3月1日 週六".
pub fn header_label(now: NaiveDateTime) -> String {
    format!("{}月{}日 {}", now.month(), now.day(), weekday_label(now.weekday()))
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "週日",
        Weekday::Mon => "週一",
        Weekday::Tue => "週二",
        Weekday::Wed => "週三",
        Weekday::Thu => "週四",
        Weekday::Fri => "週五",
        Weekday::Sat => "週六",
    }
}

fn raw(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| MISSING.to_string())
}
