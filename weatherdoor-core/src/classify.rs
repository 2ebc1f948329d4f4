//! Small decision tables turning raw forecast fields into presentation choices.
//!
//! Every table is an ordered list of `(predicate, result)` pairs; the first
//! matching row wins and a separate default covers everything else. Inputs
//! that cannot be parsed never match a row, so the default is used.

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use std::{fmt, ops::Range};

pub const DEFAULT_ICON: &str = "🌤️";

/// Condition keyword -> icon, in precedence order.
pub const ICON_RULES: &[(&str, &str)] = &[
    ("晴", "☀️"),   // clear
    ("多雲", "⛅"), // cloudy
    ("陰", "☁️"),   // overcast
    ("雨", "🌧️"),  // rain
    ("雷", "⛈️"),   // thunder
];

/// Pick the icon for a free-text condition description.
pub fn select_icon(condition: Option<&str>) -> &'static str {
    let Some(condition) = condition else {
        return DEFAULT_ICON;
    };

    ICON_RULES
        .iter()
        .find(|(keyword, _)| condition.contains(*keyword))
        .map_or(DEFAULT_ICON, |&(_, icon)| icon)
}

/// One (icon, text) choice shown next to a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdviceVariant {
    pub icon: &'static str,
    pub text: &'static str,
}

pub const RAIN_DEFAULT: AdviceVariant =
    AdviceVariant { icon: "🌂", text: "今天應該不用躲到任意門裡。" };
pub const RAIN_UMBRELLA: AdviceVariant =
    AdviceVariant { icon: "☂️", text: "大雄～帶把傘比較保險喔！" };

pub const CLOTH_DEFAULT: AdviceVariant =
    AdviceVariant { icon: "👕", text: "溫度剛剛好，可以輕鬆出門。" };
pub const CLOTH_LIGHT: AdviceVariant =
    AdviceVariant { icon: "🎽", text: "有點熱，短袖出發比較舒服！" };
pub const CLOTH_LAYER: AdviceVariant =
    AdviceVariant { icon: "🧥", text: "有點涼，哆啦A夢叫你多帶一件外套。" };

type Rule = (fn(i64) -> bool, AdviceVariant);

const RAIN_RULES: &[Rule] = &[(is_rainy, RAIN_UMBRELLA)];

const CLOTH_RULES: &[Rule] = &[(is_hot, CLOTH_LIGHT), (is_chilly, CLOTH_LAYER)];

fn is_rainy(probability: i64) -> bool {
    probability > 30
}

fn is_hot(max_temp: i64) -> bool {
    max_temp >= 28
}

fn is_chilly(max_temp: i64) -> bool {
    max_temp <= 20
}

fn pick(rules: &[Rule], value: Option<i64>, default: AdviceVariant) -> AdviceVariant {
    value
        .and_then(|v| rules.iter().find(|(matches, _)| matches(v)))
        .map_or(default, |(_, variant)| *variant)
}

/// Rain and clothing advice for one forecast slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advice {
    pub rain: AdviceVariant,
    pub cloth: AdviceVariant,
}

pub fn build_advice(rain_probability: Option<&str>, max_temp: Option<&str>) -> Advice {
    Advice {
        rain: pick(RAIN_RULES, rain_probability.and_then(parse_int), RAIN_DEFAULT),
        cloth: pick(CLOTH_RULES, max_temp.and_then(parse_int), CLOTH_DEFAULT),
    }
}

/// Coarse part of the day a forecast slot starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePeriod {
    Morning,
    Midday,
    Afternoon,
    Evening,
    LateNight,
}

impl TimePeriod {
    pub fn label(&self) -> &'static str {
        match self {
            TimePeriod::Morning => "早晨",
            TimePeriod::Midday => "中午",
            TimePeriod::Afternoon => "下午",
            TimePeriod::Evening => "晚上",
            TimePeriod::LateNight => "深夜",
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Local hour -> period. Hours outside every range are late night.
const PERIOD_RULES: &[(Range<u32>, TimePeriod)] = &[
    (5..11, TimePeriod::Morning),
    (11..14, TimePeriod::Midday),
    (14..18, TimePeriod::Afternoon),
    (18..23, TimePeriod::Evening),
];

pub fn classify_hour(hour: u32) -> TimePeriod {
    PERIOD_RULES
        .iter()
        .find(|(hours, _)| hours.contains(&hour))
        .map_or(TimePeriod::LateNight, |(_, period)| *period)
}

/// Period of a raw `startTime`. Unparseable timestamps are late night.
pub fn classify_period(start_time: &str) -> TimePeriod {
    parse_start_time(start_time).map_or(TimePeriod::LateNight, |t| classify_hour(t.hour()))
}

/// Rounded mean of the two bounds, `None` when either is not a number.
///
/// Halves round towards positive infinity, so 25.5 becomes 26 and -2.5
/// becomes -2.
pub fn average_temp(max_temp: Option<&str>, min_temp: Option<&str>) -> Option<i64> {
    let max = max_temp.and_then(parse_int)?;
    let min = min_temp.and_then(parse_int)?;
    Some(max.saturating_add(min).saturating_add(1).div_euclid(2))
}

/// Parse the leading integer of `s`: optional whitespace, optional sign and at
/// least one digit. Trailing garbage is ignored ("28°C" is 28) and digit runs
/// too long for `i64` saturate.
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let magnitude = rest[..end]
        .bytes()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    Some(if negative { -magnitude } else { magnitude })
}

/// Local wall-clock time of a raw `startTime`.
///
/// Timestamps carrying an offset are converted to the local zone; naive ones
/// are taken as local already.
pub fn parse_start_time(s: &str) -> Option<NaiveDateTime> {
    const NAIVE_FORMATS: &[&str] =
        &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    NAIVE_FORMATS.iter().find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}
