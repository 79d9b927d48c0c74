//! Time-window vocabulary shared by the engine and its collaborators.
//!
//! Everything here is a plain value: rolling-window presets, bucket
//! granularities, resolved time ranges and the zone that decides where a
//! "day" starts.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Naive layouts accepted for movement timestamps. Read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Rolling window ending at "now".
///
/// Presets mean "the last N units", never "this calendar unit".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowPreset {
    Day,
    #[default]
    Week,
    Month,
    Quarter,
    Year,
}

impl WindowPreset {
    /// All presets in display order.
    pub const ALL: [WindowPreset; 5] = [
        WindowPreset::Day,
        WindowPreset::Week,
        WindowPreset::Month,
        WindowPreset::Quarter,
        WindowPreset::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowPreset::Day => "day",
            WindowPreset::Week => "week",
            WindowPreset::Month => "month",
            WindowPreset::Quarter => "quarter",
            WindowPreset::Year => "year",
        }
    }

    /// Human-readable label for preset pickers.
    pub fn label(&self) -> &'static str {
        match self {
            WindowPreset::Day => "Last day",
            WindowPreset::Week => "Last week",
            WindowPreset::Month => "Last month",
            WindowPreset::Quarter => "Last quarter",
            WindowPreset::Year => "Last year",
        }
    }

    /// Fixed lookback measured backward from "now".
    pub fn lookback(&self) -> Duration {
        match self {
            WindowPreset::Day => Duration::hours(24),
            WindowPreset::Week => Duration::days(7),
            WindowPreset::Month => Duration::days(30),
            WindowPreset::Quarter => Duration::days(90),
            WindowPreset::Year => Duration::days(365),
        }
    }

    /// Hourly buckets for the one-day window, daily buckets for everything longer.
    pub fn default_granularity(&self) -> Granularity {
        match self {
            WindowPreset::Day => Granularity::Hour,
            _ => Granularity::Day,
        }
    }

    /// Strict, case-insensitive parse.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Some(WindowPreset::Day),
            "week" => Some(WindowPreset::Week),
            "month" => Some(WindowPreset::Month),
            "quarter" => Some(WindowPreset::Quarter),
            "year" => Some(WindowPreset::Year),
            _ => None,
        }
    }

    /// Parse a preset name, falling back to [`WindowPreset::Week`] for
    /// anything unrecognised.
    pub fn parse_or_default(value: &str) -> Self {
        Self::parse(value).unwrap_or_else(|| {
            log::debug!(
                "Unknown window preset '{}', falling back to '{}'",
                value,
                WindowPreset::default()
            );
            WindowPreset::default()
        })
    }
}

impl fmt::Display for WindowPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WindowPreset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_or_default(&raw))
    }
}

/// Bucket width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hour,
    Day,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Hour => "hour",
            Granularity::Day => "day",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hour" | "hourly" => Some(Granularity::Hour),
            "day" | "daily" => Some(Granularity::Day),
            _ => None,
        }
    }

    /// Nominal width of one bucket. Day buckets may be 23 or 25 hours long
    /// across DST changes in zones that observe it.
    pub fn nominal_step(&self) -> Duration {
        match self {
            Granularity::Hour => Duration::hours(1),
            Granularity::Day => Duration::days(1),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed interval `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.from && at <= self.to
    }

    pub fn duration(&self) -> Duration {
        self.to - self.from
    }
}

/// Zone in which bucket boundaries (start of hour, midnight) are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BucketZone {
    /// The host's local time zone.
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl fmt::Display for BucketZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketZone::Local => f.write_str("local"),
            BucketZone::Utc => f.write_str("utc"),
            BucketZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

impl FromStr for BucketZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(BucketZone::Local),
            "utc" | "z" => Ok(BucketZone::Utc),
            _ => parse_offset(value)
                .map(BucketZone::Fixed)
                .ok_or_else(|| format!("Invalid bucket zone '{}': use local, utc or +HH:MM", s)),
        }
    }
}

impl TryFrom<String> for BucketZone {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BucketZone> for String {
    fn from(zone: BucketZone) -> Self {
        zone.to_string()
    }
}

/// Parse `+HH:MM`, `-HH:MM`, `+HHMM` or `+HH`.
fn parse_offset(value: &str) -> Option<FixedOffset> {
    let (sign, rest) = match value.as_bytes().first()? {
        b'+' => (1, &value[1..]),
        b'-' => (-1, &value[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some(parts) => parts,
        None if rest.len() == 4 && rest.is_char_boundary(2) => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60) as i32)
}

/// Parse a timestamp the way movement payloads and query strings carry them.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.fff]` and
/// `YYYY-MM-DD HH:MM:SS[.fff]` (read as UTC) and bare `YYYY-MM-DD` dates
/// (UTC midnight).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}
