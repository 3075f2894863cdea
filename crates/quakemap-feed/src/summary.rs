//! USGS summary feed catalog.
//!
//! The USGS publishes twenty summary feeds, one per combination of time
//! window and minimum magnitude, named `{level}_{period}` (for example
//! `all_week` or `4.5_day`).

use std::fmt;
use std::str::FromStr;

use crate::error::FeedError;

/// Base URL of the USGS summary feeds.
pub const SUMMARY_BASE_URL: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// Time window covered by a summary feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedPeriod {
    /// Past hour.
    Hour,
    /// Past day.
    Day,
    /// Past seven days.
    Week,
    /// Past thirty days.
    Month,
}

impl FeedPeriod {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

/// Magnitude threshold of a summary feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedLevel {
    /// Every event.
    All,
    /// Magnitude 1.0 and above.
    M1,
    /// Magnitude 2.5 and above.
    M2_5,
    /// Magnitude 4.5 and above.
    M4_5,
    /// Events flagged significant.
    Significant,
}

impl FeedLevel {
    const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::M1 => "1.0",
            Self::M2_5 => "2.5",
            Self::M4_5 => "4.5",
            Self::Significant => "significant",
        }
    }
}

/// One of the USGS summary feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SummaryFeed {
    /// Minimum magnitude.
    pub level: FeedLevel,
    /// Time window.
    pub period: FeedPeriod,
}

impl SummaryFeed {
    /// The stock feed: all events from the past week.
    pub const ALL_WEEK: Self = Self {
        level: FeedLevel::All,
        period: FeedPeriod::Week,
    };

    /// Full GeoJSON URL of this feed.
    pub fn url(&self) -> String {
        format!("{SUMMARY_BASE_URL}/{self}.geojson")
    }
}

impl fmt::Display for SummaryFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.level.as_str(), self.period.as_str())
    }
}

impl FromStr for SummaryFeed {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (level_str, period_str) = s
            .trim()
            .rsplit_once('_')
            .ok_or_else(|| FeedError::Config(format!("summary feed '{s}' is not level_period")))?;

        let level = match level_str {
            "all" => FeedLevel::All,
            "1.0" => FeedLevel::M1,
            "2.5" => FeedLevel::M2_5,
            "4.5" => FeedLevel::M4_5,
            "significant" => FeedLevel::Significant,
            other => {
                return Err(FeedError::Config(format!(
                    "unknown summary feed level: {other}"
                )));
            }
        };

        let period = match period_str {
            "hour" => FeedPeriod::Hour,
            "day" => FeedPeriod::Day,
            "week" => FeedPeriod::Week,
            "month" => FeedPeriod::Month,
            other => {
                return Err(FeedError::Config(format!(
                    "unknown summary feed period: {other}"
                )));
            }
        };

        Ok(Self { level, period })
    }
}
