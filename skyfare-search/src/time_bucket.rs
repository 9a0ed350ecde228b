use serde::{Deserialize, Serialize};
use crate::timestamp::local_hour;

/// Coarse time-of-day class of a departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeBucket {
    #[serde(rename = "before6am")]
    BeforeSixAm,
    #[serde(rename = "6to12", alias = "sixAmToNoon")]
    SixToNoon,
    #[serde(rename = "12to18", alias = "noonTo6pm")]
    NoonToSix,
    #[serde(rename = "after6pm")]
    AfterSixPm,
}

impl TimeBucket {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=5 => TimeBucket::BeforeSixAm,
            6..=11 => TimeBucket::SixToNoon,
            12..=17 => TimeBucket::NoonToSix,
            _ => TimeBucket::AfterSixPm,
        }
    }
}

/// Classify a timestamp by its local hour.
///
/// Total: a timestamp that cannot be read falls back to
/// [`TimeBucket::BeforeSixAm`], the same way everywhere.
pub fn classify(timestamp: &str) -> TimeBucket {
    match local_hour(timestamp) {
        Some(hour) => TimeBucket::from_hour(hour),
        None => TimeBucket::BeforeSixAm,
    }
}
