// ── Alarm domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Alarm severity. Backend codes: 1 info, 2 ok, 3 warn, 4 error.
///
/// Display order ranks error highest; the rank table `{4,3,2,1}` drives
/// alarm sorting everywhere.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Severity {
    Info,
    Ok,
    Warn,
    Error,
}

impl Severity {
    /// Map the backend's numeric severity code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Info),
            2 => Some(Self::Ok),
            3 => Some(Self::Warn),
            4 => Some(Self::Error),
            _ => None,
        }
    }

    /// Numeric code as the backend emits it.
    pub fn code(&self) -> i64 {
        match self {
            Self::Info => 1,
            Self::Ok => 2,
            Self::Warn => 3,
            Self::Error => 4,
        }
    }

    /// Sort rank: higher sorts first. Follows the fixed table
    /// error(4) > warn(3) > ok(2) > info(1).
    pub fn rank(&self) -> i64 {
        self.code()
    }
}

/// An alarm raised against an entity. Alarms carry no backend id; identity
/// is the `(entity_id, key, start_time)` tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub severity: Option<Severity>,
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub key: Option<String>,
    pub status: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    /// Seconds since the alarm started. Negative values mean "unknown".
    pub duration_secs: Option<i64>,
}

impl Alarm {
    /// Rank used for severity-descending sorts; unknown severities sort
    /// after every known one.
    pub fn severity_rank(&self) -> i64 {
        self.severity.map_or(0, |s| s.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_codes_round_trip() {
        for code in 1..=4 {
            let severity = Severity::from_code(code).expect("known code");
            assert_eq!(severity.code(), code);
        }
        assert_eq!(Severity::from_code(0), None);
        assert_eq!(Severity::from_code(9), None);
    }

    #[test]
    fn severity_rank_ordering() {
        assert!(Severity::Error.rank() > Severity::Warn.rank());
        assert!(Severity::Warn.rank() > Severity::Ok.rank());
        assert!(Severity::Ok.rank() > Severity::Info.rank());
    }

    #[test]
    fn severity_parses_labels() {
        assert_eq!("error".parse::<Severity>().ok(), Some(Severity::Error));
        assert_eq!("WARN".parse::<Severity>().ok(), Some(Severity::Warn));
    }
}
