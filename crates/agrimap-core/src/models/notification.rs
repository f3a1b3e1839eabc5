//! Visit-request notifications.
//!
//! Records are created by farmers through another channel and delivered to
//! this client by the initial fetch or the live stream. The client never
//! edits a record; it only swaps in the server's copy after a status change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AgrimapError;

/// Lifecycle state of a visit request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Scheduled,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Pending => "pending",
            NotificationStatus::Approved => "approved",
            NotificationStatus::Rejected => "rejected",
            NotificationStatus::Scheduled => "scheduled",
        }
    }

    /// Only pending requests can still be approved or rejected
    pub fn is_actionable(&self) -> bool {
        matches!(self, NotificationStatus::Pending)
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target state a client may request for a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTransition {
    Approved,
    Rejected,
    Scheduled,
}

impl StatusTransition {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTransition::Approved => "approved",
            StatusTransition::Rejected => "rejected",
            StatusTransition::Scheduled => "scheduled",
        }
    }
}

impl From<StatusTransition> for NotificationStatus {
    fn from(transition: StatusTransition) -> Self {
        match transition {
            StatusTransition::Approved => NotificationStatus::Approved,
            StatusTransition::Rejected => NotificationStatus::Rejected,
            StatusTransition::Scheduled => NotificationStatus::Scheduled,
        }
    }
}

impl fmt::Display for StatusTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusTransition {
    type Err = AgrimapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approved" | "approve" => Ok(StatusTransition::Approved),
            "rejected" | "reject" => Ok(StatusTransition::Rejected),
            "scheduled" | "schedule" => Ok(StatusTransition::Scheduled),
            _ => Err(AgrimapError::Parse {
                reason: format!("invalid status '{}'. Use approved, rejected, or scheduled", s),
            }),
        }
    }
}

/// A farmer's request for a field visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub farmer_name: String,
    pub farmer_id: String,
    pub village: String,
    pub location_details: String,

    #[serde(with = "timestamp")]
    pub preferred_date: DateTime<Utc>,

    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,

    pub status: NotificationStatus,
}

impl Notification {
    /// Alert body shown when the request arrives
    pub fn summary(&self) -> String {
        format!("From: {} ({})", self.farmer_name, self.village)
    }
}

/// RFC 3339 timestamps, also accepting bare `YYYY-MM-DD` dates as midnight UTC
mod timestamp {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}
