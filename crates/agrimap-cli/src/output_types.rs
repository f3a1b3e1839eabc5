use agrimap_core::models::{Notification, Point};
use serde::Serialize;
use tabled::Tabled;

/// Output for area command
#[derive(Debug, Serialize)]
pub struct AreaOutput {
    pub points: usize,
    pub square_meters: f64,
    pub hectares: f64,
    pub centroid: Option<Point>,
    pub ellipsoid_square_meters: Option<f64>,
}

/// Row of the notification table
#[derive(Debug, Tabled)]
pub struct NotificationRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Farmer")]
    pub farmer: String,
    #[tabled(rename = "Farmer ID")]
    pub farmer_id: String,
    #[tabled(rename = "Village")]
    pub village: String,
    #[tabled(rename = "Location")]
    pub location: String,
    #[tabled(rename = "Preferred")]
    pub preferred_date: String,
    #[tabled(rename = "Requested")]
    pub created_at: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.clone(),
            farmer: n.farmer_name.clone(),
            farmer_id: n.farmer_id.clone(),
            village: n.village.clone(),
            location: n.location_details.clone(),
            preferred_date: n.preferred_date.format("%d %b %Y").to_string(),
            created_at: n.created_at.format("%d %b %Y %H:%M").to_string(),
            status: n.status.to_string(),
        }
    }
}

/// Row of the config table
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrimap_core::models::NotificationStatus;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_notification_row_formats_dates() {
        let n = Notification {
            id: "n1".to_string(),
            farmer_name: "Rajesh Kumar".to_string(),
            farmer_id: "FARM-2023-0542".to_string(),
            village: "Shivapur".to_string(),
            location_details: "Near the canal".to_string(),
            preferred_date: Utc.with_ymd_and_hms(2024, 6, 12, 0, 0, 0).unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap(),
            status: NotificationStatus::Scheduled,
        };

        let row = NotificationRow::from(&n);
        assert_eq!(row.preferred_date, "12 Jun 2024");
        assert_eq!(row.created_at, "01 Jun 2024 08:30");
        assert_eq!(row.status, "scheduled");
    }
}
