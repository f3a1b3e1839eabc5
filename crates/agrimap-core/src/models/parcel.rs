use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::geometry::{Boundary, Point};
use crate::error::AgrimapError;

/// Primary crop grown on a parcel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
    Rice,
    Wheat,
    Corn,
    Agroforestry,
    Other,
}

impl CropType {
    pub const ALL: [CropType; 5] =
        [CropType::Rice, CropType::Wheat, CropType::Corn, CropType::Agroforestry, CropType::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Rice => "rice",
            CropType::Wheat => "wheat",
            CropType::Corn => "corn",
            CropType::Agroforestry => "agroforestry",
            CropType::Other => "other",
        }
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropType {
    type Err = AgrimapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        CropType::ALL
            .into_iter()
            .find(|crop| crop.as_str() == normalized)
            .ok_or_else(|| AgrimapError::Parse {
                reason: format!(
                    "unknown crop type '{}'. Use rice, wheat, corn, agroforestry, or other",
                    s
                ),
            })
    }
}

/// Farmer metadata captured by the registration form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmerDetails {
    pub name: String,
    pub farmer_id: String,
    pub village: String,

    /// `None` while no crop has been selected
    pub crop_type: Option<CropType>,
}

impl FarmerDetails {
    pub fn new(
        name: impl Into<String>,
        farmer_id: impl Into<String>,
        village: impl Into<String>,
        crop_type: Option<CropType>,
    ) -> Self {
        Self {
            name: name.into(),
            farmer_id: farmer_id.into(),
            village: village.into(),
            crop_type,
        }
    }

    /// Wire names of the fields that are empty or blank, in form order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.farmer_id.trim().is_empty() {
            missing.push("farmerId");
        }
        if self.village.trim().is_empty() {
            missing.push("village");
        }
        if self.crop_type.is_none() {
            missing.push("cropType");
        }
        missing
    }
}

/// Parcel registration payload sent to the backend.
///
/// Built only at submission time and dropped after the attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    pub farmer_id: String,
    pub coordinates: Boundary,

    /// Area in hectares
    pub area: f64,
    pub crop_type: CropType,
}

/// Server acknowledgement of a parcel submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ack {
    pub body: serde_json::Value,
}

impl Ack {
    /// The server's `message` field, when present
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(|m| m.as_str())
    }
}

/// Demonstration parcel used to exercise the workflow without clicking a map
#[derive(Debug, Clone, PartialEq)]
pub struct DemoFarm {
    pub details: FarmerDetails,
    pub boundary: Boundary,
}

impl DemoFarm {
    /// Agroforestry plot near Shivapur, Karnataka
    pub fn shivapur() -> Self {
        Self {
            details: FarmerDetails::new(
                "Rajesh Kumar",
                "FARM-2023-0542",
                "Shivapur",
                Some(CropType::Agroforestry),
            ),
            boundary: vec![
                Point::new(15.4865, 75.117),
                Point::new(15.484, 75.1195),
                Point::new(15.481, 75.1175),
                Point::new(15.483, 75.114),
            ],
        }
    }
}

impl Default for DemoFarm {
    fn default() -> Self {
        Self::shivapur()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parcel_wire_format() {
        let parcel = Parcel {
            farmer_id: "FARM-1".to_string(),
            coordinates: vec![Point::new(1.0, 2.0)],
            area: 1.5,
            crop_type: CropType::Wheat,
        };

        let json = serde_json::to_value(&parcel).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "farmerId": "FARM-1",
                "coordinates": [{ "lat": 1.0, "lng": 2.0 }],
                "area": 1.5,
                "cropType": "wheat"
            })
        );
    }

    #[test]
    fn test_crop_type_from_str() {
        assert_eq!("Rice".parse::<CropType>().unwrap(), CropType::Rice);
        assert_eq!(" agroforestry ".parse::<CropType>().unwrap(), CropType::Agroforestry);
        assert!("barley".parse::<CropType>().is_err());
    }

    #[test]
    fn test_missing_fields_in_form_order() {
        let details = FarmerDetails::new("", "FARM-1", "  ", None);
        assert_eq!(details.missing_fields(), vec!["name", "village", "cropType"]);

        let complete = DemoFarm::shivapur().details;
        assert!(complete.missing_fields().is_empty());
    }

    #[test]
    fn test_ack_message() {
        let ack = Ack { body: serde_json::json!({ "message": "saved", "id": 7 }) };
        assert_eq!(ack.message(), Some("saved"));

        let bare = Ack { body: serde_json::json!({ "ok": true }) };
        assert_eq!(bare.message(), None);
    }
}
