use std::sync::Arc;

use agrimap_core::error::{AgrimapError, Result};
use agrimap_core::models::{
    Ack, BoundarySnapshot, FarmerDetails, Parcel, Point, MIN_POLYGON_POINTS,
};
use agrimap_core::ports::ParcelApi;
use serde::Serialize;

/// Validates farmer metadata and a boundary, then registers the parcel.
///
/// Nothing is retried: a failed submission is returned to the caller, who
/// still holds the untouched boundary and metadata and may submit again.
#[derive(Clone)]
pub struct ParcelSubmitter {
    api: Arc<dyn ParcelApi>,
}

impl ParcelSubmitter {
    pub fn new(api: Arc<dyn ParcelApi>) -> Self {
        Self { api }
    }

    /// Submit a parcel.
    ///
    /// # Errors
    /// * `MissingFields` if any of the four metadata fields is empty
    /// * `InsufficientPoints` if the boundary has fewer than three points
    /// * `Transport` / `Status` if the write fails
    pub async fn submit(
        &self,
        details: &FarmerDetails,
        boundary: &[Point],
        area_hectares: f64,
    ) -> Result<Ack> {
        let parcel = build_parcel(details, boundary, area_hectares)?;

        tracing::info!(
            farmer_id = %parcel.farmer_id,
            points = parcel.coordinates.len(),
            area_hectares = parcel.area,
            crop_type = %parcel.crop_type,
            "Submitting parcel"
        );

        match self.api.submit_parcel(&parcel).await {
            Ok(ack) => {
                tracing::info!(farmer_id = %parcel.farmer_id, "Parcel saved");
                Ok(ack)
            }
            Err(e) => {
                tracing::error!(
                    farmer_id = %parcel.farmer_id,
                    error = %e,
                    "Parcel submission failed"
                );
                Err(e)
            }
        }
    }

    /// Submit the state captured by a `BoundaryCollector`
    pub async fn submit_snapshot(
        &self,
        details: &FarmerDetails,
        snapshot: &BoundarySnapshot,
    ) -> Result<Ack> {
        self.submit(details, &snapshot.points, snapshot.area_hectares).await
    }
}

/// Validate inputs in order (metadata first, then points) and build the payload
pub fn build_parcel(
    details: &FarmerDetails,
    boundary: &[Point],
    area_hectares: f64,
) -> Result<Parcel> {
    let missing = details.missing_fields();
    if !missing.is_empty() {
        return Err(AgrimapError::MissingFields { fields: missing });
    }

    if boundary.len() < MIN_POLYGON_POINTS {
        return Err(AgrimapError::InsufficientPoints {
            found: boundary.len(),
            required: MIN_POLYGON_POINTS,
        });
    }

    let crop_type = details
        .crop_type
        .ok_or(AgrimapError::MissingFields { fields: vec!["cropType"] })?;

    Ok(Parcel {
        farmer_id: details.farmer_id.clone(),
        coordinates: boundary.to_vec(),
        area: area_hectares,
        crop_type,
    })
}

/// Human-facing summary of a successful submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub farmer_name: String,
    pub farmer_id: String,
    pub area_hectares: f64,
    pub points: usize,
    pub server_message: Option<String>,
}

impl SubmissionReceipt {
    pub fn new(details: &FarmerDetails, snapshot: &BoundarySnapshot, ack: &Ack) -> Self {
        Self {
            farmer_name: details.name.clone(),
            farmer_id: details.farmer_id.clone(),
            area_hectares: snapshot.area_hectares,
            points: snapshot.points.len(),
            server_message: ack.message().map(str::to_string),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Land data saved successfully! Area: {:.2} Hectares, Farmer: {}, Farmer ID: {}",
            self.area_hectares, self.farmer_name, self.farmer_id
        )
    }
}
