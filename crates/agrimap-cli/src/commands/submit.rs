//! Submit command implementation

use crate::cli::SubmitArgs;
use crate::output::OutputWriter;
use crate::terminal::ConsoleMap;
use agrimap_core::config::LayeredConfig;
use agrimap_core::models::{DemoFarm, FarmerDetails};
use agrimap_geo::validation::validate_boundary;
use agrimap_http::HttpBackend;
use agrimap_mapping::{BoundaryCollector, ParcelSubmitter, SubmissionReceipt};
use anyhow::{Context, Result};
use std::sync::Arc;

pub async fn execute(
    args: SubmitArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let demo = args.demo.then(DemoFarm::shivapur);
    let base = demo.as_ref().map(|d| d.details.clone()).unwrap_or_default();

    let details = FarmerDetails {
        name: args.name.unwrap_or(base.name),
        farmer_id: args.farmer_id.unwrap_or(base.farmer_id),
        village: args.village.unwrap_or(base.village),
        crop_type: args.crop.or(base.crop_type),
    };

    let points = match demo {
        Some(demo) if args.points.is_empty() => demo.boundary,
        _ => args.points,
    };
    validate_boundary(&points).into_result().context("Boundary rejected")?;

    let mut collector = BoundaryCollector::new();
    collector.on_map_ready(ConsoleMap::new());
    collector.load_boundary(points);
    let snapshot = collector.snapshot();

    let submitter = ParcelSubmitter::new(Arc::new(HttpBackend::from_config(config)));
    let ack = match submitter.submit_snapshot(&details, &snapshot).await {
        Ok(ack) => ack,
        Err(e) if e.is_validation() => return Err(e.into()),
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context("Error saving land data. Please check your connection."))
        }
    };

    let receipt = SubmissionReceipt::new(&details, &snapshot, &ack);
    if output.is_json() {
        return output.result(receipt);
    }

    output.success(receipt.summary());
    if let Some(message) = &receipt.server_message {
        output.kv("Server", message);
    }

    Ok(())
}
