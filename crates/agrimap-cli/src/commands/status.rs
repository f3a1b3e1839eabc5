//! Status command implementation

use crate::cli::StatusArgs;
use crate::output::OutputWriter;
use crate::output_types::NotificationRow;
use agrimap_core::config::LayeredConfig;
use agrimap_core::ports::NotificationApi;
use agrimap_http::HttpBackend;
use anyhow::{Context, Result};

pub async fn execute(
    args: StatusArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let backend = HttpBackend::from_config(config);

    let updated = backend
        .update_status(&args.id, args.status)
        .await
        .with_context(|| format!("Error updating notification {}", args.id))?;

    if output.is_json() {
        return output.result(updated);
    }

    output.success(format!("Notification {} is now {}", updated.id, updated.status));
    output.table(vec![NotificationRow::from(&updated)]);
    Ok(())
}
