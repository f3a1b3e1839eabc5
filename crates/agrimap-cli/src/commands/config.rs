//! Config command implementation

use crate::output::OutputWriter;
use crate::output_types::ConfigRow;
use agrimap_core::config::LayeredConfig;
use anyhow::Result;

const KEY_ORDER: [&str; 4] = ["base_url", "reconnect_delay", "request_timeout", "alerts"];

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let map = config.to_inspection_map();

    let rows: Vec<ConfigRow> = KEY_ORDER
        .iter()
        .filter_map(|key| {
            map.get(*key).map(|(value, source)| ConfigRow {
                key: key.to_string(),
                value: value.clone(),
                source: format!("{:?}", source),
            })
        })
        .collect();

    if output.is_json() {
        return output.result(rows);
    }

    output.section("Effective Configuration");
    output.table(rows);
    Ok(())
}
