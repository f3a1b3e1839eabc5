//! Watch command implementation

use crate::cli::WatchArgs;
use crate::output::OutputWriter;
use crate::output_types::NotificationRow;
use crate::terminal::TerminalAlerter;
use agrimap_core::config::{CliConfigOverrides, LayeredConfig};
use agrimap_http::HttpBackend;
use agrimap_notify::{ChannelEvent, NotificationChannel, ReconnectPolicy};
use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};

pub async fn execute(
    args: WatchArgs,
    mut config: LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    config.update_from_cli(CliConfigOverrides {
        reconnect_delay_secs: args.reconnect_delay,
        alerts: args.no_alerts.then_some(false),
        ..Default::default()
    });

    let mut policy = ReconnectPolicy::fixed(config.reconnect_delay());
    if let Some(max) = args.max_reconnects {
        policy = policy.with_max_attempts(max);
    }

    let backend = Arc::new(HttpBackend::from_config(&config));
    let channel = NotificationChannel::new(backend, policy)
        .with_alerter(Arc::new(TerminalAlerter::new(config.alerts.value)));
    let mut events = channel.subscribe_events();

    channel.start().context("Failed to start notification channel")?;
    output.info(format!("Watching visit requests from {}", config.base_url.value));

    let followed = follow(
        &channel,
        &mut events,
        async {
            let _ = tokio::signal::ctrl_c().await;
        },
        output,
    )
    .await;

    channel.shutdown();
    followed
}

/// Print channel events until `shutdown` resolves or the stream gives up
async fn follow(
    channel: &NotificationChannel,
    events: &mut broadcast::Receiver<ChannelEvent>,
    shutdown: impl Future<Output = ()>,
    output: &OutputWriter,
) -> Result<()> {
    let mut liveness = tokio::time::interval(Duration::from_secs(1));
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                output.info("Stopping");
                break;
            }
            event = events.recv() => match event {
                Ok(event) => show(channel, event, output)?,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Display fell behind, some updates were not shown");
                }
                Err(RecvError::Closed) => break,
            },
            _ = liveness.tick() => {}
        }

        if !channel.is_running() {
            output.warning("Notification stream stopped after reaching the reconnect limit");
            break;
        }
    }

    Ok(())
}

fn show(channel: &NotificationChannel, event: ChannelEvent, output: &OutputWriter) -> Result<()> {
    match event {
        ChannelEvent::SnapshotLoaded { added } => {
            let list = channel.notifications().snapshot();
            if output.is_json() {
                return output.event("snapshot", list);
            }
            output.section(format!("Visit Requests ({} loaded)", added));
            output.table(list.iter().map(NotificationRow::from).collect());
        }
        ChannelEvent::Received(n) => {
            if output.is_json() {
                return output.event("received", n);
            }
            output.info(format!("New visit request {}: {}", n.id, n.summary()));
            output.table(vec![NotificationRow::from(&n)]);
        }
        ChannelEvent::Updated(n) => {
            if output.is_json() {
                return output.event("updated", n);
            }
            output.info(format!("Visit request {} is now {}", n.id, n.status));
        }
        ChannelEvent::Disconnected => {
            if output.is_json() {
                return output.event("disconnected", serde_json::Value::Null);
            }
            output.warning("Connection to notification stream lost");
        }
        ChannelEvent::Reconnecting { attempt, delay } => {
            if output.is_json() {
                return output.event(
                    "reconnecting",
                    serde_json::json!({ "attempt": attempt, "delay_secs": delay.as_secs_f64() }),
                );
            }
            output.info(format!(
                "Reconnecting in {:.0}s (attempt {})",
                delay.as_secs_f64(),
                attempt
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrimap_core::error::Result as CoreResult;
    use agrimap_core::models::Notification;
    use agrimap_core::ports::{EventStream, NotificationFeed};
    use async_trait::async_trait;
    use futures::StreamExt;

    /// Empty snapshot, then a stream that never delivers
    struct QuietFeed;

    #[async_trait]
    impl NotificationFeed for QuietFeed {
        async fn fetch_all(&self) -> CoreResult<Vec<Notification>> {
            Ok(Vec::new())
        }

        async fn subscribe(&self) -> CoreResult<EventStream> {
            Ok(futures::stream::pending().boxed())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_honoured_across_liveness_ticks() {
        let channel = NotificationChannel::new(Arc::new(QuietFeed), ReconnectPolicy::immediate());
        let mut events = channel.subscribe_events();
        channel.start().unwrap();

        let started = tokio::time::Instant::now();
        let stop = tokio::time::sleep(Duration::from_millis(3500));
        let followed = tokio::time::timeout(
            Duration::from_secs(10),
            follow(&channel, &mut events, stop, &OutputWriter::new(true)),
        )
        .await;

        assert!(matches!(followed, Ok(Ok(()))));
        assert!(started.elapsed() >= Duration::from_millis(3500));
        assert!(channel.is_running());
        channel.shutdown();
    }
}
