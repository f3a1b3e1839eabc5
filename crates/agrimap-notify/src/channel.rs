//! Live notification channel.
//!
//! Startup runs two independent tasks: a one-shot fetch of the full list and
//! a stream pump. The pump applies events in the order received and, when
//! the stream closes or fails, waits out the [`ReconnectPolicy`] delay and
//! subscribes again. The initial list is never re-fetched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use agrimap_core::error::{AgrimapError, Result};
use agrimap_core::models::Notification;
use agrimap_core::ports::{AlertPermission, Alerter, NotificationApi, NotificationFeed};
use futures::StreamExt;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::list::{PrependOutcome, SharedNotifications};
use crate::policy::ReconnectPolicy;
use crate::status::NotificationStatusUpdater;

/// Title of the alert raised for each new request
pub const ALERT_TITLE: &str = "New Visit Request";

const EVENT_CAPACITY: usize = 64;

/// Change notifications for hosts that render the list
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    /// The initial fetch finished; `added` records were installed
    SnapshotLoaded { added: usize },
    /// A streamed record was applied
    Received(Notification),
    /// A status change was confirmed by the server
    Updated(Notification),
    /// The stream closed or failed
    Disconnected,
    /// A new subscription will be opened after `delay`
    Reconnecting { attempt: u32, delay: Duration },
}

/// Keeps the notification list in step with the backend
pub struct NotificationChannel {
    feed: Arc<dyn NotificationFeed>,
    policy: ReconnectPolicy,
    alerter: Option<Arc<dyn Alerter>>,
    list: SharedNotifications,
    events: broadcast::Sender<ChannelEvent>,
    loaded: Arc<AtomicBool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl NotificationChannel {
    pub fn new(feed: Arc<dyn NotificationFeed>, policy: ReconnectPolicy) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            feed,
            policy,
            alerter: None,
            list: SharedNotifications::new(),
            events,
            loaded: Arc::new(AtomicBool::new(false)),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Raise a best-effort alert for every streamed request
    pub fn with_alerter(mut self, alerter: Arc<dyn Alerter>) -> Self {
        self.alerter = Some(alerter);
        self
    }

    /// Start the initial fetch and the live subscription.
    ///
    /// Must be called from within a Tokio runtime. Calling it while already
    /// running does nothing.
    pub fn start(&self) -> Result<()> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| AgrimapError::Stream {
            reason: format!("notification channel needs a Tokio runtime: {}", e),
        })?;

        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        if !tasks.is_empty() {
            tracing::debug!("Notification channel already running");
            return Ok(());
        }

        tracing::info!(
            reconnect_delay_ms = self.policy.delay.as_millis() as u64,
            "Starting notification channel"
        );

        tasks.push(runtime.spawn(load_snapshot(
            self.feed.clone(),
            self.list.clone(),
            self.events.clone(),
            self.loaded.clone(),
        )));

        let pump = StreamPump {
            feed: self.feed.clone(),
            policy: self.policy,
            alerter: self.alerter.clone(),
            list: self.list.clone(),
            events: self.events.clone(),
        };
        tasks.push(runtime.spawn(pump.run()));

        Ok(())
    }

    /// Close the live subscription and cancel any pending reconnect.
    ///
    /// Idempotent; also runs on drop.
    pub fn shutdown(&self) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        if tasks.is_empty() {
            return;
        }
        for task in tasks.drain(..) {
            task.abort();
        }
        tracing::info!("Notification channel shut down");
    }

    pub fn is_running(&self) -> bool {
        let tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.iter().any(|task| !task.is_finished())
    }

    /// Whether the initial fetch has finished, successfully or not
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Read handle to the list
    pub fn notifications(&self) -> SharedNotifications {
        self.list.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ChannelEvent> {
        self.events.subscribe()
    }

    /// Status updater writing into this channel's list
    pub fn status_updater(&self, api: Arc<dyn NotificationApi>) -> NotificationStatusUpdater {
        NotificationStatusUpdater::new(api, self.list.clone(), self.events.clone())
    }
}

impl Drop for NotificationChannel {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn load_snapshot(
    feed: Arc<dyn NotificationFeed>,
    list: SharedNotifications,
    events: broadcast::Sender<ChannelEvent>,
    loaded: Arc<AtomicBool>,
) {
    let added = match feed.fetch_all().await {
        Ok(snapshot) => {
            let fetched = snapshot.len();
            let added = list.write(|l| l.install_snapshot(snapshot));
            tracing::info!(fetched, added, "Loaded notifications");
            added
        }
        Err(e) => {
            tracing::error!(error = %e, "Error fetching notifications");
            0
        }
    };

    loaded.store(true, Ordering::Release);
    let _ = events.send(ChannelEvent::SnapshotLoaded { added });
}

/// State owned by the stream task
struct StreamPump {
    feed: Arc<dyn NotificationFeed>,
    policy: ReconnectPolicy,
    alerter: Option<Arc<dyn Alerter>>,
    list: SharedNotifications,
    events: broadcast::Sender<ChannelEvent>,
}

impl StreamPump {
    async fn run(self) {
        let mut reconnects: u32 = 0;

        loop {
            match self.feed.subscribe().await {
                Ok(mut stream) => {
                    tracing::info!("Notification stream connected");
                    while let Some(item) = stream.next().await {
                        match item {
                            Ok(payload) => self.apply(&payload),
                            Err(e) => {
                                tracing::warn!(error = %e, "Notification stream error");
                                break;
                            }
                        }
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Failed to open notification stream"),
            }

            let _ = self.events.send(ChannelEvent::Disconnected);

            let attempt = reconnects.saturating_add(1);
            if !self.policy.allows(attempt) {
                tracing::warn!(attempts = reconnects, "Reconnect limit reached, stream stopped");
                return;
            }
            reconnects = attempt;

            tracing::info!(
                attempt,
                delay_ms = self.policy.delay.as_millis() as u64,
                "Reconnecting notification stream"
            );
            let _ = self
                .events
                .send(ChannelEvent::Reconnecting { attempt, delay: self.policy.delay });
            tokio::time::sleep(self.policy.delay).await;
        }
    }

    /// Parse and apply one event payload; malformed payloads are dropped
    fn apply(&self, payload: &str) {
        let notification: Notification = match serde_json::from_str(payload) {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = %e, "Error parsing notification, event discarded");
                return;
            }
        };

        let outcome = self.list.write(|l| l.prepend(notification.clone()));
        if outcome == PrependOutcome::Replaced {
            tracing::warn!(
                id = %notification.id,
                "Stream delivered an id already in the list, replaced existing entry"
            );
        } else {
            tracing::debug!(id = %notification.id, "Notification received");
        }

        self.alert(&notification);
        let _ = self.events.send(ChannelEvent::Received(notification));
    }

    fn alert(&self, notification: &Notification) {
        let Some(alerter) = self.alerter.as_ref() else {
            return;
        };
        if alerter.permission() != AlertPermission::Granted {
            return;
        }
        if let Err(e) = alerter.alert(ALERT_TITLE, &notification.summary()) {
            tracing::debug!(error = %e, "Alert failed");
        }
    }
}
