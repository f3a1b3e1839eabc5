use std::sync::Arc;

use agrimap_core::error::Result;
use agrimap_core::models::{Notification, StatusTransition};
use agrimap_core::ports::NotificationApi;
use tokio::sync::broadcast;

use crate::channel::ChannelEvent;
use crate::list::SharedNotifications;

/// Applies status decisions to notifications.
///
/// The local list changes only after the server confirms, and then takes the
/// server's record verbatim. There is no optimistic update.
#[derive(Clone)]
pub struct NotificationStatusUpdater {
    api: Arc<dyn NotificationApi>,
    list: SharedNotifications,
    events: broadcast::Sender<ChannelEvent>,
}

impl NotificationStatusUpdater {
    pub(crate) fn new(
        api: Arc<dyn NotificationApi>,
        list: SharedNotifications,
        events: broadcast::Sender<ChannelEvent>,
    ) -> Self {
        Self { api, list, events }
    }

    /// Request a new status for `id` and merge the server's record.
    ///
    /// On failure the list is left exactly as it was.
    pub async fn set_status(&self, id: &str, status: StatusTransition) -> Result<Notification> {
        let updated = match self.api.update_status(id, status).await {
            Ok(n) => n,
            Err(e) => {
                tracing::error!(id, status = %status, error = %e, "Error updating notification");
                return Err(e);
            }
        };

        if self.list.write(|l| l.replace(id, updated.clone())) {
            tracing::info!(id, status = %updated.status, "Notification updated");
        } else {
            tracing::warn!(id, "Updated notification is not in the local list");
        }

        let _ = self.events.send(ChannelEvent::Updated(updated.clone()));
        Ok(updated)
    }
}
