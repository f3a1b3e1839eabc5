use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;
use crate::models::{Ack, Notification, Parcel, StatusTransition};

/// Live event stream. Each item is the raw data payload of one event; an
/// `Err` item or the end of the stream means the subscription is gone.
pub type EventStream = BoxStream<'static, Result<String>>;

/// Port for parcel registration
#[async_trait]
pub trait ParcelApi: Send + Sync {
    /// Submit a parcel for registration
    ///
    /// Performs exactly one write. Non-2xx responses are errors.
    async fn submit_parcel(&self, parcel: &Parcel) -> Result<Ack>;
}

/// Port for reading visit-request notifications
#[async_trait]
pub trait NotificationFeed: Send + Sync {
    /// Fetch the full current list, in server order
    async fn fetch_all(&self) -> Result<Vec<Notification>>;

    /// Open a new live subscription
    async fn subscribe(&self) -> Result<EventStream>;
}

/// Port for changing a notification's status
#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// Request a status change and return the server's updated record
    async fn update_status(&self, id: &str, status: StatusTransition) -> Result<Notification>;
}
