//! AgriMap Notify - Live visit-request notifications
//!
//! `NotificationChannel` keeps a newest-first list of visit requests in step
//! with the backend: one bulk fetch at startup, then a live event stream that
//! reconnects on its own after failures. `NotificationStatusUpdater` applies
//! approve/reject/schedule decisions and merges the server's answer back.

pub mod channel;
pub mod list;
pub mod policy;
pub mod status;

pub use channel::{ChannelEvent, NotificationChannel, ALERT_TITLE};
pub use list::{NotificationList, PrependOutcome, SharedNotifications};
pub use policy::ReconnectPolicy;
pub use status::NotificationStatusUpdater;
