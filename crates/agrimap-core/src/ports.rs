//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

pub mod alert;
pub mod backend;
pub mod map;

pub use alert::{AlertPermission, Alerter};
pub use backend::{EventStream, NotificationApi, NotificationFeed, ParcelApi};
pub use map::{MapSurface, OverlayHandle};
