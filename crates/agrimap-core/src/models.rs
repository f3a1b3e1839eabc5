pub mod geometry;
pub mod notification;
pub mod parcel;

pub use geometry::{Boundary, BoundarySnapshot, Point, MIN_POLYGON_POINTS};
pub use notification::{Notification, NotificationStatus, StatusTransition};
pub use parcel::{Ack, CropType, DemoFarm, FarmerDetails, Parcel};
