//! AgriMap Mapping - Boundary capture and parcel submission
//!
//! `BoundaryCollector` owns the boundary being drawn and keeps its area in
//! step with every change; `ParcelSubmitter` validates the collected state
//! and performs the registration write.

pub mod collector;
pub mod submit;

pub use collector::BoundaryCollector;
pub use submit::{ParcelSubmitter, SubmissionReceipt};
