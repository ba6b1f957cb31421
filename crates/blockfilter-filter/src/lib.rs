//! Pluggable block device filters.
//!
//! Filters register themselves with a [`Controller`] at startup and are then
//! evaluated together to decide whether a discovered device is exposed.
//!
//! - [`matcher`]: case-insensitive include/exclude list matching
//! - [`filter`]: the [`DeviceFilter`] capability trait and [`AttributeFilter`]
//! - [`model`], [`vendor`]: the compiled-in filters
//! - [`controller`]: the filter registry
//! - [`broadcast`]: one-shot publication of the controller to waiting filters
//! - [`registration`]: config resolution and registration of each filter
//!
//! # Example
//!
//! ```rust
//! use blockfilter_core::{AppConfig, BlockDevice};
//! use blockfilter_filter::{register_builtin_filters, Controller, ControllerBroadcast};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), blockfilter_filter::FilterError> {
//! let broadcast = ControllerBroadcast::new();
//! let controller = Arc::new(Controller::new(AppConfig::default()));
//! broadcast.publish(Arc::clone(&controller))?;
//!
//! register_builtin_filters(&broadcast).await?;
//! controller.start_filters();
//!
//! let device = BlockDevice::new("/dev/nvme0n1").with_model("Mayastor NVMe controller");
//! assert!(!controller.apply_filters(&device));
//! # Ok(())
//! # }
//! ```

pub mod broadcast;
pub mod controller;
pub mod error;
pub mod filter;
pub mod matcher;
pub mod model;
pub mod registration;
pub mod vendor;

pub use broadcast::{ControllerBroadcast, ControllerSubscriber};
pub use controller::{Controller, RegisteredFilter};
pub use error::{FilterError, FilterResult};
pub use filter::{AttributeFilter, DeviceAttribute, DeviceFilter, FilterSettings, FilterState};
pub use registration::{
    builtin_registrations, register_builtin_filters, register_filters, FilterFactory,
    FilterRegistration, ResolvedFilter,
};
