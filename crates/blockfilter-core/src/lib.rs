//! # blockfilter core
//!
//! Foundational types shared by the device filters and the binary:
//!
//! - **Types**: the discovered [`BlockDevice`] record and its attributes.
//! - **Errors**: `thiserror` based error types for configuration loading.
//! - **Configuration**: the per-filter [`FilterConfig`] entries and the
//!   [`AppConfig`] document they are loaded from.
//!
//! ## Example
//!
//! ```
//! use blockfilter_core::config::AppConfig;
//!
//! let config = AppConfig::from_yaml(
//!     r#"
//! filterconfigs:
//!   - key: model-filter
//!     name: model filter
//!     state: "true"
//!     exclude: "Virtual_Disk"
//! "#,
//! )
//! .unwrap();
//!
//! let model = config.find_filter_config("model-filter").unwrap();
//! assert!(model.is_enabled());
//! assert_eq!(model.exclude, "Virtual_Disk");
//! ```

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, FilterConfig, LogFormat, LoggingConfig};
pub use error::{BlockFilterError, ConfigError, Result};
pub use types::{BlockDevice, DeviceAttributes};
