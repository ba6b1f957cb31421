//! The controller and its filter registry.
//!
//! Filters append themselves to the registry once at startup; nothing is
//! ever removed. The lock is held only for the append or for taking a
//! snapshot, so evaluation never blocks registration.

use crate::filter::DeviceFilter;
use blockfilter_core::{AppConfig, BlockDevice};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// A filter as seen by the controller.
#[derive(Clone)]
pub struct RegisteredFilter {
    pub name: String,
    pub enabled: bool,
    pub filter: Arc<dyn DeviceFilter>,
}

impl RegisteredFilter {
    pub fn new(name: impl Into<String>, enabled: bool, filter: Arc<dyn DeviceFilter>) -> Self {
        Self {
            name: name.into(),
            enabled,
            filter,
        }
    }
}

impl fmt::Debug for RegisteredFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredFilter")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .field("filter", &self.filter.describe())
            .finish()
    }
}

/// Owns the loaded configuration and the ordered filter registry.
pub struct Controller {
    config: AppConfig,
    filters: Mutex<Vec<RegisteredFilter>>,
}

impl Controller {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            filters: Mutex::new(Vec::new()),
        }
    }

    /// Configuration filters resolve their settings from.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Appends a filter. Entries with the same name coexist.
    pub fn register(&self, entry: RegisteredFilter) {
        info!(filter = %entry.name, enabled = entry.enabled, "Registered filter");
        self.filters.lock().push(entry);
    }

    /// Registered filters in registration order.
    pub fn filters(&self) -> Vec<RegisteredFilter> {
        self.filters.lock().clone()
    }

    pub fn enabled_filters(&self) -> Vec<RegisteredFilter> {
        self.filters
            .lock()
            .iter()
            .filter(|entry| entry.enabled)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.filters.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.lock().is_empty()
    }

    /// Starts every registered filter, enabled or not.
    pub fn start_filters(&self) {
        for entry in self.filters() {
            entry.filter.start();
            debug!(filter = %entry.name, state = %entry.filter.describe(), "Started filter");
        }
    }

    /// Whether `device` passes every enabled filter.
    pub fn apply_filters(&self, device: &BlockDevice) -> bool {
        for entry in self.enabled_filters() {
            if !entry.filter.include(device) {
                debug!(device = %device.path, filter = %entry.name, "Device not included");
                return false;
            }
            if !entry.filter.exclude(device) {
                debug!(device = %device.path, filter = %entry.name, "Device excluded");
                return false;
            }
        }
        true
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("config", &self.config)
            .field("filters", &*self.filters.lock())
            .finish()
    }
}
