//! The filter capability contract and the attribute filter that backs every
//! model-style filter.

use crate::controller::Controller;
use crate::matcher;
use blockfilter_core::BlockDevice;
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};

/// Capability set every filter exposes to the controller.
///
/// The pipeline calls [`start`](DeviceFilter::start) once, then
/// [`include`](DeviceFilter::include) and [`exclude`](DeviceFilter::exclude)
/// for each candidate device. A device is kept only when both return true.
pub trait DeviceFilter: Send + Sync {
    /// Derive the include/exclude lists from configuration.
    fn start(&self);

    /// True when the device passes the include list.
    fn include(&self, device: &BlockDevice) -> bool;

    /// True when the device is *not* excluded.
    fn exclude(&self, device: &BlockDevice) -> bool;

    /// Human-readable description for logging.
    fn describe(&self) -> String;
}

/// Raw include/exclude configuration handed to a filter at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSettings {
    /// Comma separated include list
    pub include: String,
    /// Comma separated exclude list
    pub exclude: String,
}

impl FilterSettings {
    pub fn new(include: impl Into<String>, exclude: impl Into<String>) -> Self {
        Self {
            include: include.into(),
            exclude: exclude.into(),
        }
    }
}

/// Lists derived by [`DeviceFilter::start`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Which device attribute a filter reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceAttribute {
    Model,
    Vendor,
}

impl DeviceAttribute {
    #[inline]
    pub fn value<'a>(&self, device: &'a BlockDevice) -> &'a str {
        match self {
            DeviceAttribute::Model => &device.attributes.model,
            DeviceAttribute::Vendor => &device.attributes.vendor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceAttribute::Model => "model",
            DeviceAttribute::Vendor => "vendor",
        }
    }
}

/// Include/exclude filter over one string attribute.
///
/// Both lists are empty until `start` runs, so an unstarted filter passes
/// every device. The exclude list always begins with `default_excludes`.
pub struct AttributeFilter {
    attribute: DeviceAttribute,
    default_excludes: &'static [&'static str],
    settings: FilterSettings,
    state: RwLock<FilterState>,
    controller: Weak<Controller>,
}

impl AttributeFilter {
    pub fn new(
        attribute: DeviceAttribute,
        default_excludes: &'static [&'static str],
        settings: FilterSettings,
        controller: Weak<Controller>,
    ) -> Self {
        Self {
            attribute,
            default_excludes,
            settings,
            state: RwLock::new(FilterState::default()),
            controller,
        }
    }

    pub fn attribute(&self) -> DeviceAttribute {
        self.attribute
    }

    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    /// Snapshot of the current include/exclude lists.
    pub fn state(&self) -> FilterState {
        self.state.read().clone()
    }

    /// The controller this filter was registered with, if it is still alive.
    pub fn controller(&self) -> Option<Arc<Controller>> {
        self.controller.upgrade()
    }
}

impl DeviceFilter for AttributeFilter {
    fn start(&self) {
        let mut exclude: Vec<String> = self
            .default_excludes
            .iter()
            .map(|value| value.to_string())
            .collect();
        exclude.extend(matcher::split_list(&self.settings.exclude));

        let state = FilterState {
            include: matcher::split_list(&self.settings.include),
            exclude,
        };
        *self.state.write() = state;
    }

    #[inline]
    fn include(&self, device: &BlockDevice) -> bool {
        matcher::include(&self.state.read().include, self.attribute.value(device))
    }

    #[inline]
    fn exclude(&self, device: &BlockDevice) -> bool {
        matcher::exclude(&self.state.read().exclude, self.attribute.value(device))
    }

    fn describe(&self) -> String {
        let state = self.state.read();
        format!(
            "AttributeFilter({}, include: {:?}, exclude: {:?})",
            self.attribute.as_str(),
            state.include,
            state.exclude
        )
    }
}

impl fmt::Debug for AttributeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeFilter")
            .field("attribute", &self.attribute)
            .field("settings", &self.settings)
            .field("state", &*self.state.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: &[&str] = &["Sentinel"];

    fn vendor_filter(include: &str, exclude: &str) -> AttributeFilter {
        AttributeFilter::new(
            DeviceAttribute::Vendor,
            DEFAULTS,
            FilterSettings::new(include, exclude),
            Weak::new(),
        )
    }

    #[test]
    fn test_unstarted_filter_passes_everything() {
        let filter = vendor_filter("ATA", "ATA");
        let device = BlockDevice::new("/dev/sda").with_vendor("Sentinel");

        assert!(filter.include(&device));
        assert!(filter.exclude(&device));
        assert_eq!(filter.state(), FilterState::default());
    }

    #[test]
    fn test_start_merges_defaults() {
        let filter = vendor_filter("ATA,NVME", "QEMU");
        filter.start();

        let state = filter.state();
        assert_eq!(state.include, vec!["ATA", "NVME"]);
        assert_eq!(state.exclude, vec!["Sentinel", "QEMU"]);
    }

    #[test]
    fn test_start_twice_reinitializes() {
        let filter = vendor_filter("", "QEMU");
        filter.start();
        filter.start();

        assert_eq!(filter.state().exclude, vec!["Sentinel", "QEMU"]);
    }

    #[test]
    fn test_reads_only_its_attribute() {
        let filter = vendor_filter("", "QEMU");
        filter.start();

        let by_model = BlockDevice::new("/dev/sda").with_model("QEMU");
        let by_vendor = BlockDevice::new("/dev/sdb").with_vendor("qemu");

        assert!(filter.exclude(&by_model));
        assert!(!filter.exclude(&by_vendor));
    }

    #[test]
    fn test_describe_and_controller() {
        let filter = vendor_filter("", "");
        filter.start();

        assert!(filter.describe().contains("vendor"));
        assert!(filter.describe().contains("Sentinel"));
        assert!(filter.controller().is_none());
        assert_eq!(filter.attribute(), DeviceAttribute::Vendor);
        assert_eq!(filter.settings(), &FilterSettings::default());
    }
}
