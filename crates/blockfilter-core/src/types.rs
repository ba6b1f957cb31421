//! Device records produced by block device discovery.
//!
//! Filters only ever read these; discovery owns them.

use serde::{Deserialize, Serialize};

/// A discovered physical storage device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDevice {
    /// Device node path, e.g. `/dev/sda`
    #[serde(default)]
    pub path: String,

    /// Attributes read from the device
    #[serde(default)]
    pub attributes: DeviceAttributes,
}

/// String attributes reported by the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceAttributes {
    /// Model identifier, e.g. `ST1200MM0007`
    pub model: String,

    /// Vendor identifier
    pub vendor: String,

    /// Serial number
    pub serial: String,

    /// Device type, e.g. `disk` or `partition`
    pub device_type: String,
}

impl BlockDevice {
    /// Creates a device record with only a path set.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            attributes: DeviceAttributes::default(),
        }
    }

    /// Sets the model attribute.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.attributes.model = model.into();
        self
    }

    /// Sets the vendor attribute.
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.attributes.vendor = vendor.into();
        self
    }
}
