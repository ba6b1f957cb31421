//! Vendor filter: include/exclude devices by vendor. No vendor is excluded
//! by default.

use crate::controller::Controller;
use crate::filter::{AttributeFilter, DeviceAttribute, DeviceFilter, FilterSettings};
use crate::registration::FilterRegistration;
use std::sync::{Arc, Weak};

pub const VENDOR_FILTER_KEY: &str = "vendor-filter";
pub const VENDOR_FILTER_NAME: &str = "vendor filter";

pub fn new_vendor_filter(controller: Weak<Controller>, settings: FilterSettings) -> AttributeFilter {
    AttributeFilter::new(DeviceAttribute::Vendor, &[], settings, controller)
}

fn build(controller: Weak<Controller>, settings: FilterSettings) -> Arc<dyn DeviceFilter> {
    Arc::new(new_vendor_filter(controller, settings))
}

pub fn registration() -> FilterRegistration {
    FilterRegistration {
        key: VENDOR_FILTER_KEY,
        default_name: VENDOR_FILTER_NAME,
        default_enabled: true,
        factory: build,
    }
}
