//! Model filter: include/exclude devices by their model identifier.

use crate::controller::Controller;
use crate::filter::{AttributeFilter, DeviceAttribute, DeviceFilter, FilterSettings};
use crate::registration::FilterRegistration;
use std::sync::{Arc, Weak};

pub const MODEL_FILTER_KEY: &str = "model-filter";
pub const MODEL_FILTER_NAME: &str = "model filter";

/// Model string reported by Mayastor's NVMe-oF targets.
pub const MODEL_VALUE_MAYASTOR: &str = "Mayastor NVMe controller";

/// Models excluded whatever the configuration says.
pub const DEFAULT_EXCLUDED_MODELS: &[&str] = &[MODEL_VALUE_MAYASTOR];

pub fn new_model_filter(controller: Weak<Controller>, settings: FilterSettings) -> AttributeFilter {
    AttributeFilter::new(
        DeviceAttribute::Model,
        DEFAULT_EXCLUDED_MODELS,
        settings,
        controller,
    )
}

fn build(controller: Weak<Controller>, settings: FilterSettings) -> Arc<dyn DeviceFilter> {
    Arc::new(new_model_filter(controller, settings))
}

pub fn registration() -> FilterRegistration {
    FilterRegistration {
        key: MODEL_FILTER_KEY,
        default_name: MODEL_FILTER_NAME,
        default_enabled: true,
        factory: build,
    }
}
