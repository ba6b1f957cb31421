//! Startup registration of compiled-in filters.
//!
//! Each filter waits for the controller on the broadcast, resolves its
//! settings from the controller's configuration (falling back to its own
//! defaults), builds itself and appends itself to the registry.

use crate::broadcast::{ControllerBroadcast, ControllerSubscriber};
use crate::controller::{Controller, RegisteredFilter};
use crate::error::FilterResult;
use crate::filter::{DeviceFilter, FilterSettings};
use crate::{model, vendor};
use blockfilter_core::AppConfig;
use futures::future::join_all;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Builds a filter bound to the controller that registers it.
pub type FilterFactory = fn(Weak<Controller>, FilterSettings) -> Arc<dyn DeviceFilter>;

/// Compiled-in description of a filter.
#[derive(Debug, Clone, Copy)]
pub struct FilterRegistration {
    /// Stable key looked up in `filterconfigs`
    pub key: &'static str,
    pub default_name: &'static str,
    pub default_enabled: bool,
    pub factory: FilterFactory,
}

/// Name, enabled flag and settings after merging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFilter {
    pub name: String,
    pub enabled: bool,
    pub settings: FilterSettings,
}

impl FilterRegistration {
    /// Resolves from the first config entry with this key, or the defaults.
    pub fn resolve(&self, config: &AppConfig) -> ResolvedFilter {
        match config.find_filter_config(self.key) {
            Some(entry) => ResolvedFilter {
                name: entry.name.clone(),
                enabled: entry.is_enabled(),
                settings: FilterSettings::new(entry.include.clone(), entry.exclude.clone()),
            },
            None => ResolvedFilter {
                name: self.default_name.to_string(),
                enabled: self.default_enabled,
                settings: FilterSettings::default(),
            },
        }
    }

    /// Waits for the controller and registers with it.
    ///
    /// Returns false, registering nothing, if no controller was published.
    pub async fn register(self, mut subscriber: ControllerSubscriber) -> bool {
        let Some(controller) = subscriber.recv().await else {
            debug!(filter = self.key, "No controller published, skipping registration");
            return false;
        };

        let resolved = self.resolve(controller.config());
        let filter = (self.factory)(Arc::downgrade(&controller), resolved.settings);
        controller.register(RegisteredFilter::new(resolved.name, resolved.enabled, filter));
        true
    }
}

/// Filters compiled into this build.
pub fn builtin_registrations() -> Vec<FilterRegistration> {
    vec![model::registration(), vendor::registration()]
}

/// Registers the built-in filters concurrently.
///
/// Returns the number of filters that registered. Blocks until `broadcast`
/// settles.
pub async fn register_builtin_filters(broadcast: &ControllerBroadcast) -> FilterResult<usize> {
    register_filters(broadcast, builtin_registrations()).await
}

/// Spawns one registration task per filter and waits for all of them.
///
/// # Errors
///
/// Returns [`FilterError::Join`](crate::FilterError::Join) if a task panicked.
pub async fn register_filters<I>(broadcast: &ControllerBroadcast, registrations: I) -> FilterResult<usize>
where
    I: IntoIterator<Item = FilterRegistration>,
{
    let tasks: Vec<_> = registrations
        .into_iter()
        .map(|registration| tokio::spawn(registration.register(broadcast.subscribe())))
        .collect();

    let mut registered = 0;
    for outcome in join_all(tasks).await {
        if outcome? {
            registered += 1;
        }
    }
    Ok(registered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MODEL_FILTER_KEY, MODEL_FILTER_NAME, MODEL_VALUE_MAYASTOR};
    use blockfilter_core::{BlockDevice, FilterConfig};

    fn model_config(name: &str, state: &str, include: &str, exclude: &str) -> AppConfig {
        AppConfig {
            filterconfigs: vec![FilterConfig {
                key: MODEL_FILTER_KEY.to_string(),
                name: name.to_string(),
                state: state.to_string(),
                include: include.to_string(),
                exclude: exclude.to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let resolved = model::registration().resolve(&AppConfig::default());
        assert_eq!(
            resolved,
            ResolvedFilter {
                name: MODEL_FILTER_NAME.to_string(),
                enabled: true,
                settings: FilterSettings::default(),
            }
        );
    }

    #[test]
    fn test_resolve_overrides() {
        let config = model_config("disk models", "false", "ST1200MM0007", "Virtual_Disk");
        let resolved = model::registration().resolve(&config);

        assert_eq!(resolved.name, "disk models");
        assert!(!resolved.enabled);
        assert_eq!(resolved.settings, FilterSettings::new("ST1200MM0007", "Virtual_Disk"));
    }

    #[test]
    fn test_resolve_ignores_other_keys() {
        let mut config = model_config("x", "false", "a", "b");
        config.filterconfigs[0].key = "path-filter".to_string();

        let resolved = model::registration().resolve(&config);
        assert_eq!(resolved.name, MODEL_FILTER_NAME);
        assert!(resolved.enabled);
    }

    #[tokio::test]
    async fn test_register_single_filter() {
        let broadcast = ControllerBroadcast::new();
        let subscriber = broadcast.subscribe();
        let controller = Arc::new(Controller::default());
        broadcast.publish(Arc::clone(&controller)).unwrap();

        assert!(model::registration().register(subscriber).await);

        let filters = controller.filters();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].name, MODEL_FILTER_NAME);
        assert!(filters[0].enabled);

        filters[0].filter.start();
        let mayastor = BlockDevice::new("/dev/nvme0n1").with_model(MODEL_VALUE_MAYASTOR);
        assert!(!filters[0].filter.exclude(&mayastor));
        assert!(filters[0].filter.include(&mayastor));
    }

    #[tokio::test]
    async fn test_register_binds_controller() {
        let broadcast = ControllerBroadcast::new();
        let subscriber = broadcast.subscribe();
        let controller = Arc::new(Controller::default());
        broadcast.publish(Arc::clone(&controller)).unwrap();

        let registration = FilterRegistration {
            factory: |controller, settings| {
                let filter = model::new_model_filter(controller, settings);
                assert!(filter.controller().is_some());
                Arc::new(filter) as Arc<dyn DeviceFilter>
            },
            ..model::registration()
        };
        assert!(registration.register(subscriber).await);
    }

    #[tokio::test]
    async fn test_register_aborts_on_shutdown() {
        let broadcast = ControllerBroadcast::new();
        let subscriber = broadcast.subscribe();
        broadcast.shutdown().unwrap();

        assert!(!model::registration().register(subscriber).await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_register_builtin_filters() {
        let broadcast = Arc::new(ControllerBroadcast::new());
        let controller = Arc::new(Controller::new(model_config("models", "yes", "", "QEMU")));

        let registering = {
            let broadcast = Arc::clone(&broadcast);
            tokio::spawn(async move { register_builtin_filters(&broadcast).await })
        };
        broadcast.publish(Arc::clone(&controller)).unwrap();

        let registered = registering.await.unwrap().unwrap();
        assert_eq!(registered, 2);

        let mut names: Vec<_> = controller.filters().into_iter().map(|f| f.name).collect();
        names.sort();
        assert_eq!(names, vec!["models", "vendor filter"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration_loses_nothing() {
        let broadcast = ControllerBroadcast::new();
        let controller = Arc::new(Controller::default());
        broadcast.publish(Arc::clone(&controller)).unwrap();

        let registrations = (0..64).map(|i| {
            if i % 2 == 0 {
                model::registration()
            } else {
                vendor::registration()
            }
        });
        let registered = register_filters(&broadcast, registrations).await.unwrap();

        assert_eq!(registered, 64);
        assert_eq!(controller.len(), 64);
        let models = controller
            .filters()
            .iter()
            .filter(|f| f.name == MODEL_FILTER_NAME)
            .count();
        assert_eq!(models, 32);
    }
}
