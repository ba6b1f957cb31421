//! One-shot, multi-reader publication of the controller.
//!
//! Filters subscribe before a controller exists and each waits for its own
//! copy of the reference. The slot settles exactly once, either to a
//! controller or to shutdown.

use crate::controller::Controller;
use crate::error::{FilterError, FilterResult};
use std::sync::{Arc, OnceLock};
use tokio::sync::watch;

#[derive(Debug, Clone)]
enum Publication {
    Pending,
    Ready(Arc<Controller>),
    Shutdown,
}

impl Publication {
    fn is_pending(&self) -> bool {
        matches!(self, Publication::Pending)
    }
}

/// Publishing side of the rendezvous.
#[derive(Debug)]
pub struct ControllerBroadcast {
    tx: watch::Sender<Publication>,
}

impl ControllerBroadcast {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Publication::Pending);
        Self { tx }
    }

    /// Process-wide instance used by the binary.
    pub fn global() -> &'static ControllerBroadcast {
        static GLOBAL: OnceLock<ControllerBroadcast> = OnceLock::new();
        GLOBAL.get_or_init(ControllerBroadcast::new)
    }

    pub fn subscribe(&self) -> ControllerSubscriber {
        ControllerSubscriber {
            rx: self.tx.subscribe(),
        }
    }

    /// Hands `controller` to every current and future subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::AlreadyPublished`] if the slot has settled.
    pub fn publish(&self, controller: Arc<Controller>) -> FilterResult<()> {
        self.settle(Publication::Ready(controller))
    }

    /// Settles the slot without a controller; waiting registrations abort.
    pub fn shutdown(&self) -> FilterResult<()> {
        self.settle(Publication::Shutdown)
    }

    pub fn is_published(&self) -> bool {
        !self.tx.borrow().is_pending()
    }

    fn settle(&self, publication: Publication) -> FilterResult<()> {
        let mut settled = false;
        self.tx.send_if_modified(|slot| {
            if slot.is_pending() {
                *slot = publication;
                settled = true;
            }
            settled
        });

        if settled {
            Ok(())
        } else {
            Err(FilterError::AlreadyPublished)
        }
    }
}

impl Default for ControllerBroadcast {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side held by one registration routine.
#[derive(Debug, Clone)]
pub struct ControllerSubscriber {
    rx: watch::Receiver<Publication>,
}

impl ControllerSubscriber {
    /// Waits until the slot settles.
    ///
    /// Returns `None` on shutdown, or if the publisher was dropped without
    /// ever publishing.
    pub async fn recv(&mut self) -> Option<Arc<Controller>> {
        let publication = match self.rx.wait_for(|p| !p.is_pending()).await {
            Ok(publication) => publication.clone(),
            Err(_) => return None,
        };

        match publication {
            Publication::Ready(controller) => Some(controller),
            Publication::Pending | Publication::Shutdown => None,
        }
    }
}
