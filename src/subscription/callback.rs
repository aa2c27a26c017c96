// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for store subscriptions.
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::event::StoreEvent;
use crate::state::{Device, DeviceMetrics};

/// Unique identifier for a subscription.
///
/// Returned when registering a callback and used to unsubscribe later. IDs
/// are unique within a registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a new subscription ID with the given value.
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Callback receiving a device.
type DeviceCallback = Arc<dyn Fn(&Device) + Send + Sync>;

/// Callback receiving the metrics snapshot.
type MetricsCallback = Arc<dyn Fn(&DeviceMetrics) + Send + Sync>;

/// Callback receiving every store event.
type StoreChangedCallback = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

/// Callbacks keyed by subscription, in registration order.
type Callbacks<C> = RwLock<BTreeMap<SubscriptionId, C>>;

/// Registry for store observer callbacks.
///
/// Callbacks are invoked synchronously, in registration order, on the thread
/// that performed the mutation. The registry only holds its own read lock
/// while cloning the callback list, so a callback may register or remove
/// subscriptions without deadlocking.
pub struct CallbackRegistry {
    /// Counter for generating unique subscription IDs.
    next_id: AtomicU64,
    /// Called when a device is added.
    added_callbacks: Callbacks<DeviceCallback>,
    /// Called when a device is toggled or updated.
    changed_callbacks: Callbacks<DeviceCallback>,
    /// Called when a device is removed.
    removed_callbacks: Callbacks<DeviceCallback>,
    /// Called when the metrics snapshot changes.
    metrics_callbacks: Callbacks<MetricsCallback>,
    /// Called for every event.
    store_changed_callbacks: Callbacks<StoreChangedCallback>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            added_callbacks: RwLock::new(BTreeMap::new()),
            changed_callbacks: RwLock::new(BTreeMap::new()),
            removed_callbacks: RwLock::new(BTreeMap::new()),
            metrics_callbacks: RwLock::new(BTreeMap::new()),
            store_changed_callbacks: RwLock::new(BTreeMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration methods
    // =========================================================================

    /// Registers a callback for added devices.
    pub fn on_device_added<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Device) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.added_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for toggled or updated devices.
    ///
    /// The callback receives the device after the change.
    pub fn on_device_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Device) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.changed_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for removed devices.
    pub fn on_device_removed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Device) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.removed_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for metrics updates.
    pub fn on_metrics_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&DeviceMetrics) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.metrics_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for all store events.
    ///
    /// This is what a view re-rendering on any change subscribes to.
    pub fn on_store_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.store_changed_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    // =========================================================================
    // Unsubscription
    // =========================================================================

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.added_callbacks.write().remove(&id).is_some()
            || self.changed_callbacks.write().remove(&id).is_some()
            || self.removed_callbacks.write().remove(&id).is_some()
            || self.metrics_callbacks.write().remove(&id).is_some()
            || self.store_changed_callbacks.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.added_callbacks.write().clear();
        self.changed_callbacks.write().clear();
        self.removed_callbacks.write().clear();
        self.metrics_callbacks.write().clear();
        self.store_changed_callbacks.write().clear();
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Dispatches an event to the generic callbacks, then to the specific ones.
    pub fn dispatch(&self, event: &StoreEvent) {
        for callback in snapshot(&self.store_changed_callbacks) {
            callback(event);
        }

        match event {
            StoreEvent::DeviceAdded { device } => {
                for callback in snapshot(&self.added_callbacks) {
                    callback(device);
                }
            }
            StoreEvent::DeviceToggled { device } | StoreEvent::DeviceUpdated { device, .. } => {
                for callback in snapshot(&self.changed_callbacks) {
                    callback(device);
                }
            }
            StoreEvent::DeviceRemoved { device } => {
                for callback in snapshot(&self.removed_callbacks) {
                    callback(device);
                }
            }
            StoreEvent::MetricsUpdated { metrics } => {
                for callback in snapshot(&self.metrics_callbacks) {
                    callback(metrics);
                }
            }
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.added_callbacks.read().len()
            + self.changed_callbacks.read().len()
            + self.removed_callbacks.read().len()
            + self.metrics_callbacks.read().len()
            + self.store_changed_callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

/// Clones the callbacks out so none of the registry locks is held while they run.
fn snapshot<C: Clone>(callbacks: &Callbacks<C>) -> Vec<C> {
    callbacks.read().values().cloned().collect()
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}
