// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The observable device store.

use parking_lot::{RwLock, RwLockWriteGuard};
use tokio::sync::broadcast;

use crate::error::Result;
use crate::event::{EventBus, StoreEvent};
use crate::state::{Device, DeviceMetrics, DevicePatch, MetricsPatch, NewDevice, StoreState};
use crate::subscription::{CallbackRegistry, Subscribable, SubscriptionId};
use crate::types::DeviceId;

use super::{DeviceSummary, StoreConfig};

/// Single source of truth for devices and the metrics snapshot.
///
/// All reads return owned snapshots. Every successful mutation:
///
/// 1. replaces the affected record and stamps its timestamp,
/// 2. publishes the [`StoreEvent`] on the async event stream,
/// 3. releases the state lock,
/// 4. calls every registered callback synchronously, in registration order,
///
/// and only then returns. Callbacks may therefore read the store and see the
/// new state. The stream carries events in the order the state changed, even
/// when a callback mutates the store again or several threads write at once.
///
/// Mutations naming an id that is not in the store fail with
/// [`Error::DeviceNotFound`](crate::Error::DeviceNotFound), change nothing
/// and notify nobody.
///
/// The store is `Send + Sync`; share it between views with an `Arc`.
///
/// # Examples
///
/// ```
/// use homedeck::DeviceStore;
/// use homedeck::state::{DevicePatch, NewDevice};
/// use homedeck::types::{DeviceId, DeviceType};
///
/// let store = DeviceStore::with_demo_devices();
///
/// store.toggle_device(&DeviceId::from("1"))?;
/// store.update_device(&DeviceId::from("2"), DevicePatch::new().temperature(25.0))?;
///
/// let hallway = store.add_device(NewDevice::new("Hallway Light", DeviceType::Light, "Hallway"));
/// assert_eq!(store.device_count(), 6);
///
/// store.remove_device(hallway.id())?;
/// assert_eq!(store.summary().to_string(), "3/5");
/// # Ok::<(), homedeck::Error>(())
/// ```
#[derive(Debug)]
pub struct DeviceStore {
    /// Devices and metrics.
    state: RwLock<StoreState>,
    /// Synchronous observers.
    callbacks: CallbackRegistry,
    /// Async event stream.
    event_bus: EventBus,
}

impl DeviceStore {
    /// Creates a store with no devices and default metrics.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(StoreState::default(), EventBus::new())
    }

    /// Creates a store seeded with the dashboard demo devices.
    ///
    /// See [`StoreConfig::demo`].
    ///
    /// # Panics
    ///
    /// Panics only if the built-in demo seed repeats an id, which it does not.
    #[must_use]
    pub fn with_demo_devices() -> Self {
        // Safe: the demo seed has no duplicate ids
        Self::from_config(StoreConfig::demo()).expect("demo device ids should be unique")
    }

    /// Creates a store from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateDevice`](crate::Error::DuplicateDevice) if
    /// two configured devices share an id.
    pub fn from_config(config: StoreConfig) -> Result<Self> {
        let state = StoreState::with_devices(config.devices, config.metrics)?;
        tracing::debug!(devices = state.len(), "Device store created");
        Ok(Self::with_parts(
            state,
            EventBus::with_capacity(config.event_capacity),
        ))
    }

    fn with_parts(state: StoreState, event_bus: EventBus) -> Self {
        Self {
            state: RwLock::new(state),
            callbacks: CallbackRegistry::new(),
            event_bus,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns all devices in insertion order.
    #[must_use]
    pub fn list_devices(&self) -> Vec<Device> {
        self.state.read().devices().cloned().collect()
    }

    /// Returns the device with the given id.
    #[must_use]
    pub fn get_device(&self, id: &DeviceId) -> Option<Device> {
        self.state.read().get(id).cloned()
    }

    /// Returns `true` if a device with the given id exists.
    #[must_use]
    pub fn contains_device(&self, id: &DeviceId) -> bool {
        self.state.read().contains(id)
    }

    /// Returns the number of devices.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.state.read().len()
    }

    /// Returns `true` if the store has no devices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }

    /// Returns the metrics snapshot.
    #[must_use]
    pub fn metrics(&self) -> DeviceMetrics {
        self.state.read().metrics().clone()
    }

    /// Returns active and per-type device counts.
    #[must_use]
    pub fn summary(&self) -> DeviceSummary {
        DeviceSummary::from_devices(self.state.read().devices())
    }

    /// Returns the number of successful mutations since creation.
    ///
    /// Views can compare revisions to skip redundant refreshes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.state.read().revision()
    }

    // =========================================================================
    // Device mutations
    // =========================================================================

    /// Flips a device's on/off state.
    ///
    /// Returns the device after the toggle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`](crate::Error::DeviceNotFound) if no
    /// device has this id.
    pub fn toggle_device(&self, id: &DeviceId) -> Result<Device> {
        let mut state = self.state.write();
        let device = state
            .toggle(id)
            .inspect_err(|err| tracing::debug!(%id, %err, "Toggle rejected"))?;

        tracing::debug!(%id, is_active = device.is_active(), "Device toggled");
        self.commit(
            state,
            StoreEvent::DeviceToggled {
                device: device.clone(),
            },
        );
        Ok(device)
    }

    /// Merges a partial update into a device.
    ///
    /// The patch is not checked against the device type; attributes that do
    /// not apply are stored anyway and logged at debug level.
    ///
    /// Returns the device after the merge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`](crate::Error::DeviceNotFound) if no
    /// device has this id.
    pub fn update_device(&self, id: &DeviceId, patch: DevicePatch) -> Result<Device> {
        let mut state = self.state.write();
        let device = state
            .update(id, &patch)
            .inspect_err(|err| tracing::debug!(%id, %err, "Update rejected"))?;

        let inapplicable = patch.inapplicable_attributes(device.device_type());
        if !inapplicable.is_empty() {
            tracing::debug!(
                %id,
                device_type = %device.device_type(),
                ?inapplicable,
                "Patch sets attributes that do not apply to this device type"
            );
        }

        tracing::debug!(%id, "Device updated");
        self.commit(
            state,
            StoreEvent::DeviceUpdated {
                device: device.clone(),
                patch,
            },
        );
        Ok(device)
    }

    /// Appends a new device under a freshly generated id.
    ///
    /// Returns the created device.
    pub fn add_device(&self, device: NewDevice) -> Device {
        let mut state = self.state.write();
        let device = state.add(device);

        tracing::debug!(id = %device.id(), name = device.name(), "Device added");
        self.commit(
            state,
            StoreEvent::DeviceAdded {
                device: device.clone(),
            },
        );
        device
    }

    /// Removes a device.
    ///
    /// Returns the removed device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`](crate::Error::DeviceNotFound) if no
    /// device has this id.
    pub fn remove_device(&self, id: &DeviceId) -> Result<Device> {
        let mut state = self.state.write();
        let device = state
            .remove(id)
            .inspect_err(|err| tracing::debug!(%id, %err, "Remove rejected"))?;

        tracing::debug!(%id, "Device removed");
        self.commit(
            state,
            StoreEvent::DeviceRemoved {
                device: device.clone(),
            },
        );
        Ok(device)
    }

    // =========================================================================
    // Metrics
    // =========================================================================

    /// Merges a partial update into the metrics snapshot.
    ///
    /// Returns the snapshot after the merge.
    pub fn update_metrics(&self, patch: MetricsPatch) -> DeviceMetrics {
        let mut state = self.state.write();
        let metrics = state.update_metrics(&patch);

        tracing::debug!(?patch, "Metrics updated");
        self.commit(
            state,
            StoreEvent::MetricsUpdated {
                metrics: metrics.clone(),
            },
        );
        metrics
    }

    // =========================================================================
    // Async event stream
    // =========================================================================

    /// Subscribes to the async event stream.
    ///
    /// The receiver gets every event published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_bus.subscribe()
    }

    /// Returns the number of async event stream subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.event_bus.subscriber_count()
    }

    /// Publishes the event under the state lock, then releases the lock and
    /// notifies callbacks.
    ///
    /// Publishing under the lock keeps stream order equal to mutation order.
    fn commit(&self, state: RwLockWriteGuard<'_, StoreState>, event: StoreEvent) {
        self.event_bus.publish(event.clone());
        drop(state);
        self.callbacks.dispatch(&event);
    }
}

impl Default for DeviceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscribable for DeviceStore {
    fn on_device_added<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Device) + Send + Sync + 'static,
    {
        self.callbacks.on_device_added(callback)
    }

    fn on_device_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Device) + Send + Sync + 'static,
    {
        self.callbacks.on_device_changed(callback)
    }

    fn on_device_removed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Device) + Send + Sync + 'static,
    {
        self.callbacks.on_device_removed(callback)
    }

    fn on_metrics_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&DeviceMetrics) + Send + Sync + 'static,
    {
        self.callbacks.on_metrics_changed(callback)
    }

    fn on_store_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        self.callbacks.on_store_changed(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn new_store_is_empty() {
        let store = DeviceStore::new();
        assert!(store.is_empty());
        assert_eq!(store.revision(), 0);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn demo_store_has_five_devices() {
        let store = DeviceStore::with_demo_devices();
        assert_eq!(store.device_count(), 5);
        assert!(store.contains_device(&DeviceId::from("5")));
    }

    #[test]
    fn from_config_rejects_duplicates() {
        let config = StoreConfig::demo().with_devices(StoreConfig::demo().devices);
        assert!(matches!(
            DeviceStore::from_config(config),
            Err(Error::DuplicateDevice(_))
        ));
    }

    #[test]
    fn mutations_bump_revision() {
        let store = DeviceStore::with_demo_devices();

        store.toggle_device(&DeviceId::from("1")).unwrap();
        store.update_metrics(MetricsPatch::new().energy(1.0));
        assert_eq!(store.revision(), 2);

        assert!(store.toggle_device(&DeviceId::from("missing")).is_err());
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn store_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DeviceStore>();
    }
}
