// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for observable stores.

use crate::event::StoreEvent;
use crate::state::{Device, DeviceMetrics};
use crate::subscription::SubscriptionId;

/// Trait for types whose changes can be observed through callbacks.
///
/// Callbacks run synchronously inside the mutating call, after the new state
/// is in place, so a callback reading the store sees the change.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use homedeck::DeviceStore;
/// use homedeck::subscription::Subscribable;
/// use homedeck::types::DeviceId;
///
/// let store = DeviceStore::with_demo_devices();
/// let toggles = Arc::new(AtomicUsize::new(0));
/// let counter = toggles.clone();
///
/// let sub_id = store.on_device_changed(move |device| {
///     println!("{} is now {}", device.name(), device.is_active());
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// store.toggle_device(&DeviceId::from("1")).unwrap();
/// assert_eq!(toggles.load(Ordering::SeqCst), 1);
///
/// store.unsubscribe(sub_id);
/// ```
pub trait Subscribable {
    /// Subscribes to added devices.
    fn on_device_added<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Device) + Send + Sync + 'static;

    /// Subscribes to toggled or updated devices.
    fn on_device_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Device) + Send + Sync + 'static;

    /// Subscribes to removed devices.
    fn on_device_removed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Device) + Send + Sync + 'static;

    /// Subscribes to metrics updates.
    fn on_metrics_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&DeviceMetrics) + Send + Sync + 'static;

    /// Subscribes to every change.
    fn on_store_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static;

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
