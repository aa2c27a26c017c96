// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device collection and metrics snapshot, without locking or observers.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::DeviceId;

use super::clock::MonotonicClock;
use super::{Device, DeviceMetrics, DevicePatch, MetricsPatch, NewDevice};

/// Devices keyed by id, their insertion order, and the metrics snapshot.
///
/// Every successful mutation stamps the affected record, bumps the revision
/// and returns a copy of the record as it now is. A failed mutation changes
/// nothing.
///
/// [`DeviceStore`](crate::DeviceStore) wraps this type with a lock and
/// observer dispatch; it can also be used directly by single-owner code.
///
/// # Examples
///
/// ```
/// use homedeck::state::{Device, DeviceMetrics, StoreState};
/// use homedeck::types::{DeviceId, DeviceType};
///
/// let mut state = StoreState::with_devices(
///     vec![Device::new("1", "Lamp", DeviceType::Light, "Office")],
///     DeviceMetrics::default(),
/// )
/// .unwrap();
///
/// state.toggle(&DeviceId::from("1")).unwrap();
/// assert!(state.get(&DeviceId::from("1")).unwrap().is_active());
/// assert_eq!(state.revision(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct StoreState {
    devices: HashMap<DeviceId, Device>,
    order: Vec<DeviceId>,
    metrics: DeviceMetrics,
    clock: MonotonicClock,
    revision: u64,
}

impl StoreState {
    /// Creates an empty collection with the given metrics.
    #[must_use]
    pub fn new(metrics: DeviceMetrics) -> Self {
        let mut clock = MonotonicClock::new();
        clock.observe(metrics.last_update);
        Self {
            devices: HashMap::new(),
            order: Vec::new(),
            metrics,
            clock,
            revision: 0,
        }
    }

    /// Creates a collection seeded with `devices`, kept in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateDevice`] if two devices share an id.
    pub fn with_devices(devices: Vec<Device>, metrics: DeviceMetrics) -> Result<Self> {
        let mut state = Self::new(metrics);
        for device in devices {
            let id = device.id().clone();
            if state.devices.contains_key(&id) {
                return Err(Error::DuplicateDevice(id));
            }
            state.clock.observe(device.last_updated());
            state.order.push(id.clone());
            state.devices.insert(id, device);
        }
        Ok(state)
    }

    // ========== Reads ==========

    /// Iterates over devices in insertion order.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.order.iter().filter_map(|id| self.devices.get(id))
    }

    /// Returns the device with the given id.
    #[must_use]
    pub fn get(&self, id: &DeviceId) -> Option<&Device> {
        self.devices.get(id)
    }

    /// Returns `true` if a device with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &DeviceId) -> bool {
        self.devices.contains_key(id)
    }

    /// Returns the number of devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if there are no devices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the metrics snapshot.
    #[must_use]
    pub fn metrics(&self) -> &DeviceMetrics {
        &self.metrics
    }

    /// Returns the number of successful mutations so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ========== Mutations ==========

    /// Flips `is_active` of a device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if no device has this id.
    pub fn toggle(&mut self, id: &DeviceId) -> Result<Device> {
        let device = self
            .devices
            .get_mut(id)
            .ok_or_else(|| Error::DeviceNotFound(id.clone()))?;

        device.toggle(self.clock.stamp());
        let device = device.clone();
        self.revision += 1;

        Ok(device)
    }

    /// Merges a partial update into a device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if no device has this id.
    pub fn update(&mut self, id: &DeviceId, patch: &DevicePatch) -> Result<Device> {
        let device = self
            .devices
            .get_mut(id)
            .ok_or_else(|| Error::DeviceNotFound(id.clone()))?;

        device.apply(patch, self.clock.stamp());
        let device = device.clone();
        self.revision += 1;

        Ok(device)
    }

    /// Appends a new device under a freshly generated id.
    pub fn add(&mut self, new: NewDevice) -> Device {
        let id = self.fresh_id();
        let device = Device::from_new(id.clone(), new, self.clock.stamp());

        self.order.push(id.clone());
        self.devices.insert(id, device.clone());
        self.revision += 1;

        device
    }

    /// Removes a device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if no device has this id.
    pub fn remove(&mut self, id: &DeviceId) -> Result<Device> {
        let device = self
            .devices
            .remove(id)
            .ok_or_else(|| Error::DeviceNotFound(id.clone()))?;

        self.order.retain(|existing| existing != id);
        self.revision += 1;

        Ok(device)
    }

    /// Merges a partial update into the metrics snapshot.
    pub fn update_metrics(&mut self, patch: &MetricsPatch) -> DeviceMetrics {
        let stamp = self.clock.stamp();
        self.metrics.apply(patch, stamp);
        self.revision += 1;

        self.metrics.clone()
    }

    /// Generates an id that no current device uses.
    fn fresh_id(&self) -> DeviceId {
        loop {
            let id = DeviceId::generate();
            if !self.devices.contains_key(&id) {
                return id;
            }
        }
    }
}

impl Default for StoreState {
    fn default() -> Self {
        Self::new(DeviceMetrics::default())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};

    use super::*;
    use crate::types::DeviceType;

    fn three_devices() -> StoreState {
        StoreState::with_devices(
            vec![
                Device::new("1", "Living Room Light", DeviceType::Light, "Living Room")
                    .with_active(true)
                    .with_brightness(80),
                Device::new("2", "Bedroom AC", DeviceType::Thermostat, "Bedroom")
                    .with_temperature(22.0),
                Device::new("3", "Kitchen Fan", DeviceType::Fan, "Kitchen")
                    .with_active(true)
                    .with_speed(2),
            ],
            DeviceMetrics::default(),
        )
        .unwrap()
    }

    fn ids(state: &StoreState) -> Vec<&str> {
        state.devices().map(|d| d.id().as_str()).collect()
    }

    #[test]
    fn seed_keeps_order() {
        let state = three_devices();
        assert_eq!(ids(&state), vec!["1", "2", "3"]);
        assert_eq!(state.len(), 3);
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn seed_rejects_duplicate_ids() {
        let result = StoreState::with_devices(
            vec![
                Device::new("1", "A", DeviceType::Light, "Hall"),
                Device::new("1", "B", DeviceType::Fan, "Hall"),
            ],
            DeviceMetrics::default(),
        );
        assert!(matches!(result, Err(Error::DuplicateDevice(id)) if id.as_str() == "1"));
    }

    #[test]
    fn toggle_returns_updated_device() {
        let mut state = three_devices();
        let device = state.toggle(&DeviceId::from("1")).unwrap();

        assert!(!device.is_active());
        assert_eq!(state.get(&DeviceId::from("1")), Some(&device));
    }

    #[test]
    fn toggle_missing_changes_nothing() {
        let mut state = three_devices();
        let before: Vec<Device> = state.devices().cloned().collect();

        let result = state.toggle(&DeviceId::from("nonexistent"));

        assert!(matches!(result, Err(Error::DeviceNotFound(_))));
        assert_eq!(state.devices().cloned().collect::<Vec<_>>(), before);
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn update_stamps_newer_time() {
        let mut state = three_devices();
        let id = DeviceId::from("2");
        let before = state.get(&id).unwrap().last_updated();

        state.update(&id, &DevicePatch::new().temperature(25.0)).unwrap();

        let device = state.get(&id).unwrap();
        assert_eq!(device.temperature(), Some(25.0));
        assert!(device.last_updated() > before);
    }

    #[test]
    fn seeded_future_timestamp_still_advances() {
        let future = Utc::now() + TimeDelta::days(1);
        let mut state = StoreState::with_devices(
            vec![Device::new("1", "Lamp", DeviceType::Light, "Office").with_last_updated(future)],
            DeviceMetrics::default(),
        )
        .unwrap();

        state.toggle(&DeviceId::from("1")).unwrap();

        assert!(state.get(&DeviceId::from("1")).unwrap().last_updated() > future);
    }

    #[test]
    fn add_appends_with_fresh_id() {
        let mut state = three_devices();

        let device = state.add(NewDevice::new("Hallway Light", DeviceType::Light, "Hallway"));

        assert_eq!(state.len(), 4);
        assert!(!["1", "2", "3"].contains(&device.id().as_str()));
        assert_eq!(state.devices().last(), Some(&device));
    }

    #[test]
    fn remove_then_remove_again() {
        let mut state = three_devices();
        let id = DeviceId::from("2");

        state.remove(&id).unwrap();
        assert_eq!(ids(&state), vec!["1", "3"]);

        let again = state.remove(&id);
        assert!(matches!(again, Err(Error::DeviceNotFound(_))));
        assert_eq!(state.len(), 2);
        assert_eq!(state.revision(), 1);
    }

    #[test]
    fn update_metrics_merges_and_stamps() {
        let mut state = StoreState::default();
        let before = state.metrics().last_update;

        state.update_metrics(&MetricsPatch::new().humidity(60.0));

        assert!((state.metrics().humidity - 60.0).abs() < f64::EPSILON);
        assert!(state.metrics().last_update > before);
        assert_eq!(state.revision(), 1);
    }
}
