// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device records.

use chrono::{DateTime, Utc};

use crate::types::{DeviceAttribute, DeviceId, DeviceType};

use super::DevicePatch;

/// A controllable smart-home device as tracked by the store.
///
/// Fields are read through accessors; all mutation goes through the
/// [`DeviceStore`](crate::DeviceStore) so that `last_updated` is stamped and
/// observers are notified. A `Device` obtained from the store is an owned
/// snapshot and does not change when the store does.
///
/// Type-specific attributes are `None` when they do not apply to the device,
/// not when their value is unknown.
///
/// # Examples
///
/// ```
/// use homedeck::state::Device;
/// use homedeck::types::DeviceType;
///
/// let lamp = Device::new("1", "Living Room Light", DeviceType::Light, "Living Room")
///     .with_active(true)
///     .with_brightness(80);
///
/// assert_eq!(lamp.id().as_str(), "1");
/// assert!(lamp.is_active());
/// assert_eq!(lamp.brightness(), Some(80));
/// assert_eq!(lamp.temperature(), None);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    id: DeviceId,
    name: String,
    #[serde(rename = "type")]
    device_type: DeviceType,
    location: String,
    is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    brightness: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speed: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    battery_level: Option<u8>,
    #[serde(default = "Utc::now")]
    last_updated: DateTime<Utc>,
}

impl Device {
    /// Creates an inactive device with no optional attributes.
    ///
    /// `last_updated` is set to the current time.
    #[must_use]
    pub fn new(
        id: impl Into<DeviceId>,
        name: impl Into<String>,
        device_type: DeviceType,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            device_type,
            location: location.into(),
            is_active: false,
            temperature: None,
            brightness: None,
            speed: None,
            battery_level: None,
            last_updated: Utc::now(),
        }
    }

    /// Builds a device from an add request with a store-assigned id and stamp.
    pub(crate) fn from_new(id: DeviceId, new: NewDevice, stamp: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            device_type: new.device_type,
            location: new.location,
            is_active: new.is_active,
            temperature: new.temperature,
            brightness: new.brightness,
            speed: new.speed,
            battery_level: new.battery_level,
            last_updated: stamp,
        }
    }

    /// Sets the on/off state.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Sets the temperature set point.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the brightness.
    #[must_use]
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }

    /// Sets the fan speed.
    #[must_use]
    pub fn with_speed(mut self, speed: u8) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Sets the battery level.
    #[must_use]
    pub fn with_battery_level(mut self, battery_level: u8) -> Self {
        self.battery_level = Some(battery_level);
        self
    }

    /// Sets the last-updated timestamp.
    #[must_use]
    pub fn with_last_updated(mut self, last_updated: DateTime<Utc>) -> Self {
        self.last_updated = last_updated;
        self
    }

    /// Returns the device id.
    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the device type.
    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    /// Returns the room or zone label.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns `true` if the device is switched on.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the temperature set point, if applicable.
    #[must_use]
    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    /// Returns the brightness, if applicable.
    #[must_use]
    pub fn brightness(&self) -> Option<u8> {
        self.brightness
    }

    /// Returns the fan speed, if applicable.
    #[must_use]
    pub fn speed(&self) -> Option<u8> {
        self.speed
    }

    /// Returns the battery level, if applicable.
    #[must_use]
    pub fn battery_level(&self) -> Option<u8> {
        self.battery_level
    }

    /// Returns when the device was created or last mutated.
    #[must_use]
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Returns the attributes that are currently set on this device.
    #[must_use]
    pub fn present_attributes(&self) -> Vec<DeviceAttribute> {
        let mut present = Vec::new();
        if self.temperature.is_some() {
            present.push(DeviceAttribute::Temperature);
        }
        if self.brightness.is_some() {
            present.push(DeviceAttribute::Brightness);
        }
        if self.speed.is_some() {
            present.push(DeviceAttribute::Speed);
        }
        if self.battery_level.is_some() {
            present.push(DeviceAttribute::BatteryLevel);
        }
        present
    }

    /// Flips the on/off state.
    pub(crate) fn toggle(&mut self, stamp: DateTime<Utc>) {
        self.is_active = !self.is_active;
        self.last_updated = stamp;
    }

    /// Merges every field set in `patch`; unset fields are left untouched.
    pub(crate) fn apply(&mut self, patch: &DevicePatch, stamp: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(device_type) = patch.device_type {
            self.device_type = device_type;
        }
        if let Some(location) = &patch.location {
            self.location.clone_from(location);
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if patch.temperature.is_some() {
            self.temperature = patch.temperature;
        }
        if patch.brightness.is_some() {
            self.brightness = patch.brightness;
        }
        if patch.speed.is_some() {
            self.speed = patch.speed;
        }
        if patch.battery_level.is_some() {
            self.battery_level = patch.battery_level;
        }
        self.last_updated = stamp;
    }
}

/// A device to be added to the store.
///
/// Carries everything a [`Device`] has except the id and timestamp, which
/// the store assigns.
///
/// # Examples
///
/// ```
/// use homedeck::state::NewDevice;
/// use homedeck::types::DeviceType;
///
/// let hallway = NewDevice::new("Hallway Light", DeviceType::Light, "Hallway");
/// assert!(!hallway.is_active);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDevice {
    /// Human-readable name.
    pub name: String,
    /// Device type.
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    /// Room or zone label.
    pub location: String,
    /// Initial on/off state.
    #[serde(default)]
    pub is_active: bool,
    /// Temperature set point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Brightness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
    /// Fan speed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<u8>,
    /// Battery level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<u8>,
}

impl NewDevice {
    /// Creates an inactive device request with no optional attributes.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        device_type: DeviceType,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            device_type,
            location: location.into(),
            is_active: false,
            temperature: None,
            brightness: None,
            speed: None,
            battery_level: None,
        }
    }

    /// Sets the initial on/off state.
    #[must_use]
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Sets the temperature set point.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the brightness.
    #[must_use]
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }

    /// Sets the fan speed.
    #[must_use]
    pub fn with_speed(mut self, speed: u8) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Sets the battery level.
    #[must_use]
    pub fn with_battery_level(mut self, battery_level: u8) -> Self {
        self.battery_level = Some(battery_level);
        self
    }
}
