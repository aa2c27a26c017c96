// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Partial device updates.

use crate::types::{DeviceAttribute, DeviceType};

/// A partial update to a device.
///
/// Every field left `None` is untouched when the patch is merged. The id and
/// the timestamp cannot be patched.
///
/// Patches are not checked against the device type: a fan can receive a
/// brightness. [`DevicePatch::inapplicable_attributes`] reports such fields
/// for callers that want to warn about them.
///
/// # Examples
///
/// ```
/// use homedeck::state::DevicePatch;
/// use homedeck::types::{DeviceAttribute, DeviceType};
///
/// let patch = DevicePatch::new().temperature(25.0);
/// assert!(patch.inapplicable_attributes(DeviceType::Thermostat).is_empty());
/// assert_eq!(
///     patch.inapplicable_attributes(DeviceType::Light),
///     vec![DeviceAttribute::Temperature]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DevicePatch {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New device type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DeviceType>,
    /// New location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// New on/off state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// New temperature set point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// New brightness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
    /// New fan speed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<u8>,
    /// New battery level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<u8>,
}

impl DevicePatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the device type.
    #[must_use]
    pub fn device_type(mut self, device_type: DeviceType) -> Self {
        self.device_type = Some(device_type);
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the on/off state.
    #[must_use]
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Sets the temperature set point.
    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the brightness.
    #[must_use]
    pub fn brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }

    /// Sets the fan speed.
    #[must_use]
    pub fn speed(mut self, speed: u8) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Sets the battery level.
    #[must_use]
    pub fn battery_level(mut self, battery_level: u8) -> Self {
        self.battery_level = Some(battery_level);
        self
    }

    /// Returns `true` if the patch sets no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns the type-specific attributes this patch sets.
    #[must_use]
    pub fn attributes(&self) -> Vec<DeviceAttribute> {
        [
            (self.temperature.is_some(), DeviceAttribute::Temperature),
            (self.brightness.is_some(), DeviceAttribute::Brightness),
            (self.speed.is_some(), DeviceAttribute::Speed),
            (self.battery_level.is_some(), DeviceAttribute::BatteryLevel),
        ]
        .into_iter()
        .filter_map(|(set, attribute)| set.then_some(attribute))
        .collect()
    }

    /// Returns the attributes this patch sets that do not apply to `device_type`.
    ///
    /// If the patch itself changes the type, the new type is checked instead.
    #[must_use]
    pub fn inapplicable_attributes(&self, device_type: DeviceType) -> Vec<DeviceAttribute> {
        let target = self.device_type.unwrap_or(device_type);
        self.attributes()
            .into_iter()
            .filter(|attribute| !target.supports(*attribute))
            .collect()
    }
}
