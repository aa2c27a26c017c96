// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Store configuration.

use crate::error::Result;
use crate::event::EventBus;
use crate::state::{Device, DeviceMetrics};
use crate::types::DeviceType;

/// Initial contents and settings for a [`DeviceStore`](super::DeviceStore).
///
/// # Examples
///
/// ```
/// use homedeck::store::StoreConfig;
/// use homedeck::state::Device;
/// use homedeck::types::DeviceType;
///
/// // The five devices of the dashboard demo
/// let demo = StoreConfig::demo();
/// assert_eq!(demo.devices.len(), 5);
///
/// // Hand-picked devices
/// let config = StoreConfig::empty()
///     .with_device(Device::new("porch", "Porch Light", DeviceType::Light, "Porch"))
///     .with_event_capacity(64);
/// assert_eq!(config.devices.len(), 1);
///
/// // From JSON
/// let json = r#"{"metrics": {"temperature": 19.5, "humidity": 40, "energy": 1.1}}"#;
/// let config = StoreConfig::from_json_str(json).unwrap();
/// assert!(config.devices.is_empty());
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    /// Devices present when the store is created, in display order.
    pub devices: Vec<Device>,
    /// Initial metrics snapshot.
    pub metrics: DeviceMetrics,
    /// Buffer size of the async event stream.
    pub event_capacity: usize,
}

impl StoreConfig {
    /// Creates a configuration with no devices and default metrics.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            devices: Vec::new(),
            metrics: DeviceMetrics::default(),
            event_capacity: EventBus::DEFAULT_CAPACITY,
        }
    }

    /// Creates a configuration seeded with the dashboard demo devices.
    ///
    /// Ids `"1"` to `"5"`: a light, a thermostat, a fan, a camera and a lock.
    #[must_use]
    pub fn demo() -> Self {
        Self::empty().with_devices(demo_devices())
    }

    /// Parses a configuration from JSON.
    ///
    /// Missing top-level fields take their [`StoreConfig::empty`] values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`](crate::Error::Parse) if the JSON is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Appends a device.
    #[must_use]
    pub fn with_device(mut self, device: Device) -> Self {
        self.devices.push(device);
        self
    }

    /// Appends several devices.
    #[must_use]
    pub fn with_devices(mut self, devices: impl IntoIterator<Item = Device>) -> Self {
        self.devices.extend(devices);
        self
    }

    /// Sets the initial metrics snapshot.
    #[must_use]
    pub fn with_metrics(mut self, metrics: DeviceMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Sets the buffer size of the async event stream.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::empty()
    }
}

fn demo_devices() -> Vec<Device> {
    vec![
        Device::new("1", "Living Room Light", DeviceType::Light, "Living Room")
            .with_active(true)
            .with_brightness(80),
        Device::new("2", "Bedroom AC", DeviceType::Thermostat, "Bedroom")
            .with_active(false)
            .with_temperature(22.0),
        Device::new("3", "Kitchen Fan", DeviceType::Fan, "Kitchen")
            .with_active(true)
            .with_speed(2),
        Device::new("4", "Front Door Camera", DeviceType::Camera, "Entrance")
            .with_active(true)
            .with_battery_level(85),
        Device::new("5", "Back Door Lock", DeviceType::Lock, "Back Door")
            .with_active(true)
            .with_battery_level(90),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::SecurityStatus;

    #[test]
    fn empty_config() {
        let config = StoreConfig::empty();
        assert!(config.devices.is_empty());
        assert_eq!(config.event_capacity, EventBus::DEFAULT_CAPACITY);
    }

    #[test]
    fn demo_devices_in_order() {
        let config = StoreConfig::demo();
        let ids: Vec<&str> = config.devices.iter().map(|d| d.id().as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);

        let ac = &config.devices[1];
        assert_eq!(ac.device_type(), DeviceType::Thermostat);
        assert!(!ac.is_active());
        assert_eq!(ac.temperature(), Some(22.0));
    }

    #[test]
    fn demo_attributes_match_types() {
        for device in StoreConfig::demo().devices {
            for attribute in device.present_attributes() {
                assert!(device.device_type().supports(attribute));
            }
        }
    }

    #[test]
    fn from_json_with_devices_and_metrics() {
        let json = r#"{
            "devices": [
                {"id": "a", "name": "Desk Lamp", "type": "light", "location": "Study", "isActive": true, "brightness": 60}
            ],
            "metrics": {"temperature": 20, "humidity": 50, "energy": 2.5, "securityStatus": "warning"},
            "eventCapacity": 16
        }"#;

        let config = StoreConfig::from_json_str(json).unwrap();

        assert_eq!(config.devices.len(), 1);
        assert_eq!(config.devices[0].brightness(), Some(60));
        assert_eq!(config.metrics.security_status, Some(SecurityStatus::Warning));
        assert_eq!(config.event_capacity, 16);
    }

    #[test]
    fn from_json_defaults_missing_fields() {
        let config = StoreConfig::from_json_str("{}").unwrap();
        assert!(config.devices.is_empty());
        assert_eq!(config.metrics.security_status, Some(SecurityStatus::Secured));
        assert_eq!(config.event_capacity, EventBus::DEFAULT_CAPACITY);
    }

    #[test]
    fn from_json_rejects_unknown_device_type() {
        let json = r#"{"devices": [{"id": "a", "name": "X", "type": "toaster", "location": "Kitchen", "isActive": false}]}"#;
        assert!(matches!(StoreConfig::from_json_str(json), Err(Error::Parse(_))));
    }
}
