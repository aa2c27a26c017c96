// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device kinds and the optional attributes each kind carries.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// The kind of a controllable device.
///
/// Every kind shares the on/off `is_active` flag. Some kinds additionally
/// carry one optional attribute, see [`DeviceType::attributes`].
///
/// # Examples
///
/// ```
/// use homedeck::types::{DeviceAttribute, DeviceType};
///
/// let kind: DeviceType = "thermostat".parse().unwrap();
/// assert_eq!(kind, DeviceType::Thermostat);
/// assert!(kind.supports(DeviceAttribute::Temperature));
/// assert!(!kind.supports(DeviceAttribute::Brightness));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// Dimmable light.
    Light,
    /// Heating or cooling unit with a temperature set point.
    Thermostat,
    /// Fan with discrete speed steps.
    Fan,
    /// Battery-powered camera.
    Camera,
    /// Battery-powered door lock.
    Lock,
}

impl DeviceType {
    /// Returns all device types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Light,
            Self::Thermostat,
            Self::Fan,
            Self::Camera,
            Self::Lock,
        ]
    }

    /// Returns the lowercase name used in serialized form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Thermostat => "thermostat",
            Self::Fan => "fan",
            Self::Camera => "camera",
            Self::Lock => "lock",
        }
    }

    /// Returns the optional attributes that are meaningful for this type.
    #[must_use]
    pub const fn attributes(&self) -> &'static [DeviceAttribute] {
        match self {
            Self::Light => &[DeviceAttribute::Brightness],
            Self::Thermostat => &[DeviceAttribute::Temperature],
            Self::Fan => &[DeviceAttribute::Speed],
            Self::Camera | Self::Lock => &[DeviceAttribute::BatteryLevel],
        }
    }

    /// Returns `true` if `attribute` is meaningful for this type.
    #[must_use]
    pub fn supports(&self, attribute: DeviceAttribute) -> bool {
        self.attributes().contains(&attribute)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "thermostat" => Ok(Self::Thermostat),
            "fan" => Ok(Self::Fan),
            "camera" => Ok(Self::Camera),
            "lock" => Ok(Self::Lock),
            _ => Err(ValueError::InvalidDeviceType(s.to_string())),
        }
    }
}

/// A type-specific optional attribute of a device.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum DeviceAttribute {
    /// Set point in degrees Celsius.
    Temperature,
    /// Light level in percent.
    Brightness,
    /// Fan speed step.
    Speed,
    /// Remaining battery in percent.
    BatteryLevel,
}

impl DeviceAttribute {
    /// Returns the camelCase field name of this attribute.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Brightness => "brightness",
            Self::Speed => "speed",
            Self::BatteryLevel => "batteryLevel",
        }
    }
}

impl fmt::Display for DeviceAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceAttribute {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "temperature" => Ok(Self::Temperature),
            "brightness" => Ok(Self::Brightness),
            "speed" => Ok(Self::Speed),
            "batterylevel" | "battery_level" => Ok(Self::BatteryLevel),
            _ => Err(ValueError::InvalidAttribute(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_type_from_str() {
        assert_eq!("light".parse::<DeviceType>().unwrap(), DeviceType::Light);
        assert_eq!("Fan".parse::<DeviceType>().unwrap(), DeviceType::Fan);
        assert_eq!("LOCK".parse::<DeviceType>().unwrap(), DeviceType::Lock);
        assert_eq!(
            "toaster".parse::<DeviceType>(),
            Err(ValueError::InvalidDeviceType("toaster".to_string()))
        );
    }

    #[test]
    fn device_type_display_matches_serde() {
        for kind in DeviceType::all() {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn each_type_has_one_attribute() {
        assert_eq!(DeviceType::Light.attributes(), &[DeviceAttribute::Brightness]);
        assert_eq!(DeviceType::Thermostat.attributes(), &[DeviceAttribute::Temperature]);
        assert_eq!(DeviceType::Fan.attributes(), &[DeviceAttribute::Speed]);
        assert!(DeviceType::Camera.supports(DeviceAttribute::BatteryLevel));
        assert!(DeviceType::Lock.supports(DeviceAttribute::BatteryLevel));
        assert!(!DeviceType::Lock.supports(DeviceAttribute::Speed));
    }

    #[test]
    fn attribute_names() {
        assert_eq!(DeviceAttribute::BatteryLevel.to_string(), "batteryLevel");
        assert_eq!(
            "batteryLevel".parse::<DeviceAttribute>().unwrap(),
            DeviceAttribute::BatteryLevel
        );
        assert_eq!(
            serde_json::to_string(&DeviceAttribute::BatteryLevel).unwrap(),
            "\"batteryLevel\""
        );
        assert!("volume".parse::<DeviceAttribute>().is_err());
    }
}
