// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Store change events.

use crate::state::{Device, DeviceMetrics, DevicePatch};
use crate::types::DeviceId;

/// A change made to the store.
///
/// Device events carry the device as it is after the change (or, for
/// removal, as it was just before). The metrics event carries the full
/// snapshot after the merge.
///
/// # Examples
///
/// ```
/// use homedeck::event::StoreEvent;
/// use homedeck::state::Device;
/// use homedeck::types::DeviceType;
///
/// let device = Device::new("1", "Lamp", DeviceType::Light, "Office");
/// let event = StoreEvent::DeviceAdded { device };
///
/// assert!(event.is_lifecycle());
/// assert_eq!(event.device_id().unwrap().as_str(), "1");
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StoreEvent {
    /// A device was appended to the collection.
    DeviceAdded {
        /// The new device.
        device: Device,
    },

    /// A device's on/off state was flipped.
    DeviceToggled {
        /// The device after the toggle.
        device: Device,
    },

    /// A partial update was merged into a device.
    DeviceUpdated {
        /// The device after the merge.
        device: Device,
        /// The patch that was merged.
        patch: DevicePatch,
    },

    /// A device was removed from the collection.
    DeviceRemoved {
        /// The removed device.
        device: Device,
    },

    /// The metrics snapshot was updated.
    MetricsUpdated {
        /// The snapshot after the merge.
        metrics: DeviceMetrics,
    },
}

impl StoreEvent {
    /// Returns the device this event concerns, if any.
    #[must_use]
    pub fn device(&self) -> Option<&Device> {
        match self {
            Self::DeviceAdded { device }
            | Self::DeviceToggled { device }
            | Self::DeviceUpdated { device, .. }
            | Self::DeviceRemoved { device } => Some(device),
            Self::MetricsUpdated { .. } => None,
        }
    }

    /// Returns the id of the device this event concerns, if any.
    #[must_use]
    pub fn device_id(&self) -> Option<&DeviceId> {
        self.device().map(Device::id)
    }

    /// Returns `true` if a device was added or removed.
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::DeviceAdded { .. } | Self::DeviceRemoved { .. })
    }

    /// Returns `true` if an existing device was toggled or updated.
    #[must_use]
    pub fn is_device_change(&self) -> bool {
        matches!(self, Self::DeviceToggled { .. } | Self::DeviceUpdated { .. })
    }

    /// Returns `true` if the metrics snapshot changed.
    #[must_use]
    pub fn is_metrics(&self) -> bool {
        matches!(self, Self::MetricsUpdated { .. })
    }
}
