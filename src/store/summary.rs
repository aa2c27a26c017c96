// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device counts for the dashboard summary.

use std::collections::BTreeMap;
use std::fmt;

use crate::state::Device;
use crate::types::DeviceType;

/// Counts derived from the device collection.
///
/// `Display` renders `active/total`, the form used by the "Active Devices"
/// card.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSummary {
    /// Number of devices.
    pub total: usize,
    /// Number of devices switched on.
    pub active: usize,
    /// Number of devices per type. Types with no device are absent.
    pub by_type: BTreeMap<DeviceType, usize>,
}

impl DeviceSummary {
    /// Computes the summary of a device sequence.
    pub fn from_devices<'a>(devices: impl IntoIterator<Item = &'a Device>) -> Self {
        devices
            .into_iter()
            .fold(Self::default(), |mut summary, device| {
                summary.total += 1;
                if device.is_active() {
                    summary.active += 1;
                }
                *summary.by_type.entry(device.device_type()).or_default() += 1;
                summary
            })
    }

    /// Number of devices switched off.
    #[must_use]
    pub fn inactive(&self) -> usize {
        self.total.saturating_sub(self.active)
    }

    /// Number of devices of the given type.
    #[must_use]
    pub fn count_of(&self, device_type: DeviceType) -> usize {
        self.by_type.get(&device_type).copied().unwrap_or(0)
    }
}

impl fmt::Display for DeviceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.active, self.total)
    }
}
