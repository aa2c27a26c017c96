// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device and metrics records, partial updates, and the store state.
//!
//! [`Device`] and [`DeviceMetrics`] are the records the store owns.
//! [`DevicePatch`] and [`MetricsPatch`] describe partial updates, and
//! [`NewDevice`] is the input for adding a device. [`StoreState`] holds the
//! ordered collection and applies mutations to it.
//!
//! # Examples
//!
//! ```
//! use homedeck::state::{DevicePatch, NewDevice, StoreState};
//! use homedeck::types::DeviceType;
//!
//! let mut state = StoreState::default();
//! let device = state.add(NewDevice::new("Bedroom AC", DeviceType::Thermostat, "Bedroom"));
//! let id = device.id().clone();
//!
//! state.update(&id, &DevicePatch::new().temperature(21.5)).unwrap();
//! assert_eq!(state.get(&id).unwrap().temperature(), Some(21.5));
//! ```

mod clock;
mod device;
mod device_patch;
mod metrics;
mod store_state;

pub use device::{Device, NewDevice};
pub use device_patch::DevicePatch;
pub use metrics::{DeviceMetrics, MetricsPatch};
pub use store_state::StoreState;
